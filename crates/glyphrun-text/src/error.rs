/// Errors that can occur while building fonts for the layout engine.
///
/// Layout itself never fails: unknown characters, clipped glyphs and text
/// that overflows a bounded height are skipped silently.
#[derive(Debug, Clone, PartialEq)]
pub enum TextError {
    /// A glyph referenced an atlas page that was never added.
    PageOutOfRange { page: usize, page_count: usize },

    /// An atlas page was given a zero, negative or non-finite size.
    InvalidPageSize { width: f32, height: f32 },

    /// A glyph rectangle has a negative or non-finite extent.
    InvalidGlyphRect { character: char },

    /// A grid font was asked for zero columns or an empty cell.
    InvalidGrid(String),

    /// The drop-shadow variant carries a drop shadow of its own.
    NestedDropShadow,
}

impl std::fmt::Display for TextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextError::PageOutOfRange { page, page_count } => write!(
                f,
                "Atlas page {} out of range (font has {} pages)",
                page, page_count
            ),
            TextError::InvalidPageSize { width, height } => {
                write!(f, "Invalid atlas page size: {}x{}", width, height)
            }
            TextError::InvalidGlyphRect { character } => {
                write!(f, "Invalid glyph rectangle for {:?}", character)
            }
            TextError::InvalidGrid(msg) => write!(f, "Invalid glyph grid: {}", msg),
            TextError::NestedDropShadow => {
                write!(f, "Drop-shadow font cannot have a drop shadow of its own")
            }
        }
    }
}

impl std::error::Error for TextError {}

/// Result type for text operations.
pub type TextResult<T> = Result<T, TextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = TextError::PageOutOfRange {
            page: 3,
            page_count: 1,
        };
        assert_eq!(
            err.to_string(),
            "Atlas page 3 out of range (font has 1 pages)"
        );
        assert_eq!(
            TextError::InvalidGlyphRect { character: 'x' }.to_string(),
            "Invalid glyph rectangle for 'x'"
        );
    }
}
