//! Glyph lookup: the read-only font contract the layout engine consumes,
//! plus an in-memory bitmap font that implements it.

use glyphrun_core::alloc::HashMap;
use glyphrun_core::geometry::{Rect, Size};

use crate::error::{TextError, TextResult};
use crate::options::{Monospacing, RenderOptions};

/// Placement of one character in a font atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// Atlas-local rectangle in pixels.
    pub rect: Rect<f32>,
    /// Distance from the line top to the glyph top.
    pub y_offset: f32,
    /// Atlas page holding the glyph.
    pub page: usize,
}

impl Glyph {
    pub const fn new(page: usize, rect: Rect<f32>, y_offset: f32) -> Self {
        Self {
            rect,
            y_offset,
            page,
        }
    }
}

/// Font metrics and glyph lookup used during layout.
///
/// Implementors answer per-character lookups and a handful of aggregate
/// metrics. Characters without a glyph are treated as unrenderable and take
/// up no space.
pub trait GlyphProvider {
    fn glyph(&self, c: char) -> Option<&Glyph>;

    /// Pixel size of an atlas page.
    fn page_size(&self, page: usize) -> Option<Size<f32>>;

    /// Advance correction for the ordered pair `left`, `right`. Zero when the
    /// font has no entry.
    fn kerning_pair(&self, left: char, right: char) -> f32;

    fn mean_glyph_width(&self) -> f32;

    fn max_glyph_width(&self) -> f32;

    fn max_glyph_height(&self) -> f32;

    /// Whether the font's glyphs share one advance.
    fn naturally_monospaced(&self) -> bool;

    /// True for the blurred variant used to draw drop shadows.
    fn is_drop_shadow(&self) -> bool {
        false
    }

    /// The drop-shadow variant of this font, if it has one.
    fn drop_shadow(&self) -> Option<&dyn GlyphProvider> {
        None
    }

    /// Kerning for character `index` of `chars`.
    ///
    /// The right-hand side of the pair is the next character of the word or,
    /// at the last character, `following` (the first character of an
    /// adjacent word node). Pass `None` when measuring a standalone line.
    fn kerning_correction(&self, index: usize, chars: &[char], following: Option<char>) -> f32 {
        let Some(&left) = chars.get(index) else {
            return 0.0;
        };
        chars
            .get(index + 1)
            .copied()
            .or(following)
            .map_or(0.0, |right| self.kerning_pair(left, right))
    }

    fn is_monospacing_active(&self, options: &RenderOptions) -> bool {
        match options.monospacing {
            Monospacing::Yes => true,
            Monospacing::No => false,
            Monospacing::Natural => self.naturally_monospaced(),
        }
    }

    /// Fixed advance used while monospacing is active.
    fn monospace_width(&self, options: &RenderOptions) -> f32 {
        (1.0 + (1.0 + options.character_spacing) * self.max_glyph_width()).ceil()
    }
}

/// An in-memory bitmap font: atlas page sizes, a glyph table and kerning
/// pairs, with an optional drop-shadow variant.
///
/// Aggregate metrics (mean and maximum glyph extents) are kept up to date as
/// glyphs are added.
///
/// ```
/// use glyphrun_core::geometry::{Rect, Size};
/// use glyphrun_text::{BitmapFont, Glyph, GlyphProvider};
///
/// let mut font = BitmapFont::new();
/// let page = font.add_page(Size::new(256.0, 256.0))?;
/// font.add_glyph('A', Glyph::new(page, Rect::new(0.0, 0.0, 12.0, 16.0), 0.0))?;
/// font.add_glyph('V', Glyph::new(page, Rect::new(12.0, 0.0, 12.0, 16.0), 0.0))?;
/// font.set_kerning_pair('A', 'V', -2.0);
///
/// assert_eq!(font.mean_glyph_width(), 12.0);
/// assert_eq!(font.kerning_correction(0, &['A', 'V'], None), -2.0);
/// # Ok::<(), glyphrun_text::TextError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BitmapFont {
    pages: Vec<Size<f32>>,
    glyphs: HashMap<char, Glyph>,
    kerning: HashMap<(char, char), f32>,
    mean_glyph_width: f32,
    max_glyph_width: f32,
    max_glyph_height: f32,
    monospaced: bool,
    is_drop_shadow: bool,
    drop_shadow: Option<Box<BitmapFont>>,
}

impl BitmapFont {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a single-page font whose glyphs are laid out row by row in
    /// cells of `cell` size, `columns` cells per row.
    pub fn grid(chars: &str, cell: Size<f32>, columns: usize) -> TextResult<Self> {
        if columns == 0 {
            return Err(TextError::InvalidGrid("zero columns".to_string()));
        }
        if !(cell.width > 0.0 && cell.height > 0.0) {
            return Err(TextError::InvalidGrid(format!(
                "cell size {}x{}",
                cell.width, cell.height
            )));
        }

        let count = chars.chars().count();
        let rows = count.div_ceil(columns).max(1);
        let mut font = Self::new();
        let page = font.add_page(Size::new(
            columns as f32 * cell.width,
            rows as f32 * cell.height,
        ))?;

        for (i, c) in chars.chars().enumerate() {
            let rect = Rect::new(
                (i % columns) as f32 * cell.width,
                (i / columns) as f32 * cell.height,
                cell.width,
                cell.height,
            );
            font.glyphs.insert(c, Glyph::new(page, rect, 0.0));
        }
        font.recompute_metrics();
        Ok(font)
    }

    /// Register an atlas page and return its index.
    pub fn add_page(&mut self, size: Size<f32>) -> TextResult<usize> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(size.width) || !valid(size.height) {
            return Err(TextError::InvalidPageSize {
                width: size.width,
                height: size.height,
            });
        }
        self.pages.push(size);
        Ok(self.pages.len() - 1)
    }

    /// Add or replace the glyph for `c`.
    pub fn add_glyph(&mut self, c: char, glyph: Glyph) -> TextResult<()> {
        if glyph.page >= self.pages.len() {
            return Err(TextError::PageOutOfRange {
                page: glyph.page,
                page_count: self.pages.len(),
            });
        }
        let valid = |v: f32| v.is_finite() && v >= 0.0;
        if !valid(glyph.rect.width) || !valid(glyph.rect.height) || !glyph.y_offset.is_finite() {
            return Err(TextError::InvalidGlyphRect { character: c });
        }

        self.glyphs.insert(c, glyph);
        self.recompute_metrics();
        Ok(())
    }

    pub fn set_kerning_pair(&mut self, left: char, right: char, correction: f32) {
        self.kerning.insert((left, right), correction);
    }

    pub fn set_monospaced(&mut self, monospaced: bool) {
        self.monospaced = monospaced;
    }

    /// Attach the variant used to draw drop shadows.
    pub fn set_drop_shadow(&mut self, mut shadow: BitmapFont) -> TextResult<()> {
        if shadow.drop_shadow.is_some() {
            return Err(TextError::NestedDropShadow);
        }
        shadow.is_drop_shadow = true;
        self.drop_shadow = Some(Box::new(shadow));
        Ok(())
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn recompute_metrics(&mut self) {
        let count = self.glyphs.len();
        if count == 0 {
            self.mean_glyph_width = 0.0;
            self.max_glyph_width = 0.0;
            self.max_glyph_height = 0.0;
            return;
        }

        let mut total = 0.0;
        let mut max_width: f32 = 0.0;
        let mut max_height: f32 = 0.0;
        for glyph in self.glyphs.values() {
            total += glyph.rect.width;
            max_width = max_width.max(glyph.rect.width);
            max_height = max_height.max(glyph.rect.height);
        }
        self.mean_glyph_width = total / count as f32;
        self.max_glyph_width = max_width;
        self.max_glyph_height = max_height;
    }
}

impl GlyphProvider for BitmapFont {
    fn glyph(&self, c: char) -> Option<&Glyph> {
        self.glyphs.get(&c)
    }

    fn page_size(&self, page: usize) -> Option<Size<f32>> {
        self.pages.get(page).copied()
    }

    fn kerning_pair(&self, left: char, right: char) -> f32 {
        self.kerning.get(&(left, right)).copied().unwrap_or(0.0)
    }

    fn mean_glyph_width(&self) -> f32 {
        self.mean_glyph_width
    }

    fn max_glyph_width(&self) -> f32 {
        self.max_glyph_width
    }

    fn max_glyph_height(&self) -> f32 {
        self.max_glyph_height
    }

    fn naturally_monospaced(&self) -> bool {
        self.monospaced
    }

    fn is_drop_shadow(&self) -> bool {
        self.is_drop_shadow
    }

    fn drop_shadow(&self) -> Option<&dyn GlyphProvider> {
        self.drop_shadow
            .as_deref()
            .map(|shadow| shadow as &dyn GlyphProvider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_layout() {
        let font = BitmapFont::grid("abcde", Size::new(8.0, 10.0), 2).unwrap();
        assert_eq!(font.page_size(0), Some(Size::new(16.0, 30.0)));
        assert_eq!(
            font.glyph('d').map(|g| g.rect),
            Some(Rect::new(8.0, 10.0, 8.0, 10.0))
        );
        assert_eq!(font.glyph_count(), 5);
        assert_eq!(font.max_glyph_height(), 10.0);
    }

    #[test]
    fn test_grid_rejects_zero_columns() {
        assert!(matches!(
            BitmapFont::grid("a", Size::new(8.0, 8.0), 0),
            Err(TextError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_glyph_on_missing_page() {
        let mut font = BitmapFont::new();
        let err = font
            .add_glyph('a', Glyph::new(2, Rect::new(0.0, 0.0, 4.0, 4.0), 0.0))
            .unwrap_err();
        assert_eq!(
            err,
            TextError::PageOutOfRange {
                page: 2,
                page_count: 0
            }
        );
    }

    #[test]
    fn test_invalid_page_size() {
        let mut font = BitmapFont::new();
        assert!(font.add_page(Size::new(0.0, 10.0)).is_err());
        assert!(font.add_page(Size::new(f32::INFINITY, 10.0)).is_err());
        assert_eq!(font.add_page(Size::new(64.0, 64.0)), Ok(0));
    }

    #[test]
    fn test_metrics_follow_glyphs() {
        let mut font = BitmapFont::new();
        font.add_page(Size::new(64.0, 64.0)).unwrap();
        font.add_glyph('i', Glyph::new(0, Rect::new(0.0, 0.0, 4.0, 12.0), 0.0))
            .unwrap();
        font.add_glyph('m', Glyph::new(0, Rect::new(4.0, 0.0, 12.0, 10.0), 2.0))
            .unwrap();
        assert_eq!(font.mean_glyph_width(), 8.0);
        assert_eq!(font.max_glyph_width(), 12.0);
        assert_eq!(font.max_glyph_height(), 12.0);
    }

    #[test]
    fn test_kerning_uses_following_char() {
        let mut font = BitmapFont::grid("AVW", Size::new(10.0, 10.0), 3).unwrap();
        font.set_kerning_pair('A', 'V', -2.0);
        font.set_kerning_pair('V', 'W', -1.0);

        let word = ['A', 'V'];
        assert_eq!(font.kerning_correction(0, &word, None), -2.0);
        assert_eq!(font.kerning_correction(1, &word, None), 0.0);
        assert_eq!(font.kerning_correction(1, &word, Some('W')), -1.0);
        assert_eq!(font.kerning_correction(5, &word, None), 0.0);
    }

    #[test]
    fn test_monospace_width() {
        let font = BitmapFont::grid("ab", Size::new(10.0, 10.0), 2).unwrap();
        let options = RenderOptions::default();
        assert!(!font.is_monospacing_active(&options));
        assert!(font.is_monospacing_active(&options.monospacing(Monospacing::Yes)));
        // ceil(1 + 1.05 * 10)
        assert_eq!(font.monospace_width(&options), 12.0);
    }

    #[test]
    fn test_drop_shadow_variant() {
        let mut font = BitmapFont::grid("a", Size::new(10.0, 10.0), 1).unwrap();
        assert!(font.drop_shadow().is_none());

        let shadow = BitmapFont::grid("a", Size::new(12.0, 12.0), 1).unwrap();
        font.set_drop_shadow(shadow.clone()).unwrap();
        let variant = font.drop_shadow().unwrap();
        assert!(variant.is_drop_shadow());
        assert!(!font.is_drop_shadow());

        let mut nested = shadow;
        nested.set_drop_shadow(BitmapFont::new()).unwrap();
        assert_eq!(
            font.set_drop_shadow(nested),
            Err(TextError::NestedDropShadow)
        );
    }
}
