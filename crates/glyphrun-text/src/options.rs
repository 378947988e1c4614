//! Render options read by every layout call.

use glyphrun_core::geometry::Rect;
use glyphrun_core::math::Vec2;
use glyphrun_render::Color;

/// Horizontal alignment of each laid-out line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
    /// Stretch or contract every line except the last to the maximum width.
    Justify,
}

/// Whether glyph advances come from the glyph boxes or a fixed cell width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Monospacing {
    /// Follow the font: monospaced fonts use the fixed width.
    #[default]
    Natural,
    Yes,
    No,
}

/// Drop shadow settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropShadow {
    pub active: bool,
    /// Offset as a fraction of the font's mean glyph width.
    pub offset: Vec2,
    pub color: Color,
}

impl Default for DropShadow {
    fn default() -> Self {
        Self {
            active: false,
            offset: Vec2::new(0.16, 0.16),
            color: Color::rgba(0.0, 0.0, 0.0, 0.5),
        }
    }
}

impl DropShadow {
    /// An active shadow with the default offset and color.
    pub fn enabled() -> Self {
        Self {
            active: true,
            ..Self::default()
        }
    }
}

/// Tuning constants for justified lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JustifyOptions {
    /// How strongly contraction is penalised against expansion.
    pub contraction_penalty: f32,
    /// Largest expansion as a fraction of the target width.
    pub cap_expand: f32,
    /// Largest contraction as a fraction of the target width.
    pub cap_contract: f32,
    /// Share of expansion pixels given to character gaps, relative to spaces.
    pub character_weight_for_expand: f32,
    /// Share of contraction pixels taken from character gaps.
    pub character_weight_for_contract: f32,
}

impl Default for JustifyOptions {
    fn default() -> Self {
        Self {
            contraction_penalty: 2.0,
            cap_expand: 0.5,
            cap_contract: 0.1,
            character_weight_for_expand: 0.5,
            character_weight_for_contract: 0.2,
        }
    }
}

/// Options for a drawing primitive.
///
/// A plain value: replace it wholesale with
/// [`DrawingPrimitive::set_options`](crate::DrawingPrimitive::set_options).
///
/// ```
/// use glyphrun_text::{DropShadow, RenderOptions};
/// use glyphrun_render::Color;
///
/// let options = RenderOptions::default()
///     .color(Color::from_hex(0xEEDDCC))
///     .word_wrap(false)
///     .drop_shadow(DropShadow::enabled())
///     .lock_to_pixel(0.5);
/// assert!(!options.word_wrap);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub color: Color,
    /// Multiplier on the font's maximum glyph height.
    pub line_spacing: f32,
    /// Space width as a fraction of the mean glyph width.
    pub word_spacing: f32,
    /// Extra advance per character as a fraction of the mean glyph width.
    pub character_spacing: f32,
    pub word_wrap: bool,
    pub monospacing: Monospacing,
    pub drop_shadow: DropShadow,
    pub justify: JustifyOptions,
    pub lock_to_pixel: bool,
    /// Blend between the exact (0.0) and rounded (1.0) print origin.
    pub lock_to_pixel_ratio: f32,
    /// Virtual coordinate rectangle mapped onto the current viewport.
    pub transform_to_viewport: Option<Rect<f32>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            line_spacing: 1.0,
            word_spacing: 0.9,
            character_spacing: 0.05,
            word_wrap: true,
            monospacing: Monospacing::Natural,
            drop_shadow: DropShadow::default(),
            justify: JustifyOptions::default(),
            lock_to_pixel: false,
            lock_to_pixel_ratio: 1.0,
            transform_to_viewport: None,
        }
    }
}

impl RenderOptions {
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn line_spacing(mut self, factor: f32) -> Self {
        self.line_spacing = factor;
        self
    }

    pub fn word_spacing(mut self, factor: f32) -> Self {
        self.word_spacing = factor;
        self
    }

    pub fn character_spacing(mut self, factor: f32) -> Self {
        self.character_spacing = factor;
        self
    }

    pub fn word_wrap(mut self, wrap: bool) -> Self {
        self.word_wrap = wrap;
        self
    }

    pub fn monospacing(mut self, monospacing: Monospacing) -> Self {
        self.monospacing = monospacing;
        self
    }

    pub fn drop_shadow(mut self, shadow: DropShadow) -> Self {
        self.drop_shadow = shadow;
        self
    }

    pub fn justify(mut self, justify: JustifyOptions) -> Self {
        self.justify = justify;
        self
    }

    /// Enable pixel locking with the given blend ratio (clamped to `0..=1`).
    pub fn lock_to_pixel(mut self, ratio: f32) -> Self {
        self.lock_to_pixel = true;
        self.lock_to_pixel_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Lay text out in the coordinates of `virtual_rect` instead of pixels.
    pub fn transform_to_viewport(mut self, virtual_rect: Rect<f32>) -> Self {
        self.transform_to_viewport = Some(virtual_rect);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.color, Color::WHITE);
        assert_eq!(options.word_spacing, 0.9);
        assert_eq!(options.character_spacing, 0.05);
        assert!(options.word_wrap);
        assert!(!options.drop_shadow.active);
        assert_eq!(options.drop_shadow.offset, Vec2::new(0.16, 0.16));
        assert_eq!(options.justify.contraction_penalty, 2.0);
        assert!(!options.lock_to_pixel);
        assert_eq!(options.lock_to_pixel_ratio, 1.0);
    }

    #[test]
    fn test_lock_ratio_is_clamped() {
        assert_eq!(RenderOptions::default().lock_to_pixel(4.0).lock_to_pixel_ratio, 1.0);
        assert_eq!(RenderOptions::default().lock_to_pixel(-1.0).lock_to_pixel_ratio, 0.0);
    }
}
