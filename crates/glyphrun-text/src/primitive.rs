//! The drawing primitive: print and measure entry points over one font.

use std::sync::Arc;

use glyphrun_core::geometry::{Rect, Size};
use glyphrun_core::math::Vec3;
use glyphrun_core::profiling::profile_function;
use glyphrun_render::{Color, GlyphVertex, VERTICES_PER_GLYPH};

use crate::font::GlyphProvider;
use crate::glyph::{GlyphBuffers, GlyphRenderer};
use crate::layout::LineComposer;
use crate::measure::{crumble_long_words, measure_nodes};
use crate::node::TextNodeList;
use crate::options::{RenderOptions, TextAlign};
use crate::viewport::{ViewportTransform, lock_to_pixel};

/// Tokenized and measured text, ready to be printed or measured any number
/// of times.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedText {
    nodes: TextNodeList,
    max_size: Size<f32>,
    align: TextAlign,
}

impl ProcessedText {
    /// Tokenize and measure `text`. `max_size` is in layout (viewport)
    /// pixels; a width of `f32::INFINITY` never wraps and a height of zero
    /// or less is unbounded.
    pub fn new(
        font: &dyn GlyphProvider,
        options: &RenderOptions,
        text: &str,
        max_size: Size<f32>,
        align: TextAlign,
    ) -> Self {
        profile_function!();
        let mut nodes = TextNodeList::tokenize(text);
        measure_nodes(&mut nodes, font, options);
        let crumbled = crumble_long_words(&mut nodes, max_size.width, font, options);

        tracing::debug!(
            "Processed text: {} nodes ({} words crumbled), max size {}x{}",
            nodes.len(),
            crumbled,
            max_size.width,
            max_size.height
        );

        Self {
            nodes,
            max_size,
            align,
        }
    }

    pub fn nodes(&self) -> &TextNodeList {
        &self.nodes
    }

    pub fn max_size(&self) -> Size<f32> {
        self.max_size
    }

    pub fn align(&self) -> TextAlign {
        self.align
    }

    /// Number of characters, used to reserve vertex space before printing.
    pub fn estimated_length(&self) -> usize {
        self.nodes.char_count()
    }
}

/// Lays out text with one font and collects the resulting glyph vertices.
///
/// Vertices accumulate across print calls until [`reset`](Self::reset).
/// Sizes returned by print and measure calls are in caller units: when the
/// options map a virtual rectangle onto the viewport, sizes are mapped back.
///
/// ```
/// use std::sync::Arc;
/// use glyphrun_core::geometry::Size;
/// use glyphrun_core::math::Vec3;
/// use glyphrun_text::{BitmapFont, DrawingPrimitive, RenderOptions, TextAlign};
///
/// let font = BitmapFont::grid("Helo Wrd", Size::new(10.0, 16.0), 8)?;
/// let mut primitive = DrawingPrimitive::new(Arc::new(font), RenderOptions::default());
///
/// let measured = primitive.measure("Hello World", TextAlign::Left);
/// let printed = primitive.print("Hello World", Vec3::new(20.0, 200.0, 0.0), TextAlign::Left, None);
/// assert_eq!(measured, printed);
/// assert_eq!(primitive.vertices().len(), 10 * 6);
/// # Ok::<(), glyphrun_text::TextError>(())
/// ```
pub struct DrawingPrimitive {
    font: Arc<dyn GlyphProvider>,
    options: RenderOptions,
    viewport_size: Option<Size<f32>>,
    last_size: Size<f32>,
    buffers: GlyphBuffers,
}

impl DrawingPrimitive {
    pub fn new(font: Arc<dyn GlyphProvider>, options: RenderOptions) -> Self {
        Self {
            font,
            options,
            viewport_size: None,
            last_size: Size::default(),
            buffers: GlyphBuffers::default(),
        }
    }

    pub fn font(&self) -> &dyn GlyphProvider {
        &*self.font
    }

    /// Address of the font, shared by primitives built from the same `Arc`.
    /// Only unique while the font is alive.
    pub(crate) fn font_id(&self) -> usize {
        Arc::as_ptr(&self.font) as *const () as usize
    }

    pub(crate) fn font_handle(&self) -> &Arc<dyn GlyphProvider> {
        &self.font
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    /// Current viewport size in pixels, used by
    /// [`RenderOptions::transform_to_viewport`].
    pub fn set_viewport_size(&mut self, size: Size<f32>) {
        if size.width <= 0.0 || size.height <= 0.0 {
            tracing::warn!(
                "Viewport transform disabled while the viewport is {}x{}",
                size.width,
                size.height
            );
        }
        self.viewport_size = Some(size);
    }

    pub fn viewport_size(&self) -> Option<Size<f32>> {
        self.viewport_size
    }

    fn viewport_transform(&self) -> Option<ViewportTransform> {
        let virtual_rect = self.options.transform_to_viewport?;
        ViewportTransform::new(virtual_rect, self.viewport_size?)
    }

    /// `max_size` mapped into the pixels layout works in.
    pub fn layout_bounds(&self, max_size: Size<f32>) -> Size<f32> {
        let Some(transform) = self.viewport_transform() else {
            return max_size;
        };
        Size::new(
            transform.width_to_viewport(max_size.width),
            if max_size.has_height_bound() {
                transform.height_to_viewport(max_size.height)
            } else {
                max_size.height
            },
        )
    }

    fn origin_to_viewport(&self, position: Vec3) -> Vec3 {
        let mut origin = position.truncate();
        if let Some(transform) = self.viewport_transform() {
            origin = transform.position_to_viewport(origin);
        }
        if self.options.lock_to_pixel {
            origin = lock_to_pixel(origin, self.options.lock_to_pixel_ratio);
        }
        origin.extend(position.z)
    }

    fn size_from_viewport(&self, size: Size<f32>) -> Size<f32> {
        match self.viewport_transform() {
            Some(transform) => transform.size_from_viewport(size),
            None => size,
        }
    }

    /// Tokenize and measure `text` with the current font and options.
    /// `max_size` is in caller units.
    pub fn process_text(&self, text: &str, max_size: Size<f32>, align: TextAlign) -> ProcessedText {
        ProcessedText::new(
            &*self.font,
            &self.options,
            text,
            self.layout_bounds(max_size),
            align,
        )
    }

    /// Print `text` without a width limit. Lines break only at line breaks.
    ///
    /// `clip` is in output space; glyphs are trimmed to it.
    pub fn print(
        &mut self,
        text: &str,
        position: Vec3,
        align: TextAlign,
        clip: Option<Rect<f32>>,
    ) -> Size<f32> {
        self.print_colored(text, position, align, self.options.color, clip)
    }

    /// Like [`print`](Self::print), in `color` for this call only.
    pub fn print_colored(
        &mut self,
        text: &str,
        position: Vec3,
        align: TextAlign,
        color: Color,
        clip: Option<Rect<f32>>,
    ) -> Size<f32> {
        let processed = self.process_text(text, Size::UNBOUNDED, align);
        self.print_processed_colored(&processed, position, color, clip)
    }

    /// Print `text` wrapped to `max_size`.
    pub fn print_bounded(
        &mut self,
        text: &str,
        position: Vec3,
        max_size: Size<f32>,
        align: TextAlign,
        clip: Option<Rect<f32>>,
    ) -> Size<f32> {
        let processed = self.process_text(text, max_size, align);
        self.print_processed(&processed, position, clip)
    }

    pub fn print_processed(
        &mut self,
        processed: &ProcessedText,
        position: Vec3,
        clip: Option<Rect<f32>>,
    ) -> Size<f32> {
        self.print_processed_colored(processed, position, self.options.color, clip)
    }

    pub fn print_processed_colored(
        &mut self,
        processed: &ProcessedText,
        position: Vec3,
        color: Color,
        clip: Option<Rect<f32>>,
    ) -> Size<f32> {
        profile_function!();
        self.buffers
            .main
            .reserve(VERTICES_PER_GLYPH * processed.estimated_length());

        let origin = self.origin_to_viewport(position);
        let font = &*self.font;
        let renderer = GlyphRenderer::new(font, &self.options, color, origin, clip);
        let buffers = &mut self.buffers;
        let nodes = processed.nodes();
        let composition = LineComposer::new(font, &self.options).compose(
            nodes,
            processed.max_size(),
            processed.align(),
            |placement| renderer.render_placement(nodes, &placement, buffers),
        );

        self.last_size = self.size_from_viewport(composition.size);
        self.last_size
    }

    /// Size `text` would take when printed without a width limit.
    pub fn measure(&mut self, text: &str, align: TextAlign) -> Size<f32> {
        self.measure_bounded(text, Size::UNBOUNDED, align)
    }

    /// Size `text` would take when wrapped to `max_width`.
    pub fn measure_width(&mut self, text: &str, max_width: f32, align: TextAlign) -> Size<f32> {
        self.measure_bounded(text, Size::new(max_width, -1.0), align)
    }

    pub fn measure_bounded(&mut self, text: &str, max_size: Size<f32>, align: TextAlign) -> Size<f32> {
        let processed = self.process_text(text, max_size, align);
        self.measure_processed(&processed)
    }

    pub fn measure_processed(&mut self, processed: &ProcessedText) -> Size<f32> {
        profile_function!();
        let composition = LineComposer::new(&*self.font, &self.options).compose(
            processed.nodes(),
            processed.max_size(),
            processed.align(),
            |_| {},
        );
        self.last_size = self.size_from_viewport(composition.size);
        self.last_size
    }

    /// Size reported by the most recent print or measure call.
    pub fn last_size(&self) -> Size<f32> {
        self.last_size
    }

    pub fn vertices(&self) -> &[GlyphVertex] {
        &self.buffers.main
    }

    pub fn shadow_vertices(&self) -> &[GlyphVertex] {
        &self.buffers.shadow
    }

    /// Drop all collected vertices, keeping their capacity.
    pub fn reset(&mut self) {
        self.buffers.main.clear();
        self.buffers.shadow.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BitmapFont;

    fn primitive() -> DrawingPrimitive {
        let font = BitmapFont::grid("abcdefghij", Size::new(10.0, 12.0), 10).unwrap();
        let options = RenderOptions::default()
            .character_spacing(0.0)
            .word_spacing(0.5);
        DrawingPrimitive::new(Arc::new(font), options)
    }

    #[test]
    fn test_print_reports_size() {
        let mut primitive = primitive();
        let size = primitive.print("ab cd", Vec3::ZERO, TextAlign::Left, None);
        assert_eq!(size, Size::new(45.0, 12.0));
        assert_eq!(primitive.last_size(), size);
        assert_eq!(primitive.vertices().len(), 4 * 6);
    }

    #[test]
    fn test_measure_emits_nothing() {
        let mut primitive = primitive();
        let size = primitive.measure_width("ab cd ef", 50.0, TextAlign::Left);
        assert_eq!(size, Size::new(45.0, 24.0));
        assert!(primitive.vertices().is_empty());
    }

    #[test]
    fn test_colored_print_leaves_options() {
        let mut primitive = primitive();
        primitive.print_colored("a", Vec3::ZERO, TextAlign::Left, Color::RED, None);
        primitive.print("b", Vec3::ZERO, TextAlign::Left, None);
        assert_eq!(primitive.vertices()[0].color, Color::RED.to_packed());
        assert_eq!(primitive.vertices()[6].color, Color::WHITE.to_packed());
        assert_eq!(primitive.options().color, Color::WHITE);
    }

    #[test]
    fn test_reset_clears_vertices() {
        let mut primitive = primitive();
        primitive.print("abc", Vec3::ZERO, TextAlign::Left, None);
        primitive.reset();
        assert!(primitive.vertices().is_empty());
        assert!(primitive.shadow_vertices().is_empty());
    }

    #[test]
    fn test_layout_bounds_follow_viewport() {
        let mut primitive = primitive();
        primitive.set_options(
            primitive
                .options()
                .transform_to_viewport(Rect::new(0.0, 0.0, 100.0, 100.0)),
        );
        assert_eq!(
            primitive.layout_bounds(Size::new(50.0, -1.0)),
            Size::new(50.0, -1.0)
        );

        primitive.set_viewport_size(Size::new(200.0, 400.0));
        assert_eq!(
            primitive.layout_bounds(Size::new(50.0, 10.0)),
            Size::new(100.0, 40.0)
        );
        assert_eq!(
            primitive.layout_bounds(Size::new(50.0, -1.0)),
            Size::new(100.0, -1.0)
        );
    }

    #[test]
    fn test_zero_viewport_disables_transform() {
        let mut primitive = primitive();
        primitive.set_options(
            primitive
                .options()
                .transform_to_viewport(Rect::new(0.0, 0.0, 100.0, 100.0)),
        );
        primitive.set_viewport_size(Size::new(0.0, 400.0));
        assert_eq!(primitive.viewport_size(), Some(Size::new(0.0, 400.0)));
        assert_eq!(
            primitive.layout_bounds(Size::new(50.0, 10.0)),
            Size::new(50.0, 10.0)
        );
        assert_eq!(
            primitive.measure("ab cd", TextAlign::Left),
            Size::new(45.0, 12.0)
        );
    }

    #[test]
    fn test_pixel_lock_snaps_origin() {
        let mut primitive = primitive();
        primitive.set_options(primitive.options().lock_to_pixel(1.0));
        primitive.print("a", Vec3::new(10.3, 20.6, 0.0), TextAlign::Left, None);
        let top_left = primitive.vertices()[0].position();
        assert_eq!(top_left, Vec3::new(10.0, 21.0, 0.0));
    }
}
