//! Paragraph Layout Example
//!
//! Lays out one paragraph in every alignment, packs the results into a
//! single vertex buffer and draws it against the recording mock backend.
//!
//! ## Usage
//! ```bash
//! RUST_LOG=glyphrun_text=trace cargo run -p glyphrun-text --example paragraph
//! ```

use std::sync::Arc;

use glyphrun_core::geometry::{Rect, Size};
use glyphrun_core::{logging, profiling};
use glyphrun_core::math::Vec3;
use glyphrun_test_utils::MockVertexBackend;
use glyphrun_text::{
    BitmapFont, Color, DrawingPrimitive, DropShadow, ProcessedTextCache, RenderOptions, TextAlign,
    TextDrawing, TextResult,
};

const PARAGRAPH: &str = "Far out in the uncharted backwaters of the unfashionable end of \
the western spiral arm of the Galaxy lies a small unregarded yellow sun.\n\
Orbiting this at a distance of roughly ninety-two million miles is an utterly \
insignificant little blue green planet.";

fn build_font() -> TextResult<BitmapFont> {
    let chars: String = ('!'..='~').collect();
    let mut font = BitmapFont::grid(&chars, Size::new(9.0, 16.0), 16)?;
    font.set_kerning_pair('T', 'o', -1.0);
    font.set_kerning_pair('A', 'V', -2.0);
    font.set_drop_shadow(BitmapFont::grid(&chars, Size::new(11.0, 18.0), 16)?)?;
    Ok(font)
}

fn main() -> TextResult<()> {
    logging::init();

    let font = Arc::new(build_font()?);
    let max_size = Size::new(260.0, -1.0);

    let mut drawing = TextDrawing::new();
    let aligns = [
        TextAlign::Left,
        TextAlign::Right,
        TextAlign::Center,
        TextAlign::Justify,
    ];
    for align in aligns {
        let mut options = RenderOptions::default().color(Color::WHITE);
        if align == TextAlign::Justify {
            options = options.drop_shadow(DropShadow::enabled());
        }
        let mut primitive = DrawingPrimitive::new(font.clone(), options);
        primitive.set_viewport_size(Size::new(1280.0, 720.0));
        drawing.push(primitive);
    }

    let backend = MockVertexBackend::new();
    let mut cache = ProcessedTextCache::new();

    for frame in 0..3 {
        cache.begin_frame();
        drawing.reset();

        for (index, (primitive, align)) in drawing
            .primitives_mut()
            .iter_mut()
            .zip(aligns)
            .enumerate()
        {
            let text = cache.get_or_process(primitive, PARAGRAPH, max_size, align);
            let origin = Vec3::new(20.0 + 300.0 * index as f32, 700.0, 0.0);
            let clip = (align == TextAlign::Center).then(|| Rect::new(300.0, 500.0, 260.0, 120.0));
            let size = primitive.print_processed(&text, origin, clip);
            tracing::info!(frame, ?align, width = size.width, height = size.height, "printed");
        }

        drawing.refresh_buffers();
        drawing.load(&backend);
        drawing.draw(&backend, |range| {
            tracing::debug!(
                primitive = range.primitive,
                layer = ?range.layer,
                first = range.first_vertex,
                count = range.vertex_count,
                "draw"
            );
        });
        profiling::new_frame();
    }

    tracing::info!(
        buffers = backend.count_buffer_creates(),
        writes = backend.count_buffer_writes(),
        bytes = backend.bytes_written(),
        "backend"
    );
    tracing::info!("{}", cache.stats_string());
    Ok(())
}
