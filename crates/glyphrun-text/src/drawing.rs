//! Several drawing primitives sharing one vertex buffer.

use glyphrun_core::profiling::profile_function;
use glyphrun_render::{VertexArray, VertexBackend};

use crate::primitive::DrawingPrimitive;

/// Which vertex list of a primitive a range came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawLayer {
    Shadow,
    Main,
}

/// A span of the shared vertex buffer that one draw call consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRange {
    /// Index of the primitive in its [`TextDrawing`].
    pub primitive: usize,
    pub layer: DrawLayer,
    pub first_vertex: usize,
    pub vertex_count: usize,
}

/// Collects primitives and packs their vertices into one [`VertexArray`].
///
/// Each primitive contributes its shadow vertices before its main vertices,
/// so shadows draw underneath.
///
/// ```ignore
/// drawing.refresh_buffers();
/// drawing.load(&backend);
/// drawing.draw(&backend, |range| backend.draw(range.first_vertex, range.vertex_count));
/// ```
#[derive(Default)]
pub struct TextDrawing {
    primitives: Vec<DrawingPrimitive>,
    vertex_array: VertexArray,
    draw_ranges: Vec<DrawRange>,
}

impl TextDrawing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive and return its index.
    pub fn push(&mut self, primitive: DrawingPrimitive) -> usize {
        self.primitives.push(primitive);
        self.primitives.len() - 1
    }

    pub fn primitives(&self) -> &[DrawingPrimitive] {
        &self.primitives
    }

    pub fn primitives_mut(&mut self) -> &mut [DrawingPrimitive] {
        &mut self.primitives
    }

    /// Rebuild the vertex array from the primitives' current vertices.
    pub fn refresh_buffers(&mut self) {
        profile_function!();
        self.vertex_array.reset();
        self.draw_ranges.clear();

        for (index, primitive) in self.primitives.iter().enumerate() {
            let layers = [
                (DrawLayer::Shadow, primitive.shadow_vertices()),
                (DrawLayer::Main, primitive.vertices()),
            ];
            for (layer, vertices) in layers {
                if vertices.is_empty() {
                    continue;
                }
                self.draw_ranges.push(DrawRange {
                    primitive: index,
                    layer,
                    first_vertex: self.vertex_array.vertex_count(),
                    vertex_count: vertices.len(),
                });
                self.vertex_array.add_vertices(vertices);
            }
        }

        tracing::trace!(
            "Refreshed text buffers: {} vertices in {} ranges",
            self.vertex_array.vertex_count(),
            self.draw_ranges.len()
        );
    }

    pub fn draw_ranges(&self) -> &[DrawRange] {
        &self.draw_ranges
    }

    pub fn vertex_array(&self) -> &VertexArray {
        &self.vertex_array
    }

    /// Upload the packed vertices.
    pub fn load(&mut self, backend: &dyn VertexBackend) {
        self.vertex_array.load(backend);
    }

    /// Bind the buffer, call `draw` for every range, then unbind.
    pub fn draw(&self, backend: &dyn VertexBackend, mut draw: impl FnMut(&DrawRange)) {
        if self.draw_ranges.is_empty() {
            return;
        }
        self.vertex_array.bind(backend);
        for range in &self.draw_ranges {
            draw(range);
        }
        self.vertex_array.unbind(backend);
    }

    /// Clear every primitive's vertices and the packed array. Primitives
    /// stay registered.
    pub fn reset(&mut self) {
        for primitive in &mut self.primitives {
            primitive.reset();
        }
        self.vertex_array.reset();
        self.draw_ranges.clear();
    }

    /// Remove all primitives.
    pub fn clear(&mut self) {
        self.primitives.clear();
        self.vertex_array.reset();
        self.draw_ranges.clear();
    }
}
