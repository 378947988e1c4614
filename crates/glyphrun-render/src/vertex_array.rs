//! CPU staging array for glyph vertices.
//!
//! ```ignore
//! let mut array = VertexArray::new();
//! array.add_vertices(drawing.vertices());
//! array.load(&backend); // reallocates only when the data outgrew the buffer
//! array.bind(&backend);
//! // backend draws array.vertex_count() vertices
//! array.reset();        // next frame
//! ```

use glyphrun_core::profiling::profile_function;
use glyphrun_core::math::{Vec2, Vec3};
use glyphrun_test_utils::{GpuBuffer, VertexBackend};

use crate::{Color, GLYPH_VERTEX_LAYOUT, GlyphVertex};

/// Number of vertices a fresh array can hold before growing.
pub const INITIAL_VERTEX_CAPACITY: usize = 1000;

/// Staging array for [`GlyphVertex`] data plus the GPU buffer it uploads to.
///
/// Capacity doubles until a request fits. The GPU buffer is only recreated
/// when the staged bytes outgrow it; otherwise `load` overwrites it from
/// offset 0.
pub struct VertexArray {
    vertices: Vec<GlyphVertex>,
    capacity: usize,
    buffer: Option<GpuBuffer>,
    /// Bytes allocated for `buffer` on the backend.
    buffer_capacity: u64,
}

impl VertexArray {
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(INITIAL_VERTEX_CAPACITY),
            capacity: INITIAL_VERTEX_CAPACITY,
            buffer: None,
            buffer_capacity: 0,
        }
    }

    fn alloc_space(&mut self, count: usize) {
        if self.capacity < count {
            while self.capacity < count {
                self.capacity *= 2;
            }
            self.vertices.reserve_exact(self.capacity - self.vertices.len());
        }
    }

    /// Append a batch of vertices.
    pub fn add_vertices(&mut self, vertices: &[GlyphVertex]) {
        if vertices.is_empty() {
            return;
        }
        self.alloc_space(self.vertices.len() + vertices.len());
        self.vertices.extend_from_slice(vertices);
    }

    /// Append a single vertex.
    pub fn add_vertex(&mut self, position: Vec3, tex_coord: Vec2, color: Color) {
        self.alloc_space(self.vertices.len() + 1);
        self.vertices.push(GlyphVertex::new(position, tex_coord, color));
    }

    /// Upload the staged vertices. Does nothing while the array is empty.
    pub fn load(&mut self, backend: &dyn VertexBackend) {
        profile_function!();
        if self.vertices.is_empty() {
            return;
        }

        let bytes: &[u8] = bytemuck::cast_slice(&self.vertices);
        let needed = bytes.len() as u64;

        let buffer = match self.buffer.take() {
            Some(buffer) if needed <= self.buffer_capacity => buffer,
            _ => {
                tracing::debug!(
                    "Allocating text vertex buffer: {} bytes ({} vertices)",
                    needed,
                    self.vertices.len()
                );
                self.buffer_capacity = needed;
                backend.create_buffer(needed)
            }
        };

        backend.bind_vertex_layout(&buffer, &GLYPH_VERTEX_LAYOUT);
        backend.write_buffer(&buffer, 0, bytes);
        self.buffer = Some(buffer);
    }

    /// Bind the uploaded buffer for drawing. Does nothing before the first
    /// successful `load`.
    pub fn bind(&self, backend: &dyn VertexBackend) {
        if let Some(buffer) = &self.buffer {
            backend.bind_vertex_layout(buffer, &GLYPH_VERTEX_LAYOUT);
        }
    }

    pub fn unbind(&self, backend: &dyn VertexBackend) {
        backend.unbind_vertex_layout(&GLYPH_VERTEX_LAYOUT);
    }

    /// Forget the staged vertices. Capacity and the GPU buffer are kept.
    pub fn reset(&mut self) {
        self.vertices.clear();
    }

    pub fn vertices(&self) -> &[GlyphVertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of vertices that fit before the next growth step.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes currently allocated on the backend.
    pub fn gpu_capacity(&self) -> u64 {
        self.buffer_capacity
    }

    pub fn buffer(&self) -> Option<&GpuBuffer> {
        self.buffer.as_ref()
    }
}

impl Default for VertexArray {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_doubles() {
        let mut array = VertexArray::new();
        let batch = vec![GlyphVertex::default(); 1500];
        array.add_vertices(&batch);
        assert_eq!(array.capacity(), 2000);
        assert_eq!(array.vertex_count(), 1500);

        array.add_vertices(&batch);
        assert_eq!(array.capacity(), 4000);
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let mut array = VertexArray::new();
        array.add_vertices(&vec![GlyphVertex::default(); 2500]);
        array.reset();
        assert_eq!(array.vertex_count(), 0);
        assert_eq!(array.capacity(), 4000);
    }

    #[test]
    fn test_add_vertex() {
        let mut array = VertexArray::new();
        array.add_vertex(Vec3::new(1.0, 2.0, 3.0), Vec2::new(0.0, 1.0), Color::WHITE);
        assert_eq!(array.vertices()[0].position(), Vec3::new(1.0, 2.0, 3.0));
    }
}
