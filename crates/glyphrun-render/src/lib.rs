//! Glyphrun Render - the GPU-facing half of text rendering.
//!
//! - [`Color`]: linear RGBA color used for vertex colors
//! - [`GlyphVertex`]: the interleaved vertex the layout engine emits
//! - [`VertexArray`]: CPU staging array that uploads through a
//!   [`VertexBackend`]
//!
//! Device access is abstracted by [`VertexBackend`] (re-exported from
//! `glyphrun-test-utils`), so nothing in here needs a GPU.

mod color;
mod vertex;
mod vertex_array;

pub use color::Color;
pub use vertex::{GLYPH_VERTEX_ATTRIBUTES, GLYPH_VERTEX_LAYOUT, GlyphVertex, VERTICES_PER_GLYPH};
pub use vertex_array::{INITIAL_VERTEX_CAPACITY, VertexArray};

pub use glyphrun_test_utils::{GpuBuffer, VertexAttribute, VertexBackend, VertexFormat, VertexLayout};
