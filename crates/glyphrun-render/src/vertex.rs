//! The interleaved vertex emitted for every glyph corner.

use glyphrun_core::math::{PackedVec2, PackedVec3, PackedVec4, Vec2, Vec3};
use glyphrun_test_utils::{VertexAttribute, VertexFormat, VertexLayout};

use crate::Color;

/// Two triangles per glyph quad.
pub const VERTICES_PER_GLYPH: usize = 6;

/// A textured, colored text vertex.
///
/// # Memory Layout
///
/// ```text
/// Offset | Field     | Size
/// -------|-----------|------
/// 0      | position  | 12 bytes (3 × f32)
/// 12     | tex_coord | 8 bytes (2 × f32)
/// 20     | color     | 16 bytes (4 × f32)
/// Total: 36 bytes
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlyphVertex {
    pub position: PackedVec3,
    pub tex_coord: PackedVec2,
    pub color: PackedVec4,
}

static_assertions::assert_eq_size!(GlyphVertex, [f32; 9]);

impl GlyphVertex {
    pub fn new(position: Vec3, tex_coord: Vec2, color: Color) -> Self {
        Self {
            position: position.into(),
            tex_coord: tex_coord.into(),
            color: color.to_packed(),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position.into()
    }

    pub fn tex_coord(&self) -> Vec2 {
        self.tex_coord.into()
    }
}

/// Attribute wiring for [`GlyphVertex`]: position, texture coordinate, color.
pub const GLYPH_VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute {
        location: 0,
        offset: 0,
        components: 3,
        format: VertexFormat::Float32,
    },
    VertexAttribute {
        location: 1,
        offset: 12,
        components: 2,
        format: VertexFormat::Float32,
    },
    VertexAttribute {
        location: 2,
        offset: 20,
        components: 4,
        format: VertexFormat::Float32,
    },
];

pub const GLYPH_VERTEX_LAYOUT: VertexLayout = VertexLayout {
    stride: std::mem::size_of::<GlyphVertex>() as u32,
    attributes: &GLYPH_VERTEX_ATTRIBUTES,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_struct() {
        assert_eq!(GLYPH_VERTEX_LAYOUT.stride, 36);
        assert!(GLYPH_VERTEX_LAYOUT.is_consistent());
        assert_eq!(std::mem::offset_of!(GlyphVertex, tex_coord), 12);
        assert_eq!(std::mem::offset_of!(GlyphVertex, color), 20);
    }

    #[test]
    fn test_vertex_bytes() {
        let vertex = GlyphVertex::new(Vec3::new(1.0, 2.0, 0.0), Vec2::new(0.5, 0.25), Color::RED);
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&vertex));
        assert_eq!(floats, &[1.0, 2.0, 0.0, 0.5, 0.25, 1.0, 0.0, 0.0, 1.0]);
    }
}
