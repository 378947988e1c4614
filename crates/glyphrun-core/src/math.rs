//! Math types.
//!
//! Layout math runs on the SIMD-friendly [`glam`] types re-exported from
//! [`fast`]; anything that ends up in a vertex buffer is converted to one of
//! the `#[repr(C)]` types in [`packed`] first.
//!
//! ```
//! use glyphrun_core::math::{PackedVec3, Vec3};
//!
//! let origin = Vec3::new(12.0, -4.0, 0.0);
//! let packed: PackedVec3 = origin.into();
//! assert_eq!(bytemuck::bytes_of(&packed).len(), 12);
//! ```
//!
//! [`glam`]: https://docs.rs/glam

/// SIMD-accelerated vector and matrix types from `glam`.
pub mod fast {
    pub use glam::*;
}

/// Packed vector types for GPU buffer uploads.
///
/// These are [`Pod`](bytemuck::Pod) and can be cast straight to bytes with
/// [`bytemuck::cast_slice`]. Their layout matches the vertex attribute
/// offsets the renderer advertises to the backend.
pub mod packed {
    use bytemuck::{Pod, Zeroable};

    /// Two packed `f32`s (8 bytes).
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec2 {
        pub x: f32,
        pub y: f32,
    }

    /// Three packed `f32`s (12 bytes, no padding).
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec3 {
        pub x: f32,
        pub y: f32,
        pub z: f32,
    }

    /// Four packed `f32`s (16 bytes).
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec4 {
        pub x: f32,
        pub y: f32,
        pub z: f32,
        pub w: f32,
    }

    impl Vec2 {
        pub const fn new(x: f32, y: f32) -> Self {
            Self { x, y }
        }
    }

    impl Vec3 {
        pub const fn new(x: f32, y: f32, z: f32) -> Self {
            Self { x, y, z }
        }
    }

    impl Vec4 {
        pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
            Self { x, y, z, w }
        }
    }

    impl From<glam::Vec2> for Vec2 {
        fn from(v: glam::Vec2) -> Self {
            Self::new(v.x, v.y)
        }
    }

    impl From<glam::Vec3> for Vec3 {
        fn from(v: glam::Vec3) -> Self {
            Self::new(v.x, v.y, v.z)
        }
    }

    impl From<glam::Vec4> for Vec4 {
        fn from(v: glam::Vec4) -> Self {
            Self::new(v.x, v.y, v.z, v.w)
        }
    }

    impl From<[f32; 4]> for Vec4 {
        fn from(v: [f32; 4]) -> Self {
            Self::new(v[0], v[1], v[2], v[3])
        }
    }

    impl From<Vec3> for glam::Vec3 {
        fn from(v: Vec3) -> Self {
            glam::Vec3::new(v.x, v.y, v.z)
        }
    }

    impl From<Vec2> for glam::Vec2 {
        fn from(v: Vec2) -> Self {
            glam::Vec2::new(v.x, v.y)
        }
    }
}

pub use fast::*;
pub use packed::{Vec2 as PackedVec2, Vec3 as PackedVec3, Vec4 as PackedVec4};
