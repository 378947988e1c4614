//! Trait abstracting the GPU side of text rendering.
//!
//! The `VertexBackend` trait is everything the renderer needs from a device:
//! somewhere to put bytes and a way to describe how they are interleaved.

use crate::gpu_types::{GpuBuffer, VertexLayout};

/// Trait abstracting vertex buffer creation, upload and attribute wiring.
///
/// # Borrow Checking Pattern
///
/// Methods take `&self` and return owned handles. Implementations keep their
/// mutable state behind interior mutability, so one backend can be shared by
/// several vertex arrays (via `Arc`) without lifetimes leaking into them.
///
/// # Example
///
/// ```rust,no_run
/// use glyphrun_test_utils::{GpuBuffer, VertexBackend};
///
/// fn upload(backend: &dyn VertexBackend, bytes: &[u8]) -> GpuBuffer {
///     let buffer = backend.create_buffer(bytes.len() as u64);
///     backend.write_buffer(&buffer, 0, bytes);
///     buffer
/// }
/// ```
pub trait VertexBackend: Send + Sync {
    /// Allocate a vertex buffer of `size` bytes.
    ///
    /// Any previous buffer the caller held is simply dropped by the caller;
    /// backends that need explicit deletion do it in their own `Drop`.
    fn create_buffer(&self, size: u64) -> GpuBuffer;

    /// Write `data` into `buffer` starting at `offset` bytes.
    fn write_buffer(&self, buffer: &GpuBuffer, offset: u64, data: &[u8]);

    /// Bind `buffer` and enable the attributes described by `layout`.
    fn bind_vertex_layout(&self, buffer: &GpuBuffer, layout: &VertexLayout);

    /// Disable the attributes described by `layout`.
    fn unbind_vertex_layout(&self, layout: &VertexLayout);
}
