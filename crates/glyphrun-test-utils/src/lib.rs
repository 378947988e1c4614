//! Backend contract and test utilities for glyphrun.
//!
//! The layout engine never talks to a GPU. Whatever consumes its vertex
//! stream implements [`VertexBackend`]; the renderer's `VertexArray` uploads
//! through it.
//!
//! - [`VertexBackend`] - trait abstracting buffer creation, upload and
//!   attribute wiring
//! - [`GpuBuffer`], [`VertexLayout`] - owned handle and layout description
//! - `MockVertexBackend` - recording implementation (requires `mock` feature)
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use glyphrun_test_utils::{MockVertexBackend, VertexBackend};
//!
//! let mock = MockVertexBackend::new();
//! let buffer = mock.create_buffer(1024);
//! mock.write_buffer(&buffer, 0, &[0u8; 36]);
//!
//! assert_eq!(mock.count_buffer_creates(), 1);
//! assert_eq!(mock.bytes_written(), 36);
//! assert!(buffer.is_mock());
//! # }
//! ```

pub mod backend;
pub mod gpu_types;
#[cfg(feature = "mock")]
pub mod mock_backend;

pub use backend::*;
pub use gpu_types::*;
#[cfg(feature = "mock")]
pub use mock_backend::*;
