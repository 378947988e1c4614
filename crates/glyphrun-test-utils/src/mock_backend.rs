//! Mock implementation of VertexBackend for testing.
//!
//! Records every operation without touching a GPU.

use crate::{
    backend::VertexBackend,
    gpu_types::{GpuBuffer, VertexLayout},
};
use parking_lot::Mutex;

/// Records a backend call for verification in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    CreateBuffer {
        size: u64,
    },
    WriteBuffer {
        buffer_id: usize,
        offset: u64,
        size: usize,
    },
    BindVertexLayout {
        buffer_id: usize,
        stride: u32,
        attributes: usize,
    },
    UnbindVertexLayout {
        attributes: usize,
    },
}

/// Mock implementation of [`VertexBackend`] for testing.
///
/// # Borrow Checking Pattern: Interior Mutability
///
/// Trait methods take `&self` but must record calls, so the log sits behind
/// a `parking_lot::Mutex` (which is `Send + Sync`, unlike `RefCell`).
///
/// The last bytes written to each buffer are kept so tests can decode the
/// uploaded vertices.
///
/// # Example
///
/// ```rust
/// use glyphrun_test_utils::{MockVertexBackend, VertexBackend};
///
/// let mock = MockVertexBackend::new();
/// let buffer = mock.create_buffer(72);
/// mock.write_buffer(&buffer, 0, &[1u8; 72]);
///
/// assert_eq!(mock.count_buffer_writes(), 1);
/// assert_eq!(mock.buffer_contents(0).map(|b| b.len()), Some(72));
/// ```
pub struct MockVertexBackend {
    /// Recorded calls for verification
    calls: Mutex<Vec<BackendCall>>,

    /// Contents of each mock buffer, indexed by mock id
    buffers: Mutex<Vec<Vec<u8>>>,
}

impl MockVertexBackend {
    /// Create a new mock backend.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            buffers: Mutex::new(Vec::new()),
        }
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().clone()
    }

    /// Count buffer allocations.
    pub fn count_buffer_creates(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, BackendCall::CreateBuffer { .. }))
            .count()
    }

    /// Count buffer write operations.
    pub fn count_buffer_writes(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, BackendCall::WriteBuffer { .. }))
            .count()
    }

    /// Count layout binds.
    pub fn count_binds(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, BackendCall::BindVertexLayout { .. }))
            .count()
    }

    /// Total number of bytes written across all buffers.
    pub fn bytes_written(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .map(|call| match call {
                BackendCall::WriteBuffer { size, .. } => *size,
                _ => 0,
            })
            .sum()
    }

    /// Current contents of the mock buffer with the given id.
    pub fn buffer_contents(&self, id: usize) -> Option<Vec<u8>> {
        self.buffers.lock().get(id).cloned()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Get total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl Default for MockVertexBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexBackend for MockVertexBackend {
    fn create_buffer(&self, size: u64) -> GpuBuffer {
        let mut buffers = self.buffers.lock();
        let id = buffers.len();
        buffers.push(vec![0; size as usize]);

        self.calls.lock().push(BackendCall::CreateBuffer { size });

        GpuBuffer::mock(id, size)
    }

    fn write_buffer(&self, buffer: &GpuBuffer, offset: u64, data: &[u8]) {
        let Some(buffer_id) = buffer.mock_id() else {
            return;
        };

        if let Some(contents) = self.buffers.lock().get_mut(buffer_id) {
            let start = offset as usize;
            let end = start + data.len();
            if contents.len() < end {
                contents.resize(end, 0);
            }
            contents[start..end].copy_from_slice(data);
        }

        self.calls.lock().push(BackendCall::WriteBuffer {
            buffer_id,
            offset,
            size: data.len(),
        });
    }

    fn bind_vertex_layout(&self, buffer: &GpuBuffer, layout: &VertexLayout) {
        if let Some(buffer_id) = buffer.mock_id() {
            self.calls.lock().push(BackendCall::BindVertexLayout {
                buffer_id,
                stride: layout.stride,
                attributes: layout.attributes.len(),
            });
        }
    }

    fn unbind_vertex_layout(&self, layout: &VertexLayout) {
        self.calls.lock().push(BackendCall::UnbindVertexLayout {
            attributes: layout.attributes.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_keeps_contents() {
        let mock = MockVertexBackend::new();
        let buffer = mock.create_buffer(4);
        mock.write_buffer(&buffer, 2, &[9, 9]);

        assert_eq!(mock.buffer_contents(0), Some(vec![0, 0, 9, 9]));
        assert_eq!(
            mock.calls(),
            vec![
                BackendCall::CreateBuffer { size: 4 },
                BackendCall::WriteBuffer {
                    buffer_id: 0,
                    offset: 2,
                    size: 2
                },
            ]
        );
    }

    #[test]
    fn test_write_past_end_grows_contents() {
        let mock = MockVertexBackend::new();
        let buffer = mock.create_buffer(2);
        mock.write_buffer(&buffer, 0, &[1, 2, 3]);
        assert_eq!(mock.buffer_contents(0), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_clear_calls() {
        let mock = MockVertexBackend::new();
        let _ = mock.create_buffer(8);
        assert_eq!(mock.call_count(), 1);
        mock.clear_calls();
        assert_eq!(mock.call_count(), 0);
    }
}
