//! Backend resource handles and vertex layout descriptions.

/// Handle to a vertex buffer owned by a backend.
///
/// # Design Pattern: Opaque Wrapper
///
/// Callers hold an owned `GpuBuffer` and hand it back to the backend that
/// created it. Whether the backend is a real device or the recording mock is
/// invisible to the vertex array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GpuBuffer {
    inner: GpuBufferInner,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum GpuBufferInner {
    Native { id: u64, size: u64 },
    #[cfg(feature = "mock")]
    Mock { id: usize, size: u64 },
}

impl GpuBuffer {
    /// Wrap a backend-native buffer name (a GL buffer id, an index into a
    /// device-side pool, ...).
    pub fn native(id: u64, size: u64) -> Self {
        Self {
            inner: GpuBufferInner::Native { id, size },
        }
    }

    /// Create mock buffer (for testing)
    #[cfg(feature = "mock")]
    pub fn mock(id: usize, size: u64) -> Self {
        Self {
            inner: GpuBufferInner::Mock { id, size },
        }
    }

    /// Backend-native id, if this is not a mock buffer.
    pub fn native_id(&self) -> Option<u64> {
        match &self.inner {
            GpuBufferInner::Native { id, .. } => Some(*id),
            #[cfg(feature = "mock")]
            GpuBufferInner::Mock { .. } => None,
        }
    }

    /// Allocated size in bytes.
    pub fn size(&self) -> u64 {
        match &self.inner {
            GpuBufferInner::Native { size, .. } => *size,
            #[cfg(feature = "mock")]
            GpuBufferInner::Mock { size, .. } => *size,
        }
    }

    /// Check if this is a mock (useful in tests)
    #[cfg(feature = "mock")]
    pub fn is_mock(&self) -> bool {
        matches!(self.inner, GpuBufferInner::Mock { .. })
    }

    /// Get mock ID (for test assertions)
    #[cfg(feature = "mock")]
    pub fn mock_id(&self) -> Option<usize> {
        match &self.inner {
            GpuBufferInner::Mock { id, .. } => Some(*id),
            _ => None,
        }
    }
}

/// Scalar type of a vertex attribute component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexFormat {
    Float32,
}

impl VertexFormat {
    /// Size of one component in bytes.
    pub const fn size(self) -> u32 {
        match self {
            VertexFormat::Float32 => 4,
        }
    }
}

/// One interleaved attribute inside a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input location.
    pub location: u32,
    /// Byte offset from the start of the vertex.
    pub offset: u32,
    /// Number of components (2 for a UV, 4 for a color, ...).
    pub components: u32,
    pub format: VertexFormat,
}

impl VertexAttribute {
    /// Byte size of the whole attribute.
    pub const fn size(&self) -> u32 {
        self.components * self.format.size()
    }
}

/// Interleaved vertex layout: what a backend needs to wire attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    /// Distance in bytes between two consecutive vertices.
    pub stride: u32,
    pub attributes: &'static [VertexAttribute],
}

impl VertexLayout {
    /// True when every attribute lies inside the stride and no two overlap.
    pub fn is_consistent(&self) -> bool {
        let mut end = 0;
        for attribute in self.attributes {
            if attribute.offset < end {
                return false;
            }
            end = attribute.offset + attribute.size();
        }
        end <= self.stride
    }
}
