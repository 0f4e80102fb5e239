//! Leaf descriptors for mesh attribute and index views.
//!
//! Both descriptors are cheap values describing a byte range inside a buffer
//! the [`MeshData`](super::MeshData) container will own or borrow; offsets
//! are relative to that buffer's start. They are validated on construction
//! and never mutated afterwards.

use crate::error::MeshError;

use super::format::{IndexFormat, VertexFormat, VertexFormatValue, VertexSemantic};

/// Describes one named, typed, strided view into a vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshAttributeData {
    semantic: VertexSemantic,
    format: VertexFormat,
    offset: usize,
    stride: usize,
    count: usize,
}

impl MeshAttributeData {
    /// Create a descriptor with the format inferred from the element type.
    ///
    /// `offset` is the byte position of the first element inside the vertex
    /// buffer, `stride` the byte distance between consecutive elements and
    /// `count` the number of elements. Fails with
    /// [`MeshError::InvalidAttributeType`] when the format is outside the
    /// semantic's allowed family and with [`MeshError::InsufficientStride`]
    /// when a non-empty view's stride cannot hold one element.
    pub fn new<T: VertexFormatValue>(
        semantic: VertexSemantic,
        offset: usize,
        stride: usize,
        count: usize,
    ) -> Result<Self, MeshError> {
        Self::from_format(semantic, T::FORMAT, offset, stride, count)
    }

    /// Type-erased counterpart of [`new`](Self::new) with an explicit format.
    pub fn from_format(
        semantic: VertexSemantic,
        format: VertexFormat,
        offset: usize,
        stride: usize,
        count: usize,
    ) -> Result<Self, MeshError> {
        if !semantic.allows(format) {
            return Err(MeshError::InvalidAttributeType { semantic, format });
        }
        if count > 0 && stride < format.size() {
            return Err(MeshError::InsufficientStride { format, stride });
        }
        Ok(Self {
            semantic,
            format,
            offset,
            stride,
            count,
        })
    }

    /// Semantic name of the attribute.
    pub fn semantic(&self) -> VertexSemantic {
        self.semantic
    }

    /// Element format.
    pub fn format(&self) -> VertexFormat {
        self.format
    }

    /// Byte offset of the first element inside the vertex buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Byte distance between consecutive elements.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of elements.
    pub fn count(&self) -> usize {
        self.count
    }

    /// One past the last byte the view touches, relative to the buffer start.
    ///
    /// Saturates on arithmetic overflow, so a descriptor too large to
    /// address always exceeds any real buffer's bounds check.
    pub(crate) fn byte_end(&self) -> usize {
        if self.count == 0 {
            self.offset
        } else {
            (self.count - 1)
                .saturating_mul(self.stride)
                .saturating_add(self.offset)
                .saturating_add(self.format.size())
        }
    }
}

/// Describes the typed view into an index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshIndexData {
    format: IndexFormat,
    offset: usize,
    count: usize,
}

impl MeshIndexData {
    /// Create an index view of `count` elements of `format` starting at
    /// byte `offset` of the index buffer.
    pub fn new(format: IndexFormat, offset: usize, count: usize) -> Self {
        Self {
            format,
            offset,
            count,
        }
    }

    /// Index element format.
    pub fn format(&self) -> IndexFormat {
        self.format
    }

    /// Byte offset of the first index inside the index buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of indices.
    pub fn count(&self) -> usize {
        self.count
    }

    /// One past the last byte the view touches, relative to the buffer start.
    ///
    /// Saturates on arithmetic overflow like
    /// [`MeshAttributeData::byte_end`].
    pub(crate) fn byte_end(&self) -> usize {
        self.count
            .saturating_mul(self.format.size())
            .saturating_add(self.offset)
    }
}
