//! Byte buffer ownership and strided typed views.
//!
//! [`Buffer`] is the ownership model shared by the mesh and material
//! containers: a buffer is either owned (allocated, always mutable) or a
//! borrowed view into caller-managed memory, with mutability decided by
//! which borrow was handed in. "Owned but immutable" and "borrowed data
//! claiming ownership" are unrepresentable.
//!
//! [`StridedView`] and [`StridedViewMut`] reinterpret a byte range as a
//! sequence of typed elements at a constant byte stride, so interleaved
//! (array-of-structs) vertex layouts can be accessed without copying.
//! Element reads are unaligned, a strided element may start at any byte
//! offset.

use std::fmt;
use std::marker::PhantomData;

use bytemuck::Pod;

/// A byte buffer that is either owned or borrowed.
///
/// Owned buffers are always mutable. Borrowed buffers are mutable only when
/// constructed from a mutable slice; the container referencing them must not
/// outlive the borrow, which the lifetime enforces.
pub enum Buffer<'a> {
    /// Owned, mutable storage.
    Owned(Vec<u8>),
    /// Borrowed read-only view into caller-managed memory.
    Borrowed(&'a [u8]),
    /// Borrowed mutable view into caller-managed memory.
    BorrowedMut(&'a mut [u8]),
}

impl<'a> Buffer<'a> {
    /// Read-only access to the bytes.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Self::Owned(data) => data,
            Self::Borrowed(data) => data,
            Self::BorrowedMut(data) => data,
        }
    }

    /// Mutable access to the bytes, or `None` for a read-only borrow.
    pub fn as_mut_slice(&mut self) -> Option<&mut [u8]> {
        match self {
            Self::Owned(data) => Some(data),
            Self::Borrowed(_) => None,
            Self::BorrowedMut(data) => Some(data),
        }
    }

    /// Whether this buffer owns its storage.
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// Whether the bytes may be written through this buffer.
    pub fn is_mutable(&self) -> bool {
        !matches!(self, Self::Borrowed(_))
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl From<Vec<u8>> for Buffer<'_> {
    fn from(data: Vec<u8>) -> Self {
        Self::Owned(data)
    }
}

impl<'a> From<&'a [u8]> for Buffer<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::Borrowed(data)
    }
}

impl<'a> From<&'a mut [u8]> for Buffer<'a> {
    fn from(data: &'a mut [u8]) -> Self {
        Self::BorrowedMut(data)
    }
}

impl fmt::Debug for Buffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            Self::Owned(_) => "Owned",
            Self::Borrowed(_) => "Borrowed",
            Self::BorrowedMut(_) => "BorrowedMut",
        };
        f.debug_struct("Buffer")
            .field("storage", &variant)
            .field("len", &self.len())
            .finish()
    }
}

/// Read-only view of typed elements at a constant byte stride.
///
/// Element `i` occupies bytes `i * stride .. i * stride + size_of::<T>()`
/// of the underlying slice. The view aliases the container's storage, it
/// never copies.
#[derive(Clone, Copy)]
pub struct StridedView<'a, T: Pod> {
    bytes: &'a [u8],
    stride: usize,
    len: usize,
    _ty: PhantomData<fn() -> T>,
}

impl<'a, T: Pod> StridedView<'a, T> {
    /// The caller guarantees that `bytes` spans all `len` elements, i.e.
    /// `(len - 1) * stride + size_of::<T>() <= bytes.len()` for `len > 0`.
    pub(crate) fn new(bytes: &'a [u8], stride: usize, len: usize) -> Self {
        debug_assert!(len == 0 || (len - 1) * stride + std::mem::size_of::<T>() <= bytes.len());
        Self {
            bytes,
            stride,
            len,
            _ty: PhantomData,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the view has no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte stride between consecutive elements.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Element at `index`, or `None` when out of bounds.
    pub fn get(&self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        let start = index * self.stride;
        Some(bytemuck::pod_read_unaligned(
            &self.bytes[start..start + std::mem::size_of::<T>()],
        ))
    }

    /// Iterator over all elements, by value.
    pub fn iter(&self) -> impl Iterator<Item = T> + 'a {
        let copy = *self;
        (0..copy.len).map(move |i| {
            let start = i * copy.stride;
            bytemuck::pod_read_unaligned(&copy.bytes[start..start + std::mem::size_of::<T>()])
        })
    }

    /// Copy all elements into a tightly packed vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// The underlying bytes spanned by this view.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<T: Pod + fmt::Debug> fmt::Debug for StridedView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StridedView")
            .field("len", &self.len)
            .field("stride", &self.stride)
            .finish()
    }
}

/// Mutable view of typed elements at a constant byte stride.
pub struct StridedViewMut<'a, T: Pod> {
    bytes: &'a mut [u8],
    stride: usize,
    len: usize,
    _ty: PhantomData<fn() -> T>,
}

impl<'a, T: Pod> StridedViewMut<'a, T> {
    /// Same span requirement as [`StridedView::new`].
    pub(crate) fn new(bytes: &'a mut [u8], stride: usize, len: usize) -> Self {
        debug_assert!(len == 0 || (len - 1) * stride + std::mem::size_of::<T>() <= bytes.len());
        Self {
            bytes,
            stride,
            len,
            _ty: PhantomData,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the view has no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte stride between consecutive elements.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Element at `index`, or `None` when out of bounds.
    pub fn get(&self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        let start = index * self.stride;
        Some(bytemuck::pod_read_unaligned(
            &self.bytes[start..start + std::mem::size_of::<T>()],
        ))
    }

    /// Overwrite the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: T) {
        assert!(index < self.len, "index {index} out of bounds for {} elements", self.len);
        let start = index * self.stride;
        self.bytes[start..start + std::mem::size_of::<T>()].copy_from_slice(bytemuck::bytes_of(&value));
    }

    /// Downgrade to a read-only view.
    pub fn as_view(&self) -> StridedView<'_, T> {
        StridedView::new(self.bytes, self.stride, self.len)
    }
}

impl<T: Pod + fmt::Debug> fmt::Debug for StridedViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StridedViewMut")
            .field("len", &self.len)
            .field("stride", &self.stride)
            .finish()
    }
}
