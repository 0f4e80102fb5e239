//! Error types for the mesh and material containers.
//!
//! Every validation failure carries the offending name, index, or range so
//! the message alone identifies the bad input. Construction-time and
//! access-time failures share the same enums; accessors that treat absence
//! as a legitimate outcome (`try_attribute`, `attribute_or`) suppress only
//! the not-found variants, never type mismatches.

use thiserror::Error;

use crate::material::{MaterialAttribute, MaterialAttributeType};
use crate::mesh::{IndexFormat, VertexFormat, VertexSemantic};

/// Errors from [`MeshData`](crate::mesh::MeshData) and its descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// A known semantic was paired with a format outside its allowed family.
    #[error("attribute {semantic:?} is not allowed to use format {format:?}")]
    InvalidAttributeType {
        /// The semantic being constructed.
        semantic: VertexSemantic,
        /// The rejected format.
        format: VertexFormat,
    },

    /// A non-empty view's stride is smaller than one element of its format.
    #[error("stride {stride} too small for {format:?} elements of {} bytes", .format.size())]
    InsufficientStride {
        /// Declared element format.
        format: VertexFormat,
        /// Declared stride in bytes.
        stride: usize,
    },

    /// An index buffer was supplied together with an empty index view.
    #[error("index data supplied for a non-indexed mesh")]
    NonIndexedWithIndexData,

    /// A vertex buffer was supplied without any attributes describing it.
    #[error("{data_len} bytes of vertex data supplied without any attributes")]
    AttributeLessWithVertexData {
        /// Length of the orphaned vertex buffer.
        data_len: usize,
    },

    /// A non-empty vertex buffer was supplied with a zero vertex count.
    #[error("vertex data supplied with a zero vertex count")]
    ZeroVertexCountWithVertexData,

    /// The index view reaches past the end of the index buffer.
    #[error("index view ends at byte {end} but the index buffer has only {len} bytes")]
    IndicesOutOfRange {
        /// One past the last byte the view needs.
        end: usize,
        /// Index buffer length.
        len: usize,
    },

    /// An attribute's byte range reaches past the end of the vertex buffer.
    #[error("attribute {attribute} ends at byte {end} but the vertex buffer has only {len} bytes")]
    AttributeOutOfRange {
        /// Index of the offending attribute.
        attribute: usize,
        /// One past the last byte the attribute needs.
        end: usize,
        /// Vertex buffer length.
        len: usize,
    },

    /// An attribute's element count disagrees with the mesh vertex count.
    #[error("attribute {attribute} has {count} elements but the mesh has {expected} vertices")]
    InconsistentVertexCount {
        /// Index of the offending attribute.
        attribute: usize,
        /// The attribute's element count.
        count: usize,
        /// The vertex count derived from the first attribute or stated explicitly.
        expected: usize,
    },

    /// Typed index access on a mesh without indices.
    #[error("the mesh is not indexed")]
    NotIndexed,

    /// No attribute with the given semantic at the given occurrence.
    #[error("occurrence {occurrence} out of range for {count} {semantic:?} attributes")]
    AttributeNotFound {
        /// The searched semantic.
        semantic: VertexSemantic,
        /// Which occurrence in declaration order was requested.
        occurrence: usize,
        /// How many attributes carry that semantic.
        count: usize,
    },

    /// Numeric attribute id out of bounds.
    #[error("index {index} out of range for {count} attributes")]
    IndexOutOfRange {
        /// The requested id.
        index: usize,
        /// Number of attributes.
        count: usize,
    },

    /// Typed access with a format other than the stored one.
    #[error("attribute is {expected:?} but was accessed as {got:?}")]
    TypeMismatch {
        /// The stored format.
        expected: VertexFormat,
        /// The requested format.
        got: VertexFormat,
    },

    /// Typed index access with a format other than the stored one.
    #[error("indices are {expected:?} but were accessed as {got:?}")]
    IndexTypeMismatch {
        /// The stored index format.
        expected: IndexFormat,
        /// The requested index format.
        got: IndexFormat,
    },

    /// A preallocated destination view has the wrong length.
    #[error("expected a destination with {expected} elements but got {got}")]
    SizeMismatch {
        /// Required element count.
        expected: usize,
        /// Supplied element count.
        got: usize,
    },

    /// Mutable access to a buffer without the mutability flag.
    #[error("the data is not mutable")]
    NotMutable,
}

/// Errors from [`MaterialData`](crate::material::MaterialData) and its records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MaterialError {
    /// An attribute record with an empty name.
    #[error("attribute name is empty")]
    EmptyAttribute,

    /// An attribute name containing an embedded NUL byte.
    #[error("attribute name {name:?} contains a NUL byte")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// Name plus value do not fit the fixed record capacity.
    #[error("attribute {name:?} needs {required} bytes but records hold at most {capacity}")]
    TooLarge {
        /// The attribute name.
        name: String,
        /// Bytes the name, value and bookkeeping would need.
        required: usize,
        /// The fixed record capacity.
        capacity: usize,
    },

    /// A known attribute name paired with a type other than its expected one.
    #[error("expected {expected:?} for {attribute:?} but got {got:?}")]
    UnexpectedType {
        /// The known attribute name.
        attribute: MaterialAttribute,
        /// The type the name table expects.
        expected: MaterialAttributeType,
        /// The supplied type.
        got: MaterialAttributeType,
    },

    /// A type-erased texture swizzle with a discriminant outside the
    /// recognized set.
    #[error("unknown texture swizzle value {raw:#x}")]
    UnknownSwizzle {
        /// The rejected raw value.
        raw: u32,
    },

    /// A type-erased value whose byte length disagrees with its type tag.
    #[error("value of {ty:?} needs {expected} bytes but got {got}")]
    InvalidValueSize {
        /// The declared type tag.
        ty: MaterialAttributeType,
        /// Byte size of the declared type.
        expected: usize,
        /// Supplied byte length.
        got: usize,
    },

    /// Typed access with a type other than the stored one.
    #[error("attribute {name:?} is {expected:?} but was accessed as {got:?}")]
    TypeMismatch {
        /// The attribute name.
        name: String,
        /// The stored type.
        expected: MaterialAttributeType,
        /// The requested type.
        got: MaterialAttributeType,
    },

    /// String access on a non-string attribute, or a non-UTF-8 erased string.
    #[error("attribute {name:?} of {ty:?} is not a string")]
    NotAString {
        /// The attribute name.
        name: String,
        /// The stored type.
        ty: MaterialAttributeType,
    },

    /// Borrowed records that are not sorted by name within their layer.
    #[error("attribute {name:?} at index {index} has to be sorted before {previous:?}")]
    NotSorted {
        /// Index of the out-of-order record.
        index: usize,
        /// Its name.
        name: String,
        /// The name it should precede.
        previous: String,
    },

    /// Two records with the same name inside one layer.
    #[error("duplicate attribute {name:?} in layer {layer}")]
    DuplicateAttribute {
        /// The layer containing the duplicate.
        layer: usize,
        /// The duplicated name.
        name: String,
    },

    /// A layer offset table entry that is non-monotonic or out of bounds.
    #[error("invalid range {start}..{end} for layer {layer} with {count} attributes in total")]
    InvalidLayerRange {
        /// The offending layer.
        layer: usize,
        /// Its computed start offset.
        start: usize,
        /// Its stated end offset.
        end: usize,
        /// Total attribute count.
        count: usize,
    },

    /// No layer carries the given name.
    #[error("layer {name:?} not found")]
    LayerNotFound {
        /// The searched layer name.
        name: String,
    },

    /// No attribute with the given name inside the given layer.
    #[error("attribute {name:?} not found in layer {layer}")]
    AttributeNotFound {
        /// The searched layer.
        layer: usize,
        /// The searched name.
        name: String,
    },

    /// Numeric layer or attribute index out of bounds.
    #[error("index {index} out of range for {count} entries")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of entries in the indexed range.
        count: usize,
    },
}
