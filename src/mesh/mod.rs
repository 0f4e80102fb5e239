//! Mesh data containers.
//!
//! The central type is [`MeshData`], a CPU-side mesh with:
//!  - an optional index buffer with a typed view ([`MeshIndexData`]);
//!  - an optional vertex buffer described by any number of named, typed,
//!    strided attributes ([`MeshAttributeData`]);
//!  - owned or borrowed storage for both buffers.
//!
//! Attribute payloads can be deinterleaved, interleaved or any mix; the
//! descriptors carry offset and stride so the container never assumes a
//! particular packing.

mod attribute;
mod data;
mod format;

pub use attribute::{MeshAttributeData, MeshIndexData};
pub use data::{MeshData, MeshDataBuilder, PrimitiveTopology};
pub use format::{IndexFormat, IndexValue, VertexFormat, VertexFormatValue, VertexSemantic};
