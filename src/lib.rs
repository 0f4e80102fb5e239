//! # Larkspur Trade
//!
//! CPU-side mesh and material data containers for the Larkspur asset
//! pipeline. Importers and procedural generators produce this data,
//! renderers and converters consume it.
//!
//! - [`mesh::MeshData`] — index/vertex byte buffers plus named, typed,
//!   strided attribute descriptors with validated typed access
//! - [`material::MaterialData`] — sorted, layered, type-tagged key/value
//!   attribute sets packed into fixed-size records
//!
//! Both containers support owned buffers as well as borrowed (zero-copy,
//! externally managed) views, and can release their buffers back to the
//! caller for transfer elsewhere.

pub mod buffer;
pub mod error;
pub mod material;
pub mod math;
pub mod mesh;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
