//! Material data containers.
//!
//! The central type is [`MaterialData`], a flat, layered set of named typed
//! attributes ([`MaterialAttributeData`]):
//!  - known names ([`MaterialAttribute`]) are type-checked against a fixed
//!    vocabulary, custom names carry any type;
//!  - records are sorted by name per layer, lookups binary-search;
//!  - shading-model views such as [`PhongMaterial`] and
//!    [`PbrMetallicRoughnessMaterial`] read conventional attribute sets
//!    with their documented defaults.

mod attribute;
mod data;
mod pbr;
mod phong;
mod types;

pub use attribute::{MaterialAttributeData, RECORD_SIZE};
pub use data::{AsAttributeName, AsLayer, AttributeStorage, LayerStorage, MaterialData};
pub use pbr::PbrMetallicRoughnessMaterial;
pub use phong::PhongMaterial;
pub use types::{
    AlphaMode, AttributeValue, MaterialAttribute, MaterialAttributeType, MaterialTypes,
    TextureSwizzle,
};
