//! The material data container.
//!
//! [`MaterialData`] is a flat array of [`MaterialAttributeData`] records
//! partitioned into layers. Records are sorted by name within each layer so
//! lookups binary-search; owned records are sorted at construction, borrowed
//! records must already be sorted.
//!
//! The layer partition is a table of end offsets: entry `i` is one past the
//! last record of layer `i`, with an implicit leading zero. An empty table
//! means a single base layer spanning all records. A layer's name is its
//! first record when that record is
//! [`MaterialAttribute::LayerName`]; the base layer is unnamed.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::MaterialError;

use super::attribute::MaterialAttributeData;
use super::types::{AlphaMode, AttributeValue, MaterialAttribute, MaterialTypes};

/// Attribute records handed back by
/// [`MaterialData::release_attribute_data`].
#[derive(Debug)]
pub enum AttributeStorage<'a> {
    /// Records the container owned.
    Owned(Vec<MaterialAttributeData<'a>>),
    /// Records the container borrowed.
    Borrowed(&'a [MaterialAttributeData<'a>]),
}

impl<'a> AttributeStorage<'a> {
    /// The records.
    pub fn as_slice(&self) -> &[MaterialAttributeData<'a>] {
        match self {
            Self::Owned(records) => records,
            Self::Borrowed(records) => records,
        }
    }
}

/// Layer offsets handed back by [`MaterialData::release_layer_data`].
#[derive(Debug)]
pub enum LayerStorage<'a> {
    /// Offsets the container owned.
    Owned(Vec<usize>),
    /// Offsets the container borrowed.
    Borrowed(&'a [usize]),
}

impl LayerStorage<'_> {
    /// The per-layer end offsets.
    pub fn as_slice(&self) -> &[usize] {
        match self {
            Self::Owned(offsets) => offsets,
            Self::Borrowed(offsets) => offsets,
        }
    }
}

/// Selects a layer by index or by name.
pub trait AsLayer {
    /// Resolve to a layer index, failing when absent.
    fn resolve(&self, material: &MaterialData<'_>) -> Result<usize, MaterialError>;
}

impl AsLayer for usize {
    fn resolve(&self, material: &MaterialData<'_>) -> Result<usize, MaterialError> {
        if *self >= material.layer_count() {
            return Err(MaterialError::IndexOutOfRange {
                index: *self,
                count: material.layer_count(),
            });
        }
        Ok(*self)
    }
}

impl AsLayer for &str {
    fn resolve(&self, material: &MaterialData<'_>) -> Result<usize, MaterialError> {
        material.layer_id(self)
    }
}

/// Selects an attribute by its string name or its known-name enum.
pub trait AsAttributeName {
    /// The string form used for lookup.
    fn as_name(&self) -> &str;
}

impl AsAttributeName for &str {
    fn as_name(&self) -> &str {
        self
    }
}

impl AsAttributeName for MaterialAttribute {
    fn as_name(&self) -> &str {
        self.name()
    }
}

/// Typed, layered storage of material attributes.
///
/// # Example
///
/// ```
/// use larkspur_trade::material::{
///     MaterialAttribute, MaterialAttributeData, MaterialData, MaterialTypes,
/// };
///
/// let material = MaterialData::new(
///     MaterialTypes::PHONG,
///     vec![
///         MaterialAttributeData::known(MaterialAttribute::Shininess, &120.0f32).unwrap(),
///         MaterialAttributeData::known(MaterialAttribute::DoubleSided, &true).unwrap(),
///     ],
/// )
/// .unwrap();
/// assert_eq!(material.attribute::<f32>(MaterialAttribute::Shininess).unwrap(), 120.0);
/// assert!(material.is_double_sided().unwrap());
/// ```
pub struct MaterialData<'a> {
    types: MaterialTypes,
    attributes: AttributeStorage<'a>,
    layer_offsets: LayerStorage<'a>,
    importer_state: Option<Arc<dyn Any + Send + Sync>>,
}

impl<'a> MaterialData<'a> {
    /// Create a single-layer material from owned records.
    ///
    /// Records are sorted by name; duplicate names are rejected.
    pub fn new(
        types: MaterialTypes,
        attributes: Vec<MaterialAttributeData<'a>>,
    ) -> Result<Self, MaterialError> {
        Self::with_layers(types, attributes, Vec::new())
    }

    /// Create a layered material from owned records.
    ///
    /// `layer_offsets` holds one past the last record of each layer; the
    /// last entry must equal the record count. An empty table means a
    /// single base layer. Records are sorted by name within each layer.
    pub fn with_layers(
        types: MaterialTypes,
        mut attributes: Vec<MaterialAttributeData<'a>>,
        layer_offsets: Vec<usize>,
    ) -> Result<Self, MaterialError> {
        validate_offsets(&layer_offsets, attributes.len())?;
        let mut start = 0;
        for (layer, &end) in layer_ends(&layer_offsets, attributes.len()).iter().enumerate() {
            attributes[start..end].sort_by(|a, b| a.name().cmp(b.name()));
            check_layer_sorted(&attributes[start..end], layer, start, true)?;
            start = end;
        }
        log::trace!(
            "built material: {} attributes in {} layers",
            attributes.len(),
            layer_offsets.len().max(1)
        );
        Ok(Self {
            types,
            attributes: AttributeStorage::Owned(attributes),
            layer_offsets: LayerStorage::Owned(layer_offsets),
            importer_state: None,
        })
    }

    /// Create a layered material over borrowed, presorted records.
    ///
    /// Unlike [`with_layers`](Self::with_layers) nothing is copied or
    /// reordered; records out of name order within a layer are rejected.
    pub fn from_sorted(
        types: MaterialTypes,
        attributes: &'a [MaterialAttributeData<'a>],
        layer_offsets: &'a [usize],
    ) -> Result<Self, MaterialError> {
        validate_offsets(layer_offsets, attributes.len())?;
        let mut start = 0;
        for (layer, &end) in layer_ends(layer_offsets, attributes.len()).iter().enumerate() {
            check_layer_sorted(&attributes[start..end], layer, start, false)?;
            start = end;
        }
        Ok(Self {
            types,
            attributes: AttributeStorage::Borrowed(attributes),
            layer_offsets: LayerStorage::Borrowed(layer_offsets),
            importer_state: None,
        })
    }

    /// Attach an opaque importer state, passed through unmodified.
    #[must_use]
    pub fn with_importer_state(mut self, state: Arc<dyn Any + Send + Sync>) -> Self {
        self.importer_state = Some(state);
        self
    }

    /// Shading models this material supports.
    pub fn types(&self) -> MaterialTypes {
        self.types
    }

    /// The opaque importer state, if any.
    pub fn importer_state(&self) -> Option<&Arc<dyn Any + Send + Sync>> {
        self.importer_state.as_ref()
    }

    /// Number of layers, at least one.
    pub fn layer_count(&self) -> usize {
        self.layer_offsets.as_slice().len().max(1)
    }

    /// Total number of attribute records across all layers.
    pub fn attribute_count(&self) -> usize {
        self.attributes.as_slice().len()
    }

    /// Number of records in the given layer.
    pub fn layer_attribute_count(&self, layer: impl AsLayer) -> Result<usize, MaterialError> {
        let (start, end) = self.layer_range(layer.resolve(self)?);
        Ok(end - start)
    }

    /// Name of the given layer, empty when unnamed.
    ///
    /// The base layer is always unnamed; a
    /// [`MaterialAttribute::LayerName`] record in layer 0 is an ordinary
    /// attribute, not a layer identity.
    pub fn layer_name(&self, layer: usize) -> Result<&str, MaterialError> {
        let layer = layer.resolve(self)?;
        if layer == 0 {
            return Ok("");
        }
        let (start, end) = self.layer_range(layer);
        let records = &self.attributes.as_slice()[start..end];
        match records.first() {
            Some(record) if record.known_name() == Some(MaterialAttribute::LayerName) => {
                record.string_value()
            }
            _ => Ok(""),
        }
    }

    /// Index of the first non-base layer with the given name.
    ///
    /// The base layer is never matched, its name is always empty.
    pub fn layer_id(&self, name: &str) -> Result<usize, MaterialError> {
        for layer in 1..self.layer_count() {
            if self.layer_name(layer)? == name {
                return Ok(layer);
            }
        }
        Err(MaterialError::LayerNotFound {
            name: name.to_string(),
        })
    }

    /// Whether a non-base layer with the given name exists.
    pub fn has_layer(&self, name: &str) -> bool {
        self.layer_id(name).is_ok()
    }

    /// Index of the named attribute within the given layer.
    pub fn attribute_id(
        &self,
        layer: impl AsLayer,
        name: impl AsAttributeName,
    ) -> Result<usize, MaterialError> {
        let layer = layer.resolve(self)?;
        let (start, end) = self.layer_range(layer);
        let name = name.as_name();
        self.attributes.as_slice()[start..end]
            .binary_search_by(|record| record.name().cmp(name))
            .map_err(|_| MaterialError::AttributeNotFound {
                layer,
                name: name.to_string(),
            })
    }

    /// Whether the named attribute exists in the given layer.
    pub fn has_layer_attribute(&self, layer: impl AsLayer, name: impl AsAttributeName) -> bool {
        self.attribute_id(layer, name).is_ok()
    }

    /// Whether the named attribute exists in the base layer.
    pub fn has_attribute(&self, name: impl AsAttributeName) -> bool {
        self.has_layer_attribute(0usize, name)
    }

    /// The record at the given index within the given layer.
    pub fn attribute_data(
        &self,
        layer: impl AsLayer,
        id: usize,
    ) -> Result<&MaterialAttributeData<'a>, MaterialError> {
        let (start, end) = self.layer_range(layer.resolve(self)?);
        if id >= end - start {
            return Err(MaterialError::IndexOutOfRange {
                index: id,
                count: end - start,
            });
        }
        Ok(&self.attributes.as_slice()[start + id])
    }

    /// Typed value of a named attribute in the given layer.
    pub fn layer_attribute<T: AttributeValue>(
        &self,
        layer: impl AsLayer,
        name: impl AsAttributeName,
    ) -> Result<T, MaterialError> {
        let layer = layer.resolve(self)?;
        let id = self.attribute_id(layer, name)?;
        self.attribute_data(layer, id)?.value()
    }

    /// Like [`layer_attribute`](Self::layer_attribute) but absence is
    /// `Ok(None)`. Type mismatches still fail.
    pub fn try_layer_attribute<T: AttributeValue>(
        &self,
        layer: impl AsLayer,
        name: impl AsAttributeName,
    ) -> Result<Option<T>, MaterialError> {
        let layer = layer.resolve(self)?;
        match self.attribute_id(layer, name) {
            Ok(id) => self.attribute_data(layer, id).and_then(|r| r.value()).map(Some),
            Err(MaterialError::AttributeNotFound { .. }) => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Like [`layer_attribute`](Self::layer_attribute) with a fallback for
    /// absence.
    pub fn layer_attribute_or<T: AttributeValue>(
        &self,
        layer: impl AsLayer,
        name: impl AsAttributeName,
        default: T,
    ) -> Result<T, MaterialError> {
        Ok(self.try_layer_attribute(layer, name)?.unwrap_or(default))
    }

    /// String value of a named attribute in the given layer.
    pub fn layer_attribute_string(
        &self,
        layer: impl AsLayer,
        name: impl AsAttributeName,
    ) -> Result<&str, MaterialError> {
        let layer = layer.resolve(self)?;
        let id = self.attribute_id(layer, name)?;
        self.attribute_data(layer, id)?.string_value()
    }

    /// Typed value of a named attribute in the base layer.
    pub fn attribute<T: AttributeValue>(
        &self,
        name: impl AsAttributeName,
    ) -> Result<T, MaterialError> {
        self.layer_attribute(0usize, name)
    }

    /// Like [`attribute`](Self::attribute) but absence is `Ok(None)`.
    pub fn try_attribute<T: AttributeValue>(
        &self,
        name: impl AsAttributeName,
    ) -> Result<Option<T>, MaterialError> {
        self.try_layer_attribute(0usize, name)
    }

    /// Like [`attribute`](Self::attribute) with a fallback for absence.
    pub fn attribute_or<T: AttributeValue>(
        &self,
        name: impl AsAttributeName,
        default: T,
    ) -> Result<T, MaterialError> {
        self.layer_attribute_or(0usize, name, default)
    }

    /// String value of a named attribute in the base layer.
    pub fn attribute_string(&self, name: impl AsAttributeName) -> Result<&str, MaterialError> {
        self.layer_attribute_string(0usize, name)
    }

    /// Whether the material is rendered on both faces. Defaults to `false`.
    pub fn is_double_sided(&self) -> Result<bool, MaterialError> {
        self.attribute_or(MaterialAttribute::DoubleSided, false)
    }

    /// How alpha is interpreted: blending when
    /// [`MaterialAttribute::AlphaBlend`] is set, masking when an alpha mask
    /// threshold is present, opaque otherwise.
    pub fn alpha_mode(&self) -> Result<AlphaMode, MaterialError> {
        if self.attribute_or(MaterialAttribute::AlphaBlend, false)? {
            return Ok(AlphaMode::Blend);
        }
        if self.has_attribute(MaterialAttribute::AlphaMask) {
            return Ok(AlphaMode::Mask);
        }
        Ok(AlphaMode::Opaque)
    }

    /// Alpha cutoff threshold. Defaults to 0.5.
    pub fn alpha_mask(&self) -> Result<f32, MaterialError> {
        self.attribute_or(MaterialAttribute::AlphaMask, 0.5)
    }

    /// Transfer the attribute records to the caller.
    ///
    /// The material is empty afterwards, with a single empty base layer.
    pub fn release_attribute_data(&mut self) -> AttributeStorage<'a> {
        self.layer_offsets = LayerStorage::Owned(Vec::new());
        std::mem::replace(&mut self.attributes, AttributeStorage::Owned(Vec::new()))
    }

    /// Transfer the layer offsets to the caller.
    ///
    /// The records stay; afterwards a single base layer spans all of them.
    pub fn release_layer_data(&mut self) -> LayerStorage<'a> {
        std::mem::replace(&mut self.layer_offsets, LayerStorage::Owned(Vec::new()))
    }

    fn layer_range(&self, layer: usize) -> (usize, usize) {
        let offsets = self.layer_offsets.as_slice();
        if offsets.is_empty() {
            return (0, self.attribute_count());
        }
        let start = if layer == 0 { 0 } else { offsets[layer - 1] };
        (start, offsets[layer])
    }
}

impl fmt::Debug for MaterialData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaterialData")
            .field("types", &self.types)
            .field("attribute_count", &self.attribute_count())
            .field("layer_count", &self.layer_count())
            .finish()
    }
}

fn validate_offsets(offsets: &[usize], count: usize) -> Result<(), MaterialError> {
    let mut start = 0;
    for (layer, &end) in offsets.iter().enumerate() {
        if end < start || end > count {
            return Err(MaterialError::InvalidLayerRange {
                layer,
                start,
                end,
                count,
            });
        }
        start = end;
    }
    if let Some(&last) = offsets.last() {
        if last != count {
            return Err(MaterialError::InvalidLayerRange {
                layer: offsets.len() - 1,
                start: offsets[offsets.len() - 1],
                end: last,
                count,
            });
        }
    }
    Ok(())
}

fn layer_ends(offsets: &[usize], count: usize) -> Vec<usize> {
    if offsets.is_empty() {
        vec![count]
    } else {
        offsets.to_vec()
    }
}

fn check_layer_sorted(
    records: &[MaterialAttributeData<'_>],
    layer: usize,
    layer_start: usize,
    sorted_already: bool,
) -> Result<(), MaterialError> {
    for (i, pair) in records.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);
        if previous.name() == current.name() {
            return Err(MaterialError::DuplicateAttribute {
                layer,
                name: current.name().to_string(),
            });
        }
        if !sorted_already && previous.name() > current.name() {
            return Err(MaterialError::NotSorted {
                index: layer_start + i + 1,
                name: current.name().to_string(),
                previous: previous.name().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;

    fn shininess(value: f32) -> MaterialAttributeData<'static> {
        MaterialAttributeData::known(MaterialAttribute::Shininess, &value).unwrap()
    }

    fn diffuse(value: Vec4) -> MaterialAttributeData<'static> {
        MaterialAttributeData::known(MaterialAttribute::DiffuseColor, &value).unwrap()
    }

    #[test]
    fn owned_records_are_sorted() {
        // Supplied out of order, stored sorted by name
        let material = MaterialData::new(
            MaterialTypes::PHONG,
            vec![shininess(80.0), diffuse(Vec4::new(1.0, 1.0, 1.0, 1.0))],
        )
        .unwrap();
        assert_eq!(material.attribute_data(0usize, 0).unwrap().name(), "DiffuseColor");
        assert_eq!(material.attribute_data(0usize, 1).unwrap().name(), "Shininess");
        assert_eq!(material.attribute_id(0usize, "Shininess").unwrap(), 1);
        assert_eq!(
            material.attribute::<f32>(MaterialAttribute::Shininess).unwrap(),
            80.0
        );
    }

    #[test]
    fn duplicate_names_rejected() {
        let result = MaterialData::new(
            MaterialTypes::PHONG,
            vec![shininess(80.0), shininess(100.0)],
        );
        assert_eq!(
            result.unwrap_err(),
            MaterialError::DuplicateAttribute {
                layer: 0,
                name: "Shininess".to_string(),
            }
        );
    }

    #[test]
    fn borrowed_records_must_be_sorted() {
        let records = [shininess(80.0), diffuse(Vec4::new(1.0, 1.0, 1.0, 1.0))];
        let result = MaterialData::from_sorted(MaterialTypes::PHONG, &records, &[]);
        assert_eq!(
            result.unwrap_err(),
            MaterialError::NotSorted {
                index: 1,
                name: "DiffuseColor".to_string(),
                previous: "Shininess".to_string(),
            }
        );

        let records = [diffuse(Vec4::new(1.0, 1.0, 1.0, 1.0)), shininess(80.0)];
        let material = MaterialData::from_sorted(MaterialTypes::PHONG, &records, &[]).unwrap();
        assert_eq!(material.attribute::<f32>("Shininess").unwrap(), 80.0);
    }

    #[test]
    fn layered_lookup() {
        // Base layer with two attributes, one named clear coat layer
        let material = MaterialData::with_layers(
            MaterialTypes::PHONG | MaterialTypes::PBR_CLEAR_COAT,
            vec![
                diffuse(Vec4::new(0.8, 0.2, 0.2, 1.0)),
                shininess(80.0),
                MaterialAttributeData::string(" LayerName", "ClearCoat").unwrap(),
                MaterialAttributeData::known(MaterialAttribute::LayerFactor, &0.7f32).unwrap(),
                MaterialAttributeData::known(MaterialAttribute::Roughness, &0.1f32).unwrap(),
            ],
            vec![2, 5],
        )
        .unwrap();

        assert_eq!(material.layer_count(), 2);
        assert_eq!(material.layer_name(0).unwrap(), "");
        assert_eq!(material.layer_name(1).unwrap(), "ClearCoat");
        assert_eq!(material.layer_id("ClearCoat").unwrap(), 1);
        assert!(material.has_layer("ClearCoat"));
        assert!(!material.has_layer("NoSuchLayer"));
        assert_eq!(material.layer_attribute_count(0usize).unwrap(), 2);
        assert_eq!(material.layer_attribute_count(1usize).unwrap(), 3);

        // Layers are addressable by index and by name
        assert_eq!(
            material
                .layer_attribute::<f32>(1usize, MaterialAttribute::LayerFactor)
                .unwrap(),
            0.7
        );
        assert_eq!(
            material
                .layer_attribute::<f32>("ClearCoat", MaterialAttribute::Roughness)
                .unwrap(),
            0.1
        );
        // Base layer does not see layer attributes
        assert!(!material.has_attribute(MaterialAttribute::Roughness));
    }

    #[test]
    fn invalid_layer_offsets_rejected() {
        let records = vec![shininess(80.0), diffuse(Vec4::new(1.0, 1.0, 1.0, 1.0))];

        // Last offset must equal the record count
        assert_eq!(
            MaterialData::with_layers(MaterialTypes::PHONG, records.clone(), vec![1])
                .unwrap_err(),
            MaterialError::InvalidLayerRange {
                layer: 0,
                start: 1,
                end: 1,
                count: 2,
            }
        );

        // Offsets must be non-decreasing
        assert_eq!(
            MaterialData::with_layers(MaterialTypes::PHONG, records.clone(), vec![2, 1, 2])
                .unwrap_err(),
            MaterialError::InvalidLayerRange {
                layer: 1,
                start: 2,
                end: 1,
                count: 2,
            }
        );

        // Offsets must stay in bounds
        assert_eq!(
            MaterialData::with_layers(MaterialTypes::PHONG, records, vec![5]).unwrap_err(),
            MaterialError::InvalidLayerRange {
                layer: 0,
                start: 0,
                end: 5,
                count: 2,
            }
        );
    }

    #[test]
    fn named_layer_over_empty_base() {
        // An empty base layer with a single named layer holding everything
        let material = MaterialData::with_layers(
            MaterialTypes::PBR_CLEAR_COAT,
            vec![
                MaterialAttributeData::string(" LayerName", "ClearCoat").unwrap(),
                MaterialAttributeData::known(MaterialAttribute::AlphaBlend, &true).unwrap(),
            ],
            vec![0, 2],
        )
        .unwrap();
        assert!(material.has_layer("ClearCoat"));
        assert_eq!(material.layer_id("ClearCoat").unwrap(), 1);
        assert_eq!(material.layer_attribute_count(0usize).unwrap(), 0);
        assert!(material
            .layer_attribute::<bool>("ClearCoat", MaterialAttribute::AlphaBlend)
            .unwrap());
    }

    #[test]
    fn base_layer_is_never_named() {
        // A LayerName record in the base layer is an ordinary attribute
        let material = MaterialData::new(
            MaterialTypes::FLAT,
            vec![MaterialAttributeData::string(" LayerName", "NotALayer").unwrap()],
        )
        .unwrap();
        assert_eq!(material.layer_name(0).unwrap(), "");
        assert!(!material.has_layer("NotALayer"));
        assert_eq!(
            material.attribute_string(MaterialAttribute::LayerName).unwrap(),
            "NotALayer"
        );
    }

    #[test]
    fn empty_layer_is_allowed() {
        let material = MaterialData::with_layers(
            MaterialTypes::PHONG,
            vec![shininess(80.0)],
            vec![1, 1],
        )
        .unwrap();
        assert_eq!(material.layer_count(), 2);
        assert_eq!(material.layer_attribute_count(1usize).unwrap(), 0);
        assert_eq!(material.layer_name(1).unwrap(), "");
    }

    #[test]
    fn try_attribute_suppresses_only_absence() {
        let material = MaterialData::new(MaterialTypes::PHONG, vec![shininess(80.0)]).unwrap();
        assert_eq!(material.try_attribute::<f32>("Shininess").unwrap(), Some(80.0));
        assert_eq!(material.try_attribute::<f32>("Roughness").unwrap(), None);
        // A present attribute of the wrong type still fails
        assert!(material.try_attribute::<u32>("Shininess").is_err());
    }

    #[test]
    fn attribute_or_default() {
        let material = MaterialData::new(MaterialTypes::PHONG, vec![]).unwrap();
        assert_eq!(
            material
                .attribute_or(MaterialAttribute::Shininess, 80.0f32)
                .unwrap(),
            80.0
        );
    }

    #[test]
    fn missing_attribute_error_names_the_layer() {
        let material = MaterialData::new(MaterialTypes::PHONG, vec![]).unwrap();
        assert_eq!(
            material.attribute::<f32>("Roughness").unwrap_err(),
            MaterialError::AttributeNotFound {
                layer: 0,
                name: "Roughness".to_string(),
            }
        );
        assert_eq!(
            material.layer_id("ClearCoat").unwrap_err(),
            MaterialError::LayerNotFound {
                name: "ClearCoat".to_string(),
            }
        );
    }

    #[test]
    fn alpha_modes() {
        let opaque = MaterialData::new(MaterialTypes::PHONG, vec![]).unwrap();
        assert_eq!(opaque.alpha_mode().unwrap(), AlphaMode::Opaque);
        assert_eq!(opaque.alpha_mask().unwrap(), 0.5);

        let masked = MaterialData::new(
            MaterialTypes::PHONG,
            vec![MaterialAttributeData::known(MaterialAttribute::AlphaMask, &0.25f32).unwrap()],
        )
        .unwrap();
        assert_eq!(masked.alpha_mode().unwrap(), AlphaMode::Mask);
        assert_eq!(masked.alpha_mask().unwrap(), 0.25);

        let blended = MaterialData::new(
            MaterialTypes::PHONG,
            vec![
                MaterialAttributeData::known(MaterialAttribute::AlphaBlend, &true).unwrap(),
                MaterialAttributeData::known(MaterialAttribute::AlphaMask, &0.25f32).unwrap(),
            ],
        )
        .unwrap();
        assert_eq!(blended.alpha_mode().unwrap(), AlphaMode::Blend);
    }

    #[test]
    fn double_sided_default() {
        let material = MaterialData::new(MaterialTypes::PHONG, vec![]).unwrap();
        assert!(!material.is_double_sided().unwrap());
    }

    #[test]
    fn string_attributes() {
        let material = MaterialData::new(
            MaterialTypes::FLAT,
            vec![MaterialAttributeData::string("Source", "cube.gltf").unwrap()],
        )
        .unwrap();
        assert_eq!(material.attribute_string("Source").unwrap(), "cube.gltf");
    }

    #[test]
    fn release_attribute_data_empties_the_material() {
        let mut material = MaterialData::with_layers(
            MaterialTypes::PHONG,
            vec![shininess(80.0)],
            vec![1, 1],
        )
        .unwrap();
        let released = material.release_attribute_data();
        assert_eq!(released.as_slice().len(), 1);
        assert_eq!(material.attribute_count(), 0);
        // Layers reset along with the records they partitioned
        assert_eq!(material.layer_count(), 1);
    }

    #[test]
    fn release_layer_data_keeps_the_base_layer() {
        let mut material = MaterialData::with_layers(
            MaterialTypes::PHONG,
            vec![
                shininess(80.0),
                MaterialAttributeData::string(" LayerName", "ClearCoat").unwrap(),
            ],
            vec![1, 2],
        )
        .unwrap();
        let released = material.release_layer_data();
        assert_eq!(released.as_slice(), &[1, 2]);
        // All records now sit in one base layer
        assert_eq!(material.layer_count(), 1);
        assert_eq!(material.attribute_count(), 2);
    }

    #[test]
    fn importer_state_passthrough() {
        let state: Arc<dyn Any + Send + Sync> = Arc::new("importer".to_string());
        let material = MaterialData::new(MaterialTypes::FLAT, vec![])
            .unwrap()
            .with_importer_state(Arc::clone(&state));
        let stored = material.importer_state().unwrap();
        assert_eq!(stored.downcast_ref::<String>().map(String::as_str), Some("importer"));
    }
}
