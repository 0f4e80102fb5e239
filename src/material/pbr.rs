//! Metallic/roughness PBR view over a material.
//!
//! [`PbrMetallicRoughnessMaterial`] reads the metallic/roughness attribute
//! set out of a [`MaterialData`] with the conventional defaults: white base
//! color, metalness and roughness both 1, red-channel swizzles for the
//! factor textures. Texture transformation and coordinate-set lookups use
//! the same per-texture, material-wide, identity fallback chain as the
//! Phong view.

use crate::error::MaterialError;
use crate::math::{Mat3, Vec4};

use super::data::MaterialData;
use super::types::{MaterialAttribute, MaterialTypes, TextureSwizzle};

impl<'a> MaterialData<'a> {
    /// View this material through the metallic/roughness attribute set.
    ///
    /// `None` when the material does not declare
    /// [`MaterialTypes::PBR_METALLIC_ROUGHNESS`].
    pub fn as_pbr_metallic_roughness(&self) -> Option<PbrMetallicRoughnessMaterial<'_, 'a>> {
        if !self.types().contains(MaterialTypes::PBR_METALLIC_ROUGHNESS) {
            return None;
        }
        Some(PbrMetallicRoughnessMaterial { material: self })
    }
}

/// Read-only metallic/roughness view of a [`MaterialData`].
#[derive(Debug, Clone, Copy)]
pub struct PbrMetallicRoughnessMaterial<'m, 'a> {
    material: &'m MaterialData<'a>,
}

impl<'m, 'a> PbrMetallicRoughnessMaterial<'m, 'a> {
    /// The underlying material.
    pub fn material(&self) -> &'m MaterialData<'a> {
        self.material
    }

    /// Base color. Defaults to opaque white.
    pub fn base_color(&self) -> Result<Vec4, MaterialError> {
        self.material
            .attribute_or(MaterialAttribute::BaseColor, Vec4::new(1.0, 1.0, 1.0, 1.0))
    }

    /// Metalness factor. Defaults to 1.
    pub fn metalness(&self) -> Result<f32, MaterialError> {
        self.material.attribute_or(MaterialAttribute::Metalness, 1.0)
    }

    /// Roughness factor. Defaults to 1.
    pub fn roughness(&self) -> Result<f32, MaterialError> {
        self.material.attribute_or(MaterialAttribute::Roughness, 1.0)
    }

    /// Id of the base color texture, if present.
    pub fn base_color_texture(&self) -> Result<Option<u32>, MaterialError> {
        self.material.try_attribute(MaterialAttribute::BaseColorTexture)
    }

    /// Id of the metalness texture, if present.
    pub fn metalness_texture(&self) -> Result<Option<u32>, MaterialError> {
        self.material.try_attribute(MaterialAttribute::MetalnessTexture)
    }

    /// Id of the roughness texture, if present.
    pub fn roughness_texture(&self) -> Result<Option<u32>, MaterialError> {
        self.material.try_attribute(MaterialAttribute::RoughnessTexture)
    }

    /// Id of the normal map texture, if present.
    pub fn normal_texture(&self) -> Result<Option<u32>, MaterialError> {
        self.material.try_attribute(MaterialAttribute::NormalTexture)
    }

    /// Scale of the normal map texture. Defaults to 1.
    pub fn normal_texture_scale(&self) -> Result<f32, MaterialError> {
        self.material.attribute_or(MaterialAttribute::NormalTextureScale, 1.0)
    }

    /// Channel the metalness factor is sourced from. Defaults to red.
    pub fn metalness_texture_swizzle(&self) -> Result<TextureSwizzle, MaterialError> {
        self.material
            .attribute_or(MaterialAttribute::MetalnessTextureSwizzle, TextureSwizzle::R)
    }

    /// Channel the roughness factor is sourced from. Defaults to red.
    pub fn roughness_texture_swizzle(&self) -> Result<TextureSwizzle, MaterialError> {
        self.material
            .attribute_or(MaterialAttribute::RoughnessTextureSwizzle, TextureSwizzle::R)
    }

    /// Coordinate transformation of the base color texture.
    pub fn base_color_texture_matrix(&self) -> Result<Mat3, MaterialError> {
        self.texture_matrix(MaterialAttribute::BaseColorTextureMatrix)
    }

    /// Coordinate transformation of the metalness texture.
    pub fn metalness_texture_matrix(&self) -> Result<Mat3, MaterialError> {
        self.texture_matrix(MaterialAttribute::MetalnessTextureMatrix)
    }

    /// Coordinate transformation of the roughness texture.
    pub fn roughness_texture_matrix(&self) -> Result<Mat3, MaterialError> {
        self.texture_matrix(MaterialAttribute::RoughnessTextureMatrix)
    }

    /// Coordinate transformation of the normal map texture.
    pub fn normal_texture_matrix(&self) -> Result<Mat3, MaterialError> {
        self.texture_matrix(MaterialAttribute::NormalTextureMatrix)
    }

    /// Coordinate set of the base color texture.
    pub fn base_color_texture_coordinates(&self) -> Result<u32, MaterialError> {
        self.texture_coordinates(MaterialAttribute::BaseColorTextureCoordinates)
    }

    /// Coordinate set of the metalness texture.
    pub fn metalness_texture_coordinates(&self) -> Result<u32, MaterialError> {
        self.texture_coordinates(MaterialAttribute::MetalnessTextureCoordinates)
    }

    /// Coordinate set of the roughness texture.
    pub fn roughness_texture_coordinates(&self) -> Result<u32, MaterialError> {
        self.texture_coordinates(MaterialAttribute::RoughnessTextureCoordinates)
    }

    /// Coordinate set of the normal map texture.
    pub fn normal_texture_coordinates(&self) -> Result<u32, MaterialError> {
        self.texture_coordinates(MaterialAttribute::NormalTextureCoordinates)
    }

    /// The texture matrix shared by all present textures, or `None` when
    /// they disagree. With no textures, the material-wide matrix.
    pub fn common_texture_matrix(&self) -> Result<Option<Mat3>, MaterialError> {
        let mut common: Option<Mat3> = None;
        for (_, matrix_attribute, _) in self.present_textures()? {
            let matrix = self.texture_matrix(matrix_attribute)?;
            match common {
                None => common = Some(matrix),
                Some(previous) if previous != matrix => return Ok(None),
                Some(_) => {}
            }
        }
        match common {
            Some(matrix) => Ok(Some(matrix)),
            None => self
                .material
                .attribute_or(MaterialAttribute::TextureMatrix, Mat3::identity())
                .map(Some),
        }
    }

    /// The coordinate set shared by all present textures, or `None` when
    /// they disagree. With no textures, the material-wide set.
    pub fn common_texture_coordinates(&self) -> Result<Option<u32>, MaterialError> {
        let mut common: Option<u32> = None;
        for (_, _, coordinates_attribute) in self.present_textures()? {
            let coordinates = self.texture_coordinates(coordinates_attribute)?;
            match common {
                None => common = Some(coordinates),
                Some(previous) if previous != coordinates => return Ok(None),
                Some(_) => {}
            }
        }
        match common {
            Some(coordinates) => Ok(Some(coordinates)),
            None => self
                .material
                .attribute_or(MaterialAttribute::TextureCoordinates, 0u32)
                .map(Some),
        }
    }

    fn texture_matrix(&self, attribute: MaterialAttribute) -> Result<Mat3, MaterialError> {
        if let Some(matrix) = self.material.try_attribute(attribute)? {
            return Ok(matrix);
        }
        self.material
            .attribute_or(MaterialAttribute::TextureMatrix, Mat3::identity())
    }

    fn texture_coordinates(&self, attribute: MaterialAttribute) -> Result<u32, MaterialError> {
        if let Some(set) = self.material.try_attribute(attribute)? {
            return Ok(set);
        }
        self.material.attribute_or(MaterialAttribute::TextureCoordinates, 0u32)
    }

    /// Present textures as (texture, matrix, coordinate-set) name triples.
    fn present_textures(
        &self,
    ) -> Result<Vec<(MaterialAttribute, MaterialAttribute, MaterialAttribute)>, MaterialError>
    {
        let slots = [
            (
                MaterialAttribute::BaseColorTexture,
                MaterialAttribute::BaseColorTextureMatrix,
                MaterialAttribute::BaseColorTextureCoordinates,
            ),
            (
                MaterialAttribute::MetalnessTexture,
                MaterialAttribute::MetalnessTextureMatrix,
                MaterialAttribute::MetalnessTextureCoordinates,
            ),
            (
                MaterialAttribute::RoughnessTexture,
                MaterialAttribute::RoughnessTextureMatrix,
                MaterialAttribute::RoughnessTextureCoordinates,
            ),
            (
                MaterialAttribute::NormalTexture,
                MaterialAttribute::NormalTextureMatrix,
                MaterialAttribute::NormalTextureCoordinates,
            ),
        ];
        Ok(slots
            .into_iter()
            .filter(|(texture, _, _)| self.material.has_attribute(*texture))
            .collect())
    }
}
