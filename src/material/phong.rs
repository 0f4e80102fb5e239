//! Phong shading view over a material.
//!
//! [`PhongMaterial`] reads the Phong attribute set out of a
//! [`MaterialData`], substituting the conventional defaults for absent
//! attributes: black ambient (white when ambient-textured), white diffuse
//! and specular, shininess 80. Texture transformation and coordinate-set
//! lookups fall back from the per-texture attribute to the material-wide
//! one to the identity, matching how importers emit them.

use crate::error::MaterialError;
use crate::math::{Mat3, Vec4};

use super::data::MaterialData;
use super::types::{MaterialAttribute, MaterialTypes};

impl<'a> MaterialData<'a> {
    /// View this material through the Phong attribute set.
    ///
    /// `None` when the material does not declare
    /// [`MaterialTypes::PHONG`].
    pub fn as_phong(&self) -> Option<PhongMaterial<'_, 'a>> {
        if !self.types().contains(MaterialTypes::PHONG) {
            return None;
        }
        Some(PhongMaterial { material: self })
    }
}

/// Read-only Phong view of a [`MaterialData`].
#[derive(Debug, Clone, Copy)]
pub struct PhongMaterial<'m, 'a> {
    material: &'m MaterialData<'a>,
}

impl<'m, 'a> PhongMaterial<'m, 'a> {
    /// The underlying material.
    pub fn material(&self) -> &'m MaterialData<'a> {
        self.material
    }

    /// Ambient color. Defaults to opaque black, or opaque white when an
    /// ambient texture is present so the texture alone drives the term.
    pub fn ambient_color(&self) -> Result<Vec4, MaterialError> {
        let default = if self.material.has_attribute(MaterialAttribute::AmbientTexture) {
            Vec4::new(1.0, 1.0, 1.0, 1.0)
        } else {
            Vec4::new(0.0, 0.0, 0.0, 1.0)
        };
        self.material.attribute_or(MaterialAttribute::AmbientColor, default)
    }

    /// Diffuse color. Defaults to opaque white.
    pub fn diffuse_color(&self) -> Result<Vec4, MaterialError> {
        self.material
            .attribute_or(MaterialAttribute::DiffuseColor, Vec4::new(1.0, 1.0, 1.0, 1.0))
    }

    /// Specular color. Defaults to opaque white.
    pub fn specular_color(&self) -> Result<Vec4, MaterialError> {
        self.material
            .attribute_or(MaterialAttribute::SpecularColor, Vec4::new(1.0, 1.0, 1.0, 1.0))
    }

    /// Specular exponent. Defaults to 80.
    pub fn shininess(&self) -> Result<f32, MaterialError> {
        self.material.attribute_or(MaterialAttribute::Shininess, 80.0)
    }

    /// Id of the ambient texture, if present.
    pub fn ambient_texture(&self) -> Result<Option<u32>, MaterialError> {
        self.material.try_attribute(MaterialAttribute::AmbientTexture)
    }

    /// Id of the diffuse texture, if present.
    pub fn diffuse_texture(&self) -> Result<Option<u32>, MaterialError> {
        self.material.try_attribute(MaterialAttribute::DiffuseTexture)
    }

    /// Id of the specular texture, if present.
    pub fn specular_texture(&self) -> Result<Option<u32>, MaterialError> {
        self.material.try_attribute(MaterialAttribute::SpecularTexture)
    }

    /// Id of the normal map texture, if present.
    pub fn normal_texture(&self) -> Result<Option<u32>, MaterialError> {
        self.material.try_attribute(MaterialAttribute::NormalTexture)
    }

    /// Scale of the normal map texture. Defaults to 1.
    pub fn normal_texture_scale(&self) -> Result<f32, MaterialError> {
        self.material.attribute_or(MaterialAttribute::NormalTextureScale, 1.0)
    }

    /// Coordinate transformation of the ambient texture.
    pub fn ambient_texture_matrix(&self) -> Result<Mat3, MaterialError> {
        self.texture_matrix(MaterialAttribute::AmbientTextureMatrix)
    }

    /// Coordinate transformation of the diffuse texture.
    pub fn diffuse_texture_matrix(&self) -> Result<Mat3, MaterialError> {
        self.texture_matrix(MaterialAttribute::DiffuseTextureMatrix)
    }

    /// Coordinate transformation of the specular texture.
    pub fn specular_texture_matrix(&self) -> Result<Mat3, MaterialError> {
        self.texture_matrix(MaterialAttribute::SpecularTextureMatrix)
    }

    /// Coordinate transformation of the normal map texture.
    pub fn normal_texture_matrix(&self) -> Result<Mat3, MaterialError> {
        self.texture_matrix(MaterialAttribute::NormalTextureMatrix)
    }

    /// Coordinate set of the ambient texture.
    pub fn ambient_texture_coordinates(&self) -> Result<u32, MaterialError> {
        self.texture_coordinates(MaterialAttribute::AmbientTextureCoordinates)
    }

    /// Coordinate set of the diffuse texture.
    pub fn diffuse_texture_coordinates(&self) -> Result<u32, MaterialError> {
        self.texture_coordinates(MaterialAttribute::DiffuseTextureCoordinates)
    }

    /// Coordinate set of the specular texture.
    pub fn specular_texture_coordinates(&self) -> Result<u32, MaterialError> {
        self.texture_coordinates(MaterialAttribute::SpecularTextureCoordinates)
    }

    /// Coordinate set of the normal map texture.
    pub fn normal_texture_coordinates(&self) -> Result<u32, MaterialError> {
        self.texture_coordinates(MaterialAttribute::NormalTextureCoordinates)
    }

    /// The texture matrix shared by all present textures, or `None` when
    /// they disagree. With no textures, the material-wide matrix.
    pub fn common_texture_matrix(&self) -> Result<Option<Mat3>, MaterialError> {
        let mut common: Option<Mat3> = None;
        for attribute in self.present_texture_matrices()? {
            let matrix = self.texture_matrix(attribute)?;
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
        for attribute in self.present_texture_coordinates()? {
            let coordinates = self.texture_coordinates(attribute)?;
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

    fn present_texture_matrices(&self) -> Result<Vec<MaterialAttribute>, MaterialError> {
        Ok(self
            .present_textures()?
            .into_iter()
            .map(|texture| match texture {
                MaterialAttribute::AmbientTexture => MaterialAttribute::AmbientTextureMatrix,
                MaterialAttribute::SpecularTexture => MaterialAttribute::SpecularTextureMatrix,
                MaterialAttribute::NormalTexture => MaterialAttribute::NormalTextureMatrix,
                _ => MaterialAttribute::DiffuseTextureMatrix,
            })
            .collect())
    }

    fn present_texture_coordinates(&self) -> Result<Vec<MaterialAttribute>, MaterialError> {
        Ok(self
            .present_textures()?
            .into_iter()
            .map(|texture| match texture {
                MaterialAttribute::AmbientTexture => MaterialAttribute::AmbientTextureCoordinates,
                MaterialAttribute::SpecularTexture => MaterialAttribute::SpecularTextureCoordinates,
                MaterialAttribute::NormalTexture => MaterialAttribute::NormalTextureCoordinates,
                _ => MaterialAttribute::DiffuseTextureCoordinates,
            })
            .collect())
    }

    fn present_textures(&self) -> Result<Vec<MaterialAttribute>, MaterialError> {
        let mut present = Vec::new();
        for texture in [
            MaterialAttribute::AmbientTexture,
            MaterialAttribute::DiffuseTexture,
            MaterialAttribute::SpecularTexture,
            MaterialAttribute::NormalTexture,
        ] {
            if self.material.has_attribute(texture) {
                present.push(texture);
            }
        }
        Ok(present)
    }
}
