//! Material attribute names, value types and material classification.
//!
//! [`MaterialAttribute`] is the vocabulary of known attribute names. Each
//! known name is bound to one [`MaterialAttributeType`]; record construction
//! rejects any other pairing. Custom names are free-form strings and carry
//! any type.
//!
//! Discriminants start at 1; zero is reserved for "invalid" in the
//! serialized vocabulary shared with producers.

use std::mem;

use static_assertions::assert_eq_size;

use crate::math::{
    Mat2, Mat2x3, Mat2x4, Mat3, Mat3x2, Mat3x4, Mat4x2, Mat4x3, Vec2, Vec2i, Vec2u, Vec3, Vec3i,
    Vec3u, Vec4, Vec4i, Vec4u,
};

bitflags::bitflags! {
    /// Shading models a material supports.
    ///
    /// A single material can satisfy several models at once, a Phong
    /// material with a base color also works as flat-shaded.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MaterialTypes: u32 {
        /// Flat shading, only a color or a single texture is used.
        const FLAT = 1 << 0;
        /// Phong shading.
        const PHONG = 1 << 1;
        /// PBR with a metallic/roughness workflow.
        const PBR_METALLIC_ROUGHNESS = 1 << 2;
        /// PBR with a specular/glossiness workflow.
        const PBR_SPECULAR_GLOSSINESS = 1 << 3;
        /// A clear coat layer on top of the base model.
        const PBR_CLEAR_COAT = 1 << 4;
    }
}

/// How alpha is interpreted when rendering the material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlphaMode {
    /// Alpha is ignored.
    #[default]
    Opaque,
    /// Fragments below the alpha mask threshold are discarded.
    Mask,
    /// Alpha is used for blending.
    Blend,
}

/// Type of a material attribute value.
///
/// No 4x4 matrix: together with a name it could not fit a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MaterialAttributeType {
    /// `bool`.
    Bool = 1,
    /// `f32`.
    Float,
    /// `i32`.
    Int,
    /// `u32`.
    UnsignedInt,
    /// `i64`.
    Long,
    /// `u64`.
    UnsignedLong,
    /// [`Vec2`].
    Vector2,
    /// [`Vec3`].
    Vector3,
    /// [`Vec4`].
    Vector4,
    /// [`Vec2i`].
    Vector2i,
    /// [`Vec3i`].
    Vector3i,
    /// [`Vec4i`].
    Vector4i,
    /// [`Vec2u`].
    Vector2u,
    /// [`Vec3u`].
    Vector3u,
    /// [`Vec4u`].
    Vector4u,
    /// [`Mat2`].
    Matrix2,
    /// [`Mat2x3`].
    Matrix2x3,
    /// [`Mat2x4`].
    Matrix2x4,
    /// [`Mat3x2`].
    Matrix3x2,
    /// [`Mat3`].
    Matrix3,
    /// [`Mat3x4`].
    Matrix3x4,
    /// [`Mat4x2`].
    Matrix4x2,
    /// [`Mat4x3`].
    Matrix4x3,
    /// `*const ()`, an opaque pointer passed through unmodified.
    Pointer,
    /// `*mut ()`, an opaque mutable pointer passed through unmodified.
    MutablePointer,
    /// [`TextureSwizzle`].
    TextureSwizzle,
    /// A UTF-8 string, stored inline or borrowed.
    String,
}

impl MaterialAttributeType {
    /// Size in bytes of one inline value of this type.
    ///
    /// `None` for strings, which are variable-sized.
    pub fn size(&self) -> Option<usize> {
        match self {
            Self::Bool => Some(1),
            Self::Float | Self::Int | Self::UnsignedInt | Self::TextureSwizzle => Some(4),
            Self::Long
            | Self::UnsignedLong
            | Self::Vector2
            | Self::Vector2i
            | Self::Vector2u => Some(8),
            Self::Vector3 | Self::Vector3i | Self::Vector3u => Some(12),
            Self::Vector4 | Self::Vector4i | Self::Vector4u | Self::Matrix2 => Some(16),
            Self::Matrix2x3 | Self::Matrix3x2 => Some(24),
            Self::Matrix2x4 | Self::Matrix4x2 => Some(32),
            Self::Matrix3 => Some(36),
            Self::Matrix3x4 | Self::Matrix4x3 => Some(48),
            Self::Pointer | Self::MutablePointer => Some(mem::size_of::<usize>()),
            Self::String => None,
        }
    }
}

/// Which texture channels an attribute is sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum TextureSwizzle {
    /// Red channel.
    #[default]
    R = 1,
    /// Green channel.
    G,
    /// Blue channel.
    B,
    /// Alpha channel.
    A,
    /// Red and green channels.
    RG,
    /// Green and blue channels.
    GB,
    /// Blue and alpha channels.
    BA,
    /// Red, green and blue channels.
    RGB,
    /// Green, blue and alpha channels.
    GBA,
    /// All four channels.
    RGBA,
}

assert_eq_size!(TextureSwizzle, u32);

impl TextureSwizzle {
    pub(crate) fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Self::R),
            2 => Some(Self::G),
            3 => Some(Self::B),
            4 => Some(Self::A),
            5 => Some(Self::RG),
            6 => Some(Self::GB),
            7 => Some(Self::BA),
            8 => Some(Self::RGB),
            9 => Some(Self::GBA),
            10 => Some(Self::RGBA),
            _ => None,
        }
    }
}

macro_rules! material_attributes {
    ($($(#[$doc:meta])* $variant:ident => $name:literal, $ty:ident;)*) => {
        /// Known material attribute names.
        ///
        /// Each name is bound to an expected [`MaterialAttributeType`];
        /// records with a known name and a different type are rejected at
        /// construction.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum MaterialAttribute {
            $($(#[$doc])* $variant,)*
        }

        impl MaterialAttribute {
            /// The string form used for storage and lookup.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// The type this name is bound to.
            pub fn expected_type(&self) -> MaterialAttributeType {
                match self {
                    $(Self::$variant => MaterialAttributeType::$ty,)*
                }
            }

            /// Look up a known name by its string form.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

material_attributes! {
    /// Name of a material layer. The leading space in the string form sorts
    /// it before every valid attribute name, making it the first record of
    /// its layer.
    LayerName => " LayerName", String;
    /// Overall strength of a layer's effect.
    LayerFactor => "LayerFactor", Float;
    /// Id of the texture modulating a layer's factor.
    LayerFactorTexture => "LayerFactorTexture", UnsignedInt;
    /// Channel of the layer factor texture.
    LayerFactorTextureSwizzle => "LayerFactorTextureSwizzle", TextureSwizzle;
    /// Whether the material is rendered on both faces.
    DoubleSided => "DoubleSided", Bool;
    /// Whether alpha blending is enabled.
    AlphaBlend => "AlphaBlend", Bool;
    /// Alpha cutoff threshold for masked rendering.
    AlphaMask => "AlphaMask", Float;
    /// Ambient color for Phong shading.
    AmbientColor => "AmbientColor", Vector4;
    /// Id of the ambient texture.
    AmbientTexture => "AmbientTexture", UnsignedInt;
    /// Transformation of the ambient texture coordinates.
    AmbientTextureMatrix => "AmbientTextureMatrix", Matrix3;
    /// Texture coordinate set of the ambient texture.
    AmbientTextureCoordinates => "AmbientTextureCoordinates", UnsignedInt;
    /// Diffuse color for Phong shading.
    DiffuseColor => "DiffuseColor", Vector4;
    /// Id of the diffuse texture.
    DiffuseTexture => "DiffuseTexture", UnsignedInt;
    /// Transformation of the diffuse texture coordinates.
    DiffuseTextureMatrix => "DiffuseTextureMatrix", Matrix3;
    /// Texture coordinate set of the diffuse texture.
    DiffuseTextureCoordinates => "DiffuseTextureCoordinates", UnsignedInt;
    /// Specular color for Phong shading.
    SpecularColor => "SpecularColor", Vector4;
    /// Id of the specular texture.
    SpecularTexture => "SpecularTexture", UnsignedInt;
    /// Transformation of the specular texture coordinates.
    SpecularTextureMatrix => "SpecularTextureMatrix", Matrix3;
    /// Texture coordinate set of the specular texture.
    SpecularTextureCoordinates => "SpecularTextureCoordinates", UnsignedInt;
    /// Specular exponent for Phong shading.
    Shininess => "Shininess", Float;
    /// Id of the tangent-space normal map texture.
    NormalTexture => "NormalTexture", UnsignedInt;
    /// Scale applied to the normal texture.
    NormalTextureScale => "NormalTextureScale", Float;
    /// Transformation of the normal texture coordinates.
    NormalTextureMatrix => "NormalTextureMatrix", Matrix3;
    /// Texture coordinate set of the normal texture.
    NormalTextureCoordinates => "NormalTextureCoordinates", UnsignedInt;
    /// Base color for PBR shading.
    BaseColor => "BaseColor", Vector4;
    /// Id of the base color texture.
    BaseColorTexture => "BaseColorTexture", UnsignedInt;
    /// Transformation of the base color texture coordinates.
    BaseColorTextureMatrix => "BaseColorTextureMatrix", Matrix3;
    /// Texture coordinate set of the base color texture.
    BaseColorTextureCoordinates => "BaseColorTextureCoordinates", UnsignedInt;
    /// Metalness factor for the metallic/roughness workflow.
    Metalness => "Metalness", Float;
    /// Id of the metalness texture.
    MetalnessTexture => "MetalnessTexture", UnsignedInt;
    /// Channel of the metalness texture.
    MetalnessTextureSwizzle => "MetalnessTextureSwizzle", TextureSwizzle;
    /// Transformation of the metalness texture coordinates.
    MetalnessTextureMatrix => "MetalnessTextureMatrix", Matrix3;
    /// Texture coordinate set of the metalness texture.
    MetalnessTextureCoordinates => "MetalnessTextureCoordinates", UnsignedInt;
    /// Roughness factor for the metallic/roughness workflow.
    Roughness => "Roughness", Float;
    /// Id of the roughness texture.
    RoughnessTexture => "RoughnessTexture", UnsignedInt;
    /// Channel of the roughness texture.
    RoughnessTextureSwizzle => "RoughnessTextureSwizzle", TextureSwizzle;
    /// Transformation of the roughness texture coordinates.
    RoughnessTextureMatrix => "RoughnessTextureMatrix", Matrix3;
    /// Texture coordinate set of the roughness texture.
    RoughnessTextureCoordinates => "RoughnessTextureCoordinates", UnsignedInt;
    /// Emissive color.
    EmissiveColor => "EmissiveColor", Vector3;
    /// Transformation applied to all texture coordinates, unless overridden
    /// per texture.
    TextureMatrix => "TextureMatrix", Matrix3;
    /// Texture coordinate set of all textures, unless overridden per texture.
    TextureCoordinates => "TextureCoordinates", UnsignedInt;
}

/// Maps a static value type to its [`MaterialAttributeType`] tag and its
/// inline byte representation.
pub trait AttributeValue: Sized {
    /// The tag describing this type.
    const TYPE: MaterialAttributeType;

    /// Serialize into `out`, which is exactly `TYPE.size()` bytes.
    fn write(&self, out: &mut [u8]);

    /// Deserialize from `bytes`, which is exactly `TYPE.size()` bytes.
    fn read(bytes: &[u8]) -> Self;
}

macro_rules! pod_attribute_value {
    ($($ty:ty => $tag:ident,)*) => {$(
        impl AttributeValue for $ty {
            const TYPE: MaterialAttributeType = MaterialAttributeType::$tag;

            fn write(&self, out: &mut [u8]) {
                out.copy_from_slice(bytemuck::bytes_of(self));
            }

            fn read(bytes: &[u8]) -> Self {
                bytemuck::pod_read_unaligned(bytes)
            }
        }
    )*}
}

pod_attribute_value! {
    f32 => Float,
    i32 => Int,
    u32 => UnsignedInt,
    i64 => Long,
    u64 => UnsignedLong,
    Vec2 => Vector2,
    Vec3 => Vector3,
    Vec4 => Vector4,
    Vec2i => Vector2i,
    Vec3i => Vector3i,
    Vec4i => Vector4i,
    Vec2u => Vector2u,
    Vec3u => Vector3u,
    Vec4u => Vector4u,
    Mat2 => Matrix2,
    Mat2x3 => Matrix2x3,
    Mat2x4 => Matrix2x4,
    Mat3x2 => Matrix3x2,
    Mat3 => Matrix3,
    Mat3x4 => Matrix3x4,
    Mat4x2 => Matrix4x2,
    Mat4x3 => Matrix4x3,
}

impl AttributeValue for bool {
    const TYPE: MaterialAttributeType = MaterialAttributeType::Bool;

    fn write(&self, out: &mut [u8]) {
        out[0] = *self as u8;
    }

    fn read(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

impl AttributeValue for TextureSwizzle {
    const TYPE: MaterialAttributeType = MaterialAttributeType::TextureSwizzle;

    fn write(&self, out: &mut [u8]) {
        out.copy_from_slice(&(*self as u32).to_ne_bytes());
    }

    fn read(bytes: &[u8]) -> Self {
        let raw = u32::from_ne_bytes(bytes.try_into().unwrap_or_default());
        Self::from_raw(raw).unwrap_or_default()
    }
}

impl AttributeValue for *const () {
    const TYPE: MaterialAttributeType = MaterialAttributeType::Pointer;

    fn write(&self, out: &mut [u8]) {
        out.copy_from_slice(&(*self as usize).to_ne_bytes());
    }

    fn read(bytes: &[u8]) -> Self {
        usize::from_ne_bytes(bytes.try_into().unwrap_or_default()) as *const ()
    }
}

impl AttributeValue for *mut () {
    const TYPE: MaterialAttributeType = MaterialAttributeType::MutablePointer;

    fn write(&self, out: &mut [u8]) {
        out.copy_from_slice(&(*self as usize).to_ne_bytes());
    }

    fn read(bytes: &[u8]) -> Self {
        usize::from_ne_bytes(bytes.try_into().unwrap_or_default()) as *mut ()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_sizes() {
        assert_eq!(MaterialAttributeType::Bool.size(), Some(1));
        assert_eq!(MaterialAttributeType::Float.size(), Some(4));
        assert_eq!(MaterialAttributeType::UnsignedLong.size(), Some(8));
        assert_eq!(MaterialAttributeType::Vector4.size(), Some(16));
        assert_eq!(MaterialAttributeType::Matrix3.size(), Some(36));
        assert_eq!(MaterialAttributeType::Matrix3x4.size(), Some(48));
        assert_eq!(MaterialAttributeType::String.size(), None);
    }

    #[test]
    fn known_name_round_trip() {
        for attribute in [
            MaterialAttribute::LayerName,
            MaterialAttribute::DiffuseColor,
            MaterialAttribute::Shininess,
            MaterialAttribute::TextureCoordinates,
        ] {
            assert_eq!(MaterialAttribute::from_name(attribute.name()), Some(attribute));
        }
        assert_eq!(MaterialAttribute::from_name("NoSuchName"), None);
    }

    #[test]
    fn layer_name_sorts_first() {
        // The leading space keeps the layer name ahead of every attribute
        assert!(MaterialAttribute::LayerName.name() < MaterialAttribute::AlphaBlend.name());
        assert!(MaterialAttribute::LayerName.name() < "a");
    }

    #[test]
    fn known_name_types() {
        assert_eq!(
            MaterialAttribute::DiffuseColor.expected_type(),
            MaterialAttributeType::Vector4
        );
        assert_eq!(
            MaterialAttribute::DoubleSided.expected_type(),
            MaterialAttributeType::Bool
        );
        assert_eq!(
            MaterialAttribute::LayerName.expected_type(),
            MaterialAttributeType::String
        );
    }

    #[test]
    fn value_codec_round_trip() {
        let mut buffer = [0u8; 36];

        true.write(&mut buffer[..1]);
        assert!(bool::read(&buffer[..1]));

        80.0f32.write(&mut buffer[..4]);
        assert_eq!(f32::read(&buffer[..4]), 80.0);

        let v = Vec4::new(0.1, 0.2, 0.3, 1.0);
        v.write(&mut buffer[..16]);
        assert_eq!(Vec4::read(&buffer[..16]), v);

        TextureSwizzle::GB.write(&mut buffer[..4]);
        assert_eq!(TextureSwizzle::read(&buffer[..4]), TextureSwizzle::GB);
    }

    #[test]
    fn pointer_round_trip() {
        let value = 42u32;
        let pointer = &value as *const u32 as *const ();
        let mut buffer = [0u8; mem::size_of::<usize>()];
        pointer.write(&mut buffer);
        // UFCS: a bare `<*const ()>::read` would hit the inherent ptr method
        assert_eq!(<*const () as AttributeValue>::read(&buffer), pointer);
    }
}
