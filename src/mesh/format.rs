//! Vertex and index element formats and attribute semantics.
//!
//! Formats are the runtime type tags behind the containers' type erasure: a
//! byte range plus a [`VertexFormat`] fully describes how to reinterpret the
//! range as typed values. The [`VertexFormatValue`] and [`IndexValue`] traits
//! map static Rust types to their tags so typed accessors can check the tag
//! at runtime instead of blindly reinterpreting.
//!
//! Discriminants start at 1 in every enum here; zero is reserved for
//! "invalid" in the serialized vocabulary shared with producers.

use bytemuck::Pod;

use crate::math::{Mat2, Mat3, Mat4, Vec2, Vec2i, Vec2u, Vec3, Vec3i, Vec3u, Vec4, Vec4i, Vec4u};

/// Index element format for indexed meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum IndexFormat {
    /// 8-bit unsigned indices.
    Uint8 = 1,
    /// 16-bit unsigned indices.
    Uint16,
    /// 32-bit unsigned indices.
    Uint32,
}

impl IndexFormat {
    /// Size in bytes of one index.
    pub fn size(&self) -> usize {
        match self {
            Self::Uint8 => 1,
            Self::Uint16 => 2,
            Self::Uint32 => 4,
        }
    }
}

/// Format of a vertex attribute element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VertexFormat {
    /// Single 32-bit float.
    Float = 1,
    /// Single 64-bit float.
    Double,
    /// Single 8-bit signed integer.
    Byte,
    /// Single 8-bit unsigned integer.
    UnsignedByte,
    /// Single 16-bit signed integer.
    Short,
    /// Single 16-bit unsigned integer.
    UnsignedShort,
    /// Single 32-bit signed integer.
    Int,
    /// Single 32-bit unsigned integer.
    UnsignedInt,
    /// Two 32-bit floats.
    Vector2,
    /// Three 32-bit floats.
    Vector3,
    /// Four 32-bit floats.
    Vector4,
    /// Two 32-bit signed integers.
    Vector2i,
    /// Three 32-bit signed integers.
    Vector3i,
    /// Four 32-bit signed integers.
    Vector4i,
    /// Two 32-bit unsigned integers.
    Vector2u,
    /// Three 32-bit unsigned integers.
    Vector3u,
    /// Four 32-bit unsigned integers.
    Vector4u,
    /// 2x2 float matrix.
    Matrix2,
    /// 3x3 float matrix.
    Matrix3,
    /// 4x4 float matrix.
    Matrix4,
}

impl VertexFormat {
    /// Size in bytes of one element of this format.
    pub fn size(&self) -> usize {
        match self {
            Self::Byte | Self::UnsignedByte => 1,
            Self::Short | Self::UnsignedShort => 2,
            Self::Float | Self::Int | Self::UnsignedInt => 4,
            Self::Double | Self::Vector2 | Self::Vector2i | Self::Vector2u => 8,
            Self::Vector3 | Self::Vector3i | Self::Vector3u => 12,
            Self::Vector4 | Self::Vector4i | Self::Vector4u | Self::Matrix2 => 16,
            Self::Matrix3 => 36,
            Self::Matrix4 => 64,
        }
    }
}

/// First raw value of the custom semantic range.
const CUSTOM_SEMANTIC_BASE: u8 = 128;

/// Semantic meaning of a vertex attribute.
///
/// Known semantics constrain the formats they may be stored as (see
/// [`allows`](Self::allows)); the top half of the encoding space is reserved
/// for importer-specific custom semantics of any format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexSemantic {
    /// Vertex position, [`VertexFormat::Vector2`] or [`VertexFormat::Vector3`].
    Position,
    /// Vertex normal, [`VertexFormat::Vector3`].
    Normal,
    /// Texture coordinates, [`VertexFormat::Vector2`].
    TextureCoordinates,
    /// Vertex color, [`VertexFormat::Vector3`] or [`VertexFormat::Vector4`].
    Color,
    /// Importer-specific semantic, any format. The id is limited to `0..128`.
    Custom(u8),
}

impl VertexSemantic {
    /// Raw encoded value. Custom semantics occupy `128..=255`.
    pub fn to_raw(self) -> u8 {
        match self {
            Self::Position => 1,
            Self::Normal => 2,
            Self::TextureCoordinates => 3,
            Self::Color => 4,
            Self::Custom(id) => CUSTOM_SEMANTIC_BASE + id,
        }
    }

    /// Decode a raw value. Zero and unassigned low values yield `None`.
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::Position),
            2 => Some(Self::Normal),
            3 => Some(Self::TextureCoordinates),
            4 => Some(Self::Color),
            raw if raw >= CUSTOM_SEMANTIC_BASE => Some(Self::Custom(raw - CUSTOM_SEMANTIC_BASE)),
            _ => None,
        }
    }

    /// Whether `format` is in this semantic's allowed family.
    pub fn allows(&self, format: VertexFormat) -> bool {
        match self {
            Self::Position => matches!(format, VertexFormat::Vector2 | VertexFormat::Vector3),
            Self::Normal => matches!(format, VertexFormat::Vector3),
            Self::TextureCoordinates => matches!(format, VertexFormat::Vector2),
            Self::Color => matches!(format, VertexFormat::Vector3 | VertexFormat::Vector4),
            Self::Custom(_) => true,
        }
    }
}

/// Maps a static element type to its [`VertexFormat`] tag.
pub trait VertexFormatValue: Pod {
    /// The tag describing this type.
    const FORMAT: VertexFormat;
}

macro_rules! vertex_format_value {
    ($($ty:ty => $format:ident,)*) => {$(
        impl VertexFormatValue for $ty {
            const FORMAT: VertexFormat = VertexFormat::$format;
        }
    )*}
}

vertex_format_value! {
    f32 => Float,
    f64 => Double,
    i8 => Byte,
    u8 => UnsignedByte,
    i16 => Short,
    u16 => UnsignedShort,
    i32 => Int,
    u32 => UnsignedInt,
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
    Mat3 => Matrix3,
    Mat4 => Matrix4,
}

/// Maps a static index type to its [`IndexFormat`] tag.
pub trait IndexValue: Pod {
    /// The tag describing this type.
    const FORMAT: IndexFormat;
}

impl IndexValue for u8 {
    const FORMAT: IndexFormat = IndexFormat::Uint8;
}

impl IndexValue for u16 {
    const FORMAT: IndexFormat = IndexFormat::Uint16;
}

impl IndexValue for u32 {
    const FORMAT: IndexFormat = IndexFormat::Uint32;
}
