//! Math type aliases.
//!
//! All container-facing math is f32; consumers needing other precisions
//! convert at the boundary.

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32).
pub type Vec4 = nalgebra::Vector4<f32>;

/// 2D signed integer vector.
pub type Vec2i = nalgebra::Vector2<i32>;

/// 3D signed integer vector.
pub type Vec3i = nalgebra::Vector3<i32>;

/// 4D signed integer vector.
pub type Vec4i = nalgebra::Vector4<i32>;

/// 2D unsigned integer vector.
pub type Vec2u = nalgebra::Vector2<u32>;

/// 3D unsigned integer vector.
pub type Vec3u = nalgebra::Vector3<u32>;

/// 4D unsigned integer vector.
pub type Vec4u = nalgebra::Vector4<u32>;

/// 2x2 matrix (f32).
pub type Mat2 = nalgebra::Matrix2<f32>;

/// 3x3 matrix (f32).
pub type Mat3 = nalgebra::Matrix3<f32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// 2x3 matrix (f32).
pub type Mat2x3 = nalgebra::Matrix2x3<f32>;

/// 2x4 matrix (f32).
pub type Mat2x4 = nalgebra::Matrix2x4<f32>;

/// 3x2 matrix (f32).
pub type Mat3x2 = nalgebra::Matrix3x2<f32>;

/// 3x4 matrix (f32).
pub type Mat3x4 = nalgebra::Matrix3x4<f32>;

/// 4x2 matrix (f32).
pub type Mat4x2 = nalgebra::Matrix4x2<f32>;

/// 4x3 matrix (f32).
pub type Mat4x3 = nalgebra::Matrix4x3<f32>;
