pub mod intersect_3d;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance used when testing whether a hit lies inside a bounded face.
///
/// Model coordinates are in feet, so this is far below any modeled detail.
pub const FACE_TOLERANCE: f64 = 1e-7;
