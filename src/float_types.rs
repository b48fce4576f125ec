// Re-export parry for the f64 scalar size
pub use parry3d_f64 as parry3d;

/// Scalar type used for every coordinate in the crate.
pub type Real = f64;

/// Tolerance used by [`Plane::orient_point`](crate::mesh::plane::Plane::orient_point)
/// to decide whether a point lies on a plane.
///
/// Points whose signed distance is within `±EPSILON` are `COPLANAR`.
pub const EPSILON: Real = 1e-5;

// Pi
/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;

// Tau
/// The full circle constant (τ)
pub const TAU: Real = core::f64::consts::TAU;
