//! Guarded vector arithmetic.
//!
//! Plain arithmetic (`+`, `-`, `* s`, `dot`, `cross`, `norm`) comes straight
//! from nalgebra. The operations here differ from nalgebra only where a zero
//! divisor would otherwise produce NaNs: they return the zero vector instead.

use crate::float_types::Real;
use nalgebra::Vector3;

/// Zero-guarded operations on [`Vector3<Real>`].
pub trait VectorExt {
    /// Divide every component by `divisor`; an exact zero divisor yields the zero vector.
    fn divided_by(&self, divisor: Real) -> Self;

    /// Unit vector in the same direction; a zero-length vector stays zero.
    fn unit(&self) -> Self;

    /// Linear interpolation `self + (other - self) * t`.
    fn lerp_to(&self, other: &Self, t: Real) -> Self;
}

impl VectorExt for Vector3<Real> {
    #[inline]
    fn divided_by(&self, divisor: Real) -> Self {
        if divisor == 0.0 {
            Vector3::zeros()
        } else {
            self / divisor
        }
    }

    #[inline]
    fn unit(&self) -> Self {
        self.divided_by(self.norm())
    }

    #[inline]
    fn lerp_to(&self, other: &Self, t: Real) -> Self {
        self + (other - self) * t
    }
}
