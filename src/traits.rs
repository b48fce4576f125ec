use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::float_types::{EPSILON, Real};
use crate::mesh::plane::Plane;
use nalgebra::{Matrix3, Matrix4, Rotation3, Translation3, Vector3};

/// Boolean operations + transformations
pub trait CSG: Sized + Clone {
    fn new() -> Self;
    fn union(&self, other: &Self) -> Self;
    fn subtract(&self, other: &Self) -> Self;
    fn intersect(&self, other: &Self) -> Self;
    fn transform(&self, matrix: &Matrix4<Real>) -> Self;
    fn bounding_box(&self) -> Aabb;
    fn invalidate_bounding_box(&mut self);
    fn inverse(&self) -> Self;

    /// Symmetric difference: the parts of either solid not shared by both.
    fn xor(&self, other: &Self) -> Self {
        self.subtract(other).union(&other.subtract(self))
    }

    /// Returns a new Self translated by vector.
    fn translate_vector(&self, vector: Vector3<Real>) -> Self {
        self.transform(&Translation3::from(vector).to_homogeneous())
    }

    /// Returns a new Self translated by x, y, and z.
    fn translate(&self, x: Real, y: Real, z: Real) -> Self {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Returns a new Self translated so that its bounding-box center is at the origin.
    fn center(&self) -> Self {
        let center = self.bounding_box().center();
        self.translate_vector(-center.coords)
    }

    /// Rotates by x_deg, y_deg, z_deg, applied in that order.
    fn rotate(&self, x_deg: Real, y_deg: Real, z_deg: Real) -> Self {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), x_deg.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), y_deg.to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), z_deg.to_radians());

        let rot = rz * ry * rx;
        self.transform(&rot.to_homogeneous())
    }

    /// Scales by sx, sy, sz
    fn scale(&self, sx: Real, sy: Real, sz: Real) -> Self {
        let mat4 = Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz));
        self.transform(&mat4)
    }

    /// Reflect (mirror) about `plane`.
    ///
    /// The plane's normal need not be unit length. A reflection reverses
    /// handedness, so the result is inverted to keep faces pointing outward.
    fn mirror(&self, plane: Plane) -> Self {
        let len = plane.normal().norm();
        if len < EPSILON {
            return self.clone();
        }

        let n = plane.normal() / len;
        let offset = n * (plane.offset() / len);

        let to_origin = Translation3::from(-offset).to_homogeneous();
        let mut reflect = Matrix4::identity();
        let reflect_3 = Matrix3::identity() - 2.0 * n * n.transpose();
        reflect.fixed_view_mut::<3, 3>(0, 0).copy_from(&reflect_3);
        let back = Translation3::from(offset).to_homogeneous();

        self.transform(&(back * reflect * to_origin)).inverse()
    }
}
