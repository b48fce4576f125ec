//! Oriented splitting planes and polygon classification.

use crate::float_types::{EPSILON, Real};
use crate::mesh::polygon::Polygon;
use crate::mesh::vector::VectorExt;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};

// Classification bits. A polygon's type is the bitwise OR of its vertices' types.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// A plane in 3D space, represented by the implicit equation `normal · p = w`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// Unit normal, except for planes built from collinear points, where it is zero.
    pub normal: Vector3<Real>,
    /// Signed distance of the plane from the origin along `normal`.
    pub w: Real,
}

impl Plane {
    /// Create a plane from a normal and offset. The normal is used verbatim.
    pub const fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        Plane { normal, w }
    }

    /// Create a plane through three points.
    /// The normal follows the right-hand rule: `unit((b - a) × (c - a))`.
    ///
    /// Collinear points produce a zero normal; this is not guarded against.
    pub fn from_points(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Self {
        let normal = (b - a).cross(&(c - a)).unit();
        let w = normal.dot(&a.coords);
        Plane { normal, w }
    }

    /// Create the plane of a polygon loop from its first three vertices.
    ///
    /// # Panics
    /// Panics if fewer than three vertices are supplied.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        Self::from_points(&vertices[0].pos, &vertices[1].pos, &vertices[2].pos)
    }

    #[inline]
    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    #[inline]
    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Swap the front and back half-spaces.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Signed distance of `point` from the plane.
    #[inline]
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify a point as `FRONT`, `BACK` or `COPLANAR` within [`EPSILON`].
    #[inline]
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let t = self.signed_distance(point);
        if t < -EPSILON {
            BACK
        } else if t > EPSILON {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// Classify a whole polygon; the result is the OR of its vertex classes.
    pub fn classify_polygon(&self, polygon: &Polygon) -> i8 {
        polygon
            .vertices
            .iter()
            .fold(COPLANAR, |acc, v| acc | self.orient_point(&v.pos))
    }

    /// Splits a polygon by this plane, returning four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`.
    ///
    /// Coplanar polygons are bucketed by orientation: `coplanar_front` when the
    /// polygon's normal agrees with this plane's, `coplanar_back` otherwise.
    /// Spanning polygons are cut along the plane; fragments with fewer than
    /// three vertices are dropped. Every fragment keeps the original `shared` tag.
    #[allow(clippy::type_complexity)]
    pub fn split_polygon(
        &self,
        polygon: &Polygon,
    ) -> (Vec<Polygon>, Vec<Polygon>, Vec<Polygon>, Vec<Polygon>) {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let vcount = polygon.vertices.len();
                let mut split_front = Vec::with_capacity(vcount + 1);
                let mut split_back = Vec::with_capacity(vcount + 1);

                for i in 0..vcount {
                    let j = (i + 1) % vcount;
                    let (type_i, type_j) = (types[i], types[j]);
                    let vertex_i = &polygon.vertices[i];
                    let vertex_j = &polygon.vertices[j];

                    if type_i != BACK {
                        split_front.push(*vertex_i);
                    }
                    if type_i != FRONT {
                        split_back.push(*vertex_i);
                    }

                    // One endpoint is beyond +EPSILON and the other beyond -EPSILON,
                    // so the denominator cannot vanish.
                    if (type_i | type_j) == SPANNING {
                        let t = (self.w - self.normal.dot(&vertex_i.pos.coords))
                            / self.normal.dot(&(vertex_j.pos - vertex_i.pos));
                        let vertex_new = vertex_i.interpolate(vertex_j, t);
                        split_front.push(vertex_new);
                        split_back.push(vertex_new);
                    }
                }

                // Fragments inherit the parent's plane.
                if split_front.len() >= 3 {
                    front.push(Polygon::with_plane(
                        split_front,
                        polygon.plane.clone(),
                        polygon.shared,
                    ));
                }
                if split_back.len() >= 3 {
                    back.push(Polygon::with_plane(
                        split_back,
                        polygon.plane.clone(),
                        polygon.shared,
                    ));
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }
}
