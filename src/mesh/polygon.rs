//! Convex, coplanar polygon loops carrying a provenance tag.

use crate::float_types::Real;
use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;

/// A convex polygon, defined by a list of vertices and the plane they lie on.
///
/// The vertices must be coplanar and form a convex loop; this is a caller
/// contract and is not checked. `shared` is an opaque provenance tag (source
/// face, material slot, ...) carried unchanged through every split and flip.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vertex>,
    /// Computed once from the first three vertices, never recomputed.
    pub plane: Plane,
    pub shared: i64,
}

impl Polygon {
    /// Create a polygon from vertices, deriving its plane from the first three.
    ///
    /// # Panics
    /// Panics if fewer than three vertices are supplied.
    pub fn new(vertices: Vec<Vertex>, shared: i64) -> Self {
        assert!(vertices.len() >= 3, "degenerate polygon");

        let plane = Plane::from_vertices(&vertices);
        Polygon {
            vertices,
            plane,
            shared,
        }
    }

    /// Create a polygon that lies on an already known plane.
    pub(crate) fn with_plane(vertices: Vec<Vertex>, plane: Plane, shared: i64) -> Self {
        debug_assert!(vertices.len() >= 3, "degenerate polygon");
        Polygon {
            vertices,
            plane,
            shared,
        }
    }

    /// Reverse winding order, flip vertex normals, and flip the plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    /// Fan-triangulate the convex loop, preserving winding.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        let v0 = self.vertices[0];
        self.vertices[1..]
            .windows(2)
            .map(|pair| [v0, pair[0], pair[1]])
            .collect()
    }

    /// Bounding box of the polygon's vertices.
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.pos))
    }

    /// Area of the loop (half the norm of the summed fan cross products).
    pub fn area(&self) -> Real {
        let origin = self.vertices[0].pos;
        self.vertices[1..]
            .windows(2)
            .map(|pair| (pair[0].pos - origin).cross(&(pair[1].pos - origin)))
            .sum::<nalgebra::Vector3<Real>>()
            .norm()
            * 0.5
    }

    /// This polygon's term in the divergence-theorem volume sum:
    /// the signed volume of the tetrahedra between the origin and each fan triangle.
    pub fn signed_volume_contribution(&self) -> Real {
        self.triangulate()
            .iter()
            .map(|[a, b, c]| a.pos.coords.dot(&b.pos.coords.cross(&c.pos.coords)))
            .sum::<Real>()
            / 6.0
    }
}
