//! Primitive solids as `Mesh`es

use crate::float_types::{PI, Real, TAU};
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};

impl Mesh {
    /// Axis-aligned box with one corner at the origin and the opposite corner
    /// at `(width, length, height)`.
    ///
    /// Faces are tagged `first_tag + i` in the order bottom, top, front, back,
    /// left, right.
    ///
    /// ```text
    ///     4-------5
    ///    /|      /|
    ///   0-------1 |
    ///   | |     | |
    ///   | 7-----|-6
    ///   |/      |/
    ///   3-------2
    /// ```
    pub fn cuboid(width: Real, length: Real, height: Real, first_tag: i64) -> Mesh {
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(width, 0.0, 0.0),
            Point3::new(width, length, 0.0),
            Point3::new(0.0, length, 0.0),
            Point3::new(0.0, 0.0, height),
            Point3::new(width, 0.0, height),
            Point3::new(width, length, height),
            Point3::new(0.0, length, height),
        ];

        // (indices, normal), counter-clockwise seen from outside
        let faces = [
            ([0, 3, 2, 1], -Vector3::z()),
            ([4, 5, 6, 7], Vector3::z()),
            ([0, 1, 5, 4], -Vector3::y()),
            ([3, 7, 6, 2], Vector3::y()),
            ([0, 4, 7, 3], -Vector3::x()),
            ([1, 2, 6, 5], Vector3::x()),
        ];

        let polygons: Vec<Polygon> = faces
            .iter()
            .zip(first_tag..)
            .map(|((indices, normal), tag)| {
                let vertices = indices
                    .iter()
                    .map(|&i| Vertex::new(corners[i], *normal))
                    .collect();
                Polygon::new(vertices, tag)
            })
            .collect();

        Mesh::from(polygons)
    }

    pub fn cube(size: Real, first_tag: i64) -> Mesh {
        Self::cuboid(size, size, size, first_tag)
    }

    /// UV sphere centred on the origin, built from triangles only.
    ///
    /// `segments` slices around the Y axis and `stacks` bands from pole to
    /// pole; both are clamped to a minimum of 3 and 2. Every triangle is tagged
    /// `tag`.
    pub fn sphere(radius: Real, segments: usize, stacks: usize, tag: i64) -> Mesh {
        let segments = segments.max(3);
        let stacks = stacks.max(2);

        let point = |i: usize, j: usize| {
            let theta = TAU * i as Real / segments as Real;
            let phi = PI * j as Real / stacks as Real;
            Point3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.cos(),
                radius * phi.sin() * theta.sin(),
            )
        };
        let vertex = |p: Point3<Real>| Vertex::new(p, p.coords / radius);

        let mut polygons = Vec::with_capacity(2 * segments * stacks);
        let mut push_triangle = |a: Point3<Real>, b: Point3<Real>, c: Point3<Real>| {
            let centroid = (a.coords + b.coords + c.coords) / 3.0;
            let outward = (b - a).cross(&(c - a)).dot(&centroid) > 0.0;
            let (b, c) = if outward { (b, c) } else { (c, b) };
            polygons.push(Polygon::new(vec![vertex(a), vertex(b), vertex(c)], tag));
        };

        for j in 0..stacks {
            for i in 0..segments {
                let next = (i + 1) % segments;
                let (p00, p10) = (point(i, j), point(next, j));
                let (p01, p11) = (point(i, j + 1), point(next, j + 1));

                // the rings at the poles collapse to a point
                if j != 0 {
                    push_triangle(p00, p10, p11);
                }
                if j != stacks - 1 {
                    push_triangle(p00, p11, p01);
                }
            }
        }

        Mesh::from(polygons)
    }
}
