//! `Mesh` struct and implementations of the `CSG` trait for `Mesh`

use crate::errors::SoupError;
use crate::float_types::{
    Real,
    parry3d::bounding_volume::{Aabb, BoundingVolume},
};
use crate::mesh::bsp::{BspOps, MiddlePivot, Node, PivotStrategy, SerialBspOps};
use crate::mesh::plane::Plane;
use crate::mesh::polygon::Polygon;
use crate::mesh::vector::VectorExt;
use crate::mesh::vertex::Vertex;
use crate::traits::CSG;
use nalgebra::{Matrix4, Point3};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Instant;

pub mod bsp;
pub mod plane;
pub mod polygon;
pub mod shapes;
pub mod vector;
pub mod vertex;

/// The closed set of boolean operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    Difference,
    Union,
    Intersect,
}

impl BooleanOp {
    /// Upper-case name used on the host boundary.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BooleanOp::Difference => "DIFFERENCE",
            BooleanOp::Union => "UNION",
            BooleanOp::Intersect => "INTERSECT",
        }
    }
}

impl fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BooleanOp {
    type Err = SoupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DIFFERENCE" => Ok(BooleanOp::Difference),
            "UNION" => Ok(BooleanOp::Union),
            "INTERSECT" => Ok(BooleanOp::Intersect),
            other => Err(SoupError::UnknownOperation(other.to_string())),
        }
    }
}

/// Tuning knobs for a single boolean operation.
#[derive(Debug, Clone, Default)]
pub struct BooleanOptions<SP: PivotStrategy = MiddlePivot> {
    /// Skip the BSP trees entirely when the operands' bounding boxes are
    /// disjoint; the result is then a plain concatenation, `self`, or empty.
    pub prefilter_bounding_boxes: bool,

    /// How each BSP node picks its splitting polygon.
    pub pivot: SP,
}

/// A closed solid represented as a flat list of convex polygons.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// 3D polygons for volumetric shapes
    pub polygons: Vec<Polygon>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,
}

impl From<Vec<Polygon>> for Mesh {
    fn from(polygons: Vec<Polygon>) -> Self {
        Mesh {
            polygons,
            bounding_box: OnceLock::new(),
        }
    }
}

impl Mesh {
    /// Build a Mesh from an existing polygon list
    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        Mesh::from(polygons.to_vec())
    }

    /// `true` when the mesh has no polygons.
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Helper to collect all vertices from the mesh.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.iter().copied())
            .collect()
    }

    /// Every distinct `shared` tag present in the mesh.
    pub fn tags(&self) -> BTreeSet<i64> {
        self.polygons.iter().map(|p| p.shared).collect()
    }

    /// Triangulate each polygon, returning a Mesh containing triangles with their source tags.
    pub fn triangulate(&self) -> Mesh {
        let triangles = self
            .polygons
            .iter()
            .flat_map(|poly| {
                poly.triangulate().into_iter().map(move |triangle| {
                    Polygon::with_plane(triangle.to_vec(), poly.plane.clone(), poly.shared)
                })
            })
            .collect::<Vec<_>>();

        Mesh::from(triangles)
    }

    /// Enclosed volume by the divergence theorem.
    ///
    /// Exact for closed, consistently outward-wound surfaces, including the
    /// T-junction-laden output of the boolean operations.
    pub fn volume(&self) -> Real {
        self.polygons
            .iter()
            .map(Polygon::signed_volume_contribution)
            .sum()
    }

    /// Bounding box of all vertices, or `None` for an empty mesh.
    fn extent(&self) -> Option<Aabb> {
        self.polygons
            .iter()
            .map(Polygon::bounding_box)
            .reduce(|acc, bb| acc.merged(&bb))
    }

    /// Run `op` with default options.
    pub fn boolean(&self, other: &Mesh, op: BooleanOp) -> Mesh {
        self.boolean_with(other, op, &BooleanOptions::<MiddlePivot>::default())
    }

    /// Run `op` against `other`. Neither operand is modified; two fresh BSP
    /// trees are built and discarded for every call.
    pub fn boolean_with<SP: PivotStrategy + Clone>(
        &self,
        other: &Mesh,
        op: BooleanOp,
        options: &BooleanOptions<SP>,
    ) -> Mesh {
        let started = Instant::now();

        if self.is_empty() || other.is_empty() {
            log::debug!(
                "{op}: empty operand ({} vs {} polygons), skipping BSP",
                self.polygons.len(),
                other.polygons.len()
            );
            return match op {
                BooleanOp::Union if self.is_empty() => other.clone(),
                BooleanOp::Union | BooleanOp::Difference => self.clone(),
                BooleanOp::Intersect => Mesh::new(),
            };
        }

        let ops = SerialBspOps::with_strategy(options.pivot.clone());

        let shortcut = if options.prefilter_bounding_boxes {
            self.disjoint_shortcut(other, op)
        } else {
            None
        };
        let polygons = shortcut.unwrap_or_else(|| {
            Self::combine(&ops, op, self.polygons.clone(), other.polygons.clone())
        });

        log::debug!(
            "{op}: {} + {} polygons -> {} polygons in {:?}",
            self.polygons.len(),
            other.polygons.len(),
            polygons.len(),
            started.elapsed()
        );

        Mesh::from(polygons)
    }

    /// Answer `op` without building trees when the operands' bounding boxes
    /// are disjoint. Touching boxes count as overlapping.
    fn disjoint_shortcut(&self, other: &Mesh, op: BooleanOp) -> Option<Vec<Polygon>> {
        let (self_bb, other_bb) = (self.extent()?, other.extent()?);
        if self_bb.intersects(&other_bb) {
            return None;
        }

        log::trace!("{op}: bounding boxes are disjoint, skipping BSP");
        Some(match op {
            BooleanOp::Union => self
                .polygons
                .iter()
                .chain(other.polygons.iter())
                .cloned()
                .collect(),
            BooleanOp::Difference => self.polygons.clone(),
            BooleanOp::Intersect => Vec::new(),
        })
    }

    /// Build two trees and apply the clip/invert/build sequence for `op`.
    fn combine<SP: PivotStrategy>(
        ops: &SerialBspOps<SP>,
        op: BooleanOp,
        a_polygons: Vec<Polygon>,
        b_polygons: Vec<Polygon>,
    ) -> Vec<Polygon> {
        let mut a = Node::new();
        ops.build(&mut a, a_polygons);
        let mut b = Node::new();
        ops.build(&mut b, b_polygons);

        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "{op}: trees built, a = {} nodes (depth {}), b = {} nodes (depth {})",
                a.node_count(),
                a.depth(),
                b.node_count(),
                b.depth()
            );
        }

        match op {
            BooleanOp::Union => {
                ops.clip_to(&mut a, &b);
                ops.clip_to(&mut b, &a);
                ops.invert(&mut b);
                ops.clip_to(&mut b, &a);
                ops.invert(&mut b);
                ops.build(&mut a, ops.all_polygons(&b));
            },
            BooleanOp::Difference => {
                ops.invert(&mut a);
                ops.clip_to(&mut a, &b);
                ops.clip_to(&mut b, &a);
                ops.invert(&mut b);
                ops.clip_to(&mut b, &a);
                ops.invert(&mut b);
                ops.build(&mut a, ops.all_polygons(&b));
                ops.invert(&mut a);
            },
            BooleanOp::Intersect => {
                ops.invert(&mut a);
                ops.clip_to(&mut b, &a);
                ops.invert(&mut b);
                ops.clip_to(&mut a, &b);
                ops.clip_to(&mut b, &a);
                ops.build(&mut a, ops.all_polygons(&b));
                ops.invert(&mut a);
            },
        }

        ops.all_polygons(&a)
    }
}

impl CSG for Mesh {
    /// Returns a new empty Mesh
    fn new() -> Self {
        Mesh::default()
    }

    /// Return a new Mesh representing union of the two Meshes.
    ///
    /// ```text
    /// let c = a.union(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   b   |            |   c   |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    fn union(&self, other: &Mesh) -> Mesh {
        self.boolean(other, BooleanOp::Union)
    }

    /// Return a new Mesh representing the difference of the two Meshes.
    ///
    /// ```text
    /// let c = a.subtract(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |    +--+
    ///     +----+--+    |       +----+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn subtract(&self, other: &Mesh) -> Mesh {
        self.boolean(other, BooleanOp::Difference)
    }

    /// Return a new Mesh representing the intersection of the two Meshes.
    ///
    /// ```text
    /// let c = a.intersect(b);
    ///     +-------+
    ///     |       |
    ///     |   a   |
    ///     |    +--+----+   =   +--+
    ///     +----+--+    |       +--+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn intersect(&self, other: &Mesh) -> Mesh {
        self.boolean(other, BooleanOp::Intersect)
    }

    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to the mesh.
    ///
    /// Normals are transformed by the inverse transpose; a singular matrix
    /// leaves them untouched.
    fn transform(&self, mat: &Matrix4<Real>) -> Mesh {
        let normal_matrix = mat
            .try_inverse()
            .map(|inv| inv.transpose())
            .unwrap_or_else(Matrix4::identity);

        let polygons: Vec<Polygon> = self
            .polygons
            .iter()
            .map(|poly| {
                let vertices: Vec<Vertex> = poly
                    .vertices
                    .iter()
                    .map(|v| {
                        Vertex::new(
                            mat.transform_point(&v.pos),
                            normal_matrix.transform_vector(&v.normal).unit(),
                        )
                    })
                    .collect();
                // keep the cached plane consistent with the new vertex positions
                let plane = Plane::from_vertices(&vertices);
                Polygon::with_plane(vertices, plane, poly.shared)
            })
            .collect();

        Mesh::from(polygons)
    }

    /// Returns a [`parry3d::bounding_volume::Aabb`](Aabb) indicating the 3D bounds of all `polygons`.
    /// An empty mesh reports a degenerate box at the origin.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            self.extent()
                .unwrap_or_else(|| Aabb::new(Point3::origin(), Point3::origin()))
        })
    }

    /// Invalidates object's cached bounding box.
    fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }

    /// Invert this Mesh (flip inside vs. outside)
    fn inverse(&self) -> Mesh {
        let mut polygons = self.polygons.clone();
        polygons.iter_mut().for_each(Polygon::flip);
        Mesh::from(polygons)
    }
}
