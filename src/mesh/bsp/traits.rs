//! Traits defining BSP tree operations for dependency inversion

use crate::float_types::Real;
use crate::mesh::bsp::node::Node;
use crate::mesh::plane::{BACK, COPLANAR, FRONT};
use crate::mesh::polygon::Polygon;

/// Core BSP operations trait - implements algorithms on BSP nodes
///
/// Every operation is a loop over an explicit work list; none recurses.
pub trait BspOps {
    /// Swap solid and empty space: flip every polygon and plane, swap children
    fn invert(&self, node: &mut Node);

    /// Remove the parts of `polygons` that lie inside this tree's solid volume
    fn clip_polygons(&self, node: &Node, polygons: Vec<Polygon>) -> Vec<Polygon>;

    /// Remove all polygons in this BSP tree that are inside the other BSP tree
    fn clip_to(&self, node: &mut Node, other: &Node);

    /// Build (or extend) a BSP tree from the given polygons
    fn build(&self, node: &mut Node, polygons: Vec<Polygon>);

    /// Return all polygons in this BSP tree, in pre-order (node, front, back)
    fn all_polygons(&self, node: &Node) -> Vec<Polygon>;
}

/// Trait for picking the polygon whose plane splits a polygon list
pub trait PivotStrategy {
    /// Index into `polygons` (never empty) of the pivot polygon
    fn pick_pivot(&self, polygons: &[Polygon]) -> usize;
}

/// Pick the polygon at the middle index.
///
/// Keeps the tree from degenerating into a list on already-sorted input.
#[derive(Debug, Clone, Copy, Default)]
pub struct MiddlePivot;

impl PivotStrategy for MiddlePivot {
    #[inline]
    fn pick_pivot(&self, polygons: &[Polygon]) -> usize {
        polygons.len() / 2
    }
}

/// Score candidate planes by how many polygons they span and how unevenly they
/// divide the rest, and pick the cheapest.
#[derive(Debug, Clone, Copy)]
pub struct BalancedPivot {
    pub span_weight: Real,
    pub balance_weight: Real,
    /// Only the first `sample_size` polygons are tried as candidates
    pub sample_size: usize,
}

impl Default for BalancedPivot {
    fn default() -> Self {
        Self {
            span_weight: 8.0,
            balance_weight: 1.0,
            sample_size: 20,
        }
    }
}

impl PivotStrategy for BalancedPivot {
    fn pick_pivot(&self, polygons: &[Polygon]) -> usize {
        let mut best_index = 0;
        let mut best_score = Real::MAX;

        for (index, candidate) in polygons.iter().take(self.sample_size.max(1)).enumerate() {
            let plane = &candidate.plane;
            let (num_front, num_back, num_spanning) = polygons
                .iter()
                .map(|poly| match plane.classify_polygon(poly) {
                    COPLANAR => (0i64, 0i64, 0i64),
                    FRONT => (1, 0, 0),
                    BACK => (0, 1, 0),
                    _ => (0, 0, 1),
                })
                .fold((0, 0, 0), |acc, x| (acc.0 + x.0, acc.1 + x.1, acc.2 + x.2));

            let score = self.span_weight * num_spanning as Real
                + self.balance_weight * ((num_front - num_back) as Real).abs();

            if score < best_score {
                best_score = score;
                best_index = index;
            }
        }

        best_index
    }
}
