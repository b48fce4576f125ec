//! Marshalling errors
//!
//! The geometric core never fails: degenerate fragments are dropped and zero
//! divisions yield zero vectors. Errors only arise where a host hands us a
//! [`PolygonSoup`](crate::soup::PolygonSoup) that breaks the wire contract.

/// All the ways a polygon soup can violate the wire contract
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SoupError {
    /// A polygon has fewer than three vertex records
    #[error("(TooFewVertices) polygon {polygon} has {count} vertices, at least 3 are required")]
    TooFewVertices { polygon: usize, count: usize },

    /// A coordinate is NaN or infinite
    #[error("(NonFiniteCoordinate) polygon {polygon}, vertex {vertex} has a NaN or infinite coordinate")]
    NonFiniteCoordinate { polygon: usize, vertex: usize },

    /// The tag column is not an integer value
    #[error("(NonIntegralTag) polygon {polygon}, vertex {vertex} carries non-integral tag {tag}")]
    NonIntegralTag { polygon: usize, vertex: usize, tag: f64 },

    /// The tag differs between vertices of the same polygon
    #[error("(InconsistentTag) polygon {polygon}, vertex {vertex} carries tag {found} but the polygon is tagged {expected}")]
    InconsistentTag {
        polygon: usize,
        vertex: usize,
        expected: i64,
        found: i64,
    },

    /// An operation name other than `DIFFERENCE`, `UNION` or `INTERSECT`
    #[error("(UnknownOperation) unknown boolean operation {0:?}")]
    UnknownOperation(String),
}
