//! Conversion between [`Mesh`] and the flat polygon-soup wire format.
//!
//! A soup is an ordered list of polygons, each an ordered list of
//! `[x, y, z, tag]` records. The tag is per polygon but replicated onto every
//! vertex record, so it travels as a float and must be integral and identical
//! across one polygon.

use crate::errors::SoupError;
use crate::float_types::Real;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use crate::mesh::{BooleanOp, Mesh};
use nalgebra::{Point3, Vector3};
use std::time::Instant;

/// One vertex record: `[x, y, z, tag]`.
pub type WireVertex = [Real; 4];

/// One polygon: its vertex records in winding order.
pub type WirePolygon = Vec<WireVertex>;

pub type PolygonSoup = Vec<WirePolygon>;

/// Largest magnitude at which every integer is exactly representable as `f64`.
const MAX_EXACT_TAG: Real = 9_007_199_254_740_992.0;

fn parse_tag(polygon: usize, vertex: usize, raw: Real) -> Result<i64, SoupError> {
    if raw.fract() != 0.0 || raw.abs() > MAX_EXACT_TAG {
        return Err(SoupError::NonIntegralTag {
            polygon,
            vertex,
            tag: raw,
        });
    }
    Ok(raw as i64)
}

fn parse_polygon(index: usize, records: &[WireVertex]) -> Result<Polygon, SoupError> {
    if records.len() < 3 {
        return Err(SoupError::TooFewVertices {
            polygon: index,
            count: records.len(),
        });
    }

    let mut tag = None;
    let mut vertices = Vec::with_capacity(records.len());

    for (v, &[x, y, z, raw_tag]) in records.iter().enumerate() {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return Err(SoupError::NonFiniteCoordinate {
                polygon: index,
                vertex: v,
            });
        }

        let found = parse_tag(index, v, raw_tag)?;
        match tag {
            None => tag = Some(found),
            Some(expected) if expected != found => {
                return Err(SoupError::InconsistentTag {
                    polygon: index,
                    vertex: v,
                    expected,
                    found,
                });
            },
            Some(_) => {},
        }

        vertices.push(Vertex::new(Point3::new(x, y, z), Vector3::zeros()));
    }

    Ok(Polygon::new(vertices, tag.unwrap_or_default()))
}

impl Mesh {
    /// Parse a polygon soup, validating every record.
    ///
    /// Vertex normals are not part of the wire format and are set to zero.
    pub fn from_soup(soup: &[WirePolygon]) -> Result<Mesh, SoupError> {
        let polygons = soup
            .iter()
            .enumerate()
            .map(|(index, records)| parse_polygon(index, records))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Mesh::from(polygons))
    }

    /// Flatten to a polygon soup, replicating each polygon's tag onto its vertices.
    pub fn to_soup(&self) -> PolygonSoup {
        self.polygons
            .iter()
            .map(|poly| {
                let tag = poly.shared as Real;
                poly.vertices
                    .iter()
                    .map(|v| [v.pos.x, v.pos.y, v.pos.z, tag])
                    .collect()
            })
            .collect()
    }

    /// One past the largest tag in use, or `0` for an empty mesh.
    pub fn next_free_tag(&self) -> i64 {
        self.polygons
            .iter()
            .map(|p| p.shared)
            .max()
            .map_or(0, |max| max + 1)
    }

    /// A copy with every tag shifted by `offset`.
    pub fn with_tag_offset(&self, offset: i64) -> Mesh {
        let polygons: Vec<Polygon> = self
            .polygons
            .iter()
            .map(|poly| Polygon {
                shared: poly.shared + offset,
                ..poly.clone()
            })
            .collect();

        Mesh::from(polygons)
    }
}

/// Run `op` on two polygon soups and return the result in the same shape.
///
/// Tags are used exactly as given; the host is expected to have offset the
/// cutter's tags past the target's so the two never collide.
pub fn boolean_soup(
    target: &[WirePolygon],
    cutter: &[WirePolygon],
    op: BooleanOp,
) -> Result<PolygonSoup, SoupError> {
    let started = Instant::now();
    let target = Mesh::from_soup(target)?;
    let cutter = Mesh::from_soup(cutter)?;
    log::debug!("marshalling in: {:?}", started.elapsed());

    let result = target.boolean(&cutter, op);

    let started = Instant::now();
    let soup = result.to_soup();
    log::debug!("marshalling out: {:?}", started.elapsed());

    Ok(soup)
}

/// [`boolean_soup`] with the operation given by name
/// (`"DIFFERENCE"`, `"UNION"` or `"INTERSECT"`).
pub fn boolean_soup_named(
    target: &[WirePolygon],
    cutter: &[WirePolygon],
    op: &str,
) -> Result<PolygonSoup, SoupError> {
    boolean_soup(target, cutter, op.parse()?)
}
