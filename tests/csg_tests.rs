mod support;

use std::collections::BTreeSet;

use bspcsg::{
    BooleanOp, BooleanOptions,
    float_types::{PI, Real},
    mesh::{
        Mesh,
        bsp::{BalancedPivot, MiddlePivot},
        plane::Plane,
        polygon::Polygon,
    },
    traits::CSG,
};
use nalgebra::Vector3;

use crate::support::{approx_eq, bounding_box, init_logging, make_polygon_3d};

const VOLUME_EPS: Real = 1e-6;
/// Curved inputs pick up more rounding from repeated splitting.
const CURVED_VOLUME_EPS: Real = 1e-5;

fn assert_volume(mesh: &Mesh, expected: Real) {
    let volume = mesh.volume();
    assert!(
        approx_eq(volume, expected, VOLUME_EPS),
        "expected volume {expected}, got {volume}"
    );
}

fn assert_bounds(polygons: &[Polygon], expected: [Real; 6]) {
    let bb = bounding_box(polygons);
    for (got, want) in bb.iter().zip(expected) {
        assert!(approx_eq(*got, want, 1e-8), "bounding box {bb:?}, expected {expected:?}");
    }
}

fn tag_range(first: i64, count: i64) -> BTreeSet<i64> {
    (first..first + count).collect()
}

/// A unit cube at the origin (tags 0..6) and one shifted by half along x (tags 6..12).
fn offset_cubes() -> (Mesh, Mesh) {
    (Mesh::cube(1.0, 0), Mesh::cube(1.0, 6).translate(0.5, 0.0, 0.0))
}

#[test]
fn from_polygons() {
    let poly = make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]], 4);
    let csg = Mesh::from_polygons(&[poly.clone()]);
    assert_eq!(csg.polygons.len(), 1);
    assert_eq!(csg.polygons[0], poly);
    assert_eq!(csg.tags(), BTreeSet::from([4]));
}

#[test]
fn cube() {
    let cube = Mesh::cube(2.0, 10);
    assert_eq!(cube.polygons.len(), 6);
    assert_eq!(cube.tags(), tag_range(10, 6));
    assert_volume(&cube, 8.0);
    assert_bounds(&cube.polygons, [0.0, 0.0, 0.0, 2.0, 2.0, 2.0]);

    // every face points away from the centre
    let center = cube.bounding_box().center();
    for poly in &cube.polygons {
        assert!(poly.plane.signed_distance(&center) < 0.0);
    }
}

#[test]
fn sphere() {
    let sphere = Mesh::sphere(1.0, 32, 16, 0);
    assert_eq!(sphere.polygons.len(), 2 * 32 * 15);
    assert!(sphere.polygons.iter().all(|p| p.vertices.len() == 3));

    let exact = 4.0 / 3.0 * PI;
    let volume = sphere.volume();
    assert!(volume < exact && volume > 0.95 * exact, "volume {volume}");
    assert_bounds(&sphere.polygons, [-1.0, -1.0, -1.0, 1.0, 1.0, 1.0]);
}

#[test]
fn cube_minus_offset_cube() {
    init_logging();
    let (a, b) = offset_cubes();
    let result = a.subtract(&b);

    assert!(!result.is_empty());
    assert_volume(&result, 0.5);
    assert_bounds(&result.polygons, [0.0, 0.0, 0.0, 0.5, 1.0, 1.0]);
    assert!(result.tags().is_subset(&tag_range(0, 12)));

    // the only faces left from B form the cut at x = 0.5, facing +x
    let from_b: Vec<&Polygon> = result.polygons.iter().filter(|p| p.shared >= 6).collect();
    assert!(!from_b.is_empty());
    for poly in from_b {
        assert!(poly.vertices.iter().all(|v| approx_eq(v.pos.x, 0.5, 1e-9)));
        assert!(poly.plane.normal.x > 0.99);
    }
}

#[test]
fn union_of_offset_cubes() {
    let (a, b) = offset_cubes();
    let result = a.union(&b);

    assert_volume(&result, 1.5);
    assert_bounds(&result.polygons, [0.0, 0.0, 0.0, 1.5, 1.0, 1.0]);
    assert!(result.tags().is_subset(&tag_range(0, 12)));
}

#[test]
fn intersect_of_offset_cubes() {
    let (a, b) = offset_cubes();
    let result = a.intersect(&b);

    assert_volume(&result, 0.5);
    assert_bounds(&result.polygons, [0.5, 0.0, 0.0, 1.0, 1.0, 1.0]);
}

#[test]
fn union_of_disjoint_cubes_does_not_split() {
    let a = Mesh::cube(1.0, 0);
    let b = Mesh::cube(1.0, 6).translate(3.0, 0.0, 0.0);
    let result = a.union(&b);

    assert_eq!(result.polygons.len(), 12);
    assert_eq!(result.tags(), tag_range(0, 12));
    assert_volume(&result, 2.0);

    // nothing is split or moved: the output is both inputs, polygon for polygon
    for poly in a.polygons.iter().chain(&b.polygons) {
        assert!(result.polygons.contains(poly), "missing {poly:?}");
    }
}

#[test]
fn union_is_commutative() {
    let (a, b) = offset_cubes();
    assert!(approx_eq(a.union(&b).volume(), b.union(&a).volume(), VOLUME_EPS));
    assert_volume(&b.union(&a), 1.5);

    let sphere = Mesh::sphere(1.0, 12, 6, 100);
    let cube = Mesh::cube(1.0, 0).translate(0.3, 0.2, 0.1);
    let (forward, backward) = (sphere.union(&cube), cube.union(&sphere));
    assert!(
        approx_eq(forward.volume(), backward.volume(), CURVED_VOLUME_EPS),
        "{} != {}",
        forward.volume(),
        backward.volume()
    );
}

#[test]
fn subtract_from_itself_is_empty() {
    let a = Mesh::cube(1.0, 0);
    assert!(a.subtract(&a).is_empty());
}

#[test]
fn union_with_itself_is_itself() {
    let a = Mesh::cube(1.0, 0);
    let result = a.union(&a);
    assert_eq!(result.polygons.len(), 6);
    assert_eq!(result.tags(), a.tags());
    assert_volume(&result, 1.0);
}

#[test]
fn contained_cube() {
    let outer = Mesh::cube(3.0, 0);
    let inner = Mesh::cube(1.0, 6).translate(1.0, 1.0, 1.0);

    let union = outer.union(&inner);
    assert_eq!(union.tags(), outer.tags());
    assert_volume(&union, 27.0);

    let intersection = outer.intersect(&inner);
    assert_eq!(intersection.tags(), inner.tags());
    assert_volume(&intersection, 1.0);

    let difference = outer.subtract(&inner);
    assert_eq!(difference.tags(), tag_range(0, 12));
    assert_volume(&difference, 26.0);

    assert!(inner.subtract(&outer).is_empty());
}

#[test]
fn empty_operands() {
    let a = Mesh::cube(1.0, 0);
    let empty = Mesh::new();

    assert_eq!(a.union(&empty).polygons, a.polygons);
    assert_eq!(empty.union(&a).polygons, a.polygons);
    assert_eq!(a.subtract(&empty).polygons, a.polygons);
    assert!(empty.subtract(&a).is_empty());
    assert!(a.intersect(&empty).is_empty());
    assert!(empty.intersect(&a).is_empty());
    assert!(empty.union(&empty).is_empty());
}

#[test]
fn inputs_are_not_modified() {
    let (a, b) = offset_cubes();
    let (a_before, b_before) = (a.polygons.clone(), b.polygons.clone());

    let _ = a.union(&b);
    let _ = a.subtract(&b);
    let _ = a.intersect(&b);

    assert_eq!(a.polygons, a_before);
    assert_eq!(b.polygons, b_before);
}

#[test]
fn sphere_and_cube_volumes_are_consistent() {
    let sphere = Mesh::sphere(1.0, 12, 6, 100);
    let cube = Mesh::cube(1.0, 0).translate(0.3, 0.2, 0.1);

    let union = sphere.union(&cube);
    let intersection = sphere.intersect(&cube);
    let difference = sphere.subtract(&cube);

    let (vs, vc) = (sphere.volume(), cube.volume());
    let (vu, vi, vd) = (union.volume(), intersection.volume(), difference.volume());

    assert!(vi > 0.0 && vi < vc);
    assert!(approx_eq(vu + vi, vs + vc, CURVED_VOLUME_EPS), "{vu} + {vi} != {vs} + {vc}");
    assert!(approx_eq(vd + vi, vs, CURVED_VOLUME_EPS), "{vd} + {vi} != {vs}");

    // tags are threaded through, never invented
    let inputs: BTreeSet<i64> = sphere.tags().union(&cube.tags()).copied().collect();
    for result in [&union, &intersection, &difference] {
        assert!(result.tags().is_subset(&inputs));
    }
    assert!(intersection.tags().contains(&100));
    assert!(difference.tags().contains(&100));
}

#[test]
fn subtract_matches_inverted_union() {
    let sphere = Mesh::sphere(1.0, 12, 6, 0);
    let cube = Mesh::cube(1.0, 50).translate(0.3, 0.2, 0.1);

    let direct = sphere.subtract(&cube);
    let via_union = sphere.inverse().union(&cube).inverse();

    assert!(approx_eq(direct.volume(), via_union.volume(), CURVED_VOLUME_EPS));
}

#[test]
fn xor() {
    let a = Mesh::cube(1.0, 0);
    let b = Mesh::cube(1.0, 6).translate(0.5, 0.5, 0.5);
    // each cube minus the shared 0.5^3 corner
    assert_volume(&a.xor(&b), 2.0 - 2.0 * 0.125);
}

#[test]
fn inverse() {
    let a = Mesh::cube(1.0, 0);
    let inverted = a.inverse();
    assert_volume(&inverted, -1.0);
    assert_eq!(inverted.tags(), a.tags());
    assert_eq!(inverted.inverse().polygons, a.polygons);
}

#[test]
fn translate_and_scale() {
    let a = Mesh::cube(1.0, 0).translate(1.0, 2.0, 3.0);
    assert_bounds(&a.polygons, [1.0, 2.0, 3.0, 2.0, 3.0, 4.0]);

    let scaled = Mesh::cube(1.0, 0).scale(2.0, 3.0, 4.0);
    assert_volume(&scaled, 24.0);
    assert_eq!(scaled.tags(), tag_range(0, 6));
}

#[test]
fn rotate_preserves_volume() {
    let rotated = Mesh::cube(1.0, 0).rotate(30.0, 45.0, 60.0);
    assert_volume(&rotated, 1.0);

    let quarter = Mesh::cube(1.0, 0).rotate(0.0, 0.0, 90.0);
    assert_bounds(&quarter.polygons, [-1.0, 0.0, 0.0, 0.0, 1.0, 1.0]);
}

#[test]
fn mirror_keeps_outward_orientation() {
    let mirrored = Mesh::cube(1.0, 0).mirror(Plane::from_normal(Vector3::x(), 0.0));
    assert_bounds(&mirrored.polygons, [-1.0, 0.0, 0.0, 0.0, 1.0, 1.0]);
    assert_volume(&mirrored, 1.0);
}

#[test]
fn center() {
    let centered = Mesh::cube(2.0, 0).translate(5.0, 5.0, 5.0).center();
    assert_bounds(&centered.polygons, [-1.0, -1.0, -1.0, 1.0, 1.0, 1.0]);
}

#[test]
fn bounding_box_is_cached_until_invalidated() {
    let mut mesh = Mesh::cube(1.0, 0);
    let bb = mesh.bounding_box();
    assert_eq!(bb.maxs.x, 1.0);

    mesh.polygons = Mesh::cube(2.0, 0).polygons;
    assert_eq!(mesh.bounding_box().maxs.x, 1.0);

    mesh.invalidate_bounding_box();
    assert_eq!(mesh.bounding_box().maxs.x, 2.0);
}

#[test]
fn operation_names() {
    for op in [BooleanOp::Difference, BooleanOp::Union, BooleanOp::Intersect] {
        assert_eq!(op.as_str().parse::<BooleanOp>(), Ok(op));
        assert_eq!(op.to_string(), op.as_str());
    }
    assert!("union".parse::<BooleanOp>().is_err());
}

#[test]
fn prefilter_short_circuits_disjoint_operands() {
    let a = Mesh::cube(1.0, 0);
    let b = Mesh::sphere(0.5, 8, 4, 6).translate(3.0, 0.5, 0.5);
    let options = BooleanOptions::<MiddlePivot> {
        prefilter_bounding_boxes: true,
        ..Default::default()
    };

    let union = a.boolean_with(&b, BooleanOp::Union, &options);
    let mut expected = a.polygons.clone();
    expected.extend(b.polygons.iter().cloned());
    assert_eq!(union.polygons, expected);

    assert_eq!(a.boolean_with(&b, BooleanOp::Difference, &options).polygons, a.polygons);
    assert!(a.boolean_with(&b, BooleanOp::Intersect, &options).is_empty());
}

#[test]
fn prefilter_does_not_change_overlapping_results() {
    let (a, b) = offset_cubes();
    let options = BooleanOptions::<MiddlePivot> {
        prefilter_bounding_boxes: true,
        ..Default::default()
    };

    for op in [BooleanOp::Difference, BooleanOp::Union, BooleanOp::Intersect] {
        assert_eq!(
            a.boolean_with(&b, op, &options).polygons,
            a.boolean(&b, op).polygons
        );
    }
}

#[test]
fn balanced_pivot_gives_same_solid() {
    let sphere = Mesh::sphere(1.0, 12, 6, 0);
    let cube = Mesh::cube(1.0, 50).translate(0.3, 0.2, 0.1);
    let options = BooleanOptions {
        prefilter_bounding_boxes: false,
        pivot: BalancedPivot::default(),
    };

    for op in [BooleanOp::Difference, BooleanOp::Union, BooleanOp::Intersect] {
        let balanced = sphere.boolean_with(&cube, op, &options);
        let middle = sphere.boolean(&cube, op);
        assert!(approx_eq(balanced.volume(), middle.volume(), CURVED_VOLUME_EPS), "{op}");
    }
}

#[test]
fn triangulate_keeps_tags_and_volume() {
    let (a, b) = offset_cubes();
    let result = a.subtract(&b);
    let triangles = result.triangulate();

    assert!(triangles.polygons.iter().all(|p| p.vertices.len() == 3));
    assert_eq!(triangles.tags(), result.tags());
    assert_volume(&triangles, 0.5);
}
