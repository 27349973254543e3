//! Property tests for the geometry kernel.
//!
//! The kernel's contracts are stated as invariants over arbitrary
//! non-degenerate inputs, so they are checked with generated data rather
//! than hand-picked fixtures: symmetry of `distance` and `angle_deg`, and
//! invariance of `angle_deg` under rigid motions and uniform scaling of
//! the coordinate frame.

use kinescore_core::geometry::{angle_deg, distance, Point3};
use proptest::prelude::*;

/// Angle comparisons after f32 rigid motions accumulate rounding; half a
/// degree is far tighter than any threshold the analyzers apply.
const ANGLE_EPS: f32 = 0.5;

fn coord() -> impl Strategy<Value = f32> {
    (-1.0f32..1.0).prop_map(|v| (v * 1000.0).round() / 1000.0)
}

fn point() -> impl Strategy<Value = Point3> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| Point3::new(x, y, z))
}

/// A triple whose rays from the vertex are long enough to be
/// well-conditioned.
fn angle_triple() -> impl Strategy<Value = (Point3, Point3, Point3)> {
    (point(), point(), point()).prop_filter("rays must be non-degenerate", |(a, b, c)| {
        distance(a, b) > 1e-2 && distance(c, b) > 1e-2
    })
}

fn translate(p: &Point3, dx: f32, dy: f32, dz: f32) -> Point3 {
    Point3::new(p.x + dx, p.y + dy, p.z + dz)
}

/// Rotation about the z axis.
fn rotate_z(p: &Point3, radians: f32) -> Point3 {
    let (sin, cos) = radians.sin_cos();
    Point3::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos, p.z)
}

fn scale(p: &Point3, factor: f32) -> Point3 {
    Point3::new(p.x * factor, p.y * factor, p.z * factor)
}

proptest! {
    #[test]
    fn distance_is_symmetric(a in point(), b in point()) {
        prop_assert_eq!(distance(&a, &b), distance(&b, &a));
    }

    #[test]
    fn distance_to_self_is_zero(a in point()) {
        prop_assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn angle_is_symmetric_under_endpoint_swap((a, b, c) in angle_triple()) {
        let forward = angle_deg(&a, &b, &c).unwrap();
        let backward = angle_deg(&c, &b, &a).unwrap();
        prop_assert!((forward - backward).abs() < 1e-3);
    }

    #[test]
    fn angle_is_translation_invariant(
        (a, b, c) in angle_triple(),
        dx in coord(),
        dy in coord(),
        dz in coord(),
    ) {
        let original = angle_deg(&a, &b, &c).unwrap();
        let shifted = angle_deg(
            &translate(&a, dx, dy, dz),
            &translate(&b, dx, dy, dz),
            &translate(&c, dx, dy, dz),
        )
        .unwrap();
        prop_assert!((original - shifted).abs() < ANGLE_EPS);
    }

    #[test]
    fn angle_is_rotation_invariant(
        (a, b, c) in angle_triple(),
        radians in 0.0f32..std::f32::consts::TAU,
    ) {
        let original = angle_deg(&a, &b, &c).unwrap();
        let rotated = angle_deg(
            &rotate_z(&a, radians),
            &rotate_z(&b, radians),
            &rotate_z(&c, radians),
        )
        .unwrap();
        prop_assert!((original - rotated).abs() < ANGLE_EPS);
    }

    #[test]
    fn angle_is_scale_invariant(
        (a, b, c) in angle_triple(),
        factor in 0.1f32..10.0,
    ) {
        let original = angle_deg(&a, &b, &c).unwrap();
        let scaled = angle_deg(
            &scale(&a, factor),
            &scale(&b, factor),
            &scale(&c, factor),
        )
        .unwrap();
        prop_assert!((original - scaled).abs() < ANGLE_EPS);
    }

    #[test]
    fn degenerate_triples_fail_explicitly(a in point(), c in point()) {
        prop_assert!(angle_deg(&a, &a, &c).is_err());
        prop_assert!(angle_deg(&a, &c, &c).is_err());
    }
}
