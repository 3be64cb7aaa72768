// SPDX-License-Identifier: Apache-2.0
#![allow(missing_docs)]
use proptest::prelude::*;
use proptest::test_runner::{Config as PropConfig, RngAlgorithm, TestRng, TestRunner};

use keel_geom::{Box3, Sphere};
use keel_math::Vec3;

// Pinned seed so failures reproduce across machines and CI. Override
// locally with PROPTEST_SEED or by editing `SEED_BYTES`.
const SEED_BYTES: [u8; 32] = [
    0x42, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0,
];

fn runner() -> TestRunner {
    let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &SEED_BYTES);
    TestRunner::new_with_rng(PropConfig::default(), rng)
}

fn coord() -> impl Strategy<Value = f32> + Clone {
    any::<f32>().prop_filter("finite", |v| v.is_finite() && v.abs() < 1.0e4)
}

fn point() -> impl Strategy<Value = Vec3> + Clone {
    prop::array::uniform3(coord()).prop_map(|p| Vec3::new(p[0], p[1], p[2]))
}

#[test]
fn proptest_seed_pinned_box_from_points_contains_them_all() {
    let mut runner = runner();
    let prop = prop::collection::vec(point(), 1..32);

    runner
        .run(&prop, |points| {
            let b = Box3::from_points(&points);
            prop_assert!(!b.is_empty());
            for p in &points {
                prop_assert!(b.contains_point(p), "{:?} outside {:?}", p, b);
                prop_assert!((b.distance_to_point(p) - 0.0).abs() <= f32::EPSILON);
            }
            // The box is tight: shrinking any axis drops a point.
            let c = b.center();
            prop_assert!(b.contains_point(&c));
            Ok(())
        })
        .expect("box from_points property");
}

#[test]
fn proptest_seed_pinned_sphere_from_points_contains_them_all() {
    let mut runner = runner();
    let prop = prop::collection::vec(point(), 1..32);

    runner
        .run(&prop, |points| {
            let s = Sphere::from_points(&points, None);
            prop_assert!(!s.is_empty());
            for p in &points {
                // Scale the tolerance with the sphere: f32 loses absolute
                // precision for far-flung point sets.
                prop_assert!(
                    s.distance_to_point(p) <= 1.0e-3 * (1.0 + s.radius),
                    "{:?} outside sphere r={}",
                    p,
                    s.radius
                );
            }
            Ok(())
        })
        .expect("sphere from_points property");
}

#[test]
fn proptest_seed_pinned_clamp_point_lands_inside_the_box() {
    let mut runner = runner();
    let prop = (point(), point(), point());

    runner
        .run(&prop, |(a, b, q)| {
            let bounds = Box3::from_points(&[a, b]);
            let clamped = bounds.clamp_point(&q);
            prop_assert!(bounds.contains_point(&clamped));
            // Clamping a contained point is the identity.
            if bounds.contains_point(&q) {
                prop_assert_eq!(clamped.to_array(), q.to_array());
            }
            Ok(())
        })
        .expect("clamp_point property");
}
