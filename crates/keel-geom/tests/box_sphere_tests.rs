// SPDX-License-Identifier: Apache-2.0
#![allow(missing_docs)]
//! Fixture tests for axis-aligned boxes, bounding spheres, and planes.

use keel_geom::{Box3, Plane, Sphere, Triangle};
use keel_math::{Mat4, Quat, Vec3};

fn approx_eq(a: f32, b: f32, tol: f32) {
    let diff = (a - b).abs();
    assert!(diff <= tol, "expected {b}, got {a} (diff {diff})");
}

fn approx_eq3(a: Vec3, b: Vec3, tol: f32) {
    for (x, y) in a.to_array().iter().zip(b.to_array().iter()) {
        approx_eq(*x, *y, tol);
    }
}

#[test]
fn empty_box_reports_empty_and_absorbs_into_union() {
    let empty = Box3::EMPTY;
    assert!(empty.is_empty());
    assert_eq!(empty.center().to_array(), Vec3::ZERO.to_array());
    assert_eq!(empty.size().to_array(), Vec3::ZERO.to_array());

    let unit = Box3::new(Vec3::ZERO, Vec3::ONE);
    let merged = empty.union(&unit);
    assert_eq!(merged.min.to_array(), unit.min.to_array());
    assert_eq!(merged.max.to_array(), unit.max.to_array());
}

#[test]
fn expand_by_point_grows_from_empty() {
    let b = Box3::EMPTY
        .expand_by_point(&Vec3::new(1.0, 2.0, 3.0))
        .expand_by_point(&Vec3::new(-1.0, 0.0, 5.0));
    assert_eq!(b.min.to_array(), [-1.0, 0.0, 3.0]);
    assert_eq!(b.max.to_array(), [1.0, 2.0, 5.0]);
}

#[test]
fn contains_point_is_inclusive_at_faces() {
    let b = Box3::new(Vec3::ZERO, Vec3::ONE);
    assert!(b.contains_point(&Vec3::new(0.0, 0.5, 1.0)));
    assert!(!b.contains_point(&Vec3::new(1.000_1, 0.5, 0.5)));
    assert!(!Box3::EMPTY.contains_point(&Vec3::ZERO));
}

#[test]
fn distance_to_point_is_zero_inside_and_euclidean_outside() {
    let b = Box3::new(Vec3::ZERO, Vec3::ONE);
    approx_eq(b.distance_to_point(&Vec3::splat(0.5)), 0.0, 0.0);
    approx_eq(b.distance_to_point(&Vec3::new(2.0, 0.5, 0.5)), 1.0, 1e-6);
    // Corner distance: (2,2,2) to (1,1,1) is sqrt(3).
    approx_eq(
        b.distance_to_point(&Vec3::splat(2.0)),
        3.0_f32.sqrt(),
        1e-6,
    );
}

#[test]
fn box_box_overlap_counts_shared_faces() {
    let a = Box3::new(Vec3::ZERO, Vec3::ONE);
    let touching = Box3::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
    let apart = Box3::new(Vec3::splat(1.5), Vec3::splat(2.5));
    assert!(a.intersects_box(&touching));
    assert!(!a.intersects_box(&apart));
}

#[test]
fn box_sphere_overlap_uses_clamped_distance() {
    let b = Box3::new(Vec3::ZERO, Vec3::ONE);
    assert!(b.intersects_sphere(&Sphere::new(Vec3::new(1.5, 0.5, 0.5), 0.6)));
    assert!(!b.intersects_sphere(&Sphere::new(Vec3::new(1.5, 0.5, 0.5), 0.4)));
}

#[test]
fn box_plane_overlap_checks_projected_interval() {
    let b = Box3::new(Vec3::ZERO, Vec3::ONE);
    // Plane x = 0.5 passes through the box.
    assert!(b.intersects_plane(&Plane::new(Vec3::UNIT_X, -0.5)));
    // Plane x = 2 misses it.
    assert!(!b.intersects_plane(&Plane::new(Vec3::UNIT_X, -2.0)));
}

#[test]
fn box_triangle_sat_accepts_piercing_and_rejects_separated() {
    let b = Box3::new(Vec3::splat(-1.0), Vec3::ONE);
    let piercing = Triangle::new(
        Vec3::new(-2.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
    );
    assert!(b.intersects_triangle(&piercing));

    // Separated along the box face normal X.
    let off_axis = Triangle::new(
        Vec3::new(3.0, -1.0, -1.0),
        Vec3::new(3.0, 1.0, -1.0),
        Vec3::new(3.0, 0.0, 1.0),
    );
    assert!(!b.intersects_triangle(&off_axis));

    // Overlapping in every axis projection but separated along the
    // triangle's own plane normal.
    let diagonal = Triangle::new(
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 4.0, 0.0),
        Vec3::new(0.0, 0.0, 4.0),
    );
    assert!(!b.intersects_triangle(&diagonal));
}

#[test]
fn degenerate_triangle_never_intersects() {
    let b = Box3::new(Vec3::splat(-1.0), Vec3::ONE);
    let flat = Triangle::new(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);
    // Zero-area triangle inside the box: the zero normal axis separates
    // nothing, but the SAT still runs without panicking.
    let _ = b.intersects_triangle(&flat);
}

#[test]
fn transformed_box_stays_axis_aligned_around_rotated_corners() {
    let b = Box3::new(Vec3::splat(-1.0), Vec3::ONE);
    let m = Mat4::from_quat(&Quat::from_axis_angle(
        Vec3::UNIT_Z,
        core::f32::consts::FRAC_PI_4,
    ));
    let t = b.transformed(&m);
    // A 45° Z rotation pushes the XY extent out to sqrt(2).
    let r = 2.0_f32.sqrt();
    approx_eq3(t.min, Vec3::new(-r, -r, -1.0), 1e-5);
    approx_eq3(t.max, Vec3::new(r, r, 1.0), 1e-5);
}

#[test]
fn transformed_empty_box_stays_empty() {
    let t = Box3::EMPTY.transformed(&Mat4::translation(10.0, 10.0, 10.0));
    assert!(t.is_empty());
}

#[test]
fn sphere_from_points_covers_every_input() {
    let points = [
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
    ];
    let s = Sphere::from_points(&points, None);
    assert!(!s.is_empty());
    for p in &points {
        assert!(s.contains_point(p), "point {:?} outside sphere", p.to_array());
    }
    // Forcing a custom center keeps that center verbatim.
    let pinned = Sphere::from_points(&points, Some(Vec3::ZERO));
    assert_eq!(pinned.center.to_array(), [0.0, 0.0, 0.0]);
    approx_eq(pinned.radius, 2.0, 1e-6);
}

#[test]
fn empty_sphere_contains_nothing() {
    assert!(Sphere::EMPTY.is_empty());
    assert!(!Sphere::EMPTY.contains_point(&Vec3::ZERO));
}

#[test]
fn empty_sphere_overlaps_nothing() {
    // The -1 radius sentinel must not leak into the squared-sum test.
    let unit = Sphere::new(Vec3::ZERO, 1.0);
    assert!(!Sphere::EMPTY.intersects_sphere(&unit));
    assert!(!unit.intersects_sphere(&Sphere::EMPTY));
    assert!(!Sphere::EMPTY.intersects_sphere(&Sphere::EMPTY));
}

#[test]
fn sphere_transform_scales_radius_by_largest_axis() {
    let s = Sphere::new(Vec3::ZERO, 1.0);
    let m = Mat4::scaling(2.0, 3.0, 1.0).multiply(&Mat4::translation(1.0, 0.0, 0.0));
    let t = s.transformed(&m);
    approx_eq(t.radius, 3.0, 1e-6);
    approx_eq3(t.center, Vec3::new(2.0, 0.0, 0.0), 1e-6);
}

#[test]
fn box_bounding_sphere_circumscribes_the_box() {
    let b = Box3::new(Vec3::ZERO, Vec3::splat(2.0));
    let s = b.bounding_sphere();
    approx_eq3(s.center, Vec3::ONE, 1e-6);
    approx_eq(s.radius, 3.0_f32.sqrt(), 1e-6);
}

#[test]
fn plane_from_coplanar_points_uses_ccw_winding() {
    let p = Plane::from_coplanar_points(
        &Vec3::ZERO,
        &Vec3::UNIT_X,
        &Vec3::UNIT_Y,
    );
    approx_eq3(p.normal, Vec3::UNIT_Z, 1e-6);
    approx_eq(p.constant, 0.0, 1e-6);
}

#[test]
fn plane_signed_distance_and_projection_agree() {
    let p = Plane::new(Vec3::UNIT_Y, -2.0); // plane y = 2
    let q = Vec3::new(1.0, 5.0, -3.0);
    approx_eq(p.signed_distance_to_point(&q), 3.0, 1e-6);
    approx_eq3(p.project_point(&q), Vec3::new(1.0, 2.0, -3.0), 1e-6);
    approx_eq(p.signed_distance_to_point(&p.coplanar_point()), 0.0, 1e-6);
}

#[test]
fn plane_transform_keeps_points_on_the_plane()  {
    let p = Plane::new(Vec3::UNIT_Y, -1.0); // y = 1
    let m = Mat4::translation(0.0, 2.0, 0.0).multiply(&Mat4::scaling(1.0, 3.0, 1.0));
    let t = p.transformed(&m);
    // y = 1 scaled by 3 then lifted by 2 lands on y = 5.
    let moved = m.transform_point(&Vec3::new(7.0, 1.0, -4.0));
    approx_eq(t.signed_distance_to_point(&moved), 0.0, 1e-4);
    approx_eq(t.normal.length(), 1.0, 1e-5);
}
