// SPDX-License-Identifier: Apache-2.0
#![allow(missing_docs)]
//! Fixture tests for quaternions and ordered Euler angles, including the
//! gimbal-lock extraction branch.

use core::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use keel_math::{Euler, EulerOrder, Mat4, Quat, Vec3};

const ORDERS: [EulerOrder; 6] = [
    EulerOrder::Xyz,
    EulerOrder::Yxz,
    EulerOrder::Zxy,
    EulerOrder::Zyx,
    EulerOrder::Yzx,
    EulerOrder::Xzy,
];

fn approx_eq(a: f32, b: f32, tol: f32) {
    let diff = (a - b).abs();
    assert!(diff <= tol, "expected {b}, got {a} (diff {diff})");
}

fn assert_same_rotation(a: &Mat4, b: &Mat4, tol: f32) {
    let (ae, be) = (a.to_array(), b.to_array());
    for i in 0..16 {
        approx_eq(ae[i], be[i], tol);
    }
}

#[test]
fn quat_from_zero_axis_is_identity() {
    let q = Quat::from_axis_angle(Vec3::ZERO, 1.2);
    assert_eq!(q.to_array(), Quat::identity().to_array());
}

#[test]
fn quat_normalize_zero_norm_returns_identity() {
    let q = Quat::new(0.0, 0.0, 0.0, 0.0);
    assert_eq!(q.normalize().to_array(), Quat::identity().to_array());
}

#[test]
fn slerp_passes_endpoints_through_exactly() {
    let q1 = Quat::from_axis_angle(Vec3::UNIT_Y, 0.3);
    let q2 = Quat::from_axis_angle(Vec3::UNIT_X, -1.1);
    assert_eq!(q1.slerp(&q2, 0.0).to_array(), q1.to_array());
    assert_eq!(q1.slerp(&q2, 1.0).to_array(), q2.to_array());
}

#[test]
fn slerp_midpoint_halves_the_angle() {
    let q1 = Quat::identity();
    let q2 = Quat::from_axis_angle(Vec3::UNIT_Y, FRAC_PI_2);
    let mid = q1.slerp(&q2, 0.5);
    let expected = Quat::from_axis_angle(Vec3::UNIT_Y, FRAC_PI_4);
    let [mx, my, mz, mw] = mid.to_array();
    let [ex, ey, ez, ew] = expected.to_array();
    approx_eq(mx, ex, 1e-6);
    approx_eq(my, ey, 1e-6);
    approx_eq(mz, ez, 1e-6);
    approx_eq(mw, ew, 1e-6);
}

#[test]
fn slerp_takes_the_short_arc() {
    let q1 = Quat::from_axis_angle(Vec3::UNIT_Y, 0.1);
    // Same rotation as -10°, expressed with all components negated
    let q2 = Quat::from_axis_angle(Vec3::UNIT_Y, -0.1);
    let neg = Quat::new(
        -q2.to_array()[0],
        -q2.to_array()[1],
        -q2.to_array()[2],
        -q2.to_array()[3],
    );
    let mid = q1.slerp(&neg, 0.5);
    // Halfway between +0.1 and -0.1 about Y is the identity rotation.
    approx_eq(mid.angle_to(&Quat::identity()), 0.0, 1e-3);
}

#[test]
fn slerp_near_coincident_falls_back_to_lerp_without_nan() {
    let q1 = Quat::from_axis_angle(Vec3::UNIT_Z, 0.5);
    let q2 = Quat::from_axis_angle(Vec3::UNIT_Z, 0.5 + 1e-7);
    let mid = q1.slerp(&q2, 0.5);
    for c in mid.to_array() {
        assert!(c.is_finite(), "slerp produced a non-finite component");
    }
    approx_eq(mid.length(), 1.0, 1e-5);
}

#[test]
fn quat_matrix_roundtrip_covers_all_shepperd_branches() {
    // One rotation per dominant diagonal element plus the trace branch.
    let samples = [
        Quat::from_axis_angle(Vec3::UNIT_Y, 0.2),
        Quat::from_axis_angle(Vec3::UNIT_X, 3.0),
        Quat::from_axis_angle(Vec3::UNIT_Y, 3.0),
        Quat::from_axis_angle(Vec3::UNIT_Z, 3.0),
    ];
    for q in samples {
        let m = q.to_mat4();
        let back = Quat::from_rotation_matrix(&m);
        assert_same_rotation(&back.to_mat4(), &m, 1e-5);
    }
}

#[test]
fn euler_matrix_roundtrip_for_every_order() {
    let angles = Vec3::new(0.3, -0.6, 1.2);
    for order in ORDERS {
        let e = Euler::new(angles.x(), angles.y(), angles.z(), order);
        let m = e.to_rotation_matrix();
        let back = Euler::from_rotation_matrix(&m, order);
        assert_same_rotation(&back.to_rotation_matrix(), &m, 1e-5);
        approx_eq(back.x(), e.x(), 1e-4);
        approx_eq(back.y(), e.y(), 1e-4);
        approx_eq(back.z(), e.z(), 1e-4);
    }
}

#[test]
fn euler_gimbal_lock_still_reconstructs_the_matrix() {
    // ±90° on the middle axis of each order makes the decomposition
    // non-unique; the zeroed-axis choice must still reproduce the matrix.
    for order in ORDERS {
        for sign in [1.0f32, -1.0] {
            let locked = match order {
                EulerOrder::Xyz | EulerOrder::Zyx => {
                    Euler::new(0.4, sign * FRAC_PI_2, -0.7, order)
                }
                EulerOrder::Yxz | EulerOrder::Zxy => {
                    Euler::new(sign * FRAC_PI_2, 0.4, -0.7, order)
                }
                EulerOrder::Yzx | EulerOrder::Xzy => {
                    Euler::new(0.4, -0.7, sign * FRAC_PI_2, order)
                }
            };
            let m = locked.to_rotation_matrix();
            let back = Euler::from_rotation_matrix(&m, order);
            assert_same_rotation(&back.to_rotation_matrix(), &m, 1e-4);
        }
    }
}

#[test]
fn euler_reorder_preserves_the_rotation() {
    let e = Euler::new(0.4, 0.9, -0.2, EulerOrder::Xyz);
    let r = e.reorder(EulerOrder::Zyx);
    assert_eq!(r.order(), EulerOrder::Zyx);
    assert_same_rotation(&r.to_rotation_matrix(), &e.to_rotation_matrix(), 1e-5);
}

#[test]
fn quat_from_euler_matches_matrix_composition() {
    // XYZ intrinsic order equals Rx * Ry * Rz applied in sequence.
    let e = Euler::new(0.5, 0.25, -0.75, EulerOrder::Xyz);
    let via_quat = e.to_quat().to_mat4();
    let via_mats = Mat4::rotation_x(0.5)
        .multiply(&Mat4::rotation_y(0.25))
        .multiply(&Mat4::rotation_z(-0.75));
    assert_same_rotation(&via_quat, &via_mats, 1e-5);
}
