// SPDX-License-Identifier: Apache-2.0
use crate::{clamp, Euler, EulerOrder, Mat4, Vec3, EPSILON};

/// Quaternion stored as `(x, y, z, w)`.
///
/// Values are expected to represent a unit rotation after [`Quat::normalize`];
/// raw construction and matrix decomposition may temporarily violate this.
/// All angles are expressed in radians.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quat {
    data: [f32; 4],
}

impl Quat {
    /// Creates a quaternion from components.
    ///
    /// Callers should provide finite components; use
    /// [`Quat::from_axis_angle`] for axis/angle construction.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Returns the identity quaternion.
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Returns the quaternion as an array.
    pub fn to_array(self) -> [f32; 4] {
        self.data
    }

    fn component(&self, idx: usize) -> f32 {
        self.data[idx]
    }

    /// Constructs a quaternion from a rotation axis and angle in radians.
    ///
    /// Returns the identity quaternion when the axis length is ≤ `EPSILON`
    /// to avoid undefined orientations.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let len_sq = axis.length_squared();
        if len_sq <= EPSILON * EPSILON {
            return Self::identity();
        }
        let norm_axis = axis.scale(1.0 / len_sq.sqrt());
        let half = angle * 0.5;
        let (sin_half, cos_half) = half.sin_cos();
        let scaled = norm_axis.scale(sin_half);
        Self::new(scaled.x(), scaled.y(), scaled.z(), cos_half)
    }

    /// Constructs a quaternion from ordered Euler angles.
    ///
    /// Each rotation order has its own closed-form expansion so the result
    /// is the exact inverse of the matrix→Euler extraction for that order.
    pub fn from_euler(euler: &Euler) -> Self {
        let (s1, c1) = (euler.x() * 0.5).sin_cos();
        let (s2, c2) = (euler.y() * 0.5).sin_cos();
        let (s3, c3) = (euler.z() * 0.5).sin_cos();

        match euler.order() {
            EulerOrder::Xyz => Self::new(
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            EulerOrder::Yxz => Self::new(
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
            EulerOrder::Zxy => Self::new(
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            EulerOrder::Zyx => Self::new(
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
            EulerOrder::Yzx => Self::new(
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            EulerOrder::Xzy => Self::new(
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
        }
    }

    /// Extracts a quaternion from the rotation part of a matrix.
    ///
    /// The matrix's upper-left 3×3 must be a pure rotation (scale already
    /// divided out). Branches on the largest diagonal element so the square
    /// root argument stays well away from zero.
    pub fn from_rotation_matrix(m: &Mat4) -> Self {
        let m11 = m.at(0, 0);
        let m12 = m.at(0, 1);
        let m13 = m.at(0, 2);
        let m21 = m.at(1, 0);
        let m22 = m.at(1, 1);
        let m23 = m.at(1, 2);
        let m31 = m.at(2, 0);
        let m32 = m.at(2, 1);
        let m33 = m.at(2, 2);

        let trace = m11 + m22 + m33;
        if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Self::new(
                (m32 - m23) * s,
                (m13 - m31) * s,
                (m21 - m12) * s,
                0.25 / s,
            )
        } else if m11 > m22 && m11 > m33 {
            let s = 2.0 * (1.0 + m11 - m22 - m33).sqrt();
            Self::new(
                0.25 * s,
                (m12 + m21) / s,
                (m13 + m31) / s,
                (m32 - m23) / s,
            )
        } else if m22 > m33 {
            let s = 2.0 * (1.0 + m22 - m11 - m33).sqrt();
            Self::new(
                (m12 + m21) / s,
                0.25 * s,
                (m23 + m32) / s,
                (m13 - m31) / s,
            )
        } else {
            let s = 2.0 * (1.0 + m33 - m11 - m22).sqrt();
            Self::new(
                (m13 + m31) / s,
                (m23 + m32) / s,
                0.25 * s,
                (m21 - m12) / s,
            )
        }
    }

    /// Hamilton product of two quaternions (`self * other`).
    ///
    /// Non-commutative; the result composes the rotation represented by
    /// `other` followed by `self` when applied to vectors.
    pub fn multiply(&self, other: &Self) -> Self {
        let [ax, ay, az, aw] = self.to_array();
        let [bx, by, bz, bw] = other.to_array();

        Self::new(
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }

    /// Dot product with another quaternion.
    pub fn dot(&self, other: &Self) -> f32 {
        let [ax, ay, az, aw] = self.to_array();
        let [bx, by, bz, bw] = other.to_array();
        ax * bx + ay * by + az * bz + aw * bw
    }

    /// Quaternion norm (length).
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Normalises the quaternion; returns identity when the norm ≤ `EPSILON`.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len <= EPSILON {
            return Self::identity();
        }
        let inv = 1.0 / len;
        Self::new(
            self.component(0) * inv,
            self.component(1) * inv,
            self.component(2) * inv,
            self.component(3) * inv,
        )
    }

    /// Conjugate (negated vector part).
    pub fn conjugate(&self) -> Self {
        Self::new(
            -self.component(0),
            -self.component(1),
            -self.component(2),
            self.component(3),
        )
    }

    /// Rotational inverse; for unit quaternions this is the conjugate.
    pub fn invert(&self) -> Self {
        self.conjugate()
    }

    /// Angle in radians between this rotation and another.
    pub fn angle_to(&self, other: &Self) -> f32 {
        2.0 * clamp(self.dot(other).abs(), -1.0, 1.0).acos()
    }

    /// Spherical linear interpolation towards `target` by factor `t`.
    ///
    /// * `t = 0` and `t = 1` pass the endpoints through exactly.
    /// * The shorter arc is always taken (`target` is negated when the dot
    ///   product is negative).
    /// * When the half-angle sine is near zero the path degenerates to
    ///   linear interpolation plus renormalization, avoiding the division
    ///   by `sin` entirely.
    pub fn slerp(&self, target: &Self, t: f32) -> Self {
        if t == 0.0 {
            return *self;
        }
        if t == 1.0 {
            return *target;
        }

        let mut cos_half_theta = self.dot(target);
        let mut end = *target;
        if cos_half_theta < 0.0 {
            end = Self::new(
                -end.component(0),
                -end.component(1),
                -end.component(2),
                -end.component(3),
            );
            cos_half_theta = -cos_half_theta;
        }

        if cos_half_theta >= 1.0 {
            // Rotations coincide
            return *self;
        }

        let sqr_sin_half_theta = 1.0 - cos_half_theta * cos_half_theta;
        if sqr_sin_half_theta <= EPSILON * EPSILON {
            let s = 1.0 - t;
            let lin = Self::new(
                s * self.component(0) + t * end.component(0),
                s * self.component(1) + t * end.component(1),
                s * self.component(2) + t * end.component(2),
                s * self.component(3) + t * end.component(3),
            );
            return lin.normalize();
        }

        let sin_half_theta = sqr_sin_half_theta.sqrt();
        let half_theta = sin_half_theta.atan2(cos_half_theta);
        let ratio_a = ((1.0 - t) * half_theta).sin() / sin_half_theta;
        let ratio_b = (t * half_theta).sin() / sin_half_theta;

        Self::new(
            self.component(0) * ratio_a + end.component(0) * ratio_b,
            self.component(1) * ratio_a + end.component(1) * ratio_b,
            self.component(2) * ratio_a + end.component(2) * ratio_b,
            self.component(3) * ratio_a + end.component(3) * ratio_b,
        )
    }

    /// Converts the quaternion to a rotation matrix (column-major 4×4).
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::compose(&Vec3::ZERO, &self.normalize(), &Vec3::ONE)
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::identity()
    }
}

/// Converts a 4-element `[f32; 4]` array `(x, y, z, w)` into a `Quat`.
/// Components are taken verbatim; normalization is not enforced.
impl From<[f32; 4]> for Quat {
    fn from(value: [f32; 4]) -> Self {
        Self { data: value }
    }
}
