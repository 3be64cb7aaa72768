// SPDX-License-Identifier: Apache-2.0
use crate::{clamp, Mat4, Quat};

/// Threshold on the sine entry beyond which the extraction is considered
/// gimbal-locked and the non-unique axis is zeroed.
const GIMBAL_LOCK: f32 = 0.999_999_9;

/// Intrinsic rotation order for [`Euler`] angles.
///
/// The order is part of the value's identity: converting to and from a
/// matrix or quaternion must use the same order both ways or the result is
/// silently wrong.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EulerOrder {
    /// Rotate about X, then Y, then Z.
    #[default]
    Xyz,
    /// Rotate about Y, then X, then Z.
    Yxz,
    /// Rotate about Z, then X, then Y.
    Zxy,
    /// Rotate about Z, then Y, then X.
    Zyx,
    /// Rotate about Y, then Z, then X.
    Yzx,
    /// Rotate about X, then Z, then Y.
    Xzy,
}

/// Euler angles in radians with an explicit rotation order.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Euler {
    x: f32,
    y: f32,
    z: f32,
    order: EulerOrder,
}

impl Euler {
    /// Creates Euler angles from per-axis radians and a rotation order.
    pub const fn new(x: f32, y: f32, z: f32, order: EulerOrder) -> Self {
        Self { x, y, z, order }
    }

    /// Rotation about X in radians.
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Rotation about Y in radians.
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Rotation about Z in radians.
    pub fn z(&self) -> f32 {
        self.z
    }

    /// The rotation order.
    pub fn order(&self) -> EulerOrder {
        self.order
    }

    /// Converts to the equivalent quaternion using this value's order.
    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(self)
    }

    /// Extracts Euler angles from a quaternion in the requested order.
    ///
    /// Goes through the rotation matrix; at gimbal-lock configurations the
    /// decomposition is non-unique and one axis is zeroed (see
    /// [`Euler::from_rotation_matrix`]).
    pub fn from_quat(q: &Quat, order: EulerOrder) -> Self {
        Self::from_rotation_matrix(&q.to_mat4(), order)
    }

    /// Extracts Euler angles from the rotation part of a matrix.
    ///
    /// The upper-left 3×3 must be a pure rotation. Each order has its own
    /// closed-form extraction; when the asin argument's magnitude reaches
    /// ~1 (gimbal lock) the two surviving axes absorb the whole rotation
    /// and the third is set to zero.
    pub fn from_rotation_matrix(m: &Mat4, order: EulerOrder) -> Self {
        let m11 = m.at(0, 0);
        let m12 = m.at(0, 1);
        let m13 = m.at(0, 2);
        let m21 = m.at(1, 0);
        let m22 = m.at(1, 1);
        let m23 = m.at(1, 2);
        let m31 = m.at(2, 0);
        let m32 = m.at(2, 1);
        let m33 = m.at(2, 2);

        let (x, y, z) = match order {
            EulerOrder::Xyz => {
                let y = clamp(m13, -1.0, 1.0).asin();
                if m13.abs() < GIMBAL_LOCK {
                    ((-m23).atan2(m33), y, (-m12).atan2(m11))
                } else {
                    (m32.atan2(m22), y, 0.0)
                }
            }
            EulerOrder::Yxz => {
                let x = (-clamp(m23, -1.0, 1.0)).asin();
                if m23.abs() < GIMBAL_LOCK {
                    (x, m13.atan2(m33), m21.atan2(m22))
                } else {
                    (x, (-m31).atan2(m11), 0.0)
                }
            }
            EulerOrder::Zxy => {
                let x = clamp(m32, -1.0, 1.0).asin();
                if m32.abs() < GIMBAL_LOCK {
                    (x, (-m31).atan2(m33), (-m12).atan2(m22))
                } else {
                    (x, 0.0, m21.atan2(m11))
                }
            }
            EulerOrder::Zyx => {
                let y = (-clamp(m31, -1.0, 1.0)).asin();
                if m31.abs() < GIMBAL_LOCK {
                    (m32.atan2(m33), y, m21.atan2(m11))
                } else {
                    (0.0, y, (-m12).atan2(m22))
                }
            }
            EulerOrder::Yzx => {
                let z = clamp(m21, -1.0, 1.0).asin();
                if m21.abs() < GIMBAL_LOCK {
                    ((-m23).atan2(m22), (-m31).atan2(m11), z)
                } else {
                    (0.0, m13.atan2(m33), z)
                }
            }
            EulerOrder::Xzy => {
                let z = (-clamp(m12, -1.0, 1.0)).asin();
                if m12.abs() < GIMBAL_LOCK {
                    (m32.atan2(m22), m13.atan2(m11), z)
                } else {
                    ((-m23).atan2(m33), 0.0, z)
                }
            }
        };

        Self::new(x, y, z, order)
    }

    /// Converts to a rotation matrix using this value's order.
    pub fn to_rotation_matrix(&self) -> Mat4 {
        self.to_quat().to_mat4()
    }

    /// Returns the same rotation re-expressed in a different order.
    pub fn reorder(&self, order: EulerOrder) -> Self {
        Self::from_quat(&self.to_quat(), order)
    }
}
