// SPDX-License-Identifier: Apache-2.0
use crate::{EPSILON, Quat, Vec3};

/// Clip-space depth convention used by projection construction and frustum
/// plane extraction.
///
/// The near-plane rows of a projection matrix differ between the two
/// conventions, so everything that reads or writes clip-space depth takes
/// this as a parameter instead of hard-coding one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DepthRange {
    /// GL-style clip space: depth maps to `[-1, 1]`.
    NegativeOneToOne,
    /// D3D/WebGPU-style clip space: depth maps to `[0, 1]`.
    ZeroToOne,
}

/// Column-major 4×4 matrix.
///
/// - Stored in column-major order (`index = column * 4 + row`) to align with
///   GPU uploads.
/// - Represents affine transforms plus the projection constructors; helper
///   methods treat points homogeneously (`w = 1`).
/// - `invert` on a singular matrix returns the all-zero matrix rather than
///   panicking; callers must treat a zero result as "inversion failed".
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat4 {
    data: [f32; 16],
}

impl Mat4 {
    /// All-zero matrix, the sentinel returned by a failed inversion.
    pub const ZERO: Self = Self::new([0.0; 16]);

    /// Returns the identity matrix.
    pub const fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0, // col 0
                0.0, 1.0, 0.0, 0.0, // col 1
                0.0, 0.0, 1.0, 0.0, // col 2
                0.0, 0.0, 0.0, 1.0, // col 3
            ],
        }
    }

    /// Creates a matrix from column-major array data.
    pub const fn new(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// Returns the matrix as a column-major array.
    pub fn to_array(self) -> [f32; 16] {
        self.data
    }

    pub(crate) fn at(&self, row: usize, col: usize) -> f32 {
        self.data[col * 4 + row]
    }

    /// Builds a translation matrix.
    ///
    /// Column-major layout: translation occupies the last column.
    pub const fn translation(tx: f32, ty: f32, tz: f32) -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0, // col 0
                0.0, 1.0, 0.0, 0.0, // col 1
                0.0, 0.0, 1.0, 0.0, // col 2
                tx, ty, tz, 1.0,    // col 3 (translation)
            ],
        }
    }

    /// Builds a non-uniform scale matrix.
    pub const fn scaling(sx: f32, sy: f32, sz: f32) -> Self {
        Self {
            data: [
                sx, 0.0, 0.0, 0.0, // col 0
                0.0, sy, 0.0, 0.0, // col 1
                0.0, 0.0, sz, 0.0, // col 2
                0.0, 0.0, 0.0, 1.0, // col 3
            ],
        }
    }

    /// Builds a rotation matrix around the X axis by `angle` radians.
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            1.0, 0.0, 0.0, 0.0,
            0.0, c,   s,   0.0,
            0.0, -s,  c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Builds a rotation matrix around the Y axis by `angle` radians.
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            c,   0.0, -s,  0.0,
            0.0, 1.0, 0.0, 0.0,
            s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Builds a rotation matrix around the Z axis by `angle` radians.
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            c,   s,   0.0, 0.0,
            -s,  c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Builds a rotation matrix from an axis and angle in radians.
    ///
    /// The axis is normalized internally; a zero-length axis yields the
    /// identity rotation.
    pub fn rotation_axis_angle(axis: Vec3, angle: f32) -> Self {
        Self::from_quat(&Quat::from_axis_angle(axis, angle))
    }

    /// Constructs a rotation matrix from a quaternion.
    pub fn from_quat(q: &Quat) -> Self {
        Self::compose(&Vec3::ZERO, q, &Vec3::ONE)
    }

    /// Multiplies the matrix with another matrix (`self * rhs`).
    ///
    /// Multiplication follows column-major semantics (`self` on the left,
    /// `rhs` on the right) to mirror GPU-style transforms.
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut out = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.at(row, k) * rhs.at(k, col);
                }
                out[col * 4 + row] = sum;
            }
        }
        Self::new(out)
    }

    /// Transforms a point (assumes `w = 1`, no perspective divide).
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        let [x, y, z] = point.to_array();
        let w = 1.0;

        let nx = self.at(0, 0) * x + self.at(0, 1) * y + self.at(0, 2) * z + self.at(0, 3) * w;
        let ny = self.at(1, 0) * x + self.at(1, 1) * y + self.at(1, 2) * z + self.at(1, 3) * w;
        let nz = self.at(2, 0) * x + self.at(2, 1) * y + self.at(2, 2) * z + self.at(2, 3) * w;

        Vec3::new(nx, ny, nz)
    }

    /// Transforms a direction vector (ignores translation, `w = 0`).
    pub fn transform_direction(&self, direction: &Vec3) -> Vec3 {
        let [x, y, z] = direction.to_array();

        let nx = self.at(0, 0) * x + self.at(0, 1) * y + self.at(0, 2) * z;
        let ny = self.at(1, 0) * x + self.at(1, 1) * y + self.at(1, 2) * z;
        let nz = self.at(2, 0) * x + self.at(2, 1) * y + self.at(2, 2) * z;

        Vec3::new(nx, ny, nz)
    }

    /// Transforms a point with the full homogeneous divide.
    ///
    /// Used by projection/unprojection. A resulting `|w| ≤ EPSILON` is
    /// degenerate and yields the zero vector sentinel.
    pub fn project_point(&self, point: &Vec3) -> Vec3 {
        let [x, y, z] = point.to_array();
        let w = self.at(3, 0) * x + self.at(3, 1) * y + self.at(3, 2) * z + self.at(3, 3);
        if w.abs() <= EPSILON {
            return Vec3::ZERO;
        }
        self.transform_point(point).scale(1.0 / w)
    }

    /// Translation column as a vector.
    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(self.at(0, 3), self.at(1, 3), self.at(2, 3))
    }

    /// Transposes the matrix.
    pub fn transpose(&self) -> Self {
        let mut out = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                out[row * 4 + col] = self.at(row, col);
            }
        }
        Self::new(out)
    }

    /// Determinant via cofactor expansion along the first column.
    pub fn determinant(&self) -> f32 {
        let (t11, t12, t13, t14) = self.first_row_cofactors();
        let n = &self.data;
        n[0] * t11 + n[1] * t12 + n[2] * t13 + n[3] * t14
    }

    // Cofactors for column 0 entries, shared by determinant and invert.
    fn first_row_cofactors(&self) -> (f32, f32, f32, f32) {
        let n = &self.data;
        let (n12, n22, n32, n42) = (n[4], n[5], n[6], n[7]);
        let (n13, n23, n33, n43) = (n[8], n[9], n[10], n[11]);
        let (n14, n24, n34, n44) = (n[12], n[13], n[14], n[15]);

        let t11 = n23 * n34 * n42 - n24 * n33 * n42 + n24 * n32 * n43 - n22 * n34 * n43
            - n23 * n32 * n44
            + n22 * n33 * n44;
        let t12 = n14 * n33 * n42 - n13 * n34 * n42 - n14 * n32 * n43 + n12 * n34 * n43
            + n13 * n32 * n44
            - n12 * n33 * n44;
        let t13 = n13 * n24 * n42 - n14 * n23 * n42 + n14 * n22 * n43 - n12 * n24 * n43
            - n13 * n22 * n44
            + n12 * n23 * n44;
        let t14 = n14 * n23 * n32 - n13 * n24 * n32 - n14 * n22 * n33 + n12 * n24 * n33
            + n13 * n22 * n34
            - n12 * n23 * n34;
        (t11, t12, t13, t14)
    }

    /// Inverts the matrix.
    ///
    /// Returns the all-zero matrix when the determinant is degenerate
    /// (|det| ≤ `EPSILON`); callers must treat a zero result as a failed
    /// inversion.
    pub fn invert(&self) -> Self {
        let n = &self.data;
        let (n11, n21, n31, n41) = (n[0], n[1], n[2], n[3]);
        let (n12, n22, n32, n42) = (n[4], n[5], n[6], n[7]);
        let (n13, n23, n33, n43) = (n[8], n[9], n[10], n[11]);
        let (n14, n24, n34, n44) = (n[12], n[13], n[14], n[15]);

        let (t11, t12, t13, t14) = self.first_row_cofactors();
        let det = n11 * t11 + n21 * t12 + n31 * t13 + n41 * t14;
        if det.abs() <= EPSILON {
            return Self::ZERO;
        }
        let d = 1.0 / det;

        Self::new([
            t11 * d,
            (n24 * n33 * n41 - n23 * n34 * n41 - n24 * n31 * n43 + n21 * n34 * n43
                + n23 * n31 * n44
                - n21 * n33 * n44)
                * d,
            (n22 * n34 * n41 - n24 * n32 * n41 + n24 * n31 * n42 - n21 * n34 * n42
                - n22 * n31 * n44
                + n21 * n32 * n44)
                * d,
            (n23 * n32 * n41 - n22 * n33 * n41 - n23 * n31 * n42 + n21 * n33 * n42
                + n22 * n31 * n43
                - n21 * n32 * n43)
                * d,
            t12 * d,
            (n13 * n34 * n41 - n14 * n33 * n41 + n14 * n31 * n43 - n11 * n34 * n43
                - n13 * n31 * n44
                + n11 * n33 * n44)
                * d,
            (n14 * n32 * n41 - n12 * n34 * n41 - n14 * n31 * n42 + n11 * n34 * n42
                + n12 * n31 * n44
                - n11 * n32 * n44)
                * d,
            (n12 * n33 * n41 - n13 * n32 * n41 + n13 * n31 * n42 - n11 * n33 * n42
                - n12 * n31 * n43
                + n11 * n32 * n43)
                * d,
            t13 * d,
            (n14 * n23 * n41 - n13 * n24 * n41 - n14 * n21 * n43 + n11 * n24 * n43
                + n13 * n21 * n44
                - n11 * n23 * n44)
                * d,
            (n12 * n24 * n41 - n14 * n22 * n41 + n14 * n21 * n42 - n11 * n24 * n42
                - n12 * n21 * n44
                + n11 * n22 * n44)
                * d,
            (n13 * n22 * n41 - n12 * n23 * n41 - n13 * n21 * n42 + n11 * n23 * n42
                + n12 * n21 * n43
                - n11 * n22 * n43)
                * d,
            t14 * d,
            (n13 * n24 * n31 - n14 * n23 * n31 + n14 * n21 * n33 - n11 * n24 * n33
                - n13 * n21 * n34
                + n11 * n23 * n34)
                * d,
            (n14 * n22 * n31 - n12 * n24 * n31 - n14 * n21 * n32 + n11 * n24 * n32
                + n12 * n21 * n34
                - n11 * n22 * n34)
                * d,
            (n12 * n23 * n31 - n13 * n22 * n31 + n13 * n21 * n32 - n11 * n23 * n32
                - n12 * n21 * n33
                + n11 * n22 * n33)
                * d,
        ])
    }

    /// Composes a transform from translation, rotation, and scale
    /// (`M = T * R * S`).
    pub fn compose(translation: &Vec3, rotation: &Quat, scale: &Vec3) -> Self {
        let [x, y, z, w] = rotation.to_array();
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, xy, xz) = (x * x2, x * y2, x * z2);
        let (yy, yz, zz) = (y * y2, y * z2, z * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);
        let [sx, sy, sz] = scale.to_array();
        let [tx, ty, tz] = translation.to_array();

        Self::new([
            (1.0 - (yy + zz)) * sx,
            (xy + wz) * sx,
            (xz - wy) * sx,
            0.0,
            (xy - wz) * sy,
            (1.0 - (xx + zz)) * sy,
            (yz + wx) * sy,
            0.0,
            (xz + wy) * sz,
            (yz - wx) * sz,
            (1.0 - (xx + yy)) * sz,
            0.0,
            tx,
            ty,
            tz,
            1.0,
        ])
    }

    /// Decomposes the matrix back into translation, rotation, and scale.
    ///
    /// Per-axis scale is the length of each basis column; when the
    /// determinant is negative the X scale is negated so mirrored transforms
    /// decompose correctly. Basis columns are normalized by their scale
    /// before rotation extraction so skew does not leak into the quaternion.
    pub fn decompose(&self) -> (Vec3, Quat, Vec3) {
        let n = &self.data;
        let mut sx = Vec3::new(n[0], n[1], n[2]).length();
        let sy = Vec3::new(n[4], n[5], n[6]).length();
        let sz = Vec3::new(n[8], n[9], n[10]).length();

        if self.determinant() < 0.0 {
            sx = -sx;
        }

        let translation = self.translation_part();

        let inv_sx = if sx == 0.0 { 0.0 } else { 1.0 / sx };
        let inv_sy = if sy == 0.0 { 0.0 } else { 1.0 / sy };
        let inv_sz = if sz == 0.0 { 0.0 } else { 1.0 / sz };

        let mut rot = *self;
        rot.data[0] *= inv_sx;
        rot.data[1] *= inv_sx;
        rot.data[2] *= inv_sx;
        rot.data[4] *= inv_sy;
        rot.data[5] *= inv_sy;
        rot.data[6] *= inv_sy;
        rot.data[8] *= inv_sz;
        rot.data[9] *= inv_sz;
        rot.data[10] *= inv_sz;

        let rotation = Quat::from_rotation_matrix(&rot);
        (translation, rotation, Vec3::new(sx, sy, sz))
    }

    /// Builds a matrix that places an object at `eye` looking towards
    /// `target`, with `up` as the approximate up direction.
    ///
    /// The rotation basis goes in the upper-left 3×3 and `eye` becomes the
    /// translation column. Degenerate configurations (eye == target, or up
    /// parallel to the view direction) are nudged rather than failed.
    pub fn look_at(eye: &Vec3, target: &Vec3, up: &Vec3) -> Self {
        let mut z = eye.sub(target);
        if z.length_squared() <= EPSILON * EPSILON {
            // eye and target coincide
            z = Vec3::UNIT_Z;
        }
        z = z.normalize();

        let mut x = up.cross(&z);
        if x.length_squared() <= EPSILON * EPSILON {
            // up is parallel to the view direction; nudge z
            z = Vec3::new(z.x() + 0.0001, z.y(), z.z()).normalize();
            x = up.cross(&z);
        }
        x = x.normalize();
        let y = z.cross(&x);

        Self::new([
            x.x(), x.y(), x.z(), 0.0,
            y.x(), y.y(), y.z(), 0.0,
            z.x(), z.y(), z.z(), 0.0,
            eye.x(), eye.y(), eye.z(), 1.0,
        ])
    }

    /// Builds a perspective projection from a vertical field of view
    /// (radians), aspect ratio, and near/far planes.
    ///
    /// The clip-space depth rows differ per [`DepthRange`].
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32, depth: DepthRange) -> Self {
        let top = near * (fov_y * 0.5).tan();
        let height = 2.0 * top;
        let width = aspect * height;
        let left = -0.5 * width;
        Self::frustum(left, left + width, top, top - height, near, far, depth)
    }

    /// Builds a perspective projection from explicit frustum planes at the
    /// near clip distance.
    #[allow(clippy::similar_names)]
    pub fn frustum(
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        near: f32,
        far: f32,
        depth: DepthRange,
    ) -> Self {
        let x = 2.0 * near / (right - left);
        let y = 2.0 * near / (top - bottom);
        let a = (right + left) / (right - left);
        let b = (top + bottom) / (top - bottom);
        let (c, d) = match depth {
            DepthRange::NegativeOneToOne => (
                -(far + near) / (far - near),
                -2.0 * far * near / (far - near),
            ),
            DepthRange::ZeroToOne => (-far / (far - near), -far * near / (far - near)),
        };

        Self::new([
            x, 0.0, 0.0, 0.0, // col 0
            0.0, y, 0.0, 0.0, // col 1
            a, b, c, -1.0,    // col 2
            0.0, 0.0, d, 0.0, // col 3
        ])
    }

    /// Builds an orthographic projection.
    pub fn orthographic(
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        near: f32,
        far: f32,
        depth: DepthRange,
    ) -> Self {
        let w = 1.0 / (right - left);
        let h = 1.0 / (top - bottom);
        let p = 1.0 / (far - near);

        let x = (right + left) * w;
        let y = (top + bottom) * h;
        let (zs, z) = match depth {
            DepthRange::NegativeOneToOne => (-2.0 * p, (far + near) * p),
            DepthRange::ZeroToOne => (-p, near * p),
        };

        Self::new([
            2.0 * w, 0.0, 0.0, 0.0, // col 0
            0.0, 2.0 * h, 0.0, 0.0, // col 1
            0.0, 0.0, zs, 0.0,      // col 2
            -x, -y, -z, 1.0,        // col 3
        ])
    }

    /// Largest scale factor applied by the upper-left 3×3 along any basis
    /// axis. Used to transform bounding-sphere radii conservatively.
    pub fn max_scale_on_axes(&self) -> f32 {
        let n = &self.data;
        let sx = n[0] * n[0] + n[1] * n[1] + n[2] * n[2];
        let sy = n[4] * n[4] + n[5] * n[5] + n[6] * n[6];
        let sz = n[8] * n[8] + n[9] * n[9] + n[10] * n[10];
        sx.max(sy).max(sz).sqrt()
    }
}

impl From<[f32; 16]> for Mat4 {
    fn from(value: [f32; 16]) -> Self {
        Self { data: value }
    }
}

impl core::ops::Mul for Mat4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}
