// SPDX-License-Identifier: Apache-2.0
use crate::{Mat4, Vec3, EPSILON};

/// Column-major 3×3 matrix (`index = column * 3 + row`).
///
/// Mostly used for normal matrices and the rotation part of a [`Mat4`].
/// Like [`Mat4::invert`], inverting a singular matrix returns the all-zero
/// matrix sentinel.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat3 {
    data: [f32; 9],
}

impl Mat3 {
    /// All-zero matrix, the sentinel returned by a failed inversion.
    pub const ZERO: Self = Self::new([0.0; 9]);

    /// Returns the identity matrix.
    pub const fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, // col 0
                0.0, 1.0, 0.0, // col 1
                0.0, 0.0, 1.0, // col 2
            ],
        }
    }

    /// Creates a matrix from column-major array data.
    pub const fn new(data: [f32; 9]) -> Self {
        Self { data }
    }

    /// Returns the matrix as a column-major array.
    pub fn to_array(self) -> [f32; 9] {
        self.data
    }

    fn at(&self, row: usize, col: usize) -> f32 {
        self.data[col * 3 + row]
    }

    /// Upper-left 3×3 of a 4×4 matrix.
    pub fn from_mat4(m: &Mat4) -> Self {
        Self::new([
            m.at(0, 0),
            m.at(1, 0),
            m.at(2, 0),
            m.at(0, 1),
            m.at(1, 1),
            m.at(2, 1),
            m.at(0, 2),
            m.at(1, 2),
            m.at(2, 2),
        ])
    }

    /// Normal matrix of a model transform: transposed inverse of the
    /// upper-left 3×3. Keeps normals perpendicular under non-uniform scale.
    pub fn normal_matrix(m: &Mat4) -> Self {
        Self::from_mat4(m).invert().transpose()
    }

    /// Multiplies the matrix with another matrix (`self * rhs`).
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut out = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                let mut sum = 0.0;
                for k in 0..3 {
                    sum += self.at(row, k) * rhs.at(k, col);
                }
                out[col * 3 + row] = sum;
            }
        }
        Self::new(out)
    }

    /// Transforms a vector.
    pub fn transform(&self, v: &Vec3) -> Vec3 {
        let [x, y, z] = v.to_array();
        Vec3::new(
            self.at(0, 0) * x + self.at(0, 1) * y + self.at(0, 2) * z,
            self.at(1, 0) * x + self.at(1, 1) * y + self.at(1, 2) * z,
            self.at(2, 0) * x + self.at(2, 1) * y + self.at(2, 2) * z,
        )
    }

    /// Transposes the matrix.
    pub fn transpose(&self) -> Self {
        let mut out = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = self.at(row, col);
            }
        }
        Self::new(out)
    }

    /// Determinant.
    pub fn determinant(&self) -> f32 {
        let n = &self.data;
        let t11 = n[8] * n[4] - n[5] * n[7];
        let t12 = n[5] * n[6] - n[8] * n[3];
        let t13 = n[7] * n[3] - n[4] * n[6];
        n[0] * t11 + n[1] * t12 + n[2] * t13
    }

    /// Inverts the matrix, returning [`Mat3::ZERO`] when degenerate
    /// (|det| ≤ `EPSILON`).
    pub fn invert(&self) -> Self {
        let n = &self.data;
        let (n11, n21, n31) = (n[0], n[1], n[2]);
        let (n12, n22, n32) = (n[3], n[4], n[5]);
        let (n13, n23, n33) = (n[6], n[7], n[8]);

        let t11 = n33 * n22 - n32 * n23;
        let t12 = n32 * n13 - n33 * n12;
        let t13 = n23 * n12 - n22 * n13;

        let det = n11 * t11 + n21 * t12 + n31 * t13;
        if det.abs() <= EPSILON {
            return Self::ZERO;
        }
        let d = 1.0 / det;

        Self::new([
            t11 * d,
            (n31 * n23 - n33 * n21) * d,
            (n32 * n21 - n31 * n22) * d,
            t12 * d,
            (n33 * n11 - n31 * n13) * d,
            (n31 * n12 - n32 * n11) * d,
            t13 * d,
            (n21 * n13 - n23 * n11) * d,
            (n22 * n11 - n21 * n12) * d,
        ])
    }
}

impl From<[f32; 9]> for Mat3 {
    fn from(value: [f32; 9]) -> Self {
        Self { data: value }
    }
}

impl core::ops::Mul for Mat3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}
