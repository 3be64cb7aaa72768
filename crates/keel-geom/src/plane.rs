// SPDX-License-Identifier: Apache-2.0
use keel_math::{Mat3, Mat4, Vec3, EPSILON};

/// Infinite plane in Hessian normal form.
///
/// Holds a unit `normal` and a `constant` such that
/// `dot(normal, point) + constant = 0` for points on the plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane {
    /// Unit plane normal.
    pub normal: Vec3,
    /// Signed offset along the normal.
    pub constant: f32,
}

impl Plane {
    /// Constructs a plane from a unit normal and constant.
    pub const fn new(normal: Vec3, constant: f32) -> Self {
        Self { normal, constant }
    }

    /// Plane from raw equation components `(x, y, z, w)`, then normalized.
    ///
    /// Used by frustum extraction where the rows of a projection matrix are
    /// un-normalized plane equations.
    pub fn from_components(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self::new(Vec3::new(x, y, z), w).normalized()
    }

    /// Plane through `point` with the given (unit) normal.
    pub fn from_normal_and_point(normal: Vec3, point: &Vec3) -> Self {
        Self::new(normal, -point.dot(&normal))
    }

    /// Plane through three points, with the normal of the `(a, b, c)`
    /// winding (counter-clockwise when seen from the front).
    pub fn from_coplanar_points(a: &Vec3, b: &Vec3, c: &Vec3) -> Self {
        let normal = c.sub(b).cross(&a.sub(b)).normalize();
        Self::from_normal_and_point(normal, a)
    }

    /// Rescales so the normal has unit length.
    ///
    /// A degenerate normal (length ≤ `EPSILON`) leaves the plane unchanged;
    /// the zero normal is already the degenerate sentinel.
    pub fn normalized(&self) -> Self {
        let len = self.normal.length();
        if len <= EPSILON {
            return *self;
        }
        let inv = 1.0 / len;
        Self::new(self.normal.scale(inv), self.constant * inv)
    }

    /// Signed distance from `point` to the plane (positive on the normal
    /// side).
    pub fn signed_distance_to_point(&self, point: &Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }

    /// Orthogonal projection of `point` onto the plane.
    pub fn project_point(&self, point: &Vec3) -> Vec3 {
        point.sub(&self.normal.scale(self.signed_distance_to_point(point)))
    }

    /// A point on the plane (the one closest to the origin).
    pub fn coplanar_point(&self) -> Vec3 {
        self.normal.scale(-self.constant)
    }

    /// Plane after transformation by `mat`.
    ///
    /// The normal transforms by the normal matrix (inverse transpose) so it
    /// stays perpendicular under non-uniform scale.
    pub fn transformed(&self, mat: &Mat4) -> Self {
        let normal_matrix = Mat3::normal_matrix(mat);
        let normal = normal_matrix.transform(&self.normal).normalize();
        let point = mat.transform_point(&self.coplanar_point());
        Self::from_normal_and_point(normal, &point)
    }
}
