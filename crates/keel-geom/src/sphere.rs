// SPDX-License-Identifier: Apache-2.0
use keel_math::{Mat4, Vec3};

use crate::{Box3, Plane};

/// Bounding sphere; a negative radius denotes the empty sphere.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sphere {
    /// Center in the owning coordinate space.
    pub center: Vec3,
    /// Radius; `< 0` means empty.
    pub radius: f32,
}

impl Sphere {
    /// The empty sphere.
    pub const EMPTY: Self = Self {
        center: Vec3::ZERO,
        radius: -1.0,
    };

    /// Constructs a sphere from center and radius.
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Returns `true` if the sphere contains no space.
    pub fn is_empty(&self) -> bool {
        self.radius < 0.0
    }

    /// Builds a sphere enclosing all `points`.
    ///
    /// Two-pass: take `center` if provided (otherwise the center of the
    /// points' bounding box), then the radius is the maximum distance from
    /// that center to any point. Not a minimal bounding sphere, but a
    /// cheap, always-valid superset.
    pub fn from_points(points: &[Vec3], center: Option<Vec3>) -> Self {
        if points.is_empty() {
            return Self::EMPTY;
        }
        let center = center.unwrap_or_else(|| Box3::from_points(points).center());
        let mut max_dist_sq: f32 = 0.0;
        for p in points {
            max_dist_sq = max_dist_sq.max(center.distance_squared_to(p));
        }
        // sqrt rounds toward zero often enough that re-squaring the radius
        // can fall below max_dist_sq and exclude the farthest input; bump
        // one ulp until the containment test covers it.
        let mut radius = max_dist_sq.sqrt();
        while radius * radius < max_dist_sq {
            radius = radius.next_up();
        }
        Self::new(center, radius)
    }

    /// Returns `true` if `point` lies inside or on the sphere.
    ///
    /// The empty sphere contains nothing.
    pub fn contains_point(&self, point: &Vec3) -> bool {
        !self.is_empty() && point.distance_squared_to(&self.center) <= self.radius * self.radius
    }

    /// Signed distance from `point` to the sphere surface (negative inside).
    pub fn distance_to_point(&self, point: &Vec3) -> f32 {
        point.distance_to(&self.center) - self.radius
    }

    /// Returns `true` if the spheres overlap.
    ///
    /// The empty sphere overlaps nothing.
    pub fn intersects_sphere(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let radius_sum = self.radius + other.radius;
        self.center.distance_squared_to(&other.center) <= radius_sum * radius_sum
    }

    /// Returns `true` if the sphere overlaps the box.
    pub fn intersects_box(&self, other: &Box3) -> bool {
        other.intersects_sphere(self)
    }

    /// Returns `true` if the plane cuts through the sphere.
    pub fn intersects_plane(&self, plane: &Plane) -> bool {
        plane.signed_distance_to_point(&self.center).abs() <= self.radius
    }

    /// Sphere bounding this one after transformation by `mat`.
    ///
    /// The center moves with the transform; the radius is scaled by the
    /// largest per-axis scale so the result stays conservative under
    /// non-uniform scale.
    pub fn transformed(&self, mat: &Mat4) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self::new(
            mat.transform_point(&self.center),
            self.radius * mat.max_scale_on_axes(),
        )
    }

    /// Axis-aligned box enclosing the sphere.
    pub fn bounding_box(&self) -> Box3 {
        if self.is_empty() {
            return Box3::EMPTY;
        }
        let half = Vec3::splat(self.radius);
        Box3::new(self.center.sub(&half), self.center.add(&half))
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::EMPTY
    }
}
