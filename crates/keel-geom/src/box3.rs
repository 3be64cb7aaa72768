// SPDX-License-Identifier: Apache-2.0
use keel_math::{Mat4, Vec3};

use crate::{Plane, Sphere, Triangle};

/// Axis-aligned bounding box.
///
/// The empty state is representable (`min = +∞`, `max = −∞`) and is the
/// identity for [`Box3::union`] and [`Box3::expand_by_point`]; use
/// [`Box3::is_empty`] to distinguish it. "Bounding volume empty" is a
/// normal state, not an error.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Box3 {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Box3 {
    /// The empty box (`min = +∞`, `max = −∞`).
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Constructs a box from its minimum and maximum corners.
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Returns `true` if the box contains no space.
    pub fn is_empty(&self) -> bool {
        self.max.x() < self.min.x() || self.max.y() < self.min.y() || self.max.z() < self.min.z()
    }

    /// Builds the minimal box containing all `points`; empty when the slice
    /// is empty.
    pub fn from_points(points: &[Vec3]) -> Self {
        let mut out = Self::EMPTY;
        for p in points {
            out = out.expand_by_point(p);
        }
        out
    }

    /// Expands the box to contain `point` (running min/max).
    pub fn expand_by_point(&self, point: &Vec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Expands the box by a uniform margin in all directions.
    pub fn expand_by_scalar(&self, margin: f32) -> Self {
        let delta = Vec3::splat(margin);
        Self {
            min: self.min.sub(&delta),
            max: self.max.add(&delta),
        }
    }

    /// Returns the union of two boxes.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(&other.min),
            max: self.max.max(&other.max),
        }
    }

    /// Center of the box; zero for an empty box.
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        self.min.add(&self.max).scale(0.5)
    }

    /// Size of the box along each axis; zero for an empty box.
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        self.max.sub(&self.min)
    }

    /// Returns `true` if `point` lies inside or on the box.
    pub fn contains_point(&self, point: &Vec3) -> bool {
        point.x() >= self.min.x()
            && point.x() <= self.max.x()
            && point.y() >= self.min.y()
            && point.y() <= self.max.y()
            && point.z() >= self.min.z()
            && point.z() <= self.max.z()
    }

    /// Clamps `point` to the box bounds.
    pub fn clamp_point(&self, point: &Vec3) -> Vec3 {
        point.clamp(&self.min, &self.max)
    }

    /// Distance from `point` to the nearest surface of the box; zero inside.
    pub fn distance_to_point(&self, point: &Vec3) -> f32 {
        self.clamp_point(point).distance_to(point)
    }

    /// Returns `true` if this box overlaps another (inclusive on faces).
    pub fn intersects_box(&self, other: &Self) -> bool {
        !(other.max.x() < self.min.x()
            || other.min.x() > self.max.x()
            || other.max.y() < self.min.y()
            || other.min.y() > self.max.y()
            || other.max.z() < self.min.z()
            || other.min.z() > self.max.z())
    }

    /// Returns `true` if the sphere overlaps the box.
    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        self.distance_to_point(&sphere.center) <= sphere.radius
    }

    /// Returns `true` if the plane cuts through the box.
    pub fn intersects_plane(&self, plane: &Plane) -> bool {
        // Project the box extent onto the plane normal and compare the
        // interval against the plane constant.
        let mut min = 0.0;
        let mut max = 0.0;
        let n = plane.normal;
        for axis in 0..3 {
            let (lo, hi) = if n[axis] > 0.0 {
                (n[axis] * self.min[axis], n[axis] * self.max[axis])
            } else {
                (n[axis] * self.max[axis], n[axis] * self.min[axis])
            };
            min += lo;
            max += hi;
        }
        min <= -plane.constant && max >= -plane.constant
    }

    /// Separating-axis test between the box and a triangle.
    ///
    /// Tests 13 candidate axes: the 9 cross products of box edges with
    /// triangle edges, the 3 box face normals, and the triangle's own
    /// normal. Any axis with disjoint projections proves non-intersection.
    pub fn intersects_triangle(&self, triangle: &Triangle) -> bool {
        if self.is_empty() {
            return false;
        }

        let center = self.center();
        let extents = self.max.sub(&center);

        // Triangle vertices relative to box center, and edge vectors.
        let v0 = triangle.a.sub(&center);
        let v1 = triangle.b.sub(&center);
        let v2 = triangle.c.sub(&center);
        let f0 = v1.sub(&v0);
        let f1 = v2.sub(&v1);
        let f2 = v0.sub(&v2);

        // 9 cross-product axes (box unit axes × triangle edges).
        let axes = [
            Vec3::new(0.0, -f0.z(), f0.y()),
            Vec3::new(0.0, -f1.z(), f1.y()),
            Vec3::new(0.0, -f2.z(), f2.y()),
            Vec3::new(f0.z(), 0.0, -f0.x()),
            Vec3::new(f1.z(), 0.0, -f1.x()),
            Vec3::new(f2.z(), 0.0, -f2.x()),
            Vec3::new(-f0.y(), f0.x(), 0.0),
            Vec3::new(-f1.y(), f1.x(), 0.0),
            Vec3::new(-f2.y(), f2.x(), 0.0),
        ];
        if !sat_overlap(&axes, &v0, &v1, &v2, &extents) {
            return false;
        }

        // 3 box face normals.
        let face_axes = [Vec3::UNIT_X, Vec3::UNIT_Y, Vec3::UNIT_Z];
        if !sat_overlap(&face_axes, &v0, &v1, &v2, &extents) {
            return false;
        }

        // Triangle normal.
        let normal = f0.cross(&f1);
        sat_overlap(&[normal], &v0, &v1, &v2, &extents)
    }

    /// Computes the box bounding this one after transformation by `mat`.
    ///
    /// Evaluates the eight corners under the affine transform and rebuilds
    /// an axis-aligned box around them. An empty box stays empty.
    pub fn transformed(&self, mat: &Mat4) -> Self {
        if self.is_empty() {
            return *self;
        }
        let [minx, miny, minz] = self.min.to_array();
        let [maxx, maxy, maxz] = self.max.to_array();
        let corners = [
            Vec3::new(minx, miny, minz),
            Vec3::new(minx, miny, maxz),
            Vec3::new(minx, maxy, minz),
            Vec3::new(minx, maxy, maxz),
            Vec3::new(maxx, miny, minz),
            Vec3::new(maxx, miny, maxz),
            Vec3::new(maxx, maxy, minz),
            Vec3::new(maxx, maxy, maxz),
        ];
        let mut out = Self::EMPTY;
        for c in &corners {
            out = out.expand_by_point(&mat.transform_point(c));
        }
        out
    }

    /// Sphere through the box center enclosing the whole box.
    pub fn bounding_sphere(&self) -> Sphere {
        if self.is_empty() {
            return Sphere::EMPTY;
        }
        let center = self.center();
        Sphere::new(center, self.size().length() * 0.5)
    }
}

impl Default for Box3 {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Projects the triangle and the box extents onto each axis; returns false
/// as soon as a separating axis is found.
fn sat_overlap(axes: &[Vec3], v0: &Vec3, v1: &Vec3, v2: &Vec3, extents: &Vec3) -> bool {
    for axis in axes {
        let p0 = v0.dot(axis);
        let p1 = v1.dot(axis);
        let p2 = v2.dot(axis);
        let r = extents.x() * axis.x().abs()
            + extents.y() * axis.y().abs()
            + extents.z() * axis.z().abs();
        let lo = p0.min(p1).min(p2);
        let hi = p0.max(p1).max(p2);
        if lo.max(-hi) > r {
            return false;
        }
    }
    true
}
