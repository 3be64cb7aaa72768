// SPDX-License-Identifier: Apache-2.0
use keel_math::{Mat4, Vec3};

use crate::{Box3, Plane, Sphere, Triangle};

/// Ray with an origin and unit direction.
///
/// Intersection methods return the parametric distance `t ≥ 0` along the
/// direction, or `None` when the target is missed or lies entirely behind
/// the origin. With a unit direction, `t` is the world-space distance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    /// Ray origin.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Constructs a ray from an origin and (unit) direction.
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parametric distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin.add(&self.direction.scale(t))
    }

    /// Re-aims the ray at `target`, keeping the origin.
    pub fn look_at(&self, target: &Vec3) -> Self {
        Self::new(self.origin, target.sub(&self.origin).normalize())
    }

    /// Closest point on the ray to `point` (clamped to the origin for
    /// points behind the ray).
    pub fn closest_point_to_point(&self, point: &Vec3) -> Vec3 {
        let t = point.sub(&self.origin).dot(&self.direction);
        if t < 0.0 {
            return self.origin;
        }
        self.at(t)
    }

    /// Distance from the ray to `point`.
    pub fn distance_to_point(&self, point: &Vec3) -> f32 {
        self.closest_point_to_point(point).distance_to(point)
    }

    /// Ray/sphere intersection via the quadratic's geometric form.
    ///
    /// Misses when the closest-approach distance exceeds the radius, or
    /// when both roots are behind the origin. When the origin is inside,
    /// the exit point (the positive root) is returned.
    pub fn intersect_sphere(&self, sphere: &Sphere) -> Option<f32> {
        if sphere.is_empty() {
            return None;
        }
        let to_center = sphere.center.sub(&self.origin);
        let tca = to_center.dot(&self.direction);
        let d2 = to_center.dot(&to_center) - tca * tca;
        let radius2 = sphere.radius * sphere.radius;
        if d2 > radius2 {
            return None;
        }
        let thc = (radius2 - d2).sqrt();
        let t0 = tca - thc;
        let t1 = tca + thc;
        // Both behind the origin
        if t1 < 0.0 {
            return None;
        }
        if t0 < 0.0 {
            return Some(t1);
        }
        Some(t0)
    }

    /// Ray/plane intersection.
    ///
    /// A ray parallel to the plane misses unless its origin lies exactly in
    /// the plane (then `t = 0`). Intersections behind the origin are
    /// rejected.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<f32> {
        let denom = plane.normal.dot(&self.direction);
        if denom == 0.0 {
            if plane.signed_distance_to_point(&self.origin) == 0.0 {
                return Some(0.0);
            }
            return None;
        }
        let t = -plane.signed_distance_to_point(&self.origin) / denom;
        (t >= 0.0).then_some(t)
    }

    /// Slab-method ray/box intersection.
    ///
    /// A ray exactly parallel to a box face with its origin on the slab
    /// boundary produces `0/0 = NaN` for that axis; explicit `is_nan`
    /// checks keep such an axis from corrupting the running interval
    /// (IEEE comparisons with NaN are false, so the interval clamps below
    /// would silently keep the stale bound).
    pub fn intersect_box(&self, box3: &Box3) -> Option<f32> {
        let [ox, oy, oz] = self.origin.to_array();
        let [dx, dy, dz] = self.direction.to_array();

        let inv_dx = 1.0 / dx;
        let inv_dy = 1.0 / dy;
        let inv_dz = 1.0 / dz;

        let (mut tmin, mut tmax) = if inv_dx >= 0.0 {
            ((box3.min.x() - ox) * inv_dx, (box3.max.x() - ox) * inv_dx)
        } else {
            ((box3.max.x() - ox) * inv_dx, (box3.min.x() - ox) * inv_dx)
        };

        let (tymin, tymax) = if inv_dy >= 0.0 {
            ((box3.min.y() - oy) * inv_dy, (box3.max.y() - oy) * inv_dy)
        } else {
            ((box3.max.y() - oy) * inv_dy, (box3.min.y() - oy) * inv_dy)
        };

        if tmin > tymax || tymin > tmax {
            return None;
        }
        if tymin > tmin || tmin.is_nan() {
            tmin = tymin;
        }
        if tymax < tmax || tmax.is_nan() {
            tmax = tymax;
        }

        let (tzmin, tzmax) = if inv_dz >= 0.0 {
            ((box3.min.z() - oz) * inv_dz, (box3.max.z() - oz) * inv_dz)
        } else {
            ((box3.max.z() - oz) * inv_dz, (box3.min.z() - oz) * inv_dz)
        };

        if tmin > tzmax || tzmin > tmax {
            return None;
        }
        if tzmin > tmin || tmin.is_nan() {
            tmin = tzmin;
        }
        if tzmax < tmax || tmax.is_nan() {
            tmax = tzmax;
        }

        // Box entirely behind the ray
        if tmax < 0.0 {
            return None;
        }
        Some(if tmin >= 0.0 { tmin } else { tmax })
    }

    /// Ray/triangle intersection via signed tetrahedron volumes.
    ///
    /// Computes the three signed volumes spanned by the ray and the
    /// triangle edges; negative barycentric weights or a negative
    /// parametric distance reject the hit. With `cull_backfaces` set, hits
    /// on the back side (direction aligned with the triangle normal's
    /// winding) are rejected as well.
    pub fn intersect_triangle(&self, triangle: &Triangle, cull_backfaces: bool) -> Option<f32> {
        let edge1 = triangle.b.sub(&triangle.a);
        let edge2 = triangle.c.sub(&triangle.a);
        let normal = edge1.cross(&edge2);

        let mut d_dot_n = self.direction.dot(&normal);
        let sign;
        if d_dot_n > 0.0 {
            if cull_backfaces {
                return None;
            }
            sign = 1.0;
        } else if d_dot_n < 0.0 {
            sign = -1.0;
            d_dot_n = -d_dot_n;
        } else {
            // Ray lies in (or parallel to) the triangle plane
            return None;
        }

        let diff = self.origin.sub(&triangle.a);

        let b_v = sign * self.direction.dot(&diff.cross(&edge2));
        if b_v < 0.0 {
            return None;
        }
        let b_w = sign * self.direction.dot(&edge1.cross(&diff));
        if b_w < 0.0 {
            return None;
        }
        if b_v + b_w > d_dot_n {
            return None;
        }

        let q_dot_n = -sign * diff.dot(&normal);
        // Triangle behind the ray
        if q_dot_n < 0.0 {
            return None;
        }
        Some(q_dot_n / d_dot_n)
    }

    /// Ray transformed into another coordinate space.
    ///
    /// The direction is re-normalized so parametric distances stay
    /// world-comparable only after mapping hit points back; picking
    /// recomputes distances in world space for exactly this reason.
    pub fn transformed(&self, mat: &Mat4) -> Self {
        Self::new(
            mat.transform_point(&self.origin),
            mat.transform_direction(&self.direction).normalize(),
        )
    }
}
