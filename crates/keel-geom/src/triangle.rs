// SPDX-License-Identifier: Apache-2.0
use keel_math::{Vec2, Vec3};

/// Triangle defined by three points, used for barycentric interpolation and
/// intersection.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub a: Vec3,
    /// Second vertex.
    pub b: Vec3,
    /// Third vertex.
    pub c: Vec3,
}

impl Triangle {
    /// Constructs a triangle from its vertices.
    pub const fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Unit normal of the `(a, b, c)` winding; zero for a degenerate
    /// triangle.
    pub fn normal(&self) -> Vec3 {
        self.b
            .sub(&self.a)
            .cross(&self.c.sub(&self.a))
            .normalize()
    }

    /// Twice the signed area (length of the edge cross product).
    pub fn area(&self) -> f32 {
        self.b
            .sub(&self.a)
            .cross(&self.c.sub(&self.a))
            .length()
            * 0.5
    }

    /// Barycentric coordinates of `point` relative to the triangle, as
    /// weights `(wa, wb, wc)` summing to 1.
    ///
    /// Returns `None` for a degenerate (collinear) triangle, where the
    /// coordinates are undefined.
    pub fn barycoord(&self, point: &Vec3) -> Option<Vec3> {
        let v0 = self.c.sub(&self.a);
        let v1 = self.b.sub(&self.a);
        let v2 = point.sub(&self.a);

        let dot00 = v0.dot(&v0);
        let dot01 = v0.dot(&v1);
        let dot02 = v0.dot(&v2);
        let dot11 = v1.dot(&v1);
        let dot12 = v1.dot(&v2);

        let denom = dot00 * dot11 - dot01 * dot01;
        if denom == 0.0 {
            return None;
        }
        let inv = 1.0 / denom;
        let u = (dot11 * dot02 - dot01 * dot12) * inv;
        let v = (dot00 * dot12 - dot01 * dot02) * inv;
        Some(Vec3::new(1.0 - u - v, v, u))
    }

    /// Returns `true` if `point` (assumed coplanar) lies inside the
    /// triangle.
    pub fn contains_point(&self, point: &Vec3) -> bool {
        self.barycoord(point).is_some_and(|bary| {
            bary.x() >= 0.0 && bary.y() >= 0.0 && bary.x() + bary.y() <= 1.0
        })
    }

    /// Interpolates per-vertex `Vec3` attributes (e.g. normals) at `point`
    /// using its barycentric coordinates.
    pub fn interpolate(&self, point: &Vec3, va: &Vec3, vb: &Vec3, vc: &Vec3) -> Option<Vec3> {
        let bary = self.barycoord(point)?;
        Some(
            va.scale(bary.x())
                .add(&vb.scale(bary.y()))
                .add(&vc.scale(bary.z())),
        )
    }

    /// Interpolates per-vertex `Vec2` attributes (e.g. UVs) at `point`
    /// using its barycentric coordinates.
    pub fn interpolate_uv(&self, point: &Vec3, va: &Vec2, vb: &Vec2, vc: &Vec2) -> Option<Vec2> {
        let bary = self.barycoord(point)?;
        Some(
            va.scale(bary.x())
                .add(&vb.scale(bary.y()))
                .add(&vc.scale(bary.z())),
        )
    }

    /// Closest point on the triangle to `point`.
    ///
    /// Voronoi-region walk over the vertices, edges, and face.
    pub fn closest_point_to_point(&self, point: &Vec3) -> Vec3 {
        let ab = self.b.sub(&self.a);
        let ac = self.c.sub(&self.a);
        let ap = point.sub(&self.a);

        let d1 = ab.dot(&ap);
        let d2 = ac.dot(&ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return self.a;
        }

        let bp = point.sub(&self.b);
        let d3 = ab.dot(&bp);
        let d4 = ac.dot(&bp);
        if d3 >= 0.0 && d4 <= d3 {
            return self.b;
        }

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let v = d1 / (d1 - d3);
            return self.a.add(&ab.scale(v));
        }

        let cp = point.sub(&self.c);
        let d5 = ab.dot(&cp);
        let d6 = ac.dot(&cp);
        if d6 >= 0.0 && d5 <= d6 {
            return self.c;
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let w = d2 / (d2 - d6);
            return self.a.add(&ac.scale(w));
        }

        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
            return self.b.add(&self.c.sub(&self.b).scale(w));
        }

        let denom = 1.0 / (va + vb + vc);
        let v = vb * denom;
        let w = vc * denom;
        self.a.add(&ab.scale(v)).add(&ac.scale(w))
    }
}
