// SPDX-License-Identifier: Apache-2.0
use keel_math::{DepthRange, Mat4, Vec3};

use crate::{Box3, Plane, Sphere};

/// View frustum as six inward-facing planes.
///
/// Order: right, left, bottom, top, far, near. Derived from a combined
/// `projection × view` matrix; an object is inside when it is on the
/// positive side of all six planes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Constructs a frustum from six inward-facing planes.
    pub const fn new(planes: [Plane; 6]) -> Self {
        Self { planes }
    }

    /// The six planes.
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// Extracts the six planes from a combined projection matrix.
    ///
    /// Each plane is a signed sum of the matrix's rows, normalized
    /// afterwards. The near-plane row differs between the two clip-space
    /// depth conventions, so the convention is an explicit parameter.
    pub fn from_projection_matrix(m: &Mat4, depth: DepthRange) -> Self {
        let e = m.to_array();

        let right = Plane::from_components(e[3] - e[0], e[7] - e[4], e[11] - e[8], e[15] - e[12]);
        let left = Plane::from_components(e[3] + e[0], e[7] + e[4], e[11] + e[8], e[15] + e[12]);
        let bottom = Plane::from_components(e[3] + e[1], e[7] + e[5], e[11] + e[9], e[15] + e[13]);
        let top = Plane::from_components(e[3] - e[1], e[7] - e[5], e[11] - e[9], e[15] - e[13]);
        let far = Plane::from_components(e[3] - e[2], e[7] - e[6], e[11] - e[10], e[15] - e[14]);
        let near = match depth {
            DepthRange::NegativeOneToOne => {
                Plane::from_components(e[3] + e[2], e[7] + e[6], e[11] + e[10], e[15] + e[14])
            }
            // Zero-to-one clip space: the near plane is the z row itself.
            DepthRange::ZeroToOne => Plane::from_components(e[2], e[6], e[10], e[14]),
        };

        Self::new([right, left, bottom, top, far, near])
    }

    /// Returns `true` if `point` lies inside (or on) all six planes.
    pub fn contains_point(&self, point: &Vec3) -> bool {
        self.planes
            .iter()
            .all(|p| p.signed_distance_to_point(point) >= 0.0)
    }

    /// Sphere/frustum test.
    ///
    /// Rejects on the first plane whose signed distance to the center is
    /// below `-radius`; a straddling sphere is kept.
    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        if sphere.is_empty() {
            return false;
        }
        self.planes
            .iter()
            .all(|p| p.signed_distance_to_point(&sphere.center) >= -sphere.radius)
    }

    /// Box/frustum test using the p-vertex: for each plane, only the box
    /// corner farthest along the plane normal needs checking.
    pub fn intersects_box(&self, box3: &Box3) -> bool {
        if box3.is_empty() {
            return false;
        }
        self.planes.iter().all(|plane| {
            let n = plane.normal;
            let far_corner = Vec3::new(
                if n.x() > 0.0 { box3.max.x() } else { box3.min.x() },
                if n.y() > 0.0 { box3.max.y() } else { box3.min.y() },
                if n.z() > 0.0 { box3.max.z() } else { box3.min.z() },
            );
            plane.signed_distance_to_point(&far_corner) >= 0.0
        })
    }
}
