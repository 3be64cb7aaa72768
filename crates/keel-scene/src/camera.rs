// SPDX-License-Identifier: Apache-2.0
use keel_geom::Frustum;
use keel_math::{DepthRange, Mat4, Vec3};

/// Camera projection type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionKind {
    /// Perspective projection (objects farther away appear smaller).
    Perspective,
    /// Orthographic projection (no perspective distortion).
    Orthographic,
}

/// Camera state consumed by picking and frustum culling.
///
/// The kernel does not render; this type only pairs a projection matrix
/// with the camera's world transform so rays and frustums can be derived
/// from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Projection type, which decides how picking rays are constructed.
    pub kind: ProjectionKind,
    /// Projection matrix.
    pub projection: Mat4,
    /// Camera world matrix (camera-local to world).
    pub world: Mat4,
    /// Clip-space depth convention the projection was built with.
    pub depth: DepthRange,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
}

impl Camera {
    /// Builds a perspective camera at the origin looking down −Z.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32, depth: DepthRange) -> Self {
        Self {
            kind: ProjectionKind::Perspective,
            projection: Mat4::perspective(fov_y, aspect, near, far, depth),
            world: Mat4::identity(),
            depth,
            near,
            far,
        }
    }

    /// Builds an orthographic camera at the origin looking down −Z.
    pub fn orthographic(
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        near: f32,
        far: f32,
        depth: DepthRange,
    ) -> Self {
        Self {
            kind: ProjectionKind::Orthographic,
            projection: Mat4::orthographic(left, right, top, bottom, near, far, depth),
            world: Mat4::identity(),
            depth,
            near,
            far,
        }
    }

    /// Places the camera at `eye` looking at `target`.
    #[must_use]
    pub fn looking_at(mut self, eye: &Vec3, target: &Vec3, up: &Vec3) -> Self {
        self.world = Mat4::look_at(eye, target, up);
        self
    }

    /// View matrix (inverse of the camera world matrix).
    pub fn view_matrix(&self) -> Mat4 {
        self.world.invert()
    }

    /// Combined `projection × view` matrix.
    pub fn projection_view(&self) -> Mat4 {
        self.projection.multiply(&self.view_matrix())
    }

    /// Maps a point from normalized device coordinates back to world
    /// space. `ndc` carries clip-space x/y in `[-1, 1]` and a depth in the
    /// camera's convention.
    pub fn unproject(&self, ndc: &Vec3) -> Vec3 {
        let inv_projection = self.projection.invert();
        self.world
            .transform_point(&inv_projection.project_point(ndc))
    }

    /// View frustum of this camera, in world space.
    pub fn frustum(&self) -> Frustum {
        Frustum::from_projection_matrix(&self.projection_view(), self.depth)
    }
}
