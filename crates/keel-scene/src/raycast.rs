// SPDX-License-Identifier: Apache-2.0
use std::cmp::Ordering;

use keel_geom::Ray;
use keel_math::{DepthRange, Mat3, Mat4, Vec2, Vec3};

use crate::{Camera, Layers, NodeId, ProjectionKind, SceneError, SceneGraph};

/// One ray/mesh intersection record, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// The node whose mesh was hit.
    pub node: NodeId,
    /// World-space distance from the ray origin to the hit point.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Index of the hit triangle in the node's mesh.
    pub triangle_index: usize,
    /// Barycentric-interpolated surface normal (world space), when the
    /// mesh carries normals.
    pub normal: Option<Vec3>,
    /// Barycentric-interpolated texture coordinate, when the mesh carries
    /// UVs.
    pub uv: Option<Vec2>,
}

/// Casts a world-space ray through a node subtree and collects sorted hit
/// records.
///
/// Candidate nodes are pre-rejected with a cheap world-space
/// bounding-sphere test before the exact per-triangle intersection runs in
/// the node's local space.
#[derive(Debug, Clone, Copy)]
pub struct Raycaster {
    /// The world-space ray.
    pub ray: Ray,
    /// Hits closer than this world distance are discarded.
    pub near: f32,
    /// Hits farther than this world distance are discarded.
    pub far: f32,
    /// Only nodes whose layer mask intersects this one are tested.
    pub layers: Layers,
    /// When set (the default), triangles facing away from the ray are
    /// skipped.
    pub cull_backfaces: bool,
}

impl Raycaster {
    /// Creates a raycaster over an explicit world-space ray with an
    /// unbounded clip range.
    pub fn new(ray: Ray) -> Self {
        Self {
            ray,
            near: 0.0,
            far: f32::INFINITY,
            layers: Layers::DEFAULT,
            cull_backfaces: true,
        }
    }

    /// Builds the picking ray for a pointer position in normalized device
    /// coordinates (`[-1, 1]` on both axes).
    ///
    /// Perspective cameras shoot from the camera position through the
    /// unprojected pointer; orthographic cameras shoot along the camera's
    /// −Z from the unprojected pointer on the near plane.
    pub fn from_camera(ndc: Vec2, camera: &Camera) -> Self {
        let ray = match camera.kind {
            ProjectionKind::Perspective => {
                let origin = camera.world.translation_part();
                let target = camera.unproject(&Vec3::new(ndc.x(), ndc.y(), 0.5));
                Ray::new(origin, target.sub(&origin).normalize())
            }
            ProjectionKind::Orthographic => {
                // NDC depth of the near plane in either clip convention.
                let z = match camera.depth {
                    DepthRange::NegativeOneToOne => -1.0,
                    DepthRange::ZeroToOne => 0.0,
                };
                let origin = camera.unproject(&Vec3::new(ndc.x(), ndc.y(), z));
                let direction = camera
                    .world
                    .transform_direction(&Vec3::new(0.0, 0.0, -1.0))
                    .normalize();
                Ray::new(origin, direction)
            }
        };
        Self::new(ray)
    }

    /// Intersects the subtree rooted at `root`, returning hits sorted
    /// ascending by distance.
    ///
    /// Invisible subtrees are skipped entirely; a node whose layer mask
    /// does not intersect the caster's is skipped itself but its children
    /// are still visited. World matrices are read as stored; run an update
    /// pass over the subtree first.
    pub fn intersect(&self, graph: &mut SceneGraph, root: NodeId) -> Result<Vec<Hit>, SceneError> {
        let mut candidates = Vec::new();
        graph.traverse_visible(root, &mut |id, node| {
            if node.layers.intersects(&self.layers) && node.mesh().is_some() {
                candidates.push(id);
            }
        })?;

        let mut hits = Vec::new();
        for id in candidates {
            self.intersect_node(graph, id, &mut hits)?;
        }

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(Ordering::Equal)
        });
        tracing::trace!(hits = hits.len(), "raycast finished");
        Ok(hits)
    }

    fn intersect_node(
        &self,
        graph: &mut SceneGraph,
        id: NodeId,
        hits: &mut Vec<Hit>,
    ) -> Result<(), SceneError> {
        let world = graph.node(id)?.world_matrix();

        let Some(mesh) = graph.node_mut(id)?.mesh_mut() else {
            return Ok(());
        };

        // Cheap world-space pre-rejection before per-triangle work.
        let world_sphere = mesh.bounding_sphere().transformed(&world);
        if self.ray.intersect_sphere(&world_sphere).is_none() {
            return Ok(());
        }

        // Exact tests run in local space: transform the ray once instead
        // of every vertex.
        let inv_world = world.invert();
        if inv_world == Mat4::ZERO {
            // Degenerate world transform; nothing sensible to hit.
            return Ok(());
        }
        let local_ray = self.ray.transformed(&inv_world);
        let normal_matrix = Mat3::normal_matrix(&world);

        for i in 0..mesh.triangle_count() {
            let Some(triangle) = mesh.triangle(i) else {
                continue;
            };
            let Some(t) = local_ray.intersect_triangle(&triangle, self.cull_backfaces) else {
                continue;
            };
            let local_point = local_ray.at(t);
            let point = world.transform_point(&local_point);
            let distance = self.ray.origin.distance_to(&point);
            if distance < self.near || distance > self.far {
                continue;
            }

            let normal = mesh.triangle_normals(i).and_then(|[na, nb, nc]| {
                triangle
                    .interpolate(&local_point, &na, &nb, &nc)
                    .map(|n| normal_matrix.transform(&n).normalize())
            });
            let uv = mesh.triangle_uvs(i).and_then(|[ua, ub, uc]| {
                triangle.interpolate_uv(&local_point, &ua, &ub, &uc)
            });

            hits.push(Hit {
                node: id,
                distance,
                point,
                triangle_index: i,
                normal,
                uv,
            });
        }
        Ok(())
    }
}
