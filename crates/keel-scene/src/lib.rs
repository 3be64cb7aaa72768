// SPDX-License-Identifier: Apache-2.0
//! Hierarchical scene graph for the Keel spatial kernel.
//!
//! Nodes own a local transform (position, rotation, scale) and derived
//! local/world matrices; the graph propagates world matrices top-down in a
//! single pass per update call. Ordering is the caller's responsibility:
//! invoke [`SceneGraph::update_world_matrix`] over the subtree of interest
//! once per logical frame, before reading any world matrix (bounding-volume
//! computation, picking, rendering).
//!
//! The graph is a tree, not a DAG: each node has at most one parent, and
//! reparenting detaches from the previous parent first.

mod camera;
mod error;
mod graph;
mod mesh;
mod raycast;
mod rotation;

pub use camera::{Camera, ProjectionKind};
pub use error::SceneError;
pub use graph::{Layers, NodeId, SceneGraph, SpatialNode};
pub use mesh::TriMesh;
pub use raycast::{Hit, Raycaster};
pub use rotation::Rotation;
