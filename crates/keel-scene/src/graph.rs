// SPDX-License-Identifier: Apache-2.0
use std::collections::BTreeMap;
use std::fmt;

use keel_geom::Box3;
use keel_math::{Euler, Mat4, Quat, Vec3};

use crate::{Rotation, SceneError, TriMesh};

/// Identifier for a node in a [`SceneGraph`].
///
/// Ids are issued by a per-graph monotonic counter and stay valid until the
/// node is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 32-bit layer membership mask used to filter picking.
///
/// A node and a raycaster "match" when their masks share a bit. New nodes
/// live on layer 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layers {
    mask: u32,
}

impl Layers {
    /// Membership in layer 0 only.
    pub const DEFAULT: Self = Self { mask: 1 };

    /// Membership in every layer.
    pub const ALL: Self = Self { mask: u32::MAX };

    /// Membership in exactly one layer (0–31).
    pub fn single(layer: u8) -> Self {
        Self {
            mask: 1 << u32::from(layer & 31),
        }
    }

    /// Adds membership in `layer`.
    pub fn enable(&mut self, layer: u8) {
        self.mask |= 1 << u32::from(layer & 31);
    }

    /// Removes membership in `layer`.
    pub fn disable(&mut self, layer: u8) {
        self.mask &= !(1 << u32::from(layer & 31));
    }

    /// Returns `true` if the two masks share any layer.
    pub fn intersects(&self, other: &Self) -> bool {
        self.mask & other.mask != 0
    }
}

impl Default for Layers {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Scene-graph node owning a local transform and derived matrices.
///
/// Invariant: after an update pass, `world_matrix` equals
/// `parent.world_matrix * local_matrix` (or `local_matrix` alone at a
/// root). Between a mutation and the next update call the matrices may be
/// transiently stale; that is the dirty-flag contract, not a bug.
#[derive(Debug, Clone)]
pub struct SpatialNode {
    /// Human-readable label, for diagnostics only.
    pub name: String,
    position: Vec3,
    rotation: Rotation,
    scale: Vec3,
    local_matrix: Mat4,
    world_matrix: Mat4,
    /// When set (the default), `update_world_matrix` recomposes the local
    /// matrix from position/rotation/scale; cleared for nodes whose local
    /// matrix is driven externally.
    pub matrix_auto_update: bool,
    world_matrix_needs_update: bool,
    /// Invisible nodes are skipped by `traverse_visible` and picking,
    /// together with their whole subtree.
    pub visible: bool,
    /// Layer membership used by picking.
    pub layers: Layers,
    mesh: Option<TriMesh>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SpatialNode {
    fn new(name: String) -> Self {
        Self {
            name,
            position: Vec3::ZERO,
            rotation: Rotation::identity(),
            scale: Vec3::ONE,
            local_matrix: Mat4::identity(),
            world_matrix: Mat4::identity(),
            matrix_auto_update: true,
            world_matrix_needs_update: true,
            visible: true,
            layers: Layers::DEFAULT,
            mesh: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Local position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Sets the local position and marks the world matrix stale.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.world_matrix_needs_update = true;
    }

    /// Local rotation (quaternion plus synced Euler view).
    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    /// Sets the local rotation from a quaternion; the Euler view resyncs.
    pub fn set_rotation_quat(&mut self, quat: Quat) {
        self.rotation.set_quat(quat);
        self.world_matrix_needs_update = true;
    }

    /// Sets the local rotation from Euler angles; the quaternion resyncs.
    pub fn set_rotation_euler(&mut self, euler: Euler) {
        self.rotation.set_euler(euler);
        self.world_matrix_needs_update = true;
    }

    /// Local scale.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Sets the local scale and marks the world matrix stale.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.world_matrix_needs_update = true;
    }

    /// Transform relative to the parent, as of the last update pass.
    pub fn local_matrix(&self) -> Mat4 {
        self.local_matrix
    }

    /// Overwrites the local matrix directly.
    ///
    /// Only meaningful with `matrix_auto_update` cleared; otherwise the
    /// next update pass recomposes it from position/rotation/scale.
    pub fn set_local_matrix(&mut self, m: Mat4) {
        self.local_matrix = m;
        self.world_matrix_needs_update = true;
    }

    /// Cumulative transform to the root's space, as of the last update
    /// pass.
    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    /// The parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Ordered child list.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Attached geometry, if any.
    pub fn mesh(&self) -> Option<&TriMesh> {
        self.mesh.as_ref()
    }

    /// Mutable access to the attached geometry.
    pub fn mesh_mut(&mut self) -> Option<&mut TriMesh> {
        self.mesh.as_mut()
    }

    /// Attaches (or replaces) geometry on this node.
    pub fn set_mesh(&mut self, mesh: Option<TriMesh>) {
        self.mesh = mesh;
    }

    /// Recomposes the local matrix from position, rotation, and scale.
    fn refresh_local_matrix(&mut self) {
        if self.matrix_auto_update {
            self.local_matrix =
                Mat4::compose(&self.position, &self.rotation.quat(), &self.scale);
        }
    }
}

/// Tree-shaped store of [`SpatialNode`]s.
///
/// Every node is exclusively owned by the graph; relationships are ids, so
/// reparenting never moves node data. Single-threaded by design: the
/// external render/update loop drives all calls, and world-matrix
/// propagation must complete before dependent reads (a happens-before
/// enforced by call order, not by this type).
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: BTreeMap<NodeId, SpatialNode>,
    next_id: u64,
}

impl SceneGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached root-level node and returns its id.
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, SpatialNode::new(name.into()));
        id
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Shared access to a node.
    pub fn node(&self, id: NodeId) -> Result<&SpatialNode, SceneError> {
        self.nodes.get(&id).ok_or(SceneError::NodeNotFound(id))
    }

    /// Mutable access to a node.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut SpatialNode, SceneError> {
        self.nodes.get_mut(&id).ok_or(SceneError::NodeNotFound(id))
    }

    /// Iterates all live nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SpatialNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    /// Makes `child` a child of `parent`, detaching it from any previous
    /// parent first.
    ///
    /// Self-parenting is rejected as a reported no-op. There is no cycle
    /// detection beyond the self-check; the hierarchy is expected to be
    /// built as a tree.
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if parent == child {
            tracing::warn!(node = %child, "node cannot be added as a child of itself");
            return Err(SceneError::SelfParent(child));
        }
        self.node(parent)?;
        self.node(child)?;

        self.detach(child)?;
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
            node.world_matrix_needs_update = true;
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Removes `child` from `parent`'s child list, making it a root.
    ///
    /// A no-op when `child` is not currently a child of `parent`.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.node(parent)?;
        if self.node(child)?.parent != Some(parent) {
            return Ok(());
        }
        self.detach(child)
    }

    /// Detaches `child` from whatever parent it has, making it a root.
    pub fn detach(&mut self, child: NodeId) -> Result<(), SceneError> {
        let old_parent = self.node(child)?.parent;
        if let Some(p) = old_parent {
            if let Some(parent_node) = self.nodes.get_mut(&p) {
                parent_node.children.retain(|c| *c != child);
            }
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = None;
            node.world_matrix_needs_update = true;
        }
        Ok(())
    }

    /// Reparents `child` under `parent` while preserving its world-space
    /// pose.
    ///
    /// Refreshes the world matrices of both ancestor chains, then sets the
    /// child's local transform to `inverse(parent.world) * child.world`,
    /// decomposed back into position/rotation/scale (Euler view resynced).
    /// A non-invertible parent world matrix leaves the child's local
    /// transform as the raw world transform (the zero-matrix sentinel is
    /// treated as identity), matching the silent-recovery contract of the
    /// math layer.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if parent == child {
            tracing::warn!(node = %child, "node cannot be attached to itself");
            return Err(SceneError::SelfParent(child));
        }
        self.refresh_ancestor_chain(parent)?;
        self.refresh_ancestor_chain(child)?;

        let parent_world = self.node(parent)?.world_matrix;
        let child_world = self.node(child)?.world_matrix;
        let inv = parent_world.invert();
        let new_local = if inv == Mat4::ZERO {
            child_world
        } else {
            inv.multiply(&child_world)
        };

        let (position, quat, scale) = new_local.decompose();
        let node = self.node_mut(child)?;
        node.position = position;
        node.rotation.set_quat(quat);
        node.scale = scale;
        node.local_matrix = new_local;
        node.world_matrix_needs_update = true;

        self.add(parent, child)
    }

    /// Destroys a node and its whole subtree, detaching it from its parent
    /// first. Ids of destroyed nodes become invalid.
    pub fn destroy(&mut self, id: NodeId) -> Result<(), SceneError> {
        self.detach(id)?;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children);
            }
        }
        Ok(())
    }

    /// Recomposes `id`'s local matrix from its position/rotation/scale and
    /// marks its world matrix stale.
    pub fn update_local_matrix(&mut self, id: NodeId) -> Result<(), SceneError> {
        let node = self.node_mut(id)?;
        node.refresh_local_matrix();
        node.world_matrix_needs_update = true;
        Ok(())
    }

    /// Top-down world-matrix propagation over the subtree rooted at `id`.
    ///
    /// Recomputes a node when it is marked stale or `force` is set, then
    /// propagates `force = true` to children with `matrix_auto_update`
    /// enabled so the whole affected subtree recomputes in this single
    /// pass. The parent's world matrix is read as stored; call this on an
    /// ancestor (or the root) first if the ancestors may be stale.
    pub fn update_world_matrix(&mut self, id: NodeId, force: bool) -> Result<(), SceneError> {
        let parent_world = match self.node(id)?.parent {
            Some(p) => Some(self.node(p)?.world_matrix),
            None => None,
        };

        let node = self.node_mut(id)?;
        node.refresh_local_matrix();
        let mut propagate = force;
        if node.world_matrix_needs_update || force {
            node.world_matrix = match parent_world {
                Some(pw) => pw.multiply(&node.local_matrix),
                None => node.local_matrix,
            };
            node.world_matrix_needs_update = false;
            propagate = true;
        }

        let children = node.children.clone();
        for child in children {
            let child_force = propagate && self.node(child)?.matrix_auto_update;
            self.update_world_matrix(child, child_force)?;
        }
        Ok(())
    }

    /// Pre-order depth-first walk from `id`, visiting a node before its
    /// children.
    pub fn traverse<F>(&self, id: NodeId, visitor: &mut F) -> Result<(), SceneError>
    where
        F: FnMut(NodeId, &SpatialNode),
    {
        let node = self.node(id)?;
        visitor(id, node);
        for child in node.children.clone() {
            self.traverse(child, visitor)?;
        }
        Ok(())
    }

    /// Like [`SceneGraph::traverse`], but skips the entire subtree under an
    /// invisible node.
    pub fn traverse_visible<F>(&self, id: NodeId, visitor: &mut F) -> Result<(), SceneError>
    where
        F: FnMut(NodeId, &SpatialNode),
    {
        let node = self.node(id)?;
        if !node.visible {
            return Ok(());
        }
        visitor(id, node);
        for child in node.children.clone() {
            self.traverse_visible(child, visitor)?;
        }
        Ok(())
    }

    /// Unions the world-space geometry bounds of `id`'s subtree into
    /// `bounds`.
    ///
    /// With `precise` set, every vertex position is transformed by the
    /// node's world matrix (exact but costly); otherwise the cached
    /// geometry bounding box is transformed through its eight corners.
    /// World matrices are read as stored; run an update pass first.
    pub fn expand_box_by_node(
        &mut self,
        bounds: Box3,
        id: NodeId,
        precise: bool,
    ) -> Result<Box3, SceneError> {
        let mut out = bounds;
        let world = self.node(id)?.world_matrix;

        if let Some(mesh) = self.node_mut(id)?.mesh_mut() {
            if precise {
                // Exact per-vertex expansion, bypassing the cached box.
                for p in mesh.positions() {
                    out = out.expand_by_point(&world.transform_point(p));
                }
            } else {
                out = out.union(&mesh.bounding_box().transformed(&world));
            }
        }

        for child in self.node(id)?.children.clone() {
            out = self.expand_box_by_node(out, child, precise)?;
        }
        Ok(out)
    }

    /// Refreshes local+world matrices along the root→`id` ancestor chain
    /// (ancestors first), without touching any siblings or descendants.
    fn refresh_ancestor_chain(&mut self, id: NodeId) -> Result<(), SceneError> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(p) = self.node(current)?.parent {
            chain.push(p);
            current = p;
        }
        for &node_id in chain.iter().rev() {
            let parent_world = match self.node(node_id)?.parent {
                Some(p) => Some(self.node(p)?.world_matrix),
                None => None,
            };
            let node = self.node_mut(node_id)?;
            node.refresh_local_matrix();
            node.world_matrix = match parent_world {
                Some(pw) => pw.multiply(&node.local_matrix),
                None => node.local_matrix,
            };
            node.world_matrix_needs_update = false;
        }
        Ok(())
    }
}
