// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

use crate::NodeId;

/// Errors reported by scene-graph operations.
///
/// Hierarchy misuse is reported, not fatal: a rejected call leaves the
/// graph unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The node id does not exist in the graph.
    #[error("node {0} not found")]
    NodeNotFound(NodeId),
    /// A node cannot be added as a child of itself.
    #[error("node {0} cannot be its own parent")]
    SelfParent(NodeId),
}
