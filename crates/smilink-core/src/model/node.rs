//! OID tree nodes.

use super::ids::{AssignmentId, NodeId};
use alloc::vec::Vec;

/// A node in the OID tree.
///
/// Intermediate arcs that nothing names get a node without a definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OidNode {
    /// Node identifier.
    pub id: NodeId,
    /// The arc (subidentifier) at this position.
    pub subid: u32,
    /// Parent node, if any.
    pub parent: Option<NodeId>,
    /// Child nodes, sorted by arc.
    pub children: Vec<NodeId>,
    /// Canonical assignment at this OID.
    pub definition: Option<AssignmentId>,
    /// Other assignments resolved to this OID, in canonical order.
    pub shadowed: Vec<AssignmentId>,
}

impl OidNode {
    /// Create a new node without definitions.
    #[must_use]
    pub fn new(id: NodeId, subid: u32, parent: Option<NodeId>) -> Self {
        Self {
            id,
            subid,
            parent,
            children: Vec::new(),
            definition: None,
            shadowed: Vec::new(),
        }
    }

    /// Check if any assignment claims this OID.
    #[must_use]
    pub fn has_definition(&self) -> bool {
        self.definition.is_some()
    }

    /// Check if more than one assignment claims this OID.
    #[must_use]
    pub fn is_contested(&self) -> bool {
        !self.shadowed.is_empty()
    }

    /// Check if this is a leaf node.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Canonical definition followed by the shadowed ones.
    pub fn claimants(&self) -> impl Iterator<Item = AssignmentId> + '_ {
        self.definition.into_iter().chain(self.shadowed.iter().copied())
    }
}
