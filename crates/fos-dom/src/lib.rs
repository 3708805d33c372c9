//! fOS DOM - Document Object Model
//!
//! Arena-based DOM tree used by the soft-navigation engine.
//!
//! Every node lives in a single `Vec` owned by a [`DomTree`] and is addressed
//! by a [`NodeId`]: a slot index plus the generation of that slot. Discarded
//! slots are reused, but each reuse bumps the generation, so a `NodeId` is a
//! stable identity for the lifetime of its node: a node that survives a
//! navigation keeps the same id, and a stale id can never alias a newer node.

mod attributes;
mod document;
mod equality;
mod node;
mod operations;
mod tree;

pub use attributes::{Attr, Attributes};
pub use document::Document;
pub use equality::nodes_equal;
pub use node::{ElementData, Namespace, Node, NodeData, NodeType, ScriptMark};
pub use operations::{DomError, DomResult};
pub use tree::{Children, Descendants, DomTree};

use std::fmt;

/// Node identifier (arena slot plus slot generation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    slot: u32,
    generation: u32,
}

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId::new(0, 0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId::new(u32::MAX, 0);

    #[inline]
    pub(crate) const fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }

    /// Check that this is not the `NONE` sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self.slot != u32::MAX
    }

    /// Arena slot index
    #[inline]
    pub fn index(self) -> usize {
        self.slot as usize
    }

    /// How many times the slot had been vacated before this node took it
    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }

    /// Convert a sentinel-style link into an `Option`
    #[inline]
    pub fn some(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_valid(), self.generation) {
            (false, _) => f.write_str("#none"),
            (true, 0) => write!(f, "#{}", self.slot),
            (true, generation) => write!(f, "#{}v{}", self.slot, generation),
        }
    }
}
