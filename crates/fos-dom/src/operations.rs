//! DOM Node Operation errors

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
///
/// These only come from misusing node ids; well-formed trees never produce
/// them during a merge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Id out of range, slot discarded, or slot reused by a newer node
    #[error("node {0} not found")]
    NotFound(NodeId),

    /// Inserting a node under itself or one of its descendants
    #[error("hierarchy request error: cannot insert {child} under {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// Reference node is not a child of the given parent
    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// Node has no parent to be replaced in
    #[error("node {0} is detached")]
    Detached(NodeId),

    /// Element operation on a non-element node
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    /// Every addressable slot holds a live node
    #[error("node arena is full")]
    ArenaFull,
}
