//! Structural node equality (`isEqualNode`)
//!
//! Two nodes are equal when they have the same kind, the same name and
//! namespace, the same attribute set (order ignored), the same character
//! data, and pairwise-equal children. Identity, position and script
//! execution state do not take part. The nodes may live in different trees.

use crate::{DomTree, NodeData, NodeId};

/// Compare `a` in `a_tree` with `b` in `b_tree`.
///
/// Walks both subtrees in lockstep with an explicit stack, so nesting depth
/// is bounded by memory rather than by the call stack.
pub fn nodes_equal(a_tree: &DomTree, a: NodeId, b_tree: &DomTree, b: NodeId) -> bool {
    let mut pending = vec![(a, b)];
    while let Some((left, right)) = pending.pop() {
        if !shallow_equal(a_tree, left, b_tree, right) {
            return false;
        }

        let mut left_children = a_tree.children(left);
        let mut right_children = b_tree.children(right);
        loop {
            match (left_children.next(), right_children.next()) {
                (None, None) => break,
                (Some(l), Some(r)) => pending.push((l, r)),
                _ => return false,
            }
        }
    }
    true
}

/// Kind, name, attributes and character data; children are not looked at
fn shallow_equal(a_tree: &DomTree, a: NodeId, b_tree: &DomTree, b: NodeId) -> bool {
    let (Some(left), Some(right)) = (a_tree.get(a), b_tree.get(b)) else {
        return false;
    };

    match (&left.data, &right.data) {
        (NodeData::Document, NodeData::Document) => true,
        (
            NodeData::Doctype { name: n1, public_id: p1, system_id: s1 },
            NodeData::Doctype { name: n2, public_id: p2, system_id: s2 },
        ) => n1 == n2 && p1 == p2 && s1 == s2,
        (NodeData::Element(e1), NodeData::Element(e2)) => {
            e1.name == e2.name && e1.namespace == e2.namespace && e1.attrs == e2.attrs
        }
        (NodeData::Text(t1), NodeData::Text(t2)) => t1 == t2,
        (NodeData::Comment(c1), NodeData::Comment(c2)) => c1 == c2,
        _ => false,
    }
}

impl DomTree {
    /// Structural equality of two nodes of this tree
    pub fn is_equal_node(&self, a: NodeId, b: NodeId) -> bool {
        nodes_equal(self, a, self, b)
    }
}
