//! DOM Tree (arena-based allocation)
//!
//! Nodes live in a single `Vec` and are linked through `NodeId`s.
//! Removing a subtree turns its slots into `NodeData::Vacant` and queues them
//! for reuse. Every slot carries a generation that is bumped when the slot is
//! vacated, so an id held past its node's removal never matches the node that
//! takes the slot next. A slot whose generation is exhausted is retired.
//!
//! Arena size therefore follows the largest number of nodes alive at once,
//! not the number of nodes ever created.

use crate::{DomError, DomResult, ElementData, Node, NodeData, NodeId, ScriptMark};

/// Arena-based DOM tree
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
    generations: Vec<u32>,
    /// Vacant slots ready for reuse
    free: Vec<u32>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            generations: vec![0],
            free: Vec::new(),
        }
    }

    /// Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a live node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if !self.is_current(id) {
            return None;
        }
        self.nodes.get(id.index()).filter(|n| !n.is_vacant())
    }

    /// Get a mutable live node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !self.is_current(id) {
            return None;
        }
        self.nodes.get_mut(id.index()).filter(|n| !n.is_vacant())
    }

    /// The id's generation matches its slot
    #[inline]
    fn is_current(&self, id: NodeId) -> bool {
        self.generations.get(id.index()).copied() == Some(id.generation())
    }

    /// Check that `id` refers to a live (non-discarded) node
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of arena slots, including vacant ones awaiting reuse
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes that have not been discarded
    pub fn live_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.is_vacant()).count()
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    /// Place an unlinked node in a vacant slot, or grow the arena.
    ///
    /// Fails only when every slot index below the `NONE` sentinel is live.
    pub fn alloc(&mut self, node: Node) -> DomResult<NodeId> {
        if let Some(slot) = self.free.pop() {
            let index = slot as usize;
            self.nodes[index] = node;
            return Ok(NodeId::new(slot, self.generations[index]));
        }

        let slot = u32::try_from(self.nodes.len())
            .ok()
            .filter(|&slot| slot != NodeId::NONE.slot)
            .ok_or(DomError::ArenaFull)?;
        self.nodes.push(node);
        self.generations.push(0);
        Ok(NodeId::new(slot, 0))
    }

    /// Vacate a slot and queue it for reuse under the next generation
    fn release(&mut self, id: NodeId) {
        let index = id.index();
        self.nodes[index] = Node::new(NodeData::Vacant);
        if let Some(next) = self.generations[index].checked_add(1) {
            self.generations[index] = next;
            self.free.push(id.slot);
        }
    }

    /// Create a detached HTML element
    pub fn create_element(&mut self, name: &str) -> DomResult<NodeId> {
        self.alloc(Node::element(ElementData::new(name)))
    }

    /// Create a detached element from prepared data
    pub fn create_element_with(&mut self, data: ElementData) -> DomResult<NodeId> {
        self.alloc(Node::element(data))
    }

    pub fn create_text(&mut self, text: &str) -> DomResult<NodeId> {
        self.alloc(Node::text(text))
    }

    pub fn create_comment(&mut self, text: &str) -> DomResult<NodeId> {
        self.alloc(Node::new(NodeData::Comment(text.to_string())))
    }

    pub fn create_doctype(
        &mut self,
        name: &str,
        public_id: &str,
        system_id: &str,
    ) -> DomResult<NodeId> {
        self.alloc(Node::new(NodeData::Doctype {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        }))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id)?.as_element_mut()
    }

    /// Attribute value of an element
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attr(name)
    }

    /// Check for an HTML element with the given tag
    pub fn is_element_named(&self, id: NodeId, tag: &str) -> bool {
        self.element(id).is_some_and(|e| e.is(tag))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent.some()
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.first_child.some()
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.next_sibling.some()
    }

    /// Iterate direct children in order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Snapshot of the direct children, for loops that mutate the tree
    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).collect()
    }

    /// Direct children that are elements
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .filter(move |&child| self.get(child).is_some_and(Node::is_element))
    }

    /// Pre-order walk over all descendants of `id` (excluding `id`)
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// True if `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = self.get(current).map_or(NodeId::NONE, |n| n.parent);
        }
        false
    }

    /// True if the node is reachable from the document node
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(id) && self.is_inclusive_ancestor(NodeId::ROOT, id)
    }

    /// Concatenated text of the node and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.get(id) else {
            return String::new();
        };
        match &node.data {
            NodeData::Text(text) | NodeData::Comment(text) => text.clone(),
            _ => self
                .descendants(id)
                .filter_map(|d| self.get(d).and_then(Node::as_text))
                .collect(),
        }
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Unlink a node from its parent. Detached nodes are left alone.
    pub fn detach(&mut self, id: NodeId) -> DomResult<()> {
        let (parent, prev, next) = {
            let node = self.node(id)?;
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return Ok(());
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
        Ok(())
    }

    /// Append a child, moving it out of its current parent first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference`, or at the end when `reference` is `None`
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<()> {
        self.node(parent)?;
        self.node(child)?;
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        // Inserting a node before itself means "before its next sibling"
        let reference = match reference {
            Some(r) if r == child => self.next_sibling(child),
            other => other,
        };
        if let Some(r) = reference {
            if self.node(r)?.parent != parent {
                return Err(DomError::NotAChild { parent, child: r });
            }
        }

        self.detach(child)?;
        match reference {
            None => self.link_last(parent, child),
            Some(r) => {
                let prev = self.nodes[r.index()].prev_sibling;
                {
                    let node = &mut self.nodes[child.index()];
                    node.parent = parent;
                    node.prev_sibling = prev;
                    node.next_sibling = r;
                }
                self.nodes[r.index()].prev_sibling = child;
                if prev.is_valid() {
                    self.nodes[prev.index()].next_sibling = child;
                } else {
                    self.nodes[parent.index()].first_child = child;
                }
            }
        }
        Ok(())
    }

    /// Put `new` where `old` is; `old` ends up detached
    pub fn replace_with(&mut self, old: NodeId, new: NodeId) -> DomResult<()> {
        let parent = self.node(old)?.parent;
        if !parent.is_valid() {
            return Err(DomError::Detached(old));
        }
        if old == new {
            return Ok(());
        }
        self.node(new)?;
        if self.is_inclusive_ancestor(new, parent) {
            return Err(DomError::HierarchyRequest { parent, child: new });
        }

        self.detach(new)?;
        let next = self.nodes[old.index()].next_sibling;
        self.detach(old)?;
        self.insert_before(parent, new, next.some())
    }

    /// Detach a subtree and vacate every slot in it.
    ///
    /// Ids into the subtree go stale: they stop resolving and never match
    /// whatever later reuses the slots.
    pub fn discard_subtree(&mut self, id: NodeId) -> DomResult<()> {
        if id == NodeId::ROOT {
            return Err(DomError::HierarchyRequest {
                parent: NodeId::NONE,
                child: id,
            });
        }
        self.detach(id)?;
        let doomed: Vec<NodeId> = std::iter::once(id).chain(self.descendants(id)).collect();
        for node in doomed {
            self.release(node);
        }
        Ok(())
    }

    /// Discard every child of a node
    pub fn clear_children(&mut self, id: NodeId) -> DomResult<()> {
        for child in self.child_ids(id) {
            self.discard_subtree(child)?;
        }
        Ok(())
    }

    /// Copy a single node (no children) from another tree.
    ///
    /// Script elements always arrive `Inert`: moving markup between trees
    /// never makes a script runnable.
    pub fn import_node(&mut self, source: &DomTree, id: NodeId) -> DomResult<NodeId> {
        let mut data = source.node(id)?.data.clone();
        if let NodeData::Element(elem) = &mut data {
            elem.script = ScriptMark::Inert;
        }
        self.alloc(Node::new(data))
    }

    /// Deep copy of a subtree from another tree; the copy is detached
    pub fn import_subtree(&mut self, source: &DomTree, id: NodeId) -> DomResult<NodeId> {
        let copy = self.import_node(source, id)?;
        let mut stack = vec![(id, copy)];
        while let Some((src, dst)) = stack.pop() {
            for child in source.children(src) {
                let imported = self.import_node(source, child)?;
                self.link_last(dst, imported);
                stack.push((child, imported));
            }
        }
        Ok(copy)
    }

    /// Link a detached node as last child without any checks
    fn link_last(&mut self, parent: NodeId, child: NodeId) {
        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next.some()?;
        self.next = self.tree.get(current).map_or(NodeId::NONE, |n| n.next_sibling);
        Some(current)
    }
}

/// Pre-order iterator over a subtree, excluding its root
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next.some()?;
        let node = self.tree.get(current)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            let mut climb = current;
            loop {
                if climb == self.root {
                    break NodeId::NONE;
                }
                let Some(n) = self.tree.get(climb) else {
                    break NodeId::NONE;
                };
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                climb = n.parent;
                if !climb.is_valid() {
                    break NodeId::NONE;
                }
            }
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_list() -> (DomTree, NodeId, [NodeId; 3]) {
        let mut tree = DomTree::new();
        let ul = tree.create_element("ul").unwrap();
        tree.append_child(tree.root(), ul).unwrap();
        let items = [
            tree.create_element("li").unwrap(),
            tree.create_element("li").unwrap(),
            tree.create_element("li").unwrap(),
        ];
        for item in items {
            tree.append_child(ul, item).unwrap();
        }
        (tree, ul, items)
    }

    #[test]
    fn test_append_and_children() {
        let (tree, ul, items) = tree_with_list();
        assert_eq!(tree.child_ids(ul), items.to_vec());
        assert_eq!(tree.parent(items[1]), Some(ul));
        assert!(tree.is_connected(items[2]));
    }

    #[test]
    fn test_insert_before() {
        let (mut tree, ul, items) = tree_with_list();
        let extra = tree.create_element("li").unwrap();
        tree.insert_before(ul, extra, Some(items[1])).unwrap();
        assert_eq!(tree.child_ids(ul), vec![items[0], extra, items[1], items[2]]);
    }

    #[test]
    fn test_insert_before_self_is_noop_move() {
        let (mut tree, ul, items) = tree_with_list();
        tree.insert_before(ul, items[1], Some(items[1])).unwrap();
        assert_eq!(tree.child_ids(ul), items.to_vec());
    }

    #[test]
    fn test_move_reorders() {
        let (mut tree, ul, items) = tree_with_list();
        tree.append_child(ul, items[0]).unwrap();
        assert_eq!(tree.child_ids(ul), vec![items[1], items[2], items[0]]);
    }

    #[test]
    fn test_detach() {
        let (mut tree, ul, items) = tree_with_list();
        tree.detach(items[1]).unwrap();
        assert_eq!(tree.child_ids(ul), vec![items[0], items[2]]);
        assert_eq!(tree.parent(items[1]), None);
        assert!(tree.contains(items[1]));
        // Detaching twice is fine
        tree.detach(items[1]).unwrap();
    }

    #[test]
    fn test_replace_with_keeps_position() {
        let (mut tree, ul, items) = tree_with_list();
        let fresh = tree.create_element("li").unwrap();
        tree.replace_with(items[1], fresh).unwrap();
        assert_eq!(tree.child_ids(ul), vec![items[0], fresh, items[2]]);
        assert_eq!(tree.parent(items[1]), None);
    }

    #[test]
    fn test_replace_with_next_sibling() {
        let (mut tree, ul, items) = tree_with_list();
        tree.replace_with(items[0], items[1]).unwrap();
        assert_eq!(tree.child_ids(ul), vec![items[1], items[2]]);
    }

    #[test]
    fn test_replace_detached_fails() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a").unwrap();
        let b = tree.create_element("b").unwrap();
        assert_eq!(tree.replace_with(a, b), Err(DomError::Detached(a)));
    }

    #[test]
    fn test_hierarchy_error() {
        let (mut tree, ul, items) = tree_with_list();
        assert!(matches!(
            tree.append_child(items[0], ul),
            Err(DomError::HierarchyRequest { .. })
        ));
        assert!(matches!(
            tree.append_child(ul, ul),
            Err(DomError::HierarchyRequest { .. })
        ));
    }

    #[test]
    fn test_not_a_child() {
        let (mut tree, ul, _) = tree_with_list();
        let stray = tree.create_element("li").unwrap();
        let other = tree.create_element("li").unwrap();
        assert_eq!(
            tree.insert_before(ul, other, Some(stray)),
            Err(DomError::NotAChild { parent: ul, child: stray })
        );
    }

    #[test]
    fn test_discard_subtree_vacates() {
        let (mut tree, ul, items) = tree_with_list();
        let before = tree.live_count();
        tree.discard_subtree(ul).unwrap();
        assert!(!tree.contains(ul));
        assert!(items.iter().all(|&i| !tree.contains(i)));
        assert_eq!(tree.live_count(), before - 4);
        assert_eq!(tree.append_child(tree.root(), ul), Err(DomError::NotFound(ul)));
    }

    #[test]
    fn test_slots_reused_under_new_generation() {
        let (mut tree, ul, items) = tree_with_list();
        let slots = tree.len();
        tree.discard_subtree(ul).unwrap();

        let fresh: Vec<NodeId> = (0..4).map(|_| tree.create_element("p").unwrap()).collect();
        assert_eq!(tree.len(), slots);
        assert!(fresh.iter().all(|id| id.generation() == 1));
        // Stale ids never resolve to the nodes that took their slots
        assert!(!tree.contains(ul));
        assert!(items.iter().all(|&i| !tree.contains(i)));
        assert!(fresh.iter().all(|&p| tree.contains(p)));
    }

    #[test]
    fn test_stale_id_rejected_by_mutations() {
        let mut tree = DomTree::new();
        let old = tree.create_element("div").unwrap();
        tree.append_child(tree.root(), old).unwrap();
        tree.discard_subtree(old).unwrap();
        let new = tree.create_element("span").unwrap();
        assert_eq!(new.index(), old.index());

        assert_eq!(tree.append_child(tree.root(), old), Err(DomError::NotFound(old)));
        assert!(tree.element(old).is_none());
        assert!(tree.is_element_named(new, "span"));
    }

    #[test]
    fn test_arena_bounded_by_live_nodes() {
        let mut tree = DomTree::new();
        let mut current = tree.create_element("body").unwrap();
        tree.append_child(tree.root(), current).unwrap();
        for _ in 0..50 {
            let next = tree.create_element("body").unwrap();
            for _ in 0..20 {
                let p = tree.create_element("p").unwrap();
                tree.append_child(next, p).unwrap();
            }
            tree.replace_with(current, next).unwrap();
            tree.discard_subtree(current).unwrap();
            current = next;
        }
        assert_eq!(tree.live_count(), 22);
        assert!(tree.len() <= 2 * 22, "arena grew to {} slots", tree.len());
    }

    #[test]
    fn test_descendants_preorder() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div").unwrap();
        let p = tree.create_element("p").unwrap();
        let text = tree.create_text("hi").unwrap();
        let span = tree.create_element("span").unwrap();
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, p).unwrap();
        tree.append_child(p, text).unwrap();
        tree.append_child(div, span).unwrap();

        let order: Vec<NodeId> = tree.descendants(tree.root()).collect();
        assert_eq!(order, vec![div, p, text, span]);

        let scoped: Vec<NodeId> = tree.descendants(p).collect();
        assert_eq!(scoped, vec![text]);
    }

    #[test]
    fn test_text_content() {
        let mut tree = DomTree::new();
        let p = tree.create_element("p").unwrap();
        let a = tree.create_text("Hello, ").unwrap();
        let b = tree.create_element("b").unwrap();
        let c = tree.create_text("world").unwrap();
        tree.append_child(p, a).unwrap();
        tree.append_child(p, b).unwrap();
        tree.append_child(b, c).unwrap();
        assert_eq!(tree.text_content(p), "Hello, world");
        assert_eq!(tree.text_content(c), "world");
    }

    #[test]
    fn test_import_subtree() {
        let (source, ul, _) = tree_with_list();
        let mut target = DomTree::new();
        let copy = target.import_subtree(&source, ul).unwrap();

        assert_eq!(target.parent(copy), None);
        assert_eq!(target.child_ids(copy).len(), 3);
        assert!(target.is_element_named(copy, "ul"));
    }

    #[test]
    fn test_import_resets_script_mark() {
        let mut source = DomTree::new();
        let mut data = ElementData::new("script");
        data.script = ScriptMark::Started;
        let script = source.create_element_with(data).unwrap();

        let mut target = DomTree::new();
        let copy = target.import_node(&source, script).unwrap();
        assert_eq!(target.element(copy).map(|e| e.script), Some(ScriptMark::Inert));
    }
}
