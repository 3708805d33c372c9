//! Content Replacer
//!
//! Swaps the live `<body>` for a copy of the next one. Persistent elements
//! (persistence marker plus a non-empty `id`) that have a counterpart in the
//! next body keep their live identity: they take the counterpart's
//! attributes and children and are substituted for it in the new body.

use crate::attributes::copy_attributes;
use crate::{OrphanPolicy, SoftNavConfig};
use fos_dom::{Document, DomResult, DomTree, NodeId};
use std::collections::HashMap;

/// Outcome of a content swap
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSwap {
    /// The installed content root, `None` when nothing was swapped
    pub body: Option<NodeId>,
    /// Live persistent elements carried into the new content
    pub preserved: Vec<NodeId>,
    /// Live persistent elements without a counterpart
    pub orphaned: Vec<NodeId>,
    /// Live elements with the marker but an empty or missing `id`. They are
    /// replaced along with the rest of the content, so these ids are stale
    /// once the swap is done.
    pub unkeyed: Vec<NodeId>,
}

impl ContentSwap {
    pub fn swapped(&self) -> bool {
        self.body.is_some()
    }
}

/// Elements carrying `marker` below `root`, in document order, with their
/// `id` when it is non-empty
fn marked_elements(tree: &DomTree, root: NodeId, marker: &str) -> Vec<(NodeId, Option<String>)> {
    tree.descendants(root)
        .filter_map(|id| {
            let elem = tree.element(id)?;
            if !elem.has_attr(marker) {
                return None;
            }
            let key = elem.id().filter(|key| !key.is_empty()).map(str::to_string);
            Some((id, key))
        })
        .collect()
}

/// Replace the live content root with the next one
pub fn replace_content(
    live: &mut Document,
    next: &Document,
    config: &SoftNavConfig,
) -> DomResult<ContentSwap> {
    let Some(next_body) = next.body() else {
        tracing::debug!("next document has no body, content left as is");
        return Ok(ContentSwap::default());
    };

    // id -> next element; the first one in document order wins
    let mut candidates: HashMap<String, NodeId> = HashMap::new();
    for (id, key) in marked_elements(next.tree(), next_body, &config.preserve_attr) {
        if let Some(key) = key {
            candidates.entry(key).or_insert(id);
        }
    }

    let live_marked = match live.body() {
        Some(body) => marked_elements(live.tree(), body, &config.preserve_attr),
        None => Vec::new(),
    };

    let mut swap = ContentSwap::default();
    // next element -> live element standing in for it
    let mut claimed: HashMap<NodeId, NodeId> = HashMap::new();
    for (node, key) in live_marked {
        let Some(key) = key else {
            tracing::debug!(%node, "marked element has no id, replaced with the content");
            swap.unkeyed.push(node);
            continue;
        };
        match candidates.remove(&key) {
            Some(counterpart) => {
                claimed.insert(counterpart, node);
                swap.preserved.push(node);
            }
            None => {
                tracing::debug!(id = %key, %node, "persistent element has no counterpart");
                swap.orphaned.push(node);
            }
        }
    }

    let tree = live.tree_mut();

    // Pull every survivor out before anything is discarded
    for &node in swap.preserved.iter().chain(&swap.orphaned) {
        tree.detach(node)?;
    }

    for (&counterpart, &node) in &claimed {
        copy_attributes(tree, node, next.tree(), counterpart)?;
        tree.clear_children(node)?;
    }

    let new_body = import_with_substitutes(tree, next.tree(), next_body, &claimed)?;

    match live.body() {
        Some(old_body) => {
            let tree = live.tree_mut();
            tree.replace_with(old_body, new_body)?;
            tree.discard_subtree(old_body)?;
        }
        None => {
            let html = match live.document_element() {
                Some(html) => html,
                None => {
                    let html = live.tree_mut().create_element("html")?;
                    live.tree_mut().append_child(NodeId::ROOT, html)?;
                    html
                }
            };
            live.tree_mut().append_child(html, new_body)?;
        }
    }
    live.finalize();

    if config.orphan_policy == OrphanPolicy::Append {
        for &node in &swap.orphaned {
            live.tree_mut().append_child(new_body, node)?;
        }
    }

    tracing::debug!(
        preserved = swap.preserved.len(),
        orphaned = swap.orphaned.len(),
        "content replaced"
    );
    swap.body = Some(new_body);
    Ok(swap)
}

/// Deep-import `root` from `source`, using the live element in `substitutes`
/// wherever a next element has been claimed. Children of a substituted
/// element are imported from its counterpart.
fn import_with_substitutes(
    tree: &mut DomTree,
    source: &DomTree,
    root: NodeId,
    substitutes: &HashMap<NodeId, NodeId>,
) -> DomResult<NodeId> {
    let place = |tree: &mut DomTree, id: NodeId| match substitutes.get(&id) {
        Some(&live) => Ok(live),
        None => tree.import_node(source, id),
    };

    let copy = place(tree, root)?;
    let mut stack = vec![(root, copy)];
    while let Some((src, dst)) = stack.pop() {
        for child in source.children(src) {
            let placed = place(tree, child)?;
            tree.append_child(dst, placed)?;
            stack.push((child, placed));
        }
    }
    Ok(copy)
}
