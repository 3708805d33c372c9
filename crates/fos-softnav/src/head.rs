//! Metadata Merger
//!
//! Positional three-phase merge of the `<head>` element children:
//!
//! 1. For each shared position, replace the live node when it is not
//!    structurally equal to the next node.
//! 2. Remove live nodes past the end of the next sequence.
//! 3. Append next nodes past the end of the live sequence.
//!
//! Nodes whose `rel` is exactly the prefetch value are not part of either
//! sequence and are never touched.

use crate::SoftNavConfig;
use fos_dom::{nodes_equal, Document, DomResult, NodeId};

/// One mutation applied to the live metadata sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataEdit {
    /// `old` at `index` was discarded and `new` took its place
    Replaced { index: usize, old: NodeId, new: NodeId },
    /// `node` at `index` was discarded
    Removed { index: usize, node: NodeId },
    /// `node` was appended as sequence position `index`
    Appended { index: usize, node: NodeId },
}

/// Outcome of a metadata merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataMerge {
    /// Edits in the order they were applied
    pub edits: Vec<MetadataEdit>,
    /// Shared positions left untouched
    pub unchanged: usize,
}

impl MetadataMerge {
    pub fn replaced(&self) -> usize {
        self.count(|e| matches!(e, MetadataEdit::Replaced { .. }))
    }

    pub fn removed(&self) -> usize {
        self.count(|e| matches!(e, MetadataEdit::Removed { .. }))
    }

    pub fn appended(&self) -> usize {
        self.count(|e| matches!(e, MetadataEdit::Appended { .. }))
    }

    /// True when the merge did not touch the live document
    pub fn is_noop(&self) -> bool {
        self.edits.is_empty()
    }

    fn count(&self, pred: impl Fn(&MetadataEdit) -> bool) -> usize {
        self.edits.iter().filter(|e| pred(e)).count()
    }
}

/// The metadata sequence of a document: element children of `<head>`,
/// minus prefetch hints.
pub fn metadata_nodes(doc: &Document, config: &SoftNavConfig) -> Vec<NodeId> {
    let Some(head) = doc.head() else {
        return Vec::new();
    };
    let tree = doc.tree();
    tree.element_children(head)
        .filter(|&id| tree.attr(id, "rel") != Some(config.prefetch_rel.as_str()))
        .collect()
}

/// Merge the metadata of `next` into `live`, in place
pub fn merge_metadata(
    live: &mut Document,
    next: &Document,
    config: &SoftNavConfig,
) -> DomResult<MetadataMerge> {
    let head = live.ensure_head()?;
    let current = metadata_nodes(live, config);
    let incoming = metadata_nodes(next, config);
    let shared = current.len().min(incoming.len());

    tracing::debug!(
        live = current.len(),
        next = incoming.len(),
        "merging metadata"
    );

    let mut merge = MetadataMerge::default();
    let tree = live.tree_mut();

    for index in 0..shared {
        let (old, source) = (current[index], incoming[index]);
        if nodes_equal(tree, old, next.tree(), source) {
            merge.unchanged += 1;
            continue;
        }
        let new = tree.import_subtree(next.tree(), source)?;
        tree.replace_with(old, new)?;
        tree.discard_subtree(old)?;
        tracing::trace!(index, %old, %new, "replaced metadata node");
        merge.edits.push(MetadataEdit::Replaced { index, old, new });
    }

    for (index, &node) in current.iter().enumerate().skip(shared) {
        tree.discard_subtree(node)?;
        tracing::trace!(index, %node, "removed metadata node");
        merge.edits.push(MetadataEdit::Removed { index, node });
    }

    for (index, &source) in incoming.iter().enumerate().skip(shared) {
        let node = tree.import_subtree(next.tree(), source)?;
        tree.append_child(head, node)?;
        tracing::trace!(index, %node, "appended metadata node");
        merge.edits.push(MetadataEdit::Appended { index, node });
    }

    tracing::debug!(
        replaced = merge.replaced(),
        removed = merge.removed(),
        appended = merge.appended(),
        unchanged = merge.unchanged,
        "metadata merged"
    );
    Ok(merge)
}
