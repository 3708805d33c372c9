//! Attribute Synchronizer
//!
//! Additive attribute copy: every attribute of the source is created or
//! overwritten on the target, attributes only the target has are kept.

use fos_dom::{DomError, DomResult, DomTree, NodeId};

/// Copy every attribute of `source` (in `source_tree`) onto `target`.
///
/// Returns the number of attributes that were created or changed.
pub fn copy_attributes(
    target_tree: &mut DomTree,
    target: NodeId,
    source_tree: &DomTree,
    source: NodeId,
) -> DomResult<usize> {
    let from = source_tree
        .element(source)
        .ok_or(DomError::NotAnElement(source))?;
    let to = target_tree
        .element_mut(target)
        .ok_or(DomError::NotAnElement(target))?;

    let mut changed = 0;
    for attr in from.attrs.iter() {
        if to.get_attr(&attr.name) != Some(attr.value.as_str()) {
            to.set_attr(&attr.name, &attr.value);
            changed += 1;
        }
    }

    tracing::trace!(%target, %source, changed, "synchronized attributes");
    Ok(changed)
}
