//! Document - High-level document API

use crate::{DomResult, DomTree, NodeId};

/// HTML Document
///
/// Owns its tree outright. A navigation works on two of these: the live
/// document, mutated in place, and the freshly parsed next document.
#[derive(Debug, Clone)]
pub struct Document {
    tree: DomTree,
    url: String,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
}

impl Document {
    /// Create a document with an empty `<html><head></head><body></body></html>`
    pub fn new(url: &str) -> Self {
        let mut doc = Self::empty(url);
        // A fresh three-node tree can neither run out of slots nor hold
        // stale ids, so building it cannot fail
        let _ = doc.build_skeleton();
        doc.finalize();
        doc
    }

    fn build_skeleton(&mut self) -> DomResult<()> {
        let html = self.tree.create_element("html")?;
        let head = self.tree.create_element("head")?;
        let body = self.tree.create_element("body")?;
        self.tree.append_child(NodeId::ROOT, html)?;
        self.tree.append_child(html, head)?;
        self.tree.append_child(html, body)
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Re-resolve the cached `<html>`, `<head>` and `<body>` elements.
    ///
    /// Call after structural edits that may have swapped any of them.
    pub fn finalize(&mut self) {
        self.html_element = self
            .tree
            .element_children(NodeId::ROOT)
            .find(|&id| self.tree.is_element_named(id, "html"))
            .unwrap_or(NodeId::NONE);

        let (mut head, mut body) = (NodeId::NONE, NodeId::NONE);
        if self.html_element.is_valid() {
            for child in self.tree.element_children(self.html_element) {
                if !head.is_valid() && self.tree.is_element_named(child, "head") {
                    head = child;
                } else if !body.is_valid() && self.tree.is_element_named(child, "body") {
                    body = child;
                }
            }
        }
        self.head_element = head;
        self.body_element = body;
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: &str) {
        self.url = url.to_string();
    }

    /// Get `<html>` element
    pub fn document_element(&self) -> Option<NodeId> {
        self.html_element.some()
    }

    /// Get `<head>` element
    pub fn head(&self) -> Option<NodeId> {
        self.head_element.some()
    }

    /// Get `<body>` element
    pub fn body(&self) -> Option<NodeId> {
        self.body_element.some()
    }

    /// Get `<head>`, creating it (and `<html>`) when missing
    pub fn ensure_head(&mut self) -> DomResult<NodeId> {
        if let Some(head) = self.head() {
            return Ok(head);
        }
        let html = match self.document_element() {
            Some(html) => html,
            None => {
                let html = self.tree.create_element("html")?;
                self.tree.append_child(NodeId::ROOT, html)?;
                html
            }
        };
        let head = self.tree.create_element("head")?;
        let first = self.tree.first_child(html);
        self.tree.insert_before(html, head, first)?;
        self.finalize();
        Ok(head)
    }

    /// Text of the first `<title>` in `<head>`
    pub fn title(&self) -> String {
        let Some(head) = self.head() else {
            return String::new();
        };
        self.tree
            .element_children(head)
            .find(|&id| self.tree.is_element_named(id, "title"))
            .map(|title| self.tree.text_content(title).trim().to_string())
            .unwrap_or_default()
    }

    /// First element in document order whose `id` attribute matches
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(NodeId::ROOT)
            .find(|&node| self.tree.attr(node, "id") == Some(id))
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
