//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it into the arena DOM.
//! Parsing never fails: html5ever's tree builder recovers from any input
//! the way browsers do, so malformed markup still yields a document.

use fos_dom::{Document, DomResult, DomTree, ElementData, Namespace, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// HTML5 parser
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Document {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a document URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Document {
        tracing::debug!(url, bytes = html.len(), "parsing HTML document");

        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut document = Document::empty(url);
        convert(&dom.document, document.tree_mut());
        document.finalize();

        tracing::debug!(nodes = document.tree().len(), "parsed document");
        document
    }
}

/// Copy the RcDom tree below `document` into `tree`.
///
/// Iterative so deeply nested markup cannot overflow the stack.
fn convert(document: &Handle, tree: &mut DomTree) {
    let mut stack: Vec<(Handle, NodeId)> = document
        .children
        .borrow()
        .iter()
        .rev()
        .map(|child| (child.clone(), NodeId::ROOT))
        .collect();

    while let Some((handle, parent)) = stack.pop() {
        let id = match convert_node(&handle, tree) {
            Ok(Some(id)) => id,
            Ok(None) => continue,
            Err(err) => {
                tracing::warn!(%err, "node arena exhausted, document truncated");
                return;
            }
        };
        if tree.append_child(parent, id).is_err() {
            continue;
        }

        // Template contents hang off a separate fragment; flatten them
        // into the template element itself.
        let template_children = match &handle.data {
            RcNodeData::Element { template_contents, .. } => template_contents
                .borrow()
                .as_ref()
                .map(|contents| contents.children.borrow().clone()),
            _ => None,
        };
        let children = template_children.unwrap_or_else(|| handle.children.borrow().clone());
        for child in children.into_iter().rev() {
            stack.push((child, id));
        }
    }
}

/// Allocate the arena node for one RcDom node, without children
fn convert_node(handle: &Handle, tree: &mut DomTree) -> DomResult<Option<NodeId>> {
    let id = match &handle.data {
        RcNodeData::Document => return Ok(None),
        RcNodeData::Doctype { name, public_id, system_id } => {
            tree.create_doctype(name, public_id, system_id)?
        }
        RcNodeData::Text { contents } => tree.create_text(&contents.borrow())?,
        RcNodeData::Comment { contents } => tree.create_comment(contents)?,
        RcNodeData::Element { name, attrs, .. } => {
            let mut elem =
                ElementData::new(&*name.local).with_namespace(Namespace::from_url(&name.ns));
            for attr in attrs.borrow().iter() {
                let local: &str = &attr.name.local;
                match &attr.name.prefix {
                    Some(prefix) => elem.set_attr(&format!("{prefix}:{local}"), &attr.value),
                    None => elem.set_attr(local, &attr.value),
                }
            }
            tree.create_element_with(elem)?
        }
        RcNodeData::ProcessingInstruction { .. } => return Ok(None),
    };
    Ok(Some(id))
}
