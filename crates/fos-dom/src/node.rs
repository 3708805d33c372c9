//! DOM Node - arena representation
//!
//! Uses `NodeId` links (4 bytes) instead of pointers, so parent/child/sibling
//! relations are plain indices into the owning `DomTree`.

use crate::{Attributes, NodeId};

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    /// Create an unlinked node
    pub fn new(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(data: ElementData) -> Self {
        Self::new(NodeData::Element(data))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(NodeData::Text(content.into()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::new(NodeData::Document)
    }

    #[inline]
    pub fn node_type(&self) -> NodeType {
        match &self.data {
            NodeData::Document => NodeType::Document,
            NodeData::Doctype { .. } => NodeType::Doctype,
            NodeData::Element(_) => NodeType::Element,
            NodeData::Text(_) => NodeType::Text,
            NodeData::Comment(_) => NodeType::Comment,
            NodeData::Vacant => NodeType::Vacant,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Check if the slot was discarded
    #[inline]
    pub fn is_vacant(&self) -> bool {
        matches!(self.data, NodeData::Vacant)
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
    /// Slot of a discarded node, awaiting reuse
    Vacant,
}

/// Node kind, without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Document,
    Doctype,
    Element,
    Text,
    Comment,
    Vacant,
}

/// Element namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Namespace {
    #[default]
    Html,
    Svg,
    MathMl,
    Other,
}

impl Namespace {
    pub const HTML_URL: &'static str = "http://www.w3.org/1999/xhtml";
    pub const SVG_URL: &'static str = "http://www.w3.org/2000/svg";
    pub const MATHML_URL: &'static str = "http://www.w3.org/1998/Math/MathML";

    /// Map a namespace URL to a known namespace
    pub fn from_url(url: &str) -> Self {
        match url {
            Self::HTML_URL | "" => Self::Html,
            Self::SVG_URL => Self::Svg,
            Self::MATHML_URL => Self::MathMl,
            _ => Self::Other,
        }
    }
}

/// Execution state of a `<script>` element.
///
/// Script elements that came out of the parser, or were moved between
/// trees, are `Inert` and never run. Only an element built by the script
/// reanimator starts `Fresh`, and the single `Fresh -> Started` transition
/// is what runs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptMark {
    #[default]
    Inert,
    Fresh,
    Started,
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Local tag name (lowercase for HTML)
    pub name: String,
    pub namespace: Namespace,
    pub attrs: Attributes,
    pub script: ScriptMark,
}

impl ElementData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Namespace::Html,
            attrs: Attributes::new(),
            script: ScriptMark::Inert,
        }
    }

    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.set(name, value);
        self
    }

    /// Check for an HTML element with the given local name
    #[inline]
    pub fn is(&self, tag: &str) -> bool {
        self.namespace == Namespace::Html && self.name.eq_ignore_ascii_case(tag)
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has(name)
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs.set(name, value);
    }

    /// The `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id")
    }

    /// Take the `Fresh -> Started` transition.
    ///
    /// Returns `true` exactly once for a fresh script element; inert and
    /// already-started elements return `false`.
    pub fn start_script(&mut self) -> bool {
        if self.script == ScriptMark::Fresh {
            self.script = ScriptMark::Started;
            true
        } else {
            false
        }
    }
}
