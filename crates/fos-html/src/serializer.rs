//! HTML Serialization (innerHTML/outerHTML)
//!
//! Used for diagnostics and by tests that compare documents as markup.

use fos_dom::{DomTree, NodeData, NodeId};

/// Void elements (no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Raw text elements (content is not escaped)
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// Serialize a node including itself
pub fn outer_html(tree: &DomTree, node_id: NodeId) -> String {
    let mut output = String::new();
    serialize(tree, vec![Step::Enter(node_id)], &mut output);
    output
}

/// Serialize the children of a node
pub fn inner_html(tree: &DomTree, node_id: NodeId) -> String {
    let mut output = String::new();
    let mut steps = Vec::new();
    push_children(tree, node_id, &mut steps);
    serialize(tree, steps, &mut output);
    output
}

/// Pending work for the serializer's explicit stack
enum Step {
    /// Write the node's start tag (or data) and schedule its children
    Enter(NodeId),
    /// Write the element's end tag
    Leave(NodeId),
}

/// Iterative walk, so deeply nested trees cannot overflow the stack
fn serialize(tree: &DomTree, mut steps: Vec<Step>, output: &mut String) {
    while let Some(step) = steps.pop() {
        match step {
            Step::Enter(node_id) => enter_node(tree, node_id, output, &mut steps),
            Step::Leave(node_id) => {
                if let Some(elem) = tree.element(node_id) {
                    end_tag(&elem.name, output);
                }
            }
        }
    }
}

fn push_children(tree: &DomTree, node_id: NodeId, steps: &mut Vec<Step>) {
    let children = tree.child_ids(node_id);
    steps.extend(children.into_iter().rev().map(Step::Enter));
}

fn enter_node(tree: &DomTree, node_id: NodeId, output: &mut String, steps: &mut Vec<Step>) {
    let Some(node) = tree.get(node_id) else {
        return;
    };

    match &node.data {
        NodeData::Document => push_children(tree, node_id, steps),
        NodeData::Element(elem) => {
            let tag = elem.name.as_str();

            output.push('<');
            output.push_str(tag);
            for attr in elem.attrs.iter() {
                output.push(' ');
                output.push_str(&attr.name);
                if !attr.value.is_empty() {
                    output.push_str("=\"");
                    escape_attribute(&attr.value, output);
                    output.push('"');
                }
            }
            output.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }

            if RAW_TEXT_ELEMENTS.contains(&tag) {
                for child in tree.children(node_id) {
                    if let Some(text) = tree.get(child).and_then(|n| n.as_text()) {
                        output.push_str(text);
                    }
                }
                end_tag(tag, output);
            } else {
                steps.push(Step::Leave(node_id));
                push_children(tree, node_id, steps);
            }
        }
        NodeData::Text(text) => {
            let raw_parent = tree
                .parent(node_id)
                .and_then(|p| tree.element(p))
                .is_some_and(|e| RAW_TEXT_ELEMENTS.contains(&e.name.as_str()));
            if raw_parent {
                output.push_str(text);
            } else {
                escape_text(text, output);
            }
        }
        NodeData::Comment(text) => {
            output.push_str("<!--");
            output.push_str(text);
            output.push_str("-->");
        }
        NodeData::Doctype { name, .. } => {
            output.push_str("<!DOCTYPE ");
            output.push_str(name);
            output.push('>');
        }
        NodeData::Vacant => {}
    }
}

fn end_tag(tag: &str, output: &mut String) {
    output.push_str("</");
    output.push_str(tag);
    output.push('>');
}

/// Escape text content for HTML
fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

/// Escape attribute value
fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_escape_text() {
        let mut output = String::new();
        escape_text("Hello <world> & \"friends\"", &mut output);
        assert_eq!(output, "Hello &lt;world&gt; &amp; \"friends\"");
    }

    #[test]
    fn test_escape_attribute() {
        let mut output = String::new();
        escape_attribute("a & \"b\" <c>", &mut output);
        assert_eq!(output, "a &amp; &quot;b&quot; <c>");
    }

    #[test]
    fn test_void_elements() {
        assert!(VOID_ELEMENTS.contains(&"br"));
        assert!(VOID_ELEMENTS.contains(&"meta"));
        assert!(!VOID_ELEMENTS.contains(&"div"));
    }

    #[test]
    fn test_outer_html_round_trip_of_body() {
        let doc = parse(r#"<body class="home"><p id="x">a &amp; b</p><br><script>if (a < b) {}</script></body>"#);
        let body = doc.body().unwrap();
        assert_eq!(
            outer_html(doc.tree(), body),
            r#"<body class="home"><p id="x">a &amp; b</p><br><script>if (a < b) {}</script></body>"#
        );
    }

    #[test]
    fn test_inner_html() {
        let doc = parse("<ul><li>one</li><li>two</li></ul>");
        let ul = doc.tree().element_children(doc.body().unwrap()).next().unwrap();
        assert_eq!(inner_html(doc.tree(), ul), "<li>one</li><li>two</li>");
    }

    #[test]
    fn test_boolean_attribute() {
        let doc = parse("<div hidden></div>");
        let div = doc.tree().element_children(doc.body().unwrap()).next().unwrap();
        assert_eq!(outer_html(doc.tree(), div), "<div hidden></div>");
    }

    #[test]
    fn test_comment_and_doctype() {
        let doc = parse("<!DOCTYPE html><!-- hi --><p></p>");
        let html = outer_html(doc.tree(), doc.tree().root());
        assert!(html.starts_with("<!DOCTYPE html><!-- hi -->"));
    }

    #[test]
    fn test_deep_nesting_serialized() {
        let depth = 20_000;
        let doc = parse(&format!("{}x", "<div>".repeat(depth)));
        let html = inner_html(doc.tree(), doc.body().unwrap());
        assert!(html.starts_with("<div><div>"));
        assert!(html.ends_with("x</div></div>"));
        assert_eq!(html.matches("<div>").count(), depth);
        assert_eq!(html.matches("</div>").count(), depth);
    }
}
