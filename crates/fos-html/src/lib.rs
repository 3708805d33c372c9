//! fOS HTML Parser
//!
//! Permissive HTML5 parser built on html5ever. Produces the arena
//! `fos_dom::Document` used by the soft-navigation engine.
//!
//! Parsing has no side effects: scripts found in the markup are kept as
//! inert elements and only ever run through the script reanimator.

mod parser;
mod serializer;

pub use fos_dom::Document;
pub use parser::HtmlParser;
pub use serializer::{inner_html, outer_html};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}

/// Parse an HTML string into a Document with the given URL
pub fn parse_with_url(html: &str, url: &str) -> Document {
    HtmlParser::new().parse_with_url(html, url)
}
