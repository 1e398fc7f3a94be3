// ABOUTME: DOM capability layer for the transform pipeline
// ABOUTME: Wraps kuchiki parse/query/mutate and serializes fragments back to HTML

use kuchiki::traits::TendrilSink;
use kuchiki::{ElementData, NodeData, NodeDataRef, NodeRef};

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Parse an HTML fragment, returning the node whose children are the
/// fragment's top-level nodes. Parsing never fails; malformed input produces
/// a best-effort tree that serializes back out without raising.
pub fn parse_fragment(html: &str) -> NodeRef {
    let document = kuchiki::parse_html().one(html);
    match document.select_first("body") {
        Ok(body) => body.as_node().clone(),
        Err(()) => document,
    }
}

/// First element matching a CSS selector, or None (including when the
/// selector itself does not compile).
pub fn select_first(node: &NodeRef, selector: &str) -> Option<NodeDataRef<ElementData>> {
    node.select_first(selector).ok()
}

/// All elements matching a CSS selector, in document order.
pub fn select_all(node: &NodeRef, selector: &str) -> Vec<NodeDataRef<ElementData>> {
    match node.select(selector) {
        Ok(matches) => matches.collect(),
        Err(()) => Vec::new(),
    }
}

/// Replace a node with the nodes parsed from an HTML snippet.
pub fn replace_with_html(node: &NodeRef, html: &str) {
    let replacement = parse_fragment(html);
    let children: Vec<NodeRef> = replacement.children().collect();
    for child in children {
        node.insert_before(child);
    }
    node.detach();
}

/// Replace a node's children with a single text node.
pub fn set_text(node: &NodeRef, text: &str) {
    let children: Vec<NodeRef> = node.children().collect();
    for child in children {
        child.detach();
    }
    node.append(NodeRef::new_text(text));
}

/// Serialize a node's children (its inner HTML).
pub fn serialize_children(node: &NodeRef) -> String {
    let mut output = String::new();
    for child in node.children() {
        serialize_recursive(&child, &mut output);
    }
    output
}

/// Serialize a node including itself.
pub fn serialize_node(node: &NodeRef) -> String {
    let mut output = String::new();
    serialize_recursive(node, &mut output);
    output
}

fn serialize_recursive(node: &NodeRef, output: &mut String) {
    match node.data() {
        NodeData::Element(elem) => {
            let name = elem.name.local.as_ref();
            output.push('<');
            output.push_str(name);

            for (key, value) in elem.attributes.borrow().map.iter() {
                output.push(' ');
                output.push_str(&key.local);
                output.push_str("=\"");
                output.push_str(&escape_attribute(&value.value));
                output.push('"');
            }
            output.push('>');

            if VOID_ELEMENTS.contains(&name) {
                return;
            }
            for child in node.children() {
                serialize_recursive(&child, output);
            }
            output.push_str("</");
            output.push_str(name);
            output.push('>');
        }
        NodeData::Text(text) => {
            output.push_str(&escape_text(&text.borrow()));
        }
        NodeData::Comment(comment) => {
            output.push_str("<!--");
            output.push_str(&comment.borrow());
            output.push_str("-->");
        }
        _ => {
            for child in node.children() {
                serialize_recursive(&child, output);
            }
        }
    }
}

pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
