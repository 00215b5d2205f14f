use roxmltree::NodeType;

use super::{Attribute, Document, Element, NamespaceDecl, Node, QName};
use crate::error::{EnrichError, Result};

const XML_PREFIX: &str = "xml";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub(super) fn parse(bytes: &[u8]) -> Result<Document> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = std::str::from_utf8(bytes)
        .map_err(|e| EnrichError::MalformedDocument(format!("document is not UTF-8: {}", e)))?;

    let doc = roxmltree::Document::parse(text)?;
    let root = doc.root_element();

    let mut prolog = Vec::new();
    let mut epilog = Vec::new();
    let mut seen_root = false;

    for node in doc.root().children() {
        if node == root {
            seen_root = true;
            continue;
        }
        if let Some(converted) = convert_misc(node) {
            if seen_root {
                epilog.push(converted);
            } else {
                prolog.push(converted);
            }
        }
    }

    Ok(Document {
        prolog,
        root: convert_element(root),
        epilog,
    })
}

fn convert_misc(node: roxmltree::Node) -> Option<Node> {
    match node.node_type() {
        NodeType::Comment => Some(Node::Comment(node.text().unwrap_or_default().to_string())),
        NodeType::PI => node.pi().map(|pi| Node::ProcessingInstruction {
            target: pi.target.to_string(),
            value: pi.value.map(str::to_string),
        }),
        // Whitespace between top-level nodes is regenerated on output
        _ => None,
    }
}

fn convert_element(node: roxmltree::Node) -> Element {
    let name = QName {
        namespace: node.tag_name().namespace().map(str::to_string),
        prefix: node
            .tag_name()
            .namespace()
            .and_then(|uri| element_prefix(node, uri)),
        local: node.tag_name().name().to_string(),
    };

    let attributes = node
        .attributes()
        .map(|attr| Attribute {
            name: QName {
                namespace: attr.namespace().map(str::to_string),
                prefix: attr.namespace().and_then(|uri| attribute_prefix(node, uri)),
                local: attr.name().to_string(),
            },
            value: attr.value().to_string(),
        })
        .collect();

    let mut children = Vec::new();
    for child in node.children() {
        match child.node_type() {
            NodeType::Element => children.push(Node::Element(convert_element(child))),
            NodeType::Text => {
                children.push(Node::Text(child.text().unwrap_or_default().to_string()))
            }
            _ => children.extend(convert_misc(child)),
        }
    }

    Element {
        name,
        namespaces: declared_namespaces(node),
        attributes,
        children,
    }
}

/// Declarations introduced on `node` itself, i.e. in scope here but not on
/// the parent element
fn declared_namespaces(node: roxmltree::Node) -> Vec<NamespaceDecl> {
    let parent = node.parent_element();
    node.namespaces()
        .filter(|ns| ns.name() != Some(XML_PREFIX))
        .filter(|ns| match parent {
            Some(parent) => !parent
                .namespaces()
                .any(|p| p.name() == ns.name() && p.uri() == ns.uri()),
            None => true,
        })
        .map(|ns| NamespaceDecl {
            prefix: ns.name().map(str::to_string),
            uri: ns.uri().to_string(),
        })
        .collect()
}

/// Prefix to write an element in `uri` with. The default namespace wins
/// when it maps to the same URI as a named prefix.
fn element_prefix(node: roxmltree::Node, uri: &str) -> Option<String> {
    let mut named = None;
    for ns in node.namespaces().filter(|ns| ns.uri() == uri) {
        match ns.name() {
            None => return None,
            Some(prefix) if named.is_none() => named = Some(prefix.to_string()),
            Some(_) => {}
        }
    }
    named
}

/// Attributes cannot use the default namespace, so only named prefixes apply
fn attribute_prefix(node: roxmltree::Node, uri: &str) -> Option<String> {
    node.namespaces()
        .find(|ns| ns.uri() == uri && ns.name().is_some())
        .and_then(|ns| ns.name())
        .map(str::to_string)
}
