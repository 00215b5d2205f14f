//! In-memory KML document model
//!
//! `roxmltree` gives a read-only view, so the parsed tree is converted into
//! owned [`Element`]/[`Node`] values that the pipeline can mutate and write
//! back out. Namespace declarations stay on the element that declared them
//! and every name keeps the prefix it resolved to, so untouched parts of the
//! document serialize to equivalent markup.
//!
//! Records are addressed by [`RecordHandle`], a child-index path from the
//! document element. Handles stay valid as long as only the children of the
//! addressed elements change, which is all the pipeline ever does.

mod parse;
mod write;

use crate::error::Result;

/// Namespace of KML 2.2 documents
pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Local name of a parcel record element
pub const PLACEMARK: &str = "Placemark";

/// A namespace-qualified element or attribute name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QName {
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub local: String,
}

impl QName {
    /// A name outside any namespace
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            namespace: None,
            prefix: None,
            local: local.into(),
        }
    }

    /// True if this name is `local` within `namespace`
    pub fn matches(&self, namespace: Option<&str>, local: &str) -> bool {
        self.local == local && self.namespace.as_deref() == namespace
    }

    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local),
            None => self.local.clone(),
        }
    }
}

/// An `xmlns` / `xmlns:prefix` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    pub prefix: Option<String>,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction { target: String, value: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: QName,
    pub namespaces: Vec<NamespaceDecl>,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

/// Path of child indices from the document element to a record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordHandle(Vec<usize>);

impl RecordHandle {
    pub fn path(&self) -> &[usize] {
        &self.0
    }
}

/// A parsed document: the document element plus any comments or
/// processing instructions around it
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub prolog: Vec<Node>,
    pub root: Element,
    pub epilog: Vec<Node>,
}

impl Document {
    /// Parse UTF-8 markup. Fails with `MalformedDocument` on invalid input.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        parse::parse(bytes)
    }

    /// Serialize with an XML declaration, UTF-8 encoded
    pub fn to_bytes(&self) -> Vec<u8> {
        write::serialize(self)
    }

    /// Namespace the document element lives in; record queries use it
    pub fn namespace(&self) -> Option<&str> {
        self.root.name.namespace.as_deref()
    }

    /// All descendants of the document element named `local` in the
    /// document namespace, in document order. Matches are not searched
    /// for nested matches.
    pub fn find_all(&self, local: &str) -> Vec<RecordHandle> {
        let namespace = self.namespace();
        let mut found = Vec::new();
        let mut path = Vec::new();
        collect(&self.root, namespace, local, &mut path, &mut found);
        found
    }

    /// All Placemark records in document order
    pub fn find_records(&self) -> Vec<RecordHandle> {
        self.find_all(PLACEMARK)
    }

    pub fn element(&self, handle: &RecordHandle) -> Option<&Element> {
        let mut current = &self.root;
        for &index in handle.path() {
            current = match current.children.get(index)? {
                Node::Element(e) => e,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn element_mut(&mut self, handle: &RecordHandle) -> Option<&mut Element> {
        let mut current = &mut self.root;
        for &index in handle.path() {
            current = match current.children.get_mut(index)? {
                Node::Element(e) => e,
                _ => return None,
            };
        }
        Some(current)
    }
}

fn collect(
    element: &Element,
    namespace: Option<&str>,
    local: &str,
    path: &mut Vec<usize>,
    found: &mut Vec<RecordHandle>,
) {
    for (index, node) in element.children.iter().enumerate() {
        if let Node::Element(child) = node {
            path.push(index);
            if child.name.matches(namespace, local) {
                found.push(RecordHandle(path.clone()));
            } else {
                collect(child, namespace, local, path, found);
            }
            path.pop();
        }
    }
}

impl Element {
    pub fn new(name: QName) -> Self {
        Self {
            name,
            namespaces: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A fresh element in this element's namespace, using the same prefix
    pub fn sibling_name(&self, local: &str) -> QName {
        QName {
            namespace: self.name.namespace.clone(),
            prefix: self.name.prefix.clone(),
            local: local.to_string(),
        }
    }

    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Child elements named `local` in this element's namespace
    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        let namespace = self.name.namespace.as_deref();
        self.element_children()
            .filter(move |e| e.name.matches(namespace, local))
    }

    pub fn child(&self, local: &str) -> Option<&Element> {
        let namespace = self.name.namespace.as_deref();
        self.element_children()
            .find(|e| e.name.matches(namespace, local))
    }

    pub fn child_mut(&mut self, local: &str) -> Option<&mut Element> {
        let index = self.position_of(local)?;
        match &mut self.children[index] {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Index into `children` of the first child element named `local`
    pub fn position_of(&self, local: &str) -> Option<usize> {
        let namespace = self.name.namespace.as_deref();
        self.children.iter().position(|n| match n {
            Node::Element(e) => e.name.matches(namespace, local),
            _ => false,
        })
    }

    /// Concatenated text and CDATA content of the direct children
    pub fn text(&self) -> String {
        let mut text = String::new();
        for node in &self.children {
            match node {
                Node::Text(t) | Node::CData(t) => text.push_str(t),
                _ => {}
            }
        }
        text
    }

    pub fn child_text(&self, local: &str) -> Option<String> {
        self.child(local).map(Element::text)
    }

    pub fn set_text(&mut self, value: impl Into<String>) {
        self.children = vec![Node::Text(value.into())];
    }

    /// Replace the content with a single CDATA section
    pub fn set_cdata(&mut self, value: impl Into<String>) {
        self.children = vec![Node::CData(value.into())];
    }

    /// Overwrite the text of child `local`, creating it at the end if absent
    pub fn set_child_text(&mut self, local: &str, value: impl Into<String>) {
        match self.child_mut(local) {
            Some(child) => child.set_text(value),
            None => self.append_child(local, &[]).set_text(value),
        }
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.matches(None, local))
            .map(|a| a.value.as_str())
    }

    pub fn set_attribute(&mut self, local: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name.matches(None, local)) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute {
                name: QName::local(local),
                value,
            }),
        }
    }

    /// Append a new child element in this element's namespace
    pub fn append_child(&mut self, local: &str, attrs: &[(&str, &str)]) -> &mut Element {
        let index = self.children.len();
        self.insert_child(index, local, attrs)
    }

    /// Insert a new child element in this element's namespace at `index`
    /// of `children`
    pub fn insert_child(
        &mut self,
        index: usize,
        local: &str,
        attrs: &[(&str, &str)],
    ) -> &mut Element {
        let mut child = Element::new(self.sibling_name(local));
        for (name, value) in attrs {
            child.set_attribute(name, *value);
        }
        let index = index.min(self.children.len());
        self.children.insert(index, Node::Element(child));
        match &mut self.children[index] {
            Node::Element(e) => e,
            _ => unreachable!("an element was just inserted at this index"),
        }
    }

    /// The first child named `local`, inserted at `position(self)` if absent
    pub fn child_or_insert_with<F>(&mut self, local: &str, position: F) -> &mut Element
    where
        F: FnOnce(&Element) -> usize,
    {
        match self.position_of(local) {
            Some(index) => match &mut self.children[index] {
                Node::Element(e) => e,
                _ => unreachable!("position_of only returns element indices"),
            },
            None => {
                let index = position(self);
                self.insert_child(index, local, &[])
            }
        }
    }

    /// Drop every child element named `local` after the first one.
    /// Returns how many were removed.
    pub fn dedupe_children(&mut self, local: &str) -> usize {
        let namespace = self.name.namespace.clone();
        let before = self.children.len();
        let mut seen = false;
        self.children.retain(|n| match n {
            Node::Element(e) if e.name.matches(namespace.as_deref(), local) => {
                let keep = !seen;
                seen = true;
                keep
            }
            _ => true,
        });
        before - self.children.len()
    }
}
