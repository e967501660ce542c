//! Owned element tree for rendered previews.
//!
//! The renderer builds this tree instead of a flat HTML string so themes can
//! attach inline styles to individual elements before serialization.

use std::fmt::Write;

/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input"];

/// Ordered inline style declarations with camelCase property names.
///
/// Setting a property that already exists replaces its value in place, so
/// assigning the same declarations twice is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDecls {
    decls: Vec<(String, String)>,
}

impl StyleDecls {
    pub fn set(&mut self, property: &str, value: &str) {
        if let Some(existing) = self.decls.iter_mut().find(|(p, _)| p == property) {
            value.clone_into(&mut existing.1);
        } else {
            self.decls.push((property.to_string(), value.to_string()));
        }
    }

    /// Assign every declaration from a `(property, value)` table.
    pub fn assign(&mut self, table: &[(&str, &str)]) {
        for (property, value) in table {
            self.set(property, value);
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.decls
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// CSS text for a `style` attribute, e.g. `font-size: 16px; color: #333`.
    pub fn to_css(&self) -> String {
        self.decls
            .iter()
            .map(|(p, v)| format!("{}: {v}", css_property(p)))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A node in the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Text content, escaped on output.
    Text(String),
    /// Raw HTML passed through from the source.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    pub style: StyleDecls,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            style: StyleDecls::default(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    pub fn is_heading(&self) -> bool {
        matches!(self.tag.as_str(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
    }

    /// Visit every descendant element (not `self`) in document order.
    ///
    /// The callback also receives whether the element sits inside a `pre`.
    pub fn walk_descendants_mut(&mut self, f: &mut impl FnMut(&mut Self, bool)) {
        let inside_pre = self.tag == "pre";
        walk_children(&mut self.children, inside_pre, f);
    }

    /// Collect references to every descendant element matching `pred`.
    pub fn find_all(&self, pred: impl Fn(&Self) -> bool + Copy) -> Vec<&Self> {
        let mut found = Vec::new();
        collect(&self.children, pred, &mut found);
        found
    }

    /// Concatenated text content of the subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        push_text(&self.children, &mut out);
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

/// Serialize a list of sibling nodes.
pub fn nodes_to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, &mut out);
    }
    out
}

/// Escape text for HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `backgroundColor` -> `background-color`.
pub fn css_property(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn walk_children(children: &mut [Node], inside_pre: bool, f: &mut impl FnMut(&mut Element, bool)) {
    for child in children {
        if let Node::Element(el) = child {
            f(el, inside_pre);
            let nested = inside_pre || el.tag == "pre";
            walk_children(&mut el.children, nested, f);
        }
    }
}

fn collect<'a>(children: &'a [Node], pred: impl Fn(&Element) -> bool + Copy, found: &mut Vec<&'a Element>) {
    for child in children {
        if let Node::Element(el) = child {
            if pred(el) {
                found.push(el);
            }
            collect(&el.children, pred, found);
        }
    }
}

fn push_text(children: &[Node], out: &mut String) {
    for child in children {
        match child {
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => push_text(&el.children, out),
            Node::Raw(_) => {}
        }
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(el) => write_element(el, out),
        Node::Text(t) => out.push_str(&escape_html(t)),
        Node::Raw(raw) => out.push_str(raw),
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attrs {
        let _ = write!(out, " {name}=\"{}\"", escape_html(value));
    }
    if !el.style.is_empty() {
        let _ = write!(out, " style=\"{}\"", escape_html(&el.style.to_css()));
    }
    if VOID_TAGS.contains(&el.tag.as_str()) {
        out.push_str(" />");
        return;
    }
    out.push('>');
    for child in &el.children {
        write_node(child, out);
    }
    let _ = write!(out, "</{}>", el.tag);
}
