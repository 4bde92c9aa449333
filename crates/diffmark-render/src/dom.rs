//! Minimal HTML node tree.
//!
//! Markup is built as nodes and serialized once. Escaping happens per node at serialization
//! time: text nodes escape `&`, `<`, `>`; attribute values additionally escape `"`.
//! [`Node::Raw`] is emitted verbatim and is reserved for stylesheet bodies and fragments that
//! were rendered elsewhere.

/// Elements that never carry children or an end tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Raw(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn raw(markup: impl Into<String>) -> Self {
        Self::Raw(markup.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(el) => el.write_html(out),
            Node::Text(text) => out.push_str(&htmlize::escape_text(text.as_str())),
            Node::Raw(markup) => out.push_str(markup),
        }
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    /// `None` marks a boolean attribute; it serializes as `name=""`.
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute, replacing an existing one with the same name.
    pub fn attr(self, name: &'static str, value: impl Into<String>) -> Self {
        self.set(name, Some(value.into()))
    }

    /// Sets a boolean attribute such as `inert`.
    pub fn flag(self, name: &'static str) -> Self {
        self.set(name, None)
    }

    fn set(mut self, name: &'static str, value: Option<String>) -> Self {
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::text(text))
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag)
    }

    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for attr in &self.attributes {
            out.push(' ');
            out.push_str(attr.name);
            out.push_str("=\"");
            if let Some(value) = &attr.value {
                out.push_str(&htmlize::escape_attribute(value.as_str()));
            }
            out.push('"');
        }
        out.push('>');
        if self.is_void() {
            return;
        }
        write_nodes(out, &self.children);
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }
}

pub fn write_nodes(out: &mut String, nodes: &[Node]) {
    for node in nodes {
        node.write_html(out);
    }
}

pub fn nodes_to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    write_nodes(&mut out, nodes);
    out
}
