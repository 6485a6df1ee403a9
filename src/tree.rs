//! An owned, in-memory representation of a markup document.
//!
//! A document is a tree of [`Node`] values. Elements own their children, so
//! cloning a subtree never aliases the original.
mod name;
pub mod odf;
mod snapshot;

pub use name::QualifiedName;
pub use snapshot::{assert_tree_eq, compare, Mismatch, Snapshot};

/// A node within a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An element with a name, attributes and children.
    Element(Element),
    /// A run of character data.
    Text(String),
}

impl Node {
    /// Create a new text node.
    pub fn text<T>(content: T) -> Self
    where
        T: Into<String>,
    {
        Node::Text(content.into())
    }

    /// Return the [`Element`] if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Return the text if this node is a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Element(_) => None,
            Node::Text(text) => Some(text),
        }
    }

    /// Return the children of an element, or an empty slice for text.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            Node::Text(_) => &[],
        }
    }

    /// Return the concatenated text of this node and every descendant,
    /// in document order.
    pub fn text_content(&self) -> String {
        let mut buffer = String::new();
        self.collect_text(&mut buffer);

        buffer
    }

    fn collect_text(&self, buffer: &mut String) {
        match self {
            Node::Text(text) => buffer.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(buffer);
                }
            }
        }
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Text(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Text(value)
    }
}

/// An element node.
///
/// # Examples
///
/// ```
/// use xmlfill::{odf, Element, Node};
///
/// let paragraph: Node = Element::new(odf::text("p"))
///     .with_attribute(odf::text("style-name"), "P1")
///     .with_text("Hello, ")
///     .with_child(Element::new(odf::text("span")).with_text("{{this}}"))
///     .into();
///
/// assert_eq!(paragraph.text_content(), "Hello, {{this}}");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: QualifiedName,
    pub attributes: Attributes,
    pub children: Vec<Node>,
}

impl Element {
    /// Create a new [`Element`] with no attributes and no children.
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            attributes: Attributes::new(),
            children: vec![],
        }
    }

    /// Set an attribute, replacing any attribute with the same name.
    pub fn with_attribute<T>(mut self, name: QualifiedName, value: T) -> Self
    where
        T: Into<String>,
    {
        self.attributes.insert(name, value);

        self
    }

    /// Append a child node.
    pub fn with_child<T>(mut self, child: T) -> Self
    where
        T: Into<Node>,
    {
        self.children.push(child.into());

        self
    }

    /// Append a text child.
    pub fn with_text<T>(self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.with_child(Node::Text(text.into()))
    }
}

/// A single attribute of an [`Element`].
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: QualifiedName,
    pub value: String,
}

/// The attributes of an [`Element`].
///
/// Insertion order is kept so documents can be written back as they were
/// read, but two sets of attributes are equal regardless of order.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    data: Vec<Attribute>,
}

impl Attributes {
    /// Create an empty set of attributes.
    #[inline]
    pub fn new() -> Self {
        Self { data: vec![] }
    }

    /// Insert an attribute, replacing the value of an existing attribute
    /// with the same name.
    pub fn insert<T>(&mut self, name: QualifiedName, value: T)
    where
        T: Into<String>,
    {
        let value = value.into();
        match self.data.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.data.push(Attribute { name, value }),
        }
    }

    /// Returns the value of the attribute with the given name.
    pub fn get(&self, name: &QualifiedName) -> Option<&str> {
        self.data
            .iter()
            .find(|a| &a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Iterate over the attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.data.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl PartialEq for Attributes {
    fn eq(&self, other: &Self) -> bool {
        self.data.len() == other.data.len()
            && self
                .data
                .iter()
                .all(|a| other.get(&a.name) == Some(a.value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::{odf, Element, Node, QualifiedName};

    #[test]
    fn test_attribute_order_is_ignored() {
        let a = Element::new(odf::table("table"))
            .with_attribute(odf::table("name"), "Table1")
            .with_attribute(odf::table("style-name"), "Table1");
        let b = Element::new(odf::table("table"))
            .with_attribute(odf::table("style-name"), "Table1")
            .with_attribute(odf::table("name"), "Table1");

        assert_eq!(a, b);
    }

    #[test]
    fn test_attribute_replace() {
        let element = Element::new(QualifiedName::local("a"))
            .with_attribute(QualifiedName::local("href"), "one")
            .with_attribute(QualifiedName::local("href"), "two");

        assert_eq!(element.attributes.len(), 1);
        assert_eq!(
            element.attributes.get(&QualifiedName::local("href")),
            Some("two")
        );
    }

    #[test]
    fn test_text_nodes_are_not_merged() {
        let split: Node = Element::new(odf::text("p"))
            .with_text("A")
            .with_text("B")
            .into();
        let merged: Node = Element::new(odf::text("p")).with_text("AB").into();

        assert_ne!(split, merged);
        assert_eq!(split.text_content(), merged.text_content());
    }

    #[test]
    fn test_children_of_text() {
        assert!(Node::text("lorem").children().is_empty());
        assert_eq!(Node::text("lorem").as_text(), Some("lorem"));
        assert!(Node::text("lorem").as_element().is_none());
    }
}
