//! Reads and writes documents as XML text.
//!
//! Names are resolved to their namespace while reading, and written back
//! with the prefix they were read with. Namespace declarations are kept as
//! ordinary attributes in the [`XMLNS`] namespace, so writing a document
//! that was read reproduces its declarations.
use crate::{
    log::{error_document, Error},
    tree::{odf, Element, Node, QualifiedName},
};
use quick_xml::{
    events::{attributes::Attribute, BytesEnd, BytesStart, BytesText, Event},
    name::{PrefixDeclaration, QName, ResolveResult},
    NsReader, Writer,
};
use tracing::debug;

/// The namespace that namespace declarations belong to.
pub const XMLNS: &str = "http://www.w3.org/2000/xmlns/";

/// Parse a document, keeping every text node.
///
/// Adjacent text and CDATA sections are merged into one text node.
/// Comments, processing instructions and the XML declaration are dropped.
///
/// # Errors
///
/// Returns an [`Error`] if the text is not well-formed XML, uses an undeclared
/// prefix, or does not hold exactly one root element.
///
/// # Examples
///
/// ```
/// use xmlfill::{odf, xml};
///
/// let node = xml::parse(r#"<text:p xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0">Hi</text:p>"#)
///     .unwrap();
///
/// assert_eq!(node.as_element().unwrap().name, odf::text("p"));
/// assert_eq!(node.text_content(), "Hi");
/// ```
pub fn parse(source: &str) -> Result<Node, Error> {
    Parser::new(source, None).parse()
}

/// Parse a document, dropping text nodes that only hold whitespace.
///
/// Whitespace within the OpenDocument `text:p` and `text:h` paragraphs is
/// content, such as the space between two spans, and is kept. Useful for
/// templates that were indented for readability.
///
/// # Errors
///
/// Returns an [`Error`] in the same cases as [`parse`].
pub fn parse_compact(source: &str) -> Result<Node, Error> {
    parse_compact_with(source, &odf::paragraphs())
}

/// Parse a document like [`parse_compact`], keeping whitespace within the
/// elements with the given paragraph names.
///
/// # Errors
///
/// Returns an [`Error`] in the same cases as [`parse`].
pub fn parse_compact_with(source: &str, paragraphs: &[QualifiedName]) -> Result<Node, Error> {
    Parser::new(source, Some(paragraphs)).parse()
}

/// Write a document as XML text.
///
/// # Errors
///
/// Returns an [`Error`] if the given node is not an element.
pub fn write(document: &Node) -> Result<String, Error> {
    if document.as_element().is_none() {
        return Err(error_document("the root of a document must be an element"));
    }

    let mut writer = Writer::new(Vec::new());
    write_node(&mut writer, document)?;

    String::from_utf8(writer.into_inner()).map_err(error_document)
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<(), Error> {
    match node {
        Node::Text(text) => writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(error_document),
        Node::Element(element) => {
            let name = raw_name(&element.name);
            let mut start = BytesStart::new(name.as_str());
            for attribute in element.attributes.iter() {
                start.push_attribute((raw_name(&attribute.name).as_str(), attribute.value.as_str()));
            }

            if element.children.is_empty() {
                return writer.write_event(Event::Empty(start)).map_err(error_document);
            }

            writer.write_event(Event::Start(start)).map_err(error_document)?;
            for child in &element.children {
                write_node(writer, child)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(name.as_str())))
                .map_err(error_document)
        }
    }
}

/// Return the name as it appears in markup, `prefix:local` or `local`.
fn raw_name(name: &QualifiedName) -> String {
    match name.prefix() {
        Some(prefix) => format!("{prefix}:{}", name.local_name()),
        None => name.local_name().to_string(),
    }
}

/// Builds a [`Node`] tree from the events of an [`NsReader`].
struct Parser<'source> {
    reader: NsReader<&'source [u8]>,
    /// When set, whitespace-only text nodes are dropped outside of the
    /// elements with these names.
    compact: Option<&'source [QualifiedName]>,
    /// Elements that are opened but not yet closed.
    stack: Vec<Element>,
    root: Option<Node>,
}

impl<'source> Parser<'source> {
    fn new(source: &'source str, compact: Option<&'source [QualifiedName]>) -> Self {
        Self {
            reader: NsReader::from_str(source),
            compact,
            stack: vec![],
            root: None,
        }
    }

    fn parse(mut self) -> Result<Node, Error> {
        loop {
            match self.reader.read_event().map_err(error_document)? {
                Event::Start(start) => {
                    let element = self.element(&start)?;
                    self.stack.push(element);
                }
                Event::Empty(start) => {
                    let element = self.element(&start)?;
                    self.close(element)?;
                }
                Event::End(_) => match self.stack.pop() {
                    Some(element) => self.close(element)?,
                    None => return Err(error_document("closing tag without an opening tag")),
                },
                Event::Text(text) => {
                    let text = text.unescape().map_err(error_document)?;
                    self.text(&text)?;
                }
                Event::CData(data) => {
                    let text = String::from_utf8(data.into_inner().into_owned())
                        .map_err(error_document)?;
                    self.text(&text)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = self.stack.last() {
            return Err(error_document(format!(
                "element `{}` is never closed",
                raw_name(&open.name)
            )));
        }
        let root = self
            .root
            .ok_or_else(|| error_document("the document has no root element"))?;
        debug!(compact = self.compact.is_some(), "parsed document");

        Ok(root)
    }

    /// Create an element from a start tag, resolving every name.
    fn element(&self, start: &BytesStart) -> Result<Element, Error> {
        let (resolved, _) = self.reader.resolve_element(start.name());
        let mut element = Element::new(self.name(resolved, start.name())?);

        for attribute in start.attributes() {
            let attribute = attribute.map_err(error_document)?;
            let name = self.attribute_name(&attribute)?;
            let value = attribute.unescape_value().map_err(error_document)?;
            element.attributes.insert(name, value.into_owned());
        }

        Ok(element)
    }

    fn attribute_name(&self, attribute: &Attribute) -> Result<QualifiedName, Error> {
        match attribute.key.as_namespace_binding() {
            Some(PrefixDeclaration::Default) => Ok(QualifiedName::new(XMLNS, "xmlns")),
            Some(PrefixDeclaration::Named(prefix)) => Ok(QualifiedName::new(
                XMLNS,
                String::from_utf8_lossy(prefix),
            )
            .with_prefix("xmlns")),
            None => {
                let (resolved, _) = self.reader.resolve_attribute(attribute.key);
                self.name(resolved, attribute.key)
            }
        }
    }

    /// Build a [`QualifiedName`] from a raw name and its resolved namespace.
    fn name(&self, resolved: ResolveResult, raw: QName) -> Result<QualifiedName, Error> {
        let local = String::from_utf8_lossy(raw.local_name().as_ref()).into_owned();
        let prefix = raw
            .prefix()
            .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned());

        let name = match resolved {
            ResolveResult::Bound(namespace) => {
                QualifiedName::new(String::from_utf8_lossy(namespace.as_ref()), local)
            }
            ResolveResult::Unbound => QualifiedName::local(local),
            ResolveResult::Unknown(prefix) => {
                return Err(error_document(format!(
                    "prefix `{}` is not bound to a namespace",
                    String::from_utf8_lossy(&prefix)
                )))
            }
        };

        Ok(match prefix {
            Some(prefix) => name.with_prefix(prefix),
            None => name,
        })
    }

    /// Attach a finished element to its parent, or make it the root.
    fn close(&mut self, mut element: Element) -> Result<(), Error> {
        if self.is_compacted(&element) {
            element
                .children
                .retain(|child| !matches!(child, Node::Text(text) if text.trim().is_empty()));
        }

        match self.stack.last_mut() {
            Some(parent) => parent.children.push(Node::Element(element)),
            None if self.root.is_none() => self.root = Some(Node::Element(element)),
            None => return Err(error_document("a document must have a single root element")),
        }

        Ok(())
    }

    /// Return true if whitespace-only text is dropped from the element.
    fn is_compacted(&self, element: &Element) -> bool {
        let Some(paragraphs) = self.compact else {
            return false;
        };

        !paragraphs.contains(&element.name)
            && !self.stack.iter().any(|open| paragraphs.contains(&open.name))
    }

    fn text(&mut self, text: &str) -> Result<(), Error> {
        let Some(parent) = self.stack.last_mut() else {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(error_document("text is not allowed outside the root element"));
        };

        match parent.children.last_mut() {
            Some(Node::Text(previous)) => previous.push_str(text),
            _ => parent.children.push(Node::Text(text.to_string())),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{parse, parse_compact, parse_compact_with, write, XMLNS};
    use crate::{
        log::Kind,
        render::fill,
        tree::{assert_tree_eq, odf, Element, Node, QualifiedName},
    };
    use serde_json::json;

    const TEMPLATE: &str = concat!(
        r#"<office:text xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" "#,
        r#"xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0">"#,
        r#"<text:p text:style-name="P1">Hello, <text:span>{{this}}</text:span> &amp; bye</text:p>"#,
        r#"</office:text>"#,
    );

    fn declarations(element: Element) -> Element {
        element
            .with_attribute(
                QualifiedName::new(XMLNS, "office").with_prefix("xmlns"),
                odf::OFFICE,
            )
            .with_attribute(
                QualifiedName::new(XMLNS, "text").with_prefix("xmlns"),
                odf::TEXT,
            )
    }

    #[test]
    fn test_parse() {
        let expected: Node = declarations(Element::new(odf::office("text")))
            .with_child(
                Element::new(odf::text("p"))
                    .with_attribute(odf::text("style-name"), "P1")
                    .with_text("Hello, ")
                    .with_child(Element::new(odf::text("span")).with_text("{{this}}"))
                    .with_text(" & bye"),
            )
            .into();

        assert_tree_eq(&expected, &parse(TEMPLATE).unwrap());
    }

    #[test]
    fn test_write_then_parse() {
        let document = parse(TEMPLATE).unwrap();
        let written = write(&document).unwrap();

        assert!(written.starts_with("<office:text"));
        assert!(written.contains("&amp; bye"));
        assert_tree_eq(&document, &parse(&written).unwrap());
    }

    #[test]
    fn test_default_namespace() {
        let node = parse(r#"<root xmlns="urn:a"><child b="1"/></root>"#).unwrap();
        let root = node.as_element().unwrap();

        assert_eq!(root.name, QualifiedName::new("urn:a", "root"));
        assert_eq!(
            root.children[0].as_element().unwrap().name,
            QualifiedName::new("urn:a", "child")
        );
        assert_eq!(
            root.children[0]
                .as_element()
                .unwrap()
                .attributes
                .get(&QualifiedName::local("b")),
            Some("1")
        );
        assert_eq!(
            write(&node).unwrap(),
            r#"<root xmlns="urn:a"><child b="1"/></root>"#
        );
    }

    #[test]
    fn test_merge_cdata() {
        let node = parse("<a>one <![CDATA[<two>]]> three</a>").unwrap();

        assert_eq!(node.children().len(), 1);
        assert_eq!(node.text_content(), "one <two> three");
    }

    #[test]
    fn test_parse_compact() {
        let source = "<?xml version=\"1.0\"?>\n<a>\n  <b> x </b>\n  <!-- note -->\n</a>\n";
        let expected: Node = Element::new(QualifiedName::local("a"))
            .with_child(Element::new(QualifiedName::local("b")).with_text(" x "))
            .into();

        assert_tree_eq(&expected, &parse_compact(source).unwrap());
        assert_eq!(parse(source).unwrap().children().len(), 3);
    }

    #[test]
    fn test_parse_errors() {
        for source in [
            "",
            "<a>",
            "<a></b>",
            "<a/><b/>",
            "text",
            "<x:a/>",
        ] {
            let error = parse(source).unwrap_err();

            assert_eq!(error.kind(), Kind::Document, "{source:?}");
        }
    }

    #[test]
    fn test_parse_compact_keeps_paragraph_whitespace() {
        let template = parse_compact(concat!(
            r#"<text:p xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0">"#,
            r#"<text:span>{{First}}</text:span> <text:span>{{Last}}</text:span>"#,
            r#"</text:p>"#,
        ))
        .unwrap();
        let filled = fill(&template, &json!({"First": "Ana", "Last": "Pop"})).unwrap();

        assert_eq!(template.children().len(), 3);
        assert_eq!(filled.text_content(), "Ana Pop");
    }

    #[test]
    fn test_parse_compact_with_paragraphs() {
        let source = "<doc>\n  <line><b>A</b> <b>B</b></line>\n  <p><b>C</b> <b>D</b></p>\n</doc>";
        let node = parse_compact_with(source, &[QualifiedName::local("line")]).unwrap();

        assert_eq!(node.children().len(), 2);
        assert_eq!(node.children()[0].text_content(), "A B");
        assert_eq!(node.children()[1].text_content(), "CD");
    }

    #[test]
    fn test_fill_parsed_template() {
        let template = parse_compact(concat!(
            r#"<office:text xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" "#,
            r#"xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0">"#,
            "\n  <text:p>Contract for {{Student}}</text:p>",
            "\n  <text:p>{{#Subjects}}</text:p>",
            "\n  <text:p><text:span>{{Name}}</text:span>: {{Credits}}</text:p>",
            "\n  <text:p>{{/Subjects}}</text:p>",
            "\n</office:text>",
        ))
        .unwrap();
        let data = json!({
            "Student": "Maria",
            "Subjects": [
                {"Name": "Algebra", "Credits": 5},
                {"Name": "Logic", "Credits": 4},
            ],
        });
        let written = write(&fill(&template, &data).unwrap()).unwrap();

        assert!(written.contains("<text:p>Contract for Maria</text:p>"));
        assert!(written.contains("<text:p><text:span>Algebra</text:span>: 5</text:p>"));
        assert!(written.contains("<text:p><text:span>Logic</text:span>: 4</text:p>"));
        assert!(!written.contains("Subjects"));
    }

    #[test]
    fn test_write_text_root() {
        assert_eq!(write(&Node::text("x")).unwrap_err().kind(), Kind::Document);
    }
}
