use crate::{
    log::{error_data, Error},
    render::Renderer,
    scan::Scanner,
    syntax::Builder,
    tree::{odf, Node, QualifiedName},
};
use morel::Finder;
use serde::Serialize;
use serde_json::{to_value, Value};
use std::fmt::{Debug, Formatter};

/// Fills document templates with data, and holds the configuration used
/// while doing so.
///
/// A [`Filler`] holds no state between calls, the same instance can fill any
/// number of documents.
pub struct Filler {
    /// Delimiters that tags are written with.
    syntax: Builder,
    /// Compiled from `syntax`, used to search for delimiters.
    finder: Finder,
    /// When true, data that does not resolve is an error.
    strict: bool,
    /// Text written for null and missing values.
    null: String,
    /// Names of the elements that hold a paragraph of text.
    paragraphs: Vec<QualifiedName>,
}

impl Filler {
    /// Create a new [`Filler`] with the default configuration.
    ///
    /// The default is lenient, writes nothing for missing values, uses
    /// `{{` and `}}` as delimiters, and treats the OpenDocument `text:p` and
    /// `text:h` elements as paragraphs.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set strict mode.
    ///
    /// In strict mode a placeholder or block that does not resolve against
    /// the data returns an [`Error`] instead of rendering as empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use xmlfill::{odf, Element, Filler, Node};
    ///
    /// let document: Node = Element::new(odf::text("p")).with_text("{{Name}}").into();
    ///
    /// assert!(Filler::new().fill(&document, &json!({})).is_ok());
    /// assert!(Filler::new().with_strict(true).fill(&document, &json!({})).is_err());
    /// ```
    #[inline]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;

        self
    }

    /// Set the text written in place of null and missing values.
    #[inline]
    pub fn with_null_text<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.null = text.into();

        self
    }

    /// Add an element name that holds a paragraph of text.
    ///
    /// Block markers are recognized only in paragraphs, and placeholders in
    /// a paragraph may be spread over its inline children.
    #[inline]
    pub fn with_paragraph(mut self, name: QualifiedName) -> Self {
        if !self.paragraphs.contains(&name) {
            self.paragraphs.push(name);
        }

        self
    }

    /// Replace every paragraph name with the given names.
    #[inline]
    pub fn with_paragraphs(mut self, names: Vec<QualifiedName>) -> Self {
        self.paragraphs = names;

        self
    }

    /// Set the delimiters that tags are written with.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use xmlfill::{odf, Builder, Element, Filler, Node};
    ///
    /// let filler = Filler::new().with_syntax(Builder::new().with_tag("[[", "]]"));
    /// let document: Node = Element::new(odf::text("p")).with_text("{{ [[this]] }}").into();
    /// let filled = filler.fill(&document, &json!("x")).unwrap();
    ///
    /// assert_eq!(filled.text_content(), "{{ x }}");
    /// ```
    pub fn with_syntax(mut self, syntax: Builder) -> Self {
        self.finder = Finder::new(syntax.to_syntax());
        self.syntax = syntax;

        self
    }

    /// Return true if the [`Filler`] is in strict mode.
    #[inline]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Return the text written in place of null and missing values.
    #[inline]
    pub fn null_text(&self) -> &str {
        &self.null
    }

    /// Return true if elements with the given name hold a paragraph.
    #[inline]
    pub fn is_paragraph(&self, name: &QualifiedName) -> bool {
        self.paragraphs.contains(name)
    }

    /// Return the delimiters that tags are written with.
    #[inline]
    pub fn syntax(&self) -> &Builder {
        &self.syntax
    }

    /// Return a [`Scanner`] configured with this filler's syntax.
    pub(crate) fn scanner(&self) -> Scanner<'_> {
        Scanner::new(&self.finder, &self.syntax)
    }

    /// Fill the document with the given data, returning a new document.
    ///
    /// Blocks are expanded once per item of the list they name, and every
    /// placeholder is replaced with the text of its value. The given document
    /// is never modified.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the template is malformed, such as an unmatched
    /// block marker, or, in strict mode, if the data does not resolve.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use xmlfill::{odf, Element, Filler, Node};
    ///
    /// let document: Node = Element::new(odf::text("p"))
    ///     .with_text("Hello, my name is {{this}}!")
    ///     .into();
    /// let filled = Filler::new().fill(&document, &json!("Maria")).unwrap();
    ///
    /// assert_eq!(filled.text_content(), "Hello, my name is Maria!");
    /// ```
    pub fn fill(&self, document: &Node, data: &Value) -> Result<Node, Error> {
        Renderer::new(self, data).render(document)
    }

    /// Fill the document with the given data, replacing it.
    ///
    /// The document is only replaced if filling succeeds, an [`Error`] leaves
    /// it untouched.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] in the same cases as [`fill`][`Filler::fill`].
    pub fn fill_in_place(&self, document: &mut Node, data: &Value) -> Result<(), Error> {
        *document = self.fill(document, data)?;

        Ok(())
    }

    /// Serialize the data, then fill the document with it.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if serialization fails, or in the same cases as
    /// [`fill`][`Filler::fill`].
    pub fn fill_serialize<T>(&self, document: &Node, data: &T) -> Result<Node, Error>
    where
        T: Serialize,
    {
        let value = to_value(data).map_err(error_data)?;

        self.fill(document, &value)
    }
}

impl Default for Filler {
    fn default() -> Self {
        let syntax = Builder::new();

        Self {
            finder: Finder::new(syntax.to_syntax()),
            syntax,
            strict: false,
            null: String::new(),
            paragraphs: odf::paragraphs(),
        }
    }
}

impl Debug for Filler {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Filler")
            .field("syntax", &self.syntax)
            .field("strict", &self.strict)
            .field("null", &self.null)
            .field("paragraphs", &self.paragraphs)
            .finish_non_exhaustive()
    }
}
