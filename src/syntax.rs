//! Delimiters used to recognize tags within the text of a document.
//!
//! By default a placeholder is written as `{{ Name }}`, a block is opened with
//! `{{#Name}}` and closed with `{{/Name}}`. The [`Builder`] type allows a
//! template author to pick other delimiters, which is handy when the document
//! itself needs to contain literal double braces.
use morel::Syntax;

/// Markers that identify tags within text.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Marker {
    /// Beginning of a tag.
    BeginTag = 0,
    /// End of a tag.
    EndTag = 1,
}

impl From<usize> for Marker {
    fn from(value: usize) -> Self {
        match value {
            0 => Self::BeginTag,
            1 => Self::EndTag,
            _ => unreachable!(),
        }
    }
}

impl From<Marker> for usize {
    fn from(k: Marker) -> Self {
        k as usize
    }
}

/// Provides methods to build a `Syntax`.
///
/// # Example
///
/// ```
/// use xmlfill::Builder;
///
/// let builder = Builder::new()
///     .with_tag("[[", "]]")
///     .with_block('+', '-');
///
/// assert_eq!(builder.tag(), ("[[", "]]"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Builder {
    tag: (String, String),
    block: (char, char),
}

impl Builder {
    /// Create a new [`Builder`].
    ///
    /// The `Builder` has default markers:
    ///
    /// ```text
    /// Placeholders: {{ name }}
    /// Blocks: {{#name}} ... {{/name}}
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            tag: ("{{".into(), "}}".into()),
            block: ('#', '/'),
        }
    }

    /// Set the tag delimiters.
    ///
    /// # Panics
    ///
    /// Panics if either delimiter is empty, or both are equal.
    #[inline]
    pub fn with_tag<T>(mut self, begin: T, end: T) -> Self
    where
        T: Into<String>,
    {
        let (begin, end) = (begin.into(), end.into());
        assert!(!begin.is_empty() && !end.is_empty());
        assert!(begin != end, "tag delimiters must differ");
        self.tag = (begin, end);

        self
    }

    /// Set the characters which open and close a block inside a tag.
    ///
    /// # Panics
    ///
    /// Panics if either character is whitespace, or both are equal.
    #[inline]
    pub fn with_block(mut self, open: char, close: char) -> Self {
        assert!(!open.is_whitespace() && !close.is_whitespace());
        assert!(open != close, "block characters must differ");
        self.block = (open, close);

        self
    }

    /// Return the tag delimiters.
    pub fn tag(&self) -> (&str, &str) {
        (&self.tag.0, &self.tag.1)
    }

    /// Return the characters which open and close a block.
    pub fn block(&self) -> (char, char) {
        self.block
    }

    /// Return a Syntax instance from the markers in this [`Builder`].
    pub fn to_syntax(&self) -> Syntax {
        let (begin, end) = self.tag();
        let markers = vec![
            (Marker::BeginTag.into(), begin.to_string()),
            (Marker::EndTag.into(), end.to_string()),
        ];

        Syntax::new(markers)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Builder, Marker};

    #[test]
    fn test_default_markers() {
        let builder = Builder::default();

        assert_eq!(builder.tag(), ("{{", "}}"));
        assert_eq!(builder.block(), ('#', '/'));
    }

    #[test]
    fn test_marker_ids() {
        assert_eq!(Marker::from(usize::from(Marker::BeginTag)), Marker::BeginTag);
        assert_eq!(Marker::from(usize::from(Marker::EndTag)), Marker::EndTag);
    }

    #[test]
    #[should_panic(expected = "tag delimiters must differ")]
    fn test_equal_delimiters() {
        let _ = Builder::new().with_tag("%%", "%%");
    }
}
