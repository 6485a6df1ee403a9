use super::{Pointer, RED, RESET};
use crate::{log::Visual, region::Region};
use std::fmt::{Debug, Display, Formatter, Result};

/// Describes the category of an [`Error`].
///
/// Template problems ([`Kind::Structure`], [`Kind::Syntax`], [`Kind::Layout`])
/// mean the template itself must be fixed. [`Kind::Binding`] and [`Kind::Data`]
/// mean the data handed to the filler does not fit the template.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Kind {
    /// Unmatched, stray or mis-nested block markers.
    Structure,
    /// A tag that cannot be read, such as `{{` without a closing `}}`.
    Syntax,
    /// A tag split across more than one text node.
    Layout,
    /// A placeholder or block that does not resolve against the data.
    Binding,
    /// The XML document could not be read or written.
    Document,
    /// The data could not be serialized.
    Data,
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Kind::Structure => write!(f, "structure"),
            Kind::Syntax => write!(f, "syntax"),
            Kind::Layout => write!(f, "layout"),
            Kind::Binding => write!(f, "binding"),
            Kind::Document => write!(f, "document"),
            Kind::Data => write!(f, "data"),
        }
    }
}

/// Describes an error, and allows adding a contextual help text and visualization.
///
/// # Examples
///
/// Creating an [`Error`] that includes a [`Visual`] of type [`Pointer`]:
///
/// ```
/// use xmlfill::{Error, Kind, Region};
///
/// Error::build("unmatched block")
///     .with_kind(Kind::Structure)
///     .with_pointer("{{#List}}", Region::new(0..9))
///     .with_name("office:text/text:p[2]")
///     .with_help("add a `{{/List}}` paragraph after the block body");
/// ```
///
/// When printed with `println!("{:#}", error)` the [`Error`] produces this output:
///
/// ```text
/// error: unmatched block
///   --> office:text/text:p[2]:1:1
///    |
///  1 | {{#List}}
///    | ^^^^^^^^^
///    |
///   = help: add a `{{/List}}` paragraph after the block body
/// ```
pub struct Error {
    /// The category of the [`Error`].
    kind: Kind,
    /// Describes the cause of the [`Error`].
    reason: String,
    /// A visualization to help illustrate the [`Error`].
    visual: Option<Box<dyn Visual>>,
    /// Additional information to display with the [`Error`].
    help: Option<String>,
    /// The position of the element that the [`Error`] comes from.
    name: Option<String>,
}

impl Error {
    /// Create a new [`Error`] with the given reason text.
    ///
    /// The [`Kind`] starts as [`Kind::Structure`], and the additional fields
    /// may be populated using the various methods defined on `Error`.
    ///
    /// # Examples
    ///
    /// ```
    /// use xmlfill::{Error, Kind};
    ///
    /// let error = Error::build("unresolved placeholder")
    ///     .with_kind(Kind::Binding)
    ///     .with_help("field `Name` was not found in the data");
    ///
    /// assert_eq!(error.kind(), Kind::Binding);
    /// ```
    pub fn build<T>(reason: T) -> Self
    where
        T: Into<String>,
    {
        Error {
            kind: Kind::Structure,
            reason: reason.into(),
            name: None,
            visual: None,
            help: None,
        }
    }

    /// Set the [`Kind`] of the [`Error`].
    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.kind = kind;

        self
    }

    /// Set the name text, which describes the position of the element the
    /// [`Error`] is related to, such as `office:text/text:p[3]`.
    pub fn with_name<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.name = Some(text.into());

        self
    }

    /// Set the name text if none was set yet.
    ///
    /// Errors raised deep inside a paragraph receive the paragraph position
    /// on the way out, without overwriting a more precise position.
    pub fn or_name<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        if self.name.is_none() {
            self.name = Some(text.into());
        }

        self
    }

    /// Set the [`Visual`], which is a visualization that helps illustrate the
    /// cause of the error.
    pub fn with_visual(mut self, visual: impl Visual + 'static) -> Self {
        self.visual = Some(Box::new(visual));

        self
    }

    /// Set the visualization to a new [`Pointer`] with the given source text and
    /// [`Region`].
    ///
    /// This is a shortcut method for creating a `Pointer` yourself and then
    /// setting it with the `with_visual` method.
    pub fn with_pointer<T>(mut self, source: &str, region: T) -> Self
    where
        T: Into<Region>,
    {
        self.visual = Some(Box::new(Pointer::new(source, region.into())));

        self
    }

    /// Set the help text, which is contextual information to accompany the
    /// reason text.
    pub fn with_help<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.help = Some(text.into());

        self
    }

    /// Return the [`Kind`] of the error.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Return the reason text.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Return the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Return the position of the element that the error is related to.
    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Return true if the template must be fixed to resolve the error.
    ///
    /// A service handing out filled documents would usually report these
    /// as a server-side failure.
    pub fn is_template_error(&self) -> bool {
        matches!(self.kind, Kind::Structure | Kind::Syntax | Kind::Layout)
    }

    /// Return true if the data must be fixed to resolve the error.
    ///
    /// A service handing out filled documents would usually report these
    /// as bad input.
    pub fn is_data_error(&self) -> bool {
        matches!(self.kind, Kind::Binding | Kind::Data)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if !f.alternate() {
            writeln!(f, "{self:#}")?;
        }
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("reason", &self.reason)
            .field("name", &self.name)
            .field("visual", &self.visual)
            .field("help", &self.help)
            .finish()?;

        Ok(())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let header = format!("{RED}error{RESET}");
        write!(f, "{header}: {}", self.reason)?;

        if !f.alternate() {
            return Ok(());
        }

        match self.visual.as_ref() {
            Some(visual) => visual.display(f, self.name.as_deref(), self.help.as_deref()),
            None => {
                if let Some(name) = self.name.as_deref() {
                    write!(f, "\n  --> {name}")?;
                }
                if let Some(help) = self.help.as_deref() {
                    write!(f, "\n  = help: {help}")?;
                }

                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.reason == other.reason
            && self.help == other.help
            && self.name == other.name
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, Kind};
    use crate::region::Region;

    #[test]
    fn test_display_plain() {
        let error = Error::build("unmatched block").with_help("close it");

        assert!(format!("{error}").ends_with("unmatched block"));
        assert!(!format!("{error}").contains("help"));
    }

    #[test]
    fn test_display_alternate_with_pointer() {
        let error = Error::build("invalid syntax")
            .with_kind(Kind::Syntax)
            .with_pointer("Hello, {{ }}", Region::new(7..12))
            .with_name("text:p[1]")
            .with_help("placeholders must name a field or `this`");
        let text = format!("{error:#}");

        assert!(text.contains("--> text:p[1]:1:8"));
        assert!(text.contains("Hello, {{ }}"));
        assert!(text.contains("^^^^^"));
        assert!(text.contains("help: placeholders must name a field or `this`"));
    }

    #[test]
    fn test_or_name_keeps_first() {
        let error = Error::build("a").with_name("inner").or_name("outer");

        assert_eq!(error.get_name(), Some("inner"));
        assert_eq!(Error::build("a").or_name("outer").get_name(), Some("outer"));
    }

    #[test]
    fn test_categories() {
        assert!(Error::build("a").with_kind(Kind::Layout).is_template_error());
        assert!(Error::build("a").with_kind(Kind::Binding).is_data_error());
        assert!(!Error::build("a").with_kind(Kind::Document).is_data_error());
        assert!(!Error::build("a").with_kind(Kind::Document).is_template_error());
    }
}
