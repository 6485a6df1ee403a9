//! Names from the OpenDocument vocabulary.
//!
//! A default [`Filler`][crate::Filler] treats the ODF paragraph elements
//! named by [`paragraphs`] as the containers of template text. The other
//! constructors spell ODF element names without repeating namespace URIs.
use super::QualifiedName;

pub const OFFICE: &str = "urn:oasis:names:tc:opendocument:xmlns:office:1.0";
pub const TEXT: &str = "urn:oasis:names:tc:opendocument:xmlns:text:1.0";
pub const TABLE: &str = "urn:oasis:names:tc:opendocument:xmlns:table:1.0";

/// Return a name in the `office` namespace.
pub fn office(local: &str) -> QualifiedName {
    QualifiedName::new(OFFICE, local).with_prefix("office")
}

/// Return a name in the `text` namespace.
pub fn text(local: &str) -> QualifiedName {
    QualifiedName::new(TEXT, local).with_prefix("text")
}

/// Return a name in the `table` namespace.
pub fn table(local: &str) -> QualifiedName {
    QualifiedName::new(TABLE, local).with_prefix("table")
}

/// Return the names of the ODF paragraph-level containers, `text:p` and
/// `text:h`.
pub fn paragraphs() -> Vec<QualifiedName> {
    vec![text("p"), text("h")]
}
