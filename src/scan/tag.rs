use crate::store::THIS;
use std::fmt::{Display, Formatter, Result};

/// A tag found within the text of a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    /// `{{ Name }}`, replaced with the value of `Name`.
    Placeholder(Path),
    /// `{{#Name}}`, opens a block that repeats once per item of `Name`.
    Open(Path),
    /// `{{/Name}}`, closes the block opened with the same name.
    Close(Path),
}

impl Tag {
    /// Parse the text between the tag delimiters.
    ///
    /// Surrounding whitespace is ignored. The `block` characters mark the
    /// open and close forms.
    ///
    /// Returns None if the text is not a valid tag.
    pub fn parse(text: &str, block: (char, char)) -> Option<Self> {
        let text = text.trim();
        let (open, close) = block;

        if let Some(rest) = text.strip_prefix(open) {
            return Path::parse(rest.trim()).map(Tag::Open);
        }
        if let Some(rest) = text.strip_prefix(close) {
            return Path::parse(rest.trim()).map(Tag::Close);
        }

        Path::parse(text).map(Tag::Placeholder)
    }

    /// Return true if the tag opens or closes a block.
    pub fn is_block(&self) -> bool {
        matches!(self, Tag::Open(_) | Tag::Close(_))
    }
}

/// A chain of keys such as `Student.Name`, or `this`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    keys: Vec<String>,
}

impl Path {
    /// Parse a chain of keys separated by periods.
    ///
    /// The first key must be an identifier, following keys may also be
    /// array indices made of digits.
    ///
    /// Returns None if the text is not a valid chain.
    pub fn parse(text: &str) -> Option<Self> {
        let mut keys = vec![];

        for (i, key) in text.split('.').enumerate() {
            let valid = is_identifier(key) || (i > 0 && is_index(key));
            if !valid {
                return None;
            }
            keys.push(key.to_string());
        }

        Some(Self { keys })
    }

    /// Return the keys in the chain.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Return true if the path is exactly `this`.
    pub fn is_this(&self) -> bool {
        self.keys.len() == 1 && self.keys[0] == THIS
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.keys.join("."))
    }
}

/// Return true if the given text is a single identifier.
fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => chars.all(is_ident_continue),
        _ => false,
    }
}

/// Return true if the given text is made of ascii digits only.
fn is_index(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Return true if the given character is a recognized beginning identifier,
/// meaning '_' or an `xid_start`.
fn is_ident_start(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_start(c)
}

/// Return true if the given character is a recognized continue identifier,
/// meaning an `xid_continue`.
fn is_ident_continue(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}
