use super::{Error, Kind};
use crate::syntax::Builder;
use std::fmt::Display;

pub const UNMATCHED_BLOCK: &str = "unmatched block";
pub const UNEXPECTED_BLOCK_END: &str = "unexpected block end";
pub const NESTED_BLOCK: &str = "nested block reuses name";
pub const MISPLACED_BLOCK: &str = "misplaced block marker";
pub const INVALID_SYNTAX: &str = "invalid syntax";
pub const UNSUPPORTED_LAYOUT: &str = "unsupported marker layout";
pub const UNRESOLVED_PLACEHOLDER: &str = "unresolved placeholder";
pub const UNRESOLVED_BLOCK: &str = "unresolved block";
pub const INVALID_DOCUMENT: &str = "invalid document";
pub const INVALID_DATA: &str = "invalid data";

/// Return an [`Error`] explaining that the paragraph text ended inside a tag.
pub fn error_unclosed_tag(source: &str, begin: usize, syntax: &Builder) -> Error {
    let (_, end) = syntax.tag();

    Error::build(INVALID_SYNTAX)
        .with_kind(Kind::Syntax)
        .with_pointer(source, begin..source.len())
        .with_help(format!(
            "expected a closing `{end}`, did you close every placeholder?"
        ))
}

/// Return an [`Error`] explaining that a tag is spread over more than one
/// text node.
pub fn error_split_tag(source: &str, begin: usize, end: usize) -> Error {
    Error::build(UNSUPPORTED_LAYOUT)
        .with_kind(Kind::Layout)
        .with_pointer(source, begin..end)
        .with_help(
            "the tag is split across formatting boundaries, retype it so that \
            it sits inside a single run of text",
        )
}

/// Return an [`Error`] describing an XML read or write failure.
pub fn error_document<T>(cause: T) -> Error
where
    T: Display,
{
    Error::build(INVALID_DOCUMENT)
        .with_kind(Kind::Document)
        .with_help(cause.to_string())
}

/// Return an [`Error`] describing data that could not be serialized.
pub fn error_data<T>(cause: T) -> Error
where
    T: Display,
{
    Error::build(INVALID_DATA)
        .with_kind(Kind::Data)
        .with_help(cause.to_string())
}

/// Return a string describing an unexpected tag path.
pub fn expected_path<T>(received: T, syntax: &Builder) -> String
where
    T: Display,
{
    let (open, close) = syntax.block();

    format!(
        "expected `this`, a field name like `Name`, a chain like `Student.Name`, \
        or a block marker like `{open}List` / `{close}List`, found `{received}`"
    )
}

#[cfg(test)]
mod tests {
    use super::{error_unclosed_tag, expected_path};
    use crate::syntax::Builder;

    #[test]
    fn test_help_follows_syntax() {
        let syntax = Builder::new().with_tag("<%", "%>").with_block('+', '-');
        let error = error_unclosed_tag("Dear <%Name", 5, &syntax);

        assert!(error.help().unwrap().contains("`%>`"));
        assert!(expected_path("a b", &syntax).contains("`+List` / `-List`"));
        assert!(expected_path("a b", &Builder::new()).contains("`#List` / `/List`"));
    }
}
