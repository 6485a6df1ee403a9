use std::{
    cmp::max,
    fmt::{Formatter, Result},
};

use super::{
    super::{RESET, YELLOW},
    {get_width, Visual, BLANK, EQUAL, HIGHLIGHT, PIPE},
};
use crate::region::Region;

/// Characters of context kept on each side of the highlighted text.
const CONTEXT: usize = 24;
const ELLIPSIS: &str = "...";

/// A type of `Visual` that points to a tag within the text of a paragraph.
///
/// Paragraph text tends to be a single long line, so only the text around
/// the tag is shown.
#[derive(Debug, PartialEq)]
pub struct Pointer {
    /// Zero indexed line of the tag.
    line: usize,
    /// Zero indexed column of the tag within its full line.
    column: usize,
    /// Column of the tag within `excerpt`.
    offset: usize,
    /// Width of the highlighted text.
    length: usize,
    /// The text around the tag, clipped to [`CONTEXT`] on each side.
    excerpt: String,
}

impl Pointer {
    /// Create a new Pointer at the given region of the source text.
    pub fn new(source: &str, region: Region) -> Self {
        let begin = region.begin.min(source.len());
        let start = source[..begin].rfind('\n').map_or(0, |i| i + 1);
        let stop = source[begin..]
            .find('\n')
            .map_or(source.len(), |i| begin + i);
        let end = region.end.clamp(begin, stop);

        let before = keep_last(&source[start..begin]);
        let marked = &source[begin..end];
        let after = keep_first(&source[end..stop]);

        Self {
            line: source[..start].matches('\n').count(),
            column: get_width(&source[start..begin]),
            offset: get_width(&before),
            length: max(1, get_width(marked)),
            excerpt: format!("{before}{marked}{after}"),
        }
    }
}

/// Return the end of the text, clipped to [`CONTEXT`] characters.
fn keep_last(text: &str) -> String {
    let count = text.chars().count();
    if count <= CONTEXT {
        return text.to_string();
    }

    let at = text
        .char_indices()
        .nth(count - CONTEXT)
        .map_or(0, |(i, _)| i);
    format!("{ELLIPSIS}{}", &text[at..])
}

/// Return the start of the text, clipped to [`CONTEXT`] characters.
fn keep_first(text: &str) -> String {
    match text.char_indices().nth(CONTEXT) {
        Some((at, _)) => format!("{}{ELLIPSIS}", &text[..at]),
        None => text.to_string(),
    }
}

impl Visual for Pointer {
    fn display(
        &self,
        formatter: &mut Formatter<'_>,
        location: Option<&str>,
        help: Option<&str>,
    ) -> Result {
        let num = (self.line + 1).to_string();
        let col = self.column + 1;
        let pad = get_width(&num);
        let align = self.offset + self.length;

        let name = location.unwrap_or("?");
        let excerpt = &self.excerpt;
        let underline = HIGHLIGHT.repeat(self.length);

        write!(
            formatter,
            "\n {BLANK:pad$}--> {name}:{num}:{col}\
             \n {BLANK:pad$} {PIPE}\
             \n {num:>} {PIPE} {excerpt}\
             \n {BLANK:pad$} {PIPE} {YELLOW}{underline:>align$}{RESET}\
             \n {BLANK:pad$} {PIPE}\n",
        )?;

        if let Some(help) = help {
            writeln!(formatter, "{BLANK:pad$} {EQUAL} help: {help}")?;
        }

        Ok(())
    }
}
