//! Locates tags within the text of a document.
//!
//! The text of a paragraph is usually spread over several text nodes, split
//! wherever the formatting changes. The scanner reads the concatenated text
//! of a node, remembers which region belongs to which text node, and finds
//! every tag in that text.
mod tag;

pub use tag::{Path, Tag};

use crate::{
    log::{error_split_tag, error_unclosed_tag, expected_path, Error, Kind, INVALID_SYNTAX},
    region::Region,
    syntax::{Builder, Marker},
    tree::Node,
};
use morel::Finder;

/// The concatenated text of a node, with the region covered by each of its
/// text nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Segments {
    /// All text in document order.
    pub text: String,
    /// One region per text node, in document order.
    pub bounds: Vec<Region>,
}

impl Segments {
    /// Collect the text nodes of the given node and its descendants.
    pub fn collect(node: &Node) -> Self {
        let mut segments = Self {
            text: String::new(),
            bounds: vec![],
        };
        segments.walk(node);

        segments
    }

    fn walk(&mut self, node: &Node) {
        match node {
            Node::Text(text) => {
                let begin = self.text.len();
                self.text.push_str(text);
                self.bounds.push(Region::new(begin..self.text.len()));
            }
            Node::Element(element) => {
                for child in &element.children {
                    self.walk(child);
                }
            }
        }
    }

    /// Return the index of the text node that holds the entire region.
    pub fn segment_of(&self, region: Region) -> Option<usize> {
        self.bounds.iter().position(|bound| bound.contains(region))
    }

    /// Return the text of the segment at the given index.
    pub fn segment(&self, index: usize) -> &str {
        &self.text[self.bounds[index]]
    }
}

/// A tag and where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Found {
    pub tag: Tag,
    /// Region of the tag in the concatenated text, delimiters included.
    pub region: Region,
}

/// The result of scanning a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Scan {
    pub segments: Segments,
    pub found: Vec<Found>,
}

impl Scan {
    /// Return the first block tag found, if any.
    pub fn first_block(&self) -> Option<&Found> {
        self.found.iter().find(|f| f.tag.is_block())
    }

    /// Return true if the only content of the scanned text, ignoring
    /// surrounding whitespace, is the given tag.
    pub fn is_alone(&self, found: &Found) -> bool {
        let text = &self.segments.text;

        self.found.len() == 1
            && text[..found.region.begin].trim().is_empty()
            && text[found.region.end..].trim().is_empty()
    }
}

/// Finds tags in text with a compiled [`Finder`].
pub struct Scanner<'finder> {
    finder: &'finder Finder,
    /// The delimiters `finder` was compiled from.
    syntax: &'finder Builder,
}

impl<'finder> Scanner<'finder> {
    /// Create a new [`Scanner`] with the given [`Finder`] and the [`Builder`]
    /// it was compiled from.
    #[inline]
    pub fn new(finder: &'finder Finder, syntax: &'finder Builder) -> Self {
        Self { finder, syntax }
    }

    /// Scan the given node.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if a tag is malformed, or if a placeholder is
    /// spread over more than one text node. Block tags are allowed to be
    /// split, the element holding them is removed from the output anyway.
    pub fn scan(&self, node: &Node) -> Result<Scan, Error> {
        let segments = Segments::collect(node);
        let found = self.find(&segments.text)?;

        for f in found.iter().filter(|f| !f.tag.is_block()) {
            if segments.segment_of(f.region).is_none() {
                return Err(error_split_tag(
                    &segments.text,
                    f.region.begin,
                    f.region.end,
                ));
            }
        }

        Ok(Scan { segments, found })
    }

    /// Return every tag within the given text.
    ///
    /// An end delimiter with no matching begin delimiter is treated as
    /// literal text.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when a begin delimiter is not closed, is
    /// followed by another begin delimiter, or encloses an invalid path.
    pub fn find(&self, source: &str) -> Result<Vec<Found>, Error> {
        let mut found = vec![];
        let mut from = 0;

        while let Some((id, begin, end)) = self.finder.next(source, from) {
            if Marker::from(id) == Marker::EndTag {
                from = end;
                continue;
            }

            let (close_begin, close_end) = match self.finder.next(source, end) {
                Some((id, close_begin, close_end)) => match Marker::from(id) {
                    Marker::EndTag => (close_begin, close_end),
                    Marker::BeginTag => {
                        return Err(Error::build(INVALID_SYNTAX)
                            .with_kind(Kind::Syntax)
                            .with_pointer(source, begin..close_end)
                            .with_help("a tag must be closed before another one begins"))
                    }
                },
                None => return Err(error_unclosed_tag(source, begin, self.syntax)),
            };

            let region = Region::new(begin..close_end);
            let inner = &source[end..close_begin];
            let tag = Tag::parse(inner, self.syntax.block()).ok_or_else(|| {
                Error::build(INVALID_SYNTAX)
                    .with_kind(Kind::Syntax)
                    .with_pointer(source, region)
                    .with_help(expected_path(inner.trim(), self.syntax))
            })?;

            found.push(Found { tag, region });
            from = close_end;
        }

        Ok(found)
    }
}
