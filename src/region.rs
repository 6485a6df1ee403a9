use std::ops::{Index, Range};

/// Represents an area within the text of a paragraph.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Region {
    /// The beginning of the range, inclusive.
    pub begin: usize,
    /// The ending of the range, exclusive.
    pub end: usize,
}

impl Region {
    /// Create a new Region from the given range.
    pub fn new(position: Range<usize>) -> Self {
        Self {
            begin: position.start,
            end: position.end,
        }
    }

    /// Return true if the given `Region` lies entirely within this [`Region`].
    pub fn contains(&self, other: Self) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }

    /// Move both indices of the [`Region`] back by `offset`.
    ///
    /// Used to turn a position in concatenated paragraph text into a position
    /// within a single text segment.
    pub fn shift_back(self, offset: usize) -> Self {
        Self {
            begin: self.begin - offset,
            end: self.end - offset,
        }
    }
}

impl Index<Region> for str {
    type Output = str;

    fn index(&self, region: Region) -> &Self::Output {
        let Region { begin, end } = region;

        &self[begin..end]
    }
}

impl From<Range<usize>> for Region {
    fn from(value: Range<usize>) -> Self {
        Self {
            begin: value.start,
            end: value.end,
        }
    }
}

impl From<Region> for Range<usize> {
    fn from(value: Region) -> Self {
        value.begin..value.end
    }
}
