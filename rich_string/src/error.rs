// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::ops::Range;

use text_props::WritingSystem;

/// Error returned when a byte range does not address a slice of the text.
///
/// Besides the [`ErrorKind`], it records the range that was asked for, the
/// length of the text, and for [`ErrorKind::NotOnCharBoundary`] the character
/// the offending offset falls inside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    range: Range<usize>,
    text_len: usize,
    boundary: Option<BoundaryInfo>,
}

impl Error {
    /// What went wrong.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The range that was rejected.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// The length in bytes of the text the range was checked against.
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Where the range cut into a character, for
    /// [`ErrorKind::NotOnCharBoundary`].
    pub fn boundary(&self) -> Option<BoundaryInfo> {
        self.boundary
    }

    pub(crate) fn new(kind: ErrorKind, range: &Range<usize>, text_len: usize) -> Self {
        Self {
            kind,
            range: range.clone(),
            text_len,
            boundary: None,
        }
    }

    /// A range whose `which` end lies inside a character of `text`.
    pub(crate) fn inside_char(text: &str, range: &Range<usize>, which: Endpoint) -> Self {
        let offset = match which {
            Endpoint::Start => range.start,
            Endpoint::End => range.end,
        };
        let char_start = (0..offset)
            .rev()
            .find(|&ix| text.is_char_boundary(ix))
            .unwrap_or(0);
        let char_end = text[char_start..]
            .chars()
            .next()
            .map_or(offset, |ch| char_start + ch.len_utf8());
        Self {
            boundary: Some(BoundaryInfo {
                which,
                index: offset,
                char_start,
                char_end,
            }),
            ..Self::new(ErrorKind::NotOnCharBoundary, range, text.len())
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Range { start, end } = self.range;
        match (self.kind, self.boundary) {
            (ErrorKind::Reversed, _) => write!(f, "range {start}..{end} is reversed"),
            (ErrorKind::OutOfBounds, _) => write!(
                f,
                "range {start}..{end} exceeds the text length {}",
                self.text_len
            ),
            (ErrorKind::NotOnCharBoundary, Some(b)) => write!(
                f,
                "{} of range {start}..{end} falls inside the character at {}..{}",
                b.which, b.char_start, b.char_end
            ),
            (ErrorKind::NotOnCharBoundary, None) => {
                write!(f, "range {start}..{end} cuts a character")
            }
        }
    }
}

impl core::error::Error for Error {}

/// The category of an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The range starts after it ends.
    Reversed,
    /// The range extends past the end of the text.
    OutOfBounds,
    /// An end of the range lies inside a character.
    ///
    /// Characters outside the Basic Multilingual Plane are single units, so
    /// this is also what an attempt to split one of them reports.
    NotOnCharBoundary,
}

/// One end of a range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// The inclusive start.
    Start,
    /// The exclusive end.
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::End => "end",
        })
    }
}

/// The character an out-of-boundary offset falls inside.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundaryInfo {
    /// The end of the range that is misplaced.
    pub which: Endpoint,
    /// The misplaced byte offset.
    pub index: usize,
    /// Byte offset of the start of the enclosing character.
    pub char_start: usize,
    /// Byte offset just past the enclosing character.
    pub char_end: usize,
}

/// Error returned by [`RichString::write_xml`](crate::RichString::write_xml).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WriteXmlError {
    /// A run carries a writing system the name registry does not know.
    UnknownWritingSystem(WritingSystem),
    /// The output sink reported an error.
    Fmt,
}

impl fmt::Display for WriteXmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownWritingSystem(ws) => {
                write!(f, "no identifier registered for writing system {}", ws.0)
            }
            Self::Fmt => f.write_str("failed to write XML to the output sink"),
        }
    }
}

impl core::error::Error for WriteXmlError {}

impl From<fmt::Error> for WriteXmlError {
    fn from(_: fmt::Error) -> Self {
        Self::Fmt
    }
}
