//! Source location tracking for diagnostics.
//!
//! Provides [`Span`] to track where a token starts and how far it extends, and
//! [`SourceRange`] to describe the first and last token of an AST node.

use std::fmt;

/// A span of source code.
///
/// Line and column locate the first character for human-readable diagnostics;
/// the byte offset and length locate the exact slice of source text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset from the start of the source (0-indexed).
    pub offset: u32,
    /// Length in bytes.
    pub len: u32,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, byte-based).
    pub col: u32,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub fn new(offset: u32, len: u32, line: u32, col: u32) -> Self {
        Self { offset, len, line, col }
    }

    /// Create a zero-length span at a position.
    #[inline]
    pub fn point(offset: u32, line: u32, col: u32) -> Self {
        Self { offset, len: 0, line, col }
    }

    /// Whether this span is empty (zero length).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The length of this span in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Byte offset one past the last byte of this span.
    #[inline]
    pub fn end_offset(&self) -> u32 {
        self.offset + self.len
    }

    /// Merge two spans into one covering both.
    ///
    /// The result starts at whichever span starts first and keeps that span's
    /// line and column.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        let first = if self.offset <= other.offset { self } else { other };
        let end = self.end_offset().max(other.end_offset());
        Span {
            offset: first.offset,
            len: end - first.offset,
            line: first.line,
            col: first.col,
        }
    }

    /// Slice the source text covered by this span.
    ///
    /// Returns `None` when the span does not fall on valid boundaries of `source`.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.offset as usize..self.end_offset() as usize)
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// The source extent of an AST node, from its first token to its last.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceRange {
    pub start: Span,
    pub end: Span,
}

impl SourceRange {
    #[inline]
    pub fn new(start: Span, end: Span) -> Self {
        Self { start, end }
    }

    /// A range covering a single token.
    #[inline]
    pub fn single(span: Span) -> Self {
        Self { start: span, end: span }
    }

    /// Extend this range so it ends where `other` ends.
    #[inline]
    pub fn to(self, other: SourceRange) -> Self {
        Self {
            start: self.start,
            end: other.end,
        }
    }

    /// A single span covering the whole range.
    #[inline]
    pub fn covering(&self) -> Span {
        self.start.merge(self.end)
    }
}

impl fmt::Debug for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
