//! Parse error types for the Reef parser.
//!
//! Every syntactic problem becomes a [`ParserError`] value carrying what the
//! parser expected and what it actually found. `found == None` always means
//! the parser ran out of tokens.

use std::fmt;

use reef_core::Span;
use thiserror::Error;

use crate::lexer::{Token, TokenKind};

/// A recoverable parse error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at {span}")]
pub struct ParserError<'ast> {
    /// The type of error that occurred.
    pub kind: ParserErrorKind,
    /// The offending token, or `None` at end of input.
    pub found: Option<Token<'ast>>,
    /// Token kinds that would have been accepted, sorted and de-duplicated.
    pub expected: Vec<TokenKind>,
    /// Where the error occurred. A zero-length span at the end of the
    /// source when `found` is `None`.
    pub span: Span,
    /// Human-readable description.
    pub message: String,
}

impl<'ast> ParserError<'ast> {
    /// Create a new parse error.
    ///
    /// `eof` is used as the location when no token was found.
    pub fn new(kind: ParserErrorKind, found: Option<Token<'ast>>, expected: &[TokenKind], eof: Span) -> Self {
        let mut expected = expected.to_vec();
        expected.sort();
        expected.dedup();

        let message = describe(kind, found.as_ref(), &expected);
        let span = found.map_or(eof, |token| token.span);

        Self {
            kind,
            found,
            expected,
            span,
            message,
        }
    }

    /// The kind of the offending token, if any.
    pub fn found_kind(&self) -> Option<TokenKind> {
        self.found.map(|token| token.kind)
    }

    /// Whether this error was reported at end of input.
    pub fn at_end_of_input(&self) -> bool {
        self.found.is_none()
    }

    /// Format the error with source context for display.
    pub fn display_with_source(&self, source: &str) -> String {
        let mut output = String::new();

        let line = self.span.line;
        let column = self.span.col;

        output.push_str(&format!("Error at {}:{}: {}\n", line, column, self.kind));
        output.push_str(&format!("  {}\n", self.message));

        if let Some(line_text) = Self::get_line(source, line) {
            output.push_str("  |\n");
            output.push_str(&format!("{:>3} | {}\n", line, line_text));

            let indent = " ".repeat(column.saturating_sub(1) as usize);
            let pointer = if self.span.len <= 1 {
                "^".to_string()
            } else {
                "^".to_string() + &"~".repeat((self.span.len - 1) as usize)
            };
            output.push_str(&format!("  | {}{}\n", indent, pointer));
        }

        output
    }

    /// Get the text of a specific line (1-indexed).
    fn get_line(source: &str, line_num: u32) -> Option<&str> {
        source.lines().nth((line_num as usize).checked_sub(1)?)
    }
}

fn describe(kind: ParserErrorKind, found: Option<&Token<'_>>, expected: &[TokenKind]) -> String {
    use ParserErrorKind::*;

    let received = match found {
        Some(token) => format!("received {}", token),
        None => "reached end of input".to_string(),
    };
    let one_of = || {
        let kinds: Vec<&str> = expected.iter().map(|kind| kind.description()).collect();
        format!("[{}]", kinds.join(", "))
    };

    match kind {
        ExpectedToken => format!("Expected one of {}, but {}", one_of(), received),
        ExpectedExpression => format!("Expected expression, but {}", received),
        ExpectedType => format!("Expected type, but {}", received),
        ExpectedTypeName => format!("Expected type name, but {}", received),
        ExpectedPattern => format!("Expected pattern, but {}", received),
        ExpectedTokenOrExpression => format!("Expected expression or one of {}, but {}", one_of(), received),
        ExpectedTypeOrToken => format!("Expected type or one of {}, but {}", one_of(), received),
        ExpectedPatternOrToken => format!("Expected pattern or one of {}, but {}", one_of(), received),
        UnexpectedModifier if expected.is_empty() => format!("Unexpected modifier, {}", received),
        UnexpectedModifier => format!("Unexpected modifier, expected one of {}, but {}", one_of(), received),
        DuplicateModifier => format!("Duplicate modifier, {}", received),
        InvalidToken => format!("Invalid token, {}", received),
    }
}

/// The kind of parse error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserErrorKind {
    /// One of `expected` was required.
    ExpectedToken,
    /// An expression was required.
    ExpectedExpression,
    /// A type identifier was required.
    ExpectedType,
    /// A type name was required after `boxed` or `unboxed`.
    ExpectedTypeName,
    /// A pattern was required.
    ExpectedPattern,
    /// An expression or one of `expected` was required.
    ExpectedTokenOrExpression,
    /// A type or one of `expected` was required.
    ExpectedTypeOrToken,
    /// A pattern or one of `expected` was required.
    ExpectedPatternOrToken,
    /// The modifier is not valid here. `expected` lists the allowed ones.
    UnexpectedModifier,
    /// The modifier was already given.
    DuplicateModifier,
    /// The lexer could not resolve a token.
    InvalidToken,
}

impl fmt::Display for ParserErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParserErrorKind::*;
        let msg = match self {
            ExpectedToken => "expected token",
            ExpectedExpression => "expected expression",
            ExpectedType => "expected type",
            ExpectedTypeName => "expected type name",
            ExpectedPattern => "expected pattern",
            ExpectedTokenOrExpression => "expected token or expression",
            ExpectedTypeOrToken => "expected type or token",
            ExpectedPatternOrToken => "expected pattern or token",
            UnexpectedModifier => "unexpected modifier",
            DuplicateModifier => "duplicate modifier",
            InvalidToken => "invalid token",
        };
        write!(f, "{}", msg)
    }
}

/// An ordered collection of parse errors, in discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseErrors<'ast> {
    errors: Vec<ParserError<'ast>>,
}

impl<'ast> ParseErrors<'ast> {
    /// Create a new empty error collection.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn push(&mut self, error: ParserError<'ast>) {
        self.errors.push(error);
    }

    /// Place an error ahead of every error recorded from `index` on.
    pub fn insert(&mut self, index: usize, error: ParserError<'ast>) {
        let index = index.min(self.errors.len());
        self.errors.insert(index, error);
    }

    /// Check if there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the errors in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, ParserError<'ast>> {
        self.errors.iter()
    }

    /// Get all errors.
    pub fn errors(&self) -> &[ParserError<'ast>] {
        &self.errors
    }

    /// Consume and return the errors.
    pub fn into_vec(self) -> Vec<ParserError<'ast>> {
        self.errors
    }
}

impl<'ast> From<ParserError<'ast>> for ParseErrors<'ast> {
    fn from(error: ParserError<'ast>) -> Self {
        let mut errors = ParseErrors::new();
        errors.push(error);
        errors
    }
}

impl<'ast> FromIterator<ParserError<'ast>> for ParseErrors<'ast> {
    fn from_iter<T: IntoIterator<Item = ParserError<'ast>>>(iter: T) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl<'a, 'ast> IntoIterator for &'a ParseErrors<'ast> {
    type Item = &'a ParserError<'ast>;
    type IntoIter = std::slice::Iter<'a, ParserError<'ast>>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ParseErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "no errors")
        } else if self.errors.len() == 1 {
            write!(f, "{}", self.errors[0])
        } else {
            writeln!(f, "{} errors:", self.errors.len())?;
            for (i, error) in self.errors.iter().enumerate() {
                writeln!(f, "  {}: {}", i + 1, error)?;
            }
            Ok(())
        }
    }
}

impl std::error::Error for ParseErrors<'_> {}
