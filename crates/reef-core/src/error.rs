//! Error types shared across the front end.
//!
//! Lexing never aborts: every problem becomes a [`LexError`] value that the
//! lexer accumulates alongside an `Error` token, and parsing carries on.

use thiserror::Error;

use crate::Span;

// ============================================================================
// Lexer Errors
// ============================================================================

/// Errors that occur during lexical analysis (tokenization).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// A character that cannot start any token.
    #[error("unexpected character '{ch}' at {span}")]
    UnexpectedChar { ch: char, span: Span },

    /// A run of characters that no token kind could be resolved from.
    #[error("invalid token '{text}' at {span}")]
    InvalidToken { text: String, span: Span },
}

impl LexError {
    /// Get the span where this error occurred.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. } => *span,
            LexError::InvalidToken { span, .. } => *span,
        }
    }
}
