//! Lexical analysis for Reef.

mod cursor;
mod lexer;
mod stream;
mod token;

pub use lexer::Lexer;
pub use reef_core::Span;
pub use stream::{significant, SignificantTokens};
pub use token::{Token, TokenKind, TokenValue};
