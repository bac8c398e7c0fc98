//! Reef language front end.
//!
//! Re-exports the lexer and recovering parser so embedders depend on a single
//! crate. Every syntax tree is allocated in a caller-provided [`Bump`] arena.
//!
//! # Example
//!
//! ```
//! use reef::Bump;
//!
//! let arena = Bump::new();
//! let (program, errors) = reef::parse("fn Main() { Println(\"hi\"); }", &arena);
//!
//! assert!(errors.is_empty());
//! assert_eq!(program.functions[0].name.lexeme, "Main");
//! ```

pub use bumpalo::Bump;

pub use reef_core::{DeclId, DeclIdGen, LexError, SignatureTable, SourceRange, Span};
pub use reef_parser::ast::{self, parse, parse_expression, parse_strict, ParseErrors, ParserError, ParserErrorKind};
pub use reef_parser::lexer::{self, significant, Lexer, Token, TokenKind, TokenValue};

/// Create a lexer over `source`, allocating lexemes in `arena`.
///
/// The lexer yields every token including comments; wrap it in
/// [`significant`] to drop them.
pub fn tokenize<'src, 'ast>(source: &'src str, arena: &'ast Bump) -> Lexer<'src, 'ast> {
    log::trace!("tokenizing {} bytes", source.len());
    Lexer::new(source, arena)
}
