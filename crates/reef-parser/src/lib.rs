//! Reef Parser crate.
//!
//! This crate provides the lexer and parser for Reef source code.
//! It includes:
//! - Lexical analysis (tokenization)
//! - Abstract Syntax Tree (AST) definitions
//! - A recovering parser for transforming tokens into an AST
//! - Error types and reporting
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let source = r#"
//!     pub class Player {
//!         pub mut field health: int = 100,
//!
//!         pub mut fn TakeDamage(amount: int) {
//!             health = health - amount;
//!         }
//!     }
//! "#;
//!
//! let (program, errors) = reef_parser::ast::parse(source, &arena);
//! for error in &errors {
//!     eprintln!("{}", error.display_with_source(source));
//! }
//! assert_eq!(program.classes.len(), 1);
//! ```

// Lexer module
pub mod lexer;

// AST module
pub mod ast;

// Re-export commonly used types at crate root
pub use ast::Parser;
pub use lexer::{Lexer, Span, Token, TokenKind};
