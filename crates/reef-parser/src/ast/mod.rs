//! Abstract Syntax Tree (AST) for Reef.
//!
//! This module provides:
//! - AST node definitions for every Reef construct
//! - The recovering parser that turns tokens into a tree
//! - Diagnostics collected during a parse run
//! - An s-expression `Display` rendering of every node
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let source = r#"
//!     pub union Shape {
//!         Circle(int),
//!         Square { field side: int },
//!     }
//!
//!     fn Area(shape: Shape): int {
//!         match (shape) {
//!             Shape::Circle(var r) => r * r * 3,
//!             Shape::Square { side } => side * side,
//!         }
//!     }
//! "#;
//!
//! let (program, errors) = reef_parser::ast::parse(source, &arena);
//! assert!(errors.is_empty());
//! assert_eq!(program.unions.len(), 1);
//! assert_eq!(program.functions.len(), 1);
//! ```

pub mod error;
pub mod ops;

mod parser;
mod type_parser;
pub mod types;

pub mod expr;
mod expr_parser;

pub mod pattern;
mod pattern_parser;

pub mod decl;
mod decl_parser;

mod display;

pub use decl::*;
pub use error::{ParseErrors, ParserError, ParserErrorKind};
pub use expr::*;
pub use ops::*;
pub use parser::Parser;
pub use pattern::*;
pub use types::*;

use bumpalo::Bump;

/// Parse a complete Reef source file.
///
/// Always produces a program. Every problem found along the way is in the
/// returned error collection, in the order it was discovered; the program
/// holds whatever could be recovered around those problems.
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
///
/// let arena = Bump::new();
/// let (program, errors) = reef_parser::ast::parse("a b", &arena);
///
/// assert_eq!(program.expressions.len(), 2);
/// assert_eq!(errors.len(), 1);
/// ```
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn parse<'ast>(source: &str, arena: &'ast Bump) -> (LangProgram<'ast>, ParseErrors<'ast>) {
    let mut parser = Parser::new(source, arena);
    let program = parser.parse_program();
    (program, parser.take_errors())
}

/// Parse a complete Reef source file, failing on the first sign of trouble.
///
/// Returns every diagnostic when any was recorded.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn parse_strict<'ast>(source: &str, arena: &'ast Bump) -> Result<LangProgram<'ast>, ParseErrors<'ast>> {
    let (program, errors) = parse(source, arena);
    if errors.is_empty() { Ok(program) } else { Err(errors) }
}

/// Parse a single expression from the start of the source.
///
/// This is useful for parsing standalone expressions or for testing.
/// Tokens after the expression are left unread.
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
///
/// let arena = Bump::new();
/// let (expr, errors) = reef_parser::ast::parse_expression("a * b + c", &arena);
///
/// assert_eq!(expr.map(|e| e.to_string()).as_deref(), Some("(+ (* a b) c)"));
/// assert!(errors.is_empty());
/// ```
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn parse_expression<'ast>(source: &str, arena: &'ast Bump) -> (Option<&'ast Expr<'ast>>, ParseErrors<'ast>) {
    let mut parser = Parser::new(source, arena);
    let expr = parser.parse_expr(0).map(|e| &*arena.alloc(e));
    (expr, parser.take_errors())
}
