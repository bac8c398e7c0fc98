//! Core value types for the Reef front end.
//!
//! This crate holds the pieces shared by every phase:
//! - [`Span`] and [`SourceRange`] for source locations
//! - [`LexError`] for tokenization failures
//! - [`DeclId`] and [`SignatureTable`] for attaching resolved signatures to
//!   parsed declarations without mutating the tree

pub mod error;
pub mod ids;
pub mod span;

pub use error::LexError;
pub use ids::{DeclId, DeclIdGen, SignatureTable};
pub use span::{SourceRange, Span};
