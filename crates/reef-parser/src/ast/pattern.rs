//! Pattern AST nodes.
//!
//! Patterns appear on the right of `matches` and in `match` arms. They nest
//! arbitrarily: a tuple-variant pattern holds sub-patterns, a class pattern
//! holds field patterns which hold patterns again.

use reef_core::SourceRange;

use crate::ast::types::TypeIdentifier;
use crate::lexer::Token;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pattern<'ast> {
    /// `_`
    Discard(SourceRange),
    /// `var [mut] name`
    Variable(&'ast VariablePattern<'ast>),
    /// `Type [var name]`
    Type(&'ast TypePattern<'ast>),
    /// `Union::Variant [var name]`
    UnionVariant(&'ast UnionVariantPattern<'ast>),
    /// `Union::Variant(p, ...) [var name]`
    UnionTupleVariant(&'ast UnionTupleVariantPattern<'ast>),
    /// `Union::Variant { field: p, ... } [var name]`
    UnionClassVariant(&'ast UnionClassVariantPattern<'ast>),
    /// `Class { field: p, ... } [var name]`
    Class(&'ast ClassPattern<'ast>),
}

impl<'ast> Pattern<'ast> {
    /// Get the source range of this pattern.
    pub fn range(&self) -> SourceRange {
        match self {
            Self::Discard(range) => *range,
            Self::Variable(p) => p.range,
            Self::Type(p) => p.range,
            Self::UnionVariant(p) => p.range,
            Self::UnionTupleVariant(p) => p.range,
            Self::UnionClassVariant(p) => p.range,
            Self::Class(p) => p.range,
        }
    }

    /// The variable this pattern binds on success, if any.
    pub fn binding(&self) -> Option<PatternBinding<'ast>> {
        match self {
            Self::Discard(_) => None,
            Self::Variable(p) => Some(PatternBinding {
                name: p.name,
                is_mutable: p.is_mutable,
            }),
            Self::Type(p) => p.binding,
            Self::UnionVariant(p) => p.binding,
            Self::UnionTupleVariant(p) => p.binding,
            Self::UnionClassVariant(p) => p.binding,
            Self::Class(p) => p.binding,
        }
    }
}

/// A trailing `var [mut] name` capturing the matched value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternBinding<'ast> {
    pub name: Token<'ast>,
    pub is_mutable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariablePattern<'ast> {
    pub name: Token<'ast>,
    pub is_mutable: bool,
    pub range: SourceRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypePattern<'ast> {
    pub ty: TypeIdentifier<'ast>,
    pub binding: Option<PatternBinding<'ast>>,
    pub range: SourceRange,
}

/// A unit variant test. `variant` is absent when the name after `::` was
/// missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnionVariantPattern<'ast> {
    pub ty: TypeIdentifier<'ast>,
    pub variant: Option<Token<'ast>>,
    pub binding: Option<PatternBinding<'ast>>,
    pub range: SourceRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnionTupleVariantPattern<'ast> {
    pub ty: TypeIdentifier<'ast>,
    pub variant: Token<'ast>,
    pub members: &'ast [Pattern<'ast>],
    pub binding: Option<PatternBinding<'ast>>,
    pub range: SourceRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnionClassVariantPattern<'ast> {
    pub ty: TypeIdentifier<'ast>,
    pub variant: Token<'ast>,
    pub fields: &'ast [FieldPattern<'ast>],
    /// A trailing `_` ignores every field not listed.
    pub discard_remaining: bool,
    pub binding: Option<PatternBinding<'ast>>,
    pub range: SourceRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassPattern<'ast> {
    pub ty: TypeIdentifier<'ast>,
    pub fields: &'ast [FieldPattern<'ast>],
    /// A trailing `_` ignores every field not listed.
    pub discard_remaining: bool,
    pub binding: Option<PatternBinding<'ast>>,
    pub range: SourceRange,
}

/// `name` (shorthand for `name: var name`) or `name: pattern`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldPattern<'ast> {
    pub name: Token<'ast>,
    pub pattern: Option<Pattern<'ast>>,
}
