//! Type identifier AST nodes.
//!
//! Type identifiers appear in variable and field annotations, parameter and
//! return types, type arguments, initializers and patterns:
//! - `MyClass`, `int`, `Result::<int, string>`
//! - `boxed MyClass`, `unboxed (int, string)`
//! - `(int, string)` and the unit type `()`
//! - `Fn(int, mut MyClass): bool`

use reef_core::SourceRange;

use crate::lexer::Token;

/// Explicit storage requested for a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxingSpecifier {
    /// `boxed`
    Boxed,
    /// `unboxed`
    Unboxed,
}

/// A reference to a type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeIdentifier<'ast> {
    /// A named type with optional type arguments.
    Named(&'ast NamedTypeIdentifier<'ast>),
    /// A tuple type `(A, B)`.
    Tuple(&'ast TupleTypeIdentifier<'ast>),
    /// The unit type `()`.
    Unit(SourceRange),
    /// A function type `Fn(A, B): R`.
    Fn(&'ast FnTypeIdentifier<'ast>),
}

impl<'ast> TypeIdentifier<'ast> {
    /// Get the source range of this type identifier.
    pub fn range(&self) -> SourceRange {
        match self {
            Self::Named(t) => t.range,
            Self::Tuple(t) => t.range,
            Self::Unit(range) => *range,
            Self::Fn(t) => t.range,
        }
    }

    /// The named type, if this is one.
    pub fn as_named(&self) -> Option<&'ast NamedTypeIdentifier<'ast>> {
        match self {
            Self::Named(named) => Some(named),
            _ => None,
        }
    }
}

/// A named type such as `MyUnion::<int>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedTypeIdentifier<'ast> {
    /// The identifier or built-in type keyword naming the type.
    pub name: Token<'ast>,
    /// Explicit type arguments given with `::<...>`.
    pub type_arguments: &'ast [TypeIdentifier<'ast>],
    /// `boxed` or `unboxed`, when given.
    pub boxing: Option<BoxingSpecifier>,
    pub range: SourceRange,
}

impl<'ast> NamedTypeIdentifier<'ast> {
    /// The type name as written.
    pub fn name(&self) -> &'ast str {
        self.name.lexeme
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TupleTypeIdentifier<'ast> {
    pub members: &'ast [TypeIdentifier<'ast>],
    pub boxing: Option<BoxingSpecifier>,
    pub range: SourceRange,
}

/// A function type `Fn(...)` with an optional return type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FnTypeIdentifier<'ast> {
    pub parameters: &'ast [FnTypeParameter<'ast>],
    pub return_type: Option<TypeIdentifier<'ast>>,
    pub range: SourceRange,
}

/// A parameter of a function type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FnTypeParameter<'ast> {
    pub ty: TypeIdentifier<'ast>,
    pub is_mutable: bool,
}
