//! Declaration AST nodes for Reef.
//!
//! Provides nodes for:
//! - The whole program
//! - Functions and their parameters
//! - Classes and their fields
//! - Unions and their variants
//!
//! Functions, classes and unions carry a [`DeclId`]. Later phases attach
//! resolved signatures through a [`reef_core::SignatureTable`] keyed by that
//! id, so the tree itself stays immutable.

use reef_core::{DeclId, SourceRange};

use crate::ast::expr::{Block, Expr};
use crate::ast::types::TypeIdentifier;
use crate::lexer::Token;

/// Declaration visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Private,
    /// `pub`
    Public,
}

/// The result of parsing a whole source file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LangProgram<'ast> {
    /// Top-level statements, in source order.
    pub expressions: &'ast [Expr<'ast>],
    pub functions: &'ast [LangFunction<'ast>],
    pub classes: &'ast [ProgramClass<'ast>],
    pub unions: &'ast [ProgramUnion<'ast>],
    /// First to last token of the file. Default when the file is empty.
    pub range: SourceRange,
}

impl<'ast> LangProgram<'ast> {
    /// Whether the program has no content at all.
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty() && self.functions.is_empty() && self.classes.is_empty() && self.unions.is_empty()
    }

    /// Find a top-level function by name.
    pub fn function(&self, name: &str) -> Option<&LangFunction<'ast>> {
        self.functions.iter().find(|f| f.name() == name)
    }

    /// Find a top-level class by name.
    pub fn class(&self, name: &str) -> Option<&ProgramClass<'ast>> {
        self.classes.iter().find(|c| c.name() == name)
    }

    /// Find a top-level union by name.
    pub fn union(&self, name: &str) -> Option<&ProgramUnion<'ast>> {
        self.unions.iter().find(|u| u.name() == name)
    }
}

/// A function declaration.
///
/// Examples:
/// - `fn MyFn() {}`
/// - `pub static fn Add(a: int, b: int): int { a + b }`
/// - `fn Map<T>(mut value: T, f: Fn(T): T): T { f(value) }`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LangFunction<'ast> {
    pub id: DeclId,
    pub visibility: Visibility,
    pub is_static: bool,
    /// `mut fn`, only meaningful for class members.
    pub is_mutable: bool,
    pub name: Token<'ast>,
    pub type_parameters: &'ast [Token<'ast>],
    pub parameters: &'ast [FunctionParameter<'ast>],
    pub return_type: Option<TypeIdentifier<'ast>>,
    /// Empty when the declaration was cut short.
    pub body: Block<'ast>,
}

impl<'ast> LangFunction<'ast> {
    pub fn name(&self) -> &'ast str {
        self.name.lexeme
    }
}

/// A function parameter: `[mut] name: Type`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionParameter<'ast> {
    pub is_mutable: bool,
    pub name: Token<'ast>,
    /// Absent when the annotation was missing.
    pub ty: Option<TypeIdentifier<'ast>>,
}

/// A class declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgramClass<'ast> {
    pub id: DeclId,
    pub visibility: Visibility,
    pub name: Token<'ast>,
    pub type_parameters: &'ast [Token<'ast>],
    pub functions: &'ast [LangFunction<'ast>],
    pub fields: &'ast [ClassField<'ast>],
}

impl<'ast> ProgramClass<'ast> {
    pub fn name(&self) -> &'ast str {
        self.name.lexeme
    }
}

/// A field: `[pub] [mut] [static] field name: Type [= initializer]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassField<'ast> {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_mutable: bool,
    pub name: Token<'ast>,
    pub ty: Option<TypeIdentifier<'ast>>,
    pub initializer: Option<Expr<'ast>>,
}

impl<'ast> ClassField<'ast> {
    pub fn name(&self) -> &'ast str {
        self.name.lexeme
    }
}

/// A union declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgramUnion<'ast> {
    pub id: DeclId,
    pub visibility: Visibility,
    pub name: Token<'ast>,
    pub type_parameters: &'ast [Token<'ast>],
    pub functions: &'ast [LangFunction<'ast>],
    pub variants: &'ast [UnionVariant<'ast>],
}

impl<'ast> ProgramUnion<'ast> {
    pub fn name(&self) -> &'ast str {
        self.name.lexeme
    }
}

/// A union variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnionVariant<'ast> {
    /// `A`
    Unit { name: Token<'ast> },
    /// `A(int, string)`
    Tuple {
        name: Token<'ast>,
        members: &'ast [TypeIdentifier<'ast>],
    },
    /// `A { field a: int }`
    Class {
        name: Token<'ast>,
        fields: &'ast [ClassField<'ast>],
    },
}

impl<'ast> UnionVariant<'ast> {
    pub fn name(&self) -> &'ast str {
        match self {
            Self::Unit { name } | Self::Tuple { name, .. } | Self::Class { name, .. } => name.lexeme,
        }
    }
}
