//! Expression AST nodes for Reef.
//!
//! Reef is expression oriented: declarations, blocks, `if`, `while` and
//! `match` are all expressions. Nodes are allocated in the arena and never
//! mutated after construction. There are no parent pointers.
//!
//! # Expression Precedence
//!
//! The parser uses Pratt parsing with the following precedence levels:
//! 1. Assignment (=) - right associative
//! 2. Boolean or (||)
//! 3. Boolean and (&&)
//! 4. Pattern test (matches)
//! 5. Equality (==, !=)
//! 6. Relational (<, >)
//! 7. Additive (+, -)
//! 8. Multiplicative (*, /)
//! 9. Prefix unary (-, !)
//! 10. Postfix (::<>, call, ?, ., ::)

use reef_core::SourceRange;

use crate::ast::decl::LangFunction;
use crate::ast::pattern::Pattern;
use crate::ast::types::{NamedTypeIdentifier, TypeIdentifier};
use crate::ast::{BinaryOp, UnaryOp};
use crate::lexer::{Token, TokenKind, TokenValue};

/// An expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'ast> {
    /// Literal or variable access
    ValueAccess(ValueAccess<'ast>),
    /// Unary operation (`?`, `!`, `-`)
    Unary(&'ast UnaryExpr<'ast>),
    /// Binary operation
    Binary(&'ast BinaryExpr<'ast>),
    /// Instance member access (`a.b`)
    MemberAccess(&'ast MemberAccessExpr<'ast>),
    /// Static member access (`Type::b`)
    StaticMemberAccess(&'ast StaticMemberAccessExpr<'ast>),
    /// Explicit type arguments (`a::<int>`)
    GenericInstantiation(&'ast GenericInstantiationExpr<'ast>),
    /// `var [mut] name [: Type] [= value]`
    VariableDeclaration(&'ast VariableDeclarationExpr<'ast>),
    /// `if (...) ... else if (...) ... else ...`
    If(&'ast IfExpr<'ast>),
    /// `while (...) ...`
    While(&'ast WhileExpr<'ast>),
    /// `break`
    Break(SourceRange),
    /// `continue`
    Continue(SourceRange),
    /// `{ ... }`
    Block(&'ast Block<'ast>),
    /// Function call
    MethodCall(&'ast MethodCallExpr<'ast>),
    /// `return [value]`
    MethodReturn(&'ast MethodReturnExpr<'ast>),
    /// `new Type { a = 1 }`
    ObjectInitializer(&'ast ObjectInitializerExpr<'ast>),
    /// `new Union::Variant { a = 1 }`
    UnionClassVariantInitializer(&'ast UnionClassVariantInitializerExpr<'ast>),
    /// `(a, b)`
    Tuple(&'ast TupleExpr<'ast>),
    /// `value matches pattern`
    Matches(&'ast MatchesExpr<'ast>),
    /// `match (value) { pattern => expr, ... }`
    Match(&'ast MatchExpr<'ast>),
}

impl<'ast> Expr<'ast> {
    /// Get the source range of this expression.
    pub fn range(&self) -> SourceRange {
        match self {
            Self::ValueAccess(e) => e.range(),
            Self::Unary(e) => e.range,
            Self::Binary(e) => e.range,
            Self::MemberAccess(e) => e.range,
            Self::StaticMemberAccess(e) => e.range,
            Self::GenericInstantiation(e) => e.range,
            Self::VariableDeclaration(e) => e.range,
            Self::If(e) => e.range,
            Self::While(e) => e.range,
            Self::Break(range) | Self::Continue(range) => *range,
            Self::Block(e) => e.range,
            Self::MethodCall(e) => e.range,
            Self::MethodReturn(e) => e.range,
            Self::ObjectInitializer(e) => e.range,
            Self::UnionClassVariantInitializer(e) => e.range,
            Self::Tuple(e) => e.range,
            Self::Matches(e) => e.range,
            Self::Match(e) => e.range,
        }
    }

    /// Whether a trailing expression of this kind ends its statement
    /// without a semicolon.
    pub fn is_block_like(&self) -> bool {
        matches!(self, Self::If(_) | Self::Block(_) | Self::While(_))
    }

    /// The variable name, if this is a plain variable access.
    pub fn as_variable(&self) -> Option<&'ast str> {
        match self {
            Self::ValueAccess(access) if access.kind == ValueAccessKind::Variable => Some(access.token.lexeme),
            _ => None,
        }
    }
}

/// Whether a value access reads a literal or a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueAccessKind {
    Literal,
    Variable,
}

/// A literal or variable access.
///
/// Variables include identifiers, `todo!` and type keywords used in value
/// position (`int::Parse`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAccess<'ast> {
    pub kind: ValueAccessKind,
    pub token: Token<'ast>,
}

impl<'ast> ValueAccess<'ast> {
    pub fn range(&self) -> SourceRange {
        SourceRange::single(self.token.span)
    }

    /// The decoded literal value, for literal accesses.
    pub fn literal(&self) -> Option<Literal<'ast>> {
        if self.kind != ValueAccessKind::Literal {
            return None;
        }
        match (self.token.kind, self.token.value) {
            (TokenKind::IntLiteral, TokenValue::Int(value)) => Some(Literal::Int(value)),
            (TokenKind::StringLiteral, TokenValue::Str(value)) => Some(Literal::String(value)),
            (TokenKind::True, _) => Some(Literal::Bool(true)),
            (TokenKind::False, _) => Some(Literal::Bool(false)),
            _ => None,
        }
    }
}

/// A decoded literal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal<'ast> {
    Int(i32),
    String(&'ast str),
    Bool(bool),
}

/// A unary operation.
///
/// The operand is absent when the parser could not find one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnaryExpr<'ast> {
    pub op: UnaryOp,
    pub operand: Option<&'ast Expr<'ast>>,
    /// The operator token itself
    pub operator: Token<'ast>,
    pub range: SourceRange,
}

/// A binary operation.
///
/// The right operand is absent when the parser could not find one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryExpr<'ast> {
    pub left: &'ast Expr<'ast>,
    pub op: BinaryOp,
    pub right: Option<&'ast Expr<'ast>>,
    pub operator: Token<'ast>,
    pub range: SourceRange,
}

/// Instance member access (`owner.member`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemberAccessExpr<'ast> {
    pub owner: &'ast Expr<'ast>,
    pub member: Option<Token<'ast>>,
    pub range: SourceRange,
}

/// Static member access (`Type::member`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticMemberAccessExpr<'ast> {
    pub owner: TypeIdentifier<'ast>,
    pub member: Option<Token<'ast>>,
    pub range: SourceRange,
}

/// Explicit type arguments applied to a value (`value::<A, B>`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenericInstantiationExpr<'ast> {
    pub value: &'ast Expr<'ast>,
    pub type_arguments: &'ast [TypeIdentifier<'ast>],
    pub range: SourceRange,
}

/// A variable declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableDeclarationExpr<'ast> {
    pub name: Token<'ast>,
    pub is_mutable: bool,
    pub ty: Option<TypeIdentifier<'ast>>,
    pub value: Option<&'ast Expr<'ast>>,
    pub range: SourceRange,
}

/// An if expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfExpr<'ast> {
    pub check: &'ast Expr<'ast>,
    pub body: Option<&'ast Expr<'ast>>,
    pub else_ifs: &'ast [ElseIf<'ast>],
    pub else_body: Option<&'ast Expr<'ast>>,
    pub range: SourceRange,
}

/// An `else if (check) body` branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElseIf<'ast> {
    pub check: &'ast Expr<'ast>,
    pub body: Option<&'ast Expr<'ast>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhileExpr<'ast> {
    pub check: &'ast Expr<'ast>,
    pub body: Option<&'ast Expr<'ast>>,
    pub range: SourceRange,
}

/// A block: ordered statements plus local functions.
///
/// Also used as the body of a function declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block<'ast> {
    pub expressions: &'ast [Expr<'ast>],
    pub functions: &'ast [LangFunction<'ast>],
    pub range: SourceRange,
}

/// A call (`method(a, b)`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodCallExpr<'ast> {
    pub method: &'ast Expr<'ast>,
    pub arguments: &'ast [Expr<'ast>],
    pub range: SourceRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodReturnExpr<'ast> {
    pub value: Option<&'ast Expr<'ast>>,
    pub range: SourceRange,
}

/// `name = value` inside an initializer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldInitializer<'ast> {
    pub name: Token<'ast>,
    pub value: Option<Expr<'ast>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectInitializerExpr<'ast> {
    pub ty: &'ast NamedTypeIdentifier<'ast>,
    pub fields: &'ast [FieldInitializer<'ast>],
    pub range: SourceRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnionClassVariantInitializerExpr<'ast> {
    pub ty: &'ast NamedTypeIdentifier<'ast>,
    pub variant: Token<'ast>,
    pub fields: &'ast [FieldInitializer<'ast>],
    pub range: SourceRange,
}

/// A tuple. A single parenthesised expression is a one element tuple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TupleExpr<'ast> {
    pub elements: &'ast [Expr<'ast>],
    pub range: SourceRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchesExpr<'ast> {
    pub value: &'ast Expr<'ast>,
    pub pattern: Option<Pattern<'ast>>,
    pub range: SourceRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchExpr<'ast> {
    pub value: &'ast Expr<'ast>,
    pub arms: &'ast [MatchArm<'ast>],
    pub range: SourceRange,
}

/// `pattern => expression`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchArm<'ast> {
    pub pattern: Pattern<'ast>,
    pub expression: Option<Expr<'ast>>,
}
