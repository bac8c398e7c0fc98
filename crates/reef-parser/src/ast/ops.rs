//! Operator definitions for Reef expressions.
//!
//! Provides enums for binary and unary operators along with the binding
//! powers the Pratt loop uses to decide how far an expression extends.

use crate::lexer::TokenKind;
use std::fmt;

/// Binary operators in Reef.
///
/// Organized by precedence from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `=`
    ValueAssignment,
    /// `||`
    BooleanOr,
    /// `&&`
    BooleanAnd,
    /// `==`
    EqualityCheck,
    /// `!=`
    NegativeEqualityCheck,
    /// `<`
    LessThan,
    /// `>`
    GreaterThan,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Multiply,
    /// `/`
    Divide,
}

impl BinaryOp {
    /// Get the binding power (precedence) for this operator.
    ///
    /// Returns (left_bp, right_bp). The operator extends the current
    /// expression while `left_bp >= min_bp`; its right operand is parsed
    /// with `right_bp` as the new floor.
    pub fn binding_power(self) -> (u8, u8) {
        use BinaryOp::*;
        match self {
            // Right associative
            ValueAssignment => (2, 2),

            BooleanOr => (4, 5),
            BooleanAnd => (6, 7),
            EqualityCheck | NegativeEqualityCheck => (10, 11),
            LessThan | GreaterThan => (12, 13),
            Plus | Minus => (14, 15),
            Multiply | Divide => (16, 17),
        }
    }

    /// Try to convert a token to a binary operator.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        use BinaryOp::*;
        Some(match kind {
            TokenKind::Equal => ValueAssignment,
            TokenKind::PipePipe => BooleanOr,
            TokenKind::AmpAmp => BooleanAnd,
            TokenKind::EqualEqual => EqualityCheck,
            TokenKind::BangEqual => NegativeEqualityCheck,
            TokenKind::Less => LessThan,
            TokenKind::Greater => GreaterThan,
            TokenKind::Plus => Plus,
            TokenKind::Minus => Minus,
            TokenKind::Star => Multiply,
            TokenKind::Slash => Divide,
            _ => return None,
        })
    }

    /// The source symbol of this operator.
    pub fn symbol(self) -> &'static str {
        use BinaryOp::*;
        match self {
            ValueAssignment => "=",
            BooleanOr => "||",
            BooleanAnd => "&&",
            EqualityCheck => "==",
            NegativeEqualityCheck => "!=",
            LessThan => "<",
            GreaterThan => ">",
            Plus => "+",
            Minus => "-",
            Multiply => "*",
            Divide => "/",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Unary operators in Reef.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Postfix `?`, propagates the error case out of the enclosing function.
    FallOut,
    /// Prefix `!`
    Not,
    /// Prefix `-`
    Negate,
}

impl UnaryOp {
    /// Whether the operator precedes its operand.
    pub fn is_prefix(self) -> bool {
        matches!(self, UnaryOp::Not | UnaryOp::Negate)
    }

    /// The source symbol of this operator.
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::FallOut => "?",
            UnaryOp::Not => "!",
            UnaryOp::Negate => "-",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Floor used for the operand of a prefix operator.
///
/// Sits above every binary operator and below every postfix operator, so
/// `-a * b` is `(-a) * b` and `!a.b` is `!(a.b)`.
pub const PREFIX_BINDING_POWER: u8 = 18;

/// `matches` binds its pattern tighter than `&&`, `||` and `=`.
pub const MATCHES_BINDING_POWER: u8 = 8;

/// The left binding power of a token that can continue an expression.
///
/// Covers binary operators and the postfix forms (`matches`, `::<`, call,
/// `?`, `.`, `::`). Prefix-only tokens such as `!` return `None`, so they
/// always start a new expression.
pub fn infix_binding_power(kind: TokenKind) -> Option<u8> {
    if let Some(op) = BinaryOp::from_token(kind) {
        return Some(op.binding_power().0);
    }

    match kind {
        TokenKind::Matches => Some(MATCHES_BINDING_POWER),
        TokenKind::Turbofish => Some(20),
        TokenKind::LeftParen => Some(22),
        TokenKind::Question => Some(24),
        TokenKind::Dot => Some(26),
        TokenKind::ColonColon => Some(28),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_op_from_token() {
        assert_eq!(BinaryOp::from_token(TokenKind::Star), Some(BinaryOp::Multiply));
        assert_eq!(BinaryOp::from_token(TokenKind::Equal), Some(BinaryOp::ValueAssignment));
        assert_eq!(BinaryOp::from_token(TokenKind::Bang), None);
    }

    #[test]
    fn binary_precedence_ordering() {
        let mul = BinaryOp::Multiply.binding_power().0;
        let add = BinaryOp::Plus.binding_power().0;
        let cmp = BinaryOp::LessThan.binding_power().0;
        let eq = BinaryOp::EqualityCheck.binding_power().0;
        let and = BinaryOp::BooleanAnd.binding_power().0;
        let or = BinaryOp::BooleanOr.binding_power().0;
        let assign = BinaryOp::ValueAssignment.binding_power().0;

        assert!(mul > add && add > cmp && cmp > eq && eq > and && and > or && or > assign);
    }

    #[test]
    fn assignment_is_right_associative() {
        let (left, right) = BinaryOp::ValueAssignment.binding_power();
        assert_eq!(left, right);

        let (left, right) = BinaryOp::Minus.binding_power();
        assert!(right > left);
    }

    #[test]
    fn postfix_powers_sit_above_prefix() {
        for kind in [TokenKind::Turbofish, TokenKind::LeftParen, TokenKind::Question, TokenKind::Dot, TokenKind::ColonColon] {
            let power = infix_binding_power(kind).unwrap_or_default();
            assert!(power > PREFIX_BINDING_POWER, "{kind:?}");
        }
        assert!(BinaryOp::Multiply.binding_power().0 < PREFIX_BINDING_POWER);
    }

    #[test]
    fn matches_sits_between_equality_and_and() {
        assert!(MATCHES_BINDING_POWER > BinaryOp::BooleanAnd.binding_power().0);
        assert!(MATCHES_BINDING_POWER < BinaryOp::EqualityCheck.binding_power().0);
    }

    #[test]
    fn prefix_only_tokens_have_no_infix_power() {
        assert_eq!(infix_binding_power(TokenKind::Bang), None);
        assert_eq!(infix_binding_power(TokenKind::Identifier), None);
        assert_eq!(infix_binding_power(TokenKind::Semicolon), None);
    }

    #[test]
    fn op_display() {
        assert_eq!(BinaryOp::NegativeEqualityCheck.to_string(), "!=");
        assert_eq!(UnaryOp::FallOut.to_string(), "?");
        assert!(UnaryOp::Negate.is_prefix());
        assert!(!UnaryOp::FallOut.is_prefix());
    }
}
