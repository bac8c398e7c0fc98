//! Type parsing functions for Reef.
//!
//! Implements parsing of type identifiers including:
//! - Named types and built-in type keywords (`MyClass`, `int`)
//! - Explicit type arguments (`Result::<int, string>`)
//! - Storage specifiers (`boxed MyClass`, `unboxed (int, int)`)
//! - Tuple and unit types (`(int, string)`, `()`)
//! - Function types (`Fn(int, mut MyClass): bool`)

use reef_core::SourceRange;

use super::parser::{ListItem, Parser};
use crate::ast::types::*;
use crate::ast::ParserErrorKind;
use crate::lexer::{Token, TokenKind};

/// Whether a token can name a type.
pub(super) fn is_type_name(kind: TokenKind) -> bool {
    kind == TokenKind::Identifier || kind.is_type_keyword()
}

impl<'ast> Parser<'ast> {
    /// Parse a type identifier starting at the current token.
    ///
    /// Reports `ExpectedType` and returns `None` without consuming anything
    /// when the current token cannot start a type.
    pub fn parse_type(&mut self) -> Option<TypeIdentifier<'ast>> {
        self.parse_type_with_boxing(None)
    }

    fn parse_type_with_boxing(&mut self, boxing: Option<Token<'ast>>) -> Option<TypeIdentifier<'ast>> {
        let token = match self.current() {
            Some(token) => token,
            None => {
                self.expected_type(None);
                return None;
            }
        };

        match token.kind {
            TokenKind::Identifier if token.lexeme == "Fn" => Some(self.parse_fn_type(token)),
            TokenKind::Boxed | TokenKind::Unboxed => {
                if boxing.is_some() {
                    self.report(ParserErrorKind::ExpectedTypeName, Some(token), &[]);
                }
                if !self.advance() {
                    self.report(ParserErrorKind::ExpectedTypeName, None, &[]);
                    return None;
                }
                self.parse_type_with_boxing(Some(token))
            }
            kind if is_type_name(kind) => self.parse_named_type(boxing).map(TypeIdentifier::Named),
            TokenKind::LeftParen => Some(self.parse_tuple_type(boxing)),
            _ => {
                self.expected_type(Some(token));
                None
            }
        }
    }

    /// Parse a named type with optional `::<...>` type arguments.
    pub(super) fn parse_named_type(&mut self, boxing: Option<Token<'ast>>) -> Option<&'ast NamedTypeIdentifier<'ast>> {
        let name = match self.current() {
            Some(token) if is_type_name(token.kind) => token,
            found => {
                let kind = if boxing.is_some() {
                    ParserErrorKind::ExpectedTypeName
                } else {
                    ParserErrorKind::ExpectedType
                };
                self.report(kind, found, &[]);
                return None;
            }
        };

        let mut type_arguments: &'ast [TypeIdentifier<'ast>] = &[];
        let mut last = name;
        if self.advance() && self.check(TokenKind::Turbofish) {
            let (arguments, last_token) = self.parse_type_arguments();
            type_arguments = arguments;
            last = last_token.unwrap_or(name);
        }

        let start = boxing.map_or(name.span, |token| token.span);
        Some(self.alloc(NamedTypeIdentifier {
            name,
            type_arguments,
            boxing: boxing.map(boxing_specifier),
            range: SourceRange::new(start, last.span),
        }))
    }

    /// Parse `::<A, B>`. Entered on the `::<` token.
    pub(super) fn parse_type_arguments(&mut self) -> (&'ast [TypeIdentifier<'ast>], Option<Token<'ast>>) {
        let (arguments, last) = self.comma_separated_list(TokenKind::Greater, ListItem::Type, |p| {
            let argument = p.expect_current_type();
            if argument.is_none() {
                p.advance();
            }
            argument
        });
        (arguments.into_bump_slice(), last)
    }

    fn parse_tuple_type(&mut self, boxing: Option<Token<'ast>>) -> TypeIdentifier<'ast> {
        let open = self.current().map(|token| token.span).unwrap_or(self.eof);
        let start = boxing.map_or(open, |token| token.span);

        let (members, last) = self.comma_separated_list(TokenKind::RightParen, ListItem::Type, |p| {
            let member = p.parse_type();
            if member.is_none() {
                p.advance();
            }
            member
        });

        match last {
            Some(last) if members.is_empty() => TypeIdentifier::Unit(SourceRange::new(start, last.span)),
            _ => TypeIdentifier::Tuple(self.alloc(TupleTypeIdentifier {
                members: members.into_bump_slice(),
                boxing: boxing.map(boxing_specifier),
                range: SourceRange::new(start, last.map_or(start, |token| token.span)),
            })),
        }
    }

    fn parse_fn_type(&mut self, fn_token: Token<'ast>) -> TypeIdentifier<'ast> {
        let Some(open) = self.expect_next_token(TokenKind::LeftParen) else {
            return TypeIdentifier::Fn(self.alloc(FnTypeIdentifier {
                parameters: &[],
                return_type: None,
                range: SourceRange::single(fn_token.span),
            }));
        };

        let (parameters, last) = self.comma_separated_list(TokenKind::RightParen, ListItem::Type, |p| {
            let is_mutable = p.check(TokenKind::Mut);
            if is_mutable {
                p.advance();
            }
            if !p.has_next() {
                return None;
            }
            match p.parse_type() {
                Some(ty) => Some(FnTypeParameter { ty, is_mutable }),
                None => {
                    p.advance();
                    None
                }
            }
        });
        let mut end = last.unwrap_or(open).span;

        let mut return_type = None;
        if self.check(TokenKind::Colon) {
            return_type = self.expect_next_type();
            if let Some(ty) = return_type {
                end = ty.range().end;
            }
        }

        TypeIdentifier::Fn(self.alloc(FnTypeIdentifier {
            parameters: parameters.into_bump_slice(),
            return_type,
            range: SourceRange::new(fn_token.span, end),
        }))
    }

    /// Parse a type at the current token, reporting `ExpectedType` at end
    /// of input.
    pub(super) fn expect_current_type(&mut self) -> Option<TypeIdentifier<'ast>> {
        if !self.has_next() {
            self.expected_type(None);
            return None;
        }
        self.parse_type()
    }

    /// Consume the current token and parse a type after it.
    pub(super) fn expect_next_type(&mut self) -> Option<TypeIdentifier<'ast>> {
        if !self.advance() {
            self.expected_type(None);
            return None;
        }
        self.parse_type()
    }

    /// Consume the current token and parse a named type after it, allowing
    /// a `boxed`/`unboxed` prefix.
    pub(super) fn expect_next_named_type(&mut self) -> Option<&'ast NamedTypeIdentifier<'ast>> {
        if !self.advance() {
            self.expected_type(None);
            return None;
        }

        let mut boxing = None;
        if let Some(token) = self.current().filter(|t| matches!(t.kind, TokenKind::Boxed | TokenKind::Unboxed)) {
            boxing = Some(token);
            if !self.advance() {
                self.report(ParserErrorKind::ExpectedTypeName, None, &[]);
                return None;
            }
        }

        self.parse_named_type(boxing)
    }
}

fn boxing_specifier(token: Token<'_>) -> BoxingSpecifier {
    if token.kind == TokenKind::Unboxed {
        BoxingSpecifier::Unboxed
    } else {
        BoxingSpecifier::Boxed
    }
}
