//! Pattern parsing for `matches` and `match` arms.
//!
//! Grammar:
//! ```text
//! pattern   := '_'
//!            | 'var' ['mut'] IDENT
//!            | type ['::' IDENT] [tuple | fields] [binding]
//! tuple     := '(' pattern (',' pattern)* [','] ')'
//! fields    := '{' field (',' field)* [',' '_'] [','] '}'
//! field     := IDENT [':' pattern]
//! binding   := 'var' ['mut'] IDENT
//! ```

use super::parser::{ListItem, Parser};
use super::type_parser::is_type_name;
use crate::ast::pattern::*;
use crate::ast::types::TypeIdentifier;
use crate::lexer::{Token, TokenKind};

impl<'ast> Parser<'ast> {
    /// Parse a pattern starting at the current token.
    pub fn parse_pattern(&mut self) -> Option<Pattern<'ast>> {
        let Some(token) = self.current() else {
            self.expected_pattern(None);
            return None;
        };

        match token.kind {
            TokenKind::Underscore => {
                self.advance();
                Some(Pattern::Discard(self.range_from(token.span)))
            }
            TokenKind::Var => {
                let (name, is_mutable) = self.parse_var_name()?;
                Some(Pattern::Variable(self.alloc(VariablePattern {
                    name,
                    is_mutable,
                    range: self.range_from(token.span),
                })))
            }
            kind if is_type_name(kind) => self.parse_type_pattern(),
            _ => {
                self.expected_pattern(Some(token));
                self.advance();
                None
            }
        }
    }

    /// `var [mut] name`. Entered on `var`, leaves the current token after
    /// the name.
    fn parse_var_name(&mut self) -> Option<(Token<'ast>, bool)> {
        if !self.advance() {
            self.expected_token(None, &[TokenKind::Mut, TokenKind::Identifier]);
            return None;
        }

        let is_mutable = self.check(TokenKind::Mut);
        if is_mutable && !self.advance() {
            self.expected_token(None, &[TokenKind::Identifier]);
            return None;
        }

        match self.current() {
            Some(name) if name.kind == TokenKind::Identifier => {
                self.advance();
                Some((name, is_mutable))
            }
            found if is_mutable => {
                self.expected_token(found, &[TokenKind::Identifier]);
                None
            }
            found => {
                self.expected_token(found, &[TokenKind::Mut, TokenKind::Identifier]);
                None
            }
        }
    }

    /// An optional trailing `var [mut] name`.
    fn parse_pattern_binding(&mut self) -> Option<PatternBinding<'ast>> {
        if !self.check(TokenKind::Var) {
            return None;
        }
        let (name, is_mutable) = self.parse_var_name()?;
        Some(PatternBinding { name, is_mutable })
    }

    fn parse_type_pattern(&mut self) -> Option<Pattern<'ast>> {
        let ty = self.parse_type()?;
        let start = ty.range().start;

        if !self.has_next() {
            return Some(Pattern::Type(self.alloc(TypePattern {
                ty,
                binding: None,
                range: self.range_from(start),
            })));
        }

        let mut variant = None;
        if self.check(TokenKind::ColonColon) {
            let Some(name) = self.expect_next_identifier() else {
                self.advance();
                return Some(Pattern::UnionVariant(self.alloc(UnionVariantPattern {
                    ty,
                    variant: None,
                    binding: None,
                    range: self.range_from(start),
                })));
            };
            variant = Some(name);
            self.advance();
        }

        match (variant, self.current_kind()) {
            (Some(variant), Some(TokenKind::LeftParen)) => {
                let (members, _) = self.comma_separated_list(TokenKind::RightParen, ListItem::Pattern, |p| p.parse_pattern());
                let binding = self.parse_pattern_binding();
                Some(Pattern::UnionTupleVariant(self.alloc(UnionTupleVariantPattern {
                    ty,
                    variant,
                    members: members.into_bump_slice(),
                    binding,
                    range: self.range_from(start),
                })))
            }
            (_, Some(TokenKind::LeftBrace)) => Some(self.parse_class_pattern(ty, variant)),
            (Some(variant), _) => {
                let binding = self.parse_pattern_binding();
                Some(Pattern::UnionVariant(self.alloc(UnionVariantPattern {
                    ty,
                    variant: Some(variant),
                    binding,
                    range: self.range_from(start),
                })))
            }
            (None, _) => {
                let binding = self.parse_pattern_binding();
                Some(Pattern::Type(self.alloc(TypePattern {
                    ty,
                    binding,
                    range: self.range_from(start),
                })))
            }
        }
    }

    /// `{ a, b: pattern, _ }` after a class type or union variant.
    fn parse_class_pattern(&mut self, ty: TypeIdentifier<'ast>, variant: Option<Token<'ast>>) -> Pattern<'ast> {
        let start = ty.range().start;
        let mut discard_remaining = false;

        let (entries, _) = self.comma_separated_list(
            TokenKind::RightBrace,
            ListItem::Tokens(&[TokenKind::Underscore, TokenKind::Identifier]),
            |p| {
                if p.check(TokenKind::Underscore) {
                    discard_remaining = true;
                    if p.advance() && !p.check(TokenKind::RightBrace) {
                        let found = p.current();
                        p.expected_token(found, &[TokenKind::RightBrace]);
                    }
                    return Some(None);
                }

                let name = p.expect_current_identifier(&[TokenKind::Underscore])?;
                if !p.advance() || !p.check(TokenKind::Colon) {
                    return Some(Some(FieldPattern { name, pattern: None }));
                }
                if !p.advance() {
                    p.expected_pattern(None);
                    return Some(Some(FieldPattern { name, pattern: None }));
                }
                let pattern = p.parse_pattern();
                Some(Some(FieldPattern { name, pattern }))
            },
        );

        let mut fields = self.new_vec();
        fields.extend(entries.into_iter().flatten());
        let fields = fields.into_bump_slice();
        let binding = self.parse_pattern_binding();

        match variant {
            Some(variant) => Pattern::UnionClassVariant(self.alloc(UnionClassVariantPattern {
                ty,
                variant,
                fields,
                discard_remaining,
                binding,
                range: self.range_from(start),
            })),
            None => Pattern::Class(self.alloc(ClassPattern {
                ty,
                fields,
                discard_remaining,
                binding,
                range: self.range_from(start),
            })),
        }
    }
}
