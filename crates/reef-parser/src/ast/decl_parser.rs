//! Declaration and scope parsing for Reef.
//!
//! Implements parsing of:
//! - The program scope and brace-delimited block scopes
//! - Member modifiers (`pub`, `mut`, `static`)
//! - Functions, classes and unions
//! - Class and union member lists (functions, fields, variants)
//! - Type parameter and function parameter lists

use bumpalo::collections::Vec as BumpVec;
use reef_core::SourceRange;

use super::parser::{ListItem, Parser};
use crate::ast::decl::*;
use crate::ast::expr::{Block, Expr};
use crate::ast::types::TypeIdentifier;
use crate::ast::ParserErrorKind;
use crate::lexer::{Token, TokenKind};

/// The kind of scope a statement list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ScopeKind {
    /// Top level. No closing token, type declarations allowed.
    Program,
    /// `{ ... }`
    Block,
}

impl ScopeKind {
    fn closer(self) -> Option<TokenKind> {
        match self {
            Self::Program => None,
            Self::Block => Some(TokenKind::RightBrace),
        }
    }

    /// Tokens that may start something other than an expression here.
    fn expected(self) -> Vec<TokenKind> {
        let mut expected = vec![TokenKind::Fn, TokenKind::Pub, TokenKind::Static];
        match self {
            Self::Program => expected.extend([TokenKind::Class, TokenKind::Union]),
            Self::Block => expected.push(TokenKind::RightBrace),
        }
        expected
    }
}

/// Statements and declarations collected while parsing a scope.
struct Scope<'ast> {
    expressions: BumpVec<'ast, Expr<'ast>>,
    functions: BumpVec<'ast, LangFunction<'ast>>,
    classes: BumpVec<'ast, ProgramClass<'ast>>,
    unions: BumpVec<'ast, ProgramUnion<'ast>>,
}

/// Modifiers seen before a declaration, with the token that introduced each.
#[derive(Debug, Clone, Copy, Default)]
struct Modifiers<'ast> {
    public: Option<Token<'ast>>,
    mutable: Option<Token<'ast>>,
    is_static: Option<Token<'ast>>,
}

impl<'ast> Modifiers<'ast> {
    fn visibility(&self) -> Visibility {
        if self.public.is_some() {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }

    fn tokens(&self) -> impl Iterator<Item = Token<'ast>> {
        [self.public, self.mutable, self.is_static].into_iter().flatten()
    }
}

/// What a member list accepts.
#[derive(Debug, Clone, Copy)]
struct MemberKinds {
    functions: bool,
    fields: bool,
    variants: bool,
}

impl MemberKinds {
    const CLASS: Self = Self {
        functions: true,
        fields: true,
        variants: false,
    };
    const UNION: Self = Self {
        functions: true,
        fields: false,
        variants: true,
    };
    const VARIANT: Self = Self {
        functions: false,
        fields: true,
        variants: false,
    };

    fn starters(self) -> Vec<TokenKind> {
        let mut kinds = Vec::new();
        if self.functions {
            kinds.push(TokenKind::Fn);
        }
        if self.fields {
            kinds.push(TokenKind::Field);
        }
        if self.variants {
            kinds.push(TokenKind::Identifier);
        }
        kinds
    }

    fn expected(self) -> Vec<TokenKind> {
        let mut expected = vec![TokenKind::RightBrace];
        if self.functions {
            expected.extend([TokenKind::Fn, TokenKind::Pub, TokenKind::Static]);
        }
        if self.fields {
            expected.extend([TokenKind::Field, TokenKind::Pub, TokenKind::Mut, TokenKind::Static]);
        }
        if self.variants {
            expected.push(TokenKind::Identifier);
        }
        expected
    }

    fn starts_member(self, kind: TokenKind) -> bool {
        match kind {
            TokenKind::Pub | TokenKind::Mut | TokenKind::Static | TokenKind::Fn | TokenKind::Field => true,
            TokenKind::Identifier => self.variants,
            _ => false,
        }
    }
}

/// The contents of a class or union body.
struct Members<'ast> {
    functions: BumpVec<'ast, LangFunction<'ast>>,
    fields: BumpVec<'ast, ClassField<'ast>>,
    variants: BumpVec<'ast, UnionVariant<'ast>>,
}

enum Member<'ast> {
    Function(LangFunction<'ast>),
    Field(ClassField<'ast>),
    Variant(UnionVariant<'ast>),
}

impl<'ast> Parser<'ast> {
    /// Parse the whole token stream as a program.
    pub fn parse_program(&mut self) -> LangProgram<'ast> {
        let start = self.current().map(|token| token.span);
        let scope = self.parse_scope(ScopeKind::Program);

        LangProgram {
            expressions: scope.expressions.into_bump_slice(),
            functions: scope.functions.into_bump_slice(),
            classes: scope.classes.into_bump_slice(),
            unions: scope.unions.into_bump_slice(),
            range: start.map_or_else(SourceRange::default, |start| self.range_from(start)),
        }
    }

    /// Parse `{ ... }`. Entered on `{`.
    pub(super) fn parse_block(&mut self) -> Block<'ast> {
        let open = self.current().map_or(self.eof, |token| token.span);
        let scope = self.parse_scope(ScopeKind::Block);

        Block {
            expressions: scope.expressions.into_bump_slice(),
            functions: scope.functions.into_bump_slice(),
            range: self.range_from(open),
        }
    }

    fn parse_scope(&mut self, kind: ScopeKind) -> Scope<'ast> {
        let mut scope = Scope {
            expressions: self.new_vec(),
            functions: self.new_vec(),
            classes: self.new_vec(),
            unions: self.new_vec(),
        };
        let closer = kind.closer();
        let expected = kind.expected();

        if closer.is_some() && !self.advance() {
            self.report(ParserErrorKind::ExpectedTokenOrExpression, None, &expected);
            return scope;
        }

        let mut tail: Option<Expr<'ast>> = None;

        while let Some(token) = self.current() {
            if Some(token.kind) == closer {
                self.advance();
                break;
            }

            let modifiers = self.parse_modifiers();

            let Some(token) = self.current() else {
                let remaining: Vec<TokenKind> = expected
                    .iter()
                    .copied()
                    .filter(|kind| match kind {
                        TokenKind::Pub => modifiers.public.is_none(),
                        TokenKind::Static => modifiers.is_static.is_none(),
                        _ => true,
                    })
                    .collect();
                if modifiers.public.is_none() && modifiers.is_static.is_none() {
                    self.report(ParserErrorKind::ExpectedTokenOrExpression, None, &remaining);
                } else {
                    self.expected_token(None, &remaining);
                }
                break;
            };

            match token.kind {
                TokenKind::Fn => {
                    if let Some(mutable) = modifiers.mutable {
                        self.report(ParserErrorKind::UnexpectedModifier, Some(mutable), &[TokenKind::Pub, TokenKind::Static]);
                    }
                    let modifiers = Modifiers {
                        mutable: None,
                        ..modifiers
                    };
                    if let Some(function) = self.parse_function(modifiers) {
                        scope.functions.push(function);
                    }
                    if !self.has_next() {
                        if closer.is_some() {
                            self.report(ParserErrorKind::ExpectedTokenOrExpression, None, &expected);
                        }
                        break;
                    }
                    continue;
                }
                TokenKind::Class | TokenKind::Union if kind == ScopeKind::Program => {
                    for modifier in [modifiers.mutable, modifiers.is_static].into_iter().flatten() {
                        self.report(ParserErrorKind::UnexpectedModifier, Some(modifier), &[TokenKind::Pub]);
                    }
                    let visibility = modifiers.visibility();
                    if token.kind == TokenKind::Class {
                        if let Some(class) = self.parse_class(visibility) {
                            scope.classes.push(class);
                        }
                    } else if let Some(union) = self.parse_union(visibility) {
                        scope.unions.push(union);
                    }
                    if !self.has_next() {
                        if closer.is_some() {
                            self.report(ParserErrorKind::ExpectedTokenOrExpression, None, &expected);
                        }
                        break;
                    }
                    continue;
                }
                _ => {}
            }

            for modifier in modifiers.tokens() {
                self.report(ParserErrorKind::UnexpectedModifier, Some(modifier), &[]);
            }

            let (expr, consumed) = self.parse_expr_tracked(0);
            let Some(expr) = expr else {
                if !consumed {
                    if !self.check(TokenKind::Semicolon) {
                        let found = self.current();
                        self.report(ParserErrorKind::ExpectedTokenOrExpression, found, &expected);
                    }
                    self.advance();
                }
                if !self.has_next() || (self.check(TokenKind::Semicolon) && !self.advance()) {
                    if closer.is_some() {
                        self.report(ParserErrorKind::ExpectedTokenOrExpression, None, &expected);
                    }
                    break;
                }
                if closer.is_some_and(|closer| self.check(closer)) {
                    self.advance();
                    break;
                }
                continue;
            };

            scope.expressions.push(expr);
            if tail.take().is_some() {
                self.expected_token(Some(token), &[TokenKind::Semicolon]);
            }

            let Some(next) = self.current() else {
                if let Some(closer) = closer {
                    self.expected_token(None, &[TokenKind::Semicolon, closer]);
                }
                break;
            };

            if next.kind == TokenKind::Semicolon {
                if !self.advance() && closer.is_some() {
                    self.report(ParserErrorKind::ExpectedTokenOrExpression, None, &expected);
                }
            } else if !expr.is_block_like() {
                tail = Some(expr);
            }
        }

        scope
    }

    /// Collect `pub`, `mut` and `static` in any order.
    fn parse_modifiers(&mut self) -> Modifiers<'ast> {
        let mut modifiers = Modifiers::default();

        while let Some(token) = self.current() {
            let slot = match token.kind {
                TokenKind::Pub => &mut modifiers.public,
                TokenKind::Mut => &mut modifiers.mutable,
                TokenKind::Static => &mut modifiers.is_static,
                _ => break,
            };
            if slot.is_some() {
                self.report(ParserErrorKind::DuplicateModifier, Some(token), &[]);
            } else {
                *slot = Some(token);
            }
            self.advance();
        }

        modifiers
    }

    /// `<A, B>`. Entered on `<`.
    fn parse_type_parameters(&mut self) -> &'ast [Token<'ast>] {
        let (parameters, _) = self.comma_separated_list(TokenKind::Greater, ListItem::Tokens(&[TokenKind::Identifier]), |p| {
            let name = p.expect_current_identifier(&[TokenKind::Greater]);
            p.advance();
            name
        });
        parameters.into_bump_slice()
    }

    /// Whether the last consumed token was `kind`.
    fn previous_was(&self, kind: TokenKind) -> bool {
        self.previous().is_some_and(|token| token.kind == kind)
    }

    /// `fn name[<T>](params)[: Type] { body }`. Entered on `fn`.
    fn parse_function(&mut self, modifiers: Modifiers<'ast>) -> Option<LangFunction<'ast>> {
        let fn_token = self.current()?;
        let Some(name) = self.expect_next_identifier() else {
            self.advance();
            return None;
        };
        let id = self.next_decl_id();

        let mut type_parameters: &'ast [Token<'ast>] = &[];
        let mut parameters: &'ast [FunctionParameter<'ast>] = &[];
        let mut return_type: Option<TypeIdentifier<'ast>> = None;

        let body = 'body: {
            if !self.advance() {
                self.expected_token(None, &[TokenKind::Less, TokenKind::LeftParen]);
                break 'body None;
            }

            let has_type_parameters = self.check(TokenKind::Less);
            if has_type_parameters {
                type_parameters = self.parse_type_parameters();
                if !self.has_next() {
                    if self.previous_was(TokenKind::Greater) {
                        self.expected_token(None, &[TokenKind::LeftParen]);
                    }
                    break 'body None;
                }
            }

            if !self.check(TokenKind::LeftParen) {
                let found = self.current();
                if has_type_parameters {
                    self.expected_token(found, &[TokenKind::LeftParen]);
                } else {
                    self.expected_token(found, &[TokenKind::LeftParen, TokenKind::Less]);
                }
                self.advance();
                break 'body None;
            }

            parameters = self.parse_parameters();
            if !self.has_next() {
                if self.previous_was(TokenKind::RightParen) {
                    self.expected_token(None, &[TokenKind::LeftBrace, TokenKind::Colon]);
                }
                break 'body None;
            }

            if self.check(TokenKind::Colon) {
                let Some(ty) = self.expect_next_type() else {
                    self.advance();
                    break 'body None;
                };
                return_type = Some(ty);
                if !self.has_next() {
                    self.expected_token(None, &[TokenKind::LeftBrace]);
                    break 'body None;
                }
            }

            if !self.check(TokenKind::LeftBrace) {
                let found = self.current();
                if return_type.is_some() {
                    self.expected_token(found, &[TokenKind::LeftBrace]);
                } else {
                    self.expected_token(found, &[TokenKind::Colon, TokenKind::LeftBrace]);
                }
                self.advance();
                break 'body None;
            }

            Some(self.parse_block())
        };

        let body = body.unwrap_or_else(|| Block {
            expressions: &[],
            functions: &[],
            range: self.range_from(fn_token.span),
        });

        Some(LangFunction {
            id,
            visibility: modifiers.visibility(),
            is_static: modifiers.is_static.is_some(),
            is_mutable: modifiers.mutable.is_some(),
            name,
            type_parameters,
            parameters,
            return_type,
            body,
        })
    }

    /// `([mut] name: Type, ...)`. Entered on `(`.
    fn parse_parameters(&mut self) -> &'ast [FunctionParameter<'ast>] {
        let (parameters, _) = self.comma_separated_list(
            TokenKind::RightParen,
            ListItem::Tokens(&[TokenKind::Identifier, TokenKind::Mut]),
            |p| {
                let is_mutable = p.check(TokenKind::Mut);
                if is_mutable && !p.advance() {
                    p.expected_token(None, &[TokenKind::Identifier]);
                    return None;
                }

                let name = match p.current() {
                    Some(token) if token.kind == TokenKind::Identifier => token,
                    found => {
                        if is_mutable {
                            p.expected_token(found, &[TokenKind::Identifier]);
                        } else {
                            p.expected_token(found, &[TokenKind::Mut, TokenKind::Identifier]);
                        }
                        p.advance();
                        return None;
                    }
                };

                if p.expect_next_token(TokenKind::Colon).is_none() {
                    return Some(FunctionParameter {
                        is_mutable,
                        name,
                        ty: None,
                    });
                }
                let ty = p.expect_next_type();
                Some(FunctionParameter { is_mutable, name, ty })
            },
        );
        parameters.into_bump_slice()
    }

    /// `class Name[<T>] { members }`. Entered on `class`.
    fn parse_class(&mut self, visibility: Visibility) -> Option<ProgramClass<'ast>> {
        let (name, type_parameters) = self.parse_type_declaration_head()?;
        let id = self.next_decl_id();

        let (functions, fields) = match self.parse_type_declaration_body(type_parameters.is_some(), MemberKinds::CLASS) {
            Some(members) => (members.functions.into_bump_slice(), members.fields.into_bump_slice()),
            None => (&[][..], &[][..]),
        };

        Some(ProgramClass {
            id,
            visibility,
            name,
            type_parameters: type_parameters.unwrap_or_default(),
            functions,
            fields,
        })
    }

    /// `union Name[<T>] { members }`. Entered on `union`.
    fn parse_union(&mut self, visibility: Visibility) -> Option<ProgramUnion<'ast>> {
        let (name, type_parameters) = self.parse_type_declaration_head()?;
        let id = self.next_decl_id();

        let (functions, variants) = match self.parse_type_declaration_body(type_parameters.is_some(), MemberKinds::UNION) {
            Some(members) => (members.functions.into_bump_slice(), members.variants.into_bump_slice()),
            None => (&[][..], &[][..]),
        };

        Some(ProgramUnion {
            id,
            visibility,
            name,
            type_parameters: type_parameters.unwrap_or_default(),
            functions,
            variants,
        })
    }

    /// `class Name[<T>]` / `union Name[<T>]`. Entered on the keyword and left
    /// on the token after the name or type parameter list.
    ///
    /// Yields `None` when the name is missing. The parameter list is `None`
    /// when no `<` followed the name.
    fn parse_type_declaration_head(&mut self) -> Option<(Token<'ast>, Option<&'ast [Token<'ast>]>)> {
        let Some(name) = self.expect_next_identifier() else {
            self.advance();
            return None;
        };

        if self.advance() && self.check(TokenKind::Less) {
            return Some((name, Some(self.parse_type_parameters())));
        }

        Some((name, None))
    }

    /// The `{ ... }` body after a class or union head.
    fn parse_type_declaration_body(&mut self, has_type_parameters: bool, kinds: MemberKinds) -> Option<Members<'ast>> {
        let Some(token) = self.current() else {
            if !has_type_parameters {
                self.expected_token(None, &[TokenKind::Less, TokenKind::LeftBrace]);
            } else if self.previous_was(TokenKind::Greater) {
                self.expected_token(None, &[TokenKind::LeftBrace]);
            }
            return None;
        };

        if token.kind != TokenKind::LeftBrace {
            if has_type_parameters {
                self.expected_token(Some(token), &[TokenKind::LeftBrace]);
            } else {
                self.expected_token(Some(token), &[TokenKind::LeftBrace, TokenKind::Less]);
            }
            self.advance();
            return None;
        }

        Some(self.parse_member_list(kinds))
    }

    /// `{ member, ... }`. Entered on `{`, left after `}`.
    ///
    /// Fields and variants are comma separated; functions are not.
    fn parse_member_list(&mut self, kinds: MemberKinds) -> Members<'ast> {
        let mut members = Members {
            functions: self.new_vec(),
            fields: self.new_vec(),
            variants: self.new_vec(),
        };
        let expected = kinds.expected();

        if !self.advance() {
            self.member_list_error(None, &expected, false);
            return members;
        }

        let mut expect_comma = false;

        while let Some(token) = self.current() {
            if token.kind == TokenKind::Comma {
                if !expect_comma {
                    self.member_list_error(Some(token), &expected, false);
                }
                expect_comma = false;
                if !self.advance() {
                    self.member_list_error(None, &expected, false);
                    break;
                }
                continue;
            }

            if token.kind == TokenKind::RightBrace {
                self.advance();
                break;
            }

            if expect_comma {
                self.expected_token(Some(token), &[TokenKind::Comma, TokenKind::RightBrace]);
                expect_comma = false;
            }

            if !kinds.starts_member(token.kind) {
                self.member_list_error(Some(token), &expected, false);
                if !self.advance() {
                    self.member_list_error(None, &expected, false);
                    break;
                }
                continue;
            }

            let modifiers = self.parse_modifiers();
            let separated = self.check(TokenKind::Field) || (kinds.variants && self.check(TokenKind::Identifier));

            match self.parse_member(kinds, modifiers) {
                Some(Member::Function(function)) => members.functions.push(function),
                Some(Member::Field(field)) => {
                    members.fields.push(field);
                    expect_comma = true;
                }
                Some(Member::Variant(variant)) => {
                    members.variants.push(variant);
                    expect_comma = true;
                }
                None => expect_comma = separated,
            }

            if !self.has_next() {
                self.member_list_error(None, &expected, expect_comma);
                break;
            }
        }

        members
    }

    fn member_list_error(&mut self, found: Option<Token<'ast>>, expected: &[TokenKind], allow_comma: bool) {
        let mut expected = expected.to_vec();
        if allow_comma {
            expected.push(TokenKind::Comma);
        }
        self.expected_token(found, &expected);
    }

    /// A single member after its modifiers. Members of a kind the list does
    /// not accept are reported, parsed and dropped.
    fn parse_member(&mut self, kinds: MemberKinds, modifiers: Modifiers<'ast>) -> Option<Member<'ast>> {
        let token = self.current()?;

        match token.kind {
            TokenKind::Fn => {
                if !kinds.functions {
                    self.expected_token(Some(token), &kinds.starters());
                    self.parse_function(modifiers);
                    return None;
                }
                self.parse_function(modifiers).map(Member::Function)
            }
            TokenKind::Field => {
                if !kinds.fields {
                    self.expected_token(Some(token), &kinds.starters());
                    self.parse_field(modifiers);
                    return None;
                }
                self.parse_field(modifiers).map(Member::Field)
            }
            TokenKind::Identifier if kinds.variants => {
                for modifier in modifiers.tokens() {
                    self.report(ParserErrorKind::UnexpectedModifier, Some(modifier), &[]);
                }
                Some(Member::Variant(self.parse_variant(token)))
            }
            _ => {
                self.expected_token(Some(token), &kinds.starters());
                if token.kind != TokenKind::RightBrace {
                    self.advance();
                }
                None
            }
        }
    }

    /// `field name: Type [= initializer]`. Entered on `field`.
    fn parse_field(&mut self, modifiers: Modifiers<'ast>) -> Option<ClassField<'ast>> {
        let name = self.expect_next_identifier()?;
        let mut field = ClassField {
            visibility: modifiers.visibility(),
            is_static: modifiers.is_static.is_some(),
            is_mutable: modifiers.mutable.is_some(),
            name,
            ty: None,
            initializer: None,
        };

        if self.expect_next_token(TokenKind::Colon).is_none() {
            return Some(field);
        }
        field.ty = self.expect_next_type();
        if field.ty.is_none() {
            return Some(field);
        }
        if self.check(TokenKind::Equal) {
            field.initializer = self.expect_next_expression(0);
        }

        Some(field)
    }

    /// `Name`, `Name(T, ...)` or `Name { field a: T, ... }`. Entered on the
    /// name.
    fn parse_variant(&mut self, name: Token<'ast>) -> UnionVariant<'ast> {
        if !self.advance() {
            return UnionVariant::Unit { name };
        }

        match self.current_kind() {
            Some(TokenKind::LeftParen) => {
                let (members, _) = self.comma_separated_list(TokenKind::RightParen, ListItem::Type, |p| {
                    let member = p.expect_current_type();
                    if member.is_none() {
                        p.advance();
                    }
                    member
                });
                UnionVariant::Tuple {
                    name,
                    members: members.into_bump_slice(),
                }
            }
            Some(TokenKind::LeftBrace) => {
                let members = self.parse_member_list(MemberKinds::VARIANT);
                UnionVariant::Class {
                    name,
                    fields: members.fields.into_bump_slice(),
                }
            }
            _ => UnionVariant::Unit { name },
        }
    }
}
