//! Expression parsing using Pratt parsing (precedence climbing).
//!
//! Every token that can start or continue an expression is routed through
//! [`Parser::parse_operand`]. The loop in [`Parser::parse_expr_tracked`]
//! keeps feeding the expression built so far back in as the left operand for
//! as long as the next token binds at least as tightly as the caller allows.

use reef_core::{SourceRange, Span};

use super::parser::{ListItem, Parser};
use super::type_parser::is_type_name;
use crate::ast::expr::*;
use crate::ast::types::{NamedTypeIdentifier, TypeIdentifier};
use crate::ast::{infix_binding_power, BinaryOp, ParserErrorKind, UnaryOp, PREFIX_BINDING_POWER};
use crate::lexer::{Token, TokenKind};

impl<'ast> Parser<'ast> {
    /// Parse an expression with a minimum binding power.
    ///
    /// Stops without consuming anything at `;` or end of input.
    pub fn parse_expr(&mut self, min_bp: u8) -> Option<Expr<'ast>> {
        self.parse_expr_tracked(min_bp).0
    }

    /// Parse an expression and also report whether any token was consumed.
    ///
    /// Statement lists use the flag to tell "nothing here" apart from "a
    /// broken expression that was already reported".
    pub(super) fn parse_expr_tracked(&mut self, min_bp: u8) -> (Option<Expr<'ast>>, bool) {
        let start = self.position;
        let mut lhs: Option<Expr<'ast>> = None;

        while let Some(token) = self.current() {
            if token.kind == TokenKind::Semicolon {
                break;
            }
            if let Some(left) = lhs {
                if !infix_binding_power(token.kind).is_some_and(|bp| bp >= min_bp) {
                    break;
                }
                if token.kind == TokenKind::Turbofish && !takes_type_arguments(&left) {
                    break;
                }
            }

            lhs = self.parse_operand(token, lhs);
            if lhs.is_none() {
                break;
            }
        }

        (lhs, self.position != start)
    }

    /// Parse an expression at the current token, reporting `ExpectedExpression`
    /// when none is found.
    ///
    /// The report goes ahead of anything the failed attempt itself reported.
    pub(super) fn expect_current_expression(&mut self, min_bp: u8) -> Option<Expr<'ast>> {
        let before = self.current();
        let mark = self.errors.len();
        let expr = self.parse_expr(min_bp);
        if expr.is_none() {
            self.report_before(mark, ParserErrorKind::ExpectedExpression, before, &[]);
        }
        expr
    }

    /// Consume the current token and parse an expression after it.
    pub(super) fn expect_next_expression(&mut self, min_bp: u8) -> Option<Expr<'ast>> {
        if !self.advance() {
            self.expected_expression(None);
            return None;
        }
        self.expect_current_expression(min_bp)
    }

    /// Dispatch on a single token.
    ///
    /// `lhs` is the expression built so far; it is only present when `token`
    /// continues an expression (binary operators and postfix forms).
    fn parse_operand(&mut self, token: Token<'ast>, lhs: Option<Expr<'ast>>) -> Option<Expr<'ast>> {
        use TokenKind::*;
        match token.kind {
            IntLiteral | StringLiteral | True | False => {
                self.advance();
                Some(Expr::ValueAccess(ValueAccess {
                    kind: ValueAccessKind::Literal,
                    token,
                }))
            }
            Identifier | Todo | IntKeyword | StringKeyword | BoolKeyword => {
                self.advance();
                Some(Expr::ValueAccess(ValueAccess {
                    kind: ValueAccessKind::Variable,
                    token,
                }))
            }
            Var => self.parse_variable_declaration(token),
            LeftBrace => {
                let block = self.parse_block();
                Some(Expr::Block(self.alloc(block)))
            }
            If => self.parse_if(token),
            While => self.parse_while(token),
            Break => {
                self.advance();
                Some(Expr::Break(SourceRange::single(token.span)))
            }
            Continue => {
                self.advance();
                Some(Expr::Continue(SourceRange::single(token.span)))
            }
            Return => self.parse_return(token),
            New => self.parse_initializer(token),
            Match => self.parse_match(token),
            LeftParen => match lhs {
                Some(method) => Some(self.parse_call(method)),
                None => Some(self.parse_tuple(token)),
            },
            Dot => self.parse_member_access(token, lhs),
            ColonColon => self.parse_static_member_access(token, lhs),
            Turbofish => self.parse_generic_instantiation(lhs),
            Matches => self.parse_matches(token, lhs),
            Question => {
                self.advance();
                match lhs {
                    Some(operand) => Some(self.unary(UnaryOp::FallOut, token, Some(operand), operand.range().start)),
                    None => {
                        self.expected_expression(Some(token));
                        Some(self.unary(UnaryOp::FallOut, token, None, token.span))
                    }
                }
            }
            Bang => {
                let operand = self.expect_next_expression(PREFIX_BINDING_POWER);
                Some(self.unary(UnaryOp::Not, token, operand, token.span))
            }
            Minus if lhs.is_none() => {
                let operand = self.expect_next_expression(PREFIX_BINDING_POWER);
                Some(self.unary(UnaryOp::Negate, token, operand, token.span))
            }
            kind => {
                let op = BinaryOp::from_token(kind)?;
                match lhs {
                    Some(left) => Some(self.parse_binary(left, op, token)),
                    None => {
                        self.expected_expression(Some(token));
                        self.advance();
                        None
                    }
                }
            }
        }
    }

    fn unary(&mut self, op: UnaryOp, operator: Token<'ast>, operand: Option<Expr<'ast>>, start: Span) -> Expr<'ast> {
        let operand = operand.map(|e| self.alloc(e));
        Expr::Unary(self.alloc(UnaryExpr {
            op,
            operand,
            operator,
            range: self.range_from(start),
        }))
    }

    /// `left op right`. Entered on the operator.
    fn parse_binary(&mut self, left: Expr<'ast>, op: BinaryOp, operator: Token<'ast>) -> Expr<'ast> {
        let (_, right_bp) = op.binding_power();
        let right = self.expect_next_expression(right_bp).map(|e| self.alloc(e));
        Expr::Binary(self.alloc(BinaryExpr {
            left: self.alloc(left),
            op,
            right,
            operator,
            range: self.range_from(left.range().start),
        }))
    }

    /// `var [mut] name [: Type] [= value]`
    fn parse_variable_declaration(&mut self, var_token: Token<'ast>) -> Option<Expr<'ast>> {
        if !self.advance() {
            self.expected_token(None, &[TokenKind::Mut, TokenKind::Identifier]);
            return None;
        }

        let is_mutable = self.check(TokenKind::Mut);
        if is_mutable {
            self.expect_next_token(TokenKind::Identifier)?;
        }
        let name = self.expect_current_identifier(&[])?;

        let mut ty = None;
        let mut value = None;
        if self.advance() {
            if self.check(TokenKind::Colon) {
                ty = self.expect_next_type();
            }
            if self.check(TokenKind::Equal) {
                value = self.expect_next_expression(0).map(|e| self.alloc(e));
            }
        }

        Some(Expr::VariableDeclaration(self.alloc(VariableDeclarationExpr {
            name,
            is_mutable,
            ty,
            value,
            range: self.range_from(var_token.span),
        })))
    }

    /// `( check )` after `if`, `while` or `match`.
    ///
    /// Entered on the keyword. Returns the check and whether the closing
    /// paren was found, leaving the current token on the paren in that case.
    /// A missing paren or check consumes one token and yields `None`.
    fn parse_condition(&mut self) -> Option<(Expr<'ast>, bool)> {
        if self.expect_next_token(TokenKind::LeftParen).is_none() {
            self.advance();
            return None;
        }
        let Some(check) = self.expect_next_expression(0) else {
            self.advance();
            return None;
        };
        let closed = self.expect_current_token(TokenKind::RightParen).is_some();
        Some((check, closed))
    }

    /// `if (check) body [else if (check) body]* [else body]`
    fn parse_if(&mut self, if_token: Token<'ast>) -> Option<Expr<'ast>> {
        let (check, closed) = self.parse_condition()?;
        let check = self.alloc(check);

        if !closed {
            return Some(Expr::If(self.alloc(IfExpr {
                check,
                body: None,
                else_ifs: &[],
                else_body: None,
                range: self.range_from(if_token.span),
            })));
        }

        let body = self.expect_next_expression(0).map(|e| self.alloc(e));
        let mut else_ifs = self.new_vec();
        let mut else_body: Option<&'ast Expr<'ast>> = None;

        while let Some(else_token) = self.current().filter(|t| t.kind == TokenKind::Else) {
            if else_body.is_some() {
                self.expected_expression(Some(else_token));
                self.advance();
                break;
            }

            if !self.advance() {
                self.report(ParserErrorKind::ExpectedTokenOrExpression, None, &[TokenKind::If]);
                break;
            }

            if self.check(TokenKind::If) {
                let Some((check, closed)) = self.parse_condition() else {
                    break;
                };
                let body = if closed {
                    self.expect_next_expression(0).map(|e| self.alloc(e))
                } else {
                    None
                };
                else_ifs.push(ElseIf {
                    check: self.alloc(check),
                    body,
                });
                if !closed {
                    break;
                }
            } else {
                let before = self.current();
                match self.parse_expr(0) {
                    Some(expr) => else_body = Some(self.alloc(expr)),
                    None => {
                        self.expected_expression(before);
                        break;
                    }
                }
            }
        }

        Some(Expr::If(self.alloc(IfExpr {
            check,
            body,
            else_ifs: else_ifs.into_bump_slice(),
            else_body,
            range: self.range_from(if_token.span),
        })))
    }

    /// `while (check) body`
    fn parse_while(&mut self, while_token: Token<'ast>) -> Option<Expr<'ast>> {
        let (check, closed) = self.parse_condition()?;
        let body = if closed {
            self.expect_next_expression(0).map(|e| self.alloc(e))
        } else {
            None
        };

        Some(Expr::While(self.alloc(WhileExpr {
            check: self.alloc(check),
            body,
            range: self.range_from(while_token.span),
        })))
    }

    /// `return [value]`
    fn parse_return(&mut self, return_token: Token<'ast>) -> Option<Expr<'ast>> {
        let value = if self.advance() { self.parse_expr(0) } else { None };
        let value = value.map(|e| self.alloc(e));
        Some(Expr::MethodReturn(self.alloc(MethodReturnExpr {
            value,
            range: self.range_from(return_token.span),
        })))
    }

    /// `method(a, b)`. Entered on `(`.
    fn parse_call(&mut self, method: Expr<'ast>) -> Expr<'ast> {
        let arguments = self.parse_expression_list();
        Expr::MethodCall(self.alloc(MethodCallExpr {
            method: self.alloc(method),
            arguments,
            range: self.range_from(method.range().start),
        }))
    }

    /// `(a, b)`. A single parenthesised expression is a one element tuple.
    fn parse_tuple(&mut self, open: Token<'ast>) -> Expr<'ast> {
        let elements = self.parse_expression_list();
        Expr::Tuple(self.alloc(TupleExpr {
            elements,
            range: self.range_from(open.span),
        }))
    }

    fn parse_expression_list(&mut self) -> &'ast [Expr<'ast>] {
        let (elements, _) = self.comma_separated_list(TokenKind::RightParen, ListItem::Expression, |p| {
            p.expect_current_expression(0)
        });
        elements.into_bump_slice()
    }

    /// `owner.member`
    fn parse_member_access(&mut self, dot: Token<'ast>, lhs: Option<Expr<'ast>>) -> Option<Expr<'ast>> {
        if lhs.is_none() {
            self.expected_expression(Some(dot));
        }
        let member = self.expect_next_identifier();
        self.advance();

        let owner = lhs?;
        Some(Expr::MemberAccess(self.alloc(MemberAccessExpr {
            owner: self.alloc(owner),
            member,
            range: self.range_from(owner.range().start),
        })))
    }

    /// `Type::member`
    fn parse_static_member_access(&mut self, colon_colon: Token<'ast>, lhs: Option<Expr<'ast>>) -> Option<Expr<'ast>> {
        let Some(owner) = lhs.and_then(|expr| self.expr_as_type(expr)) else {
            if lhs.is_some() {
                self.expected_type(Some(colon_colon));
            } else {
                self.expected_expression(Some(colon_colon));
            }
            if self.advance() && self.check(TokenKind::Identifier) {
                self.advance();
            }
            return lhs;
        };

        let member = self.expect_next_identifier();
        self.advance();

        Some(Expr::StaticMemberAccess(self.alloc(StaticMemberAccessExpr {
            owner: TypeIdentifier::Named(owner),
            member,
            range: self.range_from(owner.range.start),
        })))
    }

    /// Reinterpret a variable, optionally with type arguments, as a type.
    fn expr_as_type(&self, expr: Expr<'ast>) -> Option<&'ast NamedTypeIdentifier<'ast>> {
        let (access, type_arguments, range) = match expr {
            Expr::ValueAccess(access) => (access, &[][..], access.range()),
            Expr::GenericInstantiation(generic) => match *generic.value {
                Expr::ValueAccess(access) => (access, generic.type_arguments, generic.range),
                _ => return None,
            },
            _ => return None,
        };
        if access.kind != ValueAccessKind::Variable || !is_type_name(access.token.kind) {
            return None;
        }
        Some(self.alloc(NamedTypeIdentifier {
            name: access.token,
            type_arguments,
            boxing: None,
            range,
        }))
    }

    /// `value::<A, B>`. Without a value nothing is consumed.
    fn parse_generic_instantiation(&mut self, lhs: Option<Expr<'ast>>) -> Option<Expr<'ast>> {
        let value = lhs?;
        let (type_arguments, _) = self.parse_type_arguments();
        Some(Expr::GenericInstantiation(self.alloc(GenericInstantiationExpr {
            value: self.alloc(value),
            type_arguments,
            range: self.range_from(value.range().start),
        })))
    }

    /// `value matches pattern`
    fn parse_matches(&mut self, matches: Token<'ast>, lhs: Option<Expr<'ast>>) -> Option<Expr<'ast>> {
        let Some(value) = lhs else {
            self.expected_expression(Some(matches));
            self.advance();
            return None;
        };

        let pattern = if self.advance() {
            self.parse_pattern()
        } else {
            self.expected_pattern(None);
            None
        };

        Some(Expr::Matches(self.alloc(MatchesExpr {
            value: self.alloc(value),
            pattern,
            range: self.range_from(value.range().start),
        })))
    }

    /// `match (value) { pattern => expression, ... }`
    fn parse_match(&mut self, match_token: Token<'ast>) -> Option<Expr<'ast>> {
        let (value, closed) = self.parse_condition()?;
        let value = self.alloc(value);

        if !closed || self.expect_next_token(TokenKind::LeftBrace).is_none() {
            return Some(Expr::Match(self.alloc(MatchExpr {
                value,
                arms: &[],
                range: self.range_from(match_token.span),
            })));
        }

        let (arms, _) = self.comma_separated_list(TokenKind::RightBrace, ListItem::Pattern, |p| {
            let pattern = p.parse_pattern()?;
            if p.expect_current_token(TokenKind::FatArrow).is_none() {
                return Some(MatchArm {
                    pattern,
                    expression: None,
                });
            }
            let expression = p.expect_next_expression(0);
            Some(MatchArm { pattern, expression })
        });

        Some(Expr::Match(self.alloc(MatchExpr {
            value,
            arms: arms.into_bump_slice(),
            range: self.range_from(match_token.span),
        })))
    }

    /// `new Type { a = 1 }` or `new Union::Variant { a = 1 }`
    fn parse_initializer(&mut self, new_token: Token<'ast>) -> Option<Expr<'ast>> {
        let Some(ty) = self.expect_next_named_type() else {
            self.advance();
            return None;
        };

        match self.current() {
            None => {
                self.expected_token(None, &[TokenKind::LeftBrace, TokenKind::ColonColon]);
                Some(Expr::ObjectInitializer(self.alloc(ObjectInitializerExpr {
                    ty,
                    fields: &[],
                    range: self.range_from(new_token.span),
                })))
            }
            Some(token) if token.kind == TokenKind::LeftBrace => {
                let fields = self.parse_field_initializers();
                Some(Expr::ObjectInitializer(self.alloc(ObjectInitializerExpr {
                    ty,
                    fields,
                    range: self.range_from(new_token.span),
                })))
            }
            Some(token) if token.kind == TokenKind::ColonColon => {
                let variant = self.expect_next_identifier()?;
                let fields = if self.expect_next_token(TokenKind::LeftBrace).is_some() {
                    self.parse_field_initializers()
                } else {
                    &[]
                };
                Some(Expr::UnionClassVariantInitializer(self.alloc(UnionClassVariantInitializerExpr {
                    ty,
                    variant,
                    fields,
                    range: self.range_from(new_token.span),
                })))
            }
            found => {
                self.expected_token(found, &[TokenKind::LeftBrace, TokenKind::ColonColon]);
                None
            }
        }
    }

    /// `{ name = value, ... }`. Entered on `{`.
    fn parse_field_initializers(&mut self) -> &'ast [FieldInitializer<'ast>] {
        let (fields, _) = self.comma_separated_list(TokenKind::RightBrace, ListItem::Tokens(&[TokenKind::Identifier]), |p| {
            let name = p.expect_current_identifier(&[])?;
            if p.expect_next_token(TokenKind::Equal).is_none() {
                return Some(FieldInitializer { name, value: None });
            }
            let value = p.expect_next_expression(0);
            Some(FieldInitializer { name, value })
        });
        fields.into_bump_slice()
    }
}

/// Only variables and member accesses accept `::<...>`.
fn takes_type_arguments(expr: &Expr<'_>) -> bool {
    match expr {
        Expr::ValueAccess(access) => access.kind == ValueAccessKind::Variable,
        Expr::MemberAccess(_) | Expr::StaticMemberAccess(_) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::pattern::Pattern;
    use bumpalo::Bump;

    fn parse<'ast>(source: &str, arena: &'ast Bump) -> (Option<Expr<'ast>>, Vec<ParserErrorKind>) {
        let mut parser = Parser::new(source, arena);
        let expr = parser.parse_expr(0);
        let errors = parser.take_errors().iter().map(|e| e.kind).collect();
        (expr, errors)
    }

    #[test]
    fn parse_literal() {
        let arena = Bump::new();
        let (expr, errors) = parse("42", &arena);
        let Some(Expr::ValueAccess(access)) = expr else {
            panic!("expected value access");
        };
        assert_eq!(access.literal(), Some(Literal::Int(42)));
        assert!(errors.is_empty());
    }

    #[test]
    fn parse_binary_precedence() {
        let arena = Bump::new();
        let (expr, _) = parse("a + b * c", &arena);
        let Some(Expr::Binary(add)) = expr else {
            panic!("expected binary");
        };
        assert_eq!(add.op, BinaryOp::Plus);
        assert!(matches!(add.right, Some(Expr::Binary(mul)) if mul.op == BinaryOp::Multiply));
    }

    #[test]
    fn assignment_is_right_associative() {
        let arena = Bump::new();
        let (expr, _) = parse("a = b = c", &arena);
        let Some(Expr::Binary(outer)) = expr else {
            panic!("expected binary");
        };
        assert_eq!(outer.left.as_variable(), Some("a"));
        assert!(matches!(outer.right, Some(Expr::Binary(inner)) if inner.op == BinaryOp::ValueAssignment));
    }

    #[test]
    fn parse_prefix_and_postfix() {
        let arena = Bump::new();
        let (expr, errors) = parse("!a?", &arena);
        let Some(Expr::Unary(not)) = expr else {
            panic!("expected unary");
        };
        assert_eq!(not.op, UnaryOp::Not);
        assert!(matches!(not.operand, Some(Expr::Unary(fall_out)) if fall_out.op == UnaryOp::FallOut));
        assert!(errors.is_empty());
    }

    #[test]
    fn parse_call_chain() {
        let arena = Bump::new();
        let (expr, errors) = parse("a.b(1, 2).c", &arena);
        let Some(Expr::MemberAccess(access)) = expr else {
            panic!("expected member access");
        };
        assert_eq!(access.member.map(|t| t.lexeme), Some("c"));
        assert!(matches!(access.owner, Expr::MethodCall(call) if call.arguments.len() == 2));
        assert!(errors.is_empty());
    }

    #[test]
    fn parse_static_access_on_generic_type() {
        let arena = Bump::new();
        let (expr, errors) = parse("Result::<int>::Ok", &arena);
        let Some(Expr::StaticMemberAccess(access)) = expr else {
            panic!("expected static member access");
        };
        let owner = access.owner.as_named().map(|t| (t.name(), t.type_arguments.len()));
        assert_eq!(owner, Some(("Result", 1)));
        assert_eq!(access.member.map(|t| t.lexeme), Some("Ok"));
        assert!(errors.is_empty());
    }

    #[test]
    fn static_access_on_expression_needs_type() {
        let arena = Bump::new();
        let (expr, errors) = parse("1::a", &arena);
        assert!(matches!(expr, Some(Expr::ValueAccess(_))));
        assert_eq!(errors, vec![ParserErrorKind::ExpectedType]);
    }

    #[test]
    fn parse_variable_declaration() {
        let arena = Bump::new();
        let (expr, errors) = parse("var mut a: int = 1 + 2", &arena);
        let Some(Expr::VariableDeclaration(decl)) = expr else {
            panic!("expected variable declaration");
        };
        assert!(decl.is_mutable);
        assert_eq!(decl.name.lexeme, "a");
        assert!(decl.ty.is_some());
        assert!(matches!(decl.value, Some(Expr::Binary(_))));
        assert!(errors.is_empty());
    }

    #[test]
    fn var_without_name() {
        let arena = Bump::new();
        let (expr, errors) = parse("var", &arena);
        assert_eq!(expr, None);
        assert_eq!(errors, vec![ParserErrorKind::ExpectedToken]);
    }

    #[test]
    fn parse_if_else_chain() {
        let arena = Bump::new();
        let (expr, errors) = parse("if (a) b else if (c) d else e", &arena);
        let Some(Expr::If(if_expr)) = expr else {
            panic!("expected if");
        };
        assert_eq!(if_expr.else_ifs.len(), 1);
        assert!(if_expr.else_body.is_some());
        assert!(errors.is_empty());
    }

    #[test]
    fn if_without_closing_paren() {
        let arena = Bump::new();
        let (expr, errors) = parse("if (a b", &arena);
        let Some(Expr::If(if_expr)) = expr else {
            panic!("expected if");
        };
        assert_eq!(if_expr.body, None);
        assert_eq!(errors, vec![ParserErrorKind::ExpectedToken]);
    }

    #[test]
    fn dangling_else() {
        let arena = Bump::new();
        let (_, errors) = parse("if (a) b else", &arena);
        assert_eq!(errors, vec![ParserErrorKind::ExpectedTokenOrExpression]);
    }

    #[test]
    fn parse_tuple_and_call() {
        let arena = Bump::new();
        let (expr, _) = parse("(a)", &arena);
        assert!(matches!(expr, Some(Expr::Tuple(t)) if t.elements.len() == 1));

        let (expr, _) = parse("f()", &arena);
        assert!(matches!(expr, Some(Expr::MethodCall(c)) if c.arguments.is_empty()));
    }

    #[test]
    fn parse_object_initializers() {
        let arena = Bump::new();
        let (expr, errors) = parse("new MyClass { a = 1, b = 2, }", &arena);
        assert!(matches!(expr, Some(Expr::ObjectInitializer(init)) if init.fields.len() == 2));
        assert!(errors.is_empty());

        let (expr, errors) = parse("new MyUnion::A { a = 1 }", &arena);
        let Some(Expr::UnionClassVariantInitializer(init)) = expr else {
            panic!("expected union class variant initializer");
        };
        assert_eq!(init.variant.lexeme, "A");
        assert_eq!(init.fields.len(), 1);
        assert!(errors.is_empty());
    }

    #[test]
    fn parse_match_arms() {
        let arena = Bump::new();
        let (expr, errors) = parse("match (a) { MyUnion::A => 1, _ => 2 }", &arena);
        let Some(Expr::Match(m)) = expr else {
            panic!("expected match");
        };
        assert_eq!(m.arms.len(), 2);
        assert!(matches!(m.arms[1].pattern, Pattern::Discard(_)));
        assert!(errors.is_empty());
    }

    #[test]
    fn matches_binds_tighter_than_and() {
        let arena = Bump::new();
        let (expr, errors) = parse("a matches int && b", &arena);
        let Some(Expr::Binary(and)) = expr else {
            panic!("expected binary");
        };
        assert_eq!(and.op, BinaryOp::BooleanAnd);
        assert!(matches!(and.left, Expr::Matches(_)));
        assert!(errors.is_empty());
    }

    #[test]
    fn operator_without_left_operand() {
        let arena = Bump::new();
        let (expr, errors) = parse("* a", &arena);
        assert_eq!(expr, None);
        assert_eq!(errors, vec![ParserErrorKind::ExpectedExpression]);
    }

    #[test]
    fn fall_out_without_operand_keeps_placeholder() {
        let arena = Bump::new();
        let (expr, errors) = parse("?", &arena);
        let Some(Expr::Unary(unary)) = expr else {
            panic!("expected unary");
        };
        assert_eq!(unary.op, UnaryOp::FallOut);
        assert_eq!(unary.operand, None);
        assert_eq!(errors, vec![ParserErrorKind::ExpectedExpression]);
    }

    #[test]
    fn turbofish_only_follows_names() {
        let arena = Bump::new();
        let (expr, errors) = parse("1::<int>", &arena);
        assert!(matches!(expr, Some(Expr::ValueAccess(access)) if access.kind == ValueAccessKind::Literal));
        assert!(errors.is_empty());

        let (expr, errors) = parse("a.b::<int>", &arena);
        assert!(matches!(expr, Some(Expr::GenericInstantiation(_))));
        assert!(errors.is_empty());
    }

    #[test]
    fn turbofish_without_value_consumes_nothing() {
        let arena = Bump::new();
        let mut parser = Parser::new("::<int>", &arena);
        assert_eq!(parser.parse_expr_tracked(0), (None, false));
        assert!(parser.check(TokenKind::Turbofish));
        assert!(parser.take_errors().is_empty());
    }

    #[test]
    fn missing_right_operand() {
        let arena = Bump::new();
        let (expr, errors) = parse("a +", &arena);
        assert!(matches!(expr, Some(Expr::Binary(b)) if b.right.is_none()));
        assert_eq!(errors, vec![ParserErrorKind::ExpectedExpression]);
    }

    #[test]
    fn stops_at_semicolon() {
        let arena = Bump::new();
        let mut parser = Parser::new("a; b", &arena);
        assert!(parser.parse_expr(0).is_some());
        assert!(parser.check(TokenKind::Semicolon));
        assert_eq!(parser.parse_expr_tracked(0), (None, false));
    }
}
