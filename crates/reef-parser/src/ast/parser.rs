//! Parser infrastructure for Reef.
//!
//! Provides the main [`Parser`] struct with token navigation, error
//! reporting, the `expect_*` helpers and the shared comma-separated list
//! routine. The grammar itself lives in the `*_parser` modules.
//!
//! Grammar functions follow one convention: they are entered with the
//! current token on the first token of their construct and leave the current
//! token on the first token after it. Nothing is ever thrown; problems are
//! recorded in the error collection and parsing continues with a partial
//! node.

use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;
use reef_core::{DeclId, DeclIdGen, SourceRange, Span};

use crate::ast::{ParseErrors, ParserError, ParserErrorKind};
use crate::lexer::{significant, Lexer, Token, TokenKind};

/// The main parser for Reef source code.
///
/// The whole source is tokenized up front; comment tokens are dropped at
/// that point so grammar code never sees them. Invalid tokens are kept in
/// the buffer and turned into diagnostics when the cursor reaches them.
///
/// The `'ast` lifetime refers to the arena where AST nodes and token
/// lexemes are allocated. The source string only needs to live during
/// the call to `new()`.
pub struct Parser<'ast> {
    /// Significant tokens (lexemes allocated in arena)
    pub(super) tokens: Vec<Token<'ast>>,
    /// Index of the current token
    pub(super) position: usize,
    /// The most recently consumed token
    pub(super) previous: Option<Token<'ast>>,
    /// Accumulated parse errors
    pub(super) errors: ParseErrors<'ast>,
    /// Arena allocator for AST nodes
    pub(super) arena: &'ast Bump,
    /// Declaration id counter for this run
    pub(super) ids: DeclIdGen,
    /// Zero-length span just past the end of the source
    pub(super) eof: Span,
}

impl<'ast> Parser<'ast> {
    /// Create a new parser for the given source code.
    ///
    /// The source string is only needed during this call - all token
    /// lexemes are copied into the arena.
    pub fn new(source: &str, arena: &'ast Bump) -> Self {
        let mut lexer = Lexer::new(source, arena);
        let tokens: Vec<Token<'ast>> = significant(lexer.by_ref()).collect();
        let eof = lexer.end_span();

        let mut parser = Self {
            tokens,
            position: 0,
            previous: None,
            errors: ParseErrors::new(),
            arena,
            ids: DeclIdGen::new(),
            eof,
        };
        parser.skip_invalid();
        parser
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Take the errors, leaving an empty error collection.
    pub fn take_errors(&mut self) -> ParseErrors<'ast> {
        std::mem::take(&mut self.errors)
    }

    // ========================================================================
    // Token Navigation
    // ========================================================================

    /// The current token, or `None` at end of input.
    #[inline]
    pub fn current(&self) -> Option<Token<'ast>> {
        self.tokens.get(self.position).copied()
    }

    /// Whether a current token exists.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.position < self.tokens.len()
    }

    /// Check if the current token is of the given kind.
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current().is_some_and(|token| token.kind == kind)
    }

    /// The current token's kind.
    #[inline]
    pub fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|token| token.kind)
    }

    /// Consume the current token.
    ///
    /// Returns whether another token follows, so `if !self.advance()` reads
    /// as "ran out of input".
    pub fn advance(&mut self) -> bool {
        if let Some(token) = self.current() {
            self.previous = Some(token);
            self.position += 1;
            self.skip_invalid();
        }
        self.has_next()
    }

    /// The most recently consumed token.
    #[inline]
    pub fn previous(&self) -> Option<Token<'ast>> {
        self.previous
    }

    /// The current token, or the last consumed one at end of input.
    pub fn current_or_previous(&self) -> Option<Token<'ast>> {
        self.current().or(self.previous)
    }

    /// Report and step over invalid tokens so grammar code never sees them.
    fn skip_invalid(&mut self) {
        while let Some(token) = self.current() {
            if token.kind != TokenKind::Error {
                break;
            }
            self.report(ParserErrorKind::InvalidToken, Some(token), &[]);
            self.position += 1;
        }
    }

    // ========================================================================
    // Arena Helpers
    // ========================================================================

    /// Allocate a node in the arena.
    #[inline]
    pub(super) fn alloc<T>(&self, value: T) -> &'ast T {
        self.arena.alloc(value)
    }

    /// Start an arena-backed list.
    #[inline]
    pub(super) fn new_vec<T>(&self) -> BumpVec<'ast, T> {
        BumpVec::new_in(self.arena)
    }

    /// Hand out the next declaration id.
    pub(super) fn next_decl_id(&mut self) -> DeclId {
        self.ids.next_id()
    }

    /// A range from `start` to the most recently consumed token.
    pub(super) fn range_from(&self, start: Span) -> SourceRange {
        let end = self.previous.map_or(start, |token| token.span);
        if end.offset < start.offset {
            SourceRange::single(start)
        } else {
            SourceRange::new(start, end)
        }
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    /// Record a parse error.
    pub fn report(&mut self, kind: ParserErrorKind, found: Option<Token<'ast>>, expected: &[TokenKind]) {
        let error = ParserError::new(kind, found, expected, self.eof);
        log::debug!("parse error: {}", error);
        self.errors.push(error);
    }

    /// Record a parse error ahead of the errors reported since `mark`
    /// (a previous `errors.len()`).
    pub(super) fn report_before(&mut self, mark: usize, kind: ParserErrorKind, found: Option<Token<'ast>>, expected: &[TokenKind]) {
        let error = ParserError::new(kind, found, expected, self.eof);
        log::debug!("parse error: {}", error);
        self.errors.insert(mark, error);
    }

    pub(super) fn expected_token(&mut self, found: Option<Token<'ast>>, expected: &[TokenKind]) {
        self.report(ParserErrorKind::ExpectedToken, found, expected);
    }

    pub(super) fn expected_expression(&mut self, found: Option<Token<'ast>>) {
        self.report(ParserErrorKind::ExpectedExpression, found, &[]);
    }

    pub(super) fn expected_type(&mut self, found: Option<Token<'ast>>) {
        self.report(ParserErrorKind::ExpectedType, found, &[]);
    }

    pub(super) fn expected_pattern(&mut self, found: Option<Token<'ast>>) {
        self.report(ParserErrorKind::ExpectedPattern, found, &[]);
    }

    // ========================================================================
    // Expectations
    // ========================================================================

    /// Require the current token to be an identifier.
    ///
    /// `also_expected` is added to the reported expected set.
    pub(super) fn expect_current_identifier(&mut self, also_expected: &[TokenKind]) -> Option<Token<'ast>> {
        match self.current() {
            Some(token) if token.kind == TokenKind::Identifier => Some(token),
            found => {
                let mut expected = also_expected.to_vec();
                expected.push(TokenKind::Identifier);
                self.expected_token(found, &expected);
                None
            }
        }
    }

    /// Consume the current token and require the next one to be an
    /// identifier. The identifier itself is left current.
    pub(super) fn expect_next_identifier(&mut self) -> Option<Token<'ast>> {
        if !self.advance() {
            self.expected_token(None, &[TokenKind::Identifier]);
            return None;
        }
        self.expect_current_identifier(&[])
    }

    /// Require the current token to be of `kind`.
    pub(super) fn expect_current_token(&mut self, kind: TokenKind) -> Option<Token<'ast>> {
        match self.current() {
            Some(token) if token.kind == kind => Some(token),
            found => {
                self.expected_token(found, &[kind]);
                None
            }
        }
    }

    /// Consume the current token and require the next one to be of `kind`.
    /// The matching token is left current.
    pub(super) fn expect_next_token(&mut self, kind: TokenKind) -> Option<Token<'ast>> {
        self.advance();
        self.expect_current_token(kind)
    }

    // ========================================================================
    // List Parsing
    // ========================================================================

    /// Parse a comma-separated list closed by `terminator`.
    ///
    /// Entered on the opening token. `item` is called on the first token of
    /// each element. Trailing commas are accepted, every surplus comma is
    /// reported once, and a missing comma between two elements is reported
    /// without abandoning the list. Leaves the current token after the
    /// terminator and returns the elements plus the terminator (or the last
    /// token seen when input ran out).
    pub(super) fn comma_separated_list<T>(
        &mut self,
        terminator: TokenKind,
        expectation: ListItem,
        mut item: impl FnMut(&mut Self) -> Option<T>,
    ) -> (BumpVec<'ast, T>, Option<Token<'ast>>) {
        let mut items = self.new_vec();

        if !self.advance() {
            self.list_error(None, terminator, expectation, true);
            return (items, None);
        }

        loop {
            if self.check(terminator) {
                break;
            }

            if !items.is_empty() {
                if !self.check(TokenKind::Comma) {
                    let found = self.current();
                    self.expected_token(found, &[TokenKind::Comma, terminator]);
                } else if !self.advance() {
                    self.list_error(None, terminator, expectation, true);
                    break;
                }
            }

            while let Some(comma) = self.current().filter(|token| token.kind == TokenKind::Comma) {
                self.list_error(Some(comma), terminator, expectation, true);
                self.advance();
            }

            if !self.has_next() {
                self.list_error(None, terminator, expectation, true);
                break;
            }

            if self.check(terminator) {
                break;
            }

            let before = self.position;
            let next = item(self);
            let found_item = next.is_some();
            if let Some(next) = next {
                items.push(next);
            } else if self.position == before {
                // the element parser rejected the token without consuming it
                self.advance();
            }

            if !self.has_next() {
                if found_item {
                    self.expected_token(None, &[TokenKind::Comma, terminator]);
                } else {
                    self.expected_token(None, &[terminator]);
                }
                break;
            }
        }

        let last = self.current_or_previous();
        self.advance();

        (items, last)
    }

    fn list_error(&mut self, found: Option<Token<'ast>>, terminator: TokenKind, expectation: ListItem, with_terminator: bool) {
        match expectation {
            ListItem::Tokens(expected) => {
                let mut expected = expected.to_vec();
                if with_terminator {
                    expected.push(terminator);
                }
                self.expected_token(found, &expected);
            }
            ListItem::Expression if with_terminator => {
                self.report(ParserErrorKind::ExpectedTokenOrExpression, found, &[terminator]);
            }
            ListItem::Expression => self.expected_expression(found),
            ListItem::Type if with_terminator => {
                self.report(ParserErrorKind::ExpectedTypeOrToken, found, &[terminator]);
            }
            ListItem::Type => self.expected_type(found),
            ListItem::Pattern if with_terminator => {
                self.report(ParserErrorKind::ExpectedPatternOrToken, found, &[terminator]);
            }
            ListItem::Pattern => self.expected_pattern(found),
        }
    }
}

/// What a comma-separated list holds, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ListItem {
    /// Elements starting with one of these tokens.
    Tokens(&'static [TokenKind]),
    Expression,
    Type,
    Pattern,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_creation() {
        let arena = Bump::new();
        let parser = Parser::new("var x = 42;", &arena);
        assert_eq!(parser.current_kind(), Some(TokenKind::Var));
        assert!(!parser.has_errors());
    }

    #[test]
    fn token_navigation() {
        let arena = Bump::new();
        let mut parser = Parser::new("a b", &arena);

        assert!(parser.check(TokenKind::Identifier));
        assert!(parser.advance());
        assert_eq!(parser.previous().map(|t| t.lexeme), Some("a"));
        assert_eq!(parser.current().map(|t| t.lexeme), Some("b"));

        assert!(!parser.advance());
        assert_eq!(parser.current(), None);
        assert_eq!(parser.current_or_previous().map(|t| t.lexeme), Some("b"));

        // advancing past the end is harmless
        assert!(!parser.advance());
    }

    #[test]
    fn comments_are_skipped() {
        let arena = Bump::new();
        let mut parser = Parser::new("// note\na /* inner */ b", &arena);

        assert_eq!(parser.current().map(|t| t.lexeme), Some("a"));
        parser.advance();
        assert_eq!(parser.current().map(|t| t.lexeme), Some("b"));
    }

    #[test]
    fn invalid_tokens_become_errors() {
        let arena = Bump::new();
        let mut parser = Parser::new("a $ b", &arena);

        parser.advance();
        assert_eq!(parser.current().map(|t| t.lexeme), Some("b"));

        let errors = parser.take_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].kind, ParserErrorKind::InvalidToken);
        assert!(!parser.has_errors());
    }

    #[test]
    fn expect_next_token_reports_found_token() {
        let arena = Bump::new();
        let mut parser = Parser::new("if ;", &arena);

        assert_eq!(parser.expect_next_token(TokenKind::LeftParen), None);
        let errors = parser.take_errors();
        let error = &errors.errors()[0];
        assert_eq!(error.kind, ParserErrorKind::ExpectedToken);
        assert_eq!(error.found_kind(), Some(TokenKind::Semicolon));
        assert_eq!(error.expected, vec![TokenKind::LeftParen]);
    }

    #[test]
    fn expect_next_identifier_at_end_of_input() {
        let arena = Bump::new();
        let mut parser = Parser::new("fn", &arena);

        assert_eq!(parser.expect_next_identifier(), None);
        let errors = parser.take_errors();
        assert!(errors.errors()[0].at_end_of_input());
        assert_eq!(errors.errors()[0].span, Span::point(2, 1, 3));
    }

    #[test]
    fn comma_list_accepts_trailing_comma() {
        let arena = Bump::new();
        let mut parser = Parser::new("<A, B,> rest", &arena);

        let (items, last) = parser.comma_separated_list(TokenKind::Greater, ListItem::Tokens(&[TokenKind::Identifier]), |p| {
            let name = p.expect_current_identifier(&[]);
            p.advance();
            name.map(|t| t.lexeme)
        });

        assert_eq!(items.as_slice(), &["A", "B"]);
        assert_eq!(last.map(|t| t.kind), Some(TokenKind::Greater));
        assert_eq!(parser.current().map(|t| t.lexeme), Some("rest"));
        assert!(!parser.has_errors());
    }

    #[test]
    fn comma_list_reports_surplus_and_missing_commas() {
        let arena = Bump::new();
        let mut parser = Parser::new("(A,, B C)", &arena);

        let (items, _) = parser.comma_separated_list(TokenKind::RightParen, ListItem::Tokens(&[TokenKind::Identifier]), |p| {
            let name = p.expect_current_identifier(&[]);
            p.advance();
            name.map(|t| t.lexeme)
        });

        assert_eq!(items.as_slice(), &["A", "B", "C"]);
        let errors = parser.take_errors();
        let found: Vec<_> = errors.iter().map(|e| e.found_kind()).collect();
        assert_eq!(found, vec![Some(TokenKind::Comma), Some(TokenKind::Identifier)]);
        assert_eq!(errors.errors()[1].expected, vec![TokenKind::RightParen, TokenKind::Comma]);
    }

    #[test]
    fn comma_list_never_stalls() {
        let arena = Bump::new();
        let mut parser = Parser::new("(; ;)", &arena);

        let (items, last) = parser.comma_separated_list(TokenKind::RightParen, ListItem::Expression, |p| {
            p.expect_current_identifier(&[])
        });

        assert!(items.is_empty());
        assert_eq!(last.map(|t| t.kind), Some(TokenKind::RightParen));
        assert!(!parser.has_next());
    }
}
