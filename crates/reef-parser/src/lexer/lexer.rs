//! Main lexer implementation for Reef.
//!
//! The [`Lexer`] converts source text into a stream of [`Token`]s using
//! maximal munch over a small set of candidate token kinds. The first
//! character of a token selects which kinds are still plausible; each further
//! character narrows that set, and the token ends just before the character
//! that leaves no candidate alive. Keyword and punctuation kinds win over
//! identifiers when more than one kind resolves.
//!
//! The lexer copies all string content (identifiers, literals, comments) into
//! the arena, allowing the source string to be freed after lexing completes.

use bumpalo::Bump;
use reef_core::{LexError, Span};

use super::cursor::{is_ident_continue, is_ident_start, Cursor, Mark};
use super::token::{Token, TokenKind, TokenValue};

/// Most token kinds that can share a first character.
const MAX_CANDIDATES: usize = 4;

/// Lexer for Reef source code.
///
/// Produces tokens lazily through [`next_token`](Self::next_token) or the
/// [`Iterator`] impl. Comment tokens are emitted; see
/// [`significant`](super::significant) for a comment-free view.
///
/// The `'src` lifetime is the source string being lexed (temporary).
/// The `'ast` lifetime is the arena where token lexemes are allocated (persists).
pub struct Lexer<'src, 'ast> {
    /// Low-level character cursor.
    cursor: Cursor<'src>,
    /// Arena for allocating token lexemes.
    arena: &'ast Bump,
    /// Accumulated errors.
    errors: Vec<LexError>,
}

impl<'src, 'ast> Lexer<'src, 'ast> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str, arena: &'ast Bump) -> Self {
        Self {
            cursor: Cursor::new(source),
            arena,
            errors: Vec::new(),
        }
    }

    /// Take accumulated errors, leaving an empty vec.
    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    /// Check if any errors occurred.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Consume and return the next token, or `None` at end of input.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn next_token(&mut self) -> Option<Token<'ast>> {
        self.skip_whitespace();

        let first = self.cursor.peek()?;
        let start = self.cursor.mark();

        let mut live = Candidates::for_first_char(first);
        if live.is_empty() {
            self.cursor.bump();
            let span = self.cursor.span_since(start);
            log::debug!("unexpected character {first:?} at {span}");
            self.errors.push(LexError::UnexpectedChar { ch: first, span });
            return Some(self.make_error(start));
        }
        self.cursor.bump();

        while let Some(next) = self.cursor.peek() {
            let accepted = self.cursor.text_since(start);
            let narrowed = live.narrow(accepted, next);
            if narrowed.is_empty() {
                break;
            }
            live = narrowed;
            self.cursor.bump();
        }

        Some(self.resolve(&live, start))
    }

    // =========================================
    // Internal: Token scanning
    // =========================================

    /// Skip whitespace and BOM.
    fn skip_whitespace(&mut self) {
        self.cursor.eat('\u{FEFF}');
        self.cursor.skip_while(char::is_whitespace);
    }

    /// Pick the token kind for the text between `start` and the cursor.
    ///
    /// Every non-identifier candidate is tried before `Identifier`, so
    /// keywords take precedence.
    fn resolve(&mut self, live: &Candidates, start: Mark) -> Token<'ast> {
        let text = self.cursor.text_since(start);
        let span = self.cursor.span_since(start);
        let lexeme: &'ast str = self.arena.alloc_str(text);

        let keyword_first = live
            .iter()
            .filter(|kind| *kind != TokenKind::Identifier)
            .chain(live.iter().filter(|kind| *kind == TokenKind::Identifier));

        for kind in keyword_first {
            if let Some(value) = self.try_resolve(kind, lexeme) {
                return Token::with_value(kind, lexeme, span, value);
            }
        }

        log::debug!("invalid token {text:?} at {span}");
        self.errors.push(LexError::InvalidToken {
            text: text.to_string(),
            span,
        });
        Token::new(TokenKind::Error, lexeme, span)
    }

    /// Check whether `text` is exactly a token of `kind`, producing its payload.
    fn try_resolve(&self, kind: TokenKind, text: &'ast str) -> Option<TokenValue<'ast>> {
        if let Some(fixed) = kind.fixed_text() {
            return (text == fixed).then_some(TokenValue::None);
        }

        match kind {
            TokenKind::Identifier => is_valid_identifier(text).then_some(TokenValue::Str(text)),
            TokenKind::IntLiteral => text.parse::<i32>().ok().map(TokenValue::Int),
            TokenKind::StringLiteral => {
                if !is_closed_string(text) {
                    return None;
                }
                let inner = &text[1..text.len() - 1];
                Some(TokenValue::Str(self.unescape(inner)))
            }
            TokenKind::LineComment => text.strip_prefix("//").map(TokenValue::Str),
            TokenKind::BlockComment => {
                let body = text.strip_prefix("/*")?;
                // An unterminated block comment runs to end of input.
                if is_closed_block_comment(text) {
                    Some(TokenValue::Str(&body[..body.len() - 2]))
                } else {
                    Some(TokenValue::Str(body))
                }
            }
            _ => None,
        }
    }

    /// Decode escape sequences of a string literal body.
    fn unescape(&self, inner: &'ast str) -> &'ast str {
        if !inner.contains('\\') {
            return inner;
        }

        let mut out = bumpalo::collections::String::with_capacity_in(inner.len(), self.arena);
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            if ch != '\\' {
                out.push(ch);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        }
        out.into_bump_str()
    }

    /// Create an error token from start position to current position.
    fn make_error(&self, start: Mark) -> Token<'ast> {
        let lexeme = self.arena.alloc_str(self.cursor.text_since(start));
        Token::new(TokenKind::Error, lexeme, self.cursor.span_since(start))
    }

    /// The position just past the last consumed character.
    pub fn end_span(&self) -> Span {
        let mark = self.cursor.mark();
        Span::point(mark.offset, mark.line, mark.column)
    }
}

impl<'src, 'ast> Iterator for Lexer<'src, 'ast> {
    type Item = Token<'ast>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

// =========================================
// Candidate kinds
// =========================================

/// The token kinds still plausible for the text scanned so far.
#[derive(Debug, Clone, Copy)]
struct Candidates {
    kinds: [TokenKind; MAX_CANDIDATES],
    len: usize,
}

impl Candidates {
    fn empty() -> Self {
        Self {
            kinds: [TokenKind::Error; MAX_CANDIDATES],
            len: 0,
        }
    }

    fn of(kinds: &[TokenKind]) -> Self {
        let mut set = Self::empty();
        for &kind in kinds {
            set.push(kind);
        }
        set
    }

    fn push(&mut self, kind: TokenKind) {
        debug_assert!(self.len < MAX_CANDIDATES);
        self.kinds[self.len] = kind;
        self.len += 1;
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn iter(&self) -> impl Iterator<Item = TokenKind> + '_ {
        self.kinds[..self.len].iter().copied()
    }

    /// The candidates that still accept `accepted` extended by `next`.
    fn narrow(&self, accepted: &str, next: char) -> Self {
        let mut set = Self::empty();
        for kind in self.iter().filter(|kind| accepts(*kind, accepted, next)) {
            set.push(kind);
        }
        set
    }

    /// Kinds whose text can begin with `first`.
    fn for_first_char(first: char) -> Self {
        use TokenKind::*;
        match first {
            'i' => Self::of(&[If, IntKeyword, Identifier]),
            'm' => Self::of(&[Mut, Matches, Match, Identifier]),
            'p' => Self::of(&[Pub, Identifier]),
            'f' => Self::of(&[False, Fn, Field, Identifier]),
            'n' => Self::of(&[New, Identifier]),
            'v' => Self::of(&[Var, Identifier]),
            'e' => Self::of(&[Else, Identifier]),
            's' => Self::of(&[Static, StringKeyword, Identifier]),
            'r' => Self::of(&[Return, Identifier]),
            'b' => Self::of(&[Break, Boxed, BoolKeyword, Identifier]),
            'u' => Self::of(&[Union, Unboxed, Identifier]),
            't' => Self::of(&[True, Todo, Identifier]),
            'w' => Self::of(&[While, Identifier]),
            'c' => Self::of(&[Continue, Class, Identifier]),
            '_' => Self::of(&[Underscore, Identifier]),
            '!' => Self::of(&[Bang, BangEqual]),
            ':' => Self::of(&[Colon, ColonColon, Turbofish]),
            '=' => Self::of(&[Equal, EqualEqual, FatArrow]),
            '/' => Self::of(&[Slash, LineComment, BlockComment]),
            '&' => Self::of(&[AmpAmp]),
            '|' => Self::of(&[PipePipe]),
            '(' => Self::of(&[LeftParen]),
            ')' => Self::of(&[RightParen]),
            '{' => Self::of(&[LeftBrace]),
            '}' => Self::of(&[RightBrace]),
            '<' => Self::of(&[Less]),
            '>' => Self::of(&[Greater]),
            ';' => Self::of(&[Semicolon]),
            ',' => Self::of(&[Comma]),
            '.' => Self::of(&[Dot]),
            '?' => Self::of(&[Question]),
            '*' => Self::of(&[Star]),
            '+' => Self::of(&[Plus]),
            '-' => Self::of(&[Minus]),
            '"' => Self::of(&[StringLiteral]),
            c if c.is_ascii_digit() => Self::of(&[IntLiteral]),
            c if is_ident_start(c) => Self::of(&[Identifier]),
            _ => Self::empty(),
        }
    }
}

/// Whether a token of `kind` whose first characters are `accepted` may
/// continue with `next`.
fn accepts(kind: TokenKind, accepted: &str, next: char) -> bool {
    if let Some(fixed) = kind.fixed_text() {
        return fixed
            .get(accepted.len()..)
            .is_some_and(|remaining| remaining.starts_with(next));
    }

    match kind {
        TokenKind::Identifier => is_ident_continue(next),
        TokenKind::IntLiteral => next.is_ascii_digit(),
        TokenKind::StringLiteral => !is_closed_string(accepted),
        TokenKind::LineComment => {
            if accepted.len() < 2 {
                next == '/'
            } else {
                next != '\n' && next != '\r'
            }
        }
        TokenKind::BlockComment => {
            if accepted.len() < 2 {
                next == '*'
            } else {
                !is_closed_block_comment(accepted)
            }
        }
        _ => false,
    }
}

/// A string literal is closed by an unescaped quote after the opening one.
fn is_closed_string(text: &str) -> bool {
    if text.len() < 2 || !text.starts_with('"') || !text.ends_with('"') {
        return false;
    }
    let body = &text[1..text.len() - 1];
    let trailing_backslashes = body.len() - body.trim_end_matches('\\').len();
    trailing_backslashes % 2 == 0
}

fn is_closed_block_comment(text: &str) -> bool {
    text.len() >= 4 && text.starts_with("/*") && text.ends_with("*/")
}

fn is_valid_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(is_ident_start) && chars.all(is_ident_continue)
}
