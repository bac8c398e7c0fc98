//! Token types and definitions for the Reef lexer.

use reef_core::Span;
use std::fmt;

/// A token from the source code.
///
/// The `'ast` lifetime refers to the arena where the lexeme and payload
/// strings are allocated. This allows the source string to be freed after
/// lexing, since all string content is copied into the arena.
#[derive(Clone, Copy, PartialEq)]
pub struct Token<'ast> {
    /// The type of token.
    pub kind: TokenKind,
    /// The source text of this token (allocated in arena).
    pub lexeme: &'ast str,
    /// Location in source.
    pub span: Span,
    /// Decoded payload for identifiers, literals and comments.
    pub value: TokenValue<'ast>,
}

impl<'ast> Token<'ast> {
    /// Create a new token without a payload.
    #[inline]
    pub fn new(kind: TokenKind, lexeme: &'ast str, span: Span) -> Self {
        Self {
            kind,
            lexeme,
            span,
            value: TokenValue::None,
        }
    }

    /// Create a new token carrying a payload.
    #[inline]
    pub fn with_value(kind: TokenKind, lexeme: &'ast str, span: Span, value: TokenValue<'ast>) -> Self {
        Self {
            kind,
            lexeme,
            span,
            value,
        }
    }

    /// The string payload: an identifier name, the unescaped contents of a
    /// string literal, or the body of a comment.
    pub fn text(&self) -> Option<&'ast str> {
        match self.value {
            TokenValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The value of an integer literal.
    pub fn int_value(&self) -> Option<i32> {
        match self.value {
            TokenValue::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Whether this token is a comment.
    #[inline]
    pub fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?} @ {:?})", self.kind, self.lexeme, self.span)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::IntLiteral => write!(f, "integer literal {}", self.lexeme),
            TokenKind::StringLiteral => write!(f, "string literal {}", self.lexeme),
            kind => write!(f, "{}", kind.description()),
        }
    }
}

/// The decoded payload of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenValue<'ast> {
    #[default]
    None,
    Str(&'ast str),
    Int(i32),
}

/// All token types in Reef.
///
/// The derived ordering is used to keep expected-token lists in
/// diagnostics sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    // =========================================
    // Literals
    // =========================================
    /// Integer literal: `42`
    IntLiteral,
    /// String literal: `"hello"`
    StringLiteral,

    // =========================================
    // Identifiers
    // =========================================
    /// User-defined identifier
    Identifier,

    // =========================================
    // Keywords - Types
    // =========================================
    /// `int`
    IntKeyword,
    /// `string`
    StringKeyword,
    /// `bool`
    BoolKeyword,
    /// `boxed`
    Boxed,
    /// `unboxed`
    Unboxed,

    // =========================================
    // Keywords - Values
    // =========================================
    /// `true`
    True,
    /// `false`
    False,
    /// `todo!`
    Todo,

    // =========================================
    // Keywords - Declarations
    // =========================================
    /// `pub`
    Pub,
    /// `mut`
    Mut,
    /// `static`
    Static,
    /// `fn`
    Fn,
    /// `var`
    Var,
    /// `class`
    Class,
    /// `union`
    Union,
    /// `field`
    Field,

    // =========================================
    // Keywords - Control flow
    // =========================================
    /// `if`
    If,
    /// `else`
    Else,
    /// `while`
    While,
    /// `break`
    Break,
    /// `continue`
    Continue,
    /// `return`
    Return,
    /// `new`
    New,
    /// `match`
    Match,
    /// `matches`
    Matches,

    // =========================================
    // Delimiters
    // =========================================
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `;`
    Semicolon,
    /// `,`
    Comma,

    // =========================================
    // Operators
    // =========================================
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `<`, also opens type parameter lists
    Less,
    /// `>`, also closes type parameter and argument lists
    Greater,
    /// `=`
    Equal,
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `!`
    Bang,
    /// `&&`
    AmpAmp,
    /// `||`
    PipePipe,
    /// `?`
    Question,
    /// `.`
    Dot,
    /// `:`
    Colon,
    /// `::`
    ColonColon,
    /// `::<`
    Turbofish,
    /// `=>`
    FatArrow,
    /// `_`
    Underscore,

    // =========================================
    // Trivia
    // =========================================
    /// `// ...`
    LineComment,
    /// `/* ... */`
    BlockComment,

    // =========================================
    // Special
    // =========================================
    /// Lexer error (unrecognized input)
    Error,
}

impl TokenKind {
    /// The exact source text of keyword and punctuation kinds.
    pub fn fixed_text(self) -> Option<&'static str> {
        use TokenKind::*;
        let text = match self {
            IntKeyword => "int",
            StringKeyword => "string",
            BoolKeyword => "bool",
            Boxed => "boxed",
            Unboxed => "unboxed",
            True => "true",
            False => "false",
            Todo => "todo!",
            Pub => "pub",
            Mut => "mut",
            Static => "static",
            Fn => "fn",
            Var => "var",
            Class => "class",
            Union => "union",
            Field => "field",
            If => "if",
            Else => "else",
            While => "while",
            Break => "break",
            Continue => "continue",
            Return => "return",
            New => "new",
            Match => "match",
            Matches => "matches",
            LeftParen => "(",
            RightParen => ")",
            LeftBrace => "{",
            RightBrace => "}",
            Semicolon => ";",
            Comma => ",",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Less => "<",
            Greater => ">",
            Equal => "=",
            EqualEqual => "==",
            BangEqual => "!=",
            Bang => "!",
            AmpAmp => "&&",
            PipePipe => "||",
            Question => "?",
            Dot => ".",
            Colon => ":",
            ColonColon => "::",
            Turbofish => "::<",
            FatArrow => "=>",
            Underscore => "_",
            IntLiteral | StringLiteral | Identifier | LineComment | BlockComment | Error => {
                return None;
            }
        };
        Some(text)
    }

    /// Check if this token kind is a keyword.
    pub fn is_keyword(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            IntKeyword
                | StringKeyword
                | BoolKeyword
                | Boxed
                | Unboxed
                | True
                | False
                | Todo
                | Pub
                | Mut
                | Static
                | Fn
                | Var
                | Class
                | Union
                | Field
                | If
                | Else
                | While
                | Break
                | Continue
                | Return
                | New
                | Match
                | Matches
        )
    }

    /// Check if this token kind is a literal.
    pub fn is_literal(self) -> bool {
        use TokenKind::*;
        matches!(self, IntLiteral | StringLiteral | True | False)
    }

    /// Check if this token kind names a built-in type.
    pub fn is_type_keyword(self) -> bool {
        use TokenKind::*;
        matches!(self, IntKeyword | StringKeyword | BoolKeyword)
    }

    /// Check if this token kind is a member modifier.
    pub fn is_modifier(self) -> bool {
        use TokenKind::*;
        matches!(self, Pub | Mut | Static)
    }

    /// Check if this token kind is a comment.
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Get the string representation of this token kind for error messages.
    pub fn description(self) -> &'static str {
        use TokenKind::*;
        match self {
            IntLiteral => "integer literal",
            StringLiteral => "string literal",
            Identifier => "identifier",
            IntKeyword => "'int'",
            StringKeyword => "'string'",
            BoolKeyword => "'bool'",
            Boxed => "'boxed'",
            Unboxed => "'unboxed'",
            True => "'true'",
            False => "'false'",
            Todo => "'todo!'",
            Pub => "'pub'",
            Mut => "'mut'",
            Static => "'static'",
            Fn => "'fn'",
            Var => "'var'",
            Class => "'class'",
            Union => "'union'",
            Field => "'field'",
            If => "'if'",
            Else => "'else'",
            While => "'while'",
            Break => "'break'",
            Continue => "'continue'",
            Return => "'return'",
            New => "'new'",
            Match => "'match'",
            Matches => "'matches'",
            LeftParen => "'('",
            RightParen => "')'",
            LeftBrace => "'{'",
            RightBrace => "'}'",
            Semicolon => "';'",
            Comma => "','",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            Less => "'<'",
            Greater => "'>'",
            Equal => "'='",
            EqualEqual => "'=='",
            BangEqual => "'!='",
            Bang => "'!'",
            AmpAmp => "'&&'",
            PipePipe => "'||'",
            Question => "'?'",
            Dot => "'.'",
            Colon => "':'",
            ColonColon => "'::'",
            Turbofish => "'::<'",
            FatArrow => "'=>'",
            Underscore => "'_'",
            LineComment => "line comment",
            BlockComment => "block comment",
            Error => "invalid token",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
