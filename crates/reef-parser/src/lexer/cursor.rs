//! Character cursor used by the lexer.

use reef_core::Span;

/// Walks the source one character at a time, keeping the byte offset and
/// the 1-based line and column of the next unread character.
pub struct Cursor<'src> {
    source: &'src str,
    /// Unread tail of `source`.
    rest: &'src str,
    pos: Mark,
}

/// A position in the source. Columns count bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            pos: Mark {
                offset: 0,
                line: 1,
                column: 1,
            },
        }
    }

    /// Position of the next unread character.
    #[inline]
    pub fn mark(&self) -> Mark {
        self.pos
    }

    /// The next unread character.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        match *self.rest.as_bytes().first()? {
            ascii if ascii.is_ascii() => Some(ascii as char),
            _ => self.rest.chars().next(),
        }
    }

    /// Consume one character. A newline moves to column 1 of the next line.
    #[inline]
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        let width = ch.len_utf8() as u32;
        self.rest = &self.rest[ch.len_utf8()..];
        self.pos.offset += width;
        if ch == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += width;
        }
        Some(ch)
    }

    /// Consume `ch` if it is next.
    #[inline]
    pub fn eat(&mut self, ch: char) -> bool {
        let matched = self.peek() == Some(ch);
        if matched {
            self.bump();
        }
        matched
    }

    /// Consume characters for as long as `pred` holds.
    pub fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
    }

    /// Source text consumed since `start`.
    #[inline]
    pub fn text_since(&self, start: Mark) -> &'src str {
        &self.source[start.offset as usize..self.pos.offset as usize]
    }

    /// Span covering the text consumed since `start`.
    #[inline]
    pub fn span_since(&self, start: Mark) -> Span {
        Span::new(start.offset, self.pos.offset - start.offset, start.line, start.column)
    }
}

#[inline]
pub fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

#[inline]
pub fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_tracks_byte_columns() {
        let mut cursor = Cursor::new("xé\ny");
        cursor.bump();
        cursor.bump();
        assert_eq!(cursor.mark(), Mark { offset: 3, line: 1, column: 4 });

        cursor.bump();
        assert_eq!(cursor.mark(), Mark { offset: 4, line: 2, column: 1 });
        assert_eq!(cursor.bump(), Some('y'));
        assert_eq!(cursor.bump(), None);
    }

    #[test]
    fn eat_only_matching() {
        let mut cursor = Cursor::new("=>");
        assert!(!cursor.eat('>'));
        assert!(cursor.eat('='));
        assert_eq!(cursor.peek(), Some('>'));
    }

    #[test]
    fn text_and_span_since_mark() {
        let mut cursor = Cursor::new("  abc;");
        cursor.skip_while(char::is_whitespace);
        let start = cursor.mark();
        cursor.skip_while(is_ident_continue);

        assert_eq!(cursor.text_since(start), "abc");
        assert_eq!(cursor.span_since(start), Span::new(2, 3, 1, 3));
    }

    #[test]
    fn identifier_characters() {
        assert!(is_ident_start('_'));
        assert!(is_ident_start('é'));
        assert!(!is_ident_start('7'));
        assert!(is_ident_continue('7'));
        assert!(!is_ident_continue('!'));
    }
}
