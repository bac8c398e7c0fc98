//! Comment-free view of a token stream.

use super::token::Token;

/// Iterator adaptor that drops comment tokens.
///
/// Created by [`significant`]. Holds no state beyond the wrapped iterator.
#[derive(Debug, Clone)]
pub struct SignificantTokens<I> {
    inner: I,
}

impl<'ast, I> Iterator for SignificantTokens<I>
where
    I: Iterator<Item = Token<'ast>>,
{
    type Item = Token<'ast>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find(|token| !token.is_comment())
    }
}

impl<I> SignificantTokens<I> {
    /// Access the wrapped iterator.
    pub fn inner(&self) -> &I {
        &self.inner
    }

    /// Mutably access the wrapped iterator.
    pub fn inner_mut(&mut self) -> &mut I {
        &mut self.inner
    }
}

/// Wrap a token stream so comment tokens are skipped.
pub fn significant<'ast, I>(tokens: I) -> SignificantTokens<I::IntoIter>
where
    I: IntoIterator<Item = Token<'ast>>,
{
    SignificantTokens {
        inner: tokens.into_iter(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Lexer, TokenKind};
    use bumpalo::Bump;

    #[test]
    fn comments_are_dropped() {
        let arena = Bump::new();
        let kinds: Vec<_> = significant(Lexer::new("a /* x */ + // y\n b", &arena))
            .map(|t| t.kind)
            .collect();
        assert_eq!(kinds, vec![TokenKind::Identifier, TokenKind::Plus, TokenKind::Identifier]);
    }

    #[test]
    fn only_comments() {
        let arena = Bump::new();
        assert_eq!(significant(Lexer::new("// a\n/* b */", &arena)).count(), 0);
    }

    #[test]
    fn inner_lexer_still_reachable() {
        let arena = Bump::new();
        let mut tokens = significant(Lexer::new("@", &arena));
        assert_eq!(tokens.next().map(|t| t.kind), Some(TokenKind::Error));
        assert!(tokens.inner_mut().has_errors());
    }
}
