//! Sequential reader over a token list with one token of lookahead.

use crate::token::{Token, TokenKind};

#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// The current (lookahead) token, `None` past the end.
    #[inline]
    pub fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    /// True when the current token has the given kind.
    #[inline]
    pub fn at(&self, kind: TokenKind) -> bool {
        self.current().is_some_and(|t| t.kind == kind)
    }

    /// Step past the current token, returning it.
    pub fn advance(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied()?;
        self.pos += 1;
        Some(token)
    }

    /// Consume the current token only if it has the given kind.
    pub fn advance_if(&mut self, kind: TokenKind) -> Option<Token<'a>> {
        if self.at(kind) {
            self.advance()
        } else {
            None
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Tokens not yet consumed.
    pub fn remaining(&self) -> &[Token<'a>] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }
}
