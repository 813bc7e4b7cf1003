//! Read-only cursor over a token slice

use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};

/// Cursor that walks a token slice front to back without mutating it
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    position: usize,
}

impl<'a> TokenCursor<'a> {
    /// Create a cursor at the start of `tokens`
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Token at the cursor, `None` at end of input
    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    /// Return the token at the cursor and move past it
    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// Current position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check if every token has been consumed
    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Check if the token at the cursor is of the given kind
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind() == kind)
    }

    /// Consume a token of the given kind or fail without moving
    pub fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        match self.peek() {
            Some(token) if token.kind() == kind => {
                self.position += 1;
                Ok(token)
            }
            _ => Err(self.unexpected(kind)),
        }
    }

    /// Consume a token of the given kind if present
    pub fn accept(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Build the error for the token at the cursor
    pub fn unexpected(&self, expected: TokenKind) -> ParseError {
        ParseError::UnexpectedToken {
            position: self.position,
            expected,
            found: self.peek().map(Token::kind),
        }
    }
}
