//! The pull interface between the lexer and the parser.
//!
//! The parser never sees a `Vec<Token>`; it reads through [`TokenSource`],
//! which also lets it save and restore its position while it tries the
//! alternatives of a grammar rule:
//!
//! - [`push_state`](TokenSource::push_state) saves the current position
//! - [`pop_state`](TokenSource::pop_state) rewinds to the last saved position
//! - [`yeet_state`](TokenSource::yeet_state) forgets the last saved position
//!   and keeps the current one
//!
//! Every push must be matched by exactly one pop or yeet.

use super::{Lexer, Token};

/// A peekable token source that supports speculative reads.
pub trait TokenSource {
    /// The current token, without consuming it.
    ///
    /// At the end of input this is the end-of-input token, forever.
    fn peek(&self) -> &Token;

    /// Returns the current token and advances past it.
    fn consume(&mut self) -> Token;

    /// Saves the current position on the mark stack.
    fn push_state(&mut self);

    /// Rewinds to the most recently saved position and drops that mark.
    fn pop_state(&mut self);

    /// Drops the most recently saved position without rewinding.
    fn yeet_state(&mut self);

    /// Number of saved positions not yet popped or yeeted.
    fn pending_states(&self) -> usize;
}

/// A [`TokenSource`] over an eagerly tokenized buffer.
///
/// ```
/// use clite::lexer::{TokenKind, TokenSource, TokenStream};
///
/// let mut tokens = TokenStream::new("a = 1;");
/// tokens.push_state();
/// assert_eq!(tokens.consume().kind, TokenKind::Identifier);
/// tokens.pop_state();
/// assert_eq!(tokens.peek().text, "a");
/// ```
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    eof: Token,
    cursor: usize,
    marks: Vec<usize>,
}

impl TokenStream {
    /// Tokenizes `source` completely.
    pub fn new(source: &str) -> Self {
        let tokens = Lexer::new(source).collect_tokens();
        Self {
            tokens,
            eof: Token::eof(source.len()),
            cursor: 0,
            marks: Vec::new(),
        }
    }
}

impl TokenSource for TokenStream {
    fn peek(&self) -> &Token {
        self.tokens.get(self.cursor).unwrap_or(&self.eof)
    }

    fn consume(&mut self) -> Token {
        let token = self.peek().clone();
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
        token
    }

    fn push_state(&mut self) {
        self.marks.push(self.cursor);
    }

    fn pop_state(&mut self) {
        match self.marks.pop() {
            Some(mark) => self.cursor = mark,
            None => log::error!("pop_state called with an empty mark stack"),
        }
    }

    fn yeet_state(&mut self) {
        if self.marks.pop().is_none() {
            log::error!("yeet_state called with an empty mark stack");
        }
    }

    fn pending_states(&self) -> usize {
        self.marks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    #[test]
    fn test_peek_does_not_consume() {
        let tokens = TokenStream::new("int a;");
        assert_eq!(tokens.peek().kind, TokenKind::Int);
        assert_eq!(tokens.peek().kind, TokenKind::Int);
    }

    #[test]
    fn test_eof_repeats() {
        let mut tokens = TokenStream::new("x");
        assert_eq!(tokens.consume().kind, TokenKind::Identifier);
        assert_eq!(tokens.consume().kind, TokenKind::Eof);
        assert_eq!(tokens.consume().kind, TokenKind::Eof);
        assert_eq!(tokens.peek().span.start, 1);
    }

    #[test]
    fn test_pop_rewinds() {
        let mut tokens = TokenStream::new("a b c");
        tokens.consume();
        tokens.push_state();
        tokens.consume();
        tokens.consume();
        tokens.pop_state();
        assert_eq!(tokens.peek().text, "b");
        assert_eq!(tokens.pending_states(), 0);
    }

    #[test]
    fn test_yeet_keeps_position() {
        let mut tokens = TokenStream::new("a b c");
        tokens.push_state();
        tokens.consume();
        tokens.yeet_state();
        assert_eq!(tokens.peek().text, "b");
        assert_eq!(tokens.pending_states(), 0);
    }

    #[test]
    fn test_nested_marks() {
        let mut tokens = TokenStream::new("a b c d");
        tokens.push_state();
        tokens.consume();
        tokens.push_state();
        tokens.consume();
        tokens.pop_state();
        assert_eq!(tokens.peek().text, "b");
        assert_eq!(tokens.pending_states(), 1);
        tokens.pop_state();
        assert_eq!(tokens.peek().text, "a");
    }

    #[test]
    fn test_unbalanced_pop_is_ignored() {
        let mut tokens = TokenStream::new("a b");
        tokens.consume();
        tokens.pop_state();
        assert_eq!(tokens.peek().text, "b");
    }
}
