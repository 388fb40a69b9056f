//! Lexical analysis for clite.
//!
//! This module converts source text into a stream of [`Token`]s and exposes
//! the pull interface the parser consumes ([`TokenSource`]).
//! It handles:
//!
//! - Keyword and primitive type recognition
//! - Bool, int, float and string literals
//! - One- and two-character operators
//! - `//` line comments
//!
//! ## Example
//!
//! ```
//! use clite::lexer::Lexer;
//!
//! let source = r#"string s = "Hello";"#;
//! let mut lexer = Lexer::new(source);
//!
//! while let Some(token) = lexer.next_token() {
//!     println!("{}: {:?}", token.text, token.kind);
//! }
//! ```
//!
//! ## Design Notes
//!
//! The lexer is built on the [`logos`](https://docs.rs/logos) crate, which
//! generates a fast DFA-based lexer from our token definitions.
//!
//! We wrap logos in our own [`Lexer`] struct to provide:
//!
//! - A cleaner iterator interface
//! - Token position tracking
//! - [`TokenKind::Invalid`] tokens for input no pattern accepts, so the
//!   parser reports them at the right position instead of silently skipping

mod stream;
mod token;

pub use stream::{TokenSource, TokenStream};
pub use token::{Token, TokenKind};

use logos::Logos;

/// The lexer for clite source code.
///
/// Wraps a `logos` lexer and provides a convenient iterator interface
/// that yields [`Token`]s with their source positions.
///
/// ## Example
///
/// ```
/// use clite::lexer::{Lexer, TokenKind};
///
/// let lexer = Lexer::new("int x");
/// let tokens: Vec<_> = lexer.collect();
///
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[0].kind, TokenKind::Int);
/// assert_eq!(tokens[1].kind, TokenKind::Identifier);
/// assert_eq!(tokens[1].text, "x");
/// ```
pub struct Lexer<'source> {
    /// The underlying logos lexer
    inner: logos::Lexer<'source, TokenKind>,
    /// The original source (for error reporting)
    source: &'source str,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'source str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            source,
        }
    }

    /// Get the original source code.
    pub fn source(&self) -> &'source str {
        self.source
    }

    /// Get the next token, if any.
    ///
    /// Returns `None` when the end of input is reached. Unrecognized
    /// characters come back as a single [`TokenKind::Invalid`] token each.
    ///
    /// # Example
    ///
    /// ```
    /// use clite::lexer::{Lexer, TokenKind};
    ///
    /// let mut lexer = Lexer::new("while");
    ///
    /// let token = lexer.next_token().unwrap();
    /// assert_eq!(token.kind, TokenKind::While);
    ///
    /// assert!(lexer.next_token().is_none());
    /// ```
    pub fn next_token(&mut self) -> Option<Token> {
        let kind = self.inner.next()?;
        let span = self.inner.span();
        let text = self.inner.slice().to_string();

        match kind {
            Ok(kind) => Some(Token::new(kind, span, text)),
            Err(()) => {
                log::debug!("unrecognized input {:?} at {}", text, span.start);
                Some(Token::new(TokenKind::Invalid, span, text))
            }
        }
    }

    /// Collect all remaining tokens into a vector.
    ///
    /// This consumes the lexer.
    pub fn collect_tokens(self) -> Vec<Token> {
        self.collect()
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Convenience function to lex source code directly.
///
/// The returned vector does not include an end-of-input token.
///
/// # Example
///
/// ```
/// use clite::lexer::{lex, TokenKind};
///
/// let tokens = lex("return 42;");
/// assert_eq!(tokens[0].kind, TokenKind::Return);
/// assert_eq!(tokens.len(), 3);
/// ```
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect_tokens()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Span;

    #[test]
    fn test_lexer_iterator() {
        let tokens: Vec<_> = Lexer::new("int a;").collect();
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_token_spans() {
        let tokens = lex("return 42");

        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[0].text, "return");

        assert_eq!(tokens[1].span, Span::new(7, 9));
        assert_eq!(tokens[1].text, "42");
    }

    #[test]
    fn test_string_literal_keeps_quotes() {
        let tokens = lex(r#"string s = "Hello, World!";"#);
        assert_eq!(tokens[3].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[3].text, r#""Hello, World!""#);
    }

    #[test]
    fn test_invalid_input_becomes_token() {
        let tokens = lex("a # b");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Identifier, TokenKind::Invalid, TokenKind::Identifier]
        );
        assert_eq!(tokens[1].span, Span::new(2, 3));
    }

    #[test]
    fn test_complex_expression() {
        let source = "result = (a + b) * 2 / 3.14;";
        let tokens = lex(source);
        let kinds: Vec<_> = tokens.iter().map(|t| &t.kind).collect();

        assert_eq!(
            kinds,
            vec![
                &TokenKind::Identifier,   // result
                &TokenKind::Assign,       // =
                &TokenKind::LeftParen,    // (
                &TokenKind::Identifier,   // a
                &TokenKind::Plus,         // +
                &TokenKind::Identifier,   // b
                &TokenKind::RightParen,   // )
                &TokenKind::Star,         // *
                &TokenKind::IntLiteral,   // 2
                &TokenKind::Slash,        // /
                &TokenKind::FloatLiteral, // 3.14
                &TokenKind::Semicolon,    // ;
            ]
        );
    }
}
