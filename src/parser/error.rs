//! Parser error types.
//!
//! Parse errors capture what went wrong and where. The parser stops at the
//! first error: once a grammar rule has recognized its leading tokens, a
//! missing token later in the rule cannot be fixed by trying another rule.

use crate::ast::Span;
use crate::lexer::{Token, TokenKind};
use thiserror::Error;

/// A parse error with location and description.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// Expected a specific token but found something else.
    #[error("unexpected {found} at position {}, expected {expected}", .span.start)]
    UnexpectedToken {
        /// What we expected to find.
        expected: String,
        /// What we actually found.
        found: String,
        /// Location of the unexpected token.
        span: Span,
    },

    /// Reached end of input unexpectedly.
    #[error("unexpected end of input at position {}, expected {expected}", .span.start)]
    UnexpectedEof {
        /// What we expected to find.
        expected: String,
        /// The empty span at the end of the source.
        span: Span,
    },
}

impl ParseError {
    /// Returns the span of this error.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::UnexpectedEof { span, .. } => *span,
        }
    }

    /// Creates an "unexpected token" error.
    pub fn unexpected(expected: impl Into<String>, found: impl Into<String>, span: Span) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    /// Creates an "unexpected end of input" error.
    pub fn eof(expected: impl Into<String>, span: Span) -> Self {
        ParseError::UnexpectedEof {
            expected: expected.into(),
            span,
        }
    }

    /// Creates the right error for finding `token` where `expected` should be.
    pub fn at_token(expected: impl Into<String>, token: &Token) -> Self {
        match token.kind {
            TokenKind::Eof => Self::eof(expected, token.span),
            TokenKind::Identifier
            | TokenKind::BoolLiteral
            | TokenKind::IntLiteral
            | TokenKind::FloatLiteral
            | TokenKind::StringLiteral
            | TokenKind::Invalid => Self::unexpected(
                expected,
                format!("{} `{}`", token.kind, token.text),
                token.span,
            ),
            kind => Self::unexpected(expected, kind.to_string(), token.span),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_span() {
        let err = ParseError::unexpected("`)`", "`;`", Span::new(10, 11));
        assert_eq!(err.span(), Span::new(10, 11));
    }

    #[test]
    fn test_message_names_position() {
        let err = ParseError::unexpected("`)`", "`;`", Span::new(10, 11));
        assert_eq!(err.to_string(), "unexpected `;` at position 10, expected `)`");
    }

    #[test]
    fn test_eof_error() {
        let token = Token::eof(7);
        let err = ParseError::at_token("expression", &token);
        assert_eq!(err.span(), Span::new(7, 7));
        assert!(err.to_string().contains("end of input"));
    }

    #[test]
    fn test_found_includes_text() {
        let token = Token::new(TokenKind::Invalid, 3..4, "#");
        let err = ParseError::at_token("statement", &token);
        assert_eq!(
            err.to_string(),
            "unexpected invalid input `#` at position 3, expected statement"
        );
    }
}
