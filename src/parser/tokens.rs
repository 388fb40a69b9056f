//! Token navigation utilities for the parser.
//!
//! This module provides the low-level token operations that form the
//! foundation of the recursive descent parser:
//! - Peeking at tokens without consuming them
//! - Advancing through the token source
//! - Matching and expecting specific tokens
//! - Speculative rule application ([`Parser::attempt`])

use crate::lexer::{Token, TokenKind, TokenSource};

use super::{ParseError, ParseResult, Parser};

impl<'a, S: TokenSource> Parser<'a, S> {
    // ==================== Token Navigation ====================

    /// Returns the current token without consuming it.
    pub(super) fn peek(&self) -> &Token {
        self.tokens.peek()
    }

    /// Returns the kind of the current token.
    pub(super) fn peek_kind(&self) -> TokenKind {
        self.tokens.peek().kind
    }

    /// Consumes and returns the current token.
    pub(super) fn advance(&mut self) -> Token {
        self.tokens.consume()
    }

    /// Checks if the current token matches the expected kind.
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Consumes the current token if it matches.
    pub(super) fn match_token(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consumes the current token if it is a type keyword.
    pub(super) fn match_type(&mut self) -> Option<Token> {
        if self.peek_kind().is_type_name() {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Expects the current token to match, or returns an error.
    pub(super) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        self.match_token(kind)
            .ok_or_else(|| ParseError::at_token(kind.to_string(), self.peek()))
    }

    /// Turns a rule's "no match" into an error at the current token.
    ///
    /// Used once a rule is committed and a sub-rule is mandatory.
    pub(super) fn required<T>(
        &mut self,
        result: ParseResult<T>,
        expected: &str,
    ) -> Result<T, ParseError> {
        result?.ok_or_else(|| ParseError::at_token(expected, self.peek()))
    }

    // ==================== Speculation ====================

    /// Runs `rule` speculatively.
    ///
    /// The token position is saved first. If the rule does not match, the
    /// position is restored so the caller can try another alternative. On a
    /// match or an error the saved position is discarded.
    pub(super) fn attempt<T>(&mut self, rule: fn(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        self.tokens.push_state();
        let start = self.peek().span.start;

        match rule(self) {
            Ok(Some(node)) => {
                self.tokens.yeet_state();
                Ok(Some(node))
            }
            Ok(None) => {
                self.tokens.pop_state();
                log::trace!("no match at position {start}, rewound");
                Ok(None)
            }
            Err(err) => {
                self.tokens.yeet_state();
                Err(err)
            }
        }
    }
}
