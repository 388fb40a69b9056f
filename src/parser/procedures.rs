//! Function declaration parsing.
//!
//! ```text
//! funcDecl := (type | 'void') IDENT '(' params? ')' statement
//! params   := type IDENT (',' type IDENT)*
//! ```
//!
//! The rule only commits once it has seen `IDENT '('`; before that it
//! rewinds, so `int x;` is left to the variable declaration rule.

use crate::ast::{FunctionDecl, Parameter, Statement, StatementKind};
use crate::lexer::{TokenKind, TokenSource};

use super::{ParseError, ParseResult, Parser};

impl<'a, S: TokenSource> Parser<'a, S> {
    // ==================== Function Declarations ====================

    /// Parses a function declaration.
    pub(super) fn parse_function_declaration(&mut self) -> ParseResult<Statement> {
        let Some(return_type) = self
            .match_type()
            .or_else(|| self.match_token(TokenKind::Void))
        else {
            return Ok(None);
        };
        let Some(name) = self.match_token(TokenKind::Identifier) else {
            return Ok(None);
        };
        let Some(open) = self.match_token(TokenKind::LeftParen) else {
            return Ok(None);
        };

        let mut params = Vec::new();
        let mut commas = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                params.push(self.parse_parameter()?);
                match self.match_token(TokenKind::Comma) {
                    Some(comma) => commas.push(comma),
                    None => break,
                }
            }
        }
        let close = self.expect(TokenKind::RightParen)?;
        let body = self.parse_body()?;

        let span = return_type.span.merge(&body.span);
        Ok(Some(Statement::new(
            StatementKind::FunctionDeclaration(FunctionDecl {
                return_type,
                name,
                open,
                params,
                commas,
                close,
                body: Box::new(body),
            }),
            span,
        )))
    }

    /// `type IDENT`
    fn parse_parameter(&mut self) -> Result<Parameter, ParseError> {
        let type_name = self
            .match_type()
            .ok_or_else(|| ParseError::at_token("parameter type", self.peek()))?;
        let name = self.expect(TokenKind::Identifier)?;
        Ok(Parameter { type_name, name })
    }
}
