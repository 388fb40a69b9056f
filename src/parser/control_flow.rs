//! Control flow parsing: `if`/`else` and `while`.
//!
//! Both forms take a parenthesized condition followed by a single statement
//! as their body; braces are only needed to group several statements.
//! A dangling `else` binds to the nearest `if`.

use crate::ast::{ElseBranch, Expr, Statement, StatementKind};
use crate::lexer::{Token, TokenKind, TokenSource};

use super::{ParseError, ParseResult, Parser};

impl<'a, S: TokenSource> Parser<'a, S> {
    // ==================== Control Flow ====================

    /// `'if' '(' expression ')' statement ('else' statement)?`
    pub(super) fn parse_if(&mut self) -> ParseResult<Statement> {
        let Some(keyword) = self.match_token(TokenKind::If) else {
            return Ok(None);
        };

        let (open, condition, close) = self.parse_condition()?;
        let then_branch = self.parse_body()?;

        let else_branch = match self.match_token(TokenKind::Else) {
            Some(else_keyword) => Some(ElseBranch {
                keyword: else_keyword,
                body: Box::new(self.parse_body()?),
            }),
            None => None,
        };

        let end = else_branch
            .as_ref()
            .map_or(then_branch.span, |branch| branch.body.span);
        let span = keyword.span.merge(&end);
        Ok(Some(Statement::new(
            StatementKind::If {
                keyword,
                open,
                condition,
                close,
                then_branch: Box::new(then_branch),
                else_branch,
            },
            span,
        )))
    }

    /// `'while' '(' expression ')' statement`
    pub(super) fn parse_while(&mut self) -> ParseResult<Statement> {
        let Some(keyword) = self.match_token(TokenKind::While) else {
            return Ok(None);
        };

        let (open, condition, close) = self.parse_condition()?;
        let body = self.parse_body()?;

        let span = keyword.span.merge(&body.span);
        Ok(Some(Statement::new(
            StatementKind::While {
                keyword,
                open,
                condition,
                close,
                body: Box::new(body),
            },
            span,
        )))
    }

    /// `'(' expression ')'`, mandatory after `if` and `while`.
    fn parse_condition(&mut self) -> Result<(Token, Expr, Token), ParseError> {
        let open = self.expect(TokenKind::LeftParen)?;
        let condition = self.parse_expression();
        let condition = self.required(condition, "condition")?;
        let close = self.expect(TokenKind::RightParen)?;
        Ok((open, condition, close))
    }

    /// A mandatory statement, used for bodies.
    pub(super) fn parse_body(&mut self) -> Result<Statement, ParseError> {
        let body = self.parse_statement();
        self.required(body, "statement")
    }
}
