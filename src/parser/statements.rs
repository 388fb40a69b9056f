//! Statement parsing for the parser.
//!
//! This module contains the statement dispatcher and the simple statements:
//! blocks, `return`, variable declarations, assignments, `break`,
//! `continue` and expression statements.
//!
//! Control flow and function declarations are handled in their respective
//! modules.

use crate::ast::{Initializer, Statement, StatementKind};
use crate::lexer::{TokenKind, TokenSource};

use super::{ParseError, ParseResult, Parser};
use crate::stack::ensure_sufficient_stack;

type StatementRule<'a, S> = fn(&mut Parser<'a, S>) -> ParseResult<Statement>;

impl<'a, S: TokenSource> Parser<'a, S> {
    // ==================== Statement Dispatcher ====================

    /// Parses a single statement.
    ///
    /// Alternatives are tried in a fixed order and the first match wins.
    /// Variable declarations come before function declarations because both
    /// start with `type IDENT`; assignments come before expression
    /// statements because both start with an identifier.
    pub(super) fn parse_statement(&mut self) -> ParseResult<Statement> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> ParseResult<Statement> {
        let alternatives: [StatementRule<'a, S>; 10] = [
            Self::parse_block,
            Self::parse_return,
            Self::parse_variable_declaration,
            Self::parse_if,
            Self::parse_while,
            Self::parse_function_declaration,
            Self::parse_break,
            Self::parse_continue,
            Self::parse_assignment,
            Self::parse_expression_statement,
        ];

        for rule in alternatives {
            if let Some(statement) = self.attempt(rule)? {
                return Ok(Some(statement));
            }
        }
        Ok(None)
    }

    /// `'{' statement* '}'`
    pub(super) fn parse_block(&mut self) -> ParseResult<Statement> {
        let Some(open) = self.match_token(TokenKind::LeftBrace) else {
            return Ok(None);
        };

        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) {
            match self.parse_statement()? {
                Some(statement) => statements.push(statement),
                None => return Err(ParseError::at_token("`}`", self.peek())),
            }
        }
        let close = self.advance();

        let span = open.span.merge(&close.span);
        Ok(Some(Statement::new(
            StatementKind::Block {
                open,
                statements,
                close,
            },
            span,
        )))
    }

    /// `'return' expression? ';'`
    fn parse_return(&mut self) -> ParseResult<Statement> {
        let Some(keyword) = self.match_token(TokenKind::Return) else {
            return Ok(None);
        };

        let value = self.parse_expression()?;
        let semicolon = self.expect(TokenKind::Semicolon)?;

        let span = keyword.span.merge(&semicolon.span);
        Ok(Some(Statement::new(
            StatementKind::Return {
                keyword,
                value,
                semicolon,
            },
            span,
        )))
    }

    /// `type IDENT (';' | '=' expression ';')`
    ///
    /// Rewinds unless the name is followed by `;` or `=`, which leaves
    /// `type IDENT '('` to the function declaration rule.
    fn parse_variable_declaration(&mut self) -> ParseResult<Statement> {
        let Some(type_name) = self.match_type() else {
            return Ok(None);
        };
        let Some(name) = self.match_token(TokenKind::Identifier) else {
            return Ok(None);
        };

        let initializer = if let Some(equals) = self.match_token(TokenKind::Assign) {
            let value = self.parse_expression();
            let value = self.required(value, "expression")?;
            Some(Initializer { equals, value })
        } else if self.check(TokenKind::Semicolon) {
            None
        } else {
            return Ok(None);
        };
        let semicolon = self.expect(TokenKind::Semicolon)?;

        let span = type_name.span.merge(&semicolon.span);
        Ok(Some(Statement::new(
            StatementKind::VariableDeclaration {
                type_name,
                name,
                initializer,
                semicolon,
            },
            span,
        )))
    }

    /// `'break' ';'`
    fn parse_break(&mut self) -> ParseResult<Statement> {
        let Some(keyword) = self.match_token(TokenKind::Break) else {
            return Ok(None);
        };
        let semicolon = self.expect(TokenKind::Semicolon)?;

        let span = keyword.span.merge(&semicolon.span);
        Ok(Some(Statement::new(
            StatementKind::Break { keyword, semicolon },
            span,
        )))
    }

    /// `'continue' ';'`
    fn parse_continue(&mut self) -> ParseResult<Statement> {
        let Some(keyword) = self.match_token(TokenKind::Continue) else {
            return Ok(None);
        };
        let semicolon = self.expect(TokenKind::Semicolon)?;

        let span = keyword.span.merge(&semicolon.span);
        Ok(Some(Statement::new(
            StatementKind::Continue { keyword, semicolon },
            span,
        )))
    }

    /// `IDENT '=' expression ';'`
    fn parse_assignment(&mut self) -> ParseResult<Statement> {
        let Some(name) = self.match_token(TokenKind::Identifier) else {
            return Ok(None);
        };
        let Some(equals) = self.match_token(TokenKind::Assign) else {
            return Ok(None);
        };

        let value = self.parse_expression();
        let value = self.required(value, "expression")?;
        let semicolon = self.expect(TokenKind::Semicolon)?;

        let span = name.span.merge(&semicolon.span);
        Ok(Some(Statement::new(
            StatementKind::Assignment {
                name,
                equals,
                value,
                semicolon,
            },
            span,
        )))
    }

    /// `expression ';'`
    fn parse_expression_statement(&mut self) -> ParseResult<Statement> {
        let Some(expr) = self.parse_expression()? else {
            return Ok(None);
        };
        let semicolon = self.expect(TokenKind::Semicolon)?;

        let span = expr.span.merge(&semicolon.span);
        Ok(Some(Statement::new(
            StatementKind::Expression { expr, semicolon },
            span,
        )))
    }
}
