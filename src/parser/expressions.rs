//! Expression parsing using Pratt (precedence climbing) parsing.
//!
//! Pratt parsing handles:
//! - Binary operators with correct precedence and left associativity
//! - Unary operators (`-`, `!`), which bind tighter than any binary operator
//! - Parenthesized expressions
//! - Function calls
//!
//! # Precedence Levels (lowest to highest)
//!
//! 1. `||`
//! 2. `&&`
//! 3. Comparison (`==`, `!=`, `<`, `>`, `<=`, `>=`)
//! 4. Addition (`+`, `-`)
//! 5. Multiplication (`*`, `/`)
//! 6. Unary (`-`, `!`)
//!
//! Every entry point returns `Ok(None)` when the current token cannot start
//! an expression. After an operator or an opening parenthesis has been
//! consumed, a missing operand is an error.

use crate::ast::{BinaryOp, Expr, ExprKind, UnaryOp};
use crate::lexer::{TokenKind, TokenSource};

use super::{ParseError, ParseResult, Parser, Precedence};
use crate::stack::ensure_sufficient_stack;

impl<'a, S: TokenSource> Parser<'a, S> {
    // ==================== Expression Parsing (Pratt Parser) ====================

    /// Parses an expression, or returns `Ok(None)` if none starts here.
    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_expr_precedence(Precedence::Lowest)
    }

    /// Parses an expression with the given minimum precedence.
    pub(super) fn parse_expr_precedence(&mut self, min_prec: Precedence) -> ParseResult<Expr> {
        ensure_sufficient_stack(|| self.parse_expr_precedence_inner(min_prec))
    }

    fn parse_expr_precedence_inner(&mut self, min_prec: Precedence) -> ParseResult<Expr> {
        let Some(mut left) = self.parse_primary()? else {
            return Ok(None);
        };

        loop {
            let op_prec = Self::get_precedence(self.peek_kind());
            if op_prec <= min_prec {
                break;
            }
            left = self.parse_infix(left, op_prec)?;
        }

        Ok(Some(left))
    }

    /// Parses a binary operation whose left operand is already parsed.
    fn parse_infix(&mut self, left: Expr, precedence: Precedence) -> Result<Expr, ParseError> {
        let op_token = self.advance();
        let op = BinaryOp::from_token(op_token.kind)
            .ok_or_else(|| ParseError::at_token("binary operator", &op_token))?;

        let right = self.parse_expr_precedence(precedence);
        let right = self.required(right, "expression")?;

        let span = left.span.merge(&right.span);
        Ok(Expr::new(
            ExprKind::Binary {
                left: Box::new(left),
                op,
                op_token,
                right: Box::new(right),
            },
            span,
        ))
    }

    /// Parses a primary expression, trying each alternative in turn.
    ///
    /// A call must be tried before a bare identifier: both start with an
    /// identifier, and only the call rule looks at the following `(`.
    pub(super) fn parse_primary(&mut self) -> ParseResult<Expr> {
        ensure_sufficient_stack(|| self.parse_primary_inner())
    }

    fn parse_primary_inner(&mut self) -> ParseResult<Expr> {
        let alternatives: [fn(&mut Self) -> ParseResult<Expr>; 5] = [
            Self::parse_grouped,
            Self::parse_literal,
            Self::parse_call,
            Self::parse_identifier,
            Self::parse_unary,
        ];

        for rule in alternatives {
            if let Some(expr) = self.attempt(rule)? {
                return Ok(Some(expr));
            }
        }
        Ok(None)
    }

    /// `'(' expression ')'`
    fn parse_grouped(&mut self) -> ParseResult<Expr> {
        let Some(open) = self.match_token(TokenKind::LeftParen) else {
            return Ok(None);
        };

        let inner = self.parse_expression();
        let inner = self.required(inner, "expression")?;
        let close = self.expect(TokenKind::RightParen)?;

        let span = open.span.merge(&close.span);
        Ok(Some(Expr::new(
            ExprKind::Grouped {
                open,
                inner: Box::new(inner),
                close,
            },
            span,
        )))
    }

    /// Any literal token.
    fn parse_literal(&mut self) -> ParseResult<Expr> {
        if !self.peek_kind().is_literal() {
            return Ok(None);
        }
        let token = self.advance();
        let span = token.span;
        Ok(Some(Expr::new(ExprKind::Literal(token), span)))
    }

    /// `IDENT '(' (expression (',' expression)*)? ')'`
    fn parse_call(&mut self) -> ParseResult<Expr> {
        let Some(name) = self.match_token(TokenKind::Identifier) else {
            return Ok(None);
        };
        let Some(open) = self.match_token(TokenKind::LeftParen) else {
            return Ok(None);
        };

        let mut args = Vec::new();
        let mut commas = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                let arg = self.parse_expression();
                args.push(self.required(arg, "argument")?);
                match self.match_token(TokenKind::Comma) {
                    Some(comma) => commas.push(comma),
                    None => break,
                }
            }
        }
        let close = self.expect(TokenKind::RightParen)?;

        let span = name.span.merge(&close.span);
        Ok(Some(Expr::new(
            ExprKind::Call {
                name,
                open,
                args,
                commas,
                close,
            },
            span,
        )))
    }

    /// A bare variable reference.
    fn parse_identifier(&mut self) -> ParseResult<Expr> {
        let Some(token) = self.match_token(TokenKind::Identifier) else {
            return Ok(None);
        };
        let span = token.span;
        Ok(Some(Expr::new(ExprKind::Identifier(token), span)))
    }

    /// `'-' primary` or `'!' primary`
    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let Some(op) = UnaryOp::from_token(self.peek_kind()) else {
            return Ok(None);
        };
        let op_token = self.advance();

        let operand = self.parse_primary();
        let operand = self.required(operand, "operand")?;

        let span = op_token.span.merge(&operand.span);
        Ok(Some(Expr::new(
            ExprKind::Unary {
                op,
                op_token,
                operand: Box::new(operand),
            },
            span,
        )))
    }

    /// Gets the precedence of a binary operator token.
    fn get_precedence(kind: TokenKind) -> Precedence {
        match kind {
            TokenKind::OrOr => Precedence::Or,
            TokenKind::AndAnd => Precedence::And,
            TokenKind::EqualEqual
            | TokenKind::NotEqual
            | TokenKind::Less
            | TokenKind::Greater
            | TokenKind::LessEqual
            | TokenKind::GreaterEqual => Precedence::Comparison,
            TokenKind::Plus | TokenKind::Minus => Precedence::Additive,
            TokenKind::Star | TokenKind::Slash => Precedence::Multiplicative,
            _ => Precedence::Lowest,
        }
    }
}
