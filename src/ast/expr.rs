//! Expression nodes of the parse tree.
//!
//! # Expression Precedence
//!
//! From highest to lowest (as implemented in the parser):
//!
//! 1. Primary: literals, identifiers, calls, parenthesized expressions
//! 2. Unary: `-x`, `!x`
//! 3. Multiplicative: `*`, `/`
//! 4. Additive: `+`, `-`
//! 5. Comparison: `==`, `!=`, `<`, `>`, `<=`, `>=`
//! 6. Logical AND: `&&`
//! 7. Logical OR: `||`

use super::Span;
use crate::lexer::{Token, TokenKind};

/// An expression with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// The kind of expression.
    pub kind: ExprKind,
    /// Source location of this expression.
    pub span: Span,
}

impl Expr {
    /// Creates a new expression with the given kind and span.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Short node name used in diagnostics and tree dumps.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            ExprKind::Literal(_) => "Literal",
            ExprKind::Identifier(_) => "Identifier",
            ExprKind::Grouped { .. } => "Grouped",
            ExprKind::Unary { .. } => "Unary",
            ExprKind::Binary { .. } => "Binary",
            ExprKind::Call { .. } => "Call",
        }
    }
}

/// The different kinds of expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Literal of any primitive type: `42`, `2.5`, `"hi"`, `true`
    ///
    /// The token kind tells which; the text is decoded during analysis.
    Literal(Token),

    /// Variable reference: `x`
    Identifier(Token),

    /// Parenthesized expression: `(expr)`
    Grouped {
        open: Token,
        inner: Box<Expr>,
        close: Token,
    },

    /// Unary operation: `-x`, `!flag`
    Unary {
        op: UnaryOp,
        op_token: Token,
        operand: Box<Expr>,
    },

    /// Binary operation: `left op right`
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        op_token: Token,
        right: Box<Expr>,
    },

    /// Function call: `name(arg1, arg2)`
    ///
    /// `commas` holds the separators between arguments, so it is always one
    /// shorter than `args` (or empty).
    Call {
        name: Token,
        open: Token,
        args: Vec<Expr>,
        commas: Vec<Token>,
        close: Token,
    },
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Arithmetic
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `+` - Addition, also string concatenation
    Add,
    /// `-`
    Subtract,

    // Comparison
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterEqual,

    // Logical
    /// `&&` - short-circuit AND
    And,
    /// `||` - short-circuit OR
    Or,
}

impl BinaryOp {
    /// Decodes a binary operator token.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Star => BinaryOp::Multiply,
            TokenKind::Slash => BinaryOp::Divide,
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Subtract,
            TokenKind::EqualEqual => BinaryOp::Equal,
            TokenKind::NotEqual => BinaryOp::NotEqual,
            TokenKind::Less => BinaryOp::LessThan,
            TokenKind::LessEqual => BinaryOp::LessEqual,
            TokenKind::Greater => BinaryOp::GreaterThan,
            TokenKind::GreaterEqual => BinaryOp::GreaterEqual,
            TokenKind::AndAnd => BinaryOp::And,
            TokenKind::OrOr => BinaryOp::Or,
            _ => return None,
        };
        Some(op)
    }

    /// Returns true for `+ - * /`.
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Add | BinaryOp::Subtract
        )
    }

    /// Returns true for `== != < <= > >=`.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Equal
                | BinaryOp::NotEqual
                | BinaryOp::LessThan
                | BinaryOp::LessEqual
                | BinaryOp::GreaterThan
                | BinaryOp::GreaterEqual
        )
    }

    /// Returns true for `&&` and `||`.
    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    /// Returns a string representation of the operator for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::LessThan => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-` - Numeric negation
    Negate,
    /// `!` - Logical NOT
    Not,
}

impl UnaryOp {
    /// Decodes a unary operator token.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Minus => Some(UnaryOp::Negate),
            TokenKind::Bang => Some(UnaryOp::Not),
            _ => None,
        }
    }

    /// Returns a string representation of the operator for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_op_from_token() {
        assert_eq!(BinaryOp::from_token(TokenKind::Plus), Some(BinaryOp::Add));
        assert_eq!(BinaryOp::from_token(TokenKind::OrOr), Some(BinaryOp::Or));
        assert_eq!(BinaryOp::from_token(TokenKind::Assign), None);
    }

    #[test]
    fn test_binary_op_categories() {
        assert!(BinaryOp::Divide.is_arithmetic());
        assert!(BinaryOp::LessEqual.is_comparison());
        assert!(BinaryOp::And.is_logical());
        assert!(!BinaryOp::Equal.is_logical());
    }

    #[test]
    fn test_binary_op_as_str() {
        assert_eq!(BinaryOp::Add.as_str(), "+");
        assert_eq!(BinaryOp::NotEqual.as_str(), "!=");
        assert_eq!(BinaryOp::Or.as_str(), "||");
    }

    #[test]
    fn test_unary_op_from_token() {
        assert_eq!(UnaryOp::from_token(TokenKind::Bang), Some(UnaryOp::Not));
        assert_eq!(UnaryOp::from_token(TokenKind::Plus), None);
    }

    #[test]
    fn test_create_binary_expr() {
        let literal = |text: &str, start: usize| {
            let span = Span::new(start, start + text.len());
            Expr::new(
                ExprKind::Literal(Token::new(TokenKind::IntLiteral, span, text)),
                span,
            )
        };
        let expr = Expr::new(
            ExprKind::Binary {
                left: Box::new(literal("1", 0)),
                op: BinaryOp::Add,
                op_token: Token::new(TokenKind::Plus, 2..3, "+"),
                right: Box::new(literal("2", 4)),
            },
            Span::new(0, 5),
        );
        assert_eq!(expr.kind_name(), "Binary");
        assert!(matches!(
            expr.kind,
            ExprKind::Binary {
                op: BinaryOp::Add,
                ..
            }
        ));
    }
}
