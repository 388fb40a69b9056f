//! Parser for clite.
//!
//! The parser transforms a [`TokenSource`] into a parse tree ([`Program`]).
//! It uses recursive descent with speculative backtracking for statements and
//! Pratt parsing (precedence climbing) for binary expressions.
//!
//! # Example
//!
//! ```
//! use clite::lexer::TokenStream;
//! use clite::parser::Parser;
//!
//! let source = r#"
//!     int x = 1 + 2;
//!     string s = "Hello";
//! "#;
//!
//! let mut tokens = TokenStream::new(source);
//! let program = Parser::new(&mut tokens).parse().expect("parse failed");
//!
//! assert_eq!(program.statements.len(), 2);
//! ```
//!
//! # Module Structure
//!
//! The parser is split into focused modules:
//! - [`tokens`] - Token navigation and speculation utilities
//! - [`expressions`] - Pratt parser for expressions
//! - [`statements`] - Statement dispatcher and simple statements
//! - [`control_flow`] - `if`/`else` and `while` parsing
//! - [`procedures`] - Function declarations
//! - [`error`] - Parse error types
//!
//! # Speculation
//!
//! Every rule returns [`ParseResult`]: `Ok(None)` means the rule's leading
//! tokens did not match and the caller may try the next alternative, `Err`
//! means the rule was recognized but is malformed. Alternatives are tried
//! through [`Parser::attempt`], which saves the token position before the
//! rule runs and rewinds it on `Ok(None)`.
//!
//! There is no error recovery: the first error aborts the parse.

mod control_flow;
mod error;
mod expressions;
mod procedures;
mod statements;
mod tokens;

pub use error::ParseError;

use crate::ast::Program;
use crate::lexer::{TokenKind, TokenSource, TokenStream};

/// Outcome of a single grammar rule: no match, a node, or a fatal error.
pub type ParseResult<T> = Result<Option<T>, ParseError>;

/// Parser for clite source code.
///
/// Reads tokens through a [`TokenSource`] so that it can speculate and
/// rewind. The token source is borrowed, not owned, so callers can inspect
/// it (for example its mark stack) afterwards.
pub struct Parser<'a, S: TokenSource> {
    /// The token source being parsed.
    tokens: &'a mut S,
}

impl<'a, S: TokenSource> Parser<'a, S> {
    /// Creates a new parser reading from the given token source.
    pub fn new(tokens: &'a mut S) -> Self {
        Self { tokens }
    }

    /// Parses the token source into a program.
    ///
    /// Returns the first error encountered.
    pub fn parse(&mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::Eof) {
            match self.parse_statement()? {
                Some(statement) => statements.push(statement),
                None => return Err(ParseError::at_token("statement", self.peek())),
            }
        }

        let pending = self.tokens.pending_states();
        if pending != 0 {
            log::error!("parse finished with {pending} unbalanced token marks");
        }

        Ok(Program::new(statements))
    }
}

/// Parses source text in one step.
///
/// ```
/// let program = clite::parser::parse("int a = 1;").unwrap();
/// assert_eq!(program.statements.len(), 1);
/// ```
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let mut tokens = TokenStream::new(source);
    Parser::new(&mut tokens).parse()
}

/// Operator precedence levels for Pratt parsing.
///
/// Higher values mean higher precedence (bind tighter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub(crate) enum Precedence {
    Lowest = 0,
    Or = 1,             // ||
    And = 2,            // &&
    Comparison = 3,     // ==, !=, <, >, <=, >=
    Additive = 4,       // +, -
    Multiplicative = 5, // *, /
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Expr, ExprKind, StatementKind, UnaryOp};
    use pretty_assertions::assert_eq;

    fn initializer(source: &str) -> Expr {
        let program = parse(source).unwrap();
        match program.statements.into_iter().next().map(|s| s.kind) {
            Some(StatementKind::VariableDeclaration {
                initializer: Some(init),
                ..
            }) => init.value,
            other => panic!("expected initialized declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_literals() {
        for source in ["int a = 42;", "float a = 2.5;", "string a = \"x\";", "bool a = true;"] {
            let expr = initializer(source);
            assert!(matches!(expr.kind, ExprKind::Literal(_)), "{source}");
        }
    }

    #[test]
    fn test_left_associativity_and_precedence() {
        let expr = initializer("int a = 1 - 8 + 7 + 6 * 5 * 3;");
        assert_eq!(expr.to_source(), "1 - 8 + 7 + 6 * 5 * 3");

        // ((1 - 8) + 7) + ((6 * 5) * 3)
        let ExprKind::Binary { left, op, right, .. } = expr.kind else {
            panic!("expected binary");
        };
        assert_eq!(op, BinaryOp::Add);
        assert_eq!(left.to_source(), "1 - 8 + 7");
        assert!(matches!(left.kind, ExprKind::Binary { op: BinaryOp::Add, .. }));
        let ExprKind::Binary { left: product, op, .. } = right.kind else {
            panic!("expected product");
        };
        assert_eq!(op, BinaryOp::Multiply);
        assert_eq!(product.to_source(), "6 * 5");
    }

    #[test]
    fn test_logical_precedence() {
        let expr = initializer("bool a = x || y && z == 1;");
        let ExprKind::Binary { op, right, .. } = expr.kind else {
            panic!("expected binary");
        };
        assert_eq!(op, BinaryOp::Or);
        assert!(matches!(right.kind, ExprKind::Binary { op: BinaryOp::And, .. }));
    }

    #[test]
    fn test_unary_binds_tighter_than_multiply() {
        let expr = initializer("int a = -b * c;");
        let ExprKind::Binary { left, op, .. } = expr.kind else {
            panic!("expected binary");
        };
        assert_eq!(op, BinaryOp::Multiply);
        assert!(matches!(left.kind, ExprKind::Unary { op: UnaryOp::Negate, .. }));
    }

    #[test]
    fn test_call_before_identifier() {
        let expr = initializer("int a = f(1, g(), b);");
        let ExprKind::Call { name, args, commas, .. } = expr.kind else {
            panic!("expected call");
        };
        assert_eq!(name.text, "f");
        assert_eq!(args.len(), 3);
        assert_eq!(commas.len(), 2);
        assert!(matches!(args[1].kind, ExprKind::Call { .. }));
        assert!(matches!(args[2].kind, ExprKind::Identifier(_)));
    }

    #[test]
    fn test_statement_kinds() {
        let program = parse(
            "int a; a = 1; { a; } if (a) a = 2; else a = 3; \
             while (a) break; void f() { return; } continue; f();",
        )
        .unwrap();
        let kinds: Vec<_> = program.statements.iter().map(|s| s.kind_name()).collect();
        assert_eq!(
            kinds,
            vec![
                "VariableDeclaration",
                "Assignment",
                "Block",
                "If",
                "While",
                "FunctionDeclaration",
                "Continue",
                "Expression",
            ]
        );
    }

    #[test]
    fn test_declaration_versus_function() {
        let program = parse("int f(int x, float y) return x; int g;").unwrap();
        let StatementKind::FunctionDeclaration(function) = &program.statements[0].kind else {
            panic!("expected function");
        };
        assert_eq!(function.params.len(), 2);
        assert_eq!(function.params[1].type_name.text, "float");
        assert!(matches!(
            program.statements[1].kind,
            StatementKind::VariableDeclaration { initializer: None, .. }
        ));
    }

    #[test]
    fn test_statement_spans() {
        let program = parse("int a = 1;\nreturn a;").unwrap();
        assert_eq!(program.statements[0].span, crate::ast::Span::new(0, 10));
        assert_eq!(program.statements[1].span, crate::ast::Span::new(11, 20));
    }

    #[test]
    fn test_empty_program() {
        assert!(parse("  // nothing here\n").unwrap().statements.is_empty());
    }

    #[test]
    fn test_missing_initializer_is_fatal() {
        let err = parse("int a = ;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
        assert_eq!(err.span().start, 8);
        assert!(err.to_string().contains("expected expression"));
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse("int a = 1").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse("{ int a;").unwrap_err();
        assert!(err.to_string().contains("expected `}`"), "{err}");
    }

    #[test]
    fn test_no_statement_matches() {
        let err = parse("int a; )").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected `)` at position 7, expected statement"
        );
    }

    #[test]
    fn test_void_variable_rejected() {
        let err = parse("void x;").unwrap_err();
        assert_eq!(err.span().start, 0);
    }

    #[test]
    fn test_invalid_token_reported() {
        let err = parse("int a = 1 # 2;").unwrap_err();
        assert!(err.to_string().contains("`#`"), "{err}");
    }

    #[test]
    fn test_marks_balanced_after_parse() {
        let mut tokens = TokenStream::new("int f(int a) { if (a) return f(a - 1); return 0; } int b = f(3);");
        Parser::new(&mut tokens).parse().unwrap();
        assert_eq!(tokens.pending_states(), 0);
    }

    #[test]
    fn test_marks_balanced_after_error() {
        let mut tokens = TokenStream::new("while (1) { int a = (2; }");
        assert!(Parser::new(&mut tokens).parse().is_err());
        assert_eq!(tokens.pending_states(), 0);
    }
}
