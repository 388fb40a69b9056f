//! Semantic analysis error types.
//!
//! These errors represent problems found during scope and type resolution
//! that aren't syntax errors. Each error includes the name or types involved
//! and the source location.

use crate::ast::Span;
use crate::semantic::types::EvalType;
use thiserror::Error;

/// A semantic analysis error with location and description.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SemanticError {
    // === Symbol Errors ===
    /// Reference to a variable that hasn't been declared in any enclosing scope.
    #[error("undeclared variable `{name}`")]
    UndefinedVariable { name: String, span: Span },

    /// Call to a function that hasn't been declared in any enclosing scope.
    #[error("undeclared function `{name}`")]
    UndefinedFunction { name: String, span: Span },

    /// A type name that doesn't resolve to a type.
    #[error("unknown type `{name}`")]
    UnknownType { name: String, span: Span },

    /// Name declared more than once in the same scope.
    #[error("`{name}` is already declared in this scope")]
    Redeclaration {
        name: String,
        original_span: Span,
        duplicate_span: Span,
    },

    /// A name used as a value that is not a variable.
    #[error("`{name}` is a {found}, not a variable")]
    NotAVariable {
        name: String,
        found: &'static str,
        span: Span,
    },

    /// Trying to call something that isn't a function.
    #[error("`{name}` is a {found}, not a function")]
    NotCallable {
        name: String,
        found: &'static str,
        span: Span,
    },

    // === Type Errors ===
    /// No implicit conversion between these types.
    #[error("cannot convert {from} to {to}")]
    InvalidConversion {
        from: EvalType,
        to: EvalType,
        span: Span,
    },

    /// Binary operator applied to incompatible types.
    #[error("operator `{op}` cannot be applied to types {left_type} and {right_type}")]
    InvalidBinaryOp {
        op: &'static str,
        left_type: EvalType,
        right_type: EvalType,
        span: Span,
    },

    /// Unary operator applied to incompatible type.
    #[error("operator `{op}` cannot be applied to type {operand_type}")]
    InvalidUnaryOp {
        op: &'static str,
        operand_type: EvalType,
        span: Span,
    },

    /// `if`/`while` condition that is neither bool nor int.
    #[error("condition must be bool or int, found {found}")]
    InvalidCondition { found: EvalType, span: Span },

    /// Literal that doesn't fit its type.
    #[error("literal `{text}` is out of range")]
    LiteralOutOfRange { text: String, span: Span },

    // === Function Errors ===
    /// Function called with wrong number of arguments.
    #[error("function `{name}` called with {found} arguments, expected {expected}")]
    ArgumentCountMismatch {
        name: String,
        expected: usize,
        found: usize,
        span: Span,
    },

    /// Argument type doesn't convert to the parameter type.
    #[error("argument {position} of `{name}`: cannot convert {found} to {expected}")]
    ArgumentTypeMismatch {
        name: String,
        position: usize,
        expected: EvalType,
        found: EvalType,
        span: Span,
    },

    /// `return;` in a function that returns a value.
    #[error("function `{name}` must return a {expected}")]
    MissingReturnValue {
        name: String,
        expected: EvalType,
        span: Span,
    },

    /// `return expr;` in a void function.
    #[error("void function `{name}` cannot return a value")]
    UnexpectedReturnValue { name: String, span: Span },

    // === Control Flow Errors ===
    /// `break` outside of any loop.
    #[error("`break` outside of a loop")]
    BreakOutsideLoop { span: Span },

    /// `continue` outside of any loop.
    #[error("`continue` outside of a loop")]
    ContinueOutsideLoop { span: Span },
}

impl SemanticError {
    /// Returns the primary span of this error.
    pub fn span(&self) -> Span {
        match self {
            SemanticError::UndefinedVariable { span, .. }
            | SemanticError::UndefinedFunction { span, .. }
            | SemanticError::UnknownType { span, .. }
            | SemanticError::NotAVariable { span, .. }
            | SemanticError::NotCallable { span, .. }
            | SemanticError::InvalidConversion { span, .. }
            | SemanticError::InvalidBinaryOp { span, .. }
            | SemanticError::InvalidUnaryOp { span, .. }
            | SemanticError::InvalidCondition { span, .. }
            | SemanticError::LiteralOutOfRange { span, .. }
            | SemanticError::ArgumentCountMismatch { span, .. }
            | SemanticError::ArgumentTypeMismatch { span, .. }
            | SemanticError::MissingReturnValue { span, .. }
            | SemanticError::UnexpectedReturnValue { span, .. }
            | SemanticError::BreakOutsideLoop { span }
            | SemanticError::ContinueOutsideLoop { span } => *span,
            SemanticError::Redeclaration { duplicate_span, .. } => *duplicate_span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SemanticError::UndefinedVariable {
            name: "x".to_string(),
            span: Span::new(0, 1),
        };
        assert_eq!(err.to_string(), "undeclared variable `x`");
    }

    #[test]
    fn test_type_names_in_message() {
        let err = SemanticError::InvalidConversion {
            from: EvalType::String,
            to: EvalType::Int,
            span: Span::new(4, 9),
        };
        assert_eq!(err.to_string(), "cannot convert string to int");
        assert_eq!(err.span(), Span::new(4, 9));
    }

    #[test]
    fn test_redeclaration_span() {
        let err = SemanticError::Redeclaration {
            name: "a".to_string(),
            original_span: Span::new(0, 6),
            duplicate_span: Span::new(7, 13),
        };
        assert_eq!(err.span(), Span::new(7, 13));
    }
}
