//! Runtime error types.
//!
//! Analysis rules out most misuse before execution starts. What remains are
//! failures that depend on values: reading a variable that was declared but
//! never set, dividing by zero, integer overflow, operators the type rules
//! admit but no value supports, and runaway recursion.

use crate::ast::Span;
use crate::semantic::EvalType;
use thiserror::Error;

/// An error raised while executing a program.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    /// A declared variable was read before any value was assigned to it.
    #[error("variable `{name}` is used before it is set")]
    UninitializedVariable { name: String, span: Span },

    /// A variable has no binding in any enclosing frame.
    #[error("no variable `{name}` in scope")]
    UndefinedVariable { name: String, span: Span },

    /// A function has no binding in any enclosing frame.
    #[error("no function `{name}` in scope")]
    UndefinedFunction { name: String, span: Span },

    #[error("division by zero")]
    DivisionByZero { span: Span },

    /// Integer arithmetic left the range of `int`.
    #[error("integer overflow in `{op}`")]
    Overflow { op: &'static str, span: Span },

    /// An operator has no implementation for its operand type.
    #[error("operator `{op}` is not supported for {operand_type} values")]
    InvalidOperands {
        op: &'static str,
        operand_type: EvalType,
        span: Span,
    },

    /// A value could not be converted to the type its context requires.
    #[error("cannot convert {from} value to {to}")]
    InvalidConversion {
        from: EvalType,
        to: EvalType,
        span: Span,
    },

    /// A condition did not evaluate to `bool` or `int`.
    #[error("condition must be bool or int, found {found}")]
    InvalidCondition { found: EvalType, span: Span },

    /// Call depth exceeded the configured limit.
    #[error("call to `{name}` exceeds the maximum call depth of {limit}")]
    RecursionLimit {
        name: String,
        limit: usize,
        span: Span,
    },

    /// A non-void function finished without executing `return`.
    #[error("function `{name}` ended without returning a {expected}")]
    MissingReturnValue {
        name: String,
        expected: EvalType,
        span: Span,
    },
}

impl RuntimeError {
    /// Returns the span of the construct that failed.
    pub fn span(&self) -> Span {
        match self {
            RuntimeError::UninitializedVariable { span, .. }
            | RuntimeError::UndefinedVariable { span, .. }
            | RuntimeError::UndefinedFunction { span, .. }
            | RuntimeError::DivisionByZero { span }
            | RuntimeError::Overflow { span, .. }
            | RuntimeError::InvalidOperands { span, .. }
            | RuntimeError::InvalidConversion { span, .. }
            | RuntimeError::InvalidCondition { span, .. }
            | RuntimeError::RecursionLimit { span, .. }
            | RuntimeError::MissingReturnValue { span, .. } => *span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = RuntimeError::DivisionByZero {
            span: Span::new(3, 8),
        };
        assert_eq!(err.to_string(), "division by zero");
        assert_eq!(err.span(), Span::new(3, 8));

        let err = RuntimeError::RecursionLimit {
            name: "f".to_string(),
            limit: 10,
            span: Span::new(0, 3),
        };
        assert_eq!(
            err.to_string(),
            "call to `f` exceeds the maximum call depth of 10"
        );
    }

    #[test]
    fn test_operand_type_in_message() {
        let err = RuntimeError::InvalidOperands {
            op: "*",
            operand_type: EvalType::String,
            span: Span::default(),
        };
        assert_eq!(
            err.to_string(),
            "operator `*` is not supported for string values"
        );
    }
}
