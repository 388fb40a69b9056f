//! Operator implementations.
//!
//! Both operands reach these functions already converted to the operand type
//! the analyzer chose for the operator, so each operator only has to handle
//! pairs of the same variant.

use crate::ast::{BinaryOp, Span};
use crate::interpreter::{EvalResult, RuntimeError, Value};

/// Applies a non-short-circuit binary operator.
pub(super) fn binary(op: BinaryOp, left: Value, right: Value, span: Span) -> EvalResult<Value> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => int_binary(op, a, b, span),
        (Value::Float(a), Value::Float(b)) => float_binary(op, a, b, span),
        (Value::Str(a), Value::Str(b)) => string_binary(op, a, b, span),
        (Value::Bool(a), Value::Bool(b)) => bool_binary(op, a, b, span),
        (left, _) => Err(invalid(op.as_str(), &left, span)),
    }
}

/// Negates a numeric value.
pub(super) fn negate(value: Value, span: Span) -> EvalResult<Value> {
    match value {
        Value::Int(i) => i
            .checked_neg()
            .map(Value::Int)
            .ok_or(RuntimeError::Overflow { op: "-", span }),
        Value::Float(x) => Ok(Value::Float(-x)),
        other => Err(invalid("-", &other, span)),
    }
}

fn int_binary(op: BinaryOp, a: i64, b: i64, span: Span) -> EvalResult<Value> {
    let checked = match op {
        BinaryOp::Add => a.checked_add(b),
        BinaryOp::Subtract => a.checked_sub(b),
        BinaryOp::Multiply => a.checked_mul(b),
        BinaryOp::Divide => {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero { span });
            }
            a.checked_div(b)
        }
        _ => return Ok(Value::Bool(compare(op, &a, &b))),
    };

    checked.map(Value::Int).ok_or(RuntimeError::Overflow {
        op: op.as_str(),
        span,
    })
}

fn float_binary(op: BinaryOp, a: f64, b: f64, span: Span) -> EvalResult<Value> {
    let value = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Subtract => a - b,
        BinaryOp::Multiply => a * b,
        BinaryOp::Divide => {
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero { span });
            }
            a / b
        }
        _ => return Ok(Value::Bool(compare(op, &a, &b))),
    };
    Ok(Value::Float(value))
}

fn string_binary(op: BinaryOp, a: String, b: String, span: Span) -> EvalResult<Value> {
    match op {
        BinaryOp::Add => Ok(Value::Str(a + &b)),
        _ if op.is_comparison() => Ok(Value::Bool(compare(op, &a, &b))),
        _ => Err(invalid(op.as_str(), &Value::Str(a), span)),
    }
}

fn bool_binary(op: BinaryOp, a: bool, b: bool, span: Span) -> EvalResult<Value> {
    match op {
        BinaryOp::And => Ok(Value::Bool(a && b)),
        BinaryOp::Or => Ok(Value::Bool(a || b)),
        _ if op.is_comparison() => Ok(Value::Bool(compare(op, &a, &b))),
        _ => Err(invalid(op.as_str(), &Value::Bool(a), span)),
    }
}

fn compare<T: PartialOrd + ?Sized>(op: BinaryOp, a: &T, b: &T) -> bool {
    match op {
        BinaryOp::Equal => a == b,
        BinaryOp::NotEqual => a != b,
        BinaryOp::LessThan => a < b,
        BinaryOp::LessEqual => a <= b,
        BinaryOp::GreaterThan => a > b,
        BinaryOp::GreaterEqual => a >= b,
        _ => false,
    }
}

fn invalid(op: &'static str, value: &Value, span: Span) -> RuntimeError {
    RuntimeError::InvalidOperands {
        op,
        operand_type: value.eval_type(),
        span,
    }
}
