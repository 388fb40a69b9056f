//! Runtime values.

use crate::semantic::EvalType;
use std::fmt;

/// A runtime value.
///
/// Every value carries its own tag, but the interpreter always knows the
/// static [`EvalType`] of the expression that produced it and converts on
/// that basis.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Result of calling a `void` function.
    Void,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// The type tag of this value.
    pub fn eval_type(&self) -> EvalType {
        match self {
            Value::Void => EvalType::Void,
            Value::Bool(_) => EvalType::Bool,
            Value::Int(_) => EvalType::Int,
            Value::Float(_) => EvalType::Float,
            Value::Str(_) => EvalType::String,
        }
    }

    /// Converts this value to `target` following the implicit conversions.
    ///
    /// Returns None when no such conversion exists.
    ///
    /// ```
    /// use clite::interpreter::Value;
    /// use clite::semantic::EvalType;
    ///
    /// assert_eq!(Value::Int(3).convert(EvalType::Float), Some(Value::Float(3.0)));
    /// assert_eq!(Value::Float(2.5).convert(EvalType::String), Some(Value::Str("2.5".into())));
    /// assert_eq!(Value::Float(2.5).convert(EvalType::Int), None);
    /// ```
    pub fn convert(self, target: EvalType) -> Option<Value> {
        if self.eval_type() == target {
            return Some(self);
        }

        match (self, target) {
            (Value::Bool(b), EvalType::Int) => Some(Value::Int(i64::from(b))),
            (Value::Bool(b), EvalType::Float) => Some(Value::Float(if b { 1.0 } else { 0.0 })),
            (Value::Int(i), EvalType::Bool) => Some(Value::Bool(i != 0)),
            (Value::Int(i), EvalType::Float) => Some(Value::Float(i as f64)),
            (value @ (Value::Bool(_) | Value::Int(_) | Value::Float(_)), EvalType::String) => {
                Some(Value::Str(value.to_string()))
            }
            _ => None,
        }
    }

    /// Interprets this value as a condition.
    pub fn truthy(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Int(i) => Some(*i != 0),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => f.write_str("void"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}
