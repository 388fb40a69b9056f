//! Type system for clite semantic analysis.
//!
//! # Type System Overview
//!
//! There are four value types and `void`, which only appears as a function
//! return type (and therefore as the type of a call to such a function).
//!
//! The value types are totally ordered by "width":
//!
//! ```text
//! bool < int < float < string
//! ```
//!
//! Every narrower type converts implicitly to every wider one, and `int`
//! also converts to `bool` (non-zero is true). Mixed operands of a binary
//! operator meet at the wider of their two types.

use crate::ast::BinaryOp;
use std::fmt;

/// The resolved type of an expression, variable, or function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvalType {
    /// No value; only valid as a function return type.
    Void,
    /// `bool`
    Bool,
    /// `int`, a 64-bit signed integer
    Int,
    /// `float`, a 64-bit IEEE float
    Float,
    /// `string`
    String,
}

impl EvalType {
    /// All type names the root scope pre-declares.
    pub const ALL: [EvalType; 5] = [
        EvalType::Void,
        EvalType::Bool,
        EvalType::Int,
        EvalType::Float,
        EvalType::String,
    ];

    /// Looks up a type by its keyword.
    pub fn from_name(name: &str) -> Option<EvalType> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// The keyword naming this type.
    pub fn name(&self) -> &'static str {
        match self {
            EvalType::Void => "void",
            EvalType::Bool => "bool",
            EvalType::Int => "int",
            EvalType::Float => "float",
            EvalType::String => "string",
        }
    }

    /// Returns the position in the width order, or None for `void`.
    fn rank(&self) -> Option<u8> {
        match self {
            EvalType::Void => None,
            EvalType::Bool => Some(0),
            EvalType::Int => Some(1),
            EvalType::Float => Some(2),
            EvalType::String => Some(3),
        }
    }

    /// Returns true for every type except `void`.
    pub fn is_value(&self) -> bool {
        self.rank().is_some()
    }

    /// Returns true if a value of this type can be used as a condition.
    pub fn is_bool_convertible(&self) -> bool {
        matches!(self, EvalType::Bool | EvalType::Int)
    }

    /// Returns true if this type can be implicitly converted to `target`.
    pub fn is_convertible_to(&self, target: EvalType) -> bool {
        if *self == target {
            return true;
        }
        matches!(
            (self, target),
            (EvalType::Bool, EvalType::Int | EvalType::Float | EvalType::String)
                | (EvalType::Int, EvalType::Bool | EvalType::Float | EvalType::String)
                | (EvalType::Float, EvalType::String)
        )
    }

    /// Returns the wider of two value types, or None if either is `void`.
    pub fn wider(self, other: EvalType) -> Option<EvalType> {
        let (a, b) = (self.rank()?, other.rank()?);
        Some(if a >= b { self } else { other })
    }

    /// The type both operands are converted to before applying `op`.
    pub fn operand_type(op: BinaryOp, left: EvalType, right: EvalType) -> Option<EvalType> {
        if op.is_logical() {
            (left.is_bool_convertible() && right.is_bool_convertible()).then_some(EvalType::Bool)
        } else {
            left.wider(right)
        }
    }

    /// The type of `left op right`, or None if the operands don't admit `op`.
    ///
    /// ```
    /// use clite::ast::BinaryOp;
    /// use clite::semantic::EvalType;
    ///
    /// let result = EvalType::binary_result(BinaryOp::Add, EvalType::String, EvalType::Int);
    /// assert_eq!(result, Some(EvalType::String));
    /// ```
    pub fn binary_result(op: BinaryOp, left: EvalType, right: EvalType) -> Option<EvalType> {
        let operands = Self::operand_type(op, left, right)?;
        if op.is_comparison() || op.is_logical() {
            Some(EvalType::Bool)
        } else {
            Some(operands)
        }
    }
}

impl fmt::Display for EvalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(EvalType::from_name("float"), Some(EvalType::Float));
        assert_eq!(EvalType::from_name("void"), Some(EvalType::Void));
        assert_eq!(EvalType::from_name("double"), None);
    }

    #[test]
    fn test_implicit_conversions() {
        assert!(EvalType::Bool.is_convertible_to(EvalType::String));
        assert!(EvalType::Int.is_convertible_to(EvalType::Bool));
        assert!(EvalType::Int.is_convertible_to(EvalType::Float));
        assert!(EvalType::Float.is_convertible_to(EvalType::String));
        assert!(EvalType::Void.is_convertible_to(EvalType::Void));

        assert!(!EvalType::Float.is_convertible_to(EvalType::Int));
        assert!(!EvalType::Float.is_convertible_to(EvalType::Bool));
        assert!(!EvalType::String.is_convertible_to(EvalType::Int));
        assert!(!EvalType::Void.is_convertible_to(EvalType::Int));
        assert!(!EvalType::Int.is_convertible_to(EvalType::Void));
    }

    #[test]
    fn test_arithmetic_promotion() {
        let add = |l, r| EvalType::binary_result(BinaryOp::Add, l, r);
        assert_eq!(add(EvalType::String, EvalType::Int), Some(EvalType::String));
        assert_eq!(add(EvalType::Int, EvalType::Float), Some(EvalType::Float));
        assert_eq!(add(EvalType::Int, EvalType::Int), Some(EvalType::Int));
        assert_eq!(add(EvalType::Bool, EvalType::Int), Some(EvalType::Int));
        assert_eq!(add(EvalType::Void, EvalType::Int), None);
    }

    #[test]
    fn test_comparison_yields_bool() {
        let eq = |l, r| EvalType::binary_result(BinaryOp::Equal, l, r);
        assert_eq!(eq(EvalType::Bool, EvalType::Int), Some(EvalType::Bool));
        assert_eq!(eq(EvalType::String, EvalType::Float), Some(EvalType::Bool));
        assert_eq!(eq(EvalType::Int, EvalType::Void), None);
        assert_eq!(
            EvalType::operand_type(BinaryOp::LessThan, EvalType::Int, EvalType::Float),
            Some(EvalType::Float)
        );
    }

    #[test]
    fn test_logical_needs_bool_convertible() {
        let and = |l, r| EvalType::binary_result(BinaryOp::And, l, r);
        assert_eq!(and(EvalType::Bool, EvalType::Int), Some(EvalType::Bool));
        assert_eq!(and(EvalType::Float, EvalType::Bool), None);
        assert_eq!(and(EvalType::String, EvalType::String), None);
    }
}
