//! Typed tree produced by semantic analysis.
//!
//! This module defines the output of semantic analysis: the parse tree with
//! its tokens stripped and every node annotated with the scope it was
//! analyzed in. Expressions additionally carry their resolved type.
//!
//! # Design Principles
//!
//! - **Mirrors the parse tree**: the same expression and statement shapes
//! - **Type-annotated**: every expression knows its [`EvalType`]
//! - **Explicit conversions**: implicit conversions at initializers,
//!   assignments, call arguments and returns become `Convert` nodes
//! - **Scopes by handle**: nodes refer to scopes by [`ScopeId`], owned by the
//!   [`SymbolTable`] stored in the [`TypedProgram`]

use crate::ast::{BinaryOp, Span, UnaryOp};
use crate::semantic::symbols::{FunctionId, ParameterInfo, ScopeId, SymbolTable};
use crate::semantic::types::EvalType;

/// A type-annotated expression.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedExpr {
    /// The expression kind with typed sub-expressions.
    pub kind: TypedExprKind,
    /// The type of this expression's value.
    pub eval_type: EvalType,
    /// Source location for error reporting.
    pub span: Span,
    /// The scope this expression was resolved in.
    pub scope: ScopeId,
}

/// The different kinds of typed expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedExprKind {
    BoolLiteral(bool),
    IntLiteral(i64),
    FloatLiteral(f64),
    /// String literal with the quotes removed.
    StringLiteral(String),

    /// Variable reference, bound to the scope that declares it.
    Variable { name: String, declared_in: ScopeId },

    /// Parenthesized expression.
    Grouped(Box<TypedExpr>),

    /// Unary operation with typed operand.
    Unary {
        op: UnaryOp,
        operand: Box<TypedExpr>,
    },

    /// Binary operation with typed operands.
    ///
    /// Operands keep their own types; the evaluator converts both to
    /// [`EvalType::operand_type`] before applying `op`.
    Binary {
        left: Box<TypedExpr>,
        op: BinaryOp,
        right: Box<TypedExpr>,
    },

    /// Call of a resolved function with converted arguments.
    ///
    /// `declared_in` is the scope holding the function's symbol.
    Call {
        name: String,
        function: FunctionId,
        declared_in: ScopeId,
        args: Vec<TypedExpr>,
    },

    /// Explicit type conversion (inserted by the checker).
    ///
    /// The node's own `eval_type` is the target type.
    Convert(Box<TypedExpr>),
}

impl TypedExpr {
    /// Creates a new typed expression.
    pub fn new(kind: TypedExprKind, eval_type: EvalType, span: Span, scope: ScopeId) -> Self {
        Self {
            kind,
            eval_type,
            span,
            scope,
        }
    }

    /// Wraps this expression in a conversion node if needed.
    ///
    /// If the expression already has the target type, returns it unchanged.
    /// Callers check [`EvalType::is_convertible_to`] first.
    pub fn convert_to(self, target: EvalType) -> TypedExpr {
        if self.eval_type == target {
            return self;
        }
        let (span, scope) = (self.span, self.scope);
        TypedExpr::new(TypedExprKind::Convert(Box::new(self)), target, span, scope)
    }
}

/// A typed statement.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedStatement {
    /// The statement kind with typed sub-nodes.
    pub kind: TypedStatementKind,
    /// Source location.
    pub span: Span,
    /// The scope this statement was analyzed in.
    pub scope: ScopeId,
}

impl TypedStatement {
    /// Creates a new typed statement.
    pub fn new(kind: TypedStatementKind, span: Span, scope: ScopeId) -> Self {
        Self { kind, span, scope }
    }
}

/// The different kinds of typed statements.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedStatementKind {
    /// `{ ... }`
    Block {
        statements: Vec<TypedStatement>,
        /// The scope the block's statements live in. Equal to the enclosing
        /// scope when `creates_scope` is false (a function's direct body).
        inner_scope: ScopeId,
        creates_scope: bool,
    },

    /// `return [expr];`, with the value already converted to the return type.
    Return(Option<TypedExpr>),

    /// `type name [= expr];`, with the initializer converted to `eval_type`.
    VariableDeclaration {
        name: String,
        eval_type: EvalType,
        initializer: Option<TypedExpr>,
    },

    /// `name = expr;`, with the value converted to the variable's type.
    Assignment {
        name: String,
        declared_in: ScopeId,
        value: TypedExpr,
    },

    /// `if (condition) then_branch [else else_branch]`
    ///
    /// Each branch is analyzed in its own scope, recorded on the branch.
    If {
        condition: TypedExpr,
        then_branch: Box<TypedStatement>,
        else_branch: Option<Box<TypedStatement>>,
    },

    /// `while (condition) body`
    While {
        condition: TypedExpr,
        body: Box<TypedStatement>,
    },

    /// A function declaration.
    FunctionDeclaration(TypedFunction),

    Break,
    Continue,

    /// `expr;`
    Expression(TypedExpr),
}

/// A fully analyzed function.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedFunction {
    /// Identity shared with the function's symbol and its call sites.
    pub id: FunctionId,
    pub name: String,
    pub params: Vec<ParameterInfo>,
    pub return_type: EvalType,
    pub body: Box<TypedStatement>,
    /// The function's own scope, holding the parameters.
    pub scope: ScopeId,
}

/// A complete typed program.
#[derive(Debug, Clone)]
pub struct TypedProgram {
    /// Top-level statements.
    pub statements: Vec<TypedStatement>,
    /// Every scope created during analysis.
    pub symbols: SymbolTable,
    /// The scope top-level statements live in.
    pub root: ScopeId,
}

impl TypedProgram {
    /// Creates a new typed program.
    pub fn new(statements: Vec<TypedStatement>, symbols: SymbolTable, root: ScopeId) -> Self {
        Self {
            statements,
            symbols,
            root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_inserts_node() {
        let expr = TypedExpr::new(
            TypedExprKind::IntLiteral(1),
            EvalType::Int,
            Span::new(0, 1),
            ScopeId::ROOT,
        );
        let converted = expr.clone().convert_to(EvalType::Float);
        assert_eq!(converted.eval_type, EvalType::Float);
        assert_eq!(converted.span, Span::new(0, 1));
        assert_eq!(converted.kind, TypedExprKind::Convert(Box::new(expr)));
    }

    #[test]
    fn test_convert_same_type_is_identity() {
        let expr = TypedExpr::new(
            TypedExprKind::BoolLiteral(true),
            EvalType::Bool,
            Span::new(0, 4),
            ScopeId::ROOT,
        );
        assert_eq!(expr.clone().convert_to(EvalType::Bool), expr);
    }
}
