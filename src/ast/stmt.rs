//! Statement nodes of the parse tree.
//!
//! # Statement Categories
//!
//! - **Declarations**: variables (`int a = 1;`) and functions (`int f(int x) ...`)
//! - **Assignment**: `a = expr;`
//! - **Control flow**: `if`/`else`, `while`, `break`, `continue`, `return`
//! - **Grouping**: `{ ... }` blocks
//! - **Expression statements**: `f(1);`

use super::{Expr, Span};
use crate::lexer::Token;

/// A statement with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The kind of statement.
    pub kind: StatementKind,
    /// Source location of this statement.
    pub span: Span,
}

impl Statement {
    /// Creates a new statement with the given kind and span.
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this statement is a `{ ... }` block.
    pub fn is_block(&self) -> bool {
        matches!(self.kind, StatementKind::Block { .. })
    }

    /// Short node name used in diagnostics and tree dumps.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            StatementKind::Block { .. } => "Block",
            StatementKind::Return { .. } => "Return",
            StatementKind::VariableDeclaration { .. } => "VariableDeclaration",
            StatementKind::Assignment { .. } => "Assignment",
            StatementKind::If { .. } => "If",
            StatementKind::While { .. } => "While",
            StatementKind::FunctionDeclaration(_) => "FunctionDeclaration",
            StatementKind::Break { .. } => "Break",
            StatementKind::Continue { .. } => "Continue",
            StatementKind::Expression { .. } => "Expression",
        }
    }
}

/// The different kinds of statements.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// `{ statements }`
    Block {
        open: Token,
        statements: Vec<Statement>,
        close: Token,
    },

    /// `return;` or `return expr;`
    Return {
        keyword: Token,
        value: Option<Expr>,
        semicolon: Token,
    },

    /// `type name;` or `type name = expr;`
    VariableDeclaration {
        type_name: Token,
        name: Token,
        initializer: Option<Initializer>,
        semicolon: Token,
    },

    /// `name = expr;`
    Assignment {
        name: Token,
        equals: Token,
        value: Expr,
        semicolon: Token,
    },

    /// `if (condition) statement [else statement]`
    If {
        keyword: Token,
        open: Token,
        condition: Expr,
        close: Token,
        then_branch: Box<Statement>,
        else_branch: Option<ElseBranch>,
    },

    /// `while (condition) statement`
    While {
        keyword: Token,
        open: Token,
        condition: Expr,
        close: Token,
        body: Box<Statement>,
    },

    /// `type name(params) statement`
    FunctionDeclaration(FunctionDecl),

    /// `break;`
    Break { keyword: Token, semicolon: Token },

    /// `continue;`
    Continue { keyword: Token, semicolon: Token },

    /// `expr;`
    Expression { expr: Expr, semicolon: Token },
}

/// The `= expr` part of a variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Initializer {
    pub equals: Token,
    pub value: Expr,
}

/// The `else statement` part of an `if`.
#[derive(Debug, Clone, PartialEq)]
pub struct ElseBranch {
    pub keyword: Token,
    pub body: Box<Statement>,
}

/// A function declaration.
///
/// ```text
/// float average(int a, int b) { return (a + b) / 2.0; }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// A type keyword or `void`.
    pub return_type: Token,
    pub name: Token,
    pub open: Token,
    pub params: Vec<Parameter>,
    /// Separators between parameters.
    pub commas: Vec<Token>,
    pub close: Token,
    pub body: Box<Statement>,
}

/// A single `type name` parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub type_name: Token,
    pub name: Token,
}

impl Parameter {
    /// Span covering the type and the name.
    pub fn span(&self) -> Span {
        self.type_name.span.merge(&self.name.span)
    }
}
