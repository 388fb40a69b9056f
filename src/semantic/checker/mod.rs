//! Type checker for clite semantic analysis.
//!
//! The type checker walks the parse tree with an explicit current scope,
//! resolves every name against the [`SymbolTable`], and produces the typed
//! tree. It handles:
//!
//! - **Expression typing**: literals, variables, operators, calls
//! - **Declarations**: variables and functions, including redeclaration checks
//! - **Conversions**: inserting `Convert` nodes where a value meets a typed slot
//! - **Control flow validation**: conditions, `break`/`continue`, `return`
//!
//! # Module Structure
//!
//! - [`expressions`] - Expression type checking (literals, operators, calls)
//! - [`statements`] - Statement dispatcher, blocks, `return`, `break`, `continue`
//! - [`assignments`] - Assignment checking
//! - [`control_flow`] - `if` and `while`
//! - [`definitions`] - Variable and function declarations
//!
//! Checking stops at the first error.

mod assignments;
mod control_flow;
mod definitions;
mod expressions;
mod statements;

use crate::lexer::Token;
use crate::semantic::{
    error::SemanticError,
    symbols::{FunctionId, ScopeId, Symbol, SymbolKind, SymbolTable},
    typed_ir::TypedExpr,
    types::EvalType,
};

/// Result of checking one node.
pub type CheckResult<T> = Result<T, SemanticError>;

/// The function whose body is being checked.
#[derive(Debug, Clone)]
pub(crate) struct FunctionContext {
    pub name: String,
    pub return_type: EvalType,
}

/// The type checker validates and annotates the parse tree with types.
pub struct TypeChecker<'a> {
    /// Symbol table for lookups and declarations.
    pub(crate) symbols: &'a mut SymbolTable,
    /// Enclosing function, if any (for `return` checking).
    pub(crate) function: Option<FunctionContext>,
    /// Number of enclosing loops within the current function.
    pub(crate) loop_depth: usize,
    /// Next function identity to hand out.
    next_function_id: usize,
}

impl<'a> TypeChecker<'a> {
    /// Creates a new type checker.
    pub fn new(symbols: &'a mut SymbolTable) -> Self {
        Self {
            symbols,
            function: None,
            loop_depth: 0,
            next_function_id: 0,
        }
    }

    /// Resolves a type keyword to a type through the scope chain.
    pub(crate) fn resolve_type(&self, scope: ScopeId, token: &Token) -> CheckResult<EvalType> {
        match self.symbols.lookup_recursive(scope, &token.text) {
            Some(Symbol {
                kind: SymbolKind::Type(eval_type),
                ..
            }) => Ok(*eval_type),
            _ => Err(SemanticError::UnknownType {
                name: token.text.clone(),
                span: token.span,
            }),
        }
    }

    /// Declares a symbol, turning a clash into a redeclaration error.
    pub(crate) fn declare(&mut self, scope: ScopeId, symbol: Symbol) -> CheckResult<()> {
        let duplicate_span = symbol.span;
        self.symbols
            .declare(scope, symbol)
            .map_err(|existing| SemanticError::Redeclaration {
                name: existing.name,
                original_span: existing.span,
                duplicate_span,
            })
    }

    /// Converts `expr` to `target`, or fails if no implicit conversion exists.
    pub(crate) fn coerce(&self, expr: TypedExpr, target: EvalType) -> CheckResult<TypedExpr> {
        if expr.eval_type.is_convertible_to(target) {
            Ok(expr.convert_to(target))
        } else {
            Err(SemanticError::InvalidConversion {
                from: expr.eval_type,
                to: target,
                span: expr.span,
            })
        }
    }

    /// Hands out a fresh function identity.
    pub(crate) fn next_function_id(&mut self) -> FunctionId {
        let id = FunctionId(self.next_function_id);
        self.next_function_id += 1;
        id
    }
}
