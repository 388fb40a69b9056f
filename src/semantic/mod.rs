//! Semantic analysis for clite.
//!
//! This module runs after parsing and before interpretation. It handles:
//!
//! - **Scope resolution**: building the scope tree and linking every name to
//!   its declaration
//! - **Type checking**: ensuring operations, assignments, calls and returns
//!   have compatible types
//! - **Conversion insertion**: making every implicit conversion explicit
//! - **Validation**: redeclarations, `break`/`continue` placement, conditions
//!
//! # Architecture
//!
//! Analysis is a **single pass** in source order. Names must be declared
//! before use; the one exception to "before" is that a function's own symbol
//! is registered before its body, which is what makes recursion work.
//!
//! Every check function receives the scope it runs in explicitly, so there
//! is no "current scope" state to restore when a nested scope ends.
//!
//! Analysis stops at the first error.
//!
//! # Output
//!
//! The output is a [`TypedProgram`]: the parse tree without its tokens, with
//! each node annotated with its scope and each expression with its type,
//! ready for the interpreter.
//!
//! # Usage
//!
//! ```
//! use clite::parser::parse;
//! use clite::semantic::SemanticAnalyzer;
//!
//! let program = parse("int a = 1; float b = a + 0.5;").unwrap();
//! let typed = SemanticAnalyzer::new().analyze(&program).unwrap();
//! assert_eq!(typed.statements.len(), 2);
//! ```

pub mod checker;
pub mod error;
pub mod symbols;
pub mod typed_ir;
pub mod types;

pub use error::SemanticError;
pub use symbols::{
    FunctionId, FunctionSignature, ParameterInfo, ScopeId, Symbol, SymbolKind, SymbolTable,
};
pub use typed_ir::{
    TypedExpr, TypedExprKind, TypedFunction, TypedProgram, TypedStatement, TypedStatementKind,
};
pub use types::EvalType;

use crate::ast::Program;
use checker::TypeChecker;

/// Main entry point for semantic analysis.
///
/// The `SemanticAnalyzer` transforms a parse tree into a typed tree,
/// performing scope resolution and type checking along the way.
#[derive(Debug, Default)]
pub struct SemanticAnalyzer;

impl SemanticAnalyzer {
    /// Creates a new semantic analyzer.
    pub fn new() -> Self {
        Self
    }

    /// Analyzes a program and produces a typed tree.
    ///
    /// Each call starts from a fresh symbol table whose root scope holds the
    /// built-in type names.
    pub fn analyze(&self, program: &Program) -> Result<TypedProgram, SemanticError> {
        let mut symbols = SymbolTable::new();
        let root = symbols.root();

        let statements = {
            let mut checker = TypeChecker::new(&mut symbols);
            checker.check_statements(&program.statements, root)
        };

        match statements {
            Ok(statements) => {
                log::debug!(
                    "analysis finished: {} statements, {} scopes",
                    statements.len(),
                    symbols.scope_count()
                );
                Ok(TypedProgram::new(statements, symbols, root))
            }
            Err(err) => {
                log::debug!("analysis failed: {err}");
                Err(err)
            }
        }
    }
}

/// Analyzes `program` with a default analyzer.
pub fn analyze(program: &Program) -> Result<TypedProgram, SemanticError> {
    SemanticAnalyzer::new().analyze(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Span;
    use crate::parser::parse;

    fn analyze_source(source: &str) -> Result<TypedProgram, SemanticError> {
        analyze(&parse(source).unwrap())
    }

    #[test]
    fn test_analyze_simple_program() {
        let typed = analyze_source("int a = 1; a = a + 1;").unwrap();
        assert_eq!(typed.statements.len(), 2);
        assert_eq!(typed.root, ScopeId::ROOT);
        assert!(typed.symbols.lookup(typed.root, "a").is_some());
    }

    #[test]
    fn test_empty_program() {
        let typed = analyze_source("").unwrap();
        assert!(typed.statements.is_empty());
        assert_eq!(typed.symbols.scope_count(), 1);
    }

    #[test]
    fn test_use_before_declaration() {
        let err = analyze_source("a = 1; int a;").unwrap_err();
        assert_eq!(
            err,
            SemanticError::UndefinedVariable {
                name: "a".to_string(),
                span: Span::new(0, 1),
            }
        );
    }

    #[test]
    fn test_first_error_wins() {
        let err = analyze_source("int a; int a; x = 1;").unwrap_err();
        assert!(matches!(err, SemanticError::Redeclaration { .. }));
    }

    #[test]
    fn test_analyzer_is_reusable() {
        let analyzer = SemanticAnalyzer::new();
        let program = parse("int a;").unwrap();
        assert!(analyzer.analyze(&program).is_ok());
        assert!(analyzer.analyze(&program).is_ok());
    }

    #[test]
    fn test_scope_chain_resolution() {
        let typed = analyze_source("int a = 1; { float a = 2.5; { a = a * 2; } }").unwrap();
        assert_eq!(typed.symbols.scope_count(), 3);
    }
}
