//! # clite
//!
//! Parser, semantic analyzer and tree-walking interpreter for a small
//! statically typed C-like language.
//!
//! ## Architecture
//!
//! Source text goes through a three-stage pipeline:
//!
//! ```text
//! Source → Lexer → Parser → Parse Tree → Semantic Analysis → Typed Tree → Interpreter
//! ```
//!
//! Each stage is implemented as a separate module:
//!
//! - [`lexer`] - Tokenizes source code and exposes a backtracking token source
//! - [`parser`] - Builds a parse tree that keeps every token
//! - [`ast`] - Parse tree definitions, source reconstruction and tree dumps
//! - [`semantic`] - Scope resolution and type checking into a typed tree
//! - [`interpreter`] - Executes the typed tree
//!
//! Every stage stops at its first error; [`Error`] wraps all three kinds.
//!
//! ## Example
//!
//! ```
//! use clite::interpreter::Value;
//!
//! let source = r#"
//!     float f(int x) {
//!         if (x == 1) return 1;
//!         if (x == 2) return 1;
//!         return f(x - 1) + f(x - 2);
//!     }
//!     float b = f(5);
//! "#;
//!
//! let execution = clite::run(source).unwrap();
//! assert_eq!(execution.globals["b"], Value::Float(5.0));
//! ```

pub mod ast;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod semantic;
mod stack;

pub use error::Error;

use interpreter::{Execution, Interpreter, InterpreterConfig};
use semantic::TypedProgram;

/// Parses and analyzes `source` without running it.
pub fn check(source: &str) -> Result<TypedProgram, Error> {
    let program = parser::parse(source)?;
    Ok(semantic::analyze(&program)?)
}

/// Runs `source` with the default interpreter settings.
pub fn run(source: &str) -> Result<Execution, Error> {
    run_with_config(source, InterpreterConfig::default())
}

/// Runs `source` through the whole pipeline.
pub fn run_with_config(source: &str, config: InterpreterConfig) -> Result<Execution, Error> {
    let typed = check(source)?;
    Ok(Interpreter::new(config).run(&typed)?)
}

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::Error;
    pub use crate::ast::{Expr, ExprKind, Program, Span, Statement, StatementKind};
    pub use crate::interpreter::{
        Execution, Interpreter, InterpreterConfig, RuntimeError, StatementResult, Value,
    };
    pub use crate::lexer::{Lexer, Token, TokenKind, TokenSource, TokenStream};
    pub use crate::parser::{ParseError, Parser};
    pub use crate::semantic::{EvalType, SemanticAnalyzer, SemanticError, TypedProgram};
}
