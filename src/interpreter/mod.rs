//! Tree-walking interpreter for clite.
//!
//! The interpreter executes a [`TypedProgram`] directly. Expressions evaluate
//! to a [`Value`]; statements produce a [`StatementResult`] that carries
//! `return`, `break` and `continue` up through nested statements without
//! unwinding the native stack.
//!
//! # Module Structure
//!
//! - [`value`] - Runtime values and their conversions
//! - [`environment`] - Runtime frames and name lookup
//! - `expressions` - Expression evaluation and function calls
//! - `operators` - Per-type operator implementations
//! - `statements` - Statement execution
//! - [`error`] - Runtime errors
//!
//! # Scoping
//!
//! Blocks, `if` branches and each `while` iteration run in a fresh frame.
//! A function call runs in a frame whose parent is the frame the function
//! was declared in, so a function sees the variables visible at its
//! declaration, never its caller's locals. Each variable use and call goes
//! to the frame of the scope the analyzer resolved it to, so a name declared
//! later in an enclosing block never captures an earlier binding.

pub mod environment;
pub mod error;
mod expressions;
mod operators;
mod statements;
pub mod value;

pub use error::RuntimeError;
pub use value::Value;

use crate::semantic::TypedProgram;
use environment::Environment;
use std::collections::BTreeMap;

/// Result type used by the evaluator.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default limit on nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// Control-flow signal produced by executing a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementResult {
    /// Continue with the next statement.
    Void,
    /// A `return` was executed, with its value (`Value::Void` for `return;`).
    Return(Value),
    Break,
    Continue,
}

/// Interpreter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Maximum number of nested calls before `RecursionLimit` is raised.
    pub max_call_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// Outcome of running a program to completion.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    /// Value of the top-level `return`, or `Value::Void` if none ran.
    pub result: Value,
    /// Global variables that hold a value when the program ends.
    pub globals: BTreeMap<String, Value>,
}

/// Executes typed programs.
pub struct Interpreter<'a> {
    env: Environment<'a>,
    config: InterpreterConfig,
    call_depth: usize,
}

impl<'a> Interpreter<'a> {
    /// Creates an interpreter with the given settings.
    pub fn new(config: InterpreterConfig) -> Self {
        Self {
            env: Environment::default(),
            config,
            call_depth: 0,
        }
    }

    /// Runs `program` from a fresh global frame.
    ///
    /// A top-level `return` ends the program early and becomes its result.
    pub fn run(&mut self, program: &'a TypedProgram) -> EvalResult<Execution> {
        self.env = Environment::new(program.root);
        self.call_depth = 0;

        let result = match self.exec_statements(&program.statements)? {
            StatementResult::Return(value) => value,
            _ => Value::Void,
        };
        log::debug!("program finished with {result:?}");

        Ok(Execution {
            result,
            globals: self.env.globals(),
        })
    }
}

/// Runs `program` with the default settings.
pub fn run(program: &TypedProgram) -> EvalResult<Execution> {
    Interpreter::new(InterpreterConfig::default()).run(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::semantic::analyze;

    fn run_with_depth(source: &str, max_call_depth: usize) -> EvalResult<Execution> {
        let typed = analyze(&parse(source).unwrap()).unwrap();
        Interpreter::new(InterpreterConfig { max_call_depth }).run(&typed)
    }

    #[test]
    fn test_recursive_function() {
        let source = "float f(int x){ if(x==1) return 1; if(x==2) return 1; return f(x-1)+f(x-2); } float b = f(5);";
        let execution = run_with_depth(source, DEFAULT_MAX_CALL_DEPTH).unwrap();
        assert_eq!(execution.globals["b"], Value::Float(5.0));
    }

    #[test]
    fn test_recursion_limit() {
        let source = "int down(int n) { return down(n + 1); } down(0);";
        let err = run_with_depth(source, 50).unwrap_err();
        assert!(matches!(err, RuntimeError::RecursionLimit { limit: 50, .. }));
    }

    #[test]
    fn test_deep_recursion_within_limit() {
        let source = "int depth(int n) { if (n == 0) return 0; return 1 + depth(n - 1); } int d = depth(5000);";
        let execution = run_with_depth(source, 10_000).unwrap();
        assert_eq!(execution.globals["d"], Value::Int(5000));
    }

    #[test]
    fn test_lexical_scoping_of_calls() {
        let source = "int x = 1; int read() { return x; } int caller() { int x = 2; return read(); } int r = caller();";
        let execution = run_with_depth(source, DEFAULT_MAX_CALL_DEPTH).unwrap();
        assert_eq!(execution.globals["r"], Value::Int(1));
    }

    #[test]
    fn test_later_declaration_does_not_capture_variable() {
        let source = "int x = 1; int r = 0; { int g() { return x; } int x = 2; r = g(); }";
        let execution = run_with_depth(source, DEFAULT_MAX_CALL_DEPTH).unwrap();
        assert_eq!(execution.globals["r"], Value::Int(1));
        assert_eq!(execution.globals["x"], Value::Int(1));
    }

    #[test]
    fn test_later_declaration_keeps_static_type() {
        let source = "int x = 1; int r = 0; { int g() { return x; } string x = \"s\"; r = g(); }";
        let execution = run_with_depth(source, DEFAULT_MAX_CALL_DEPTH).unwrap();
        assert_eq!(execution.globals["r"], Value::Int(1));
    }

    #[test]
    fn test_later_declaration_does_not_capture_function() {
        let source = "int f() { return 1; } int r = 0; { int g() { return f(); } int f() { return 2; } r = g() * 10 + f(); }";
        let execution = run_with_depth(source, DEFAULT_MAX_CALL_DEPTH).unwrap();
        assert_eq!(execution.globals["r"], Value::Int(12));
    }

    #[test]
    fn test_assignment_from_nested_function_hits_outer_binding() {
        let source = "int n = 0; { void bump() { n = n + 1; } int n = 100; bump(); bump(); }";
        let execution = run_with_depth(source, DEFAULT_MAX_CALL_DEPTH).unwrap();
        assert_eq!(execution.globals["n"], Value::Int(2));
    }

    #[test]
    fn test_interpreter_can_rerun() {
        let typed = analyze(&parse("int a = 1; a = a + 1;").unwrap()).unwrap();
        let mut interpreter = Interpreter::new(InterpreterConfig::default());
        let first = interpreter.run(&typed).unwrap();
        let second = interpreter.run(&typed).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.globals["a"], Value::Int(2));
    }

    #[test]
    fn test_default_config() {
        assert_eq!(InterpreterConfig::default().max_call_depth, 1000);
    }
}
