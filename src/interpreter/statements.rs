//! Statement execution.

use crate::interpreter::{EvalResult, Interpreter, RuntimeError, StatementResult, Value};
use crate::semantic::{TypedExpr, TypedStatement, TypedStatementKind};
use crate::stack::ensure_sufficient_stack;

impl<'a> Interpreter<'a> {
    /// Executes statements in order, stopping at the first one whose result
    /// is not [`StatementResult::Void`].
    pub(crate) fn exec_statements(
        &mut self,
        statements: &'a [TypedStatement],
    ) -> EvalResult<StatementResult> {
        for stmt in statements {
            let result = self.exec(stmt)?;
            if result != StatementResult::Void {
                return Ok(result);
            }
        }
        Ok(StatementResult::Void)
    }

    /// Executes a single statement.
    pub(crate) fn exec(&mut self, stmt: &'a TypedStatement) -> EvalResult<StatementResult> {
        ensure_sufficient_stack(|| self.exec_inner(stmt))
    }

    fn exec_inner(&mut self, stmt: &'a TypedStatement) -> EvalResult<StatementResult> {
        match &stmt.kind {
            TypedStatementKind::Block {
                statements,
                inner_scope,
                creates_scope,
            } => {
                if !creates_scope {
                    return self.exec_statements(statements);
                }
                let mark = self.env.push_block(*inner_scope);
                let result = self.exec_statements(statements);
                self.env.pop_frame(mark);
                result
            }

            TypedStatementKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Void,
                };
                Ok(StatementResult::Return(value))
            }

            TypedStatementKind::VariableDeclaration {
                name, initializer, ..
            } => {
                // Bound before the initializer runs, so `int a = a;` reads an unset `a`.
                self.env.declare(name, None);
                if let Some(init) = initializer {
                    let value = self.eval(init)?;
                    self.env.declare(name, Some(value));
                }
                Ok(StatementResult::Void)
            }

            TypedStatementKind::Assignment {
                name,
                declared_in,
                value,
            } => {
                let value = self.eval(value)?;
                if !self.env.assign(*declared_in, name, value) {
                    return Err(RuntimeError::UndefinedVariable {
                        name: name.clone(),
                        span: stmt.span,
                    });
                }
                Ok(StatementResult::Void)
            }

            TypedStatementKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.condition(condition)? {
                    self.exec_body(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec_body(else_branch)
                } else {
                    Ok(StatementResult::Void)
                }
            }

            TypedStatementKind::While { condition, body } => {
                while self.condition(condition)? {
                    match self.exec_body(body)? {
                        StatementResult::Break => break,
                        StatementResult::Void | StatementResult::Continue => {}
                        result @ StatementResult::Return(_) => return Ok(result),
                    }
                }
                Ok(StatementResult::Void)
            }

            TypedStatementKind::FunctionDeclaration(function) => {
                log::debug!("function `{}` bound in frame {}", function.name, self.env.current());
                self.env.declare_function(function);
                Ok(StatementResult::Void)
            }

            TypedStatementKind::Break => Ok(StatementResult::Break),
            TypedStatementKind::Continue => Ok(StatementResult::Continue),

            TypedStatementKind::Expression(expr) => {
                self.eval(expr)?;
                Ok(StatementResult::Void)
            }
        }
    }

    /// Runs an `if` branch or one loop iteration in a fresh frame.
    ///
    /// A block body's statements run directly in that frame.
    fn exec_body(&mut self, body: &'a TypedStatement) -> EvalResult<StatementResult> {
        let scope = match &body.kind {
            TypedStatementKind::Block { inner_scope, .. } => *inner_scope,
            _ => body.scope,
        };
        let mark = self.env.push_block(scope);
        let result = match &body.kind {
            TypedStatementKind::Block { statements, .. } => self.exec_statements(statements),
            _ => self.exec(body),
        };
        self.env.pop_frame(mark);
        result
    }

    fn condition(&mut self, condition: &'a TypedExpr) -> EvalResult<bool> {
        let value = self.eval(condition)?;
        value.truthy().ok_or(RuntimeError::InvalidCondition {
            found: value.eval_type(),
            span: condition.span,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::{Execution, Interpreter, InterpreterConfig, RuntimeError, Value};
    use crate::parser::parse;
    use crate::semantic::analyze;

    fn run(source: &str) -> Result<Execution, RuntimeError> {
        let typed = analyze(&parse(source).unwrap()).unwrap();
        Interpreter::new(InterpreterConfig::default()).run(&typed)
    }

    fn global(source: &str, name: &str) -> Value {
        run(source).unwrap().globals[name].clone()
    }

    #[test]
    fn test_if_else() {
        assert_eq!(global("int a = 0; if (1 < 2) a = 1; else a = 2;", "a"), Value::Int(1));
        assert_eq!(global("int a = 0; if (1 > 2) a = 1; else a = 2;", "a"), Value::Int(2));
        assert_eq!(
            global("int a = 0; if (false) a = 1; else if (true) a = 3;", "a"),
            Value::Int(3)
        );
    }

    #[test]
    fn test_while_counts() {
        let source = "int i = 0; int sum = 0; while (i < 5) { i = i + 1; sum = sum + i; }";
        assert_eq!(global(source, "sum"), Value::Int(15));
    }

    #[test]
    fn test_break_and_continue() {
        let source = "int i = 0; int odd = 0; while (true) { i = i + 1; if (i > 9) break; if (i / 2 * 2 == i) continue; odd = odd + 1; }";
        let execution = run(source).unwrap();
        assert_eq!(execution.globals["i"], Value::Int(10));
        assert_eq!(execution.globals["odd"], Value::Int(5));
    }

    #[test]
    fn test_fresh_frame_per_iteration() {
        let source = "int i = 0; int seen = 0; while (i < 3) { int local; if (i > 0) seen = seen + local; local = 7; i = i + 1; }";
        assert!(matches!(
            run(source),
            Err(RuntimeError::UninitializedVariable { ref name, .. }) if name == "local"
        ));
    }

    #[test]
    fn test_block_shadowing() {
        let execution = run("int a = 1; { int a = 2; a = a + 10; } a = a + 1;").unwrap();
        assert_eq!(execution.globals["a"], Value::Int(2));
    }

    #[test]
    fn test_unbraced_branch_binds_in_its_own_frame() {
        let source = "int a = 0; int i = 0; while (i < 3) if (i > 0) { a = a + i; i = i + 1; } else i = i + 1;";
        let execution = run(source).unwrap();
        assert_eq!(execution.globals["a"], Value::Int(3));
        assert_eq!(execution.globals["i"], Value::Int(3));
    }

    #[test]
    fn test_return_unwinds_nested_statements() {
        let source = "int find() { int i = 0; while (true) { { if (i == 4) { return i * 10; } } i = i + 1; } } return find();";
        assert_eq!(run(source).unwrap().result, Value::Int(40));
    }

    #[test]
    fn test_top_level_return_stops_program() {
        let execution = run("int a = 1; return a; a = 2;").unwrap();
        assert_eq!(execution.result, Value::Int(1));
        assert_eq!(execution.globals["a"], Value::Int(1));
    }

    #[test]
    fn test_no_return_gives_void() {
        assert_eq!(run("int a = 1;").unwrap().result, Value::Void);
    }
}
