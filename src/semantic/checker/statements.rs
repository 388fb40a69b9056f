//! Statement type checking dispatcher.
//!
//! This module contains the main `check_statement` method that dispatches
//! to the appropriate handler based on statement kind. Blocks, `return`,
//! `break`, `continue` and expression statements are handled directly here,
//! while declarations and control flow delegate to specialized modules.

use crate::ast::{Expr, Span, Statement, StatementKind};
use crate::semantic::{
    error::SemanticError,
    symbols::ScopeId,
    typed_ir::{TypedStatement, TypedStatementKind},
};

use super::{CheckResult, TypeChecker};
use crate::stack::ensure_sufficient_stack;

impl<'a> TypeChecker<'a> {
    // ========================================================================
    // Statement Type Checking
    // ========================================================================

    /// Type checks a sequence of statements in `scope`, stopping at the
    /// first error.
    pub fn check_statements(
        &mut self,
        statements: &[Statement],
        scope: ScopeId,
    ) -> CheckResult<Vec<TypedStatement>> {
        statements
            .iter()
            .map(|stmt| self.check_statement(stmt, scope))
            .collect()
    }

    /// Type checks a statement in `scope`.
    pub fn check_statement(&mut self, stmt: &Statement, scope: ScopeId) -> CheckResult<TypedStatement> {
        ensure_sufficient_stack(|| self.check_statement_inner(stmt, scope))
    }

    fn check_statement_inner(
        &mut self,
        stmt: &Statement,
        scope: ScopeId,
    ) -> CheckResult<TypedStatement> {
        let span = stmt.span;
        match &stmt.kind {
            StatementKind::Block { statements, .. } => {
                self.check_block(statements, span, scope, true)
            }

            StatementKind::Return { value, .. } => self.check_return(value.as_ref(), span, scope),

            StatementKind::VariableDeclaration {
                type_name,
                name,
                initializer,
                ..
            } => self.check_variable_declaration(
                type_name,
                name,
                initializer.as_ref().map(|init| &init.value),
                span,
                scope,
            ),

            StatementKind::Assignment { name, value, .. } => {
                self.check_assignment(name, value, span, scope)
            }

            StatementKind::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => self.check_if(
                condition,
                then_branch,
                else_branch.as_ref().map(|branch| branch.body.as_ref()),
                span,
                scope,
            ),

            StatementKind::While {
                condition, body, ..
            } => self.check_while(condition, body, span, scope),

            StatementKind::FunctionDeclaration(decl) => {
                self.check_function_declaration(decl, span, scope)
            }

            StatementKind::Break { .. } => {
                if self.loop_depth == 0 {
                    return Err(SemanticError::BreakOutsideLoop { span });
                }
                Ok(TypedStatement::new(TypedStatementKind::Break, span, scope))
            }

            StatementKind::Continue { .. } => {
                if self.loop_depth == 0 {
                    return Err(SemanticError::ContinueOutsideLoop { span });
                }
                Ok(TypedStatement::new(TypedStatementKind::Continue, span, scope))
            }

            StatementKind::Expression { expr, .. } => {
                let expr = self.check_expr(expr, scope)?;
                Ok(TypedStatement::new(
                    TypedStatementKind::Expression(expr),
                    span,
                    scope,
                ))
            }
        }
    }

    /// Type checks the statements of a block.
    ///
    /// With `creates_scope` false the statements share `scope`; a function's
    /// direct body uses this so its locals sit next to the parameters.
    pub(crate) fn check_block(
        &mut self,
        statements: &[Statement],
        span: Span,
        scope: ScopeId,
        creates_scope: bool,
    ) -> CheckResult<TypedStatement> {
        let inner_scope = if creates_scope {
            self.symbols.create_scope(scope, "block")
        } else {
            scope
        };

        let statements = self.check_statements(statements, inner_scope)?;
        Ok(TypedStatement::new(
            TypedStatementKind::Block {
                statements,
                inner_scope,
                creates_scope,
            },
            span,
            scope,
        ))
    }

    /// Type checks a `return` statement.
    ///
    /// Inside a function the value must match the declared return type.
    /// At top level any value (or none) is accepted as the program result.
    fn check_return(
        &mut self,
        value: Option<&Expr>,
        span: Span,
        scope: ScopeId,
    ) -> CheckResult<TypedStatement> {
        let value = value
            .map(|expr| self.check_expr(expr, scope))
            .transpose()?;

        let Some(function) = self.function.clone() else {
            return Ok(TypedStatement::new(
                TypedStatementKind::Return(value),
                span,
                scope,
            ));
        };

        let value = match (value, function.return_type.is_value()) {
            (Some(_), false) => {
                return Err(SemanticError::UnexpectedReturnValue {
                    name: function.name,
                    span,
                });
            }
            (None, true) => {
                return Err(SemanticError::MissingReturnValue {
                    name: function.name,
                    expected: function.return_type,
                    span,
                });
            }
            (Some(value), true) => Some(self.coerce(value, function.return_type)?),
            (None, false) => None,
        };

        Ok(TypedStatement::new(
            TypedStatementKind::Return(value),
            span,
            scope,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use crate::semantic::{
        SemanticAnalyzer, SemanticError, TypedProgram,
        typed_ir::{TypedExprKind, TypedStatementKind},
        types::EvalType,
    };

    fn analyze(source: &str) -> Result<TypedProgram, SemanticError> {
        let program = parse(source).unwrap();
        SemanticAnalyzer::new().analyze(&program)
    }

    #[test]
    fn test_block_creates_child_scope() {
        let typed = analyze("{ int a; }").unwrap();
        let TypedStatementKind::Block {
            inner_scope,
            creates_scope,
            ..
        } = &typed.statements[0].kind
        else {
            panic!("expected block");
        };
        assert!(creates_scope);
        assert_eq!(typed.symbols.parent(*inner_scope), Some(typed.root));
        assert!(typed.symbols.lookup(*inner_scope, "a").is_some());
        assert!(typed.symbols.lookup(typed.root, "a").is_none());
    }

    #[test]
    fn test_return_value_converted() {
        let typed = analyze("float f() { return 1; }").unwrap();
        let TypedStatementKind::FunctionDeclaration(function) = &typed.statements[0].kind else {
            panic!("expected function");
        };
        let TypedStatementKind::Block { statements, .. } = &function.body.kind else {
            panic!("expected block body");
        };
        let TypedStatementKind::Return(Some(value)) = &statements[0].kind else {
            panic!("expected return with value");
        };
        assert_eq!(value.eval_type, EvalType::Float);
        assert!(matches!(value.kind, TypedExprKind::Convert(_)));
    }

    #[test]
    fn test_return_type_mismatch() {
        let err = analyze("int f() { return \"no\"; }").unwrap_err();
        assert!(matches!(
            err,
            SemanticError::InvalidConversion {
                from: EvalType::String,
                to: EvalType::Int,
                ..
            }
        ));
    }

    #[test]
    fn test_void_function_returning_value() {
        let err = analyze("void f() { return 1; }").unwrap_err();
        assert!(matches!(err, SemanticError::UnexpectedReturnValue { .. }));
    }

    #[test]
    fn test_missing_return_value() {
        let err = analyze("int f() { return; }").unwrap_err();
        assert!(matches!(
            err,
            SemanticError::MissingReturnValue {
                expected: EvalType::Int,
                ..
            }
        ));
    }

    #[test]
    fn test_top_level_return() {
        assert!(analyze("return 3 * 2;").is_ok());
        assert!(analyze("return;").is_ok());
    }

    #[test]
    fn test_break_outside_loop() {
        let err = analyze("break;").unwrap_err();
        assert!(matches!(err, SemanticError::BreakOutsideLoop { .. }));
        let err = analyze("continue;").unwrap_err();
        assert!(matches!(err, SemanticError::ContinueOutsideLoop { .. }));
    }

    #[test]
    fn test_break_in_function_inside_loop() {
        let err = analyze("while (true) { void f() { break; } }").unwrap_err();
        assert!(matches!(err, SemanticError::BreakOutsideLoop { .. }));
    }
}
