//! Control flow type checking.
//!
//! `if` and `while` conditions must be `bool` or `int`. Each branch and each
//! loop body is analyzed in a fresh child scope, so a declaration there never
//! leaks into the surrounding code even when the body is not a block.

use crate::ast::{Expr, Span, Statement, StatementKind};
use crate::semantic::{
    error::SemanticError,
    symbols::ScopeId,
    typed_ir::{TypedExpr, TypedStatement, TypedStatementKind},
};

use super::{CheckResult, TypeChecker};

impl<'a> TypeChecker<'a> {
    /// Type checks an `if` statement.
    pub(crate) fn check_if(
        &mut self,
        condition: &Expr,
        then_branch: &Statement,
        else_branch: Option<&Statement>,
        span: Span,
        scope: ScopeId,
    ) -> CheckResult<TypedStatement> {
        let condition = self.check_condition(condition, scope)?;
        let then_branch = self.check_body(then_branch, scope, "if body")?;
        let else_branch = else_branch
            .map(|branch| self.check_body(branch, scope, "else body"))
            .transpose()?;

        Ok(TypedStatement::new(
            TypedStatementKind::If {
                condition,
                then_branch: Box::new(then_branch),
                else_branch: else_branch.map(Box::new),
            },
            span,
            scope,
        ))
    }

    /// Type checks a `while` statement.
    pub(crate) fn check_while(
        &mut self,
        condition: &Expr,
        body: &Statement,
        span: Span,
        scope: ScopeId,
    ) -> CheckResult<TypedStatement> {
        let condition = self.check_condition(condition, scope)?;

        self.loop_depth += 1;
        let body = self.check_body(body, scope, "while body");
        self.loop_depth -= 1;

        Ok(TypedStatement::new(
            TypedStatementKind::While {
                condition,
                body: Box::new(body?),
            },
            span,
            scope,
        ))
    }

    fn check_condition(&mut self, condition: &Expr, scope: ScopeId) -> CheckResult<TypedExpr> {
        let condition = self.check_expr(condition, scope)?;
        if !condition.eval_type.is_bool_convertible() {
            return Err(SemanticError::InvalidCondition {
                found: condition.eval_type,
                span: condition.span,
            });
        }
        Ok(condition)
    }

    /// Checks a branch or loop body in a new child scope named `name`.
    ///
    /// A block body reuses that scope instead of opening a second one.
    fn check_body(
        &mut self,
        body: &Statement,
        scope: ScopeId,
        name: &str,
    ) -> CheckResult<TypedStatement> {
        let body_scope = self.symbols.create_scope(scope, name);
        match &body.kind {
            StatementKind::Block { statements, .. } => {
                let statements = self.check_statements(statements, body_scope)?;
                Ok(TypedStatement::new(
                    TypedStatementKind::Block {
                        statements,
                        inner_scope: body_scope,
                        creates_scope: true,
                    },
                    body.span,
                    scope,
                ))
            }
            _ => self.check_statement(body, body_scope),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use crate::semantic::{
        SemanticAnalyzer, SemanticError, TypedProgram, typed_ir::TypedStatementKind,
        types::EvalType,
    };

    fn analyze(source: &str) -> Result<TypedProgram, SemanticError> {
        let program = parse(source).unwrap();
        SemanticAnalyzer::new().analyze(&program)
    }

    #[test]
    fn test_int_condition_accepted() {
        assert!(analyze("int n = 3; while (n) n = n - 1;").is_ok());
        assert!(analyze("if (1) {} else {}").is_ok());
    }

    #[test]
    fn test_string_condition_rejected() {
        let err = analyze("if (\"yes\") {}").unwrap_err();
        assert!(matches!(
            err,
            SemanticError::InvalidCondition {
                found: EvalType::String,
                ..
            }
        ));
    }

    #[test]
    fn test_float_condition_rejected() {
        let err = analyze("while (1.0) {}").unwrap_err();
        assert!(matches!(err, SemanticError::InvalidCondition { .. }));
    }

    #[test]
    fn test_branch_declaration_does_not_leak() {
        let err = analyze("if (true) int a = 1; a = 2;").unwrap_err();
        assert!(matches!(err, SemanticError::UndefinedVariable { .. }));
    }

    #[test]
    fn test_branches_have_separate_scopes() {
        assert!(analyze("if (true) { int a; } else { int a; }").is_ok());
    }

    #[test]
    fn test_block_body_scope_is_child_of_enclosing() {
        let typed = analyze("while (false) { int x; }").unwrap();
        let TypedStatementKind::While { body, .. } = &typed.statements[0].kind else {
            panic!("expected while");
        };
        let TypedStatementKind::Block {
            inner_scope,
            creates_scope,
            ..
        } = &body.kind
        else {
            panic!("expected block body");
        };
        assert!(creates_scope);
        assert_eq!(typed.symbols.parent(*inner_scope), Some(typed.root));
        assert_eq!(typed.symbols.scope_name(*inner_scope), "while body");
    }

    #[test]
    fn test_break_and_continue_inside_loop() {
        assert!(analyze("while (true) { if (true) break; continue; }").is_ok());
    }
}
