//! Assignment type checking.

use crate::ast::{Expr, Span};
use crate::lexer::Token;
use crate::semantic::{
    error::SemanticError,
    symbols::{ScopeId, Symbol, SymbolKind},
    typed_ir::{TypedStatement, TypedStatementKind},
};

use super::{CheckResult, TypeChecker};

impl<'a> TypeChecker<'a> {
    /// Type checks `name = value;`.
    ///
    /// The target must be a variable visible from `scope`; the value is
    /// converted to the variable's declared type.
    pub(crate) fn check_assignment(
        &mut self,
        name: &Token,
        value: &Expr,
        span: Span,
        scope: ScopeId,
    ) -> CheckResult<TypedStatement> {
        let (declared_in, target_type) = match self.symbols.resolve(scope, &name.text) {
            Some((
                declared_in,
                Symbol {
                    kind: SymbolKind::Variable(eval_type),
                    ..
                },
            )) => (declared_in, *eval_type),
            Some((_, other)) => {
                return Err(SemanticError::NotAVariable {
                    name: name.text.clone(),
                    found: other.kind.describe(),
                    span: name.span,
                });
            }
            None => {
                return Err(SemanticError::UndefinedVariable {
                    name: name.text.clone(),
                    span: name.span,
                });
            }
        };

        let value = self.check_expr(value, scope)?;
        let value = self.coerce(value, target_type)?;

        Ok(TypedStatement::new(
            TypedStatementKind::Assignment {
                name: name.text.clone(),
                declared_in,
                value,
            },
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
    fn test_assignment_converts_value() {
        let typed = analyze("string s; s = 42;").unwrap();
        let TypedStatementKind::Assignment { name, value, .. } = &typed.statements[1].kind else {
            panic!("expected assignment");
        };
        assert_eq!(name, "s");
        assert_eq!(value.eval_type, EvalType::String);
        assert!(matches!(value.kind, TypedExprKind::Convert(_)));
    }

    #[test]
    fn test_narrowing_assignment_rejected() {
        let err = analyze("int i; i = 2.5;").unwrap_err();
        assert!(matches!(
            err,
            SemanticError::InvalidConversion {
                from: EvalType::Float,
                to: EvalType::Int,
                ..
            }
        ));
    }

    #[test]
    fn test_assignment_binds_declaring_scope() {
        let typed = analyze("int a; { int b; a = 1; b = 2; }").unwrap();
        let TypedStatementKind::Block {
            statements,
            inner_scope,
            ..
        } = &typed.statements[1].kind
        else {
            panic!("expected block");
        };
        let scopes: Vec<_> = statements
            .iter()
            .filter_map(|stmt| match &stmt.kind {
                TypedStatementKind::Assignment { declared_in, .. } => Some(*declared_in),
                _ => None,
            })
            .collect();
        assert_eq!(scopes, vec![typed.root, *inner_scope]);
    }

    #[test]
    fn test_assign_to_function() {
        let err = analyze("void f() {} f = 1;").unwrap_err();
        assert!(matches!(err, SemanticError::NotAVariable { found: "function", .. }));
    }

    #[test]
    fn test_assign_to_undeclared() {
        let err = analyze("x = 1;").unwrap_err();
        assert!(matches!(err, SemanticError::UndefinedVariable { ref name, .. } if name == "x"));
    }
}
