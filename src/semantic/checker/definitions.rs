//! Declaration type checking.
//!
//! Handles variable declarations and function declarations. A function's
//! symbol is registered in the enclosing scope before its body is checked,
//! so the body may call the function recursively.

use crate::ast::{Expr, FunctionDecl, Span, StatementKind};
use crate::lexer::{Token, TokenKind};
use crate::semantic::{
    error::SemanticError,
    symbols::{FunctionSignature, ParameterInfo, ScopeId, Symbol},
    typed_ir::{TypedFunction, TypedStatement, TypedStatementKind},
    types::EvalType,
};

use super::{CheckResult, FunctionContext, TypeChecker};

impl<'a> TypeChecker<'a> {
    // ========================================================================
    // Variables
    // ========================================================================

    /// Type checks `type name [= initializer];`.
    ///
    /// The name is declared before the initializer is checked, so the
    /// initializer already sees the new variable.
    pub(crate) fn check_variable_declaration(
        &mut self,
        type_name: &Token,
        name: &Token,
        initializer: Option<&Expr>,
        span: Span,
        scope: ScopeId,
    ) -> CheckResult<TypedStatement> {
        let eval_type = self.resolve_type(scope, type_name)?;
        if !eval_type.is_value() {
            return Err(SemanticError::UnknownType {
                name: type_name.text.clone(),
                span: type_name.span,
            });
        }

        self.declare(
            scope,
            Symbol::variable(name.text.clone(), eval_type, name.span),
        )?;

        let initializer = match initializer {
            Some(expr) => {
                let value = self.check_expr(expr, scope)?;
                Some(self.coerce(value, eval_type)?)
            }
            None => None,
        };

        Ok(TypedStatement::new(
            TypedStatementKind::VariableDeclaration {
                name: name.text.clone(),
                eval_type,
                initializer,
            },
            span,
            scope,
        ))
    }

    // ========================================================================
    // Functions
    // ========================================================================

    /// Type checks a function declaration.
    ///
    /// Parameters live in a new scope whose parent is the declaring scope.
    /// A block body shares that scope.
    pub(crate) fn check_function_declaration(
        &mut self,
        decl: &FunctionDecl,
        span: Span,
        scope: ScopeId,
    ) -> CheckResult<TypedStatement> {
        let return_type = if decl.return_type.kind == TokenKind::Void {
            EvalType::Void
        } else {
            self.resolve_type(scope, &decl.return_type)?
        };

        let name = decl.name.text.clone();
        if let Some(existing) = self.symbols.lookup(scope, &name) {
            return Err(SemanticError::Redeclaration {
                name,
                original_span: existing.span,
                duplicate_span: decl.name.span,
            });
        }

        let function_scope = self.symbols.create_scope(scope, format!("function {name}"));

        let mut params = Vec::with_capacity(decl.params.len());
        for param in &decl.params {
            let eval_type = self.resolve_type(scope, &param.type_name)?;
            if !eval_type.is_value() {
                return Err(SemanticError::UnknownType {
                    name: param.type_name.text.clone(),
                    span: param.type_name.span,
                });
            }
            self.declare(
                function_scope,
                Symbol::variable(param.name.text.clone(), eval_type, param.name.span),
            )?;
            params.push(ParameterInfo {
                name: param.name.text.clone(),
                eval_type,
            });
        }

        let id = self.next_function_id();
        let signature = FunctionSignature {
            id,
            return_type,
            params: params.clone(),
        };
        log::debug!(
            "function `{}` {} declared in scope {}",
            name,
            id,
            scope.index()
        );
        self.declare(scope, Symbol::function(name.clone(), signature, decl.name.span))?;

        let outer_function = self.function.replace(FunctionContext {
            name: name.clone(),
            return_type,
        });
        let outer_loops = std::mem::take(&mut self.loop_depth);

        let body = match &decl.body.kind {
            StatementKind::Block { statements, .. } => {
                self.check_block(statements, decl.body.span, function_scope, false)
            }
            _ => self.check_statement(&decl.body, function_scope),
        };

        self.function = outer_function;
        self.loop_depth = outer_loops;

        Ok(TypedStatement::new(
            TypedStatementKind::FunctionDeclaration(TypedFunction {
                id,
                name,
                params,
                return_type,
                body: Box::new(body?),
                scope: function_scope,
            }),
            span,
            scope,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use crate::semantic::{
        SemanticAnalyzer, SemanticError, SymbolKind, TypedProgram,
        typed_ir::{TypedExprKind, TypedStatementKind},
        types::EvalType,
    };

    fn analyze(source: &str) -> Result<TypedProgram, SemanticError> {
        let program = parse(source).unwrap();
        SemanticAnalyzer::new().analyze(&program)
    }

    #[test]
    fn test_declaration_with_conversion() {
        let typed = analyze("float b = 5;").unwrap();
        let TypedStatementKind::VariableDeclaration {
            name,
            eval_type,
            initializer: Some(init),
        } = &typed.statements[0].kind
        else {
            panic!("expected declaration with initializer");
        };
        assert_eq!(name, "b");
        assert_eq!(*eval_type, EvalType::Float);
        assert!(matches!(init.kind, TypedExprKind::Convert(_)));
    }

    #[test]
    fn test_bool_from_int() {
        assert!(analyze("bool flag = 1;").is_ok());
    }

    #[test]
    fn test_int_from_string_rejected() {
        let err = analyze("int a = \"x\";").unwrap_err();
        assert!(matches!(err, SemanticError::InvalidConversion { .. }));
    }

    #[test]
    fn test_function_symbol_signature() {
        let typed = analyze("float scale(int n, float k) { return n * k; }").unwrap();
        let symbol = typed.symbols.lookup(typed.root, "scale").unwrap();
        let SymbolKind::Function(signature) = &symbol.kind else {
            panic!("expected function symbol");
        };
        assert_eq!(signature.return_type, EvalType::Float);
        let types: Vec<_> = signature.params.iter().map(|p| p.eval_type).collect();
        assert_eq!(types, vec![EvalType::Int, EvalType::Float]);
    }

    #[test]
    fn test_function_ids_are_distinct() {
        let typed = analyze("void a() {} void b() {}").unwrap();
        let ids: Vec<_> = typed
            .statements
            .iter()
            .map(|s| match &s.kind {
                TypedStatementKind::FunctionDeclaration(f) => f.id,
                _ => panic!("expected function"),
            })
            .collect();
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_duplicate_function() {
        let err = analyze("void f() {} void f() {}").unwrap_err();
        assert!(matches!(err, SemanticError::Redeclaration { .. }));
    }

    #[test]
    fn test_duplicate_parameter() {
        let err = analyze("void f(int a, int a) {}").unwrap_err();
        assert!(matches!(err, SemanticError::Redeclaration { .. }));
    }

    #[test]
    fn test_nested_function_sees_outer_variables() {
        assert!(analyze("int base = 10; int add(int x) { int inner(int y) { return base + y; } return inner(x); }").is_ok());
    }

    #[test]
    fn test_nested_function_not_visible_outside() {
        let err = analyze("void outer() { void inner() {} } inner();").unwrap_err();
        assert!(matches!(err, SemanticError::UndefinedFunction { .. }));
    }
}
