//! Expression type checking.
//!
//! Literals get their fixed type, variables the type of their symbol, unary
//! and binary operations the type given by the promotion rules in
//! [`EvalType`], and calls the declared return type of the callee.

use crate::ast::{BinaryOp, Expr, ExprKind, Span, UnaryOp};
use crate::lexer::{Token, TokenKind};
use crate::semantic::{
    error::SemanticError,
    symbols::{ScopeId, Symbol, SymbolKind},
    typed_ir::{TypedExpr, TypedExprKind},
    types::EvalType,
};

use super::{CheckResult, TypeChecker};
use crate::stack::ensure_sufficient_stack;

impl<'a> TypeChecker<'a> {
    /// Type checks an expression in `scope`.
    pub(crate) fn check_expr(&mut self, expr: &Expr, scope: ScopeId) -> CheckResult<TypedExpr> {
        ensure_sufficient_stack(|| self.check_expr_inner(expr, scope))
    }

    fn check_expr_inner(&mut self, expr: &Expr, scope: ScopeId) -> CheckResult<TypedExpr> {
        let span = expr.span;
        match &expr.kind {
            ExprKind::Literal(token) => {
                let (kind, eval_type) = decode_literal(token)?;
                Ok(TypedExpr::new(kind, eval_type, span, scope))
            }

            ExprKind::Identifier(token) => self.check_variable(token, scope),

            ExprKind::Grouped { inner, .. } => {
                let inner = self.check_expr(inner, scope)?;
                let eval_type = inner.eval_type;
                Ok(TypedExpr::new(
                    TypedExprKind::Grouped(Box::new(inner)),
                    eval_type,
                    span,
                    scope,
                ))
            }

            ExprKind::Unary { op, operand, .. } => self.check_unary(*op, operand, span, scope),

            ExprKind::Binary {
                left, op, right, ..
            } => self.check_binary(left, *op, right, span, scope),

            ExprKind::Call { name, args, .. } => self.check_call(name, args, span, scope),
        }
    }

    /// Resolves a variable reference.
    fn check_variable(&self, token: &Token, scope: ScopeId) -> CheckResult<TypedExpr> {
        match self.symbols.resolve(scope, &token.text) {
            Some((
                declared_in,
                Symbol {
                    kind: SymbolKind::Variable(eval_type),
                    ..
                },
            )) => Ok(TypedExpr::new(
                TypedExprKind::Variable {
                    name: token.text.clone(),
                    declared_in,
                },
                *eval_type,
                token.span,
                scope,
            )),
            Some((_, other)) => Err(SemanticError::NotAVariable {
                name: token.text.clone(),
                found: other.kind.describe(),
                span: token.span,
            }),
            None => Err(SemanticError::UndefinedVariable {
                name: token.text.clone(),
                span: token.span,
            }),
        }
    }

    /// Type checks a unary operation.
    ///
    /// `-` keeps its operand's type; `!` needs a bool-convertible operand and
    /// yields `bool`.
    fn check_unary(
        &mut self,
        op: UnaryOp,
        operand: &Expr,
        span: Span,
        scope: ScopeId,
    ) -> CheckResult<TypedExpr> {
        let operand = self.check_expr(operand, scope)?;

        let eval_type = match op {
            UnaryOp::Negate if operand.eval_type.is_value() => operand.eval_type,
            UnaryOp::Not if operand.eval_type.is_bool_convertible() => EvalType::Bool,
            _ => {
                return Err(SemanticError::InvalidUnaryOp {
                    op: op.as_str(),
                    operand_type: operand.eval_type,
                    span,
                });
            }
        };

        Ok(TypedExpr::new(
            TypedExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            eval_type,
            span,
            scope,
        ))
    }

    /// Type checks a binary operation.
    fn check_binary(
        &mut self,
        left: &Expr,
        op: BinaryOp,
        right: &Expr,
        span: Span,
        scope: ScopeId,
    ) -> CheckResult<TypedExpr> {
        let left = self.check_expr(left, scope)?;
        let right = self.check_expr(right, scope)?;

        let eval_type = EvalType::binary_result(op, left.eval_type, right.eval_type).ok_or(
            SemanticError::InvalidBinaryOp {
                op: op.as_str(),
                left_type: left.eval_type,
                right_type: right.eval_type,
                span,
            },
        )?;

        Ok(TypedExpr::new(
            TypedExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            eval_type,
            span,
            scope,
        ))
    }

    /// Type checks a function call.
    ///
    /// The callee must resolve to a function symbol through the scope chain.
    /// Each argument is converted to its parameter's type.
    fn check_call(
        &mut self,
        name: &Token,
        args: &[Expr],
        span: Span,
        scope: ScopeId,
    ) -> CheckResult<TypedExpr> {
        let (declared_in, signature) = match self.symbols.resolve(scope, &name.text) {
            Some((
                declared_in,
                Symbol {
                    kind: SymbolKind::Function(signature),
                    ..
                },
            )) => (declared_in, signature.clone()),
            Some((_, other)) => {
                return Err(SemanticError::NotCallable {
                    name: name.text.clone(),
                    found: other.kind.describe(),
                    span: name.span,
                });
            }
            None => {
                return Err(SemanticError::UndefinedFunction {
                    name: name.text.clone(),
                    span: name.span,
                });
            }
        };

        if args.len() != signature.params.len() {
            return Err(SemanticError::ArgumentCountMismatch {
                name: name.text.clone(),
                expected: signature.params.len(),
                found: args.len(),
                span,
            });
        }

        let mut typed_args = Vec::with_capacity(args.len());
        for (i, (arg, param)) in args.iter().zip(&signature.params).enumerate() {
            let typed = self.check_expr(arg, scope)?;
            if !typed.eval_type.is_convertible_to(param.eval_type) {
                return Err(SemanticError::ArgumentTypeMismatch {
                    name: name.text.clone(),
                    position: i + 1,
                    expected: param.eval_type,
                    found: typed.eval_type,
                    span: typed.span,
                });
            }
            typed_args.push(typed.convert_to(param.eval_type));
        }

        Ok(TypedExpr::new(
            TypedExprKind::Call {
                name: name.text.clone(),
                function: signature.id,
                declared_in,
                args: typed_args,
            },
            signature.return_type,
            span,
            scope,
        ))
    }
}

/// Decodes a literal token into its value and type.
fn decode_literal(token: &Token) -> CheckResult<(TypedExprKind, EvalType)> {
    let out_of_range = || SemanticError::LiteralOutOfRange {
        text: token.text.clone(),
        span: token.span,
    };

    match token.kind {
        TokenKind::BoolLiteral => Ok((
            TypedExprKind::BoolLiteral(token.text == "true"),
            EvalType::Bool,
        )),
        TokenKind::IntLiteral => {
            let value: i64 = token.text.parse().map_err(|_| out_of_range())?;
            Ok((TypedExprKind::IntLiteral(value), EvalType::Int))
        }
        TokenKind::FloatLiteral => {
            let value: f64 = token.text.parse().map_err(|_| out_of_range())?;
            if !value.is_finite() {
                return Err(out_of_range());
            }
            Ok((TypedExprKind::FloatLiteral(value), EvalType::Float))
        }
        TokenKind::StringLiteral => {
            let inner = token
                .text
                .strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
                .unwrap_or(&token.text);
            Ok((
                TypedExprKind::StringLiteral(inner.to_string()),
                EvalType::String,
            ))
        }
        _ => Err(out_of_range()),
    }
}
