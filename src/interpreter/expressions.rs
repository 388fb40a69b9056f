//! Expression evaluation.

use crate::ast::{BinaryOp, Span, UnaryOp};
use crate::interpreter::{EvalResult, Interpreter, RuntimeError, StatementResult, Value, operators};
use crate::semantic::{
    EvalType, FunctionId, ScopeId, TypedExpr, TypedExprKind, TypedStatementKind,
};
use crate::stack::ensure_sufficient_stack;

impl<'a> Interpreter<'a> {
    /// Evaluates an expression to a value.
    pub(crate) fn eval(&mut self, expr: &'a TypedExpr) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.eval_inner(expr))
    }

    fn eval_inner(&mut self, expr: &'a TypedExpr) -> EvalResult<Value> {
        match &expr.kind {
            TypedExprKind::BoolLiteral(b) => Ok(Value::Bool(*b)),
            TypedExprKind::IntLiteral(i) => Ok(Value::Int(*i)),
            TypedExprKind::FloatLiteral(x) => Ok(Value::Float(*x)),
            TypedExprKind::StringLiteral(s) => Ok(Value::Str(s.clone())),

            TypedExprKind::Variable { name, declared_in } => {
                match self.env.get(*declared_in, name) {
                    Some(Some(value)) => Ok(value.clone()),
                    Some(None) => Err(RuntimeError::UninitializedVariable {
                        name: name.clone(),
                        span: expr.span,
                    }),
                    None => Err(RuntimeError::UndefinedVariable {
                        name: name.clone(),
                        span: expr.span,
                    }),
                }
            }

            TypedExprKind::Grouped(inner) => self.eval(inner),

            TypedExprKind::Unary { op, operand } => match op {
                UnaryOp::Negate => {
                    let value = self.eval(operand)?;
                    operators::negate(value, expr.span)
                }
                UnaryOp::Not => Ok(Value::Bool(!self.eval_bool(operand, op.as_str())?)),
            },

            TypedExprKind::Binary { left, op, right } => {
                self.eval_binary(left, *op, right, expr.span)
            }

            TypedExprKind::Call {
                name,
                function,
                declared_in,
                args,
            } => self.eval_call(name, *function, *declared_in, args, expr.span),

            TypedExprKind::Convert(inner) => self.eval_as(inner, expr.eval_type),
        }
    }

    /// Evaluates `expr` and converts the result to `target`.
    pub(crate) fn eval_as(&mut self, expr: &'a TypedExpr, target: EvalType) -> EvalResult<Value> {
        let value = self.eval(expr)?;
        let from = value.eval_type();
        value
            .convert(target)
            .ok_or(RuntimeError::InvalidConversion {
                from,
                to: target,
                span: expr.span,
            })
    }

    /// Evaluates an operand of `op` that must be bool-convertible.
    fn eval_bool(&mut self, expr: &'a TypedExpr, op: &'static str) -> EvalResult<bool> {
        let value = self.eval(expr)?;
        value.truthy().ok_or(RuntimeError::InvalidOperands {
            op,
            operand_type: value.eval_type(),
            span: expr.span,
        })
    }

    fn eval_binary(
        &mut self,
        left: &'a TypedExpr,
        op: BinaryOp,
        right: &'a TypedExpr,
        span: Span,
    ) -> EvalResult<Value> {
        match op {
            BinaryOp::And => {
                let value = self.eval_bool(left, op.as_str())? && self.eval_bool(right, op.as_str())?;
                Ok(Value::Bool(value))
            }
            BinaryOp::Or => {
                let value = self.eval_bool(left, op.as_str())? || self.eval_bool(right, op.as_str())?;
                Ok(Value::Bool(value))
            }
            _ => {
                let operand_type = EvalType::operand_type(op, left.eval_type, right.eval_type)
                    .ok_or(RuntimeError::InvalidOperands {
                        op: op.as_str(),
                        operand_type: left.eval_type,
                        span,
                    })?;
                let left = self.eval_as(left, operand_type)?;
                let right = self.eval_as(right, operand_type)?;
                operators::binary(op, left, right, span)
            }
        }
    }

    /// Calls function `id`, bound in the frame running `declared_in`.
    ///
    /// Arguments are evaluated in the caller's frame. The callee runs in a
    /// new frame whose parent is the frame the function was declared in.
    fn eval_call(
        &mut self,
        name: &str,
        id: FunctionId,
        declared_in: ScopeId,
        args: &'a [TypedExpr],
        span: Span,
    ) -> EvalResult<Value> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval(arg)?);
        }

        let (function, frame) =
            self.env
                .lookup_function(declared_in, id)
                .ok_or_else(|| RuntimeError::UndefinedFunction {
                    name: name.to_string(),
                    span,
                })?;

        if self.call_depth >= self.config.max_call_depth {
            return Err(RuntimeError::RecursionLimit {
                name: name.to_string(),
                limit: self.config.max_call_depth,
                span,
            });
        }

        log::debug!("call `{}` at depth {}", name, self.call_depth + 1);
        self.call_depth += 1;
        let mark = self.env.push_frame(frame, function.scope);
        for (param, value) in function.params.iter().zip(values) {
            self.env.declare(&param.name, Some(value));
        }

        let body = &function.body;
        let result = match &body.kind {
            TypedStatementKind::Block {
                statements,
                creates_scope: false,
                ..
            } => self.exec_statements(statements),
            _ => self.exec(body),
        };

        self.env.pop_frame(mark);
        self.call_depth -= 1;

        match result? {
            StatementResult::Return(value) => Ok(value),
            _ if function.return_type == EvalType::Void => Ok(Value::Void),
            _ => Err(RuntimeError::MissingReturnValue {
                name: name.to_string(),
                expected: function.return_type,
                span,
            }),
        }
    }
}
