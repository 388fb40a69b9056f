//! Source reconstruction.
//!
//! Regenerates program text from the parse tree. The output is not
//! byte-identical to the input (whitespace is normalized: two spaces per
//! indent level, one statement per line) but lexes to the same tokens.

use std::fmt::{self, Write};

use super::{Expr, ExprKind, Program, Statement, StatementKind};

fn indentation(level: usize) -> String {
    "  ".repeat(level)
}

impl Program {
    /// Regenerates the source text of the whole program.
    ///
    /// ```
    /// use clite::parser::parse;
    ///
    /// let program = parse("int   a=1 ;").unwrap();
    /// assert_eq!(program.to_source(), "int a = 1;\n");
    /// ```
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        for statement in &self.statements {
            out.push_str(&statement.to_source(0));
            out.push('\n');
        }
        out
    }
}

impl Statement {
    /// Regenerates the source text of this statement at the given indent level.
    ///
    /// The result never ends with a newline.
    pub fn to_source(&self, indent: usize) -> String {
        let pad = indentation(indent);
        match &self.kind {
            StatementKind::Block { statements, .. } => {
                let mut out = format!("{pad}{{\n");
                for statement in statements {
                    out.push_str(&statement.to_source(indent + 1));
                    out.push('\n');
                }
                out.push_str(&pad);
                out.push('}');
                out
            }
            StatementKind::Return { value, .. } => match value {
                Some(value) => format!("{pad}return {};", value.to_source()),
                None => format!("{pad}return;"),
            },
            StatementKind::VariableDeclaration {
                type_name,
                name,
                initializer,
                ..
            } => match initializer {
                Some(init) => format!(
                    "{pad}{} {} = {};",
                    type_name.text,
                    name.text,
                    init.value.to_source()
                ),
                None => format!("{pad}{} {};", type_name.text, name.text),
            },
            StatementKind::Assignment { name, value, .. } => {
                format!("{pad}{} = {};", name.text, value.to_source())
            }
            StatementKind::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                let mut out = format!(
                    "{pad}if ({})\n{}",
                    condition.to_source(),
                    body_source(then_branch, indent)
                );
                if let Some(else_branch) = else_branch {
                    // `else` directly followed by `if` stays on one line.
                    if matches!(else_branch.body.kind, StatementKind::If { .. }) {
                        let _ = write!(out, "\n{pad}else {}", else_branch.body.to_source(indent).trim_start());
                    } else {
                        let _ = write!(out, "\n{pad}else\n{}", body_source(&else_branch.body, indent));
                    }
                }
                out
            }
            StatementKind::While {
                condition, body, ..
            } => format!(
                "{pad}while ({})\n{}",
                condition.to_source(),
                body_source(body, indent)
            ),
            StatementKind::FunctionDeclaration(function) => {
                let params = function
                    .params
                    .iter()
                    .map(|p| format!("{} {}", p.type_name.text, p.name.text))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "{pad}{} {}({})\n{}",
                    function.return_type.text,
                    function.name.text,
                    params,
                    body_source(&function.body, indent)
                )
            }
            StatementKind::Break { .. } => format!("{pad}break;"),
            StatementKind::Continue { .. } => format!("{pad}continue;"),
            StatementKind::Expression { expr, .. } => format!("{pad}{};", expr.to_source()),
        }
    }
}

/// Blocks line up with their header; any other body is indented one level.
fn body_source(body: &Statement, indent: usize) -> String {
    if body.is_block() {
        body.to_source(indent)
    } else {
        body.to_source(indent + 1)
    }
}

impl Expr {
    /// Regenerates the source text of this expression.
    pub fn to_source(&self) -> String {
        match &self.kind {
            ExprKind::Literal(token) | ExprKind::Identifier(token) => token.text.clone(),
            ExprKind::Grouped { inner, .. } => format!("({})", inner.to_source()),
            ExprKind::Unary { op, operand, .. } => format!("{}{}", op.as_str(), operand.to_source()),
            ExprKind::Binary {
                left, op, right, ..
            } => format!("{} {} {}", left.to_source(), op.as_str(), right.to_source()),
            ExprKind::Call { name, args, .. } => {
                let args = args
                    .iter()
                    .map(Expr::to_source)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}({})", name.text, args)
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_source())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_source(0))
    }
}
