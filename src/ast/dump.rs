//! Diagnostic tree dump.
//!
//! ```text
//! Program [0 14]
//! └─ VariableDeclaration int a [0 14]
//!    └─ Binary + [8 13]
//!       ├─ Literal 1 [8 9]
//!       └─ Literal 2 [12 13]
//! ```

use super::{Expr, ExprKind, Program, Statement, StatementKind};

/// One line of the dump plus its children.
struct DumpNode {
    label: String,
    children: Vec<DumpNode>,
}

impl DumpNode {
    fn leaf(label: String) -> Self {
        Self {
            label,
            children: Vec::new(),
        }
    }

    fn render(&self, prefix: &str, is_last: bool, is_root: bool, out: &mut String) {
        let child_prefix = if is_root {
            out.push_str(&self.label);
            String::new()
        } else {
            out.push_str(prefix);
            out.push_str(if is_last { "└─ " } else { "├─ " });
            out.push_str(&self.label);
            format!("{prefix}{}", if is_last { "   " } else { "│  " })
        };
        out.push('\n');

        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            child.render(&child_prefix, i + 1 == count, false, out);
        }
    }
}

impl Program {
    /// Renders the parse tree with branch-drawing prefixes, one node per line.
    pub fn dump(&self) -> String {
        let root = DumpNode {
            label: format!("Program {}", self.span()),
            children: self.statements.iter().map(statement_node).collect(),
        };
        let mut out = String::new();
        root.render("", true, true, &mut out);
        out
    }
}

fn statement_node(statement: &Statement) -> DumpNode {
    let span = statement.span;
    let kind = statement.kind_name();
    let (label, children) = match &statement.kind {
        StatementKind::Block { statements, .. } => (
            format!("{kind} {span}"),
            statements.iter().map(statement_node).collect(),
        ),
        StatementKind::Return { value, .. } => (
            format!("{kind} {span}"),
            value.iter().map(expr_node).collect(),
        ),
        StatementKind::VariableDeclaration {
            type_name,
            name,
            initializer,
            ..
        } => (
            format!("{kind} {} {} {span}", type_name.text, name.text),
            initializer.iter().map(|init| expr_node(&init.value)).collect(),
        ),
        StatementKind::Assignment { name, value, .. } => (
            format!("{kind} {} {span}", name.text),
            vec![expr_node(value)],
        ),
        StatementKind::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            let mut children = vec![expr_node(condition), statement_node(then_branch)];
            if let Some(else_branch) = else_branch {
                children.push(statement_node(&else_branch.body));
            }
            (format!("{kind} {span}"), children)
        }
        StatementKind::While {
            condition, body, ..
        } => (
            format!("{kind} {span}"),
            vec![expr_node(condition), statement_node(body)],
        ),
        StatementKind::FunctionDeclaration(function) => {
            let mut children: Vec<DumpNode> = function
                .params
                .iter()
                .map(|p| {
                    DumpNode::leaf(format!(
                        "Parameter {} {} {}",
                        p.type_name.text,
                        p.name.text,
                        p.span()
                    ))
                })
                .collect();
            children.push(statement_node(&function.body));
            (
                format!(
                    "{kind} {} {} {span}",
                    function.return_type.text, function.name.text
                ),
                children,
            )
        }
        StatementKind::Break { .. } | StatementKind::Continue { .. } => {
            (format!("{kind} {span}"), Vec::new())
        }
        StatementKind::Expression { expr, .. } => (format!("{kind} {span}"), vec![expr_node(expr)]),
    };
    DumpNode { label, children }
}

fn expr_node(expr: &Expr) -> DumpNode {
    let span = expr.span;
    let kind = expr.kind_name();
    match &expr.kind {
        ExprKind::Literal(token) | ExprKind::Identifier(token) => {
            DumpNode::leaf(format!("{kind} {} {span}", token.text))
        }
        ExprKind::Grouped { inner, .. } => DumpNode {
            label: format!("{kind} {span}"),
            children: vec![expr_node(inner)],
        },
        ExprKind::Unary { op, operand, .. } => DumpNode {
            label: format!("{kind} {} {span}", op.as_str()),
            children: vec![expr_node(operand)],
        },
        ExprKind::Binary {
            left, op, right, ..
        } => DumpNode {
            label: format!("{kind} {} {span}", op.as_str()),
            children: vec![expr_node(left), expr_node(right)],
        },
        ExprKind::Call { name, args, .. } => DumpNode {
            label: format!("{kind} {} {span}", name.text),
            children: args.iter().map(expr_node).collect(),
        },
    }
}
