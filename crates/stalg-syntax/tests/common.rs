//! Shared helpers for parser tests.
#![allow(dead_code, unused_imports)]

pub use stalg_syntax::ast::*;
pub use stalg_syntax::{
    parse_algorithm, parse_expression_source, parse_initializer_expression_source, parse_method,
    parse_source, parse_statements, Diagnostic, DiagnosticCode, Parse,
};
use text_size::TextRange;

/// Parses an expression that must be free of errors.
pub fn expr(source: &str) -> Expr {
    let parse = parse_expression_source(source);
    assert!(parse.ok(), "{source:?}:\n{}", render_diagnostics(parse.diagnostics()));
    parse.into_parts().0.unwrap()
}

/// Parses an expression and renders it as an s-expression.
pub fn sexp(source: &str) -> String {
    sexpr(&expr(source))
}

/// Parses a statement list that must be free of errors.
pub fn statements(source: &str) -> Vec<Stmt> {
    let parse = parse_statements(source);
    assert!(parse.ok(), "{source:?}:\n{}", render_diagnostics(parse.diagnostics()));
    let tree = parse.into_parts().0.unwrap();
    check_stmt_list_spans(tree.range, &tree.statements);
    tree.statements
}

/// Parses a single statement that must be free of errors.
pub fn statement(source: &str) -> Stmt {
    let mut parsed = statements(source);
    assert_eq!(parsed.len(), 1, "{source:?} should hold one statement");
    parsed.remove(0)
}

/// One diagnostic per line, in source order.
pub fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Runs `f` on a thread with an 8 MiB stack, independent of the harness's
/// default thread size.
pub fn on_large_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    std::thread::Builder::new()
        .stack_size(8 * 1024 * 1024)
        .spawn(f)
        .expect("spawn parser thread")
        .join()
        .expect("parser thread panicked")
}

/// Diagnostics of any parse, one per line.
pub fn diags<T>(parse: &Parse<T>) -> String {
    render_diagnostics(parse.diagnostics())
}

/// Renders an expression with explicit structure: `a + b * c` becomes
/// `(+ a (* b c))`.
pub fn sexpr(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Binary { op, left, right } => {
            format!("({} {} {})", op.as_str(), sexpr(left), sexpr(right))
        }
        ExprKind::Unary { op, operand } => format!("({} {})", op.as_str(), sexpr(operand)),
        ExprKind::Member { receiver, member } => format!("(. {} {member})", sexpr(receiver)),
        ExprKind::Partial {
            receiver,
            specifier,
            index,
        } => {
            let specifier = specifier.map_or("%", BitAccess::as_str);
            let index = match index {
                PartialIndex::Constant { value, .. } => value.to_string(),
                PartialIndex::Dynamic(index) => sexpr(index),
            };
            format!("(.{specifier} {} {index})", sexpr(receiver))
        }
        ExprKind::Index { receiver, indices } => {
            let mut out = format!("([] {}", sexpr(receiver));
            for index in indices {
                out.push(' ');
                out.push_str(&sexpr(index));
            }
            out.push(')');
            out
        }
        ExprKind::Call { callee, args } => {
            let mut out = format!("(call {}", sexpr(callee));
            for arg in args {
                out.push(' ');
                out.push_str(&sexpr_arg(arg));
            }
            out.push(')');
            out
        }
        ExprKind::Paren(inner) => format!("(paren {})", sexpr(inner)),
        ExprKind::Name(_) | ExprKind::This | ExprKind::Super | ExprKind::Literal(_) => {
            expr.to_string()
        }
    }
}

fn sexpr_arg(arg: &CallArg) -> String {
    match arg {
        CallArg::Positional(value) => sexpr(value),
        CallArg::NamedInput { param, value, .. } => format!("(:= {param} {})", sexpr(value)),
        CallArg::NamedOutput {
            param,
            negated,
            value,
            ..
        } => {
            let not = if *negated { "NOT" } else { "" };
            format!("({not}=> {param} {})", sexpr(value))
        }
    }
}

// =============================================================================
// Span checks: children lie inside their parent, in order, without overlap.
// =============================================================================

pub fn check_nested(parent: TextRange, children: &[TextRange]) {
    let mut previous_end = parent.start();
    for child in children {
        assert!(
            parent.contains_range(*child),
            "child {child:?} escapes parent {parent:?}"
        );
        assert!(
            child.start() >= previous_end,
            "child {child:?} overlaps its predecessor ending at {previous_end:?}"
        );
        previous_end = child.end();
    }
}

pub fn check_expr_spans(expr: &Expr) {
    let range = expr.range;
    match &expr.kind {
        ExprKind::Binary { left, right, .. } => {
            check_nested(range, &[left.range, right.range]);
            check_expr_spans(left);
            check_expr_spans(right);
        }
        ExprKind::Unary { operand, .. } => {
            check_nested(range, &[operand.range]);
            check_expr_spans(operand);
        }
        ExprKind::Member { receiver, member } => {
            check_nested(range, &[receiver.range, member.range]);
            check_expr_spans(receiver);
        }
        ExprKind::Partial {
            receiver, index, ..
        } => {
            let index_range = match index {
                PartialIndex::Constant { range, .. } => *range,
                PartialIndex::Dynamic(index) => {
                    check_expr_spans(index);
                    index.range
                }
            };
            check_nested(range, &[receiver.range, index_range]);
            check_expr_spans(receiver);
        }
        ExprKind::Index { receiver, indices } => {
            let mut children = vec![receiver.range];
            children.extend(indices.iter().map(|index| index.range));
            check_nested(range, &children);
            check_expr_spans(receiver);
            indices.iter().for_each(check_expr_spans);
        }
        ExprKind::Call { callee, args } => {
            let mut children = vec![callee.range];
            children.extend(args.iter().map(CallArg::range));
            check_nested(range, &children);
            check_expr_spans(callee);
            for arg in args {
                match arg {
                    CallArg::Positional(value) => check_expr_spans(value),
                    CallArg::NamedInput {
                        param,
                        value,
                        range,
                    }
                    | CallArg::NamedOutput {
                        param,
                        value,
                        range,
                        ..
                    } => {
                        check_nested(*range, &[param.range, value.range]);
                        check_expr_spans(value);
                    }
                }
            }
        }
        ExprKind::Paren(inner) => {
            check_nested(range, &[inner.range]);
            check_expr_spans(inner);
        }
        ExprKind::Literal(literal) => {
            assert_eq!(literal.range, range);
            if let Some(prefix) = &literal.type_prefix {
                check_nested(range, &[prefix.range]);
            }
        }
        ExprKind::Name(name) => assert_eq!(name.range, range),
        ExprKind::This | ExprKind::Super => {}
    }
}

pub fn check_stmt_list_spans(parent: TextRange, statements: &[Stmt]) {
    let ranges: Vec<_> = statements.iter().map(|stmt| stmt.range).collect();
    check_nested(parent, &ranges);
    statements.iter().for_each(check_stmt_spans);
}

pub fn check_stmt_spans(stmt: &Stmt) {
    let range = stmt.range;
    match &stmt.kind {
        StmtKind::If {
            condition,
            then_branch,
            elsif_branches,
            else_branch,
        } => {
            let mut children = vec![condition.range];
            children.extend(then_branch.iter().map(|s| s.range));
            for branch in elsif_branches {
                children.push(branch.range);
                let mut inner = vec![branch.condition.range];
                inner.extend(branch.body.iter().map(|s| s.range));
                check_nested(branch.range, &inner);
                check_expr_spans(&branch.condition);
                branch.body.iter().for_each(check_stmt_spans);
            }
            if let Some(else_branch) = else_branch {
                children.extend(else_branch.iter().map(|s| s.range));
                else_branch.iter().for_each(check_stmt_spans);
            }
            check_nested(range, &children);
            check_expr_spans(condition);
            then_branch.iter().for_each(check_stmt_spans);
        }
        StmtKind::Case {
            selector,
            arms,
            else_branch,
        } => {
            let mut children = vec![selector.range];
            for arm in arms {
                children.push(arm.range);
                let mut inner: Vec<_> = arm.labels.iter().map(|l| l.range).collect();
                inner.extend(arm.body.iter().map(|s| s.range));
                check_nested(arm.range, &inner);
                arm.labels.iter().for_each(check_expr_spans);
                arm.body.iter().for_each(check_stmt_spans);
            }
            if let Some(else_branch) = else_branch {
                children.extend(else_branch.iter().map(|s| s.range));
                else_branch.iter().for_each(check_stmt_spans);
            }
            check_nested(range, &children);
            check_expr_spans(selector);
        }
        StmtKind::For {
            var,
            from,
            to,
            by,
            body,
        } => {
            let mut children = vec![var.range, from.range, to.range];
            children.extend(by.iter().map(|by| by.range));
            children.extend(body.iter().map(|s| s.range));
            check_nested(range, &children);
            check_expr_spans(from);
            check_expr_spans(to);
            by.iter().for_each(check_expr_spans);
            body.iter().for_each(check_stmt_spans);
        }
        StmtKind::While { condition, body } => {
            let mut children = vec![condition.range];
            children.extend(body.iter().map(|s| s.range));
            check_nested(range, &children);
            check_expr_spans(condition);
            body.iter().for_each(check_stmt_spans);
        }
        StmtKind::Repeat { body, until } => {
            let mut children: Vec<_> = body.iter().map(|s| s.range).collect();
            children.push(until.range);
            check_nested(range, &children);
            body.iter().for_each(check_stmt_spans);
            check_expr_spans(until);
        }
        StmtKind::Assignment { left, right } => {
            check_nested(range, &[left.range, right.range]);
            check_expr_spans(left);
            check_expr_spans(right);
        }
        StmtKind::Call(call) => {
            check_nested(range, &[call.range]);
            check_expr_spans(call);
        }
        StmtKind::Return | StmtKind::Continue | StmtKind::Exit | StmtKind::Nop => {}
    }
}

pub fn check_initializer_spans(initializer: &Initializer) {
    match initializer {
        Initializer::Elementary(expr) => check_expr_spans(expr),
        Initializer::Array { elements, range } => {
            let children: Vec<_> = elements.iter().map(ArrayInitElement::range).collect();
            check_nested(*range, &children);
            for element in elements {
                match element {
                    ArrayInitElement::Value(value) => check_initializer_spans(value),
                    ArrayInitElement::Repeat {
                        count,
                        values,
                        range,
                    } => {
                        let mut inner = vec![count.range];
                        inner.extend(values.iter().map(Initializer::range));
                        check_nested(*range, &inner);
                        values.iter().for_each(check_initializer_spans);
                    }
                }
            }
        }
        Initializer::Struct { fields, range } => {
            let children: Vec<_> = fields.iter().map(|field| field.range).collect();
            check_nested(*range, &children);
            for field in fields {
                check_nested(field.range, &[field.field.range, field.value.range()]);
                check_initializer_spans(&field.value);
            }
        }
    }
}

pub fn check_body_spans(parent: TextRange, body: &Body) {
    let mut children: Vec<_> = body.declarations.iter().map(|block| block.range).collect();
    children.extend(body.statements.iter().map(|stmt| stmt.range));
    check_nested(parent, &children);

    for block in &body.declarations {
        let ranges: Vec<_> = block.declarations.iter().map(|decl| decl.range).collect();
        check_nested(block.range, &ranges);
        for decl in &block.declarations {
            let mut inner = vec![decl.name.range];
            inner.extend(decl.located_at.iter().map(|at| at.range));
            if let Some(ArraySpec::Ranges(ranges)) = &decl.array_spec {
                for dimension in ranges {
                    inner.push(dimension.range);
                    check_nested(dimension.range, &[dimension.lower.range, dimension.upper.range]);
                }
            }
            inner.push(decl.type_ref.range());
            inner.extend(decl.max_length.iter().map(|len| len.range));
            inner.extend(decl.default_value.iter().map(Initializer::range));
            check_nested(decl.range, &inner);
            decl.default_value.iter().for_each(check_initializer_spans);
        }
    }
    body.statements.iter().for_each(check_stmt_spans);
}
