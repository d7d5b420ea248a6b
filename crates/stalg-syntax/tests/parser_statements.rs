mod common;
use common::*;

fn call_target(source: &str) -> Expr {
    match statement(source).kind {
        StmtKind::Call(expr) => expr,
        other => panic!("expected a call, got {other:?}"),
    }
}

fn labels(arm: &CaseArm) -> Vec<String> {
    arm.labels.iter().map(sexpr).collect()
}

// Assignment versus call
#[test]
fn test_assignment() {
    let stmt = statement("x := 5;");
    let StmtKind::Assignment { left, right } = stmt.kind else {
        panic!("expected an assignment");
    };
    assert_eq!(sexpr(&left), "x");
    assert_eq!(sexpr(&right), "5");
}

#[test]
fn test_call_statement() {
    let stmt = statement("x();");
    let StmtKind::Call(call) = stmt.kind else {
        panic!("expected a call");
    };
    assert_eq!(sexpr(&call), "(call x)");
}

#[test]
fn test_member_assignment_is_one_statement() {
    let stmt = statement("x.y := 5;");
    let StmtKind::Assignment { left, .. } = stmt.kind else {
        panic!("expected an assignment");
    };
    assert_eq!(sexpr(&left), "(. x y)");
}

#[test]
fn test_assignment_targets() {
    let targets: Vec<_> = statements(
        "a[i, j] := 1; s.f.%X2 := TRUE; THIS.count := THIS.count + 1; fb.out.x := y;",
    )
    .into_iter()
    .map(|stmt| match stmt.kind {
        StmtKind::Assignment { left, .. } => sexpr(&left),
        other => panic!("expected an assignment, got {other:?}"),
    })
    .collect();

    assert_eq!(
        targets,
        vec!["([] a i j)", "(.%X (. s f) 2)", "(. THIS count)", "(. (. fb out) x)"]
    );
}

#[test]
fn test_call_statements_with_named_arguments() {
    let stmt = statement("timer(IN := start, PT := T#5s, Q => done, NOT busy => idle);");
    let StmtKind::Call(call) = stmt.kind else {
        panic!("expected a call");
    };
    assert_eq!(
        sexpr(&call),
        "(call timer (:= IN start) (:= PT T#5s) (=> Q done) (NOT=> busy idle))"
    );
    assert_eq!(sexpr(&call_target("SUPER.Reset();")), "(call (. SUPER Reset))");
}

#[test]
fn test_bare_name_is_a_call_statement() {
    let stmt = statement("fb;");
    assert!(matches!(stmt.kind, StmtKind::Call(Expr { kind: ExprKind::Name(_), .. })));
}

#[test]
fn test_call_result_on_the_right() {
    let stmt = statement("y := f(1, 2) + g();");
    let StmtKind::Assignment { right, .. } = stmt.kind else {
        panic!("expected an assignment");
    };
    assert_eq!(sexpr(&right), "(+ (call f 1 2) (call g))");
}

// Simple statements
#[test]
fn test_keyword_statements() {
    let kinds: Vec<_> = statements("RETURN; EXIT; CONTINUE; ;")
        .into_iter()
        .map(|stmt| stmt.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![StmtKind::Return, StmtKind::Exit, StmtKind::Continue, StmtKind::Nop]
    );
}

// IF
#[test]
fn test_if_elsif_else() {
    let stmt = statement(
        "IF a THEN x := 1; ELSIF b THEN x := 2; ELSIF c THEN x := 3; y := 0; ELSE x := 4; END_IF;",
    );
    let StmtKind::If {
        condition,
        then_branch,
        elsif_branches,
        else_branch,
    } = stmt.kind
    else {
        panic!("expected IF");
    };

    assert_eq!(sexpr(&condition), "a");
    assert_eq!(then_branch.len(), 1);
    assert_eq!(elsif_branches.len(), 2);
    assert_eq!(sexpr(&elsif_branches[1].condition), "c");
    assert_eq!(elsif_branches[1].body.len(), 2);
    assert_eq!(else_branch.map(|body| body.len()), Some(1));
}

#[test]
fn test_if_without_else_and_empty_branches() {
    let stmt = statement("IF x > 0 THEN END_IF");
    let StmtKind::If {
        then_branch,
        elsif_branches,
        else_branch,
        ..
    } = stmt.kind
    else {
        panic!("expected IF");
    };
    assert!(then_branch.is_empty());
    assert!(elsif_branches.is_empty());
    assert!(else_branch.is_none());
}

// CASE
#[test]
fn test_case_arms_and_else() {
    let stmt = statement(
        "CASE state OF
            0: x := 1;
            1, 2: x := 2; y := 3;
            3..5, 10: ;
        ELSE
            x := 0;
        END_CASE",
    );
    let StmtKind::Case {
        selector,
        arms,
        else_branch,
    } = stmt.kind
    else {
        panic!("expected CASE");
    };

    assert_eq!(sexpr(&selector), "state");
    assert_eq!(arms.len(), 3);
    assert_eq!(labels(&arms[0]), vec!["0"]);
    assert_eq!(labels(&arms[1]), vec!["1", "2"]);
    assert_eq!(arms[1].body.len(), 2);
    assert_eq!(labels(&arms[2]), vec!["(.. 3 5)", "10"]);
    assert_eq!(arms[2].body[0].kind, StmtKind::Nop);
    assert_eq!(else_branch.map(|body| body.len()), Some(1));
}

#[test]
fn test_case_arm_bodies_stop_at_the_next_label() {
    let stmt = statement(
        "CASE mode OF
            Mode#Idle: f(a := 1); g();
            Mode#Run, Mode#Hold: IF x THEN y := 1; END_IF
            -1: z := f(a) + 1;
        END_CASE",
    );
    let StmtKind::Case { arms, .. } = stmt.kind else {
        panic!("expected CASE");
    };

    assert_eq!(arms.len(), 3);
    assert_eq!(labels(&arms[0]), vec!["Mode#Idle"]);
    assert_eq!(arms[0].body.len(), 2);
    assert_eq!(labels(&arms[1]), vec!["Mode#Run", "Mode#Hold"]);
    assert!(matches!(arms[1].body[0].kind, StmtKind::If { .. }));
    assert_eq!(labels(&arms[2]), vec!["(- 1)"]);
}

// Loops
#[test]
fn test_for_loop() {
    let stmt = statement("FOR i := 1 TO 10 BY 2 DO sum := sum + i; END_FOR");
    let StmtKind::For {
        var,
        from,
        to,
        by,
        body,
    } = stmt.kind
    else {
        panic!("expected FOR");
    };
    assert_eq!(var.text, "i");
    assert_eq!(sexpr(&from), "1");
    assert_eq!(sexpr(&to), "10");
    assert_eq!(by.as_ref().map(sexpr).as_deref(), Some("2"));
    assert_eq!(body.len(), 1);

    let stmt = statement("FOR i := n - 1 TO 0 DO END_FOR;");
    assert!(matches!(stmt.kind, StmtKind::For { by: None, .. }));
}

#[test]
fn test_while_loop() {
    let stmt = statement(
        "WHILE x < 10 DO
            x := x + 1;
            IF x = 5 THEN EXIT; END_IF
            CONTINUE;
        END_WHILE",
    );
    let StmtKind::While { condition, body } = stmt.kind else {
        panic!("expected WHILE");
    };
    assert_eq!(sexpr(&condition), "(< x 10)");
    assert_eq!(body.len(), 3);
    assert_eq!(body[2].kind, StmtKind::Continue);
}

#[test]
fn test_repeat_loop() {
    let stmt = statement("REPEAT x := x - 1; UNTIL x <= 0 END_REPEAT;");
    let StmtKind::Repeat { body, until } = stmt.kind else {
        panic!("expected REPEAT");
    };
    assert_eq!(body.len(), 1);
    assert_eq!(sexpr(&until), "(<= x 0)");
}

#[test]
fn test_nested_blocks() {
    let parsed = statements(
        "FOR i := 0 TO 9 DO
            WHILE busy DO
                REPEAT
                    CASE i OF
                        1: IF a THEN RETURN; END_IF
                    END_CASE
                UNTIL done END_REPEAT
            END_WHILE
        END_FOR
        x := 1;",
    );
    assert_eq!(parsed.len(), 2);
    assert!(matches!(parsed[1].kind, StmtKind::Assignment { .. }));
}

#[test]
fn test_lowercase_keywords() {
    let parsed = statements("if a then b := 1; elsif c then b := 2; end_if for i := 1 to 2 do end_for");
    assert_eq!(parsed.len(), 2);
}

#[test]
fn test_deeply_nested_blocks_are_rejected() {
    let depth = 3000;
    let source = format!("{}x := 1;{}", "IF a THEN ".repeat(depth), " END_IF".repeat(depth));
    let parse = on_large_stack(move || parse_statements(source.as_str()));
    assert!(parse.tree().is_none());
    assert_eq!(
        diags(&parse),
        "error[E001]: statement nested too deeply (at 1280..1282)"
    );
}

#[test]
fn test_nested_blocks_below_the_limit() {
    let depth = 100;
    let source = format!("{}x := 1;{}", "WHILE a DO ".repeat(depth), " END_WHILE".repeat(depth));
    let parse = on_large_stack(move || parse_statements(source.as_str()));
    assert!(parse.ok(), "{}", diags(&parse));
}
