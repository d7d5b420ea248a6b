mod common;
use common::*;
use text_size::{TextRange, TextSize};

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end))
}

/// Source text covered by `range`.
fn slice(source: &str, range: TextRange) -> &str {
    &source[usize::from(range.start())..usize::from(range.end())]
}

#[test]
fn test_method_spans_nest() {
    let source = r"
METHOD Update : BOOL
VAR_INPUT
    setpoint : REAL := 0.0;
    limits : ARRAY [0..1] OF REAL := [2(0.0)];
END_VAR
VAR_TEMP
    cfg : Config := (gain := 1.5, band := [1, 2]);
    i : INT;
END_VAR
FOR i := 0 TO 1 BY 1 DO
    IF limits[i] > setpoint THEN
        out.%X0 := TRUE;
    ELSIF NOT enabled THEN
        EXIT;
    ELSE
        CASE mode OF
            1, 2..3: Update := ctl.Step(x := setpoint, done => ok);
        ELSE
            ;
        END_CASE
    END_IF
END_FOR
WHILE busy DO REPEAT n := n - 1; UNTIL n < 0 END_REPEAT END_WHILE
END_METHOD
";
    let parse = parse_method(source);
    assert!(parse.ok(), "{}", diags(&parse));
    let method = parse.tree().unwrap();

    check_body_spans(method.range, &method.body);
    assert_eq!(slice(source, method.name.range), "Update");
    assert!(slice(source, method.range).starts_with("METHOD"));
    assert!(slice(source, method.range).ends_with("END_METHOD"));
}

#[test]
fn test_statement_ranges() {
    let source = "x := a + 1;  IF c THEN y(); END_IF;";
    let parsed = statements(source);

    assert_eq!(parsed[0].range, range(0, 11));
    assert_eq!(slice(source, parsed[1].range), "IF c THEN y(); END_IF;");
}

#[test]
fn test_expression_ranges() {
    let source = "a.b[i + 1] * -f(2)";
    let value = expr(source);
    check_expr_spans(&value);
    assert_eq!(value.range, range(0, 18));

    let ExprKind::Binary { left, right, .. } = &value.kind else {
        panic!("expected a binary expression");
    };
    assert_eq!(slice(source, left.range), "a.b[i + 1]");
    assert_eq!(slice(source, right.range), "-f(2)");
}

#[test]
fn test_parenthesized_range_includes_parentheses() {
    let value = expr("  (a)  ");
    assert_eq!(value.range, range(2, 5));
    let ExprKind::Paren(inner) = &value.kind else {
        panic!("expected parentheses");
    };
    assert_eq!(inner.range, range(3, 4));
}

#[test]
fn test_initializer_spans() {
    let source = "x := [1, 3(5, 6), (a := 1)];";
    let parse = parse_initializer_expression_source(source);
    assert!(parse.ok(), "{}", diags(&parse));
    let init = parse.tree().unwrap();

    check_initializer_spans(&init.value);
    assert_eq!(slice(source, init.value.range()), "[1, 3(5, 6), (a := 1)]");
    assert_eq!(slice(source, init.range), "x := [1, 3(5, 6), (a := 1)]");
}

#[test]
fn test_typed_literal_prefix_range() {
    let source = "LREAL#-2.5";
    let ExprKind::Literal(literal) = expr(source).kind else {
        panic!("expected a literal");
    };
    let prefix = literal.type_prefix.unwrap();
    assert_eq!(slice(source, prefix.range), "LREAL");
    assert_eq!(literal.range, range(0, 10));
}

#[test]
fn test_diagnostic_ranges_point_into_source() {
    let source = "x := 1;\ny := ) ;\nz := 3;";
    let parse = parse_statements(source);
    let diagnostic = &parse.diagnostics()[0];
    assert_eq!(slice(source, diagnostic.range), ")");
}
