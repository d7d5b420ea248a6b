use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("stalg-{prefix}-{}-{nanos}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn stalg(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stalg"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run stalg")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const GOOD_METHOD: &str = "METHOD Scale : REAL
VAR_INPUT raw : INT; END_VAR
Scale := INT_TO_REAL(raw) * 0.5;
END_METHOD
";

#[test]
fn check_clean_file_succeeds() {
    let dir = unique_temp_dir("clean");
    std::fs::write(dir.join("scale.st"), GOOD_METHOD).unwrap();

    let output = stalg(&dir, &["check"]);
    assert!(
        output.status.success(),
        "stdout:\n{}\nstderr:\n{}",
        stdout(&output),
        stderr(&output)
    );
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Checked 1 file(s), no errors"));
}

#[test]
fn check_reports_positions_and_fails() {
    let dir = unique_temp_dir("errors");
    std::fs::write(dir.join("bad.st"), "ALGORITHM a\nx := ;\nEND_ALGORITHM\n").unwrap();

    let output = stalg(&dir, &["check", "bad.st", "--color", "never"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "bad.st:2:6: error[E001]: expected expression, found ';'\n"
    );
}

#[test]
fn check_json_lines() {
    let dir = unique_temp_dir("json");
    std::fs::write(dir.join("expr.st"), "a +").unwrap();

    let output = stalg(&dir, &["check", "expr.st", "--entry", "expression", "--format", "json"]);
    assert_eq!(output.status.code(), Some(1));
    let line = stdout(&output);
    let record: serde_json::Value = serde_json::from_str(line.trim()).expect("one JSON object");
    assert_eq!(record["code"], "E003");
    assert_eq!(record["line"], 1);
    assert_eq!(record["column"], 4);
}

#[test]
fn config_file_selects_entry() {
    let dir = unique_temp_dir("config");
    std::fs::write(dir.join("body.st"), "x := 1; y := x * 2;").unwrap();
    std::fs::write(dir.join("stalg.toml"), "[parse]\nentry = \"statements\"\n").unwrap();

    let output = stalg(&dir, &["check", "body.st"]);
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
}

#[test]
fn invalid_config_exits_with_two() {
    let dir = unique_temp_dir("bad-config");
    std::fs::write(dir.join("stalg.toml"), "[parse]\nmode = \"fast\"\n").unwrap();

    let output = stalg(&dir, &["check"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalid config"));
}

#[test]
fn missing_file_exits_with_two() {
    let dir = unique_temp_dir("missing");
    let output = stalg(&dir, &["check", "nope.st"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("failed to read 'nope.st'"));
}

#[test]
fn dump_prints_json_tree() {
    let dir = unique_temp_dir("dump");
    std::fs::write(dir.join("scale.st"), GOOD_METHOD).unwrap();

    let output = stalg(&dir, &["dump", "scale.st", "--entry", "method", "--compact"]);
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    let tree: serde_json::Value = serde_json::from_str(stdout(&output).trim()).expect("JSON tree");
    assert_eq!(tree["name"]["text"], "Scale");
    assert_eq!(tree["body"]["statements"].as_array().map(Vec::len), Some(1));
}

#[test]
fn tokens_lists_non_trivia() {
    let dir = unique_temp_dir("tokens");
    std::fs::write(dir.join("t.st"), "x := 1; (* c *)").unwrap();

    let output = stalg(&dir, &["tokens", "t.st"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert_eq!(text.lines().count(), 4);
    assert!(text.starts_with("Ident"));
    assert!(!text.contains("BlockComment"));
}
