//! CLI integration tests for `morny lex`, `morny parse` and `morny demo`.
//!
//! These tests invoke the compiled binary to verify end-to-end behavior.

use std::process::{Command, Output};

fn morny_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_morny-cli"))
}

fn run(args: &[&str]) -> Output {
    morny_bin().args(args).output().expect("run binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn cli_lex_file() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = dir.path().join("simple.morny");
    std::fs::write(&file, "{ foo == 3.5 }\n").expect("write source");

    let output = run(&["lex", file.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "morny lex should succeed, stderr: {}",
        stderr(&output)
    );
    assert_eq!(
        stdout(&output).trim_end(),
        "{, Identifier: foo, Identifier: ==, Double: 3.5, }"
    );
}

#[test]
fn cli_parse_inline_expr() {
    let output = run(&["parse", "-e", "{3}"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim_end(), "[Integer:3]");
}

#[test]
fn cli_parse_reports_diagnostics() {
    let output = run(&["parse", "-e", "foo; (1}"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output).trim_end(), "Identifier:foo");
    assert!(
        stderr(&output).contains("1:8: Required: ), found }"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn cli_lex_reports_invalid_character() {
    let output = run(&["lex", "-e", "a @ b"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output).trim_end(),
        "Identifier: a, Identifier: b"
    );
    assert!(stderr(&output).contains("1:3: Invalid character '@'"));
}

#[test]
fn cli_parse_json() {
    let output = run(&["parse", "-e", "a + b", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let report: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("parse JSON output");
    assert_eq!(report["dump"], "[Identifier:a, Identifier:+, Identifier:b]");
    assert_eq!(report["root"]["Sequence"][2]["Identifier"], "b");
}

#[test]
fn cli_demo() {
    let output = run(&["demo"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(
        out.contains("TOKENS: Double: 3.5346, Float: 34, Int: 36, (, Int: 36, )"),
        "stdout: {}",
        out
    );
    assert!(out.contains("TREE: Double:3.5346"));
    assert!(out.contains("DIAGNOSTIC: 1:8: Required: end of input, found Float: 34"));
}

#[test]
fn cli_missing_file_fails() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let missing = dir.path().join("nope.morny");
    let output = run(&["parse", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to read source file"));
}

#[test]
fn cli_rejects_oversized_source() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = dir.path().join("big.morny");
    std::fs::write(&file, "x ".repeat(600_000)).expect("write source");
    let output = run(&["lex", file.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("exceeds 1MB limit"));
}

#[test]
fn cli_requires_input() {
    let output = run(&["parse"]);
    assert!(!output.status.success());
}
