//! Integration tests for the `jsonast` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the format,
//! validate, and stats subcommands through the actual binary, including
//! stdin/stdout piping, file I/O, error reporting, and the global flags.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the sample.json fixture.
fn sample_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.json")
}

/// Helper: a scratch file path unique to one test.
fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("jsonast-cli-{}-{name}", std::process::id()))
}

fn jsonast() -> Command {
    Command::cargo_bin("jsonast").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Format subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn format_stdin_pretty_by_default() {
    jsonast()
        .arg("format")
        .write_stdin(r#"{"a":[1,2],"b":{}}"#)
        .assert()
        .success()
        .stdout("{\n  \"a\": [\n    1,\n    2\n  ],\n  \"b\": {}\n}\n");
}

#[test]
fn format_compact() {
    jsonast()
        .args(["format", "--compact"])
        .write_stdin("{ \"a\" : [ 1 , 2.50 ] ,\n \"b\" : null }")
        .assert()
        .success()
        .stdout("{\"a\":[1,2.50],\"b\":null}\n");
}

#[test]
fn format_escapes_non_ascii() {
    jsonast()
        .args(["format", "--compact"])
        .write_stdin("[\"caf\u{e9}\"]")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"caf\u00e9"#));
}

#[test]
fn format_file_to_file() {
    let output_path = temp_path("format-output.json");
    let _ = std::fs::remove_file(&output_path);

    jsonast()
        .args(["format", "--compact", "-i", sample_json_path(), "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout("");

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    assert!(content.starts_with(r#"{"name":"Alice","age":30,"balance":1024.50,"#));
    let reparsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(reparsed["address"]["city"], "Paris");

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn format_output_is_stable() {
    let first = jsonast()
        .args(["format", "-i", sample_json_path()])
        .output()
        .unwrap();
    assert!(first.status.success());

    jsonast()
        .arg("format")
        .write_stdin(first.stdout.clone())
        .assert()
        .success()
        .stdout(String::from_utf8(first.stdout).unwrap());
}

#[test]
fn format_invalid_json_fails() {
    jsonast()
        .arg("format")
        .write_stdin("[1, 2,]")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Failed to parse stdin"))
        .stderr(predicate::str::contains("unexpected token at position 6"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Validate subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn validate_accepts_valid_file() {
    jsonast()
        .args(["validate", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout("valid\n");
}

#[test]
fn validate_rejects_scalar_root() {
    jsonast()
        .arg("validate")
        .write_stdin("42")
        .assert()
        .failure()
        .stderr(predicate::str::contains("position 0"));
}

#[test]
fn validate_reports_unterminated_string() {
    jsonast()
        .arg("validate")
        .write_stdin(r#"["abc"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected end of input"));
}

#[test]
fn validate_rejects_invalid_utf8() {
    jsonast()
        .arg("validate")
        .write_stdin(&b"[\"\xff\"]"[..])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UTF-8"));
}

#[test]
fn validate_missing_file_fails() {
    jsonast()
        .args(["validate", "-i", "/nonexistent/jsonast/input.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Stats subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn stats_from_file() {
    jsonast()
        .args(["stats", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("objects:    2"))
        .stdout(predicate::str::contains("arrays:     1"))
        .stdout(predicate::str::contains("members:    9"))
        .stdout(predicate::str::contains("strings:    3"))
        .stdout(predicate::str::contains("integers:   4"))
        .stdout(predicate::str::contains("decimals:   1"))
        .stdout(predicate::str::contains("booleans:   1"))
        .stdout(predicate::str::contains("nulls:      1"))
        .stdout(predicate::str::contains("max depth:  2"));
}

#[test]
fn stats_empty_array() {
    jsonast()
        .arg("stats")
        .write_stdin("[]")
        .assert()
        .success()
        .stdout(predicate::str::contains("arrays:     1"))
        .stdout(predicate::str::contains("max depth:  1"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Global flags
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn max_depth_limits_nesting() {
    jsonast()
        .args(["--max-depth", "2", "validate"])
        .write_stdin("[[[]]]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nesting"));

    jsonast()
        .args(["validate", "--max-depth", "3"])
        .write_stdin("[[[]]]")
        .assert()
        .success();
}

#[test]
fn verbose_logs_to_stderr() {
    jsonast()
        .args(["-v", "validate"])
        .write_stdin("{}")
        .assert()
        .success()
        .stdout("valid\n")
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn quiet_by_default() {
    jsonast()
        .arg("validate")
        .write_stdin("{}")
        .assert()
        .success()
        .stderr("");
}

// ─────────────────────────────────────────────────────────────────────────────
// Edge cases
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn large_input_roundtrip() {
    let items: Vec<String> = (0..2_000)
        .map(|i| format!(r#"{{"id":{i},"label":"item {i}","ratio":0.{i}}}"#))
        .collect();
    let input = format!("[{}]", items.join(","));

    jsonast()
        .args(["format", "--compact"])
        .write_stdin(input.clone())
        .assert()
        .success()
        .stdout(format!("{input}\n"));
}

#[test]
fn help_flag_shows_usage() {
    jsonast()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("format"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn unknown_subcommand_fails() {
    jsonast().arg("nonexistent").assert().failure();
}

#[test]
fn missing_subcommand_fails() {
    jsonast().assert().failure();
}
