// integration tests for the line-oriented check command

use crate::common::*;
use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

const SAMPLE: &str = "\
true && false
# comment lines and blank lines are skipped

( true
true XOR false
!(false || false)   
";

fn write_sample(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("cases.txt");
    fs::write(&path, SAMPLE).unwrap();
    path
}

#[test]
fn test_check_text_report() {
    let dir = TempDir::new().unwrap();
    let path = write_sample(&dir);

    let output = run_bexpr(&["--no-json", "check", path.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(
        stdout.contains("[ 1] Tokens: 'true', '&&', 'false'\n[ 1] OK: false"),
        "{}",
        stdout
    );
    assert!(stdout.contains("[ 4] FAIL: unmatched parentheses"), "{}", stdout);
    assert!(
        stdout.contains("[ 5] Parse error: invalid token 'XOR'"),
        "{}",
        stdout
    );
    assert!(stdout.contains("[ 6] OK: true"), "{}", stdout);
    assert!(stdout.contains("2 passed, 2 failed"), "{}", stdout);
}

#[test]
fn test_check_strict_fails_on_bad_line() {
    let dir = TempDir::new().unwrap();
    let path = write_sample(&dir);

    let output = run_bexpr(&["--no-json", "check", "--strict", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_check_strict_from_config() {
    let dir = TempDir::new().unwrap();
    let path = write_sample(&dir);
    let config_path = dir.path().join("config.json");
    fs::write(&config_path, r#"{ "settings": { "strict": true } }"#).unwrap();

    let output = run_bexpr_with_config(&config_path, &["--quiet", "check", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stdout_of(&output).is_empty());
}

#[test]
fn test_check_strict_passes_clean_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clean.txt");
    fs::write(&path, "true\n!0\n1 || 0\n").unwrap();

    let output = run_bexpr(&["--no-json", "check", "--strict", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).contains("3 passed, 0 failed"));
}

#[test]
fn test_check_json_report() {
    let dir = TempDir::new().unwrap();
    let path = write_sample(&dir);

    let output = run_bexpr(&["--json", "check", path.to_str().unwrap()]);

    assert!(output.status.success());
    let json = json_of(&output);
    let result = &json["result"];
    assert_eq!(result["passed"], 2);
    assert_eq!(result["failed"], 2);

    let lines = result["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0]["result"], false);
    assert_eq!(lines[0]["infix"][1], "&&");
    assert!(lines[2].get("infix").is_none());
    assert_eq!(lines[1]["error"]["code"], "UNMATCHED_PARENS");
    assert_eq!(lines[2]["error"]["code"], "INVALID_TOKEN");
    assert_eq!(lines[3]["expression"], "!(false || false)");
}

#[test]
fn test_check_reads_stdin() {
    let mut child = Command::new(bexpr_binary_path())
        .args(["--no-json", "check", "-"])
        .env("BEXPR_CONFIG", "/nonexistent/bexpr-tests/config.json")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run bexpr");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"!true\n")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("[ 1] OK: false"));
}

#[test]
fn test_check_missing_file() {
    let output = run_bexpr(&["--no-json", "check", "/nonexistent/cases.txt"]);

    assert_eq!(output.status.code(), Some(6));
    assert!(stderr_of(&output).contains("Failed to read"));
}
