// integration tests for the config command

use crate::common::*;
use std::fs;
use tempfile::TempDir;

/// helper to run bexpr config command (text output)
fn run_config(args: &[&str], config_path: &std::path::Path) -> std::process::Output {
    // use --no-json to get text output (stdout is piped in tests, which auto-enables JSON)
    let mut cmd_args = vec!["--no-json", "config"];
    cmd_args.extend(args);
    run_bexpr_with_config(config_path, &cmd_args)
}

// ============================================================================
// config show / default / path tests
// ============================================================================

#[test]
fn test_config_show_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");

    let output = run_config(&["show"], &config_path);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(json["settings"]["log_level"], "warn");
    assert_eq!(json["settings"]["suggestions"], true);
    assert_eq!(json["settings"]["fuzzy_threshold"], 2);
    assert_eq!(json["settings"]["strict"], false);
    assert!(!config_path.exists(), "show must not create the file");
}

#[test]
fn test_config_show_invalid_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(&config_path, "{ not json").unwrap();

    let output = run_config(&["show"], &config_path);

    assert_eq!(output.status.code(), Some(5));
    assert!(stderr_of(&output).contains("invalid JSON"));
}

#[test]
fn test_config_default_matches_show() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");

    let shown = run_config(&["show"], &config_path);
    let default = run_config(&["default"], &config_path);

    assert_eq!(stdout_of(&shown), stdout_of(&default));
}

#[test]
fn test_config_path_uses_override() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("custom.json");

    let output = run_config(&["path"], &config_path);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), config_path.to_str().unwrap());
}

#[test]
fn test_config_path_uses_env_var() {
    let output = run_bexpr_with_env(
        &["--no-json", "config", "path"],
        &[("BEXPR_CONFIG", "/tmp/from-env/config.json")],
    );

    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "/tmp/from-env/config.json");
}

// ============================================================================
// config init / set tests
// ============================================================================

#[test]
fn test_config_init_creates_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("nested").join("config.json");

    let output = run_config(&["init"], &config_path);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(config_path.exists());
    assert!(stdout_of(&output).contains("Created"));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(&config_path, r#"{ "settings": { "strict": true } }"#).unwrap();

    let output = run_config(&["init"], &config_path);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr_of(&output).contains("--force"));

    let output = run_config(&["init", "--force"], &config_path);
    assert!(output.status.success());
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("\"strict\": false"), "{}", content);
}

#[test]
fn test_config_set_persists_value() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");

    let output = run_config(&["set", "settings.fuzzy_threshold", "3"], &config_path);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).contains("Set settings.fuzzy_threshold = 3"));

    let content = fs::read_to_string(&config_path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["settings"]["fuzzy_threshold"], 3);
}

#[test]
fn test_config_set_rejects_bad_input() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");

    let output = run_config(&["set", "settings.nope", "1"], &config_path);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr_of(&output).contains("Unknown config key"));

    let output = run_config(&["set", "settings.strict", "maybe"], &config_path);
    assert_eq!(output.status.code(), Some(4));
    assert!(!config_path.exists());
}

// ============================================================================
// config verify tests
// ============================================================================

#[test]
fn test_config_verify_valid() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(
        &config_path,
        "{\n  // json5 comments are fine\n  \"settings\": { \"log_level\": \"info\" },\n}\n",
    )
    .unwrap();

    let output = run_config(&["verify"], &config_path);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).contains("Configuration is valid"));
}

#[test]
fn test_config_verify_reports_errors() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(&config_path, r#"{ "settings": { "fuzzy_threshold": 9 } }"#).unwrap();

    let output = run_config(&["verify"], &config_path);

    assert_eq!(output.status.code(), Some(5));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("1 error(s)"), "{}", stdout);
    assert!(stdout.contains("settings.fuzzy_threshold"), "{}", stdout);
}

#[test]
fn test_config_verify_json_reports_errors() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(&config_path, r#"{ "settings": { "fuzzy_threshold": 9 } }"#).unwrap();

    let output = run_bexpr_with_config(&config_path, &["--json", "config", "verify"]);

    assert_eq!(output.status.code(), Some(5));
    let json = json_of(&output);
    assert_eq!(json["error"]["code"], -32005);
    assert_eq!(json["error"]["message"], "configuration has 1 error(s)");
    let details = json["error"]["data"]["details"].as_str().unwrap();
    assert!(details.contains("settings.fuzzy_threshold"), "{}", details);
}

#[test]
fn test_config_verify_json_valid() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(&config_path, r#"{ "settings": { "strict": true } }"#).unwrap();

    let output = run_bexpr_with_config(&config_path, &["--json", "config", "verify"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let json = json_of(&output);
    assert_eq!(json["result"]["valid"], true);
    assert_eq!(json["result"]["path"], config_path.to_str().unwrap());
}

#[test]
fn test_config_verify_missing_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");

    let output = run_config(&["verify"], &config_path);

    assert_eq!(output.status.code(), Some(5));
    assert!(stderr_of(&output).contains("not found"));
}

// ============================================================================
// settings take effect
// ============================================================================

#[test]
fn test_unreadable_config_warns_and_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(&config_path, "{ broken").unwrap();

    let output = run_bexpr_with_config(&config_path, &["--no-json", "eval", "!false"]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "true\n");
    assert!(stderr_of(&output).contains("using default settings"));
}
