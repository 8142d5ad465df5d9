// shared utilities for integration tests

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// config path that never exists, so runs use default settings
const MISSING_CONFIG: &str = "/nonexistent/bexpr-tests/config.json";

/// get path to the built bexpr binary
pub fn bexpr_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_bexpr"))
}

fn base_command() -> Command {
    let mut cmd = Command::new(bexpr_binary_path());
    cmd.env("BEXPR_CONFIG", MISSING_CONFIG);
    cmd.env_remove("BEXPR_LOG");
    cmd
}

/// run bexpr and capture output
pub fn run_bexpr(args: &[&str]) -> Output {
    base_command()
        .args(args)
        .output()
        .expect("Failed to run bexpr")
}

/// run bexpr with extra environment variables
#[allow(dead_code)]
pub fn run_bexpr_with_env(args: &[&str], env_vars: &[(&str, &str)]) -> Output {
    let mut cmd = base_command();
    cmd.args(args);

    for (key, value) in env_vars {
        cmd.env(key, value);
    }

    cmd.output().expect("Failed to run bexpr")
}

/// run bexpr against a specific config file
#[allow(dead_code)]
pub fn run_bexpr_with_config(config_path: &Path, args: &[&str]) -> Output {
    let mut cmd_args = vec!["--config", config_path.to_str().unwrap()];
    cmd_args.extend(args);
    run_bexpr(&cmd_args)
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// parse a single JSON-RPC line from stdout
#[allow(dead_code)]
pub fn json_of(output: &Output) -> serde_json::Value {
    let stdout = stdout_of(output);
    serde_json::from_str(stdout.trim()).unwrap_or_else(|e| {
        panic!("stdout is not valid JSON ({}): {}", e, stdout);
    })
}
