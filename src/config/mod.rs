mod schema;

pub use schema::{
    Config, LogLevel, Settings, DEFAULT_FUZZY_THRESHOLD, MAX_FUZZY_THRESHOLD,
};

use anyhow::{anyhow, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_ENV_VAR: &str = "BEXPR_CONFIG";

/// resolve the config path: explicit override, then BEXPR_CONFIG, then
/// ~/.bexpr/config.json
pub fn get_config_path_with_override(path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = path {
        return Ok(expand_path(&path.to_string_lossy()));
    }

    if let Ok(path) = env::var(CONFIG_ENV_VAR) {
        return Ok(expand_path(&path));
    }

    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(".bexpr").join("config.json"))
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

/// load the config, falling back to defaults when the file does not exist
pub fn load_with_override(path: Option<&Path>) -> Result<Config> {
    let path = get_config_path_with_override(path)?;

    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// parse config text; comments and trailing commas are accepted
pub fn parse(content: &str) -> Result<Config> {
    json5::from_str(content).map_err(|e| anyhow!("invalid JSON: {}", e))
}

pub fn save_with_override(config: &Config, path: Option<&Path>) -> Result<PathBuf> {
    let path = get_config_path_with_override(path)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(&path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    Ok(path)
}

/// Verify configuration file and return a list of errors
pub fn verify(path: &Path) -> Result<Vec<String>> {
    let mut errors = Vec::new();

    if !path.exists() {
        return Err(anyhow!("config file not found: {}", path.display()));
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config = parse(&content)?;

    if config.settings.fuzzy_threshold > MAX_FUZZY_THRESHOLD {
        errors.push(format!(
            "settings.fuzzy_threshold: {} out of range (0-{})",
            config.settings.fuzzy_threshold, MAX_FUZZY_THRESHOLD
        ));
    }

    Ok(errors)
}

pub fn set_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["settings", "log_level"] => {
            config.settings.log_level = value.parse()?;
        }
        ["settings", "suggestions"] => {
            config.settings.suggestions = parse_bool(value)?;
        }
        ["settings", "strict"] => {
            config.settings.strict = parse_bool(value)?;
        }
        ["settings", "fuzzy_threshold"] => {
            let threshold: usize = value
                .parse()
                .with_context(|| format!("Invalid number: {}", value))?;
            if threshold > MAX_FUZZY_THRESHOLD {
                return Err(anyhow!(
                    "fuzzy_threshold {} out of range (0-{})",
                    threshold,
                    MAX_FUZZY_THRESHOLD
                ));
            }
            config.settings.fuzzy_threshold = threshold;
        }
        _ => {
            return Err(anyhow!(
                "Unknown config key: {}. Valid keys: settings.log_level, settings.suggestions, settings.strict, settings.fuzzy_threshold",
                key
            ))
        }
    }

    Ok(())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(anyhow!(
            "Invalid boolean value: {}. Use true/false, yes/no, 1/0, or on/off",
            value
        )),
    }
}
