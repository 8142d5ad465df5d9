use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
}

pub const DEFAULT_FUZZY_THRESHOLD: usize = 2;
pub const MAX_FUZZY_THRESHOLD: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// log level used when neither --verbose nor BEXPR_LOG is given
    #[serde(default)]
    pub log_level: LogLevel,
    /// show "did you mean" hints for invalid tokens
    #[serde(default = "default_suggestions")]
    pub suggestions: bool,
    /// maximum edit distance for hints
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: usize,
    /// `check` exits non-zero when any line fails
    #[serde(default)]
    pub strict: bool,
}

fn default_suggestions() -> bool {
    true
}

fn default_fuzzy_threshold() -> usize {
    DEFAULT_FUZZY_THRESHOLD
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            suggestions: true,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            strict: false,
        }
    }
}

/// log level, mirrors the tracing levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    /// tracing filter directive for this level
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(anyhow!(
                "Invalid log level: {}. Use trace, debug, info, warn, or error",
                s
            )),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}
