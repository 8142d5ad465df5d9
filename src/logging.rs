//! logging setup
//!
//! logs go to stderr so stdout stays clean for results and JSON output.
//!
//! level precedence (highest first):
//! 1. `--verbose` (debug)
//! 2. `BEXPR_LOG` (any `EnvFilter` directive, e.g. `bexpr=trace`)
//! 3. `settings.log_level` from the config file

use std::env;
use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::config::LogLevel;

const LOG_ENV_VAR: &str = "BEXPR_LOG";

fn build_filter(level: LogLevel, verbose: bool, env_directive: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new(LogLevel::Debug.as_filter_str());
    }

    if let Some(directive) = env_directive.filter(|d| !d.trim().is_empty()) {
        if let Ok(filter) = EnvFilter::try_new(directive) {
            return filter;
        }
        eprintln!(
            "warning: ignoring invalid {} value '{}'",
            LOG_ENV_VAR, directive
        );
    }

    EnvFilter::new(level.as_filter_str())
}

/// install the global subscriber
///
/// calling this more than once is harmless; the first subscriber stays
pub fn init_logging(level: LogLevel, verbose: bool) {
    let env_directive = env::var(LOG_ENV_VAR).ok();
    let filter = build_filter(level, verbose, env_directive.as_deref());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .without_time()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
