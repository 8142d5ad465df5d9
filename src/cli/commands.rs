use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::{debug, warn};

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::config::{self, Config};
use crate::expr::{self, error_message, ErrorCode, Evaluator, ExprError};
use crate::logging;

use super::exit_codes;
use super::output::{
    self, CheckData, CheckErrorData, CheckLineData, ConfigVerifyData, ErrorCodeData, EvalData,
    OutputMode, TokenData, TokensData,
};

#[derive(Parser)]
#[command(name = "bexpr")]
#[command(about = "Evaluate boolean expressions built from true, false, !, && and ||")]
#[command(version)]
pub struct Cli {
    /// Path to config file (overrides BEXPR_CONFIG env var and default location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (auto-enabled when stdout is piped)
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Force text output even when stdout is piped
    #[arg(long, global = true, conflicts_with = "json")]
    pub no_json: bool,

    /// Suppress all output on success (errors still go to stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate one or more expressions
    Eval {
        /// Expressions to evaluate, e.g. "!(true && false)"
        #[arg(required = true)]
        expressions: Vec<String>,

        /// Exit with status 2 when any expression is false
        #[arg(long)]
        status: bool,
    },

    /// Show the infix and postfix tokens of an expression
    Tokens {
        /// Expression to tokenize
        expression: String,
    },

    /// Evaluate a file line by line and report each result
    Check {
        /// Input file, or "-" for stdin
        file: PathBuf,

        /// Exit with status 3 when any line fails
        #[arg(long)]
        strict: bool,
    },

    /// List error codes, or explain one
    Errors {
        /// Numeric error code
        #[arg(allow_negative_numbers = true)]
        code: Option<i32>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Show config file path
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Show default configuration
    Default,
    /// Verify configuration file for errors
    Verify,
    /// Set a configuration value
    Set {
        /// Key to set, e.g. settings.fuzzy_threshold
        key: String,
        /// New value
        value: String,
    },
}

pub fn execute(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    let output_mode = OutputMode::from_flags(cli.json, cli.no_json, cli.quiet);

    let loaded = config::load_with_override(config_path);
    let log_level = loaded
        .as_ref()
        .map(|config| config.settings.log_level)
        .unwrap_or_default();
    logging::init_logging(log_level, cli.verbose);

    // only config commands treat an unreadable config as fatal
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            if !matches!(cli.command, Commands::Config { .. }) {
                warn!("{:#}; using default settings", e);
            }
            Config::default()
        }
    };

    match cli.command {
        Commands::Eval {
            expressions,
            status,
        } => {
            let mut evaluator = Evaluator::new();
            let mut all_true = true;

            for expression in &expressions {
                evaluator.reset();
                let outcome = evaluator
                    .tokenize(expression)
                    .and_then(|()| evaluator.evaluate());

                match outcome {
                    Ok(result) => {
                        debug!(expression = %expression, result, "evaluated");
                        all_true &= result;
                        match output_mode {
                            OutputMode::Json => output::print_json(&EvalData {
                                expression: expression.clone(),
                                result,
                            }),
                            OutputMode::Text => println!("{}", result),
                            OutputMode::Quiet => {}
                        }
                    }
                    Err(e) => exit_with_expression_error(output_mode, &config, expression, &e),
                }
            }

            if status && !all_true {
                std::process::exit(exit_codes::FALSE_RESULT);
            }
            Ok(())
        }

        Commands::Tokens { expression } => {
            let mut evaluator = Evaluator::new();
            let outcome = evaluator
                .tokenize(&expression)
                .and_then(|()| evaluator.evaluate());

            let result = match outcome {
                Ok(result) => result,
                Err(e) => {
                    if output_mode == OutputMode::Text {
                        eprintln!("{}", evaluator.debug_dump());
                    }
                    exit_with_expression_error(output_mode, &config, &expression, &e)
                }
            };

            match output_mode {
                OutputMode::Json => output::print_json(&TokensData {
                    expression: expression.clone(),
                    infix: token_data(evaluator.expression()),
                    postfix: token_data(evaluator.postfix()),
                    result,
                }),
                OutputMode::Text => {
                    println!("infix:   {}", format_tokens(evaluator.expression()));
                    println!("postfix: {}", format_tokens(evaluator.postfix()));
                    println!("result:  {}", result);
                }
                OutputMode::Quiet => {}
            }
            Ok(())
        }

        Commands::Check { file, strict } => {
            let (source, content) = match read_input(&file) {
                Ok(input) => input,
                Err(e) => exit_with_error(output_mode, exit_codes::IO_ERROR, &format!("{:#}", e)),
            };

            let report = check_lines(&source, &content);

            match output_mode {
                OutputMode::Json => output::print_json(&report),
                OutputMode::Text => {
                    for line in &report.lines {
                        if let Some(tokens) = format_check_tokens(line) {
                            println!("{}", tokens);
                        }
                        println!("{}", format_check_line(line));
                    }
                    println!();
                    println!("{} passed, {} failed", report.passed, report.failed);
                }
                OutputMode::Quiet => {}
            }

            if (strict || config.settings.strict) && report.failed > 0 {
                std::process::exit(exit_codes::INVALID_EXPRESSION);
            }
            Ok(())
        }

        Commands::Errors { code } => {
            let rows: Vec<ErrorCodeData> = match code {
                Some(code) => vec![ErrorCodeData {
                    code,
                    name: ErrorCode::from_i32(code).map(ErrorCode::name),
                    message: error_message(code),
                }],
                None => ErrorCode::ALL
                    .into_iter()
                    .map(|code| ErrorCodeData {
                        code: code.as_i32(),
                        name: Some(code.name()),
                        message: code.message(),
                    })
                    .collect(),
            };

            match output_mode {
                OutputMode::Json => output::print_json(&rows),
                OutputMode::Text => {
                    for row in &rows {
                        println!(
                            "{:>2}  {:<17} {}",
                            row.code,
                            row.name.unwrap_or("-"),
                            row.message
                        );
                    }
                }
                OutputMode::Quiet => {}
            }
            Ok(())
        }

        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                let config = config::load_with_override(config_path)
                    .unwrap_or_else(|e| config_failure(output_mode, e));
                let json =
                    serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
                println!("{}", json);
                Ok(())
            }
            ConfigCommands::Path => {
                let path = config::get_config_path_with_override(config_path)?;
                println!("{}", path.display());
                Ok(())
            }
            ConfigCommands::Init { force } => {
                let path = config::get_config_path_with_override(config_path)?;
                if path.exists() && !force {
                    config_failure(
                        output_mode,
                        anyhow!(
                            "config file already exists: {} (use --force to overwrite)",
                            path.display()
                        ),
                    );
                }
                let written = config::save_with_override(&Config::default(), config_path)
                    .unwrap_or_else(|e| config_failure(output_mode, e));
                if !output_mode.is_quiet() {
                    println!("Created {}", written.display());
                }
                Ok(())
            }
            ConfigCommands::Default => {
                let json = serde_json::to_string_pretty(&Config::default())
                    .context("Failed to serialize config")?;
                println!("{}", json);
                Ok(())
            }
            ConfigCommands::Verify => {
                let path = config::get_config_path_with_override(config_path)?;
                let errors = config::verify(&path).unwrap_or_else(|e| config_failure(output_mode, e));

                if errors.is_empty() {
                    match output_mode {
                        OutputMode::Json => output::print_json(&ConfigVerifyData {
                            path: path.display().to_string(),
                            valid: true,
                        }),
                        OutputMode::Text => {
                            println!("✓ Configuration is valid: {}", path.display())
                        }
                        OutputMode::Quiet => {}
                    }
                    Ok(())
                } else if output_mode.is_json() {
                    output::print_json_error_with_details(
                        exit_codes::CONFIG_ERROR,
                        &format!("configuration has {} error(s)", errors.len()),
                        errors.join("; "),
                    );
                    std::process::exit(exit_codes::CONFIG_ERROR);
                } else {
                    println!(
                        "✗ Configuration has {} error(s): {}",
                        errors.len(),
                        path.display()
                    );
                    println!();
                    for error in &errors {
                        println!("  - {}", error);
                    }
                    std::process::exit(exit_codes::CONFIG_ERROR);
                }
            }
            ConfigCommands::Set { key, value } => {
                let mut config = config::load_with_override(config_path)
                    .unwrap_or_else(|e| config_failure(output_mode, e));
                if let Err(e) = config::set_value(&mut config, &key, &value) {
                    exit_with_error(output_mode, exit_codes::INVALID_ARGS, &format!("{:#}", e));
                }
                config::save_with_override(&config, config_path)
                    .unwrap_or_else(|e| config_failure(output_mode, e));
                if !output_mode.is_quiet() {
                    println!("Set {} = {}", key, value);
                }
                Ok(())
            }
        },

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "bexpr", &mut io::stdout());
            Ok(())
        }
    }
}

/// evaluate every non-blank, non-comment line with one reused session
fn check_lines(source: &str, content: &str) -> CheckData {
    let mut evaluator = Evaluator::new();
    let mut lines = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let expression = raw.trim_end();
        if expression.trim_start().is_empty() || expression.trim_start().starts_with('#') {
            continue;
        }

        evaluator.reset();
        let tokenized = evaluator.tokenize(expression);
        let infix = match tokenized {
            Ok(()) => evaluator.expression().iter().map(|t| t.text()).collect(),
            Err(_) => Vec::new(),
        };
        let outcome = tokenized.and_then(|()| evaluator.evaluate());

        let (result, error) = match outcome {
            Ok(result) => (Some(result), None),
            Err(e) => {
                debug!(line = index + 1, "{}", evaluator.debug_dump());
                (None, Some(CheckErrorData::from(&e)))
            }
        };

        lines.push(CheckLineData {
            line: index + 1,
            expression: expression.to_string(),
            infix,
            result,
            error,
        });
    }

    let failed = lines.iter().filter(|line| line.error.is_some()).count();
    CheckData {
        source: source.to_string(),
        passed: lines.len() - failed,
        failed,
        lines,
    }
}

/// the scanned infix tokens of a line, e.g. `[ 1] Tokens: 'true', '&&', 'false'`
fn format_check_tokens(line: &CheckLineData) -> Option<String> {
    if line.infix.is_empty() {
        return None;
    }
    let quoted: Vec<String> = line.infix.iter().map(|text| format!("'{}'", text)).collect();
    Some(format!("[{:>2}] Tokens: {}", line.line, quoted.join(", ")))
}

fn format_check_line(line: &CheckLineData) -> String {
    match (&line.result, &line.error) {
        (Some(result), _) => format!("[{:>2}] OK: {}", line.line, result),
        (None, Some(error)) if error.code.is_lexical() => {
            format!("[{:>2}] Parse error: {}", line.line, error.message)
        }
        (None, Some(error)) => format!("[{:>2}] FAIL: {}", line.line, error.message),
        (None, None) => format!("[{:>2}] FAIL: {}", line.line, ErrorCode::Fatal),
    }
}

fn read_input(file: &Path) -> Result<(String, String)> {
    if file == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return Ok(("-".to_string(), content));
    }

    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    Ok((file.display().to_string(), content))
}

fn token_data(tokens: &[expr::Token]) -> Vec<TokenData> {
    tokens.iter().copied().map(TokenData::from).collect()
}

fn format_tokens(tokens: &[expr::Token]) -> String {
    tokens
        .iter()
        .map(|token| token.text())
        .collect::<Vec<_>>()
        .join(" ")
}

/// "did you mean" candidates for an invalid token, when enabled
fn hints_for(config: &Config, error: &ExprError) -> Vec<String> {
    match error {
        ExprError::InvalidToken { text } if config.settings.suggestions => {
            expr::suggest(text, config.settings.fuzzy_threshold)
        }
        _ => Vec::new(),
    }
}

fn exit_with_expression_error(
    output_mode: OutputMode,
    config: &Config,
    expression: &str,
    error: &ExprError,
) -> ! {
    let suggestions = hints_for(config, error);

    if output_mode.is_json() {
        output::print_json_expression_error(
            exit_codes::INVALID_EXPRESSION,
            expression,
            error,
            suggestions,
        );
    } else {
        eprintln!("error: {} in '{}'", error, expression);
        if !suggestions.is_empty() {
            eprintln!("  did you mean: {}?", suggestions.join(", "));
        }
    }
    std::process::exit(exit_codes::INVALID_EXPRESSION);
}

fn exit_with_error(output_mode: OutputMode, code: i32, message: &str) -> ! {
    if output_mode.is_json() {
        output::print_json_error(code, message);
    } else {
        eprintln!("error: {}", message);
    }
    std::process::exit(code);
}

fn config_failure(output_mode: OutputMode, error: anyhow::Error) -> ! {
    exit_with_error(output_mode, exit_codes::CONFIG_ERROR, &format!("{:#}", error))
}
