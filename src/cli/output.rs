//! output formatting utilities for scriptable CLI output
//!
//! uses JSON-RPC 2.0 format for machine-readable output:
//! - success: {"jsonrpc": "2.0", "result": {...}, "id": null}
//! - error: {"jsonrpc": "2.0", "error": {"code": N, "message": "...", "data": {...}}, "id": null}

use serde::Serialize;
use std::io::IsTerminal;

use crate::expr::{ErrorCode, ExprError, Token};

/// JSON-RPC version constant
const JSONRPC_VERSION: &str = "2.0";

/// output mode determines how results are formatted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// human-readable text output
    Text,
    /// machine-readable JSON-RPC 2.0 output
    Json,
    /// no output on success (errors still go to stderr)
    Quiet,
}

impl OutputMode {
    /// determine output mode from CLI flags and environment
    ///
    /// priority: quiet > json > no_json > auto-detect
    pub fn from_flags(json: bool, no_json: bool, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        if json {
            return Self::Json;
        }
        if no_json {
            return Self::Text;
        }
        // auto-detect: JSON when stdout is not a TTY (piped)
        if !std::io::stdout().is_terminal() {
            Self::Json
        } else {
            Self::Text
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_quiet(&self) -> bool {
        matches!(self, Self::Quiet)
    }
}

/// JSON-RPC 2.0 success response
#[derive(Serialize)]
pub struct JsonRpcResponse<T: Serialize> {
    pub jsonrpc: &'static str,
    pub result: T,
    /// null for CLI responses (no request id)
    pub id: Option<String>,
}

impl<T: Serialize> JsonRpcResponse<T> {
    pub fn new(result: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            result,
            id: None,
        }
    }
}

/// JSON-RPC 2.0 error response
#[derive(Serialize)]
pub struct JsonRpcError {
    pub jsonrpc: &'static str,
    pub error: RpcError,
    pub id: Option<String>,
}

/// JSON-RPC 2.0 error object
#[derive(Serialize)]
pub struct RpcError {
    /// error code (bexpr exit code, offset by -32000 for app-specific errors)
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ErrorData>,
}

/// additional error data
#[derive(Serialize)]
pub struct ErrorData {
    /// expression error code, e.g. UNMATCHED_PARENS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl JsonRpcError {
    /// create error with standard JSON-RPC error code range
    /// bexpr uses the -32000 to -32099 range JSON-RPC leaves to applications
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            error: RpcError {
                code: to_jsonrpc_code(code),
                message: message.into(),
                data: None,
            },
            id: None,
        }
    }

    /// error for a failed expression, tagged with its error code
    pub fn expression(
        code: i32,
        expression: &str,
        error: &ExprError,
        suggestions: Vec<String>,
    ) -> Self {
        let mut rpc = Self::new(code, error.to_string());
        rpc.error.data = Some(ErrorData {
            kind: Some(error.code()),
            suggestions: if suggestions.is_empty() {
                None
            } else {
                Some(suggestions)
            },
            details: Some(expression.to_string()),
        });
        rpc
    }
}

/// convert bexpr exit code to JSON-RPC error code
/// JSON-RPC reserves -32000 to -32099 for server/application errors
fn to_jsonrpc_code(code: i32) -> i32 {
    -32000 - code
}

// ============================================================================
// Result data structures for different commands
// ============================================================================

/// result of evaluating one expression
#[derive(Serialize)]
pub struct EvalData {
    pub expression: String,
    pub result: bool,
}

/// a token with its raw id
#[derive(Serialize, Clone)]
pub struct TokenData {
    pub id: i32,
    pub kind: Token,
    pub text: &'static str,
}

impl From<Token> for TokenData {
    fn from(token: Token) -> Self {
        Self {
            id: token.id(),
            kind: token,
            text: token.text(),
        }
    }
}

/// infix and postfix token listing
#[derive(Serialize)]
pub struct TokensData {
    pub expression: String,
    pub infix: Vec<TokenData>,
    pub postfix: Vec<TokenData>,
    pub result: bool,
}

/// outcome of one line processed by `check`
#[derive(Serialize)]
pub struct CheckLineData {
    pub line: usize,
    pub expression: String,
    /// scanned infix token texts; empty when the line failed to tokenize
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub infix: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CheckErrorData>,
}

#[derive(Serialize)]
pub struct CheckErrorData {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&ExprError> for CheckErrorData {
    fn from(error: &ExprError) -> Self {
        Self {
            code: error.code(),
            message: error.to_string(),
        }
    }
}

/// summary of a `check` run
#[derive(Serialize)]
pub struct CheckData {
    pub source: String,
    pub passed: usize,
    pub failed: usize,
    pub lines: Vec<CheckLineData>,
}

/// result of `config verify`
#[derive(Serialize)]
pub struct ConfigVerifyData {
    pub path: String,
    pub valid: bool,
}

/// one row of the error code table
#[derive(Serialize)]
pub struct ErrorCodeData {
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
    pub message: &'static str,
}

// ============================================================================
// Output functions
// ============================================================================

/// print JSON-RPC success response to stdout
pub fn print_json<T: Serialize>(data: &T) {
    let response = JsonRpcResponse::new(data);
    if let Ok(json) = serde_json::to_string(&response) {
        println!("{}", json);
    }
}

/// print JSON-RPC error to stdout
pub fn print_json_error(code: i32, message: &str) {
    let error = JsonRpcError::new(code, message);
    if let Ok(json) = serde_json::to_string(&error) {
        println!("{}", json);
    }
}

/// print JSON-RPC error with a details string
pub fn print_json_error_with_details(code: i32, message: &str, details: String) {
    let mut error = JsonRpcError::new(code, message);
    error.error.data = Some(ErrorData {
        kind: None,
        suggestions: None,
        details: Some(details),
    });
    if let Ok(json) = serde_json::to_string(&error) {
        println!("{}", json);
    }
}

/// print JSON-RPC error for a failed expression
pub fn print_json_expression_error(
    code: i32,
    expression: &str,
    error: &ExprError,
    suggestions: Vec<String>,
) {
    let error = JsonRpcError::expression(code, expression, error, suggestions);
    if let Ok(json) = serde_json::to_string(&error) {
        println!("{}", json);
    }
}
