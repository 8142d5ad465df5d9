//! error codes and error types for expression handling
//!
//! every failure carries one of a closed set of numeric codes so that
//! embedding tools can branch on them without matching on messages

use serde::Serialize;
use thiserror::Error;

/// numeric error codes, stable across releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum ErrorCode {
    /// no error
    #[default]
    Ok = 0,
    /// malformed postfix sequence or stack underflow
    Fatal = 1,
    /// scanner ran out of input where a token was expected
    ExpectedToken = 2,
    /// text did not match any known token
    InvalidToken = 3,
    /// `)` without a matching `(`
    #[serde(rename = "EXPECTED_LPAREN")]
    ExpectedLParen = 4,
    /// reserved, never produced
    #[serde(rename = "EXPECTED_RPAREN")]
    ExpectedRParen = 5,
    /// `(` left open at the end of the expression
    UnmatchedParens = 6,
    /// evaluation requested on an expression without tokens
    EmptyExpression = 7,
}

impl ErrorCode {
    /// every code, in numeric order
    pub const ALL: [ErrorCode; 8] = [
        ErrorCode::Ok,
        ErrorCode::Fatal,
        ErrorCode::ExpectedToken,
        ErrorCode::InvalidToken,
        ErrorCode::ExpectedLParen,
        ErrorCode::ExpectedRParen,
        ErrorCode::UnmatchedParens,
        ErrorCode::EmptyExpression,
    ];

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn from_i32(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_i32() == code)
    }

    /// upper-case identifier, e.g. `UNMATCHED_PARENS`
    pub fn name(self) -> &'static str {
        match self {
            ErrorCode::Ok => "OK",
            ErrorCode::Fatal => "FATAL",
            ErrorCode::ExpectedToken => "EXPECTED_TOKEN",
            ErrorCode::InvalidToken => "INVALID_TOKEN",
            ErrorCode::ExpectedLParen => "EXPECTED_LPAREN",
            ErrorCode::ExpectedRParen => "EXPECTED_RPAREN",
            ErrorCode::UnmatchedParens => "UNMATCHED_PARENS",
            ErrorCode::EmptyExpression => "EMPTY_EXPRESSION",
        }
    }

    /// true for failures caused by unparsable text
    pub fn is_lexical(self) -> bool {
        matches!(self, ErrorCode::ExpectedToken | ErrorCode::InvalidToken)
    }

    /// human-readable description
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::Ok => "OK",
            ErrorCode::Fatal => "fatal error",
            ErrorCode::ExpectedToken => "expected token",
            ErrorCode::InvalidToken => "invalid token",
            ErrorCode::ExpectedLParen => "expected left parenthesis",
            ErrorCode::ExpectedRParen => "expected right parenthesis",
            ErrorCode::UnmatchedParens => "unmatched parentheses",
            ErrorCode::EmptyExpression => "empty expression",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// message for a raw error code; unknown codes get a generic message
pub fn error_message(code: i32) -> &'static str {
    ErrorCode::from_i32(code)
        .map(ErrorCode::message)
        .unwrap_or("unknown error")
}

/// error returned by tokenizing, conversion and evaluation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("fatal error: {0}")]
    Fatal(&'static str),

    #[error("expected token")]
    ExpectedToken,

    #[error("invalid token '{text}'")]
    InvalidToken { text: String },

    #[error("expected left parenthesis")]
    ExpectedLParen,

    #[error("unmatched parentheses")]
    UnmatchedParens,

    #[error("empty expression")]
    EmptyExpression,
}

impl ExprError {
    pub fn invalid_token(text: impl Into<String>) -> Self {
        Self::InvalidToken { text: text.into() }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ExprError::Fatal(_) => ErrorCode::Fatal,
            ExprError::ExpectedToken => ErrorCode::ExpectedToken,
            ExprError::InvalidToken { .. } => ErrorCode::InvalidToken,
            ExprError::ExpectedLParen => ErrorCode::ExpectedLParen,
            ExprError::UnmatchedParens => ErrorCode::UnmatchedParens,
            ExprError::EmptyExpression => ErrorCode::EmptyExpression,
        }
    }
}
