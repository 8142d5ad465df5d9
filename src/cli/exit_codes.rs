//! exit codes for bexpr commands
//!
//! these follow Unix conventions where 0 = success and non-zero = error
//! specific codes help scripts distinguish between failure types

/// command completed successfully
pub const SUCCESS: i32 = 0;

/// general or unknown error
pub const ERROR: i32 = 1;

/// `eval --status` and at least one expression was false
pub const FALSE_RESULT: i32 = 2;

/// an expression failed to tokenize, convert or evaluate
pub const INVALID_EXPRESSION: i32 = 3;

/// invalid command-line arguments
pub const INVALID_ARGS: i32 = 4;

/// configuration file error
pub const CONFIG_ERROR: i32 = 5;

/// input file could not be read
pub const IO_ERROR: i32 = 6;
