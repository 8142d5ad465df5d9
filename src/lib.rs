// library crate for bexpr
// the expression engine lives in `expr`; the rest backs the bexpr binary
// and auxiliary binaries (e.g., generate-man)

pub mod cli;
pub mod config;
pub mod expr;
pub mod logging;
