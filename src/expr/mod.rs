//! boolean expression evaluation
//!
//! expressions combine `true`/`false` (or `1`/`0`) with `!`, `&&`, `||` and
//! parentheses. precedence from tightest: `!`, `&&`, `||`; binary operators
//! group left to right.
//!
//! pipeline: text -> [`tokenize`] -> infix tokens -> [`to_postfix`]
//! (shunting-yard) -> postfix tokens -> [`evaluate_postfix`] -> `bool`.
//! [`Evaluator`] runs the pipeline over reusable buffers and records the
//! last error code.

mod error;
mod eval;
mod lexer;
mod postfix;
mod session;
mod token;
mod token_list;

pub use error::{error_message, ErrorCode, ExprError};
pub use eval::evaluate_postfix;
pub use lexer::{scan_token, suggest, tokenize, Lexer};
pub use postfix::{convert, to_postfix};
pub use session::{evaluate_str, Evaluator, State};
pub use token::{
    is_token_char, Arity, Associativity, Token, TokenSpec, INVALID_ID, MAX_TOKEN_LEN,
    TOKEN_TABLE,
};
pub use token_list::TokenList;
