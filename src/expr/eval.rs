//! postfix evaluator

use tracing::trace;

use super::error::ExprError;
use super::token::{Arity, Token};

/// reduce a postfix token sequence to a single boolean
///
/// # Errors
/// returns `Fatal` when an operator lacks operands, when a parenthesis shows
/// up in the sequence, or when the scan does not end with exactly one value
pub fn evaluate_postfix(postfix: &[Token]) -> Result<bool, ExprError> {
    let mut values: Vec<bool> = Vec::with_capacity(postfix.len());

    for &token in postfix {
        if token.is_paren() {
            return Err(ExprError::Fatal("parenthesis in postfix sequence"));
        }

        match token.arity() {
            Arity::Operand => {
                let value = token
                    .value()
                    .ok_or(ExprError::Fatal("operand without a value"))?;
                values.push(value);
            }
            Arity::Unary => {
                let operand = values
                    .pop()
                    .ok_or(ExprError::Fatal("missing operand for unary operator"))?;
                values.push(apply_unary(token, operand)?);
            }
            Arity::Binary => {
                let (Some(right), Some(left)) = (values.pop(), values.pop()) else {
                    return Err(ExprError::Fatal("missing operand for binary operator"));
                };
                values.push(apply_binary(token, left, right)?);
            }
        }
        trace!(%token, ?values, "postfix step");
    }

    match values.as_slice() {
        [result] => Ok(*result),
        [] => Err(ExprError::Fatal("postfix sequence produced no value")),
        _ => Err(ExprError::Fatal("postfix sequence left unused operands")),
    }
}

fn apply_unary(token: Token, operand: bool) -> Result<bool, ExprError> {
    match token {
        Token::Not => Ok(!operand),
        _ => Err(ExprError::Fatal("token is not a unary operator")),
    }
}

fn apply_binary(token: Token, left: bool, right: bool) -> Result<bool, ExprError> {
    match token {
        Token::And => Ok(left && right),
        Token::Or => Ok(left || right),
        _ => Err(ExprError::Fatal("token is not a binary operator")),
    }
}
