//! infix to postfix conversion (shunting-yard)

use tracing::trace;

use super::error::ExprError;
use super::token::Token;
use super::token_list::TokenList;

/// convert `infix` to postfix order into `output`
///
/// `stack` and `output` are reset first and reused as-is, so a caller
/// converting many expressions keeps a single pair of buffers.
///
/// # Errors
/// * `ExpectedLParen` - a `)` closes nothing
/// * `UnmatchedParens` - a `(` is never closed
pub fn to_postfix(
    infix: &[Token],
    stack: &mut TokenList,
    output: &mut TokenList,
) -> Result<(), ExprError> {
    stack.reset();
    output.reset();

    for &token in infix {
        trace!(%token, %stack, queue = %output, "shunting-yard step");

        match token {
            operand if operand.is_operand() => output.push(operand),
            Token::LParen => stack.push(token),
            Token::RParen => close_paren(stack, output)?,
            _ => {
                while let Some(top) = stack.peek() {
                    if top == Token::LParen || !pops_before(top, token) {
                        break;
                    }
                    stack.pull();
                    output.push(top);
                }
                stack.push(token);
            }
        }
    }

    while let Some(top) = stack.pull() {
        if top == Token::LParen {
            trace!(%stack, queue = %output, "unclosed left parenthesis");
            return Err(ExprError::UnmatchedParens);
        }
        output.push(top);
    }

    trace!(queue = %output, "postfix");
    Ok(())
}

/// convert `infix` into a freshly allocated postfix list
pub fn convert(infix: &[Token]) -> Result<TokenList, ExprError> {
    let mut stack = TokenList::new();
    let mut output = TokenList::new();
    to_postfix(infix, &mut stack, &mut output)?;
    Ok(output)
}

/// whether operator `top` on the stack is emitted before `incoming` is pushed
fn pops_before(top: Token, incoming: Token) -> bool {
    let (top_prec, incoming_prec) = (top.precedence(), incoming.precedence());
    top_prec > incoming_prec || (top_prec == incoming_prec && incoming.is_left_associative())
}

fn close_paren(stack: &mut TokenList, output: &mut TokenList) -> Result<(), ExprError> {
    while let Some(top) = stack.pull() {
        if top == Token::LParen {
            return Ok(());
        }
        output.push(top);
    }
    Err(ExprError::ExpectedLParen)
}
