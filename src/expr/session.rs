//! evaluator session - owns the buffers of one expression at a time
//!
//! lifecycle: `Empty` -> (`add_token` / `tokenize`) -> `Tokenized`
//! -> (`evaluate`) -> `Evaluated`. any failure leaves the session `Failed`.
//! `reset` returns to `Empty` from every state without giving back memory.

use std::fmt;

use tracing::debug;

use super::error::{ErrorCode, ExprError};
use super::eval::evaluate_postfix;
use super::lexer::Lexer;
use super::postfix::to_postfix;
use super::token::Token;
use super::token_list::TokenList;

/// session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// no tokens
    Empty,
    /// infix tokens present, not yet evaluated
    Tokenized,
    /// evaluation succeeded
    Evaluated(bool),
    /// a previous operation failed; `reset` is required
    Failed,
}

const RESET_REQUIRED: &str = "session must be reset before reuse";

/// boolean expression evaluator session
#[derive(Debug, Clone)]
pub struct Evaluator {
    expression: TokenList,
    stack: TokenList,
    queue: TokenList,
    state: State,
    last_error: ErrorCode,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            expression: TokenList::new(),
            stack: TokenList::new(),
            queue: TokenList::new(),
            state: State::Empty,
            last_error: ErrorCode::Ok,
        }
    }

    /// clear the expression and intermediate buffers, keeping their capacity
    pub fn reset(&mut self) {
        self.expression.reset();
        self.stack.reset();
        self.queue.reset();
        self.state = State::Empty;
        self.last_error = ErrorCode::Ok;
    }

    /// append one token to the expression
    pub fn add_token(&mut self, token: Token) -> Result<(), ExprError> {
        self.last_error = ErrorCode::Ok;
        self.ensure_accepting()?;
        self.expression.push(token);
        self.state = State::Tokenized;
        Ok(())
    }

    /// append a token given by its raw id
    ///
    /// unknown ids, including the invalid sentinel, are rejected and leave
    /// the expression untouched
    pub fn add_token_id(&mut self, id: i32) -> Result<(), ExprError> {
        self.last_error = ErrorCode::Ok;
        let Some(token) = Token::from_id(id) else {
            return Err(self.record(ExprError::invalid_token(id.to_string())));
        };
        self.add_token(token)
    }

    /// tokenize `text` and append its tokens to the expression
    ///
    /// tokens scanned before a failure stay in the expression; the session
    /// must be reset before it can be used again
    pub fn tokenize(&mut self, text: &str) -> Result<(), ExprError> {
        self.last_error = ErrorCode::Ok;
        self.ensure_accepting()?;

        for token in Lexer::new(text) {
            match token {
                Ok(token) => {
                    self.expression.push(token);
                    self.state = State::Tokenized;
                }
                Err(e) => {
                    debug!(text, error = %e, "tokenize failed");
                    self.state = State::Failed;
                    return Err(self.record(e));
                }
            }
        }
        Ok(())
    }

    /// convert the expression to postfix and evaluate it
    pub fn evaluate(&mut self) -> Result<bool, ExprError> {
        self.last_error = ErrorCode::Ok;

        match self.state {
            State::Evaluated(_) | State::Failed => {
                return Err(self.record(ExprError::Fatal(RESET_REQUIRED)));
            }
            State::Empty => {
                self.state = State::Failed;
                return Err(self.record(ExprError::EmptyExpression));
            }
            State::Tokenized => {}
        }

        let result = to_postfix(
            self.expression.as_slice(),
            &mut self.stack,
            &mut self.queue,
        )
        .and_then(|()| evaluate_postfix(self.queue.as_slice()));

        match result {
            Ok(value) => {
                debug!(
                    expression = %self.expression,
                    postfix = %self.queue,
                    value,
                    "evaluated"
                );
                self.state = State::Evaluated(value);
                Ok(value)
            }
            Err(e) => {
                debug!(
                    expression = %self.expression,
                    error = %e,
                    "evaluation failed"
                );
                self.state = State::Failed;
                Err(self.record(e))
            }
        }
    }

    /// code of the most recent failure, `Ok` if the last operation succeeded
    pub fn last_error(&self) -> ErrorCode {
        self.last_error
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// infix tokens added so far
    pub fn expression(&self) -> &[Token] {
        self.expression.as_slice()
    }

    /// postfix tokens of the last conversion
    pub fn postfix(&self) -> &[Token] {
        self.queue.as_slice()
    }

    /// render expression, operator stack and output queue for diagnostics
    pub fn debug_dump(&self) -> String {
        let dump = self.to_string();
        debug!("{}", dump);
        dump
    }

    fn ensure_accepting(&mut self) -> Result<(), ExprError> {
        match self.state {
            State::Empty | State::Tokenized => Ok(()),
            State::Evaluated(_) | State::Failed => {
                Err(self.record(ExprError::Fatal(RESET_REQUIRED)))
            }
        }
    }

    fn record(&mut self, error: ExprError) -> ExprError {
        self.last_error = error.code();
        error
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "expression: {}", self.expression)?;
        writeln!(f, "stack: {}", self.stack)?;
        write!(f, "queue: {}", self.queue)
    }
}

/// evaluate one expression text with a throwaway session
pub fn evaluate_str(text: &str) -> Result<bool, ExprError> {
    let mut evaluator = Evaluator::new();
    evaluator.tokenize(text)?;
    evaluator.evaluate()
}
