//! growable token sequence used as expression buffer, operator stack and
//! output queue

use std::fmt;

use super::token::Token;

/// capacity reserved by [`TokenList::new`]
pub const INITIAL_CAPACITY: usize = 32;

/// ordered token container with stack access at the back
///
/// `reset` empties the list but keeps its allocation, so a session can reuse
/// the same buffers for every expression it evaluates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// remove and return the most recently pushed token
    pub fn pull(&mut self) -> Option<Token> {
        self.tokens.pop()
    }

    pub fn peek(&self) -> Option<Token> {
        self.tokens.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn capacity(&self) -> usize {
        self.tokens.capacity()
    }

    pub fn reset(&mut self) {
        self.tokens.clear();
    }

    pub fn get(&self, index: usize) -> Option<Token> {
        self.tokens.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Token> + '_ {
        self.tokens.iter().copied()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }
}

impl Default for TokenList {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Token>> for TokenList {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

impl fmt::Display for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}'", token)?;
        }
        write!(f, "]")
    }
}
