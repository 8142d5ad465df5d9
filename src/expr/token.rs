//! token identities and their static metadata

use std::fmt;

use serde::Serialize;

/// operator associativity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    LeftToRight,
    RightToLeft,
}

/// number of operands a token consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// literals and parentheses
    Operand,
    Unary,
    Binary,
}

/// a token of the boolean expression language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Token {
    False,
    True,
    And,
    Or,
    Not,
    LParen,
    RParen,
}

/// raw id used for invalid tokens
pub const INVALID_ID: i32 = -1;

/// longest text of any entry in [`TOKEN_TABLE`]
pub const MAX_TOKEN_LEN: usize = 5;

/// characters that may appear in a token's text
pub const TOKEN_CHARS: &[char] = &[
    '(', ')', '!', '&', '|', '0', '1', 'a', 'e', 'f', 'l', 'r', 's', 't', 'u',
];

/// precedence shared by `(` and `)`, only used while unwinding the stack
pub const PAREN_PRECEDENCE: u8 = 4;

/// static description of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpec {
    pub text: &'static str,
    pub token: Token,
    pub arity: Arity,
    pub associativity: Associativity,
    pub precedence: u8,
}

const fn spec(
    text: &'static str,
    token: Token,
    arity: Arity,
    associativity: Associativity,
    precedence: u8,
) -> TokenSpec {
    TokenSpec {
        text,
        token,
        arity,
        associativity,
        precedence,
    }
}

/// every recognized token text; the first entry of each token is canonical
pub static TOKEN_TABLE: &[TokenSpec] = &[
    spec("false", Token::False, Arity::Operand, Associativity::LeftToRight, 0),
    spec("0", Token::False, Arity::Operand, Associativity::LeftToRight, 0),
    spec("true", Token::True, Arity::Operand, Associativity::LeftToRight, 0),
    spec("1", Token::True, Arity::Operand, Associativity::LeftToRight, 0),
    spec(
        "(",
        Token::LParen,
        Arity::Operand,
        Associativity::LeftToRight,
        PAREN_PRECEDENCE,
    ),
    spec(
        ")",
        Token::RParen,
        Arity::Operand,
        Associativity::LeftToRight,
        PAREN_PRECEDENCE,
    ),
    spec("!", Token::Not, Arity::Unary, Associativity::RightToLeft, 3),
    spec("&&", Token::And, Arity::Binary, Associativity::LeftToRight, 2),
    spec("||", Token::Or, Arity::Binary, Associativity::LeftToRight, 1),
];

impl Token {
    pub const ALL: [Token; 7] = [
        Token::False,
        Token::True,
        Token::And,
        Token::Or,
        Token::Not,
        Token::LParen,
        Token::RParen,
    ];

    /// canonical table entry for this token
    pub fn spec(self) -> &'static TokenSpec {
        let index = match self {
            Token::False => 0,
            Token::True => 2,
            Token::LParen => 4,
            Token::RParen => 5,
            Token::Not => 6,
            Token::And => 7,
            Token::Or => 8,
        };
        &TOKEN_TABLE[index]
    }

    pub fn text(self) -> &'static str {
        self.spec().text
    }

    pub fn arity(self) -> Arity {
        self.spec().arity
    }

    pub fn associativity(self) -> Associativity {
        self.spec().associativity
    }

    pub fn precedence(self) -> u8 {
        self.spec().precedence
    }

    pub fn id(self) -> i32 {
        match self {
            Token::False => 0,
            Token::True => 1,
            Token::And => 2,
            Token::Or => 3,
            Token::Not => 4,
            Token::LParen => 5,
            Token::RParen => 6,
        }
    }

    /// token for a raw id, `None` for the invalid sentinel or anything unknown
    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    /// exact match against every text in the table, aliases included
    pub fn from_text(text: &str) -> Option<Self> {
        TOKEN_TABLE
            .iter()
            .find(|spec| spec.text == text)
            .map(|spec| spec.token)
    }

    /// literal operand; parentheses share the operand arity but carry no value
    pub fn is_operand(self) -> bool {
        self.arity() == Arity::Operand && !self.is_paren()
    }

    pub fn is_paren(self) -> bool {
        matches!(self, Token::LParen | Token::RParen)
    }

    /// literal value of an operand
    pub fn value(self) -> Option<bool> {
        match self {
            Token::False => Some(false),
            Token::True => Some(true),
            _ => None,
        }
    }

    pub fn is_left_associative(self) -> bool {
        self.associativity() == Associativity::LeftToRight
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

pub fn is_token_char(ch: char) -> bool {
    TOKEN_CHARS.contains(&ch)
}
