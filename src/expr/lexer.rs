//! tokenizer - converts expression text into tokens
//!
//! tokens are found by greedy longest match over runs of token characters,
//! so adjacent tokens need no separating whitespace: `!(true)` is four tokens

use strsim::levenshtein;

use super::error::ExprError;
use super::token::{is_token_char, Token, MAX_TOKEN_LEN};

/// common spellings of operators that are not part of the language
const OPERATOR_WORDS: &[(&str, &str)] = &[("and", "&&"), ("or", "||"), ("not", "!")];

/// scan a single token from the start of `text`
///
/// leading whitespace is skipped. returns the token and the byte offset just
/// past its text.
///
/// # Errors
/// * `ExpectedToken` - nothing but whitespace left
/// * `InvalidToken` - a foreign character, or token characters that form no token
pub fn scan_token(text: &str) -> Result<(Token, usize), ExprError> {
    let start = text.len() - text.trim_start().len();
    let rest = &text[start..];

    if rest.is_empty() {
        return Err(ExprError::ExpectedToken);
    }

    // only the first MAX_TOKEN_LEN characters can take part in a match.
    // token characters are all ASCII, so byte slicing stays on char boundaries
    let run_len = rest
        .bytes()
        .take(MAX_TOKEN_LEN)
        .take_while(|b| is_token_char(char::from(*b)))
        .count();

    if run_len == 0 {
        return Err(ExprError::invalid_token(offending_word(rest)));
    }

    let run = &rest[..run_len];
    for len in (1..=run_len).rev() {
        if let Some(token) = Token::from_text(&run[..len]) {
            return Ok((token, start + len));
        }
    }

    Err(ExprError::invalid_token(offending_word(rest)))
}

/// the word reported for an invalid token: a leading alphanumeric word such
/// as `and`, otherwise everything up to the next whitespace
fn offending_word(rest: &str) -> &str {
    let word_len = rest
        .find(|c: char| !c.is_alphanumeric() && c != '_')
        .unwrap_or(rest.len());
    if word_len > 0 {
        return &rest[..word_len];
    }
    rest.split(char::is_whitespace).next().unwrap_or(rest)
}

/// iterator over the tokens of a text
///
/// yields at most one error, after which it is exhausted
pub struct Lexer<'a> {
    text: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            failed: false,
        }
    }

    /// unscanned remainder of the input
    pub fn remainder(&self) -> &'a str {
        &self.text[self.pos..]
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, ExprError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remainder().trim_start().is_empty() {
            return None;
        }

        match scan_token(self.remainder()) {
            Ok((token, consumed)) => {
                self.pos += consumed;
                Some(Ok(token))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// tokenize a whole expression
///
/// blank text yields an empty sequence
pub fn tokenize(text: &str) -> Result<Vec<Token>, ExprError> {
    Lexer::new(text).collect()
}

/// suggest token texts for text that failed to tokenize
///
/// candidates are canonical token texts within `threshold` edits of the
/// lowercased input, closest first
pub fn suggest(text: &str, threshold: usize) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut suggestions = Vec::new();

    if let Some((_, op)) = OPERATOR_WORDS.iter().find(|(word, _)| *word == lower) {
        suggestions.push((*op).to_string());
    }

    let mut scored: Vec<(usize, &'static str)> = Token::ALL
        .iter()
        .map(|t| t.text())
        .map(|candidate| (levenshtein(&lower, candidate), candidate))
        // a candidate that shares nothing with the input is not a suggestion
        .filter(|(distance, candidate)| *distance <= threshold && *distance < candidate.len())
        .collect();

    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    for (_, candidate) in scored {
        if !suggestions.iter().any(|s| s == candidate) {
            suggestions.push(candidate.to_string());
        }
    }

    suggestions
}
