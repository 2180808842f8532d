//! Formula lexer.
//!
//! Splits formula text into a flat list of [`Token`]s. Lexing never fails:
//! anything that is not a delimiter, an operator or whitespace accumulates
//! into a pending word, which becomes a `Number` if it reads as a float and
//! an `Identifier` otherwise. Validation is left to the parser.
//!
//! A leading minus is always an operator, so `-5` lexes as `-` followed by
//! `5`, and `1e-3` lexes as `1e`, `-`, `3`.

use super::token::{Token, TokenKind};

const OPERATORS: [char; 4] = ['+', '-', '*', '/'];

/// Lex formula text into tokens.
pub fn lex(text: &str) -> Vec<Token> {
    let mut lexer = Lexer::default();
    for ch in text.chars() {
        lexer.push(ch);
    }
    lexer.finish()
}

#[derive(Default)]
struct Lexer {
    tokens: Vec<Token>,
    pending: String,
}

impl Lexer {
    fn push(&mut self, ch: char) {
        if let Some(kind) = TokenKind::delimiter(ch) {
            self.flush();
            self.tokens.push(Token::new(kind, ch));
        } else if OPERATORS.contains(&ch) {
            self.flush();
            self.tokens.push(Token::new(TokenKind::Operator, ch));
        } else if ch.is_whitespace() {
            self.flush();
        } else {
            self.pending.push(ch);
        }
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending);
        let kind = if text.parse::<f64>().is_ok() {
            TokenKind::Number
        } else {
            TokenKind::Identifier
        };
        self.tokens.push(Token::new(kind, text));
    }

    fn finish(mut self) -> Vec<Token> {
        self.flush();
        self.tokens
    }
}
