//! Tokens produced by the formula lexer.

use std::fmt;

/// The kind of a lexed token.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    Identifier,
    Number,
    /// One of `+ - * /`.
    Operator,
    Comma,
    Colon,
    LParen,
    RParen,
}

impl TokenKind {
    /// Kind of a single-character delimiter, if `ch` is one.
    pub fn delimiter(ch: char) -> Option<TokenKind> {
        match ch {
            ',' => Some(TokenKind::Comma),
            ':' => Some(TokenKind::Colon),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            _ => None,
        }
    }
}

/// A token together with the source text it was lexed from.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Token {
        Token {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
