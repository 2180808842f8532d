//! Formula parser.
//!
//! Parsing works region by region. A region is the run of tokens up to one
//! of a set of terminators (`,` or `)` inside calls and groups, end of input
//! at the top level), and is reduced to a single [`Expr`] in three passes:
//!
//! 1. primaries: numbers, `:col:row` references, `name(...)` calls and
//!    `(...)` groups become operands; nested regions are parsed recursively
//!    from the same cursor, so tokens are never copied
//! 2. `*` and `/` fold their neighbouring operands, left to right
//! 3. `+` and `-` do the same
//!
//! Folding multiplicative operators over the whole region before additive
//! ones gives the usual precedence, and folding left to right gives left
//! associativity. A region must end up as exactly one operand.
//!
//! There is no unary minus: `-5` is rejected because the `-` has no left
//! operand.

use thiserror::Error;

use super::cell_ref::CellRef;
use super::expr::{BinaryOp, Expr};
use super::lexer::lex;
use super::token::{Token, TokenKind};

/// Why a formula could not be parsed.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    #[error("Invalid formula: {reason}")]
    InvalidFormula { reason: String },
}

impl ParseError {
    fn invalid(reason: impl Into<String>) -> ParseError {
        ParseError::InvalidFormula {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

const ARGUMENT_END: [TokenKind; 2] = [TokenKind::Comma, TokenKind::RParen];
const GROUP_END: [TokenKind; 1] = [TokenKind::RParen];

/// Parse formula text into an expression tree.
pub fn parse(text: &str) -> Result<Expr> {
    let tokens = lex(text);
    parse_tokens(&tokens)
}

/// Parse an already lexed formula. The whole token list must form one expression.
pub fn parse_tokens(tokens: &[Token]) -> Result<Expr> {
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_region(&[])?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(ParseError::invalid(format!("unexpected `{}`", token.text))),
    }
}

/// One element of a region after the primary pass.
enum Item {
    Operand(Expr),
    Operator(BinaryOp),
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next_token(&mut self) -> Option<&'a Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<&'a Token> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            Some(token) => Err(ParseError::invalid(format!(
                "expected {}, found `{}`",
                what, token.text
            ))),
            None => Err(ParseError::invalid(format!(
                "expected {}, found end of formula",
                what
            ))),
        }
    }

    /// Parse tokens up to (not including) the next terminator.
    fn parse_region(&mut self, terminators: &[TokenKind]) -> Result<Expr> {
        let items = self.reduce_primaries(terminators)?;
        let items = fold_operators(items, BinaryOp::is_multiplicative)?;
        let mut items = fold_operators(items, |op| !op.is_multiplicative())?;

        match (items.pop(), items.is_empty()) {
            (Some(Item::Operand(expr)), true) => Ok(expr),
            (None, _) => Err(ParseError::invalid("empty expression")),
            (Some(Item::Operator(op)), _) => Err(ParseError::invalid(format!(
                "operator `{}` is missing an operand",
                op.symbol()
            ))),
            (Some(Item::Operand(expr)), false) => Err(ParseError::invalid(format!(
                "expected an operator before `{}`",
                expr.text()
            ))),
        }
    }

    fn reduce_primaries(&mut self, terminators: &[TokenKind]) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        while let Some(token) = self.peek() {
            if terminators.contains(&token.kind) {
                break;
            }
            self.pos += 1;
            let item = match token.kind {
                TokenKind::Number => Item::Operand(Expr::constant(number(token)?, &*token.text)),
                TokenKind::Colon => Item::Operand(self.cell_ref()?),
                TokenKind::Identifier => Item::Operand(self.function_call(token)?),
                TokenKind::LParen => Item::Operand(self.group()?),
                TokenKind::Operator => {
                    let op = BinaryOp::from_symbol(&token.text).ok_or_else(|| {
                        ParseError::invalid(format!("unknown operator `{}`", token.text))
                    })?;
                    Item::Operator(op)
                }
                TokenKind::Comma | TokenKind::RParen => {
                    return Err(ParseError::invalid(format!("unexpected `{}`", token.text)));
                }
            };
            items.push(item);
        }
        Ok(items)
    }

    /// `:col:row`, with the leading colon already consumed.
    fn cell_ref(&mut self) -> Result<Expr> {
        let col = self.expect(TokenKind::Number, "a column number")?;
        self.expect(TokenKind::Colon, "`:` between column and row")?;
        let row = self.expect(TokenKind::Number, "a row number")?;
        Ok(Expr::cell_ref(CellRef::new(
            coordinate(col)?,
            coordinate(row)?,
        )))
    }

    /// `name(arg, ...)`, with the name already consumed.
    fn function_call(&mut self, name: &Token) -> Result<Expr> {
        self.expect(TokenKind::LParen, &format!("`(` after `{}`", name.text))?;

        let mut args = Vec::new();
        if self.peek().is_some_and(|t| t.kind == TokenKind::RParen) {
            self.pos += 1;
            return Ok(Expr::function_call(&*name.text, args));
        }

        loop {
            args.push(self.parse_region(&ARGUMENT_END)?);
            match self.next_token() {
                Some(token) if token.kind == TokenKind::RParen => break,
                Some(_) => continue,
                None => {
                    return Err(ParseError::invalid(format!(
                        "missing `)` after arguments to `{}`",
                        name.text
                    )));
                }
            }
        }
        Ok(Expr::function_call(&*name.text, args))
    }

    /// `( expr )`, with the opening parenthesis already consumed.
    fn group(&mut self) -> Result<Expr> {
        let inner = self.parse_region(&GROUP_END)?;
        self.expect(TokenKind::RParen, "`)`")?;
        Ok(inner.parenthesized())
    }
}

/// Fold every operator accepted by `selects` with the operands on either
/// side, left to right. Other items pass through untouched.
fn fold_operators(items: Vec<Item>, selects: impl Fn(BinaryOp) -> bool) -> Result<Vec<Item>> {
    let mut stack: Vec<Item> = Vec::with_capacity(items.len());
    let mut rest = items.into_iter();

    while let Some(item) = rest.next() {
        match item {
            Item::Operator(op) if selects(op) => {
                let Some(Item::Operand(left)) = stack.pop() else {
                    return Err(ParseError::invalid(format!(
                        "operator `{}` is missing its left operand",
                        op.symbol()
                    )));
                };
                let Some(Item::Operand(right)) = rest.next() else {
                    return Err(ParseError::invalid(format!(
                        "operator `{}` is missing its right operand",
                        op.symbol()
                    )));
                };
                stack.push(Item::Operand(Expr::binary(op, left, right)));
            }
            other => stack.push(other),
        }
    }

    Ok(stack)
}

fn number(token: &Token) -> Result<f64> {
    token
        .text
        .parse::<f64>()
        .map_err(|_| ParseError::invalid(format!("`{}` is not a number", token.text)))
}

/// A cell coordinate must be a whole, non-negative number.
fn coordinate(token: &Token) -> Result<usize> {
    let value = number(token)?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= usize::MAX as f64 {
        Ok(value as usize)
    } else {
        Err(ParseError::invalid(format!(
            "`{}` is not a valid cell coordinate",
            token.text
        )))
    }
}
