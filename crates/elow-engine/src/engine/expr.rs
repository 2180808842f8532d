//! Formula expression tree.
//!
//! An [`Expr`] is built once by the parser and never mutated afterwards.
//! Each node remembers its canonical text, which is what gets shown when a
//! formula cell is edited and parses back to an identical tree.

use std::fmt;

use super::cell_ref::CellRef;

/// Binary arithmetic operator.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn from_symbol(symbol: &str) -> Option<BinaryOp> {
        match symbol {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    /// `*` and `/` bind tighter than `+` and `-`.
    pub fn is_multiplicative(self) -> bool {
        matches!(self, BinaryOp::Mul | BinaryOp::Div)
    }

    /// Apply with plain IEEE semantics; dividing by zero gives inf or NaN.
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOp::Add => left + right,
            BinaryOp::Sub => left - right,
            BinaryOp::Mul => left * right,
            BinaryOp::Div => left / right,
        }
    }
}

/// The shape of an expression node.
#[derive(Clone, Debug)]
pub enum ExprKind {
    Constant(f64),
    CellRef(CellRef),
    FunctionCall { name: String, args: Vec<Expr> },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// Constants compare by bit pattern, so a `NaN` literal equals itself.
impl PartialEq for ExprKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ExprKind::Constant(a), ExprKind::Constant(b)) => a.to_bits() == b.to_bits(),
            (ExprKind::CellRef(a), ExprKind::CellRef(b)) => a == b,
            (
                ExprKind::FunctionCall { name, args },
                ExprKind::FunctionCall {
                    name: other_name,
                    args: other_args,
                },
            ) => name == other_name && args == other_args,
            (
                ExprKind::Binary { op, left, right },
                ExprKind::Binary {
                    op: other_op,
                    left: other_left,
                    right: other_right,
                },
            ) => op == other_op && left == other_left && right == other_right,
            _ => false,
        }
    }
}

/// An expression node and its canonical source text.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    kind: ExprKind,
    text: String,
}

impl Expr {
    /// A numeric literal, keeping the text it was written with.
    pub fn constant(value: f64, text: impl Into<String>) -> Expr {
        Expr {
            kind: ExprKind::Constant(value),
            text: text.into(),
        }
    }

    pub fn cell_ref(cell: CellRef) -> Expr {
        Expr {
            text: cell.to_string(),
            kind: ExprKind::CellRef(cell),
        }
    }

    pub fn function_call(name: impl Into<String>, args: Vec<Expr>) -> Expr {
        let name = name.into();
        let rendered: Vec<&str> = args.iter().map(Expr::text).collect();
        Expr {
            text: format!("{}({})", name, rendered.join(", ")),
            kind: ExprKind::FunctionCall { name, args },
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr {
            text: format!("{}{}{}", left.text, op.symbol(), right.text),
            kind: ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
        }
    }

    /// The same node, rendered inside literal parentheses.
    pub fn parenthesized(self) -> Expr {
        Expr {
            text: format!("({})", self.text),
            kind: self.kind,
        }
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// Canonical source text, suitable for parsing again.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
