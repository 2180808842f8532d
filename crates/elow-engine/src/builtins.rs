//! Built-in formula functions.
//!
//! Conventions:
//! - Names are lowercase and matched exactly (`sum`, not `SUM`).
//! - Every function is a pure reducer over the already evaluated argument
//!   values. Arity is checked before the reducer runs, so reducers may index
//!   their arguments freely.
//! - To add a function, append a [`Builtin`] entry to [`BUILTINS`].

use crate::engine::{ExprErrorType, MaybeFloat};

/// How many arguments a function accepts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arity {
    Exactly(usize),
    Unbounded,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => n == count,
            Arity::Unbounded => true,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{}", n),
            Arity::Unbounded => f.write_str("any"),
        }
    }
}

pub struct Builtin {
    pub name: &'static str,
    pub arity: Arity,
    pub description: &'static str,
    reduce: fn(&[f64]) -> f64,
}

impl Builtin {
    /// Check the argument count, then apply the reducer.
    pub fn call(&self, args: &[f64]) -> MaybeFloat {
        if !self.arity.accepts(args.len()) {
            return Err(ExprErrorType::Argument);
        }
        Ok((self.reduce)(args))
    }
}

pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "sum",
        arity: Arity::Unbounded,
        description: "Sum of all arguments (0 when called with none)",
        reduce: sum,
    },
    Builtin {
        name: "product",
        arity: Arity::Unbounded,
        description: "Product of all arguments (1 when called with none)",
        reduce: product,
    },
    Builtin {
        name: "pi",
        arity: Arity::Exactly(0),
        description: "The constant pi",
        reduce: pi,
    },
    Builtin {
        name: "abs",
        arity: Arity::Exactly(1),
        description: "Absolute value",
        reduce: abs,
    },
    Builtin {
        name: "sqrt",
        arity: Arity::Exactly(1),
        description: "Square root (NaN for negative input)",
        reduce: sqrt,
    },
    Builtin {
        name: "round",
        arity: Arity::Exactly(1),
        description: "Round half away from zero",
        reduce: round,
    },
    Builtin {
        name: "pow",
        arity: Arity::Exactly(2),
        description: "First argument raised to the power of the second",
        reduce: pow,
    },
];

/// Find a built-in by exact name.
pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name)
}

fn sum(args: &[f64]) -> f64 {
    args.iter().sum()
}

fn product(args: &[f64]) -> f64 {
    args.iter().product()
}

fn pi(_: &[f64]) -> f64 {
    std::f64::consts::PI
}

fn abs(args: &[f64]) -> f64 {
    args[0].abs()
}

fn sqrt(args: &[f64]) -> f64 {
    args[0].sqrt()
}

fn round(args: &[f64]) -> f64 {
    args[0].round()
}

fn pow(args: &[f64]) -> f64 {
    args[0].powf(args[1])
}
