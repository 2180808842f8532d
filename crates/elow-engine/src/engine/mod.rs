//! Formula engine API.
//!
//! This module provides the formula subsystem of the spreadsheet:
//!
//! - [`lex`] / [`parse`] - Formula text to [`Token`]s to an [`Expr`] tree
//! - [`Expr::execute`] - Evaluate a tree against a [`Table`]
//! - [`Cell`], [`CellType`], [`Formula`], [`Grid`] - Data structures for cell storage
//! - [`resolve_cell`] - Memoized cell resolution keyed by the table version
//! - [`CellRef`] - `:col:row` cell references
//! - [`Trail`] - Circular reference guard
//! - [`format_value`] - Format results for display

mod cell;
mod cell_ref;
mod cycle;
mod eval;
mod expr;
mod format;
mod lexer;
mod memo;
mod parser;
mod table;
mod token;
mod value;

pub use cell::{Cell, CellType, Formula, Grid};
pub use cell_ref::CellRef;
pub use cycle::Trail;
pub use expr::{BinaryOp, Expr, ExprKind};
pub use format::{format_number, format_value};
pub use lexer::lex;
pub use memo::{Memo, resolve_cell};
pub use parser::{ParseError, parse, parse_tokens};
pub use table::Table;
pub use token::{Token, TokenKind};
pub use value::{ExprErrorType, MaybeFloat};
