//! Cell data structures for the spreadsheet grid.
//!
//! This module provides the core data types for representing cells:
//! - [`CellType`] - The content of a cell (empty, number, text, or formula)
//! - [`Formula`] - A parsed formula plus its memoized result
//! - [`Cell`] - A cell as stored in the grid
//! - [`Grid`] - Sparse storage for cells (backed by `DashMap`)

use dashmap::DashMap;
use std::sync::Arc;

use super::cell_ref::CellRef;
use super::expr::Expr;
use super::memo::Memo;
use super::parser::{ParseError, parse};
use super::MaybeFloat;

/// The content stored in a cell.
#[derive(Clone, Debug)]
pub enum CellType {
    Empty,
    Number(f64),
    Text(String),
    Formula(Formula),
}

/// A parsed formula and the last value computed for it.
#[derive(Clone, Debug)]
pub struct Formula {
    expr: Arc<Expr>,
    memo: Option<Memo>,
}

impl Formula {
    pub fn new(expr: Expr) -> Formula {
        Formula {
            expr: Arc::new(expr),
            memo: None,
        }
    }

    pub fn expr(&self) -> &Arc<Expr> {
        &self.expr
    }

    pub fn memo(&self) -> Option<&Memo> {
        self.memo.as_ref()
    }

    /// The memoized value, if it was computed at `version`.
    pub fn cached(&self, version: u64) -> Option<MaybeFloat> {
        self.memo
            .filter(|memo| memo.version == version)
            .map(|memo| memo.value)
    }

    pub fn store(&mut self, value: MaybeFloat, version: u64) {
        self.memo = Some(Memo { value, version });
    }

    /// Forget the memoized value.
    pub fn invalidate(&mut self) {
        self.memo = None;
    }
}

/// A cell in the spreadsheet grid.
#[derive(Clone, Debug)]
pub struct Cell {
    pub contents: CellType,
}

impl Cell {
    pub fn new_empty() -> Cell {
        Cell {
            contents: CellType::Empty,
        }
    }

    pub fn new_text(text: &str) -> Cell {
        Cell {
            contents: CellType::Text(text.to_string()),
        }
    }

    pub fn new_number(n: f64) -> Cell {
        Cell {
            contents: CellType::Number(n),
        }
    }

    /// Create a new cell containing a formula.
    /// Fails without producing a cell when the formula does not parse.
    pub fn new_formula(formula: &str) -> Result<Cell, ParseError> {
        let expr = parse(formula)?;
        Ok(Cell {
            contents: CellType::Formula(Formula::new(expr)),
        })
    }

    /// Parse user input and create appropriate cell type.
    /// - Empty string or whitespace -> Empty
    /// - Starts with '=' -> Formula (without the '=')
    /// - Quoted string -> Text (without quotes)
    /// - Valid number -> Number
    /// - Otherwise -> Text
    pub fn from_input(input: &str) -> Result<Cell, ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Cell::new_empty());
        }

        if let Some(formula) = trimmed.strip_prefix('=') {
            return Cell::new_formula(formula);
        }

        if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
            let text = &trimmed[1..trimmed.len() - 1];
            return Ok(Cell::new_text(text));
        }

        if let Ok(n) = trimmed.parse::<f64>() {
            return Ok(Cell::new_number(n));
        }

        Ok(Cell::new_text(trimmed))
    }

    /// Get the input string that recreates this cell (for editing).
    pub fn to_input_string(&self) -> String {
        match &self.contents {
            CellType::Empty => String::new(),
            CellType::Text(s) => s.clone(),
            CellType::Number(n) => n.to_string(),
            CellType::Formula(f) => format!("={}", f.expr().text()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.contents, CellType::Empty)
    }

    /// Drop any memoized formula result.
    pub fn invalidate(&mut self) {
        if let CellType::Formula(formula) = &mut self.contents {
            formula.invalidate();
        }
    }
}

/// Sparse grid storage (DashMap is internally sharded, the `Arc` makes clones cheap).
pub type Grid = Arc<DashMap<CellRef, Cell>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_kinds() {
        assert!(Cell::from_input("  ").unwrap().is_empty());
        assert!(matches!(
            Cell::from_input("12.5").unwrap().contents,
            CellType::Number(n) if n == 12.5
        ));
        assert!(matches!(
            Cell::from_input("hello").unwrap().contents,
            CellType::Text(ref s) if s == "hello"
        ));
        assert!(matches!(
            Cell::from_input("\"42\"").unwrap().contents,
            CellType::Text(ref s) if s == "42"
        ));
        assert!(matches!(
            Cell::from_input("=1+2").unwrap().contents,
            CellType::Formula(_)
        ));
    }

    #[test]
    fn test_from_input_rejects_bad_formula() {
        assert!(Cell::from_input("=1+").is_err());
        assert!(Cell::from_input("=foo(1,").is_err());
    }

    #[test]
    fn test_to_input_string_uses_canonical_text() {
        let cell = Cell::from_input("= sum( 1 ,2 )").unwrap();
        assert_eq!(cell.to_input_string(), "=sum(1, 2)");
        assert_eq!(Cell::new_number(3.0).to_input_string(), "3");
    }

    #[test]
    fn test_memo_matches_only_its_version() {
        let mut formula = Formula::new(parse("1").unwrap());
        assert_eq!(formula.cached(1), None);

        formula.store(Ok(1.0), 1);
        assert_eq!(formula.cached(1), Some(Ok(1.0)));
        assert_eq!(formula.cached(2), None);

        formula.invalidate();
        assert_eq!(formula.cached(1), None);
    }
}
