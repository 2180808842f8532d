//! Cell reference parsing and formatting.
//!
//! Formulas name cells by zero-indexed column and row written as
//! `:col:row`, so `:0:0` is the top-left cell and `:2:5` is the third
//! column of the sixth row.
//!
//! # Examples
//!
//! ```
//! use elow_engine::engine::CellRef;
//!
//! let cell = CellRef::from_str(":1:2").unwrap();
//! assert_eq!(cell.col, 1);
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), ":1:2");
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// A reference to a cell by column and row indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell reference written as `:col:row`.
    /// Returns None if the input is invalid.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        Self::parse_colon(name)
    }

    fn parse_colon(name: &str) -> Option<CellRef> {
        let caps = cell_ref_re().captures(name.trim())?;
        let col = caps["col"].parse::<usize>().ok()?;
        let row = caps["row"].parse::<usize>().ok()?;
        Some(CellRef::new(col, row))
    }
}

fn cell_ref_re() -> &'static Regex {
    static CELL_RE: OnceLock<Regex> = OnceLock::new();
    CELL_RE.get_or_init(|| {
        Regex::new(r"^:(?<col>[0-9]+):(?<row>[0-9]+)$").expect("cell reference regex must compile")
    })
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_colon(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}:{}", self.col, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::CellRef;

    #[test]
    fn test_parse_col_then_row() {
        let cell = CellRef::from_str(":3:7").unwrap();
        assert_eq!(cell, CellRef::new(3, 7));
        assert_eq!(cell.col, 3);
        assert_eq!(cell.row, 7);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(CellRef::from_str("").is_none());
        assert!(CellRef::from_str("A1").is_none());
        assert!(CellRef::from_str("1:2").is_none());
        assert!(CellRef::from_str(":1:x").is_none());
        assert!(CellRef::from_str(":-1:2").is_none());
        assert!(CellRef::from_str(":1:2:3").is_none());
    }

    #[test]
    fn test_parse_overflow_returns_none() {
        let huge = format!(":{}:1", "9".repeat(40));
        assert!(CellRef::from_str(&huge).is_none());
    }

    #[test]
    fn test_display_round_trips() {
        let cell = CellRef::new(12, 0);
        assert_eq!(cell.to_string(), ":12:0");
        assert_eq!(cell.to_string().parse::<CellRef>(), Ok(cell));
    }
}
