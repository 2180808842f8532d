//! Circular reference guard for formula evaluation.
//!
//! Resolving a formula cell may evaluate other formula cells, which may in
//! turn point back at the first one. A [`Trail`] records the formula cells
//! currently being evaluated; resolving a cell already on the trail yields
//! [`ExprErrorType::Cycle`](super::ExprErrorType::Cycle) instead of
//! recursing forever.

use std::collections::HashSet;

use super::CellRef;

/// The formula cells on the current evaluation path.
#[derive(Debug, Default)]
pub struct Trail {
    visiting: HashSet<CellRef>,
}

impl Trail {
    /// Step into `cell`. Returns false if it is already being evaluated.
    pub fn enter(&mut self, cell: CellRef) -> bool {
        self.visiting.insert(cell)
    }

    pub fn leave(&mut self, cell: CellRef) {
        self.visiting.remove(&cell);
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        self.visiting.contains(cell)
    }
}
