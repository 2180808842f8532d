//! Bounded sheet storage and the version counter formulas are memoized against.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::{ElowError, Result};
use elow_engine::engine::{
    Cell, CellRef, ExprErrorType, Grid, MaybeFloat, Table, Trail, resolve_cell,
};

pub const DEFAULT_COLS: usize = 26;
pub const DEFAULT_ROWS: usize = 100;

/// A fixed-size grid of cells plus a global version counter.
///
/// The version is the only cache invalidation signal: every formula result
/// is stamped with the version it was computed at and is recomputed on the
/// first read after [`Sheet::advance_version`].
pub struct Sheet {
    /// Sparse cell storage, shared through the `Grid` alias's `Arc`
    grid: Grid,
    cols: usize,
    rows: usize,
    version: u64,
}

impl Sheet {
    pub fn new(cols: usize, rows: usize) -> Self {
        Sheet {
            grid: Arc::new(DashMap::new()),
            cols,
            rows,
            version: 1,
        }
    }

    pub fn contains(&self, cell_ref: &CellRef) -> bool {
        cell_ref.col < self.cols && cell_ref.row < self.rows
    }

    pub(crate) fn check_bounds(&self, cell_ref: &CellRef) -> Result<()> {
        if self.contains(cell_ref) {
            Ok(())
        } else {
            Err(ElowError::OutOfBounds {
                cell: *cell_ref,
                cols: self.cols,
                rows: self.rows,
            })
        }
    }

    /// A snapshot of the cell at `cell_ref`, if one is stored.
    pub fn get(&self, cell_ref: &CellRef) -> Option<Cell> {
        self.grid.get(cell_ref).map(|entry| entry.clone())
    }

    /// Store `cell`, replacing whatever was there. Empty cells are not stored.
    pub(crate) fn put(&self, cell_ref: CellRef, cell: Cell) {
        if cell.is_empty() {
            self.grid.remove(&cell_ref);
        } else {
            self.grid.insert(cell_ref, cell);
        }
    }

    pub(crate) fn remove(&self, cell_ref: &CellRef) -> Option<Cell> {
        self.grid.remove(cell_ref).map(|(_, cell)| cell)
    }

    /// Start a new edit/display cycle. Every memoized formula becomes stale.
    pub fn advance_version(&mut self) -> u64 {
        self.version += 1;
        debug!(version = self.version, "table version advanced");
        self.version
    }

    /// Resolved value of a cell, as a formula referencing it would see it.
    pub fn value(&self, cell_ref: &CellRef) -> MaybeFloat {
        self.resolve(*cell_ref, &mut Trail::default())
    }

    /// All stored cells in row-major order.
    pub fn cells(&self) -> Vec<(CellRef, Cell)> {
        let mut cells: Vec<(CellRef, Cell)> = self
            .grid
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        cells.sort_by_key(|(cell_ref, _)| *cell_ref);
        cells
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new(DEFAULT_COLS, DEFAULT_ROWS)
    }
}

impl Table for Sheet {
    fn version(&self) -> u64 {
        self.version
    }

    fn resolve(&self, cell: CellRef, trail: &mut Trail) -> MaybeFloat {
        if !self.contains(&cell) {
            return Err(ExprErrorType::Position);
        }
        resolve_cell(&self.grid, cell, self, trail)
    }
}
