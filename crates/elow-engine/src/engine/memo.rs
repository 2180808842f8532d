//! Version-stamped formula results.
//!
//! Each formula cell remembers its last result together with the table
//! version it was computed at. Reading the cell again at the same version
//! returns the remembered value; any other version recomputes it. The
//! version is global, so one bump invalidates every formula in the sheet.

use tracing::trace;

use super::cell::{CellType, Grid};
use super::{CellRef, ExprErrorType, MaybeFloat, Table, Trail};

/// A formula result and the table version it was computed at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Memo {
    pub value: MaybeFloat,
    pub version: u64,
}

/// Resolve the cell at `cell` in `grid`, reusing or refreshing formula memos.
///
/// Coordinates are not bounds-checked here; that is the table's job.
/// No grid guard is held while a formula runs, so nested lookups and the
/// final memo write never contend with an outstanding borrow.
pub fn resolve_cell(grid: &Grid, cell: CellRef, table: &dyn Table, trail: &mut Trail) -> MaybeFloat {
    let version = table.version();
    let expr = {
        let Some(entry) = grid.get(&cell) else {
            return Err(ExprErrorType::CellType);
        };
        match &entry.contents {
            CellType::Number(n) => return Ok(*n),
            CellType::Empty | CellType::Text(_) => return Err(ExprErrorType::CellType),
            CellType::Formula(formula) => {
                if let Some(value) = formula.cached(version) {
                    trace!(%cell, version, "memo hit");
                    return value;
                }
                formula.expr().clone()
            }
        }
    };

    if !trail.enter(cell) {
        return Err(ExprErrorType::Cycle);
    }
    trace!(%cell, version, formula = expr.text(), "recomputing");
    let value = expr.execute_in(table, trail);
    trail.leave(cell);

    if let Some(mut entry) = grid.get_mut(&cell)
        && let CellType::Formula(formula) = &mut entry.contents
    {
        formula.store(value, version);
    }
    value
}
