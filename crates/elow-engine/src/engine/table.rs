//! The read interface formulas need from the surrounding sheet.

use super::{CellRef, MaybeFloat, Trail};

/// Cell lookup plus the version counter that stamps memoized results.
pub trait Table {
    /// Current version. Bumped by the owner once per edit/display cycle;
    /// memoized formula results stamped with an older version are stale.
    fn version(&self) -> u64;

    /// Resolved value of the cell at `cell`.
    ///
    /// Out-of-range coordinates yield `Position`, non-numeric cells yield
    /// `CellType`, and formula cells yield their own (memoized) result.
    /// `trail` carries the formula cells already being evaluated.
    fn resolve(&self, cell: CellRef, trail: &mut Trail) -> MaybeFloat;
}
