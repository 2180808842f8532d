use super::{DEFAULT_COLS, DEFAULT_ROWS, Sheet};
use elow_engine::engine::{Cell, CellRef};

/// Maximum number of undo entries to keep
pub(crate) const MAX_UNDO_STACK: usize = 100;

/// Represents an undoable action for a single cell
#[derive(Clone, Debug)]
pub struct UndoAction {
    pub cell_ref: CellRef,
    pub old_cell: Option<Cell>,
    pub new_cell: Option<Cell>,
}

/// UI-agnostic document state for the spreadsheet.
pub struct Document {
    /// The cells and the version counter
    pub sheet: Sheet,
    /// Undo stack
    pub undo_stack: Vec<UndoAction>,
    /// Redo stack
    pub redo_stack: Vec<UndoAction>,
}

impl Document {
    /// Create an empty document over a `cols` x `rows` sheet.
    pub fn new(cols: usize, rows: usize) -> Self {
        Document {
            sheet: Sheet::new(cols, rows),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_COLS, DEFAULT_ROWS)
    }
}
