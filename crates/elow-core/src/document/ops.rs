use super::{Document, UndoAction};
use crate::error::{ElowError, Result};
use elow_engine::engine::{
    Cell, CellRef, CellType, MaybeFloat, format_number, format_value, parse,
};
use tracing::{debug, info};

impl Document {
    /// Push an undo action before modifying a cell
    fn push_undo(&mut self, cell_ref: CellRef, new_cell: Option<Cell>) {
        let old_cell = self.sheet.get(&cell_ref);
        self.undo_stack.push(UndoAction {
            cell_ref,
            old_cell,
            new_cell,
        });
        self.redo_stack.clear();
        if self.undo_stack.len() > super::state::MAX_UNDO_STACK {
            self.undo_stack.remove(0);
        }
    }

    /// Apply a historical cell state (undo/redo) with the same overwrite semantics as edits.
    fn apply_history_cell_state(&mut self, cell_ref: CellRef, state: Option<Cell>) {
        match state {
            Some(mut cell) => {
                // Historical formula snapshots carry memos from an older cycle.
                cell.invalidate();
                self.sheet.put(cell_ref, cell);
            }
            None => {
                self.sheet.remove(&cell_ref);
            }
        }
    }

    /// Set cell contents from input string.
    ///
    /// A formula that fails to parse is rejected and the cell keeps its
    /// previous contents.
    pub fn set_cell_from_input(&mut self, cell_ref: CellRef, input: &str) -> Result<()> {
        self.sheet.check_bounds(&cell_ref)?;
        let cell = Cell::from_input(input).inspect_err(|e| {
            debug!(%cell_ref, input, error = %e, "rejected edit");
        })?;

        let new_cell = (!cell.is_empty()).then(|| cell.clone());
        self.push_undo(cell_ref, new_cell);
        self.sheet.put(cell_ref, cell);
        info!(%cell_ref, "cell updated");
        Ok(())
    }

    /// Clear the specified cell
    pub fn clear_cell(&mut self, cell_ref: &CellRef) {
        if self.sheet.get(cell_ref).is_some() {
            self.push_undo(*cell_ref, None);
            self.sheet.remove(cell_ref);
                info!(%cell_ref, "cell cleared");
        }
    }

    /// Undo the last action. Returns the cell it touched.
    pub fn undo(&mut self) -> Result<CellRef> {
        let action = self.undo_stack.pop().ok_or(ElowError::NothingToUndo)?;

        // Push inverse to redo stack
        let current = self.sheet.get(&action.cell_ref);
        self.redo_stack.push(UndoAction {
            cell_ref: action.cell_ref,
            old_cell: action.old_cell.clone(), // State after undo (for undo-after-redo)
            new_cell: current,                 // State before undo (what redo restores)
        });

        self.apply_history_cell_state(action.cell_ref, action.old_cell);
        Ok(action.cell_ref)
    }

    /// Redo the last undone action. Returns the cell it touched.
    pub fn redo(&mut self) -> Result<CellRef> {
        let action = self.redo_stack.pop().ok_or(ElowError::NothingToRedo)?;

        let current = self.sheet.get(&action.cell_ref);
        self.undo_stack.push(UndoAction {
            cell_ref: action.cell_ref,
            old_cell: current,
            new_cell: action.new_cell.clone(),
        });

        self.apply_history_cell_state(action.cell_ref, action.new_cell);
        Ok(action.cell_ref)
    }

    /// Finish an edit/display cycle: formulas recompute on their next read.
    pub fn end_cycle(&mut self) -> u64 {
        self.sheet.advance_version()
    }

    /// Resolved numeric value of a cell.
    pub fn cell_value(&self, cell_ref: &CellRef) -> MaybeFloat {
        self.sheet.value(cell_ref)
    }

    /// Get the display value for a cell
    pub fn cell_display(&self, cell_ref: &CellRef) -> String {
        let Some(cell) = self.sheet.get(cell_ref) else {
            return String::new();
        };
        match &cell.contents {
            CellType::Empty => String::new(),
            CellType::Text(s) => s.clone(),
            CellType::Number(n) => format_number(*n),
            CellType::Formula(_) => format_value(&self.sheet.value(cell_ref)),
        }
    }

    /// Evaluate a formula against the sheet without storing it.
    /// A leading `=` is optional.
    pub fn evaluate(&self, formula: &str) -> Result<MaybeFloat> {
        let formula = formula.trim();
        let formula = formula.strip_prefix('=').unwrap_or(formula);
        let expr = parse(formula)?;
        Ok(expr.execute(&self.sheet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elow_engine::engine::ExprErrorType;

    fn at(col: usize, row: usize) -> CellRef {
        CellRef::new(col, row)
    }

    #[test]
    fn test_set_and_display() {
        let mut doc = Document::new(10, 10);
        doc.set_cell_from_input(at(0, 0), "5").unwrap();
        doc.set_cell_from_input(at(1, 0), "=:0:0*2").unwrap();
        doc.set_cell_from_input(at(2, 0), "label").unwrap();
        doc.set_cell_from_input(at(3, 0), "=:2:0+1").unwrap();

        assert_eq!(doc.cell_display(&at(0, 0)), "5");
        assert_eq!(doc.cell_display(&at(1, 0)), "10");
        assert_eq!(doc.cell_display(&at(2, 0)), "label");
        assert_eq!(doc.cell_display(&at(3, 0)), "!#TYPE");
        assert_eq!(doc.cell_display(&at(4, 0)), "");
    }

    #[test]
    fn test_invalid_formula_leaves_cell_untouched() {
        let mut doc = Document::new(10, 10);
        doc.set_cell_from_input(at(0, 0), "=1+2").unwrap();

        for bad in ["=1+", "=(1+2", "=:1:x", "=foo(1,"] {
            let err = doc.set_cell_from_input(at(0, 0), bad).unwrap_err();
            assert!(matches!(err, ElowError::InvalidFormula(_)));
        }

        assert_eq!(doc.cell_display(&at(0, 0)), "3");
        assert_eq!(doc.undo_stack.len(), 1);
    }

    #[test]
    fn test_out_of_bounds_edit() {
        let mut doc = Document::new(10, 10);
        let err = doc.set_cell_from_input(at(10, 0), "1").unwrap_err();
        assert_eq!(err.to_string(), "Cell :10:0 is outside the 10x10 sheet");
    }

    #[test]
    fn test_reference_outside_sheet() {
        let doc = Document::new(10, 10);
        assert_eq!(doc.evaluate(":1000:1000").unwrap(), Err(ExprErrorType::Position));
    }

    #[test]
    fn test_memo_needs_version_bump() {
        let mut doc = Document::new(10, 10);
        doc.set_cell_from_input(at(0, 0), "1").unwrap();
        doc.set_cell_from_input(at(0, 1), "=:0:0+1").unwrap();
        assert_eq!(doc.cell_value(&at(0, 1)), Ok(2.0));

        doc.set_cell_from_input(at(0, 0), "10").unwrap();
        assert_eq!(doc.cell_value(&at(0, 1)), Ok(2.0));

        doc.end_cycle();
        assert_eq!(doc.cell_value(&at(0, 1)), Ok(11.0));
        assert_eq!(doc.evaluate(":0:0+1").unwrap(), Ok(11.0));
    }

    #[test]
    fn test_empty_input_clears() {
        let mut doc = Document::new(10, 10);
        doc.set_cell_from_input(at(0, 0), "7").unwrap();
        doc.set_cell_from_input(at(0, 0), "   ").unwrap();
        assert!(doc.sheet.get(&at(0, 0)).is_none());
    }

    #[test]
    fn test_undo_redo() {
        let mut doc = Document::new(10, 10);
        doc.set_cell_from_input(at(0, 0), "1").unwrap();
        doc.set_cell_from_input(at(0, 0), "2").unwrap();

        assert_eq!(doc.undo().unwrap(), at(0, 0));
        assert_eq!(doc.cell_display(&at(0, 0)), "1");
        doc.undo().unwrap();
        assert!(doc.sheet.get(&at(0, 0)).is_none());
        assert!(matches!(doc.undo(), Err(ElowError::NothingToUndo)));

        doc.redo().unwrap();
        doc.redo().unwrap();
        assert_eq!(doc.cell_display(&at(0, 0)), "2");
        assert!(matches!(doc.redo(), Err(ElowError::NothingToRedo)));
    }

    #[test]
    fn test_undo_restores_formula_without_stale_memo() {
        let mut doc = Document::new(10, 10);
        doc.set_cell_from_input(at(0, 0), "1").unwrap();
        doc.set_cell_from_input(at(0, 1), "=:0:0*3").unwrap();
        assert_eq!(doc.cell_value(&at(0, 1)), Ok(3.0));

        doc.set_cell_from_input(at(0, 1), "0").unwrap();
        // Same cycle, so a restored memo would still look current.
        doc.sheet.put(at(0, 0), Cell::new_number(2.0));
        doc.undo().unwrap();
        assert_eq!(doc.cell_value(&at(0, 1)), Ok(6.0));
    }

    #[test]
    fn test_clear_cell() {
        let mut doc = Document::new(10, 10);
        doc.set_cell_from_input(at(2, 2), "\"hi\"").unwrap();
        doc.clear_cell(&at(2, 2));
        assert_eq!(doc.cell_display(&at(2, 2)), "");
        doc.undo().unwrap();
        assert_eq!(doc.cell_display(&at(2, 2)), "hi");
    }

    #[test]
    fn test_evaluate_accepts_leading_equals() {
        let doc = Document::default();
        assert_eq!(doc.evaluate("=1+2*3").unwrap(), Ok(7.0));
        assert_eq!(doc.evaluate("(1+2)*3").unwrap(), Ok(9.0));
        assert!(doc.evaluate("1+").is_err());
    }

    #[test]
    fn test_self_reference_is_cycle() {
        let mut doc = Document::new(4, 4);
        doc.set_cell_from_input(at(0, 0), "=:0:0+1").unwrap();
        assert_eq!(doc.cell_display(&at(0, 0)), "!#CYCLE");
    }
}
