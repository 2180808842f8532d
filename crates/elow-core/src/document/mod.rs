//! Document state and logic (UI-agnostic).

mod ops;
mod sheet;
mod state;

pub use sheet::{DEFAULT_COLS, DEFAULT_ROWS, Sheet};
pub use state::{Document, UndoAction};
