//! Error types for elow core.

use thiserror::Error;

use elow_engine::engine::{CellRef, ParseError};

/// Errors that can occur while editing a sheet
#[derive(Error, Debug)]
pub enum ElowError {
    #[error(transparent)]
    InvalidFormula(#[from] ParseError),

    #[error("Cell {cell} is outside the {cols}x{rows} sheet")]
    OutOfBounds {
        cell: CellRef,
        cols: usize,
        rows: usize,
    },

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}

pub type Result<T> = std::result::Result<T, ElowError>;
