//! elow-core - UI-agnostic sheet model.

pub mod document;
pub mod error;

pub use document::{Document, Sheet, UndoAction};
pub use error::{ElowError, Result};

pub use elow_engine::engine::CellRef;
