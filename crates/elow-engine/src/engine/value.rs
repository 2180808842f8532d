//! Evaluation results.
//!
//! Evaluating a formula never raises: failures are ordinary values of
//! [`ExprErrorType`] carried in the `Err` side of [`MaybeFloat`], so they
//! flow through arithmetic and function calls like any other result.

use thiserror::Error;

/// An error value produced while evaluating a formula.
///
/// The `Display` form is the short token shown in place of a number.
#[derive(Clone, Copy, Debug, Error, Eq, Hash, PartialEq)]
pub enum ExprErrorType {
    /// A referenced cell does not hold a number.
    #[error("!#TYPE")]
    CellType,
    /// Call to a function that is not registered.
    #[error("!#NAME")]
    Name,
    /// Function called with the wrong number of arguments.
    #[error("!#ARG")]
    Argument,
    /// Reference outside the sheet.
    #[error("!#POS")]
    Position,
    /// The cell depends on itself.
    #[error("!#CYCLE")]
    Cycle,
}

/// Scalar-or-error result of evaluating a formula.
pub type MaybeFloat = Result<f64, ExprErrorType>;

#[cfg(test)]
mod tests {
    use super::ExprErrorType;

    #[test]
    fn test_error_tokens() {
        assert_eq!(ExprErrorType::CellType.to_string(), "!#TYPE");
        assert_eq!(ExprErrorType::Name.to_string(), "!#NAME");
        assert_eq!(ExprErrorType::Argument.to_string(), "!#ARG");
        assert_eq!(ExprErrorType::Position.to_string(), "!#POS");
        assert_eq!(ExprErrorType::Cycle.to_string(), "!#CYCLE");
    }
}
