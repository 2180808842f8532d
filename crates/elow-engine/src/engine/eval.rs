//! Formula evaluation.

use tracing::trace;

use super::expr::{Expr, ExprKind};
use super::{ExprErrorType, MaybeFloat, Table, Trail};
use crate::builtins;

impl Expr {
    /// Evaluate against `table`.
    pub fn execute(&self, table: &dyn Table) -> MaybeFloat {
        self.execute_in(table, &mut Trail::default())
    }

    /// Evaluate as part of a larger resolution already tracked by `trail`.
    pub fn execute_in(&self, table: &dyn Table, trail: &mut Trail) -> MaybeFloat {
        match self.kind() {
            ExprKind::Constant(value) => Ok(*value),
            ExprKind::CellRef(cell) => table.resolve(*cell, trail),
            ExprKind::Binary { op, left, right } => {
                // Both sides run even when the left one already failed.
                let left = left.execute_in(table, trail);
                let right = right.execute_in(table, trail);
                Ok(op.apply(left?, right?))
            }
            ExprKind::FunctionCall { name, args } => call(name, args, table, trail),
        }
    }
}

fn call(name: &str, args: &[Expr], table: &dyn Table, trail: &mut Trail) -> MaybeFloat {
    let Some(builtin) = builtins::lookup(name) else {
        trace!(name, "unknown function");
        return Err(ExprErrorType::Name);
    };
    let values = args
        .iter()
        .map(|arg| arg.execute_in(table, trail))
        .collect::<Result<Vec<f64>, ExprErrorType>>()?;
    builtin.call(&values)
}
