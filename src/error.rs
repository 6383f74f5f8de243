//! Error types.
//!
//! Query-construction errors (bad dimension, bad index, malformed comparisons,
//! mixing spaces) are surfaced immediately. Solver outcomes and post-solve
//! evaluation failures share the same enum so callers can match on one type.

use thiserror::Error;

use crate::constraint::Constraint;
use crate::space::SpaceId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Variable count {count} is out of range [1, {max}]")]
    InvalidDimension { count: usize, max: usize },

    #[error("Variable index {index} is out of range for {count} variables")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Specify an elementary event like (x[0] == true) or (x[0] == x[1]): {reason}")]
    InvalidComparison { reason: String },

    #[error("Comparison operand must be a finite real number, got {value}")]
    InvalidComparisonOperand { value: f64 },

    #[error("Events belong to different atom spaces ({left} and {right})")]
    IncompatibleEvents { left: SpaceId, right: SpaceId },

    #[error("No distribution satisfies the {} assumption(s)", .assumptions.len())]
    Infeasible { assumptions: Vec<Constraint> },

    #[error("Objective is unbounded under the {} assumption(s)", .assumptions.len())]
    Unbounded { assumptions: Vec<Constraint> },

    #[error("Solver failed: {0}")]
    Solver(String),

    #[error("Value is undefined: the atom space has not been solved")]
    Undefined,

    #[error("Conditioning event has zero probability")]
    DivisionByZero,
}

pub type Result<T> = std::result::Result<T, Error>;
