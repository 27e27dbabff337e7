use std::time::Duration;

use thiserror::Error;

/// Failure kinds of the packing pipeline.
///
/// `Infeasible` is a proof that no packing exists. `Unsolved` only means the backend stopped before a proof.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PackingError {
    /// Rejected input: non-positive capacity or weight, negative quantity, duplicate item name
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The solver proved that no assignment respects the bin capacity
    #[error("the instance is infeasible: no packing respects the bin capacity")]
    Infeasible,
    /// The solver stopped without a proof of optimality or infeasibility
    #[error("the solver did not complete (time limit: {time_limit:?})")]
    Unsolved { time_limit: Option<Duration> },
    /// The extracted solution violates an invariant of the formulation
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
}

pub type Result<T> = std::result::Result<T, PackingError>;
