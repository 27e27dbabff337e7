//! Narrow interface to an exact mixed-integer programming backend.
//!
//! The formulation only talks to a [`SolverEngine`]; it never inspects the search state of the backend.
//! [`MicrolpEngine`] is the bundled implementation.

mod microlp_engine;

use std::time::Duration;

#[doc(inline)]
pub use microlp_engine::MicrolpEngine;

/// Handle to a decision variable created by a [`SolverEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub usize);

/// A `(variable, coefficient)` pair of a linear expression.
pub type LinearTerm = (VarId, f64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectiveSense {
    Minimize,
    Maximize,
}

/// Outcome of [`SolverEngine::solve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// A proven optimal solution is available
    Optimal,
    /// The backend proved that no feasible solution exists
    Infeasible,
    /// The search ended without a proof either way (budget exhausted, aborted, backend failure)
    NotSolved,
}

/// Resources a single solve may consume. An exhausted budget results in [`SolveStatus::NotSolved`].
///
/// A backend that cannot interrupt its search, like [`MicrolpEngine`], stops waiting at the time limit
/// but leaves the search running on a detached thread until it ends.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SolveBudget {
    /// Maximum wall-clock time, `None` for no limit
    pub time_limit: Option<Duration>,
}

impl SolveBudget {
    pub fn unlimited() -> Self {
        Self { time_limit: None }
    }

    pub fn with_time_limit(time_limit: Duration) -> Self {
        Self {
            time_limit: Some(time_limit),
        }
    }
}

/// Capability of an exact mixed-integer programming backend, as consumed by the formulation.
pub trait SolverEngine {
    /// Creates a binary (0/1) decision variable. `name` is only used for debugging.
    fn add_binary_var(&mut self, name: &str) -> VarId;

    /// Adds the linear constraint `lower <= sum(coef * var) <= upper`.
    /// Use `f64::NEG_INFINITY` or `f64::INFINITY` for an absent side.
    fn add_constraint(&mut self, terms: &[LinearTerm], lower: f64, upper: f64);

    /// Replaces the objective function.
    fn set_objective(&mut self, terms: &[LinearTerm], sense: ObjectiveSense);

    /// Runs the exact search, blocking until a proof is reached or the budget is exhausted.
    fn solve(&mut self, budget: SolveBudget) -> SolveStatus;

    /// Value of `var` in the last optimal solution, `None` if there is none.
    /// Binary variables may carry floating-point slack around 0 and 1.
    fn value(&self, var: VarId) -> Option<f64>;

    /// Objective value of the last optimal solution, `None` if there is none.
    fn objective_value(&self) -> Option<f64>;

    fn n_vars(&self) -> usize;

    fn n_constraints(&self) -> usize;
}
