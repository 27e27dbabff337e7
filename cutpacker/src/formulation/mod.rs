//! 0/1 integer program for the one-dimensional Bin Packing Problem.
//!
//! For items `i` and candidate bins `j`:
//! * `x[i][j] = 1` iff item `i` is packed in bin `j`
//! * `y[j] = 1` iff bin `j` is used
//!
//! subject to `sum_j x[i][j] = 1` for every item and `sum_i w[i] * x[i][j] <= C * y[j]` for every bin,
//! minimizing `sum_j y[j]`.

mod builder;
mod model;

#[doc(inline)]
pub use builder::FormulationBuilder;
#[doc(inline)]
pub use model::PackingModel;
