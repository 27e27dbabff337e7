//! Helper functions which do not belong to any specific module

/// Checks to verify correctness of the state of the system, mostly used in `debug_assert!()` blocks
pub mod assertions;

/// Configuration of the solving pipeline
pub mod config;

mod fpa;

#[doc(inline)]
pub use config::{BinLimit, SolverConfig};
#[doc(inline)]
pub use fpa::FPA;
