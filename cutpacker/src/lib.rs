//! Exact one-dimensional bin packing.
//!
//! A [`PackingInstance`](entities::PackingInstance) is translated into a 0/1 integer program by the
//! [`FormulationBuilder`](formulation::FormulationBuilder), handed to any backend implementing
//! [`SolverEngine`](engine::SolverEngine), and the solved values are read back into an
//! [`Assignment`](entities::Assignment) by the [`extract`] module.

/// Cheap analytical bounds on the number of bins
pub mod bounds;

/// The seam between the formulation and a mixed-integer programming backend
pub mod engine;

/// Entities to model the one-dimensional Bin Packing Problem
pub mod entities;

/// Error kinds distinguished by the library
pub mod error;

/// Reading solved variable values back into a packing
pub mod extract;

/// Encoding a packing instance as a 0/1 integer program
pub mod formulation;

/// Importing problem instances into and exporting solutions out of this library
pub mod io;

/// End-to-end solving of one or many instances
pub mod pipeline;

/// Helper functions which do not belong to any specific module
pub mod util;
