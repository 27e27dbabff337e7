use itertools::Itertools;
use log::{debug, error};

use crate::engine::{SolveBudget, SolveStatus, SolverEngine, VarId};
use crate::entities::{Assignment, PackedBin, PackingInstance};
use crate::error::{PackingError, Result};
use crate::formulation::PackingModel;
use crate::util::assertions::assignment_is_feasible;
use crate::util::{FPA, SolverConfig};

/// Reads solved variable values back into an [`Assignment`] and validates it against the instance.
#[derive(Debug, Clone, Copy)]
pub struct SolutionExtractor {
    /// Maximum distance of a solved binary value from 0 or 1
    pub integrality_tolerance: f64,
}

impl SolutionExtractor {
    pub fn new(integrality_tolerance: f64) -> Self {
        Self {
            integrality_tolerance,
        }
    }

    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(config.integrality_tolerance)
    }

    /// Turns the outcome of a solve into an [`Assignment`].
    ///
    /// `Infeasible` and `NotSolved` map onto their own error kinds. Any violation of the formulation's
    /// invariants in the solved values is reported as [`PackingError::InternalInconsistency`].
    pub fn extract<E: SolverEngine + ?Sized>(
        &self,
        instance: &PackingInstance,
        model: &PackingModel,
        engine: &E,
        status: SolveStatus,
        budget: SolveBudget,
    ) -> Result<Assignment> {
        match status {
            SolveStatus::Optimal => {}
            SolveStatus::Infeasible => return Err(PackingError::Infeasible),
            SolveStatus::NotSolved => {
                return Err(PackingError::Unsolved {
                    time_limit: budget.time_limit,
                });
            }
        }

        if model.n_items != instance.n_items() {
            return inconsistency(format!(
                "model was built for {} items, instance has {}",
                model.n_items,
                instance.n_items()
            ));
        }

        let mut bins = vec![];
        for j in 0..model.n_bins {
            let y = self.binary_value(engine, model.y(j), || format!("y_{j}"))?;
            let item_ids = (0..model.n_items)
                .map(|i| {
                    self.binary_value(engine, model.x(i, j), || format!("x_{i}_{j}"))
                        .map(|packed| (i, packed))
                })
                .filter_map_ok(|(i, packed)| packed.then_some(i))
                .collect::<Result<Vec<usize>>>()?;

            match (y, item_ids.is_empty()) {
                (true, _) => {
                    let load = item_ids.iter().map(|&i| instance.item(i).weight).sum();
                    bins.push(PackedBin {
                        index: j,
                        item_ids,
                        load,
                    });
                }
                (false, true) => {}
                (false, false) => {
                    return inconsistency(format!(
                        "bin {j} is marked unused but holds items {item_ids:?}"
                    ));
                }
            }
        }

        let assignment = Assignment::new(bins);
        self.validate(instance, &assignment)?;

        debug!(
            "[EXTRACT] {} items packed in {} bins",
            assignment.n_items(),
            assignment.n_bins()
        );
        debug_assert!(assignment_is_feasible(instance, &assignment));

        Ok(assignment)
    }

    /// Checks that every item is packed exactly once and no bin exceeds the capacity.
    pub fn validate(&self, instance: &PackingInstance, assignment: &Assignment) -> Result<()> {
        let per_item = assignment.bins_per_item(instance.n_items());
        if let Some((id, bins)) = per_item.iter().enumerate().find(|(_, bins)| bins.len() != 1) {
            return inconsistency(format!(
                "item {} is packed in {} bins {:?}, expected exactly one",
                instance.item(id).name,
                bins.len(),
                bins
            ));
        }

        let capacity = instance.bin_capacity();
        if let Some(bin) = assignment
            .bins
            .iter()
            .find(|bin| FPA(bin.load) > FPA(capacity))
        {
            return inconsistency(format!(
                "bin {} holds {} (items {}), exceeding capacity {capacity}",
                bin.index,
                bin.load,
                bin.item_ids
                    .iter()
                    .map(|&i| instance.item(i).name.as_str())
                    .join(", ")
            ));
        }
        Ok(())
    }

    fn binary_value<E: SolverEngine + ?Sized>(
        &self,
        engine: &E,
        var: Option<VarId>,
        name: impl Fn() -> String,
    ) -> Result<bool> {
        let value = match var.and_then(|v| engine.value(v)) {
            Some(value) => value,
            None => return inconsistency(format!("no solved value for {}", name())),
        };

        if (value - 1.0).abs() <= self.integrality_tolerance {
            Ok(true)
        } else if value.abs() <= self.integrality_tolerance {
            Ok(false)
        } else {
            inconsistency(format!(
                "{} = {value} is not binary within tolerance {}",
                name(),
                self.integrality_tolerance
            ))
        }
    }
}

impl Default for SolutionExtractor {
    fn default() -> Self {
        Self::from_config(&SolverConfig::default())
    }
}

fn inconsistency<T>(msg: String) -> Result<T> {
    error!("[EXTRACT] {msg}");
    Err(PackingError::InternalInconsistency(msg))
}
