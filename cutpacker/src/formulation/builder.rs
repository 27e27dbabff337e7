use std::collections::HashMap;

use itertools::{Itertools, iproduct};
use log::{debug, info};

use crate::bounds::ffd_bound;
use crate::engine::{ObjectiveSense, SolveBudget, SolveStatus, SolverEngine, VarId};
use crate::entities::PackingInstance;
use crate::formulation::PackingModel;
use crate::util::{BinLimit, SolverConfig};

/// Emits the bin packing integer program into a [`SolverEngine`].
///
/// The builder performs no search of its own, it only declares variables, constraints and the objective.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormulationBuilder {
    pub bin_limit: BinLimit,
    pub symmetry_breaking: bool,
}

impl FormulationBuilder {
    pub fn new(bin_limit: BinLimit, symmetry_breaking: bool) -> Self {
        Self {
            bin_limit,
            symmetry_breaking,
        }
    }

    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(config.bin_limit, config.symmetry_breaking)
    }

    /// Number of candidate bins to materialize for `instance`.
    pub fn n_candidate_bins(&self, instance: &PackingInstance) -> usize {
        match self.bin_limit {
            BinLimit::ItemCount => instance.max_bins(),
            BinLimit::FirstFitDecreasing => ffd_bound(instance),
            BinLimit::Fixed(k) => k.min(instance.max_bins()),
        }
    }

    /// Declares the full model of `instance` in `engine`.
    ///
    /// With [`BinLimit::ItemCount`] and no symmetry breaking this creates exactly
    /// `n * n` assignment variables, `n` usage variables and `2n` constraints for `n` items.
    pub fn build<E: SolverEngine + ?Sized>(
        &self,
        instance: &PackingInstance,
        engine: &mut E,
    ) -> PackingModel {
        let n_items = instance.n_items();
        let n_bins = self.n_candidate_bins(instance);
        let capacity = instance.bin_capacity();
        let constraints_before = engine.n_constraints();

        let assign_vars: HashMap<(usize, usize), VarId> = iproduct!(0..n_items, 0..n_bins)
            .map(|(i, j)| ((i, j), engine.add_binary_var(&format!("x_{i}_{j}"))))
            .collect();

        let bin_vars = (0..n_bins)
            .map(|j| engine.add_binary_var(&format!("y_{j}")))
            .collect_vec();

        //every item is packed in exactly one bin
        for i in 0..n_items {
            let terms = (0..n_bins)
                .map(|j| (assign_vars[&(i, j)], 1.0))
                .collect_vec();
            engine.add_constraint(&terms, 1.0, 1.0);
        }

        //0 <= C * y[j] - sum_i w[i] * x[i][j]
        //enforces the capacity and forces y[j] to 1 as soon as anything is packed in bin j
        for (j, &y) in bin_vars.iter().enumerate() {
            let terms = std::iter::once((y, capacity))
                .chain(
                    instance
                        .items()
                        .iter()
                        .map(|item| (assign_vars[&(item.id, j)], -item.weight)),
                )
                .collect_vec();
            engine.add_constraint(&terms, 0.0, f64::INFINITY);
        }

        if self.symmetry_breaking {
            for pair in bin_vars.windows(2) {
                engine.add_constraint(&[(pair[0], 1.0), (pair[1], -1.0)], 0.0, f64::INFINITY);
            }
        }

        let objective = bin_vars.iter().map(|&y| (y, 1.0)).collect_vec();
        engine.set_objective(&objective, ObjectiveSense::Minimize);

        let model = PackingModel {
            n_items,
            n_bins,
            assign_vars,
            bin_vars,
            n_constraints: engine.n_constraints() - constraints_before,
        };

        debug!(
            "[FORM] bin limit {:?}: {} candidate bins for {} items",
            self.bin_limit, n_bins, n_items
        );
        info!(
            "[FORM] model built: {} variables, {} constraints",
            model.n_vars(),
            model.n_constraints
        );
        model
    }

    /// Builds the model of `instance` and runs the exact search within `budget`.
    pub fn solve<E: SolverEngine + ?Sized>(
        &self,
        instance: &PackingInstance,
        engine: &mut E,
        budget: SolveBudget,
    ) -> (PackingModel, SolveStatus) {
        let model = self.build(instance, engine);
        let status = engine.solve(budget);
        (model, status)
    }
}
