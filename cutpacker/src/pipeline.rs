use std::time::{Duration, Instant};

use log::{info, warn};
use rayon::prelude::*;

use crate::bounds::l1_bound;
use crate::engine::SolverEngine;
use crate::entities::{Assignment, PackingInstance};
use crate::error::{PackingError, Result};
use crate::extract::SolutionExtractor;
use crate::formulation::FormulationBuilder;
use crate::util::{BinLimit, FPA, SolverConfig};

/// Optimal packing of a [`PackingInstance`].
#[derive(Debug, Clone)]
pub struct PackingSolution {
    pub assignment: Assignment,
    /// Number of bins used, the optimal objective value
    pub objective: usize,
    /// The L1 bound of the instance, never above `objective`
    pub lower_bound: usize,
    /// Wall-clock time spent in formulation, search and extraction
    pub run_time: Duration,
}

/// Runs the full pipeline: bound, formulation, exact search and extraction.
#[derive(Debug, Clone, Copy)]
pub struct Packer {
    pub config: SolverConfig,
    builder: FormulationBuilder,
    extractor: SolutionExtractor,
}

impl Packer {
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            builder: FormulationBuilder::from_config(&config),
            extractor: SolutionExtractor::from_config(&config),
        })
    }

    /// Solves `instance` to optimality on a fresh `engine`.
    pub fn solve<E: SolverEngine + ?Sized>(
        &self,
        instance: &PackingInstance,
        engine: &mut E,
    ) -> Result<PackingSolution> {
        let start = Instant::now();
        let lower_bound = l1_bound(instance);
        info!(
            "[PACK] {} items, capacity {}, L1 bound {}",
            instance.n_items(),
            instance.bin_capacity(),
            lower_bound
        );

        let budget = self.config.budget();
        let (model, status) = self.builder.solve(instance, engine, budget);
        let assignment = match self.extractor.extract(instance, &model, engine, status, budget) {
            Err(PackingError::Infeasible) => {
                return Err(self.explain_infeasible(instance, model.n_bins));
            }
            res => res?,
        };
        let objective = assignment.n_bins();

        if objective < lower_bound || objective > instance.max_bins() {
            return Err(PackingError::InternalInconsistency(format!(
                "{objective} bins used, outside of [{lower_bound}, {}]",
                instance.max_bins()
            )));
        }

        match engine.objective_value() {
            Some(obj) if (obj - objective as f64).abs() <= 0.5 => {}
            reported => {
                return Err(PackingError::InternalInconsistency(format!(
                    "solver reports objective {reported:?} but {objective} bins are used"
                )));
            }
        }

        if objective > lower_bound {
            info!("[PACK] optimum of {objective} bins exceeds the L1 bound of {lower_bound}");
        }

        let run_time = start.elapsed();
        info!(
            "[PACK] optimal packing uses {objective} bins ({:.3}ms)",
            run_time.as_secs_f64() * 1000.0
        );

        Ok(PackingSolution {
            assignment,
            objective,
            lower_bound,
            run_time,
        })
    }

    /// Tells an infeasible instance apart from a fixed bin limit that is too small.
    /// When every item fits a bin of its own, one bin per item is always a packing.
    fn explain_infeasible(&self, instance: &PackingInstance, n_bins: usize) -> PackingError {
        let capacity = FPA(instance.bin_capacity());
        let every_item_fits = instance.items().iter().all(|item| FPA(item.weight) <= capacity);
        match (self.config.bin_limit, every_item_fits) {
            (BinLimit::Fixed(k), true) if n_bins < instance.max_bins() => {
                warn!("[PACK] no packing within the fixed limit of {k} bins");
                PackingError::InvalidArgument(format!(
                    "bin limit of {k} bins is below the optimum, every item fits a bin of its own"
                ))
            }
            _ => PackingError::Infeasible,
        }
    }

    /// Solves independent instances in parallel, each on its own engine produced by `new_engine`.
    ///
    /// Results are returned in the order of `instances`.
    /// With a time limit, every instance that runs out of time leaves its solver thread running in the background
    /// until the search ends (see [`MicrolpEngine::live_workers`](crate::engine::MicrolpEngine::live_workers)),
    /// so a batch of hard instances can keep more threads busy than the rayon pool.
    pub fn solve_batch<E, F>(
        &self,
        instances: &[PackingInstance],
        new_engine: F,
    ) -> Vec<Result<PackingSolution>>
    where
        E: SolverEngine,
        F: Fn() -> E + Sync,
    {
        let results = instances
            .par_iter()
            .map(|instance| {
                let mut engine = new_engine();
                self.solve(instance, &mut engine)
            })
            .collect::<Vec<_>>();

        let n_failed = results.iter().filter(|r| r.is_err()).count();
        if n_failed > 0 {
            warn!("[PACK] {n_failed}/{} instances without an optimal packing", instances.len());
        }
        results
    }
}

impl Default for Packer {
    fn default() -> Self {
        let config = SolverConfig::default();
        Self {
            config,
            builder: FormulationBuilder::from_config(&config),
            extractor: SolutionExtractor::from_config(&config),
        }
    }
}
