use std::io::Write;
use std::sync::LazyLock;
use std::time::Instant;

use anyhow::{Context, Result};
use cutpacker::bounds::l1_bound;
use cutpacker::engine::MicrolpEngine;
use cutpacker::error::PackingError;
use cutpacker::io::import::{read_config, read_items};
use cutpacker::pipeline::Packer;
use cutpacker::util::SolverConfig;
use jiff::Timestamp;
use log::{info, warn};
use thousands::Separable;

use crate::io::cli::Cli;
use crate::io::output::SolutionOutput;
use crate::io::report;

pub mod io;

pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Reads the data, reports the L1 bound and, unless only the bound is requested, solves and reports the packing.
///
/// An infeasible or unsolved instance is reported on `out` and returned as an error.
pub fn run(args: &Cli, out: &mut impl Write) -> Result<()> {
    let start = Timestamp::now();
    info!("[MAIN] job started at {start}");

    let solver_config = match &args.solver_config {
        None => {
            warn!("[MAIN] No solver config provided, use --solver-config to provide a custom config");
            SolverConfig::default()
        }
        Some(path) => io::read_json(path).context("incorrect solver config file format")?,
    };
    info!("[MAIN] Successfully parsed SolverConfig: {solver_config:?}");

    let ext_config = read_config(&args.config_file).context("incorrect data configuration")?;
    let ext_items = read_items(&args.input_file).context("incorrect item data")?;
    let instance = cutpacker::io::import(&ext_config, &ext_items)?;

    report::write_bound(out, l1_bound(&instance))?;

    let outcome = match args.bound_only {
        true => {
            info!("[MAIN] bound only, exact solve skipped");
            Ok(())
        }
        false => {
            let packer = Packer::new(solver_config)?;
            match packer.solve(&instance, &mut MicrolpEngine::new()) {
                Ok(solution) => {
                    report::write_solution(out, &instance, &solution)?;
                    info!(
                        "[MAIN] {} items packed in {} bins, total weight {}",
                        instance.n_items().separate_with_commas(),
                        solution.objective,
                        solution.assignment.total_load().separate_with_commas()
                    );
                    if let Some(path) = &args.solution_file {
                        let output = SolutionOutput {
                            config: ext_config,
                            items: ext_items,
                            solution: cutpacker::io::export(&instance, &solution),
                            solver_config,
                        };
                        io::write_json(&output, path)?;
                    }
                    Ok(())
                }
                Err(PackingError::Infeasible) => {
                    report::write_infeasible(out, &instance)?;
                    Err(PackingError::Infeasible.into())
                }
                Err(e @ PackingError::Unsolved { .. }) => {
                    report::write_unsolved(out)?;
                    Err(e.into())
                }
                Err(e @ (PackingError::InvalidArgument(_) | PackingError::InternalInconsistency(_))) => {
                    Err(e.into())
                }
            }
        }
    };

    let end = Timestamp::now();
    info!(
        "[MAIN] job completed at {end}, took {:.3}s",
        EPOCH.elapsed().as_secs_f64()
    );
    outcome
}
