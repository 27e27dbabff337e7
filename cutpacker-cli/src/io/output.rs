use cutpacker::io::ext_repr::{ExtConfig, ExtItem, ExtSolution};
use cutpacker::util::SolverConfig;
use serde::{Deserialize, Serialize};

/// Everything needed to reproduce and inspect a run
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SolutionOutput {
    pub config: ExtConfig,
    pub items: Vec<ExtItem>,
    pub solution: ExtSolution,
    pub solver_config: SolverConfig,
}
