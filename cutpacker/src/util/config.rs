use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::SolveBudget;
use crate::error::{PackingError, Result};

/// How many candidate bins the formulation materializes.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BinLimit {
    /// One candidate bin per item, always sufficient
    #[default]
    ItemCount,
    /// As many candidate bins as a First-Fit-Decreasing packing needs
    FirstFitDecreasing,
    /// A fixed number of candidate bins, clamped to the number of items.
    /// A limit below the optimum is reported as an invalid argument, not as an infeasible instance.
    Fixed(usize),
}

///Configuration of the formulation, the solve budget and the solution extraction
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    ///Wall-clock limit for a single solve in seconds. If undefined, the search runs until it reaches a proof
    pub time_limit_sec: Option<f64>,
    ///Number of candidate bins the formulation creates
    pub bin_limit: BinLimit,
    ///Adds `y[j] >= y[j+1]` to the model so that used bins occupy the lowest indices
    pub symmetry_breaking: bool,
    ///Maximum distance of a solved binary value from 0 or 1
    pub integrality_tolerance: f64,
}

impl SolverConfig {
    pub fn validate(&self) -> Result<()> {
        match self.time_limit_sec {
            Some(t) if !(t.is_finite() && t >= 0.0) => {
                return Err(PackingError::InvalidArgument(format!(
                    "time limit must be a non-negative number of seconds, got {t}"
                )));
            }
            _ => {}
        }
        if !(0.0..0.5).contains(&self.integrality_tolerance) {
            return Err(PackingError::InvalidArgument(format!(
                "integrality tolerance must lie in [0, 0.5), got {}",
                self.integrality_tolerance
            )));
        }
        Ok(())
    }

    pub fn budget(&self) -> SolveBudget {
        SolveBudget {
            time_limit: self
                .time_limit_sec
                .and_then(|t| Duration::try_from_secs_f64(t).ok()),
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_sec: None,
            bin_limit: BinLimit::ItemCount,
            symmetry_breaking: false,
            integrality_tolerance: 1e-6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: SolverConfig =
            serde_json::from_str(r#"{"time_limit_sec": 2.5, "bin_limit": {"Fixed": 4}}"#).unwrap();
        assert_eq!(config.bin_limit, BinLimit::Fixed(4));
        assert_eq!(config.budget().time_limit, Some(Duration::from_millis(2500)));
        assert_eq!(config.integrality_tolerance, 1e-6);
        assert!(!config.symmetry_breaking);
    }

    #[test]
    fn validation() {
        assert!(SolverConfig::default().validate().is_ok());
        let negative = SolverConfig {
            time_limit_sec: Some(-1.0),
            ..SolverConfig::default()
        };
        assert!(matches!(negative.validate(), Err(PackingError::InvalidArgument(_))));
        let loose = SolverConfig {
            integrality_tolerance: 0.5,
            ..SolverConfig::default()
        };
        assert!(matches!(loose.validate(), Err(PackingError::InvalidArgument(_))));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res = serde_json::from_str::<SolverConfig>(r#"{"time_limit": 2.5}"#);
        assert!(res.is_err());
    }
}
