use serde::{Deserialize, Serialize};

/// Data configuration of a packing run
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExtConfig {
    /// Capacity shared by every bin
    pub bin_capacity: f64,
}

/// A named item type with its demand, expanded into `quantity` items on import
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtItem {
    pub name: String,
    /// Number of copies to pack, negative values are rejected on import
    pub quantity: i64,
    pub weight: f64,
}

/// An item as placed in a bin
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPackedItem {
    pub name: String,
    pub weight: f64,
}

/// A used bin
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtBin {
    /// Index of the bin in the formulation
    pub index: usize,
    pub items: Vec<ExtPackedItem>,
    /// Total weight packed in the bin
    pub load: f64,
}

/// Optimal packing of an instance
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtSolution {
    /// Number of bins used
    pub bins_used: usize,
    /// Continuous-relaxation lower bound of the instance
    pub lower_bound: usize,
    pub bin_capacity: f64,
    pub bins: Vec<ExtBin>,
    /// Total weight packed over all bins
    pub total_weight: f64,
    /// The time it took to generate the solution in milliseconds
    pub run_time_ms: u64,
}
