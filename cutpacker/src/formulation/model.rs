use std::collections::HashMap;

use crate::engine::VarId;

/// Handles to the decision variables of a formulated [`PackingInstance`](crate::entities::PackingInstance).
#[derive(Debug, Clone)]
pub struct PackingModel {
    pub n_items: usize,
    /// Number of candidate bins
    pub n_bins: usize,
    /// `x[(item, bin)]`
    pub assign_vars: HashMap<(usize, usize), VarId>,
    /// `y[bin]`
    pub bin_vars: Vec<VarId>,
    pub n_constraints: usize,
}

impl PackingModel {
    pub fn x(&self, item_id: usize, bin: usize) -> Option<VarId> {
        self.assign_vars.get(&(item_id, bin)).copied()
    }

    pub fn y(&self, bin: usize) -> Option<VarId> {
        self.bin_vars.get(bin).copied()
    }

    pub fn n_vars(&self) -> usize {
        self.assign_vars.len() + self.bin_vars.len()
    }
}
