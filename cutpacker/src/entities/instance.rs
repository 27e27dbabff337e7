use std::collections::HashSet;

use itertools::Itertools;
use log::debug;

use crate::entities::Item;
use crate::error::{PackingError, Result};
use crate::util::assertions::instance_item_ids_correct;

/// Instance of the one-dimensional Bin Packing Problem: a set of items to be packed into identical bins.
///
/// Items can only be appended, through [`PackingInstance::add_items`].
#[derive(Debug, Clone)]
pub struct PackingInstance {
    bin_capacity: f64,
    items: Vec<Item>,
    names: HashSet<String>,
}

impl PackingInstance {
    /// Creates an empty instance. Fails if `bin_capacity` is not a strictly positive, finite number.
    pub fn new(bin_capacity: f64) -> Result<Self> {
        if !(bin_capacity.is_finite() && bin_capacity > 0.0) {
            return Err(PackingError::InvalidArgument(format!(
                "bin capacity must be positive and finite, got {bin_capacity}"
            )));
        }
        Ok(Self {
            bin_capacity,
            items: vec![],
            names: HashSet::new(),
        })
    }

    /// Appends `quantity` items named `{name}_1 ..= {name}_{quantity}`, each with `weight`.
    ///
    /// On error the instance is left untouched.
    pub fn add_items(&mut self, name: &str, quantity: usize, weight: f64) -> Result<()> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(PackingError::InvalidArgument(format!(
                "weight of item {name} must be positive and finite, got {weight}"
            )));
        }

        let new_names = (1..=quantity).map(|i| format!("{name}_{i}")).collect_vec();
        if let Some(dup) = new_names.iter().find(|n| self.names.contains(*n)) {
            return Err(PackingError::InvalidArgument(format!(
                "item name {dup} is already present in the instance"
            )));
        }

        for item_name in new_names {
            self.names.insert(item_name.clone());
            self.items.push(Item::new(self.items.len(), item_name, weight));
        }
        debug!("[INST] added {quantity} x {name} (weight {weight}), {} items total", self.items.len());

        debug_assert!(instance_item_ids_correct(&self.items));
        Ok(())
    }

    pub fn bin_capacity(&self) -> f64 {
        self.bin_capacity
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The item with position `id`.
    ///
    /// # Panics
    /// If `id` is not below [`PackingInstance::n_items`], e.g. for an id taken from another instance's solution.
    pub fn item(&self, id: usize) -> &Item {
        &self.items[id]
    }

    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    /// Trivially safe upper bound on the number of bins: one item per bin.
    pub fn max_bins(&self) -> usize {
        self.items.len()
    }

    pub fn total_weight(&self) -> f64 {
        self.items.iter().map(|item| item.weight).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
