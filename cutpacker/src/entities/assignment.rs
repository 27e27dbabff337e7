use itertools::Itertools;

/// A used bin together with the items packed into it.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedBin {
    /// Index of the candidate bin in the formulation, in `[0, max_bins)`
    pub index: usize,
    /// Ids of the items packed in this bin, in instance order
    pub item_ids: Vec<usize>,
    /// Sum of the weights of the packed items
    pub load: f64,
}

/// Mapping of every item of an instance to exactly one bin.
///
/// Produced once per solve and replaced on the next one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignment {
    /// Used bins, sorted by their index
    pub bins: Vec<PackedBin>,
}

impl Assignment {
    pub fn new(mut bins: Vec<PackedBin>) -> Self {
        bins.sort_by_key(|b| b.index);
        Self { bins }
    }

    /// Number of bins used
    pub fn n_bins(&self) -> usize {
        self.bins.len()
    }

    pub fn used_bin_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.bins.iter().map(|b| b.index)
    }

    /// Index of the bin containing `item_id`, if any
    pub fn bin_of(&self, item_id: usize) -> Option<usize> {
        self.bins
            .iter()
            .find(|b| b.item_ids.contains(&item_id))
            .map(|b| b.index)
    }

    /// Number of items placed over all bins
    pub fn n_items(&self) -> usize {
        self.bins.iter().map(|b| b.item_ids.len()).sum()
    }

    pub fn total_load(&self) -> f64 {
        self.bins.iter().map(|b| b.load).sum()
    }

    /// For every item id in `0..n_items`, the bins it appears in.
    pub fn bins_per_item(&self, n_items: usize) -> Vec<Vec<usize>> {
        let mut per_item = vec![vec![]; n_items];
        for bin in &self.bins {
            for &id in &bin.item_ids {
                if let Some(bins) = per_item.get_mut(id) {
                    bins.push(bin.index);
                }
            }
        }
        per_item
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn item_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.bins.iter().flat_map(|b| b.item_ids.iter().copied()).sorted()
    }
}
