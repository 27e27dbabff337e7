use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::entities::PackingInstance;
use crate::util::FPA;

/// Continuous-relaxation (L1) lower bound: `ceil(total weight / capacity)`.
///
/// Ignores indivisibility of the items, so it can be strictly below the optimum, but never above it.
/// An instance without items has a bound of 0.
pub fn l1_bound(instance: &PackingInstance) -> usize {
    if instance.is_empty() {
        return 0;
    }
    let ratio = instance.total_weight() / instance.bin_capacity();
    let rounded = ratio.round();
    // a ratio that is an exact multiple up to rounding noise must not be pushed to the next integer
    match FPA(ratio) == FPA(rounded) {
        true => rounded as usize,
        false => ratio.ceil() as usize,
    }
}

/// Number of bins opened by First-Fit-Decreasing.
///
/// Always a feasible upper bound on the optimum and never more than the number of items.
/// Items heavier than the capacity are given a bin of their own.
pub fn ffd_bound(instance: &PackingInstance) -> usize {
    let capacity = instance.bin_capacity();
    let weights = instance
        .items()
        .iter()
        .map(|item| item.weight)
        .sorted_by_key(|w| std::cmp::Reverse(OrderedFloat(*w)));

    let mut loads: Vec<f64> = vec![];
    for w in weights {
        match loads
            .iter_mut()
            .find(|load| FPA(**load + w) <= FPA(capacity))
        {
            Some(load) => *load += w,
            None => loads.push(w),
        }
    }
    loads.len()
}
