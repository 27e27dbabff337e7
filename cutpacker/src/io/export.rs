use crate::entities::PackingInstance;
use crate::io::ext_repr::{ExtBin, ExtPackedItem, ExtSolution};
use crate::pipeline::PackingSolution;

/// Exports a solution out of the library.
///
/// `solution` must have been solved for `instance`, an item id outside of it panics (see [`PackingInstance::item`]).
pub fn export(instance: &PackingInstance, solution: &PackingSolution) -> ExtSolution {
    let bins = solution
        .assignment
        .bins
        .iter()
        .map(|bin| ExtBin {
            index: bin.index,
            items: bin
                .item_ids
                .iter()
                .map(|&id| {
                    let item = instance.item(id);
                    ExtPackedItem {
                        name: item.name.clone(),
                        weight: item.weight,
                    }
                })
                .collect(),
            load: bin.load,
        })
        .collect();

    ExtSolution {
        bins_used: solution.objective,
        lower_bound: solution.lower_bound,
        bin_capacity: instance.bin_capacity(),
        bins,
        total_weight: solution.assignment.total_load(),
        run_time_ms: solution.run_time.as_millis() as u64,
    }
}
