use itertools::Itertools;
use log::error;

use crate::entities::{Assignment, Item, PackingInstance};
use crate::util::FPA;

//Various checks to verify correctness of the state of the system
//Used in debug_assertion!() blocks and by the solution extractor

pub fn instance_item_ids_correct(items: &[Item]) -> bool {
    items.iter().enumerate().all(|(i, item)| item.id == i)
        && items.iter().map(|item| &item.name).all_unique()
}

/// Every item of the instance is contained in exactly one bin of the assignment.
pub fn every_item_packed_once(instance: &PackingInstance, assignment: &Assignment) -> bool {
    let per_item = assignment.bins_per_item(instance.n_items());
    let out_of_range = assignment
        .bins
        .iter()
        .flat_map(|b| b.item_ids.iter())
        .any(|&id| id >= instance.n_items());

    if out_of_range {
        error!("assignment refers to an item outside of the instance");
        return false;
    }

    per_item.iter().enumerate().all(|(id, bins)| match bins.len() {
        1 => true,
        n => {
            error!("item {} is packed in {n} bins: {bins:?}", instance.item(id).name);
            false
        }
    })
}

/// No bin of the assignment is loaded beyond capacity and every recorded load matches its items.
pub fn loads_within_capacity(instance: &PackingInstance, assignment: &Assignment) -> bool {
    assignment.bins.iter().all(|bin| {
        let load = bin
            .item_ids
            .iter()
            .map(|&id| instance.item(id).weight)
            .sum::<f64>();
        let within = FPA(load) <= FPA(instance.bin_capacity());
        let consistent = FPA(load) == FPA(bin.load);
        if !within {
            error!(
                "bin {} holds {load}, exceeding capacity {}",
                bin.index,
                instance.bin_capacity()
            );
        }
        if !consistent {
            error!("bin {} records load {} but holds {load}", bin.index, bin.load);
        }
        within && consistent
    })
}

pub fn assignment_is_feasible(instance: &PackingInstance, assignment: &Assignment) -> bool {
    every_item_packed_once(instance, assignment) && loads_within_capacity(instance, assignment)
}
