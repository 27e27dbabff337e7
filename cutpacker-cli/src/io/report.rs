use std::io::{Result, Write};

use cutpacker::entities::PackingInstance;
use cutpacker::pipeline::PackingSolution;

const SEPARATOR: &str = "====================";

pub fn write_bound(out: &mut impl Write, lower_bound: usize) -> Result<()> {
    writeln!(out, "L1 bound: {lower_bound}")
}

/// Human readable listing of the bins and the items packed in them.
pub fn write_solution(
    out: &mut impl Write,
    instance: &PackingInstance,
    solution: &PackingSolution,
) -> Result<()> {
    writeln!(out, "Number of bins used: {}", solution.objective)?;
    writeln!(out, "{SEPARATOR}")?;

    for bin in &solution.assignment.bins {
        writeln!(out, "Bin {}", bin.index)?;
        for &id in &bin.item_ids {
            let item = instance.item(id);
            writeln!(out, "Item {} - Weight {}", item.name, item.weight)?;
        }
        writeln!(out, "Packed bin weight: {}", bin.load)?;
        writeln!(out, "{SEPARATOR}")?;
    }
    writeln!(out, "Total packed weight: {}", solution.assignment.total_load())
}

pub fn write_infeasible(out: &mut impl Write, instance: &PackingInstance) -> Result<()> {
    writeln!(
        out,
        "The problem is infeasible: no packing fits into bins of capacity {}",
        instance.bin_capacity()
    )
}

pub fn write_unsolved(out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "The solver stopped before proving optimality, retry with a larger time limit"
    )
}
