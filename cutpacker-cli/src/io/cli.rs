use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// JSON data configuration holding the bin capacity, e.g. {"bin_capacity": 6000}
    #[arg(short, long, value_name = "FILE")]
    pub config_file: PathBuf,
    /// Item data, one `name;quantity;weight` record per line
    #[arg(short, long, value_name = "FILE")]
    pub input_file: PathBuf,
    /// Optional JSON solver configuration, defaults are used if absent
    #[arg(short = 'S', long, value_name = "FILE")]
    pub solver_config: Option<PathBuf>,
    /// Optional path to write the solution to as JSON
    #[arg(short, long, value_name = "FILE")]
    pub solution_file: Option<PathBuf>,
    /// Only report the L1 lower bound, skip the exact solve
    #[arg(short, long)]
    pub bound_only: bool,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
}
