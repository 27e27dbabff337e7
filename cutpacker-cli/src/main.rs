use anyhow::Result;
use clap::Parser as ClapParser;
use cutpacker_cli::io::cli::Cli;
use cutpacker_cli::{EPOCH, io, run};

fn main() -> Result<()> {
    let args = Cli::parse();
    //start the clock before the first log line
    let _ = *EPOCH;
    io::init_logger(args.log_level)?;

    let stdout = std::io::stdout();
    run(&args, &mut stdout.lock())
}
