use clap::Parser;
use smc_signals::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
