mod cli;
mod platform;

use std::process::ExitCode;

use clap::Parser;

fn main() -> anyhow::Result<ExitCode> {
    let args = cli::CliArgs::parse();
    platform::logging::initialize(args.log_destination(), args.log_level());
    platform::run_app(&args)
}
