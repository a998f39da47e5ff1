mod cli;
mod climatology_cmd;
mod compare_cmd;
mod config;
mod convert;
mod dav_cmd;
mod field_cmd;
mod logging;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Compare(args) => compare_cmd::run(args),
        Command::Climatology(args) => climatology_cmd::run(args),
        Command::Field(args) => field_cmd::run(args),
        Command::Dav(args) => dav_cmd::run(args),
    }
}
