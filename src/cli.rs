use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Aeolus climate dataset comparison.
#[derive(Parser)]
#[command(
    name = "aeolus",
    version,
    about = "Align climate datasets and compute comparison statistics"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compare a reference dataset against candidates, parameter by parameter.
    Compare(CompareArgs),
    /// Reduce one dataset parameter to a climatological cycle.
    Climatology(ClimatologyArgs),
    /// Per-grid-point KGE and RMSD from precomputed field statistics.
    Field(FieldArgs),
    /// Distribution added value of a high-resolution run over a low-resolution one.
    Dav(DavArgs),
}

/// Arguments for the `compare` subcommand.
#[derive(clap::Args)]
pub struct CompareArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "aeolus.toml")]
    pub config: PathBuf,

    /// Override output directory from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Remove an existing output directory before writing.
    #[arg(long)]
    pub clean: bool,
}

/// Climatological cycle to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Mean per calendar month, pooled over all years.
    Monthly,
    /// Mean per day of month over the configured windows.
    Daily,
    /// Mean per hour of day over the configured windows.
    Diurnal,
}

/// Arguments for the `climatology` subcommand.
#[derive(clap::Args)]
pub struct ClimatologyArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "aeolus.toml")]
    pub config: PathBuf,

    /// Dataset name from a `[[dataset]]` entry.
    #[arg(short, long)]
    pub dataset: String,

    /// Parameter column to reduce.
    #[arg(short, long)]
    pub parameter: String,

    /// Cycle to compute.
    #[arg(short, long, value_enum, default_value_t = Mode::Monthly)]
    pub mode: Mode,

    /// Output CSV path (default: `<output.dir>/<parameter>/<mode>_<dataset>.csv`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `field` subcommand.
#[derive(clap::Args)]
pub struct FieldArgs {
    /// Reference field statistics CSV (`lon,lat,mean,sd,correlation`).
    #[arg(short, long)]
    pub reference: PathBuf,

    /// Candidate field statistics CSV on the same grid.
    #[arg(long)]
    pub candidate: PathBuf,

    /// Output CSV path.
    #[arg(short, long, default_value = "field_metrics.csv")]
    pub output: PathBuf,
}

/// Arguments for the `dav` subcommand.
#[derive(clap::Args)]
pub struct DavArgs {
    /// Low-resolution model dataset.
    #[arg(long)]
    pub low: PathBuf,

    /// High-resolution model dataset.
    #[arg(long)]
    pub high: PathBuf,

    /// Observed dataset.
    #[arg(long)]
    pub observed: PathBuf,

    /// Built-in format profile shared by the three files.
    #[arg(short, long, default_value = "cosmo")]
    pub format: String,

    /// Parameter column to compare.
    #[arg(short, long)]
    pub parameter: String,
}
