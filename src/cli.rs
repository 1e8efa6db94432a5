use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Daily Evapotranspiration Deficit Index from ERA5 daily fields.
#[derive(Parser)]
#[command(
    name = "dedi",
    version,
    about = "Daily Evapotranspiration Deficit Index from ERA5 evaporation"
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
    /// Compute and write the index for every configured year.
    Run(RunArgs),
    /// Compute the reference climatology and write it to one file.
    Climatology(ClimatologyArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "dedi.toml")]
    pub config: PathBuf,

    /// Override the first year from config.
    #[arg(long)]
    pub start_year: Option<i32>,

    /// Override the last year from config.
    #[arg(long)]
    pub end_year: Option<i32>,

    /// Override the output directory from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `climatology` subcommand.
#[derive(clap::Args)]
pub struct ClimatologyArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "dedi.toml")]
    pub config: PathBuf,

    /// Write the climatology to this file instead of the output directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
