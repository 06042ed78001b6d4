//! Relation Graph CLI
//!
//! Partitions the entities of a relation list into categories with spectral
//! clustering.
//!
//! # Commands
//!
//! - `partition <FILE>`: Assign every entity to a category
//! - `edges <FILE>`: Print the weighted edges of the normalized relation graph
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: I/O or configuration error
//! - 2: Invalid input data
//! - 3: Clustering failure
//!
//! Logs go to stderr. Reports go to stdout.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;
mod error;
mod relations;
mod report;

/// Relation Graph - spectral partitioning of relation lists
#[derive(Parser)]
#[command(name = "relation-graph")]
#[command(version)]
#[command(about = "Partition entities connected by relation lists into categories")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: commands::Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    commands::run(cli.command).into()
}
