//! CLI command handlers
//!
//! # Modules
//!
//! - `partition`: Spectral partitioning of a relation list
//! - `edges`: Weighted edge list of the normalized relation graph

mod edges;
mod partition;

pub use edges::{edges_command, EdgesArgs};
pub use partition::{partition_command, PartitionArgs};

use clap::Subcommand;
use tracing::error;

use crate::error::{CliExitCode, CliResult};

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Partition the entities of a relation list into categories
    Partition(PartitionArgs),
    /// Print the weighted edges of the normalized relation graph
    Edges(EdgesArgs),
}

/// Run a command, print its output and map failures to an exit code.
pub fn run(command: Commands) -> CliExitCode {
    let result: CliResult<String> = match command {
        Commands::Partition(args) => partition_command(args),
        Commands::Edges(args) => edges_command(args),
    };

    match result {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
            CliExitCode::Success
        }
        Err(e) => {
            let code = CliExitCode::from(&e);
            error!(exit_code = code as u8, "{}", e);
            eprintln!("Error: {}", e);
            code
        }
    }
}
