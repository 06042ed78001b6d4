//! `edges` command.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::error::CliResult;
use crate::relations::RelationList;
use crate::report::{render, EdgeReport, OutputFormat};

/// Arguments for `edges`.
#[derive(Args, Debug)]
pub struct EdgesArgs {
    /// Relation list file, one comma-separated group per line
    pub file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Load the relation list and report its row-normalized edges.
pub fn edges_command(args: EdgesArgs) -> CliResult<String> {
    let list = RelationList::from_file(&args.file)?;
    let adjacency = list.normalized_adjacency()?;
    let report = EdgeReport::build(&list, &adjacency);
    info!(entities = report.entities, edges = report.edges.len(), "edge list built");
    render(&report, args.format, EdgeReport::render_text)
}
