//! `partition` command.
//!
//! # Flow
//!
//! 1. Resolve configuration: defaults, `--config` file, environment, flags
//! 2. Parse the relation list and build its adjacency matrix
//! 3. Embed and cluster
//! 4. Render the report
//!
//! Under `random-walk` the raw clique matrix is handed to the core, which
//! normalizes it. Under `pre-normalized` the matrix is row-normalized here
//! first.

use std::path::PathBuf;

use clap::Args;
use relation_graph_core::spectral::{Normalization, SpectralEmbedder};
use tracing::{debug, info};

use crate::config::PartitionConfig;
use crate::error::CliResult;
use crate::relations::RelationList;
use crate::report::{render, OutputFormat, PartitionReport};

/// Arguments for `partition`.
#[derive(Args, Debug)]
pub struct PartitionArgs {
    /// Relation list file, one comma-separated group per line
    pub file: PathBuf,

    /// Number of categories [default: 3]
    #[arg(short = 'k', long)]
    pub categories: Option<usize>,

    /// Seed for k-means initialization
    #[arg(long)]
    pub seed: Option<u64>,

    /// K-means convergence tolerance
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// K-means iteration cap
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Laplacian convention: random-walk or pre-normalized
    #[arg(long, value_parser = parse_normalization)]
    pub normalization: Option<Normalization>,

    /// Skip the canonical rotation of the embedding
    #[arg(long)]
    pub no_canonicalize: bool,

    /// TOML configuration file
    #[arg(long, env = "RELATION_GRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Include embedding coordinates for every entity
    #[arg(long)]
    pub with_embedding: bool,
}

fn parse_normalization(value: &str) -> Result<Normalization, String> {
    value.parse().map_err(|e: relation_graph_core::ClusterError| e.to_string())
}

/// Merge file, environment and flags into one validated configuration.
pub fn resolve_config(args: &PartitionArgs) -> CliResult<PartitionConfig> {
    let mut config = match &args.config {
        Some(path) => PartitionConfig::from_file(path)?,
        None => PartitionConfig::default(),
    }
    .with_env_overrides()?;

    if let Some(k) = args.categories {
        config.spectral.num_categories = k;
    }
    if let Some(normalization) = args.normalization {
        config.spectral.normalization = normalization;
    }
    if args.no_canonicalize {
        config.spectral.canonicalize = false;
    }
    if let Some(seed) = args.seed {
        config.kmeans.seed = seed;
    }
    if let Some(tolerance) = args.tolerance {
        config.kmeans.tolerance = tolerance;
    }
    if let Some(max_iterations) = args.max_iterations {
        config.kmeans.max_iterations = max_iterations;
    }

    config.validate()?;
    debug!(?config, "resolved partition configuration");
    Ok(config)
}

/// Partition the entities of a relation list.
pub fn partition_command(args: PartitionArgs) -> CliResult<String> {
    let config = resolve_config(&args)?;
    let list = RelationList::from_file(&args.file)?;

    let normalization = config.spectral.normalization;
    let adjacency = match normalization {
        Normalization::RandomWalk => list.adjacency()?,
        Normalization::PreNormalized => list.normalized_adjacency()?,
    };

    let embedder = SpectralEmbedder::new(config.to_spectral_config())?;
    let partition = embedder
        .embed_and_cluster(&adjacency)
        .map_err(|e| list.describe(e))?;

    info!(
        entities = list.len(),
        categories = partition.num_categories(),
        sizes = ?partition.category_sizes(),
        "partition complete"
    );

    let report = PartitionReport::build(&list, &partition, normalization, args.with_embedding);
    render(&report, args.format, PartitionReport::render_text)
}
