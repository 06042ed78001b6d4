//! CLI errors and exit codes.
//!
//! Exit codes:
//! - 0: Success
//! - 1: I/O or configuration error
//! - 2: Invalid input data (unparsable relation list, isolated entity, bad matrix)
//! - 3: Clustering failure (non-convergence, empty cluster, complex spectrum)

use std::path::PathBuf;
use std::process::ExitCode;

use relation_graph_core::ClusterError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced by the `relation-graph` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Relation list line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Entity '{name}' belongs to no relation with another entity")]
    IsolatedEntity { name: String },

    #[error("Failed to serialize report: {0}")]
    Serialization(String),

    #[error(transparent)]
    Cluster(#[from] ClusterError),
}

impl CliError {
    /// Create a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a Parse error for a 1-based line number.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Process exit codes for the `relation-graph` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CliExitCode {
    Success = 0,
    /// I/O or configuration problem
    Failure = 1,
    /// The input data cannot be partitioned as given
    InvalidInput = 2,
    /// The numerical procedure failed
    ClusteringFailed = 3,
}

impl From<CliExitCode> for ExitCode {
    fn from(code: CliExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl From<&CliError> for CliExitCode {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::Io { .. } | CliError::Config { .. } | CliError::Serialization(_) => {
                CliExitCode::Failure
            }
            CliError::Parse { .. } | CliError::IsolatedEntity { .. } => CliExitCode::InvalidInput,
            // Configuration problems detected by the core still come from the user.
            CliError::Cluster(ClusterError::InvalidConfig { .. }) => CliExitCode::Failure,
            CliError::Cluster(e) if e.is_input_error() => CliExitCode::InvalidInput,
            CliError::Cluster(_) => CliExitCode::ClusteringFailed,
        }
    }
}
