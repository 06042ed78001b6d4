//! Error types for relation graph partitioning.
//!
//! Every failure mode of the numeric core is a typed variant. Nothing is
//! allowed to degrade into a NaN or infinity that would silently corrupt a
//! downstream clustering.
//!
//! # Taxonomy
//!
//! - `InvalidConfig`: k out of range, too few distinct rows, bad tolerances
//! - `InvalidInput`: malformed matrices (shape, NaN, negative weights)
//! - `EmptyCluster`: a centroid lost all of its points
//! - `NonConvergence`: iteration cap reached before the tolerance
//! - `IllConditionedSpectrum`: complex eigenvalues beyond tolerance
//! - `DegenerateNormalization`: a zero-sum adjacency row
//! - `InvariantViolation`: internal state that should be unreachable

use thiserror::Error;

/// Result type alias for partitioning operations.
pub type ClusterResult<T> = Result<T, ClusterError>;

/// Errors that can occur while embedding or clustering a relation graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusterError {
    /// Configuration is inconsistent with itself or with the data.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the offending parameter
        message: String,
    },

    /// Input matrix is malformed.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of what is wrong with the input
        message: String,
    },

    /// A centroid received zero points and the policy forbids recovery.
    #[error("Empty cluster: centroid {cluster} has no assigned points at iteration {iteration}")]
    EmptyCluster {
        /// Index of the empty centroid
        cluster: usize,
        /// Iteration (1-based) at which the cluster emptied
        iteration: usize,
    },

    /// Iteration cap reached before centroid movement fell below tolerance.
    #[error("K-means did not converge after {iterations} iterations (error={error:.3e})")]
    NonConvergence {
        /// Number of iterations performed
        iterations: usize,
        /// Centroid movement at the last iteration
        error: f64,
    },

    /// Eigenvalues carry an imaginary part larger than the tolerance.
    #[error(
        "Ill-conditioned spectrum: eigenvalue imaginary part {max_imaginary:.3e} exceeds tolerance {tolerance:.3e}"
    )]
    IllConditionedSpectrum {
        /// Largest absolute imaginary part found
        max_imaginary: f64,
        /// Tolerance that was exceeded
        tolerance: f64,
    },

    /// Adjacency row sums to zero, so degree normalization would divide by zero.
    #[error("Degenerate normalization: row {row} has zero total weight")]
    DegenerateNormalization {
        /// Index of the zero-sum row
        row: usize,
    },

    /// Internal state that the algorithms guarantee can never occur.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl ClusterError {
    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an EmptyCluster error.
    pub fn empty_cluster(cluster: usize, iteration: usize) -> Self {
        Self::EmptyCluster { cluster, iteration }
    }

    /// Create a NonConvergence error.
    pub fn non_convergence(iterations: usize, error: f64) -> Self {
        Self::NonConvergence { iterations, error }
    }

    /// Create an IllConditionedSpectrum error.
    pub fn ill_conditioned(max_imaginary: f64, tolerance: f64) -> Self {
        Self::IllConditionedSpectrum {
            max_imaginary,
            tolerance,
        }
    }

    /// Create a DegenerateNormalization error.
    pub fn degenerate_row(row: usize) -> Self {
        Self::DegenerateNormalization { row }
    }

    /// True for errors caused by the caller's data or configuration, as
    /// opposed to failures of the numerical procedure itself.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig { .. }
                | Self::InvalidInput { .. }
                | Self::DegenerateNormalization { .. }
        )
    }
}
