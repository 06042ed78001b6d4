//! Configuration for k-means clustering.
//!
//! Provides validated configuration for clustering parameters.

use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, ClusterResult};

/// Default RNG seed for centroid initialization.
pub const DEFAULT_SEED: u64 = 123_456_789;

/// Default convergence threshold on total centroid movement.
pub const DEFAULT_TOLERANCE: f64 = 1.0e-14;

/// Default safety cap on Lloyd iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 300;

/// What to do when a centroid ends an assignment step with no points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmptyClusterPolicy {
    /// Move the row farthest from its own centroid into the empty cluster.
    /// The donor cluster must keep at least one member.
    #[default]
    Reseed,
    /// Abort the fit with `ClusterError::EmptyCluster`.
    Fail,
}

/// Configuration for k-means clustering.
///
/// # Validation
///
/// All parameters are validated at construction time.
/// Invalid configurations result in immediate errors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KMeansConfig {
    /// Number of clusters (k).
    ///
    /// Must be > 0 and <= number of distinct data rows.
    pub k: usize,

    /// Seed for the ChaCha8 generator that samples initial centroids.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Convergence threshold on the Frobenius norm of centroid movement.
    ///
    /// Iteration stops once the movement is strictly below this value.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Maximum iterations before reporting non-convergence.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Handling of centroids that receive no points.
    #[serde(default)]
    pub empty_cluster_policy: EmptyClusterPolicy,

    /// Rows closer than this (Euclidean) count as the same row when
    /// choosing initial centroids. `0.0` means exact equality.
    #[serde(default)]
    pub distinct_tolerance: f64,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

impl KMeansConfig {
    /// Create a new configuration with validation.
    ///
    /// # Arguments
    ///
    /// * `k` - Number of clusters (must be > 0)
    /// * `seed` - Seed for initial centroid sampling
    /// * `tolerance` - Convergence threshold (must be finite and > 0.0)
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::InvalidConfig` if any parameter is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use relation_graph_core::kmeans::KMeansConfig;
    ///
    /// let config = KMeansConfig::new(3, 42, 1e-10).unwrap();
    /// assert_eq!(config.k, 3);
    /// ```
    pub fn new(k: usize, seed: u64, tolerance: f64) -> ClusterResult<Self> {
        let config = Self {
            k,
            seed,
            tolerance,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            empty_cluster_policy: EmptyClusterPolicy::default(),
            distinct_tolerance: 0.0,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration for `k` clusters with the default seed,
    /// tolerance and iteration cap.
    ///
    /// # Errors
    ///
    /// Returns error if k is 0.
    pub fn with_k(k: usize) -> ClusterResult<Self> {
        Self::new(k, DEFAULT_SEED, DEFAULT_TOLERANCE)
    }

    /// Replace the iteration cap.
    ///
    /// # Errors
    ///
    /// Returns error if `max_iterations` is 0.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> ClusterResult<Self> {
        self.max_iterations = max_iterations;
        self.validate()?;
        Ok(self)
    }

    /// Replace the empty-cluster policy.
    #[must_use]
    pub fn with_empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster_policy = policy;
        self
    }

    /// Replace the distinctness tolerance used for initial sampling.
    ///
    /// # Errors
    ///
    /// Returns error if the tolerance is negative or not finite.
    pub fn with_distinct_tolerance(mut self, distinct_tolerance: f64) -> ClusterResult<Self> {
        self.distinct_tolerance = distinct_tolerance;
        self.validate()?;
        Ok(self)
    }

    /// Check every parameter. Data-dependent checks (k against the number
    /// of distinct rows) happen at fit time.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::InvalidConfig` naming the first bad parameter.
    pub fn validate(&self) -> ClusterResult<()> {
        if self.k == 0 {
            return Err(ClusterError::invalid_config("k must be > 0"));
        }
        if self.max_iterations == 0 {
            return Err(ClusterError::invalid_config("max_iterations must be > 0"));
        }
        if self.tolerance.is_nan() || self.tolerance.is_infinite() {
            return Err(ClusterError::invalid_config(
                "tolerance must be a finite positive number",
            ));
        }
        if self.tolerance <= 0.0 {
            return Err(ClusterError::invalid_config("tolerance must be > 0.0"));
        }
        if !self.distinct_tolerance.is_finite() || self.distinct_tolerance < 0.0 {
            return Err(ClusterError::invalid_config(
                "distinct_tolerance must be finite and >= 0.0",
            ));
        }
        Ok(())
    }
}

impl Default for KMeansConfig {
    /// Default configuration: k=3, seed=123456789, tolerance=1e-14, max_iterations=300.
    fn default() -> Self {
        Self {
            k: 3,
            seed: DEFAULT_SEED,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            empty_cluster_policy: EmptyClusterPolicy::Reseed,
            distinct_tolerance: 0.0,
        }
    }
}
