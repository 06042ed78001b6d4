//! Configuration for the spectral embedder.

use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, ClusterResult};
use crate::kmeans::{
    EmptyClusterPolicy, KMeansConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_SEED, DEFAULT_TOLERANCE,
};

/// Default number of categories requested from the embedder.
pub const DEFAULT_NUM_CATEGORIES: usize = 3;

/// Default bound on the imaginary part of an accepted eigenvalue.
pub const DEFAULT_IMAGINARY_TOLERANCE: f64 = 1.0e-9;

/// Default bound on `|row sum - 1|` for pre-normalized input.
pub const DEFAULT_STOCHASTIC_TOLERANCE: f64 = 1.0e-9;

/// Default relative bound on detailed-balance residuals.
pub const DEFAULT_REVERSIBILITY_TOLERANCE: f64 = 1.0e-9;

/// Default distance under which embedding rows count as the same point
/// when initial centroids are drawn.
pub const DEFAULT_EMBEDDING_DISTINCT_TOLERANCE: f64 = 1.0e-9;

/// How the adjacency matrix is turned into a transition matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Normalization {
    /// `L = I - D⁻¹A` computed from raw weights.
    #[default]
    RandomWalk,
    /// The caller already row-normalized: `L = I - A`.
    PreNormalized,
}

impl Normalization {
    /// Stable name used in config files and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RandomWalk => "random-walk",
            Self::PreNormalized => "pre-normalized",
        }
    }
}

impl std::fmt::Display for Normalization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Normalization {
    type Err = ClusterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random-walk" | "random_walk" => Ok(Self::RandomWalk),
            "pre-normalized" | "pre_normalized" => Ok(Self::PreNormalized),
            other => Err(ClusterError::invalid_config(format!(
                "unknown normalization '{}', expected 'random-walk' or 'pre-normalized'",
                other
            ))),
        }
    }
}

/// K-means parameters used for the final partition. The cluster count
/// comes from [`SpectralConfig::num_categories`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KMeansSettings {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default)]
    pub empty_cluster_policy: EmptyClusterPolicy,
    #[serde(default = "default_distinct_tolerance")]
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

fn default_distinct_tolerance() -> f64 {
    DEFAULT_EMBEDDING_DISTINCT_TOLERANCE
}

impl Default for KMeansSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            empty_cluster_policy: EmptyClusterPolicy::Reseed,
            distinct_tolerance: DEFAULT_EMBEDDING_DISTINCT_TOLERANCE,
        }
    }
}

impl KMeansSettings {
    /// Build a validated k-means configuration for `k` clusters.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::InvalidConfig` if any parameter is invalid.
    pub fn to_kmeans_config(&self, k: usize) -> ClusterResult<KMeansConfig> {
        let config = KMeansConfig {
            k,
            seed: self.seed,
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
            empty_cluster_policy: self.empty_cluster_policy,
            distinct_tolerance: self.distinct_tolerance,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration for spectral embedding and clustering.
///
/// # Validation
///
/// `validate()` checks everything that does not depend on the graph.
/// `num_categories <= N` is checked when a graph is embedded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectralConfig {
    /// Number of categories k, also the embedding dimension.
    #[serde(default = "default_num_categories")]
    pub num_categories: usize,

    /// Laplacian convention.
    #[serde(default)]
    pub normalization: Normalization,

    /// Rotate the embedding into the Gram-matrix singular basis.
    #[serde(default = "default_true")]
    pub canonicalize: bool,

    /// Largest accepted `|Im λ|`.
    #[serde(default = "default_imaginary_tolerance")]
    pub imaginary_tolerance: f64,

    /// Largest accepted `|row sum - 1|` under `PreNormalized`.
    #[serde(default = "default_stochastic_tolerance")]
    pub stochastic_tolerance: f64,

    /// Relative detailed-balance residual under which the transition matrix
    /// is treated as reversible.
    #[serde(default = "default_reversibility_tolerance")]
    pub reversibility_tolerance: f64,

    /// Final k-means step.
    #[serde(default)]
    pub kmeans: KMeansSettings,
}

fn default_num_categories() -> usize {
    DEFAULT_NUM_CATEGORIES
}

fn default_true() -> bool {
    true
}

fn default_imaginary_tolerance() -> f64 {
    DEFAULT_IMAGINARY_TOLERANCE
}

fn default_stochastic_tolerance() -> f64 {
    DEFAULT_STOCHASTIC_TOLERANCE
}

fn default_reversibility_tolerance() -> f64 {
    DEFAULT_REVERSIBILITY_TOLERANCE
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            num_categories: DEFAULT_NUM_CATEGORIES,
            normalization: Normalization::RandomWalk,
            canonicalize: true,
            imaginary_tolerance: DEFAULT_IMAGINARY_TOLERANCE,
            stochastic_tolerance: DEFAULT_STOCHASTIC_TOLERANCE,
            reversibility_tolerance: DEFAULT_REVERSIBILITY_TOLERANCE,
            kmeans: KMeansSettings::default(),
        }
    }
}

impl SpectralConfig {
    /// Default configuration with `num_categories` categories.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::InvalidConfig` if `num_categories` is 0.
    pub fn with_categories(num_categories: usize) -> ClusterResult<Self> {
        let config = Self {
            num_categories,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace the normalization convention.
    #[must_use]
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Enable or disable canonicalization.
    #[must_use]
    pub fn with_canonicalize(mut self, canonicalize: bool) -> Self {
        self.canonicalize = canonicalize;
        self
    }

    /// The k-means configuration used for the final partition.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::InvalidConfig` if any k-means parameter is invalid.
    pub fn kmeans_config(&self) -> ClusterResult<KMeansConfig> {
        self.kmeans.to_kmeans_config(self.num_categories)
    }

    /// Check every graph-independent parameter.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::InvalidConfig` naming the first bad parameter.
    pub fn validate(&self) -> ClusterResult<()> {
        if self.num_categories == 0 {
            return Err(ClusterError::invalid_config("num_categories must be > 0"));
        }
        for (name, value) in [
            ("imaginary_tolerance", self.imaginary_tolerance),
            ("stochastic_tolerance", self.stochastic_tolerance),
            ("reversibility_tolerance", self.reversibility_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ClusterError::invalid_config(format!(
                    "{} must be finite and >= 0.0, got {}",
                    name, value
                )));
            }
        }
        self.kmeans_config().map(|_| ())
    }
}
