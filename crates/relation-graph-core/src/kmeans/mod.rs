//! K-means clustering over arbitrary-dimensional points.
//!
//! # CRITICAL: NO FALLBACKS
//!
//! Clustering failures are fatal. No partial results returned.
//! Hitting the iteration cap is an error, not a silently accepted result.
//!
//! # Algorithm
//!
//! 1. Seed a ChaCha8 generator from the configuration
//! 2. Sample k distinct rows without replacement as initial centroids
//! 3. Assign each row to the nearest centroid (Euclidean, lowest index on ties)
//! 4. Recompute centroids as the mean of their assigned rows
//! 5. Stop once the norm of the centroid movement drops below tolerance
//!
//! # Fail-Fast Validation
//!
//! - k must be > 0 and <= number of distinct rows
//! - max_iterations must be > 0
//! - tolerance must be finite and > 0.0
//! - distinct_tolerance must be finite and >= 0.0
//! - data must be non-empty and finite

mod algorithms;
mod clusterer;
mod config;
mod metrics;
#[cfg(test)]
mod tests;
mod types;

pub use clusterer::{CentroidClustering, KMeans};
pub use config::{
    EmptyClusterPolicy, KMeansConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_SEED, DEFAULT_TOLERANCE,
};
pub use metrics::{euclidean_distance, euclidean_distance_squared};
pub use types::KMeansFit;
