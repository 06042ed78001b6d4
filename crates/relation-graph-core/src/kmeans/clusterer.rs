//! K-means clustering implementation.
//!
//! Provides the seeded Lloyd's-algorithm clusterer used by the spectral
//! embedder for its final partition.

use nalgebra::DMatrix;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument, warn};

use crate::error::{ClusterError, ClusterResult};

use super::algorithms::{
    assign_to_nearest, compute_centroids, compute_wcss, distinct_row_indices, matrix_rows,
    reseed_empty_clusters, sample_initial_centroids,
};
use super::config::{EmptyClusterPolicy, KMeansConfig};
use super::metrics::centroid_shift;
use super::types::KMeansFit;

/// Trait for centroid-based clustering of N×d point matrices.
///
/// Implementors partition the rows of a matrix into a fixed number of
/// groups.
pub trait CentroidClustering {
    /// Cluster the rows of `data`, returning labels and convergence details.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if data is empty or holds non-finite values
    /// - `InvalidConfig` if k exceeds the number of distinct rows
    /// - `EmptyCluster` if a centroid empties and cannot be recovered
    /// - `NonConvergence` if the iteration cap is reached
    fn fit_detailed(&self, data: &DMatrix<f64>) -> ClusterResult<KMeansFit>;

    /// Cluster the rows of `data`, returning one label per row.
    ///
    /// # Errors
    ///
    /// Same as [`CentroidClustering::fit_detailed`].
    fn fit(&self, data: &DMatrix<f64>) -> ClusterResult<Vec<usize>> {
        self.fit_detailed(data).map(|fit| fit.labels)
    }
}

/// Standard k-means with seeded random initialization.
///
/// Initial centroids are `k` distinct rows drawn without replacement using
/// a ChaCha8 generator seeded from the configuration, so identical
/// `(data, config)` always yield identical labels.
#[derive(Clone, Debug, Default)]
pub struct KMeans {
    config: KMeansConfig,
}

impl KMeans {
    /// Create a new clusterer from a validated configuration.
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    /// Borrow the configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    fn validate_data(&self, data: &DMatrix<f64>) -> ClusterResult<()> {
        let (n, d) = data.shape();
        if n == 0 || d == 0 {
            return Err(ClusterError::invalid_input(format!(
                "data must have at least one row and one column, got {}x{}",
                n, d
            )));
        }
        if let Some(idx) = data.iter().position(|x| !x.is_finite()) {
            // Column-major storage: recover (row, col) for the message.
            return Err(ClusterError::invalid_input(format!(
                "data value at ({}, {}) is not finite",
                idx % n,
                idx / n
            )));
        }
        if self.config.k > n {
            return Err(ClusterError::invalid_config(format!(
                "k ({}) must be <= number of rows ({})",
                self.config.k, n
            )));
        }
        Ok(())
    }
}

impl CentroidClustering for KMeans {
    #[instrument(skip(self, data), fields(n = data.nrows(), d = data.ncols(), k = self.config.k))]
    fn fit_detailed(&self, data: &DMatrix<f64>) -> ClusterResult<KMeansFit> {
        // FAIL FAST: Validate inputs
        self.config.validate()?;
        self.validate_data(data)?;

        let k = self.config.k;
        let points = matrix_rows(data);

        let distinct = distinct_row_indices(&points, self.config.distinct_tolerance);
        if distinct.len() < k {
            return Err(ClusterError::invalid_config(format!(
                "k ({}) must be <= number of distinct rows ({})",
                k,
                distinct.len()
            )));
        }

        debug!(
            distinct_rows = distinct.len(),
            seed = self.config.seed,
            "starting k-means"
        );

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let centroids = sample_initial_centroids(&points, &distinct, k, &mut rng);

        self.lloyd(&points, centroids)
    }
}

impl KMeans {
    /// Run Lloyd iterations from the given initial centroids.
    pub(super) fn lloyd(
        &self,
        points: &[Vec<f64>],
        mut centroids: Vec<Vec<f64>>,
    ) -> ClusterResult<KMeansFit> {
        let k = centroids.len();
        let dim = centroids.first().map_or(0, Vec::len);
        let mut labels = vec![0usize; points.len()];
        let mut error_history = Vec::new();

        for iteration in 1..=self.config.max_iterations {
            // Assignment step: nearest centroid, lowest index on ties
            assign_to_nearest(points, &centroids, &mut labels)?;

            // Update step: recompute centroids
            let mut means = compute_centroids(points, &labels, k, dim);
            if let Some(empty) = means.iter().position(Option::is_none) {
                match self.config.empty_cluster_policy {
                    EmptyClusterPolicy::Fail => {
                        return Err(ClusterError::empty_cluster(empty, iteration));
                    }
                    EmptyClusterPolicy::Reseed => {
                        reseed_empty_clusters(points, &centroids, &mut labels, iteration)?;
                        means = compute_centroids(points, &labels, k, dim);
                    }
                }
            }

            let new_centroids = means
                .into_iter()
                .enumerate()
                .map(|(c, mean)| {
                    mean.ok_or_else(|| {
                        ClusterError::InvariantViolation(format!(
                            "cluster {} still empty after reseeding",
                            c
                        ))
                    })
                })
                .collect::<ClusterResult<Vec<_>>>()?;

            let error = centroid_shift(&centroids, &new_centroids);
            error_history.push(error);
            centroids = new_centroids;

            if error < self.config.tolerance {
                let wcss = compute_wcss(points, &labels, &centroids);
                info!(iterations = iteration, error, wcss, "k-means converged");

                let flat: Vec<f64> = centroids.iter().flatten().copied().collect();
                let centroid_matrix = DMatrix::from_row_slice(k, dim, &flat);
                return Ok(KMeansFit::new(
                    labels,
                    centroid_matrix,
                    iteration,
                    error_history,
                    wcss,
                ));
            }
        }

        let last = error_history.last().copied().unwrap_or(f64::INFINITY);
        warn!(
            iterations = self.config.max_iterations,
            error = last,
            "k-means did not converge"
        );
        Err(ClusterError::non_convergence(self.config.max_iterations, last))
    }
}
