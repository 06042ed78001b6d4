//! Type definitions for k-means results.

use nalgebra::DMatrix;

/// Result of a converged k-means fit.
///
/// Contains the final assignment and convergence information.
#[derive(Clone, Debug)]
pub struct KMeansFit {
    /// One label per input row, in input row order. Every label is in `[0, k)`.
    pub labels: Vec<usize>,

    /// k×d centroid matrix; row `c` is the mean of the rows labelled `c`.
    pub centroids: DMatrix<f64>,

    /// Number of Lloyd iterations performed.
    pub iterations: usize,

    /// Centroid movement recorded after every iteration.
    ///
    /// The last entry is below the configured tolerance.
    pub error_history: Vec<f64>,

    /// Total within-cluster sum of squares (WCSS).
    ///
    /// Sum of squared distances from each point to its centroid.
    pub wcss: f64,
}

impl KMeansFit {
    /// Create a new fit result.
    pub fn new(
        labels: Vec<usize>,
        centroids: DMatrix<f64>,
        iterations: usize,
        error_history: Vec<f64>,
        wcss: f64,
    ) -> Self {
        Self {
            labels,
            centroids,
            iterations,
            error_history,
            wcss,
        }
    }

    /// Number of clusters (k).
    #[inline]
    pub fn num_clusters(&self) -> usize {
        self.centroids.nrows()
    }

    /// Number of rows assigned to each cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.num_clusters()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }

    /// Row indices assigned to `cluster`, ascending.
    pub fn members(&self, cluster: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, &label)| label == cluster)
            .map(|(i, _)| i)
            .collect()
    }

    /// Movement at the final iteration.
    pub fn final_error(&self) -> f64 {
        self.error_history.last().copied().unwrap_or(0.0)
    }
}
