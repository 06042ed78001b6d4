//! Low-dimensional spectral embeddings.

use nalgebra::DMatrix;

use crate::error::{ClusterError, ClusterResult};

use super::canonical::canonicalize;
use super::eigen::EigenPairs;

/// Default bound under which an eigenvalue counts as zero.
pub const DEFAULT_NEAR_ZERO_TOLERANCE: f64 = 1.0e-9;

/// Column order that sorts `values` ascending, ties by original index.
pub fn ascending_order(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]).then(a.cmp(&b)));
    order
}

/// N×k embedding: the eigenvectors of the k smallest eigenvalues as columns.
#[derive(Clone, Debug, PartialEq)]
pub struct SpectralEmbedding {
    matrix: DMatrix<f64>,
    eigenvalues: Vec<f64>,
    canonicalized: bool,
}

impl SpectralEmbedding {
    /// Select the `k` eigenvectors of smallest eigenvalue.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::InvalidConfig` unless `1 <= k <= N`.
    pub fn from_eigenpairs(pairs: &EigenPairs, k: usize) -> ClusterResult<Self> {
        let n = pairs.len();
        if k == 0 || k > n {
            return Err(ClusterError::invalid_config(format!(
                "embedding dimension ({}) must be in 1..={}",
                k, n
            )));
        }

        let order = ascending_order(&pairs.values);
        let selected = &order[..k];
        let matrix = DMatrix::from_fn(n, k, |i, c| pairs.vectors[(i, selected[c])]);
        let eigenvalues = selected.iter().map(|&j| pairs.values[j]).collect();

        Ok(Self {
            matrix,
            eigenvalues,
            canonicalized: false,
        })
    }

    /// The N×k embedding matrix. Row `i` holds the coordinates of node `i`.
    #[inline]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn into_matrix(self) -> DMatrix<f64> {
        self.matrix
    }

    /// Selected eigenvalues, ascending. `eigenvalues()[c]` belongs to the
    /// eigenvector that built column `c` before any canonical rotation.
    #[inline]
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// Number of embedded nodes (N).
    #[inline]
    pub fn len(&self) -> usize {
        self.matrix.nrows()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matrix.nrows() == 0
    }

    /// Embedding dimension (k).
    #[inline]
    pub fn dims(&self) -> usize {
        self.matrix.ncols()
    }

    #[inline]
    pub fn is_canonicalized(&self) -> bool {
        self.canonicalized
    }

    /// Coordinates of node `i`.
    pub fn row(&self, i: usize) -> Vec<f64> {
        self.matrix.row(i).iter().copied().collect()
    }

    /// How many selected eigenvalues satisfy `|λ| <= tolerance`.
    ///
    /// This is the number of (nearly) disconnected components, capped at k.
    pub fn near_zero_count(&self, tolerance: f64) -> usize {
        self.eigenvalues.iter().filter(|λ| λ.abs() <= tolerance).count()
    }

    /// Rotate into the canonical Gram basis. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::InvariantViolation` if the SVD fails.
    pub fn canonicalized(self) -> ClusterResult<Self> {
        if self.canonicalized {
            return Ok(self);
        }
        Ok(Self {
            matrix: canonicalize(&self.matrix)?,
            eigenvalues: self.eigenvalues,
            canonicalized: true,
        })
    }
}
