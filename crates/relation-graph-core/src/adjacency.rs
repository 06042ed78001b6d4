//! Validated adjacency matrices for weighted relation graphs.
//!
//! An `AdjacencyMatrix` is always square, non-empty, finite and
//! non-negative. Construction fails fast on anything else, so the spectral
//! pipeline never has to re-check its input.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::error::{ClusterError, ClusterResult};

/// N×N matrix of non-negative edge weights.
///
/// The core never mutates a caller's matrix in place: normalization returns
/// a new `AdjacencyMatrix`.
#[derive(Clone, Debug, PartialEq)]
pub struct AdjacencyMatrix {
    weights: DMatrix<f64>,
}

impl AdjacencyMatrix {
    /// Wrap a weight matrix after validating it.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::InvalidInput` if the matrix is empty, not
    /// square, or holds a negative or non-finite weight.
    pub fn new(weights: DMatrix<f64>) -> ClusterResult<Self> {
        let (rows, cols) = weights.shape();
        if rows == 0 {
            return Err(ClusterError::invalid_input("adjacency matrix must not be empty"));
        }
        if rows != cols {
            return Err(ClusterError::invalid_input(format!(
                "adjacency matrix must be square, got {}x{}",
                rows, cols
            )));
        }
        for i in 0..rows {
            for j in 0..cols {
                let w = weights[(i, j)];
                if !w.is_finite() {
                    return Err(ClusterError::invalid_input(format!(
                        "weight at ({}, {}) is not finite: {}",
                        i, j, w
                    )));
                }
                if w < 0.0 {
                    return Err(ClusterError::invalid_input(format!(
                        "weight at ({}, {}) is negative: {}",
                        i, j, w
                    )));
                }
            }
        }
        Ok(Self { weights })
    }

    /// Build from row vectors.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::InvalidInput` for ragged rows, plus everything
    /// [`AdjacencyMatrix::new`] rejects.
    pub fn from_rows(rows: &[Vec<f64>]) -> ClusterResult<Self> {
        let n = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(ClusterError::invalid_input(format!(
                "row {} has {} entries, expected {}",
                i,
                row.len(),
                n
            )));
        }
        Self::new(DMatrix::from_fn(n, n, |i, j| rows[i][j]))
    }

    /// Build an unweighted graph where each group of node indices forms a
    /// clique. Self loops are never added.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::InvalidInput` if `n == 0` or any index is `>= n`.
    pub fn from_groups(n: usize, groups: &[Vec<usize>]) -> ClusterResult<Self> {
        if n == 0 {
            return Err(ClusterError::invalid_input("node count must be > 0"));
        }
        let mut weights = DMatrix::zeros(n, n);
        for (g, group) in groups.iter().enumerate() {
            if let Some(&bad) = group.iter().find(|&&idx| idx >= n) {
                return Err(ClusterError::invalid_input(format!(
                    "group {} references node {} but only {} nodes exist",
                    g, bad, n
                )));
            }
            for &i in group {
                for &j in group {
                    if i != j {
                        weights[(i, j)] = 1.0;
                    }
                }
            }
        }
        debug!(nodes = n, groups = groups.len(), "built clique adjacency");
        Ok(Self { weights })
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.nrows()
    }

    /// Always false: construction rejects empty matrices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.nrows() == 0
    }

    /// Borrow the raw weights.
    #[inline]
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.weights
    }

    /// Consume into the raw weights.
    pub fn into_inner(self) -> DMatrix<f64> {
        self.weights
    }

    /// Weight of the edge `i -> j`.
    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.weights[(i, j)]
    }

    /// Row sums, i.e. the diagonal of the degree matrix D.
    pub fn degrees(&self) -> DVector<f64> {
        DVector::from_iterator(self.len(), self.weights.row_iter().map(|row| row.sum()))
    }

    /// Row sums, rejecting any zero-sum row before it can be divided by.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::DegenerateNormalization` naming the first
    /// zero-sum row.
    pub fn validated_degrees(&self) -> ClusterResult<DVector<f64>> {
        let degrees = self.degrees();
        if let Some(row) = degrees.iter().position(|&d| d <= 0.0) {
            return Err(ClusterError::degenerate_row(row));
        }
        Ok(degrees)
    }

    /// Divide every row by its sum so each row sums to 1.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::DegenerateNormalization` if any row sums to zero.
    pub fn row_normalized(&self) -> ClusterResult<Self> {
        let degrees = self.validated_degrees()?;
        let n = self.len();
        let weights = DMatrix::from_fn(n, n, |i, j| self.weights[(i, j)] / degrees[i]);
        Ok(Self { weights })
    }

    /// True if `|A[i,j] - A[j,i]| <= tol` for every pair.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        let n = self.len();
        (0..n).all(|i| ((i + 1)..n).all(|j| (self.weights[(i, j)] - self.weights[(j, i)]).abs() <= tol))
    }

    /// True if every row sums to 1 within `tol`.
    pub fn is_row_stochastic(&self, tol: f64) -> bool {
        self.degrees().iter().all(|&d| (d - 1.0).abs() <= tol)
    }
}
