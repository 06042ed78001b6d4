//! Random-walk graph Laplacian.
//!
//! Both conventions produce `L = I - P` for a row-stochastic transition
//! matrix `P`. They differ only in where `P` comes from:
//!
//! - `RandomWalk`: `P = D⁻¹A`, zero-sum rows rejected before division
//! - `PreNormalized`: `P = A`, rows must already sum to 1

use nalgebra::DMatrix;
use tracing::debug;

use crate::adjacency::AdjacencyMatrix;
use crate::error::{ClusterError, ClusterResult};

use super::config::Normalization;

/// `L = I - P` together with the transition matrix it was built from.
#[derive(Clone, Debug)]
pub struct Laplacian {
    matrix: DMatrix<f64>,
    transition: DMatrix<f64>,
    normalization: Normalization,
}

impl Laplacian {
    /// Build the Laplacian of `adjacency` under `normalization`.
    ///
    /// # Errors
    ///
    /// - `DegenerateNormalization` for a zero-sum row
    /// - `InvalidInput` under `PreNormalized` when a row sum differs from 1
    ///   by more than `stochastic_tolerance`
    pub fn new(
        adjacency: &AdjacencyMatrix,
        normalization: Normalization,
        stochastic_tolerance: f64,
    ) -> ClusterResult<Self> {
        let transition = transition_matrix(adjacency, normalization, stochastic_tolerance)?;
        let n = transition.nrows();
        let matrix = DMatrix::identity(n, n) - &transition;
        debug!(n, %normalization, "built random-walk Laplacian");
        Ok(Self {
            matrix,
            transition,
            normalization,
        })
    }

    /// The Laplacian `I - P`.
    #[inline]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// The row-stochastic transition matrix `P`.
    #[inline]
    pub fn transition(&self) -> &DMatrix<f64> {
        &self.transition
    }

    #[inline]
    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.matrix.nrows()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matrix.nrows() == 0
    }
}

/// The diagonal degree matrix D.
pub fn degree_matrix(adjacency: &AdjacencyMatrix) -> DMatrix<f64> {
    DMatrix::from_diagonal(&adjacency.degrees())
}

/// Row-stochastic transition matrix for `adjacency`.
///
/// # Errors
///
/// See [`Laplacian::new`].
pub fn transition_matrix(
    adjacency: &AdjacencyMatrix,
    normalization: Normalization,
    stochastic_tolerance: f64,
) -> ClusterResult<DMatrix<f64>> {
    match normalization {
        Normalization::RandomWalk => Ok(adjacency.row_normalized()?.into_inner()),
        Normalization::PreNormalized => {
            let sums = adjacency.degrees();
            for (row, &sum) in sums.iter().enumerate() {
                if sum <= 0.0 {
                    return Err(ClusterError::degenerate_row(row));
                }
                if (sum - 1.0).abs() > stochastic_tolerance {
                    return Err(ClusterError::invalid_input(format!(
                        "row {} sums to {} but pre-normalized input must be row-stochastic \
                         (tolerance {:e})",
                        row, sum, stochastic_tolerance
                    )));
                }
            }
            Ok(adjacency.as_matrix().clone())
        }
    }
}
