//! Canonical orientation for embeddings.
//!
//! For an N×k embedding M, the Gram matrix `G = MᵀM` is symmetric positive
//! semi-definite, so its SVD `G = UΣUᵀ` has an orthogonal U. Rotating to
//! `M' = M·U` leaves every pairwise distance unchanged and makes `M'ᵀM' = Σ`
//! diagonal with descending entries.

use nalgebra::DMatrix;

use crate::error::{ClusterError, ClusterResult};

use super::eigen::{column_needs_flip, negate_column};
use super::embedding::ascending_order;

/// `MᵀM`.
pub fn gram_matrix(m: &DMatrix<f64>) -> DMatrix<f64> {
    m.tr_mul(m)
}

/// Orthogonal k×k basis of left singular vectors of the Gram matrix,
/// ordered by descending singular value. Each column's sign is chosen so the
/// matching column of `M·U` is sign-pinned, which makes the result
/// independent of the orientation of `m`.
///
/// # Errors
///
/// Returns `ClusterError::InvariantViolation` if the SVD does not produce U.
pub fn canonical_basis(m: &DMatrix<f64>) -> ClusterResult<DMatrix<f64>> {
    let svd = gram_matrix(m).svd(true, false);
    let u = svd.u.ok_or_else(|| {
        ClusterError::InvariantViolation("SVD of Gram matrix did not produce U".to_string())
    })?;

    let negated: Vec<f64> = svd.singular_values.iter().map(|s| -s).collect();
    let order = ascending_order(&negated);
    let mut basis = DMatrix::from_fn(u.nrows(), u.ncols(), |i, c| u[(i, order[c])]);
    let projected = m * &basis;
    for c in 0..basis.ncols() {
        if column_needs_flip(projected.column(c)) {
            negate_column(&mut basis, c);
        }
    }
    Ok(basis)
}

/// Rotate `m` into its canonical orientation `M·U`.
///
/// # Errors
///
/// See [`canonical_basis`].
pub fn canonicalize(m: &DMatrix<f64>) -> ClusterResult<DMatrix<f64>> {
    Ok(m * canonical_basis(m)?)
}
