//! Real eigendecomposition of random-walk Laplacians.
//!
//! `L = I - P` is not symmetric in general, but when `P` satisfies detailed
//! balance (`πᵢPᵢⱼ = πⱼPⱼᵢ` for some positive π) it is similar to the
//! symmetric matrix `I - Π^{1/2} P Π^{-1/2}`. Every undirected graph and every
//! row normalization of one qualifies, so the common case goes through a
//! symmetric solver and yields exactly real eigenvalues.
//!
//! Directed graphs fall back to a real Schur decomposition. Eigenvalues with
//! an imaginary part above tolerance are rejected; the remaining
//! eigenvectors are recovered by back-substitution on the triangular factor.

use std::collections::VecDeque;

use nalgebra::{DMatrix, DVector, DVectorView, Schur, SymmetricEigen};
use tracing::{debug, warn};

use crate::error::{ClusterError, ClusterResult};

use super::laplacian::Laplacian;

/// Relative magnitude under which a sum or entry is treated as zero when
/// choosing an eigenvector's sign.
const SIGN_TOLERANCE: f64 = 1.0e-9;

/// Which solver produced an [`EigenPairs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverPath {
    /// Reversible chain, symmetric eigensolver on the similar matrix.
    Symmetrized,
    /// General chain, real Schur decomposition.
    Schur,
}

/// All N eigenpairs of a Laplacian, in solver order.
#[derive(Clone, Debug)]
pub struct EigenPairs {
    /// Real eigenvalues; `values[j]` belongs to column `j` of `vectors`.
    pub values: Vec<f64>,
    /// Unit-norm, sign-pinned eigenvectors as columns.
    pub vectors: DMatrix<f64>,
    pub path: SolverPath,
}

impl EigenPairs {
    /// Number of eigenpairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest `‖L x - λ x‖` over all pairs.
    pub fn max_residual(&self, laplacian: &DMatrix<f64>) -> f64 {
        self.values
            .iter()
            .enumerate()
            .map(|(j, &lambda)| {
                let x = self.vectors.column(j);
                (laplacian * x - x * lambda).norm()
            })
            .fold(0.0, f64::max)
    }
}

/// Decompose `laplacian` into real eigenpairs.
///
/// # Errors
///
/// - `IllConditionedSpectrum` if an eigenvalue has `|Im λ| > imaginary_tolerance`
/// - `InvariantViolation` if the Schur iteration fails to converge or an
///   eigenvector degenerates to zero
pub fn decompose(
    laplacian: &Laplacian,
    reversibility_tolerance: f64,
    imaginary_tolerance: f64,
) -> ClusterResult<EigenPairs> {
    let mut pairs = match stationary_weights(laplacian.transition(), reversibility_tolerance) {
        Some(pi) => {
            debug!(n = laplacian.len(), "transition matrix is reversible, using symmetric solver");
            decompose_reversible(laplacian.transition(), &pi)
        }
        None => {
            debug!(n = laplacian.len(), "transition matrix is not reversible, using Schur solver");
            decompose_general(laplacian.matrix(), imaginary_tolerance)?
        }
    };

    normalize_columns(&mut pairs.vectors)?;
    pin_column_signs(&mut pairs.vectors);
    Ok(pairs)
}

/// Positive weights π satisfying detailed balance for `p`, normalized to sum
/// to 1 on every connected component, or `None` if `p` is not reversible.
///
/// π is propagated along a breadth-first spanning tree of the support and
/// then checked against every edge.
pub fn stationary_weights(p: &DMatrix<f64>, tolerance: f64) -> Option<DVector<f64>> {
    let n = p.nrows();

    // Detailed balance needs a symmetric support.
    for i in 0..n {
        for j in (i + 1)..n {
            if (p[(i, j)] > 0.0) != (p[(j, i)] > 0.0) {
                return None;
            }
        }
    }

    let mut pi = DVector::zeros(n);
    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();
    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        pi[root] = 1.0;
        let mut component = vec![root];
        queue.push_back(root);

        while let Some(i) = queue.pop_front() {
            for j in 0..n {
                if j == i || visited[j] || p[(i, j)] <= 0.0 {
                    continue;
                }
                pi[j] = pi[i] * p[(i, j)] / p[(j, i)];
                visited[j] = true;
                component.push(j);
                queue.push_back(j);
            }
        }

        let total: f64 = component.iter().map(|&i| pi[i]).sum();
        for &i in &component {
            pi[i] /= total;
        }
    }

    if pi.iter().any(|&w: &f64| !w.is_finite() || w <= 0.0) {
        return None;
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let forward = pi[i] * p[(i, j)];
            let backward = pi[j] * p[(j, i)];
            let scale = forward.max(backward);
            if scale > 0.0 && (forward - backward).abs() > tolerance * scale {
                return None;
            }
        }
    }

    Some(pi)
}

fn decompose_reversible(p: &DMatrix<f64>, pi: &DVector<f64>) -> EigenPairs {
    let n = p.nrows();
    let sqrt_pi = pi.map(f64::sqrt);

    let similar = DMatrix::from_fn(n, n, |i, j| sqrt_pi[i] * p[(i, j)] / sqrt_pi[j]);
    // Symmetric in exact arithmetic; average away the rounding.
    let symmetric = (&similar + similar.transpose()) * 0.5;
    let eigen = SymmetricEigen::new(DMatrix::identity(n, n) - symmetric);

    let mut vectors = eigen.eigenvectors;
    for i in 0..n {
        let scale = 1.0 / sqrt_pi[i];
        for j in 0..n {
            vectors[(i, j)] *= scale;
        }
    }

    EigenPairs {
        values: eigen.eigenvalues.iter().copied().collect(),
        vectors,
        path: SolverPath::Symmetrized,
    }
}

fn decompose_general(l: &DMatrix<f64>, imaginary_tolerance: f64) -> ClusterResult<EigenPairs> {
    let n = l.nrows();
    let max_iterations = 1000 * n.max(1);
    let schur = Schur::try_new(l.clone(), f64::EPSILON, max_iterations).ok_or_else(|| {
        ClusterError::InvariantViolation(format!(
            "Schur decomposition of {}x{} Laplacian did not converge in {} iterations",
            n, n, max_iterations
        ))
    })?;

    let max_imaginary = schur
        .complex_eigenvalues()
        .iter()
        .map(|z| z.im.abs())
        .fold(0.0, f64::max);
    if max_imaginary > imaginary_tolerance {
        warn!(max_imaginary, imaginary_tolerance, "Laplacian has complex eigenvalues");
        return Err(ClusterError::ill_conditioned(max_imaginary, imaginary_tolerance));
    }

    let (q, t) = schur.unpack();
    let values: Vec<f64> = (0..n).map(|k| t[(k, k)]).collect();

    // Solve (T - λₖI) y = 0 with yₖ = 1 and y zero below k.
    let mut y = DMatrix::zeros(n, n);
    for k in 0..n {
        let lambda = t[(k, k)];
        let smin = (f64::EPSILON * lambda.abs()).max(f64::EPSILON);
        y[(k, k)] = 1.0;
        for i in (0..k).rev() {
            let s: f64 = ((i + 1)..=k).map(|j| t[(i, j)] * y[(j, k)]).sum();
            let mut denom = t[(i, i)] - lambda;
            if denom.abs() < smin {
                denom = smin.copysign(denom);
            }
            y[(i, k)] = -s / denom;
        }
    }

    Ok(EigenPairs {
        values,
        vectors: q * y,
        path: SolverPath::Schur,
    })
}

fn normalize_columns(m: &mut DMatrix<f64>) -> ClusterResult<()> {
    for j in 0..m.ncols() {
        let norm = m.column(j).norm();
        if !norm.is_finite() || norm == 0.0 {
            return Err(ClusterError::InvariantViolation(format!(
                "eigenvector {} has norm {}",
                j, norm
            )));
        }
        for x in m.column_mut(j).iter_mut() {
            *x /= norm;
        }
    }
    Ok(())
}

/// True if `col` should be negated: its entries sum to a negative value, or
/// the sum (nearly) vanishes and its first significant entry is negative.
pub(crate) fn column_needs_flip(col: DVectorView<'_, f64>) -> bool {
    let l1 = col.lp_norm(1);
    if l1 == 0.0 {
        return false;
    }
    let sum = col.sum();
    if sum.abs() > SIGN_TOLERANCE * l1 {
        return sum < 0.0;
    }
    let floor = SIGN_TOLERANCE * col.amax();
    col.iter().find(|x| x.abs() > floor).map_or(false, |&x| x < 0.0)
}

/// Negate column `j` of `m` in place.
pub(crate) fn negate_column(m: &mut DMatrix<f64>, j: usize) {
    for x in m.column_mut(j).iter_mut() {
        *x = -*x;
    }
}

/// Flip columns so their entries sum to a positive value. When a column sums
/// to (nearly) zero, its first significant entry is made positive instead.
pub(crate) fn pin_column_signs(m: &mut DMatrix<f64>) {
    for j in 0..m.ncols() {
        if column_needs_flip(m.column(j)) {
            negate_column(m, j);
        }
    }
}
