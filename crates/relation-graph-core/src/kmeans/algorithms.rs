//! Clustering algorithms and helper functions.
//!
//! Contains seeded centroid sampling, nearest-centroid assignment,
//! centroid recomputation and empty-cluster recovery.

use std::collections::HashSet;

use nalgebra::DMatrix;
use rand::seq::index::sample;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use crate::error::{ClusterError, ClusterResult};

use super::metrics::{euclidean_distance, euclidean_distance_squared};

/// Copy the rows of an N×d matrix into owned point vectors.
pub fn matrix_rows(data: &DMatrix<f64>) -> Vec<Vec<f64>> {
    data.row_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}

/// Indices of the first occurrence of every distinct row, in row order.
///
/// With `tolerance == 0.0` rows are compared bitwise after folding `-0.0`
/// into `0.0`. Otherwise a row is distinct when it lies farther than
/// `tolerance` from every row already kept.
pub fn distinct_row_indices(points: &[Vec<f64>], tolerance: f64) -> Vec<usize> {
    if tolerance > 0.0 {
        let limit = tolerance * tolerance;
        let mut kept: Vec<usize> = Vec::new();
        for (i, point) in points.iter().enumerate() {
            if kept
                .iter()
                .all(|&j| euclidean_distance_squared(point, &points[j]) > limit)
            {
                kept.push(i);
            }
        }
        return kept;
    }

    let mut seen: HashSet<Vec<u64>> = HashSet::with_capacity(points.len());
    points
        .iter()
        .enumerate()
        .filter(|(_, point)| seen.insert(point.iter().map(|x| (x + 0.0).to_bits()).collect()))
        .map(|(i, _)| i)
        .collect()
}

/// Sample `k` distinct rows without replacement as initial centroids.
///
/// `candidates` must list row indices with pairwise distinct values, so the
/// returned centroids are pairwise distinct as well.
pub fn sample_initial_centroids(
    points: &[Vec<f64>],
    candidates: &[usize],
    k: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<Vec<f64>> {
    sample(rng, candidates.len(), k)
        .into_iter()
        .map(|i| points[candidates[i]].clone())
        .collect()
}

/// Index of the centroid nearest to `point`.
///
/// Ties go to the lowest centroid index. `None` only if no distance compares
/// below infinity, which validated finite input never produces.
pub fn nearest_centroid(point: &[f64], centroids: &[Vec<f64>]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (j, centroid) in centroids.iter().enumerate() {
        let dist = euclidean_distance(point, centroid);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ if dist.is_finite() => best = Some((j, dist)),
            _ => {}
        }
    }
    best.map(|(j, _)| j)
}

/// Assign every point to its nearest centroid, overwriting `labels`.
///
/// # Errors
///
/// Returns `ClusterError::InvariantViolation` if a point could not be
/// assigned to any centroid.
pub fn assign_to_nearest(
    points: &[Vec<f64>],
    centroids: &[Vec<f64>],
    labels: &mut [usize],
) -> ClusterResult<()> {
    for (i, point) in points.iter().enumerate() {
        labels[i] = nearest_centroid(point, centroids).ok_or_else(|| {
            ClusterError::InvariantViolation(format!(
                "no assignment computed for row {} against {} centroids",
                i,
                centroids.len()
            ))
        })?;
    }
    Ok(())
}

/// Compute new centroids as the coordinate-wise mean of assigned points.
///
/// Clusters without members yield `None` rather than a 0/0 mean.
pub fn compute_centroids(
    points: &[Vec<f64>],
    labels: &[usize],
    k: usize,
    dim: usize,
) -> Vec<Option<Vec<f64>>> {
    let mut sums = vec![vec![0.0f64; dim]; k];
    let mut counts = vec![0usize; k];

    for (point, &cluster) in points.iter().zip(labels.iter()) {
        counts[cluster] += 1;
        for (sum, value) in sums[cluster].iter_mut().zip(point.iter()) {
            *sum += value;
        }
    }

    sums.into_iter()
        .zip(counts)
        .map(|(mut sum, count)| {
            if count == 0 {
                return None;
            }
            for elem in sum.iter_mut() {
                *elem /= count as f64;
            }
            Some(sum)
        })
        .collect()
}

/// Fill every empty cluster with the row farthest from its assigned centroid.
///
/// Only rows whose cluster has more than one member may be moved, so no
/// new empty cluster is created. Ties go to the lowest row index.
///
/// # Errors
///
/// Returns `ClusterError::EmptyCluster` when no movable row sits at a
/// positive distance from its centroid.
pub fn reseed_empty_clusters(
    points: &[Vec<f64>],
    centroids: &[Vec<f64>],
    labels: &mut [usize],
    iteration: usize,
) -> ClusterResult<usize> {
    let k = centroids.len();
    let mut counts = vec![0usize; k];
    for &label in labels.iter() {
        counts[label] += 1;
    }

    let mut reseeded = 0;
    for empty in 0..k {
        if counts[empty] > 0 {
            continue;
        }

        let mut farthest: Option<(usize, f64)> = None;
        for (i, point) in points.iter().enumerate() {
            let owner = labels[i];
            if counts[owner] < 2 {
                continue;
            }
            let dist = euclidean_distance_squared(point, &centroids[owner]);
            if farthest.map_or(true, |(_, best)| dist > best) {
                farthest = Some((i, dist));
            }
        }

        match farthest {
            Some((row, dist)) if dist > 0.0 => {
                warn!(
                    cluster = empty,
                    row,
                    iteration,
                    "empty cluster reseeded from farthest row"
                );
                counts[labels[row]] -= 1;
                labels[row] = empty;
                counts[empty] = 1;
                reseeded += 1;
            }
            _ => return Err(ClusterError::empty_cluster(empty, iteration)),
        }
    }

    Ok(reseeded)
}

/// Compute within-cluster sum of squares.
pub fn compute_wcss(points: &[Vec<f64>], labels: &[usize], centroids: &[Vec<f64>]) -> f64 {
    points
        .iter()
        .zip(labels.iter())
        .map(|(point, &cluster)| euclidean_distance_squared(point, &centroids[cluster]))
        .sum()
}
