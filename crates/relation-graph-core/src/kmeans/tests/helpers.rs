//! Helper functions for creating test data (REAL data, NO mocks).

use nalgebra::DMatrix;

/// Build an N×d matrix from row slices.
pub fn matrix(rows: &[&[f64]]) -> DMatrix<f64> {
    let d = rows.first().map_or(0, |r| r.len());
    DMatrix::from_fn(rows.len(), d, |i, j| rows[i][j])
}

/// Three tight, well-separated 2-D blobs of five points each, rows grouped
/// by blob: rows 0-4 near (0, 0), rows 5-9 near (10, 10), rows 10-14 near (-10, 10).
pub fn three_blobs() -> DMatrix<f64> {
    let centers = [(0.0, 0.0), (10.0, 10.0), (-10.0, 10.0)];
    let offsets = [(0.0, 0.0), (0.1, 0.0), (0.0, 0.1), (-0.1, 0.0), (0.0, -0.1)];
    let mut rows = Vec::with_capacity(15);
    for (cx, cy) in centers {
        for (dx, dy) in offsets {
            rows.push([cx + dx, cy + dy]);
        }
    }
    DMatrix::from_fn(rows.len(), 2, |i, j| rows[i][j])
}

/// True when `labels` splits rows exactly into `groups` (up to label permutation).
pub fn same_partition(labels: &[usize], groups: &[&[usize]]) -> bool {
    let mut seen = Vec::new();
    for group in groups {
        let first = labels[group[0]];
        if seen.contains(&first) || group.iter().any(|&i| labels[i] != first) {
            return false;
        }
        seen.push(first);
    }
    true
}

/// Two tight blobs of four points each, 1000 apart along the x axis.
///
/// Blob members have pairwise distinct x offsets so no two centroids inside
/// one blob are ever equidistant from the other blob.
pub fn two_blobs() -> DMatrix<f64> {
    let offsets = [(0.0, 0.0), (0.1, 0.05), (0.2, -0.05), (0.3, 0.02)];
    let mut rows = Vec::with_capacity(8);
    for cx in [0.0, 1000.0] {
        for (dx, dy) in offsets {
            rows.push([cx + dx, dy]);
        }
    }
    DMatrix::from_fn(rows.len(), 2, |i, j| rows[i][j])
}
