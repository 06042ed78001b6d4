//! Distance metrics for clustering.

/// Compute squared Euclidean distance between two points.
///
/// Uses squared distance to avoid sqrt for comparison.
#[inline]
pub fn euclidean_distance_squared(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Compute Euclidean distance between two points.
#[inline]
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    euclidean_distance_squared(a, b).sqrt()
}

/// Frobenius norm of the difference between two centroid sets, i.e. the
/// Euclidean norm of the vector of per-centroid movements.
pub fn centroid_shift(old: &[Vec<f64>], new: &[Vec<f64>]) -> f64 {
    old.iter()
        .zip(new.iter())
        .map(|(a, b)| euclidean_distance_squared(a, b))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_distance_squared() {
        let a = [0.0; 4];
        let b = [1.0; 4];

        let dist_sq = euclidean_distance_squared(&a, &b);

        assert!((dist_sq - 4.0).abs() < f64::EPSILON);
        println!("[VERIFIED] euclidean_distance_squared computes correctly");
    }

    #[test]
    fn test_euclidean_distance() {
        let dist = euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]);
        assert!((dist - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_euclidean_distance_same_point() {
        let a = [0.5, -2.0, 7.25];
        assert_eq!(euclidean_distance(&a, &a), 0.0);
    }

    #[test]
    fn test_centroid_shift_is_frobenius_norm() {
        let old = vec![vec![0.0, 0.0], vec![1.0, 1.0]];
        let new = vec![vec![3.0, 0.0], vec![1.0, 5.0]];

        // sqrt(3^2 + 4^2)
        let shift = centroid_shift(&old, &new);

        assert!((shift - 5.0).abs() < 1e-12);
        assert_eq!(centroid_shift(&old, &old), 0.0);
        println!("[VERIFIED] centroid_shift is the norm of per-centroid movements");
    }
}
