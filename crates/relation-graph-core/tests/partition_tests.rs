//! Integration tests for the public partitioning API.
//!
//! These run the full pipeline through the crate root re-exports only.

use nalgebra::DMatrix;
use relation_graph_core::{
    spectral_clustering, AdjacencyMatrix, CentroidClustering, ClusterError, EmptyClusterPolicy,
    KMeans, KMeansConfig, Normalization, SpectralConfig, SpectralEmbedder,
};

fn groups_match(labels: &[usize], groups: &[&[usize]]) -> bool {
    let mut used = Vec::new();
    for group in groups {
        let label = labels[group[0]];
        if used.contains(&label) || group.iter().any(|&i| labels[i] != label) {
            return false;
        }
        used.push(label);
    }
    true
}

// ========== Clique Recovery ==========

#[test]
fn test_clique_recovery_end_to_end() {
    let adjacency = AdjacencyMatrix::from_groups(6, &[vec![0, 1, 2], vec![3, 4, 5]])
        .unwrap()
        .row_normalized()
        .unwrap();

    for row in adjacency.degrees().iter() {
        assert!((row - 1.0).abs() < 1e-12);
    }

    let partition = spectral_clustering(&adjacency, 2).unwrap();

    assert!(groups_match(partition.labels(), &[&[0, 1, 2], &[3, 4, 5]]));
    println!("[VERIFIED] end-to-end clique recovery: {:?}", partition.labels());
}

#[test]
fn test_overlapping_groups_share_a_category() {
    // Groups chain {0,1,2} and {2,3} together, {4,5,6} stands alone.
    let adjacency =
        AdjacencyMatrix::from_groups(7, &[vec![0, 1, 2], vec![2, 3], vec![4, 5, 6]]).unwrap();

    let partition = spectral_clustering(&adjacency, 2).unwrap();

    assert!(groups_match(partition.labels(), &[&[0, 1, 2, 3], &[4, 5, 6]]));
    assert_eq!(partition.embedding().near_zero_count(1e-9), 2);
}

// ========== K-Means Through The Public API ==========

#[test]
fn test_kmeans_public_api() {
    let data = DMatrix::from_row_slice(
        6,
        2,
        &[0.0, 0.0, 0.1, 0.0, 0.0, 0.1, 5.0, 5.0, 5.1, 5.0, 5.0, 5.1],
    );
    let config = KMeansConfig::with_k(2)
        .unwrap()
        .with_empty_cluster_policy(EmptyClusterPolicy::Fail);

    let fit = KMeans::new(config).fit_detailed(&data).unwrap();

    assert!(groups_match(&fit.labels, &[&[0, 1, 2], &[3, 4, 5]]));
    assert_eq!(fit.cluster_sizes(), vec![3, 3]);
    assert!(fit.final_error() < 1e-14);
}

#[test]
fn test_kmeans_k_above_distinct_rows() {
    let data = DMatrix::from_row_slice(4, 1, &[1.0, 1.0, 2.0, 2.0]);
    let err = KMeans::new(KMeansConfig::with_k(3).unwrap())
        .fit(&data)
        .unwrap_err();

    assert!(matches!(err, ClusterError::InvalidConfig { .. }));
}

// ========== Error Surfaces ==========

#[test]
fn test_directed_cycle_rejected() {
    let adjacency = AdjacencyMatrix::from_rows(&[
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
        vec![1.0, 0.0, 0.0],
    ])
    .unwrap();

    let err = spectral_clustering(&adjacency, 2).unwrap_err();

    assert!(matches!(err, ClusterError::IllConditionedSpectrum { .. }));
    assert!(!err.is_input_error());
}

#[test]
fn test_pre_normalized_convention_is_explicit() {
    let adjacency = AdjacencyMatrix::from_groups(4, &[vec![0, 1], vec![2, 3]]).unwrap();
    let config = SpectralConfig::with_categories(2)
        .unwrap()
        .with_normalization(Normalization::PreNormalized);

    // Unit-weight pairs are already row-stochastic.
    let partition = SpectralEmbedder::new(config)
        .unwrap()
        .embed_and_cluster(&adjacency)
        .unwrap();

    assert!(groups_match(partition.labels(), &[&[0, 1], &[2, 3]]));
}
