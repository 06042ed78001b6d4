//! Shared graph fixtures for spectral tests.

use std::collections::HashSet;

use crate::adjacency::AdjacencyMatrix;

/// Two disjoint triangles {0,1,2} and {3,4,5}.
pub fn two_triangles() -> AdjacencyMatrix {
    AdjacencyMatrix::from_groups(6, &[vec![0, 1, 2], vec![3, 4, 5]]).unwrap()
}

/// Two disjoint triangles, row-normalized.
pub fn two_triangles_normalized() -> AdjacencyMatrix {
    two_triangles().row_normalized().unwrap()
}

/// Cliques {0,1,2,3}, {4,5,6} and {7,8} with no edges between them.
pub fn three_cliques() -> AdjacencyMatrix {
    AdjacencyMatrix::from_groups(9, &[vec![0, 1, 2, 3], vec![4, 5, 6], vec![7, 8]]).unwrap()
}

/// Two 4-cliques joined by a single weak edge 3 - 4.
pub fn bridged_cliques() -> AdjacencyMatrix {
    let mut rows = vec![vec![0.0; 8]; 8];
    for group in [0..4, 4..8] {
        for i in group.clone() {
            for j in group.clone() {
                if i != j {
                    rows[i][j] = 1.0;
                }
            }
        }
    }
    rows[3][4] = 0.05;
    rows[4][3] = 0.05;
    AdjacencyMatrix::from_rows(&rows).unwrap()
}

/// Connected undirected graph with uneven weights and degrees.
pub fn weighted_undirected() -> AdjacencyMatrix {
    AdjacencyMatrix::from_rows(&[
        vec![0.0, 2.0, 1.0, 0.0, 0.0],
        vec![2.0, 0.0, 3.0, 0.5, 0.0],
        vec![1.0, 3.0, 0.0, 0.0, 4.0],
        vec![0.0, 0.5, 0.0, 0.0, 1.5],
        vec![0.0, 0.0, 4.0, 1.5, 0.0],
    ])
    .unwrap()
}

/// Directed 3-cycle 0 → 1 → 2 → 0. Its Laplacian has eigenvalues
/// 0 and 3/2 ± i√3/2.
pub fn directed_cycle() -> AdjacencyMatrix {
    AdjacencyMatrix::from_rows(&[
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
        vec![1.0, 0.0, 0.0],
    ])
    .unwrap()
}

/// Row-stochastic absorbing chain with real spectrum {0.2, 0.5, 1}, so the
/// Laplacian has eigenvalues {0.8, 0.5, 0}.
pub fn absorbing_chain() -> AdjacencyMatrix {
    AdjacencyMatrix::from_rows(&[
        vec![0.2, 0.8, 0.0],
        vec![0.0, 0.5, 0.5],
        vec![0.0, 0.0, 1.0],
    ])
    .unwrap()
}

/// True if `labels` induce exactly the partition `groups`, up to renaming.
pub fn same_partition(labels: &[usize], groups: &[Vec<usize>]) -> bool {
    let mut seen = HashSet::new();
    for group in groups {
        let label = labels[group[0]];
        if !seen.insert(label) || group.iter().any(|&i| labels[i] != label) {
            return false;
        }
    }
    true
}

pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}
