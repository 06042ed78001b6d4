//! Spectral partitioning of weighted relation graphs.
//!
//! This crate turns an adjacency matrix of non-negative relation weights
//! into a fixed number of categories. The graph is embedded into the
//! eigenvectors of its random-walk Laplacian, and the embedding is
//! partitioned with seeded k-means.
//!
//! # Architecture
//!
//! - **adjacency**: validated N×N weight matrices and degree normalization
//! - **error**: typed failures with `ClusterError`
//! - **kmeans**: seeded Lloyd's algorithm over arbitrary-dimensional points
//! - **spectral**: Laplacian, eigensolver, embedding, canonical orientation
//!
//! Everything is in memory and synchronous. No file or network access.
//!
//! # Example
//!
//! ```
//! use relation_graph_core::adjacency::AdjacencyMatrix;
//! use relation_graph_core::error::ClusterResult;
//! use relation_graph_core::spectral::spectral_clustering;
//!
//! fn example() -> ClusterResult<()> {
//!     let adjacency = AdjacencyMatrix::from_groups(6, &[vec![0, 1, 2], vec![3, 4, 5]])?;
//!     let partition = spectral_clustering(&adjacency.row_normalized()?, 2)?;
//!     assert_eq!(partition.category_sizes(), vec![3, 3]);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod adjacency;
pub mod error;
pub mod kmeans;
pub mod spectral;

// Re-exports for convenience
pub use adjacency::AdjacencyMatrix;
pub use error::{ClusterError, ClusterResult};
pub use kmeans::{CentroidClustering, EmptyClusterPolicy, KMeans, KMeansConfig, KMeansFit};
pub use spectral::{
    spectral_clustering, Normalization, SpectralConfig, SpectralEmbedder, SpectralEmbedding,
    SpectralPartition,
};
