//! Spectral embedding of relation graphs.
//!
//! # Pipeline
//!
//! 1. Degree-normalize the adjacency matrix into a transition matrix `P`
//! 2. Build the random-walk Laplacian `L = I - P`
//! 3. Decompose `L` into real eigenpairs
//! 4. Keep the eigenvectors of the k smallest eigenvalues (ties by column)
//! 5. Optionally rotate into the canonical Gram basis
//! 6. Partition the rows with k-means
//!
//! # Normalization
//!
//! [`Normalization::RandomWalk`] divides raw weights by their row sums.
//! [`Normalization::PreNormalized`] takes the matrix as an already
//! row-stochastic `P` and rejects rows that do not sum to 1. The two
//! conventions are never mixed silently.
//!
//! # Determinism
//!
//! Eigenvectors are unit-norm with pinned signs and ordered by eigenvalue
//! then column index. K-means draws its initial centroids from a seeded
//! ChaCha8 generator. The same graph and configuration always yield the
//! same labels.

mod canonical;
mod config;
mod eigen;
mod embedder;
mod embedding;
mod laplacian;
#[cfg(test)]
mod tests;
mod types;

pub use canonical::{canonical_basis, canonicalize, gram_matrix};
pub use config::{
    KMeansSettings, Normalization, SpectralConfig, DEFAULT_EMBEDDING_DISTINCT_TOLERANCE,
    DEFAULT_IMAGINARY_TOLERANCE, DEFAULT_NUM_CATEGORIES, DEFAULT_REVERSIBILITY_TOLERANCE,
    DEFAULT_STOCHASTIC_TOLERANCE,
};
pub use eigen::{decompose, stationary_weights, EigenPairs, SolverPath};
pub use embedder::{spectral_clustering, SpectralEmbedder};
pub use embedding::{ascending_order, SpectralEmbedding, DEFAULT_NEAR_ZERO_TOLERANCE};
pub use laplacian::{degree_matrix, transition_matrix, Laplacian};
pub use types::SpectralPartition;
