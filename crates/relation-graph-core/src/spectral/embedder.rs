//! Spectral embedding and clustering of adjacency matrices.

use tracing::{info, instrument};

use crate::adjacency::AdjacencyMatrix;
use crate::error::{ClusterError, ClusterResult};
use crate::kmeans::{CentroidClustering, KMeans};

use super::config::SpectralConfig;
use super::eigen::decompose;
use super::embedding::{SpectralEmbedding, DEFAULT_NEAR_ZERO_TOLERANCE};
use super::laplacian::Laplacian;
use super::types::SpectralPartition;

/// Embeds graphs into the eigenvectors of their random-walk Laplacian and
/// partitions the embedding with k-means.
///
/// # Example
///
/// ```
/// use relation_graph_core::adjacency::AdjacencyMatrix;
/// use relation_graph_core::spectral::{SpectralConfig, SpectralEmbedder};
///
/// let adjacency = AdjacencyMatrix::from_groups(6, &[vec![0, 1, 2], vec![3, 4, 5]]).unwrap();
/// let embedder = SpectralEmbedder::new(SpectralConfig::with_categories(2).unwrap()).unwrap();
///
/// let partition = embedder.embed_and_cluster(&adjacency).unwrap();
/// assert_eq!(partition.labels()[0], partition.labels()[2]);
/// assert_ne!(partition.labels()[0], partition.labels()[3]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SpectralEmbedder {
    config: SpectralConfig,
}

impl SpectralEmbedder {
    /// Create an embedder from a configuration.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::InvalidConfig` if the configuration is invalid.
    pub fn new(config: SpectralConfig) -> ClusterResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SpectralConfig {
        &self.config
    }

    /// Compute the N×k embedding of `adjacency`.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if `num_categories > N`
    /// - `DegenerateNormalization` for a zero-sum row
    /// - `InvalidInput` for non-stochastic rows under `PreNormalized`
    /// - `IllConditionedSpectrum` for complex eigenvalues beyond tolerance
    #[instrument(skip(self, adjacency), fields(n = adjacency.len(), k = self.config.num_categories))]
    pub fn embed(&self, adjacency: &AdjacencyMatrix) -> ClusterResult<SpectralEmbedding> {
        let k = self.config.num_categories;
        let n = adjacency.len();
        if k > n {
            return Err(ClusterError::invalid_config(format!(
                "num_categories ({}) must be <= number of nodes ({})",
                k, n
            )));
        }

        let laplacian = Laplacian::new(
            adjacency,
            self.config.normalization,
            self.config.stochastic_tolerance,
        )?;
        let pairs = decompose(
            &laplacian,
            self.config.reversibility_tolerance,
            self.config.imaginary_tolerance,
        )?;

        let mut embedding = SpectralEmbedding::from_eigenpairs(&pairs, k)?;
        if self.config.canonicalize {
            embedding = embedding.canonicalized()?;
        }

        info!(
            path = ?pairs.path,
            near_zero = embedding.near_zero_count(DEFAULT_NEAR_ZERO_TOLERANCE),
            canonicalized = embedding.is_canonicalized(),
            "spectral embedding computed"
        );
        Ok(embedding)
    }

    /// Embed `adjacency` and partition it with the configured k-means.
    ///
    /// # Errors
    ///
    /// Everything [`SpectralEmbedder::embed`] and [`KMeans`] can return.
    pub fn embed_and_cluster(&self, adjacency: &AdjacencyMatrix) -> ClusterResult<SpectralPartition> {
        let clusterer = KMeans::new(self.config.kmeans_config()?);
        self.embed_and_cluster_with(adjacency, &clusterer)
    }

    /// Embed `adjacency` and partition it with a caller-supplied clusterer.
    ///
    /// # Errors
    ///
    /// Everything [`SpectralEmbedder::embed`] and `clusterer` can return.
    pub fn embed_and_cluster_with<C>(
        &self,
        adjacency: &AdjacencyMatrix,
        clusterer: &C,
    ) -> ClusterResult<SpectralPartition>
    where
        C: CentroidClustering + ?Sized,
    {
        let embedding = self.embed(adjacency)?;
        let fit = clusterer.fit_detailed(embedding.matrix())?;
        info!(
            categories = fit.num_clusters(),
            iterations = fit.iterations,
            "spectral clustering complete"
        );
        Ok(SpectralPartition::new(embedding, fit))
    }
}

/// Partition `adjacency` into `num_categories` groups with default settings.
///
/// # Errors
///
/// See [`SpectralEmbedder::embed_and_cluster`].
pub fn spectral_clustering(
    adjacency: &AdjacencyMatrix,
    num_categories: usize,
) -> ClusterResult<SpectralPartition> {
    SpectralEmbedder::new(SpectralConfig::with_categories(num_categories)?)?
        .embed_and_cluster(adjacency)
}
