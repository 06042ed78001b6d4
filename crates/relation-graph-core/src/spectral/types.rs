//! Result of spectral clustering.

use crate::kmeans::KMeansFit;

use super::embedding::SpectralEmbedding;

/// Embedding plus the k-means partition computed on it.
#[derive(Clone, Debug)]
pub struct SpectralPartition {
    embedding: SpectralEmbedding,
    fit: KMeansFit,
}

impl SpectralPartition {
    pub fn new(embedding: SpectralEmbedding, fit: KMeansFit) -> Self {
        Self { embedding, fit }
    }

    /// One category per node, in node order.
    #[inline]
    pub fn labels(&self) -> &[usize] {
        &self.fit.labels
    }

    #[inline]
    pub fn embedding(&self) -> &SpectralEmbedding {
        &self.embedding
    }

    /// Full k-means result, including centroids and error history.
    #[inline]
    pub fn fit(&self) -> &KMeansFit {
        &self.fit
    }

    /// Lloyd iterations used by the final k-means step.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.fit.iterations
    }

    #[inline]
    pub fn num_categories(&self) -> usize {
        self.fit.num_clusters()
    }

    pub fn category_sizes(&self) -> Vec<usize> {
        self.fit.cluster_sizes()
    }

    /// Nodes in `category`, ascending.
    pub fn members(&self, category: usize) -> Vec<usize> {
        self.fit.members(category)
    }

    pub fn into_parts(self) -> (SpectralEmbedding, KMeansFit) {
        (self.embedding, self.fit)
    }
}
