//! Serializable command reports and their text rendering.

use std::fmt::Write as _;

use clap::ValueEnum;
use relation_graph_core::spectral::{
    Normalization, SpectralPartition, DEFAULT_NEAR_ZERO_TOLERANCE,
};
use relation_graph_core::{kmeans::euclidean_distance, AdjacencyMatrix};
use serde::Serialize;

use crate::error::{CliError, CliResult};
use crate::relations::RelationList;

/// Embedding rows closer than this are reported as coincident.
pub const COINCIDENT_TOLERANCE: f64 = 1.0e-8;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Serialize)]
pub struct EntityAssignment {
    pub name: String,
    pub category: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<f64>>,
}

/// Result of the `partition` command.
#[derive(Debug, Serialize)]
pub struct PartitionReport {
    pub entities: Vec<EntityAssignment>,
    pub num_categories: usize,
    pub category_sizes: Vec<usize>,
    /// Member names per category.
    pub categories: Vec<Vec<String>>,
    pub eigenvalues: Vec<f64>,
    pub near_zero_eigenvalues: usize,
    pub normalization: Normalization,
    pub canonicalized: bool,
    pub kmeans_iterations: usize,
    /// Groups of two or more entities embedded at the same point.
    pub coincident: Vec<Vec<String>>,
}

impl PartitionReport {
    pub fn build(
        list: &RelationList,
        partition: &SpectralPartition,
        normalization: Normalization,
        with_embedding: bool,
    ) -> Self {
        let embedding = partition.embedding();
        let name = |i: usize| list.entities()[i].clone();

        let entities = partition
            .labels()
            .iter()
            .enumerate()
            .map(|(i, &category)| EntityAssignment {
                name: name(i),
                category,
                coordinates: with_embedding.then(|| embedding.row(i)),
            })
            .collect();

        let categories = (0..partition.num_categories())
            .map(|c| partition.members(c).into_iter().map(name).collect())
            .collect();

        let rows: Vec<Vec<f64>> = (0..embedding.len()).map(|i| embedding.row(i)).collect();
        let coincident = coincident_groups(&rows, COINCIDENT_TOLERANCE)
            .into_iter()
            .map(|group| group.into_iter().map(name).collect())
            .collect();

        Self {
            entities,
            num_categories: partition.num_categories(),
            category_sizes: partition.category_sizes(),
            categories,
            eigenvalues: embedding.eigenvalues().to_vec(),
            near_zero_eigenvalues: embedding.near_zero_count(DEFAULT_NEAR_ZERO_TOLERANCE),
            normalization,
            canonicalized: embedding.is_canonicalized(),
            kmeans_iterations: partition.iterations(),
            coincident,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for entity in &self.entities {
            let _ = write!(out, "{}\t{}", entity.name, entity.category);
            if let Some(coords) = &entity.coordinates {
                let formatted: Vec<String> = coords.iter().map(|x| format!("{:.6}", x)).collect();
                let _ = write!(out, "\t({})", formatted.join(", "));
            }
            out.push('\n');
        }
        out.push('\n');
        for (c, members) in self.categories.iter().enumerate() {
            let _ = writeln!(out, "category {} ({}): {}", c, members.len(), members.join(", "));
        }
        let eigenvalues: Vec<String> = self.eigenvalues.iter().map(|x| format!("{:.6}", x)).collect();
        let _ = writeln!(out, "eigenvalues: {}", eigenvalues.join(", "));
        let _ = writeln!(out, "near-zero eigenvalues: {}", self.near_zero_eigenvalues);
        let _ = writeln!(
            out,
            "normalization: {}, canonicalized: {}, k-means iterations: {}",
            self.normalization, self.canonicalized, self.kmeans_iterations
        );
        for group in &self.coincident {
            let _ = writeln!(out, "coincident: {}", group.join(" = "));
        }
        out
    }
}

#[derive(Debug, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

/// Result of the `edges` command.
#[derive(Debug, Serialize)]
pub struct EdgeReport {
    pub entities: usize,
    pub edges: Vec<Edge>,
}

impl EdgeReport {
    /// Every positive off-diagonal weight, ordered by source then target.
    pub fn build(list: &RelationList, adjacency: &AdjacencyMatrix) -> Self {
        let n = adjacency.len();
        let mut edges = Vec::new();
        for i in 0..n {
            for j in 0..n {
                let weight = adjacency.weight(i, j);
                if i != j && weight > 0.0 {
                    edges.push(Edge {
                        source: list.entities()[i].clone(),
                        target: list.entities()[j].clone(),
                        weight,
                    });
                }
            }
        }
        Self { entities: n, edges }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for edge in &self.edges {
            let _ = writeln!(out, "{}\t{}\t{:.6}", edge.source, edge.target, edge.weight);
        }
        out
    }
}

/// Group row indices whose rows lie within `tolerance` of the group's first
/// row. Only groups with at least two members are returned.
pub fn coincident_groups(rows: &[Vec<f64>], tolerance: f64) -> Vec<Vec<usize>> {
    let mut assigned = vec![false; rows.len()];
    let mut groups = Vec::new();
    for i in 0..rows.len() {
        if assigned[i] {
            continue;
        }
        let group: Vec<usize> = (i..rows.len())
            .filter(|&j| !assigned[j] && euclidean_distance(&rows[i], &rows[j]) <= tolerance)
            .collect();
        for &j in &group {
            assigned[j] = true;
        }
        if group.len() > 1 {
            groups.push(group);
        }
    }
    groups
}

/// Render any serializable report in the requested format.
pub fn render<T, F>(report: &T, format: OutputFormat, text: F) -> CliResult<String>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Text => Ok(text(report)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).map_err(|e| CliError::Serialization(e.to_string()))
        }
    }
}
