//! Relation lists: one group of related entities per line.
//!
//! ```text
//! Austria, Hungary, Slovakia
//! Canada, United States
//! ```
//!
//! Names are separated by commas and trimmed. Blank lines are skipped.
//! Every line becomes a clique: each pair of distinct names on it gets an
//! edge of weight 1.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use relation_graph_core::{AdjacencyMatrix, ClusterError};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Parsed relation list with a stable entity index.
#[derive(Debug, Clone)]
pub struct RelationList {
    groups: Vec<Vec<String>>,
    entities: Vec<String>,
    index: HashMap<String, usize>,
}

impl RelationList {
    /// Parse relation list text.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Parse` for an empty name on a line, or when the
    /// text holds no relations at all.
    pub fn parse(text: &str) -> CliResult<Self> {
        let mut groups = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut group: Vec<String> = Vec::new();
            for name in line.split(',').map(str::trim) {
                if name.is_empty() {
                    return Err(CliError::parse(lineno + 1, "empty entity name"));
                }
                if !group.iter().any(|g| g == name) {
                    group.push(name.to_string());
                }
            }
            groups.push(group);
        }
        if groups.is_empty() {
            return Err(CliError::parse(0, "relation list is empty"));
        }

        let entities: Vec<String> = groups
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index = entities
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        debug!(groups = groups.len(), entities = entities.len(), "parsed relation list");
        Ok(Self {
            groups,
            entities,
            index,
        })
    }

    /// Read and parse a relation list file.
    ///
    /// # Errors
    ///
    /// `CliError::Io` if the file cannot be read, otherwise see [`RelationList::parse`].
    pub fn from_file(path: impl AsRef<Path>) -> CliResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Entity names, sorted and unique. Position is the matrix row.
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    /// Relation groups in file order.
    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.entities.get(index).map(String::as_str)
    }

    /// Unweighted clique adjacency over [`RelationList::entities`].
    ///
    /// # Errors
    ///
    /// Propagates `ClusterError` from matrix construction.
    pub fn adjacency(&self) -> CliResult<AdjacencyMatrix> {
        let groups: Vec<Vec<usize>> = self
            .groups
            .iter()
            .map(|group| group.iter().map(|name| self.index[name]).collect())
            .collect();
        Ok(AdjacencyMatrix::from_groups(self.len(), &groups)?)
    }

    /// Row-normalized adjacency.
    ///
    /// # Errors
    ///
    /// Returns `CliError::IsolatedEntity` naming an entity that never
    /// appears alongside another one.
    pub fn normalized_adjacency(&self) -> CliResult<AdjacencyMatrix> {
        self.adjacency()?
            .row_normalized()
            .map_err(|e| self.describe(e))
    }

    /// Convert a core error, naming the entity behind a zero-sum row.
    pub fn describe(&self, err: ClusterError) -> CliError {
        match err {
            ClusterError::DegenerateNormalization { row } if row < self.entities.len() => {
                CliError::IsolatedEntity {
                    name: self.entities[row].clone(),
                }
            }
            other => other.into(),
        }
    }
}
