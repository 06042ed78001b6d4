//! Tests for k-means clustering.
//!
//! # Test Organization
//!
//! - `helpers` - Deterministic data generators
//! - `config_tests` - KMeansConfig validation tests
//! - `clustering_tests` - Main KMeans clustering tests
//! - `edge_cases` - Edge case and boundary condition tests

mod helpers;
