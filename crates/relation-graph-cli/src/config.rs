//! Partition configuration file.
//!
//! # TOML Structure
//!
//! ```toml
//! [spectral]
//! num_categories = 3
//! normalization = "random-walk"
//! canonicalize = true
//! imaginary_tolerance = 1e-9
//! stochastic_tolerance = 1e-9
//! reversibility_tolerance = 1e-9
//!
//! [kmeans]
//! seed = 123456789
//! tolerance = 1e-14
//! max_iterations = 300
//! empty_cluster_policy = "reseed"
//! distinct_tolerance = 1e-9
//! ```
//!
//! Every key is optional. Precedence, lowest first: defaults, file,
//! `RELATION_GRAPH_*` environment variables, command-line flags.

use std::env;
use std::path::Path;

use relation_graph_core::spectral::{
    KMeansSettings, Normalization, SpectralConfig, DEFAULT_IMAGINARY_TOLERANCE,
    DEFAULT_NUM_CATEGORIES, DEFAULT_REVERSIBILITY_TOLERANCE, DEFAULT_STOCHASTIC_TOLERANCE,
};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "RELATION_GRAPH_";

/// `[spectral]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralSection {
    #[serde(default = "default_num_categories")]
    pub num_categories: usize,
    #[serde(default)]
    pub normalization: Normalization,
    #[serde(default = "default_true")]
    pub canonicalize: bool,
    #[serde(default = "default_imaginary_tolerance")]
    pub imaginary_tolerance: f64,
    #[serde(default = "default_stochastic_tolerance")]
    pub stochastic_tolerance: f64,
    #[serde(default = "default_reversibility_tolerance")]
    pub reversibility_tolerance: f64,
}

fn default_num_categories() -> usize {
    DEFAULT_NUM_CATEGORIES
}

fn default_true() -> bool {
    true
}

fn default_imaginary_tolerance() -> f64 {
    DEFAULT_IMAGINARY_TOLERANCE
}

fn default_stochastic_tolerance() -> f64 {
    DEFAULT_STOCHASTIC_TOLERANCE
}

fn default_reversibility_tolerance() -> f64 {
    DEFAULT_REVERSIBILITY_TOLERANCE
}

impl Default for SpectralSection {
    fn default() -> Self {
        Self {
            num_categories: DEFAULT_NUM_CATEGORIES,
            normalization: Normalization::default(),
            canonicalize: true,
            imaginary_tolerance: DEFAULT_IMAGINARY_TOLERANCE,
            stochastic_tolerance: DEFAULT_STOCHASTIC_TOLERANCE,
            reversibility_tolerance: DEFAULT_REVERSIBILITY_TOLERANCE,
        }
    }
}

/// Root configuration for the `partition` command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionConfig {
    #[serde(default)]
    pub spectral: SpectralSection,

    #[serde(default)]
    pub kmeans: KMeansSettings,
}

impl PartitionConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// - `CliError::Io` if the file cannot be read
    /// - `CliError::Config` if the TOML does not parse
    pub fn from_file(path: impl AsRef<Path>) -> CliResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|e| {
            CliError::config(format!("Failed to parse TOML in '{}': {}", path.display(), e))
        })
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if parsing fails.
    pub fn from_toml_str(toml: &str) -> CliResult<Self> {
        toml::from_str(toml).map_err(|e| CliError::config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if serialization fails.
    pub fn to_toml_string(&self) -> CliResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::config(format!("Failed to serialize to TOML: {}", e)))
    }

    /// Apply `RELATION_GRAPH_*` environment variables.
    ///
    /// | Variable | Config Path |
    /// |----------|-------------|
    /// | `RELATION_GRAPH_CATEGORIES` | `spectral.num_categories` |
    /// | `RELATION_GRAPH_NORMALIZATION` | `spectral.normalization` |
    /// | `RELATION_GRAPH_CANONICALIZE` | `spectral.canonicalize` |
    /// | `RELATION_GRAPH_SEED` | `kmeans.seed` |
    /// | `RELATION_GRAPH_TOLERANCE` | `kmeans.tolerance` |
    /// | `RELATION_GRAPH_MAX_ITERATIONS` | `kmeans.max_iterations` |
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if a variable is set but does not parse.
    pub fn with_env_overrides(self) -> CliResult<Self> {
        self.with_overrides_from(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary `RELATION_GRAPH_*` lookup.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if a value is present but does not parse.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> CliResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(val) = get("CATEGORIES") {
            self.spectral.num_categories = parse_var("CATEGORIES", &val)?;
        }
        if let Some(val) = get("NORMALIZATION") {
            self.spectral.normalization = val
                .parse()
                .map_err(|e| CliError::config(format!("{}NORMALIZATION: {}", ENV_PREFIX, e)))?;
        }
        if let Some(val) = get("CANONICALIZE") {
            self.spectral.canonicalize = parse_var("CANONICALIZE", &val)?;
        }
        if let Some(val) = get("SEED") {
            self.kmeans.seed = parse_var("SEED", &val)?;
        }
        if let Some(val) = get("TOLERANCE") {
            self.kmeans.tolerance = parse_var("TOLERANCE", &val)?;
        }
        if let Some(val) = get("MAX_ITERATIONS") {
            self.kmeans.max_iterations = parse_var("MAX_ITERATIONS", &val)?;
        }
        Ok(self)
    }

    /// Build the core configuration.
    pub fn to_spectral_config(&self) -> SpectralConfig {
        SpectralConfig {
            num_categories: self.spectral.num_categories,
            normalization: self.spectral.normalization,
            canonicalize: self.spectral.canonicalize,
            imaginary_tolerance: self.spectral.imaginary_tolerance,
            stochastic_tolerance: self.spectral.stochastic_tolerance,
            reversibility_tolerance: self.spectral.reversibility_tolerance,
            kmeans: self.kmeans.clone(),
        }
    }

    /// Validate all values.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` describing the first invalid value.
    pub fn validate(&self) -> CliResult<()> {
        self.to_spectral_config()
            .validate()
            .map_err(|e| CliError::config(e.to_string()))
    }
}

fn parse_var<T>(name: &str, value: &str) -> CliResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        CliError::config(format!("{}{}='{}': {}", ENV_PREFIX, name, value, e))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use relation_graph_core::EmptyClusterPolicy;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_matches_core_defaults() {
        let config = PartitionConfig::default();

        assert_eq!(config.to_spectral_config(), SpectralConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_str_sections() {
        let config = PartitionConfig::from_toml_str(
            r#"
            [spectral]
            num_categories = 4
            normalization = "pre-normalized"
            canonicalize = false

            [kmeans]
            seed = 42
            empty_cluster_policy = "fail"
            "#,
        )
        .unwrap();

        assert_eq!(config.spectral.num_categories, 4);
        assert_eq!(config.spectral.normalization, Normalization::PreNormalized);
        assert!(!config.spectral.canonicalize);
        assert_eq!(config.kmeans.seed, 42);
        assert_eq!(config.kmeans.max_iterations, 300);
        assert_eq!(config.kmeans.empty_cluster_policy, EmptyClusterPolicy::Fail);

        println!("[VERIFIED] TOML sections map onto the spectral configuration");
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = PartitionConfig::default();
        config.spectral.num_categories = 5;
        config.kmeans.seed = 9;

        let text = config.to_toml_string().unwrap();
        let back = PartitionConfig::from_toml_str(&text).unwrap();

        assert_eq!(config, back);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = PartitionConfig::from_toml_str("[spectral]\nnum_categories = \"three\"").unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_overrides_apply() {
        let config = PartitionConfig::default()
            .with_overrides_from(lookup(&[
                ("RELATION_GRAPH_CATEGORIES", "2"),
                ("RELATION_GRAPH_SEED", "77"),
                ("RELATION_GRAPH_NORMALIZATION", "pre-normalized"),
                ("RELATION_GRAPH_CANONICALIZE", "false"),
                ("RELATION_GRAPH_TOLERANCE", "1e-10"),
                ("RELATION_GRAPH_MAX_ITERATIONS", "50"),
            ]))
            .unwrap();

        assert_eq!(config.spectral.num_categories, 2);
        assert_eq!(config.kmeans.seed, 77);
        assert_eq!(config.spectral.normalization, Normalization::PreNormalized);
        assert!(!config.spectral.canonicalize);
        assert!((config.kmeans.tolerance - 1e-10).abs() < 1e-24);
        assert_eq!(config.kmeans.max_iterations, 50);

        println!("[VERIFIED] RELATION_GRAPH_* overrides applied");
    }

    #[test]
    fn test_bad_override_fails_fast() {
        let err = PartitionConfig::default()
            .with_overrides_from(lookup(&[("RELATION_GRAPH_SEED", "not-a-number")]))
            .unwrap_err();

        assert!(err.to_string().contains("RELATION_GRAPH_SEED"));
        println!("[VERIFIED] FAIL FAST: unparsable override rejected: {}", err);
    }

    #[test]
    fn test_validate_rejects_zero_categories() {
        let mut config = PartitionConfig::default();
        config.spectral.num_categories = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("num_categories"));
    }

    #[test]
    fn test_from_file_missing_is_io_error() {
        let err = PartitionConfig::from_file("/nonexistent/relation-graph.toml").unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
