//! Configuration module for the document clustering system.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//! - CLI argument overrides (applied by the binary)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `DC_` and use double underscores
//! to separate nested levels:
//! - `DC_CLUSTERING__THRESHOLD=0.3` sets `clustering.threshold`
//! - `DC_CLUSTERING__METRIC=jaccard` sets `clustering.metric`
//! - `DC_CLUSTERING__NUM_FEATURES=4096` sets `clustering.num_features`

use crate::vector::{
    ClusteringError, DEFAULT_CLUSTERING_ITERATIONS, DEFAULT_CLUSTERING_THRESHOLD,
    DEFAULT_NUM_FEATURES, DistanceMetric, KMeansClusterer,
};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory searched for upward from the current directory.
const CONFIG_DIR: &str = ".doccluster";
const CONFIG_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "DC_";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Clustering configuration
    #[serde(default)]
    pub clustering: ClusteringConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ClusteringConfig {
    /// Width of the hashed feature space
    #[serde(default = "default_num_features")]
    pub num_features: usize,

    /// Intra/inter distance ratio below which a cluster count is accepted
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Reassignment rounds per k-means trial
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Distance metric: "cosine" or "jaccard"
    #[serde(default)]
    pub metric: DistanceMetric,

    /// Seed for the random seed-document draw (absent = fresh entropy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_num_features() -> usize {
    DEFAULT_NUM_FEATURES
}
fn default_threshold() -> f64 {
    DEFAULT_CLUSTERING_THRESHOLD
}
fn default_iterations() -> usize {
    DEFAULT_CLUSTERING_ITERATIONS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            clustering: ClusteringConfig::default(),
        }
    }
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            num_features: default_num_features(),
            threshold: default_threshold(),
            iterations: default_iterations(),
            metric: DistanceMetric::default(),
            seed: None,
        }
    }
}

impl ClusteringConfig {
    /// Check that the values describe a runnable clusterer.
    pub fn validate(&self) -> Result<(), ClusteringError> {
        if self.num_features == 0 {
            return Err(ClusteringError::InvalidConfig {
                reason: "num_features must be at least 1".to_string(),
            });
        }
        KMeansClusterer::from_config(self).map(|_| ())
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));
        Self::load_from(config_path)
    }

    /// Load configuration from a specific file, still honouring `DC_` variables
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(path.as_ref()))
            // Double underscore separates nested levels
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Find the settings file by looking for a .doccluster directory
    /// from the current directory up to the root
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_DIR))
            .find(|dir| dir.is_dir())
            .map(|dir| dir.join(CONFIG_FILE))
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file with helpful comments
    pub fn init_config_file(
        dir: impl AsRef<Path>,
        force: bool,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = dir.as_ref().join(CONFIG_DIR).join(CONFIG_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = format!(
            r#"# doccluster configuration file

# Version of the configuration schema
version = 1

[clustering]
# Width of the hashed bag-of-words feature space
num_features = {DEFAULT_NUM_FEATURES}

# Accept the smallest k whose intra/inter cluster distance ratio is below this
threshold = {DEFAULT_CLUSTERING_THRESHOLD}

# Reassignment rounds per k-means trial
iterations = {DEFAULT_CLUSTERING_ITERATIONS}

# Distance metric: "cosine" or "jaccard"
metric = "cosine"

# Fix the random seed for reproducible output
# seed = 42
"#
        );

        std::fs::write(&config_path, template)?;
        Ok(config_path)
    }
}
