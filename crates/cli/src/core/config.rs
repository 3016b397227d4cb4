//! Configuration management for the wrangler CLI.
//!
//! Configuration is stored in JSON format at the platform config dir
//! (e.g. `$XDG_CONFIG_HOME/wrangler/config.json`) and holds the default
//! modeling parameters; command-line flags override it per run.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::dirs;

/// Main configuration structure for the wrangler CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    /// Default topic-modeling parameters.
    pub(crate) modeling: ModelingConfig,
}

/// Default parameters for preprocessing and the topic-count sweep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct ModelingConfig {
    /// Passes over the corpus per trained model.
    pub(crate) passes: usize,
    /// Sampling iterations per pass.
    pub(crate) iterations: usize,
    /// Smallest topic count in a sweep.
    pub(crate) min_topics: usize,
    /// Largest topic count in a sweep.
    pub(crate) max_topics: usize,
    /// Drop tokens appearing in fewer documents than this.
    pub(crate) no_below: u32,
    /// Drop tokens appearing in more than this fraction of documents.
    pub(crate) no_above: f64,
    /// Keep at most this many vocabulary tokens.
    pub(crate) keep_n: usize,
}

impl Default for ModelingConfig {
    fn default() -> Self {
        Self {
            passes: 10,
            iterations: 50,
            min_topics: 1,
            max_topics: 19,
            no_below: 5,
            no_above: 0.5,
            keep_n: 1000,
        }
    }
}

impl Config {
    /// Load configuration from the platform config directory.
    ///
    /// If the configuration file doesn't exist, a default configuration is
    /// created and written to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Unable to determine the config directory
    /// - Unable to create the config directory
    /// - Unable to read or parse the config file
    /// - Unable to write the default config
    pub(crate) fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load configuration from a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if unable to read or parse the config file.
    pub(crate) fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if unable to create the config directory or write the
    /// config file.
    pub(crate) fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;
        Ok(())
    }

    /// The path of the configuration file.
    pub(crate) fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()?.join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let reparsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, reparsed);
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let json = r#"{"modeling": {"max_topics": 12}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.modeling.max_topics, 12);
        assert_eq!(config.modeling.passes, ModelingConfig::default().passes);
    }

    #[test]
    fn test_load_from_path_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(Config::load_from_path(&path).is_err());
    }
}
