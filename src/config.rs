//! Configuration management for the simulator.

use crate::types::prediction::ScoreBandThresholds;
use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default location of the optional configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Main application configuration.
///
/// Every field has a compiled-in default so the simulator runs from a bare
/// checkout; the TOML file only overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub artifact: ArtifactConfig,
    pub bands: ScoreBandThresholds,
    pub logging: LoggingConfig,
}

/// Model artifact configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Path of the serialized model bundle.
    pub path: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
}

impl AppConfig {
    /// Load configuration from the default location; a missing file falls
    /// back to defaults, a malformed one is a hard error.
    pub fn load() -> Result<Self> {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let config = Config::builder()
            .add_source(File::from(path))
            .build()
            .with_context(|| format!("failed to read configuration '{}'", path.display()))?;

        config
            .try_deserialize()
            .with_context(|| format!("failed to deserialize configuration '{}'", path.display()))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            artifact: ArtifactConfig::default(),
            bands: ScoreBandThresholds::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("models/enem_bundle.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(
            config.artifact.path,
            PathBuf::from("models/enem_bundle.json")
        );
        assert_eq!(config.bands.excellent, 700.0);
        assert_eq!(config.bands.good, 500.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from_path("no/such/config.toml").unwrap();
        assert_eq!(config.bands.good, 500.0);
    }

    #[test]
    fn test_partial_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "[bands]\nexcellent = 720.0").unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.bands.excellent, 720.0);
        // Untouched sections keep their defaults.
        assert_eq!(config.bands.good, 500.0);
        assert_eq!(config.logging.level, "info");
    }
}
