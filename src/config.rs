//! Configuration for an atlas run
//!
//! Defaults mirror the upstream profiler layout; a TOML file, environment
//! variables under the `MODEL_ATLAS_` prefix, or CLI flags may override them.

use crate::error::{AtlasError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input scanning configuration
    pub input: InputConfig,
    /// Output document configuration
    pub output: OutputConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Input scanning settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Root directory scanned for signature files
    pub dir: PathBuf,
    /// File-name suffix identifying signature files
    pub signature_suffix: String,
    /// File-name suffix identifying dry-run outputs, which are skipped
    pub dryrun_suffix: String,
}

/// Output document settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the consolidated database document
    pub path: PathBuf,
    /// Dataset name recorded in the output metadata
    pub dataset: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("dna-out"),
            signature_suffix: "_dna.json".to_string(),
            dryrun_suffix: "_DRYRUN.json".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("public/dna_database.json"),
            dataset: "default".to_string(),
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

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            AtlasError::config(format!(
                "failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| AtlasError::config(format!("failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Build configuration from defaults plus environment overrides
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("MODEL_ATLAS_INPUT_DIR") {
            config.input.dir = PathBuf::from(dir);
        }
        if let Ok(path) = std::env::var("MODEL_ATLAS_OUTPUT_PATH") {
            config.output.path = PathBuf::from(path);
        }
        if let Ok(dataset) = std::env::var("MODEL_ATLAS_DATASET") {
            config.output.dataset = dataset;
        }
        if let Ok(level) = std::env::var("MODEL_ATLAS_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.input.signature_suffix.is_empty() {
            return Err(AtlasError::config("signature suffix cannot be empty"));
        }
        if self.input.dryrun_suffix.is_empty() {
            return Err(AtlasError::config("dry-run suffix cannot be empty"));
        }
        if self.output.dataset.is_empty() {
            return Err(AtlasError::config("dataset name cannot be empty"));
        }
        if self.output.path.as_os_str().is_empty() {
            return Err(AtlasError::config("output path cannot be empty"));
        }
        if !["trace", "debug", "info", "warn", "error"].contains(&self.logging.level.as_str()) {
            return Err(AtlasError::config(
                "log level must be one of: trace, debug, info, warn, error",
            ));
        }
        Ok(())
    }
}
