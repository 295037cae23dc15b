//! Error handling for the atlas pipeline
//!
//! A single error enum covers the whole run. Per-file signature errors are
//! recoverable (the scanner logs and skips); everything else aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the atlas pipeline
#[derive(Error, Debug)]
pub enum AtlasError {
    /// Configuration errors, including a missing input directory
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Per-file signature document errors (recoverable: skip the file)
    #[error("Invalid signature file {path}: {message}")]
    Signature { path: PathBuf, message: String },

    /// Fewer than two retained models; the reduction is undefined
    #[error("Not enough models: found {found}, need at least 2")]
    InsufficientData { found: usize },

    /// Signature vectors of differing lengths across retained models
    #[error("Signature dimension mismatch for '{name}': expected {expected}, found {found}")]
    DimensionMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Record/coordinate count skew after the embedding stage
    #[error("Coordinate count mismatch: {records} records but {coordinates} coordinates")]
    CoordinateMismatch { records: usize, coordinates: usize },

    /// Embedding stage failures
    #[error("Embedding error: {message}")]
    Embedding { message: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AtlasError>;

impl AtlasError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a per-file signature error
    pub fn signature<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::Signature {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding<S: Into<String>>(message: S) -> Self {
        Self::Embedding {
            message: message.into(),
        }
    }

    /// Whether this error may be skipped during scanning
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Signature { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AtlasError::config("bad input dir");
        assert!(error.to_string().contains("bad input dir"));

        let error = AtlasError::InsufficientData { found: 1 };
        assert!(error.to_string().contains("found 1"));
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(AtlasError::signature("a/b_dna.json", "empty array").is_recoverable());
        assert!(!AtlasError::config("missing directory").is_recoverable());
        assert!(!AtlasError::CoordinateMismatch {
            records: 3,
            coordinates: 2
        }
        .is_recoverable());
    }
}
