//! Error types for scan-level failures.
//!
//! Per-file problems never show up here: the classifier folds them into
//! `Classification::Error` or `Classification::Skip`. Only failures that
//! stop a whole run (or a whole collaborator call) are modelled as errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scan-level operations.
pub type Result<T> = std::result::Result<T, CheckerError>;

/// Scan-level errors.
#[derive(Error, Debug)]
pub enum CheckerError {
    /// Target directory is missing, not a directory, or cannot be listed
    #[error("Directory not found or inaccessible: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// IO error (folder creation, report writing)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration values are out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl CheckerError {
    /// Create a directory-not-found error.
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DirectoryNotFound(path.into())
    }

    /// Create an invalid config error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
