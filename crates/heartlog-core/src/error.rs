//! Error types for heartlog-core.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using heartlog-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for heartlog operations
#[derive(Error, Debug)]
pub enum Error {
    // Storage errors
    #[error("Storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // User input errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Language-model errors
    #[error("Analyzer error: {0}")]
    Analyzer(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a storage error for a path
    pub fn storage(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Check if this error is caused by user input
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Analyzer(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
