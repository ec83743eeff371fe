//! Error types for LeetHelper.

use thiserror::Error;

/// Default result type for LeetHelper.
pub type LeetHelperResult<T> = Result<T, LeetHelperError>;

/// Errors that can happen in LeetHelper.
#[derive(Error, Debug)]
pub enum LeetHelperError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[cfg(feature = "cli")]
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Unknown field kind '{0}' (expected explanation, solution, hints, dryRun or mistakes)")]
    InvalidField(String),

    #[error("Generator '{0}' not found or not available")]
    GeneratorNotFound(String),

    #[error("Generator '{0}' failed: {1}")]
    GeneratorFailed(String, String),

    #[error("Timeout while running '{0}'")]
    GeneratorTimeout(String),

    #[error("{0}")]
    Other(String),
}

impl LeetHelperError {
    /// Creates a generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }
}
