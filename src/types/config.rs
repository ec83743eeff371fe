//! Configuration for LeetHelper.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::LeetHelperResult;

/// Main configuration for LeetHelper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Backing store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Model CLI settings.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Question resolution settings.
    #[serde(default)]
    pub question: QuestionConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Available backing stores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process-local map, lost on exit.
    Memory,
    /// Single JSON object file.
    File,
    /// SQLite database (requires the `sqlite` feature).
    Sqlite,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Backing store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Which backend to use.
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,

    /// Path of the store file (ignored by the memory backend).
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_store_path(),
        }
    }
}

#[cfg(feature = "sqlite")]
fn default_backend() -> StorageBackend {
    StorageBackend::Sqlite
}

#[cfg(not(feature = "sqlite"))]
fn default_backend() -> StorageBackend {
    StorageBackend::File
}

#[cfg(feature = "sqlite")]
fn default_store_path() -> PathBuf {
    PathBuf::from(".leethelper/leethelper.db")
}

#[cfg(not(feature = "sqlite"))]
fn default_store_path() -> PathBuf {
    PathBuf::from(".leethelper/store.json")
}

/// Model CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Command to execute.
    #[serde(default = "default_generator_command")]
    pub command: String,

    /// Arguments placed before the prompt.
    #[serde(default)]
    pub args: Vec<String>,

    /// Timeout in seconds.
    #[serde(default = "default_generator_timeout")]
    pub timeout_secs: u64,

    /// Default programming language for solutions and dry runs.
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            command: default_generator_command(),
            args: Vec::new(),
            timeout_secs: default_generator_timeout(),
            language: default_language(),
        }
    }
}

fn default_generator_command() -> String {
    "gemini".to_string()
}

fn default_generator_timeout() -> u64 {
    120
}

fn default_language() -> String {
    "C++".to_string()
}

/// Question resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuestionConfig {
    /// Problem URL used when neither `--question` nor `--url` is given.
    #[serde(default)]
    pub url: Option<String>,
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> LeetHelperResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> LeetHelperResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            storage: StorageConfig::default(),
            generator: GeneratorConfig::default(),
            question: QuestionConfig::default(),
        }
    }

    /// Per-user configuration file (`~/.config/leethelper/leethelper.toml` on Linux).
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("leethelper").join("leethelper.toml"))
    }

    /// Loads `path` if it exists, then the per-user file, then defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if path.exists() {
            match Self::load(path) {
                Ok(config) => return config,
                Err(e) => eprintln!("Ignoring invalid configuration {}: {}", path.display(), e),
            }
        }

        Self::user_config_path()
            .filter(|p| p.exists())
            .and_then(|p| Self::load(p).ok())
            .unwrap_or_else(Self::default_config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
