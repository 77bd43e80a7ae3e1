//! Explicit runtime configuration.
//!
//! # Responsibility
//! - Describe where the issue database lives and how long lock waits may take.
//! - Describe logging level and directory.
//! - Load both from a TOML document.
//!
//! # Invariants
//! - Configuration is a plain value passed at construction; nothing here is global.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default upper bound for SQLite lock waits.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Backing database location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatabaseLocation {
    File { path: PathBuf },
    Memory,
}

/// Store construction parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub database: DatabaseLocation,
    /// Maximum time a statement waits on a locked database before failing.
    pub busy_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: DatabaseLocation::Memory,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl StoreConfig {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            database: DatabaseLocation::File { path: path.into() },
            ..Self::default()
        }
    }

    pub fn in_memory() -> Self {
        Self::default()
    }
}

/// Logger parameters; see [`crate::logging::init_logging`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
}

fn default_level() -> String {
    crate::logging::default_log_level().to_string()
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetraConfig {
    pub store: StoreConfig,
    pub logging: Option<LoggingConfig>,
}

impl NetraConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(ConfigError::Parse)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}
