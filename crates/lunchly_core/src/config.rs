//! File-based configuration for processes embedding the core.
//!
//! # Invariants
//! - `database_path` is required; everything else has a default.
//! - `top_ranked_limit` is at least 1.

use crate::db::{DbOptions, DEFAULT_BUSY_TIMEOUT_MS};
use crate::logging::default_log_level;
use crate::repo::customer_repo::DEFAULT_TOP_RANKED_LIMIT;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LunchlyConfig {
    /// SQLite file holding the `customers` and `reservations` tables.
    pub database_path: PathBuf,
    #[serde(default = "default_level")]
    pub log_level: String,
    /// Logging stays off when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default = "default_top_ranked_limit")]
    pub top_ranked_limit: u32,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

impl LunchlyConfig {
    /// Config pointing at `database_path` with every other value defaulted.
    pub fn for_database(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            log_level: default_level(),
            log_dir: None,
            top_ranked_limit: default_top_ranked_limit(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn db_options(&self) -> DbOptions {
        DbOptions {
            busy_timeout: Duration::from_millis(self.busy_timeout_ms),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database_path cannot be empty".to_string()));
        }
        if self.top_ranked_limit == 0 {
            return Err(ConfigError::Invalid(
                "top_ranked_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_level() -> String {
    default_log_level().to_string()
}

fn default_top_ranked_limit() -> u32 {
    DEFAULT_TOP_RANKED_LIMIT
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}
