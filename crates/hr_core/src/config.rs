//! Runtime configuration for storage and logging.
//!
//! # Responsibility
//! - Collect database and logging settings in one value.
//! - Parse `HR_*` environment variables into typed settings.
//!
//! # Invariants
//! - Missing variables fall back to defaults; malformed ones are errors.
//! - Parsing never reads the process environment except via `from_env`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "HR_DB_PATH";
pub const ENV_FOREIGN_KEYS: &str = "HR_FOREIGN_KEYS";
pub const ENV_BUSY_TIMEOUT_MS: &str = "HR_BUSY_TIMEOUT_MS";
pub const ENV_LOG_LEVEL: &str = "HR_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "HR_LOG_DIR";

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBool { key: &'static str, value: String },
    InvalidNumber { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBool { key, value } => {
                write!(f, "{key} expects true|false|1|0, got `{value}`")
            }
            Self::InvalidNumber { key, value } => {
                write!(f, "{key} expects a non-negative integer, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file; `None` selects a private in-memory database.
    pub db_path: Option<PathBuf>,
    pub foreign_keys: bool,
    pub busy_timeout: Duration,
    pub log_level: String,
    /// Log directory; `None` leaves logging uninitialized.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            foreign_keys: false,
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(path) = get(ENV_DB_PATH) {
            config.db_path = Some(PathBuf::from(path));
        }
        if let Some(value) = get(ENV_FOREIGN_KEYS) {
            config.foreign_keys = parse_bool(ENV_FOREIGN_KEYS, &value)?;
        }
        if let Some(value) = get(ENV_BUSY_TIMEOUT_MS) {
            let millis = value
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: ENV_BUSY_TIMEOUT_MS,
                    value: value.clone(),
                })?;
            config.busy_timeout = Duration::from_millis(millis);
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(dir) = get(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}
