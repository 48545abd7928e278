//! Runtime configuration for database and logging bootstrap.
//!
//! # Responsibility
//! - Resolve the database location and open flags.
//! - Validate logging level and directory before the logger starts.
//!
//! # Invariants
//! - Environment overrides are read only by `from_env` constructors.
//! - Blank environment values are treated as unset.

use rusqlite::OpenFlags;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable overriding the database file path.
pub const DB_PATH_ENV: &str = "MINE_DB_PATH";
/// Environment variable selecting the log level.
pub const LOG_LEVEL_ENV: &str = "MINE_LOG_LEVEL";
/// Environment variable selecting the log directory.
pub const LOG_DIR_ENV: &str = "MINE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "mine.sqlite3";

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLevel(String),
    InvalidLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::InvalidLogDir(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {}

/// Where and how the item database is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub flags: OpenFlags,
}

impl DatabaseConfig {
    /// Creates a config for `path` with the default open flags.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            flags: default_open_flags(),
        }
    }

    /// Resolves the database path from `MINE_DB_PATH`, falling back to a
    /// file in the system temp directory.
    pub fn from_env() -> Self {
        match env_value(DB_PATH_ENV) {
            Some(path) => Self::new(path),
            None => Self::new(std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
        }
    }
}

/// Default flags: `SQLITE_OPEN_READ_WRITE`, `SQLITE_OPEN_CREATE`,
/// `SQLITE_OPEN_URI` (accept `file:` paths) and `SQLITE_OPEN_NO_MUTEX`
/// (each connection sits behind the handle's own mutex).
///
/// Shared cache must stay off: its lock contention surfaces as
/// `SQLITE_LOCKED`, which the busy timeout does not retry.
pub fn default_open_flags() -> OpenFlags {
    OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX
}

/// Validated logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: &'static str,
    pub log_dir: PathBuf,
}

impl LoggingConfig {
    /// Normalizes and validates raw level and directory input.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidLevel`] for levels outside
    ///   `trace|debug|info|warn|error` (`warning` is accepted as `warn`).
    /// - [`ConfigError::InvalidLogDir`] when the directory is empty or not
    ///   absolute.
    pub fn parse(level: &str, log_dir: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            level: normalize_level(level)?,
            log_dir: normalize_log_dir(log_dir)?,
        })
    }

    /// Reads `MINE_LOG_DIR` and `MINE_LOG_LEVEL`.
    ///
    /// Returns `Ok(None)` when no log directory is configured. The level
    /// defaults to [`default_log_level`].
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(log_dir) = env_value(LOG_DIR_ENV) else {
            return Ok(None);
        };
        let level = env_value(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string());
        Self::parse(&level, &log_dir).map(Some)
    }
}

/// Full core configuration used by entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub database: DatabaseConfig,
    pub logging: Option<LoggingConfig>,
}

impl CoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database: DatabaseConfig::from_env(),
            logging: LoggingConfig::from_env()?,
        })
    }
}

/// Returns the default log level for current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str, ConfigError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(ConfigError::InvalidLevel(other.to_string())),
    }
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, ConfigError> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidLogDir(
            "log_dir cannot be empty".to_string(),
        ));
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(ConfigError::InvalidLogDir(format!(
            "log_dir must be an absolute path, got `{trimmed}`"
        )));
    }
    Ok(path.to_path_buf())
}

fn env_value(name: &str) -> Option<String> {
    let raw = std::env::var(name).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
