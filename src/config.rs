use crate::constants::*;
use std::env;
use std::str::FromStr;
use time::{UtcOffset, macros::format_description};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "libsql" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::InvalidStoreBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: String,
    pub data_path: String,
    pub backend: StoreBackend,
    /// Offset at which expense days and month/year tags are read.
    pub utc_offset: UtcOffset,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidPort(String),
    InvalidStoreBackend(String),
    InvalidUtcOffset(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort(port) => {
                write!(f, "Invalid port number: {}", port)
            }
            ConfigError::InvalidStoreBackend(name) => {
                write!(
                    f,
                    "Invalid store backend: {} (expected \"sqlite\" or \"memory\")",
                    name
                )
            }
            ConfigError::InvalidUtcOffset(value) => {
                write!(f, "Invalid UTC offset: {} (expected e.g. \"+09:00\")", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parses `+HH:MM` / `-HH:MM`; `Z` and `UTC` mean a zero offset.
pub fn parse_utc_offset(value: &str) -> Result<UtcOffset, ConfigError> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(UtcOffset::UTC);
    }
    UtcOffset::parse(
        trimmed,
        format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
    )
    .map_err(|_| ConfigError::InvalidUtcOffset(value.to_string()))
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to the
    /// defaults in `constants` for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = lookup("SERVER_PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
        let data_path = lookup("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
        let backend = lookup("EXPENSE_STORE")
            .unwrap_or_else(|| DEFAULT_STORE_BACKEND.to_string())
            .parse::<StoreBackend>()?;
        let utc_offset = parse_utc_offset(
            &lookup("UTC_OFFSET").unwrap_or_else(|| DEFAULT_UTC_OFFSET.to_string()),
        )?;

        if port.parse::<u16>().is_err() {
            return Err(ConfigError::InvalidPort(port));
        }

        Ok(Config {
            host,
            port,
            data_path,
            backend,
            utc_offset,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
