//! Till API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                  | Default   | Meaning                              |
//! |---------------------------|-----------|--------------------------------------|
//! | `TILL_BIND_ADDR`          | `0.0.0.0` | Interface the HTTP server binds      |
//! | `TILL_HTTP_PORT`          | `8000`    | HTTP port                            |
//! | `TILL_DATABASE_PATH`      | `till.db` | SQLite file                          |
//! | `TILL_DB_MAX_CONNECTIONS` | `5`       | Pool size                            |
//! | `TILL_UTC_OFFSET_MINUTES` | `0`       | Local offset for whole-day reports   |
//! | `TILL_HISTORY_LIMIT`      | `20`      | Default page size for listings       |

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use till_core::MAX_LISTING_LIMIT;
use till_db::DbConfig;

/// Largest accepted UTC offset, in minutes (just under a day either way).
pub const MAX_UTC_OFFSET_MINUTES: i32 = 1439;

/// Till API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind
    pub bind_addr: IpAddr,

    /// HTTP server port
    pub http_port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Maximum pooled SQLite connections
    pub db_max_connections: u32,

    /// Offset of the stand's local time from UTC, used to turn report dates
    /// into whole-day windows
    pub utc_offset_minutes: i32,

    /// Page size for session and sale listings when none is requested
    pub history_limit: i64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            http_port: 8000,
            database_path: PathBuf::from("till.db"),
            db_max_connections: 5,
            utc_offset_minutes: 0,
            history_limit: 20,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Unset keys fall back to [`ApiConfig::default`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            bind_addr: parse_or(&lookup, "TILL_BIND_ADDR", defaults.bind_addr)?,
            http_port: parse_or(&lookup, "TILL_HTTP_PORT", defaults.http_port)?,
            database_path: lookup("TILL_DATABASE_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            db_max_connections: parse_or(
                &lookup,
                "TILL_DB_MAX_CONNECTIONS",
                defaults.db_max_connections,
            )?,
            utc_offset_minutes: parse_or(
                &lookup,
                "TILL_UTC_OFFSET_MINUTES",
                defaults.utc_offset_minutes,
            )?,
            history_limit: parse_or(&lookup, "TILL_HISTORY_LIMIT", defaults.history_limit)?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("TILL_DB_MAX_CONNECTIONS".to_string()));
        }

        if !(-MAX_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&self.utc_offset_minutes) {
            return Err(ConfigError::InvalidValue("TILL_UTC_OFFSET_MINUTES".to_string()));
        }

        if !(1..=MAX_LISTING_LIMIT).contains(&self.history_limit) {
            return Err(ConfigError::InvalidValue("TILL_HISTORY_LIMIT".to_string()));
        }

        Ok(())
    }

    /// Address the HTTP server listens on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.http_port)
    }

    /// Local offset used for whole-day report bounds.
    pub fn utc_offset(&self) -> FixedOffset {
        // Range checked in validate(); UTC for a hand-built out-of-range value.
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix())
    }

    /// Ledger Store settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone()).max_connections(self.db_max_connections)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        _ => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
