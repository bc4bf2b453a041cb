//! Startup settings. Built once and passed by value into the store and router.

use crate::config::Dialect;
use crate::error::ConfigError;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub dialect: Dialect,
    /// Opaque connection string; see [`Dialect::connection_url`].
    pub uri: String,
    pub max_connections: u32,
    /// Upper bound for a single store round trip; kept below the request
    /// timeout so a stalled store answers 500 before the request gives up.
    pub query_timeout: Duration,
}

impl DatabaseConfig {
    pub fn in_memory() -> Self {
        DatabaseConfig {
            dialect: Dialect::Sqlite,
            uri: ":memory:".into(),
            max_connections: 1,
            query_timeout: query_budget(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }

    pub fn url(&self) -> String {
        self.dialect.connection_url(&self.uri)
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    /// Whole-request timeout applied by the router.
    pub timeout: Duration,
    pub database: DatabaseConfig,
}

impl Config {
    /// Read `PORT`, `TIMEOUT`, `DATABASE_DIALECT`, `DATABASE_URI` and
    /// `DATABASE_MAX_CONNECTIONS`, honouring a `.env` file when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Build from an arbitrary key lookup; missing keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let timeout_secs = parse_or(&lookup, "TIMEOUT", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidVar {
                key: "TIMEOUT",
                value: "0".into(),
            });
        }
        let dialect: Dialect = lookup("DATABASE_DIALECT")
            .unwrap_or_else(|| "sqlite3".into())
            .parse()?;
        let uri = lookup("DATABASE_URI").unwrap_or_else(|| ":memory:".into());
        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let timeout = Duration::from_secs(timeout_secs);

        Ok(Config {
            port,
            timeout,
            database: DatabaseConfig {
                dialect,
                uri,
                max_connections: max_connections.max(1),
                query_timeout: query_budget(timeout),
            },
        })
    }
}

/// Nine tenths of the request timeout.
pub fn query_budget(request_timeout: Duration) -> Duration {
    request_timeout.saturating_sub(request_timeout / 10)
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidVar { key, value: raw }),
    }
}
