//! Relational engine selection and connection URL normalisation.

use crate::error::ConfigError;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

impl std::str::FromStr for Dialect {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            _ => Err(ConfigError::UnknownDialect(s.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Sqlite => f.write_str("sqlite"),
            Dialect::Postgres => f.write_str("postgres"),
        }
    }
}

impl Dialect {
    /// Build a URL the `Any` driver can route. Accepts bare sqlite paths and
    /// `:memory:` as well as full URLs.
    pub fn connection_url(&self, uri: &str) -> String {
        let uri = uri.trim();
        match self {
            Dialect::Sqlite if uri.starts_with("sqlite:") => uri.to_string(),
            Dialect::Sqlite if is_memory(uri) => "sqlite::memory:".to_string(),
            Dialect::Sqlite => format!("sqlite://{}?mode=rwc", uri),
            Dialect::Postgres => uri.to_string(),
        }
    }

    /// In-memory sqlite lives only as long as its one connection.
    pub fn is_in_memory(&self, uri: &str) -> bool {
        let uri = uri.trim();
        matches!(self, Dialect::Sqlite)
            && (is_memory(uri) || uri == "sqlite::memory:" || uri.contains("mode=memory"))
    }
}

fn is_memory(uri: &str) -> bool {
    uri.is_empty() || uri == ":memory:"
}
