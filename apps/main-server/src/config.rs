//! Server configuration.

use std::env;

/// Value of `DATABASE_URL` that selects the in-memory store.
pub const MEMORY_DATABASE_URL: &str = "memory";

/// Where records are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-memory tables, lost on exit.
    Memory,
    /// SQLite database at the given sqlx URL.
    Sqlite(String),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Database URL, or `memory`.
    pub database_url: String,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which returns the value of a
    /// variable if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("ONEONONE_SERVER_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("ONEONONE_SERVER_PORT {raw:?} is not a port: {e}"))?,
            None => 8000,
        };

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| "sqlite:oneonone.db?mode=rwc".to_string());
        if database_url != MEMORY_DATABASE_URL && !database_url.starts_with("sqlite:") {
            anyhow::bail!("DATABASE_URL must be `memory` or a sqlite: URL, got {database_url:?}");
        }

        Ok(Self {
            host: lookup("ONEONONE_SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url,
            log_level: lookup("ONEONONE_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the store selected by `database_url`.
    pub fn store_backend(&self) -> StoreBackend {
        if self.database_url == MEMORY_DATABASE_URL {
            StoreBackend::Memory
        } else {
            StoreBackend::Sqlite(self.database_url.clone())
        }
    }
}
