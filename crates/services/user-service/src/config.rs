//! User service configuration.

use std::env;
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use common::{DatabaseConfig, ServerConfig};

/// Which [`UserRepository`](crate::repository::UserRepository) backs the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// Process-local map, lost on restart
    #[default]
    Memory,
    /// PostgreSQL via SeaORM
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Postgres => f.write_str("postgres"),
        }
    }
}

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageBackend,
}

impl UserServiceConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let server = ServerConfig {
            host: env::var("USER_SERVICE_HOST").unwrap_or(defaults.server.host),
            port: parse_var("USER_SERVICE_PORT").unwrap_or(defaults.server.port),
        };

        let database = DatabaseConfig {
            url: env::var("USER_SERVICE_DATABASE_URL")
                .or_else(|_| env::var("DATABASE_URL"))
                .unwrap_or(defaults.database.url),
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(defaults.database.max_connections),
            min_connections: parse_var("DATABASE_MIN_CONNECTIONS")
                .unwrap_or(defaults.database.min_connections),
        };

        Self {
            server,
            database,
            storage: parse_var("USER_SERVICE_STORAGE").unwrap_or(defaults.storage),
        }
    }
}

/// Read and parse an environment variable; unset or unparsable yields `None`
fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
