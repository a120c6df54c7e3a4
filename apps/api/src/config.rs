//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. A `.env` file in the working directory is read first, if present;
//! one that exists but cannot be parsed stops startup.
//!
//! | Variable                   | Default      |
//! |----------------------------|--------------|
//! | `BAZAAR_HOST`              | `0.0.0.0`    |
//! | `BAZAAR_PORT`              | `8000`       |
//! | `DATABASE_PATH`            | `bazaar.db`  |
//! | `DATABASE_MAX_CONNECTIONS` | `5`          |
//! | `SEED_CATALOG`             | `true`       |

use std::env;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use bazaar_db::DbConfig;

/// API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Interface to bind.
    pub host: IpAddr,

    /// HTTP port.
    pub port: u16,

    /// SQLite database file, or `:memory:`.
    pub database_path: String,

    /// Pool size for file-backed databases.
    pub database_max_connections: u32,

    /// Write the default catalog into an empty database at startup.
    pub seed_catalog: bool,
}

impl ApiConfig {
    /// Load configuration from the process environment (after `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        env_file_loaded(dotenvy::dotenv())?;
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let config = ApiConfig {
            host: var("BAZAAR_HOST", "0.0.0.0")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BAZAAR_HOST".to_string()))?,

            port: var("BAZAAR_PORT", "8000")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BAZAAR_PORT".to_string()))?,

            database_path: var("DATABASE_PATH", "bazaar.db"),

            database_max_connections: var("DATABASE_MAX_CONNECTIONS", "5")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,

            seed_catalog: parse_bool(&var("SEED_CATALOG", "true"))
                .ok_or_else(|| ConfigError::InvalidValue("SEED_CATALOG".to_string()))?,
        };

        if config.database_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("DATABASE_PATH".to_string()));
        }
        if config.database_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Address the HTTP server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Pool configuration for the record store.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.database_max_connections)
    }
}

/// Outcome of reading a `.env` file: `Ok(false)` when there is none.
fn env_file_loaded(result: Result<PathBuf, dotenvy::Error>) -> Result<bool, ConfigError> {
    match result {
        Ok(_) => Ok(true),
        Err(dotenvy::Error::Io(err)) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(ConfigError::EnvFile(err.to_string())),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Unreadable .env file: {0}")]
    EnvFile(String),
}
