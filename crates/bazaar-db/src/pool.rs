//! # Connection Pool
//!
//! Opens the SQLite record store and hands out repositories.
//!
//! ```text
//! DbConfig::new("bazaar.db")          DbConfig::new(":memory:")
//!        │                                   │
//!        ▼                                   ▼
//!  StorageLocation::File              StorageLocation::Memory
//!  WAL, NORMAL sync, FKs,             one pinned connection,
//!  up to max_connections              no idle timeout / lifetime
//!        │                                   │
//!        └───────────────┬───────────────────┘
//!                        ▼
//!            Database::new ── migrations ──► products() / users()
//! ```
//!
//! An in-memory database lives exactly as long as its single connection, so
//! that connection is never reaped. Every `Database::new(DbConfig::in_memory())`
//! is a separate, empty store.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::product::ProductRepository;
use crate::repository::user::UserRepository;

const MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Where the record store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    File(PathBuf),
    Memory,
}

impl StorageLocation {
    fn from_path(path: PathBuf) -> Self {
        if path == Path::new(MEMORY_PATH) {
            StorageLocation::Memory
        } else {
            StorageLocation::File(path)
        }
    }
}

impl std::fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageLocation::File(path) => write!(f, "{}", path.display()),
            StorageLocation::Memory => f.write_str(MEMORY_PATH),
        }
    }
}

/// Pool settings.
///
/// ```rust
/// use bazaar_db::DbConfig;
///
/// let config = DbConfig::new("bazaar.db").max_connections(8);
/// assert_eq!(config.max_connections, 8);
///
/// // Memory stores are pinned to one connection.
/// let config = DbConfig::new(":memory:").max_connections(8);
/// assert_eq!(config.max_connections, 1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub location: StorageLocation,

    /// Default: 5 (always 1 in memory)
    pub max_connections: u32,

    /// Default: 1
    pub min_connections: u32,

    /// How long to wait for a free connection. Default: 30 seconds
    pub connect_timeout: Duration,

    /// `None` keeps idle connections open. Default: 10 minutes
    pub idle_timeout: Option<Duration>,

    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// File-backed store at `path`; the literal path `:memory:` selects
    /// [`DbConfig::in_memory`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        match StorageLocation::from_path(path.into()) {
            StorageLocation::Memory => Self::in_memory(),
            location => DbConfig {
                location,
                max_connections: 5,
                min_connections: 1,
                connect_timeout: Duration::from_secs(30),
                idle_timeout: Some(Duration::from_secs(600)),
                run_migrations: true,
            },
        }
    }

    /// Private in-memory store, used by tests and `DATABASE_PATH=:memory:`.
    pub fn in_memory() -> Self {
        DbConfig {
            location: StorageLocation::Memory,
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: None,
            run_migrations: true,
        }
    }

    /// Ignored in memory.
    pub fn max_connections(mut self, max: u32) -> Self {
        if !self.is_in_memory() {
            self.max_connections = max;
        }
        self
    }

    /// Ignored in memory.
    pub fn min_connections(mut self, min: u32) -> Self {
        if !self.is_in_memory() {
            self.min_connections = min;
        }
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.location == StorageLocation::Memory
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = match &self.location {
            StorageLocation::Memory => SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?,
            StorageLocation::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .create_if_missing(true),
        };

        Ok(options.foreign_keys(true))
    }

    fn pool_options(&self) -> SqlitePoolOptions {
        let options = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(self.idle_timeout);

        match self.location {
            StorageLocation::Memory => options.max_lifetime(None),
            StorageLocation::File(_) => options,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to the record store. Clones share one pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool (creating the file if needed) and applies pending
    /// migrations unless disabled.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(location = %config.location, "Opening record store");

        let pool = config
            .pool_options()
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(max_connections = config.max_connections, "Pool ready");

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Safe to call repeatedly; applied versions are skipped.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    /// Closes every clone's pool; later queries fail with `ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing record store");
        self.pool.close().await;
    }

    /// `SELECT 1` round trip.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
