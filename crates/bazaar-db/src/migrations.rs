//! Embedded schema migrations.
//!
//! SQL files under `migrations/sqlite/` (workspace root) are compiled into the
//! binary and applied in version order on connect. Applied versions are
//! recorded in `_sqlx_migrations`; a migration that changed after being
//! applied fails the startup with `DbError::MigrationFailed`.
//!
//! | Version | File                     | Creates           |
//! |---------|--------------------------|-------------------|
//! | 001     | `001_initial_schema.sql` | `products`, `users` |
//!
//! Schema changes go in a new numbered file; shipped files are frozen.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every embedded migration not yet recorded.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    info!(embedded = MIGRATOR.migrations.len(), "Schema up to date");
    Ok(())
}
