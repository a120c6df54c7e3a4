//! Record store errors.
//!
//! sqlx errors are folded into [`DbError`] at the repository boundary so
//! callers never match on driver types. The API turns `UniqueViolation` and
//! `Validation` into a 400 and everything else into a logged 500.

use bazaar_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A `UNIQUE` index rejected the write (`users.username`, `users.email`).
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// The file could not be opened or the pool is closed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected the statement (`CHECK` constraint, missing table, ...).
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A record was refused before reaching SQLite.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Column named by a SQLite unique-constraint message, e.g. `email` for
/// `"UNIQUE constraint failed: users.email"`.
fn unique_column(message: &str) -> Option<&str> {
    let target = message.strip_prefix("UNIQUE constraint failed: ")?;
    // Composite indexes list several columns; the first one is enough.
    let first = target.split(',').next().unwrap_or(target).trim();
    Some(first.rsplit('.').next().unwrap_or(first))
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),
            sqlx::Error::Database(db_err) => match unique_column(db_err.message()) {
                // The offending value is not in the message; repositories fill it in.
                Some(column) => DbError::duplicate(column, "unknown"),
                None => DbError::QueryFailed(db_err.message().to_string()),
            },
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;
