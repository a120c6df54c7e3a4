//! # User Repository
//!
//! Database operations for registered users.
//!
//! ## Credential Separation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  users table:  id | username | email | password_hash | created_at      │
//! │                 └──────────┬──────────┘       │                         │
//! │                            ▼                  ▼                         │
//! │              bazaar_core::User          UserCredentials                 │
//! │              (everything else)          (login only)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only `find_credentials_by_email` ever reads `password_hash`.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use bazaar_core::{User, UserId};

use crate::error::{DbError, DbResult};

/// Row shape of the `users` table, minus the password hash.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId(row.id),
            username: row.username,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

/// A user to be inserted. The hash is produced by the caller.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Stored credential for a user, used only to verify a login.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    pub user_id: i64,
    pub password_hash: String,
}

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user and returns it with its assigned id.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` naming `username` or `email` when either
    /// is already registered.
    pub async fn insert(&self, new_user: &NewUser) -> DbResult<User> {
        debug!(username = %new_user.username, "Inserting user");

        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => {
                let value = if field == "email" {
                    new_user.email.clone()
                } else {
                    new_user.username.clone()
                };
                DbError::UniqueViolation { field, value }
            }
            other => other,
        })?;

        Ok(User {
            id: UserId(result.last_insert_rowid()),
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            created_at,
        })
    }

    /// Gets the stored password hash for an email.
    pub async fn find_credentials_by_email(&self, email: &str) -> DbResult<Option<UserCredentials>> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            r#"
            SELECT id AS user_id, password_hash
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credentials)
    }

    /// Lists every user, ordered by id.
    pub async fn list_all(&self) -> DbResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, created_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded users");
        Ok(rows.into_iter().map(User::from).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
