//! Credential handling.
//!
//! Passwords are stored as Argon2id PHC strings in the `users` table and never
//! leave this module or the user repository. The in-memory user directory only
//! ever sees the credential-free [`bazaar_core::User`].

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use tracing::{debug, info};

use bazaar_core::UserId;
use bazaar_db::{Database, DbError};

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are not distinguished.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Database(#[from] DbError),
}

/// Hashes a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored hash.
///
/// A malformed stored hash verifies as `false`.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Checks an email/password pair against the record store.
pub async fn authenticate(db: &Database, email: &str, password: &str) -> Result<UserId, AuthError> {
    let credentials = db
        .users()
        .find_credentials_by_email(email)
        .await?
        .ok_or_else(|| {
            debug!("Login for unknown email");
            AuthError::InvalidCredentials
        })?;

    if !verify_password(password, &credentials.password_hash) {
        debug!(user_id = credentials.user_id, "Password mismatch");
        return Err(AuthError::InvalidCredentials);
    }

    info!(user_id = credentials.user_id, "User logged in");
    Ok(UserId(credentials.user_id))
}
