//! Registration and login.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use bazaar_core::validation::{validate_email, validate_password, validate_username};
use bazaar_core::{User, UserId};
use bazaar_db::NewUser;

use crate::auth::{authenticate, hash_password};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user_id: UserId,
}

/// Creates an account. The record store assigns the id and enforces
/// username/email uniqueness; the in-memory directory is updated afterwards.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(request) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    validate_username(&request.username)?;
    validate_email(&request.email)?;
    validate_password(&request.password)?;

    let new_user = NewUser {
        username: request.username,
        email: request.email,
        password_hash: hash_password(&request.password)?,
    };

    let user = state.db.users().insert(&new_user).await?;
    state.users.insert(user.clone())?;

    info!(user_id = %user.id, username = %user.username, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(request) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    let user_id = authenticate(&state.db, &request.email, &request.password).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user_id,
    }))
}
