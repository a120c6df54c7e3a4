//! # HTTP Routes
//!
//! | Method | Path                   | Handler                  |
//! |--------|------------------------|--------------------------|
//! | GET    | `/`                    | [`root`]                 |
//! | GET    | `/health`              | [`health`]               |
//! | GET    | `/products`            | [`products::list`]       |
//! | GET    | `/products/{id}`       | [`products::get`]        |
//! | POST   | `/register`            | [`users::register`]      |
//! | POST   | `/login`               | [`users::login`]         |
//! | POST   | `/cart`                | [`cart::add`]            |
//! | GET    | `/cart/{user_id}`      | [`cart::get`]            |
//! | POST   | `/checkout/{user_id}`  | [`checkout::checkout`]   |

pub mod cart;
pub mod checkout;
pub mod products;
pub mod users;

use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Builds the application router with tracing and request-id layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/products", get(products::list))
        .route("/products/{id}", get(products::get))
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/cart", post(cart::add))
        .route("/cart/{user_id}", get(cart::get))
        .route("/checkout/{user_id}", post(checkout::checkout))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|request: &axum::http::Request<_>| {
                            tracing::info_span!(
                                "http_request",
                                method = %request.method(),
                                uri = %request.uri(),
                                request_id = tracing::field::Empty,
                                status = tracing::field::Empty,
                                latency_ms = tracing::field::Empty,
                            )
                        })
                        .on_response(
                            |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                                span.record("status", response.status().as_u16());
                                span.record("latency_ms", latency.as_millis() as u64);
                                DefaultOnResponse::default().on_response(response, latency, span);
                            },
                        ),
                )
                .layer(axum::middleware::from_fn(request_id_middleware)),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to our E-commerce API".to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

/// Liveness plus a database round trip.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if state.db.health_check().await {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                database: "connected",
            }),
        )
    } else {
        tracing::warn!("Health check failed: database unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded",
                database: "unreachable",
            }),
        )
    }
}
