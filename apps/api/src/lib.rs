//! # Bazaar API
//!
//! HTTP surface for the storefront: catalog reads, registration and login,
//! and the cart/checkout operations from `bazaar-core`.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Request Path                                     │
//! │                                                                         │
//! │  client ──► TraceLayer ──► request id ──► handler ──► ApiError / JSON   │
//! │                                              │                          │
//! │                      ┌───────────────────────┼──────────────────┐       │
//! │                      ▼                       ▼                  ▼       │
//! │               CartEngine            CheckoutCalculator     Database     │
//! │           (add / get cart)             (totals)         (users, seed)   │
//! │                      │                       │                          │
//! │                      └──── CartLedger + in-memory catalog/users ─┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - Environment configuration
//! - [`error`] - `ApiError` and its HTTP mapping
//! - [`auth`] - Password hashing and credential checks
//! - [`state`] - Shared `AppState`
//! - [`middleware`] - Request id
//! - [`routes`] - Handlers and the router

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::build_router;
pub use state::AppState;
