//! Checkout endpoint.
//!
//! Prices the cart against the current catalog. Nothing is persisted: the
//! cart stays as it is and stock is untouched.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use bazaar_core::{CartLineItem, CheckoutSummary, UserId};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub user_id: UserId,
    pub cart_items: Vec<CartLineItem>,
    pub total_price_cents: i64,
    pub total_price: String,
}

impl From<CheckoutSummary> for CheckoutResponse {
    fn from(summary: CheckoutSummary) -> Self {
        CheckoutResponse {
            user_id: summary.user_id,
            total_price_cents: summary.total_price.cents(),
            total_price: summary.total_price.to_decimal_string(),
            cart_items: summary.cart_items,
        }
    }
}

pub async fn checkout(
    State(state): State<AppState>,
    user_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<CheckoutResponse>> {
    let Path(user_id) = user_id.map_err(|e| ApiError::validation(e.body_text()))?;

    let summary = state.checkout.checkout(UserId(user_id))?;

    info!(
        user_id = %summary.user_id,
        lines = summary.cart_items.len(),
        total = %summary.total_price,
        "Checkout computed"
    );

    Ok(Json(summary.into()))
}
