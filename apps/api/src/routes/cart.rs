//! Cart endpoints.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use bazaar_core::{CartLineItem, ProductId, UserId};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct AddToCartResponse {
    pub message: String,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub line_quantity: i64,
}

/// AddToCart: merge into the user's cart after the per-call stock check.
pub async fn add(
    State(state): State<AppState>,
    payload: Result<Json<AddToCartRequest>, JsonRejection>,
) -> ApiResult<Json<AddToCartResponse>> {
    let Json(request) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    let receipt = state.engine.add_to_cart(
        UserId(request.user_id),
        ProductId(request.product_id),
        request.quantity,
    )?;

    info!(
        user_id = %receipt.user_id,
        product_id = %receipt.product_id,
        quantity = receipt.quantity,
        line_quantity = receipt.line_quantity,
        "Added to cart"
    );

    Ok(Json(AddToCartResponse {
        message: receipt.message(),
        user_id: receipt.user_id,
        product_id: receipt.product_id,
        quantity: receipt.quantity,
        line_quantity: receipt.line_quantity,
    }))
}

pub async fn get(
    State(state): State<AppState>,
    user_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<CartLineItem>>> {
    let Path(user_id) = user_id.map_err(|e| ApiError::validation(e.body_text()))?;

    let items = state.engine.get_cart(UserId(user_id))?;
    Ok(Json(items))
}
