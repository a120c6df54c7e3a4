//! Catalog reads.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use bazaar_core::validation::validate_product_id;
use bazaar_core::{CatalogStore, Product, ProductId};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Product as served over HTTP.
///
/// `price` is the decimal rendering of `price_cents` (`"699.99"`).
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub price_cents: i64,
    pub image: String,
    pub stock: i64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price.to_decimal_string(),
            price_cents: product.price.cents(),
            image: product.image,
            stock: product.stock,
        }
    }
}

pub async fn list(State(state): State<AppState>) -> Json<Vec<ProductResponse>> {
    let products = state
        .catalog
        .list_products()
        .into_iter()
        .map(ProductResponse::from)
        .collect();

    Json(products)
}

pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ProductResponse>> {
    let Path(id) = id.map_err(|e| ApiError::validation(e.body_text()))?;
    let id = ProductId(id);
    validate_product_id(id)?;

    state
        .catalog
        .get_product(id)
        .map(|product| Json(product.into()))
        .ok_or_else(|| ApiError::not_found("Product", id))
}
