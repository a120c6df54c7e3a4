//! # Checkout Calculator
//!
//! Prices a user's cart against the catalog as it stands right now.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout(user_id)                                                      │
//! │       │                                                                 │
//! │       ├── user exists? ───────────────────── else UserNotFound          │
//! │       ├── cart exists and non-empty? ─────── else CartNotFound          │
//! │       │                                                                 │
//! │       ▼  (user's cart locked for the whole computation)                 │
//! │  for (product_id, qty) in cart order:                                   │
//! │       product = catalog.get(product_id) ──── else ProductNotFound       │
//! │       total += product.price × qty      (integer cents)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CheckoutSummary { cart_items, total_price }                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checkout is read-only: the cart is left as it was, stock is not
//! re-checked or decremented, and no order is recorded. Prices come from the
//! catalog at checkout time, not from when the item was added.

use std::sync::Arc;

use crate::cart::{lock_cart, CartLedger};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::store::{CatalogStore, UserDirectory};
use crate::types::{CheckoutSummary, UserId};
use crate::validation::validate_user_id;

/// Computes checkout summaries.
#[derive(Debug)]
pub struct CheckoutCalculator<C, U> {
    catalog: Arc<C>,
    users: Arc<U>,
    ledger: Arc<CartLedger>,
}

impl<C, U> Clone for CheckoutCalculator<C, U> {
    fn clone(&self) -> Self {
        CheckoutCalculator {
            catalog: Arc::clone(&self.catalog),
            users: Arc::clone(&self.users),
            ledger: Arc::clone(&self.ledger),
        }
    }
}

impl<C, U> CheckoutCalculator<C, U>
where
    C: CatalogStore,
    U: UserDirectory,
{
    pub fn new(catalog: Arc<C>, users: Arc<U>, ledger: Arc<CartLedger>) -> Self {
        CheckoutCalculator {
            catalog,
            users,
            ledger,
        }
    }

    /// Builds the checkout summary for a user's cart.
    ///
    /// ## Errors
    /// - `Validation` - non-positive user id
    /// - `UserNotFound` - unknown user
    /// - `CartNotFound` - no cart, or an empty one
    /// - `ProductNotFound` - a line item's product has left the catalog
    /// - `Validation` - the total does not fit in `i64` cents
    pub fn checkout(&self, user_id: UserId) -> CoreResult<CheckoutSummary> {
        validate_user_id(user_id)?;

        if !self.users.user_exists(user_id) {
            return Err(CoreError::UserNotFound(user_id));
        }

        let handle = self
            .ledger
            .get(user_id)
            .ok_or(CoreError::CartNotFound(user_id))?;
        let cart = lock_cart(&handle);

        if cart.is_empty() {
            return Err(CoreError::CartNotFound(user_id));
        }

        let mut total_price = Money::zero();
        for item in cart.items() {
            let product = self
                .catalog
                .get_product(item.product_id)
                .ok_or(CoreError::ProductNotFound(item.product_id))?;
            total_price = product
                .price
                .checked_multiply_quantity(item.quantity)
                .and_then(|line_total| total_price.checked_add(line_total))
                .ok_or_else(|| ValidationError::OutOfRange {
                    field: "total_price".to_string(),
                    min: 0,
                    max: i64::MAX,
                })?;
        }

        Ok(CheckoutSummary {
            user_id,
            cart_items: cart.items().to_vec(),
            total_price,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
