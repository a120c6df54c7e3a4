//! # Cart Engine
//!
//! AddToCart and GetCart.
//!
//! ## AddToCart Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_to_cart(user_id, product_id, quantity)                             │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  1. quantity > 0, ids > 0 ─────────────────── else InvalidInput        │
//! │  2. user exists ───────────────────────────── else UserNotFound        │
//! │  3. product exists ────────────────────────── else ProductNotFound     │
//! │  4. quantity <= product.stock ─────────────── else InsufficientStock   │
//! │                    │                                                    │
//! │                    ▼   (nothing above touches the ledger)               │
//! │  5. lock user's cart (create if absent)                                 │
//! │  6. merge into existing line, or append a new one                       │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  AddToCartReceipt                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Stock Gate
//! Step 4 compares the *incremental* request against the catalog's current
//! stock. Units already sitting in the user's cart are not counted, so two
//! adds of 10 against a stock of 15 both succeed and the cart holds 20.
//! Stock is never decremented here.

use std::sync::Arc;

use crate::cart::{lock_cart, CartLedger};
use crate::error::{CoreError, CoreResult};
use crate::store::{CatalogStore, UserDirectory};
use crate::types::{AddToCartReceipt, CartLineItem, ProductId, UserId};
use crate::validation::{validate_product_id, validate_quantity, validate_user_id};

/// Mutates carts in the ledger against the catalog and user directory.
#[derive(Debug)]
pub struct CartEngine<C, U> {
    catalog: Arc<C>,
    users: Arc<U>,
    ledger: Arc<CartLedger>,
}

impl<C, U> Clone for CartEngine<C, U> {
    fn clone(&self) -> Self {
        CartEngine {
            catalog: Arc::clone(&self.catalog),
            users: Arc::clone(&self.users),
            ledger: Arc::clone(&self.ledger),
        }
    }
}

impl<C, U> CartEngine<C, U>
where
    C: CatalogStore,
    U: UserDirectory,
{
    pub fn new(catalog: Arc<C>, users: Arc<U>, ledger: Arc<CartLedger>) -> Self {
        CartEngine {
            catalog,
            users,
            ledger,
        }
    }

    /// Adds `quantity` units of a product to a user's cart.
    ///
    /// ## Errors
    /// - `Validation` - non-positive quantity or identifier
    /// - `UserNotFound` / `ProductNotFound` - unknown id
    /// - `InsufficientStock` - `quantity` exceeds the product's current stock
    ///
    /// A failed call leaves the ledger untouched; in particular it never
    /// creates an empty cart.
    pub fn add_to_cart(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> CoreResult<AddToCartReceipt> {
        validate_quantity(quantity)?;
        validate_user_id(user_id)?;
        validate_product_id(product_id)?;

        if !self.users.user_exists(user_id) {
            return Err(CoreError::UserNotFound(user_id));
        }

        let product = self
            .catalog
            .get_product(product_id)
            .ok_or(CoreError::ProductNotFound(product_id))?;

        if !product.can_supply(quantity) {
            return Err(CoreError::InsufficientStock {
                product_id,
                product_name: product.name,
                available: product.stock,
                requested: quantity,
            });
        }

        let handle = self.ledger.entry(user_id);
        let mut cart = lock_cart(&handle);
        let line_quantity = cart.add(product_id, quantity)?;

        Ok(AddToCartReceipt {
            user_id,
            product_id,
            quantity,
            line_quantity,
        })
    }

    /// Returns the user's line items in cart order.
    ///
    /// ## Errors
    /// - `Validation` - non-positive user id
    /// - `CartNotFound` - the user has no cart or the cart is empty. This
    ///   also covers unknown users, who can never own a cart.
    pub fn get_cart(&self, user_id: UserId) -> CoreResult<Vec<CartLineItem>> {
        validate_user_id(user_id)?;

        match self.ledger.snapshot(user_id) {
            Some(cart) if !cart.is_empty() => Ok(cart.items().to_vec()),
            _ => Err(CoreError::CartNotFound(user_id)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
