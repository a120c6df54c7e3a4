//! # Cart & Cart Ledger
//!
//! A `Cart` is an ordered list of line items with at most one line per
//! product. The `CartLedger` maps each user to their cart.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CartLedger                                      │
//! │                                                                         │
//! │   Mutex<HashMap<UserId, Arc<Mutex<Cart>>>>                              │
//! │     │                         │                                         │
//! │     │ held only long enough   │ held for the whole merge                │
//! │     │ to find / create the    │ (or the whole checkout read)            │
//! │     │ user's entry            │                                         │
//! │     ▼                         ▼                                         │
//! │   user 1 ──► Arc<Mutex<Cart>> [ (1, 8), (3, 1) ]                        │
//! │   user 2 ──► Arc<Mutex<Cart>> [ (2, 1) ]                                │
//! │                                                                         │
//! │   Concurrent adds for the SAME user serialize on the per-cart lock.    │
//! │   Adds for DIFFERENT users never contend past the map lookup.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Carts live only in memory and are gone when the process exits.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{CartLineItem, ProductId, UserId};
use crate::validation::validate_quantity;

// =============================================================================
// Cart
// =============================================================================

/// A user's shopping cart.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding the same product merges)
/// - Every quantity is > 0
/// - Items keep the order in which their product was first added
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLineItem>,

    /// When the cart was created.
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Returns the line item for a product, if present.
    pub fn find(&self, product_id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    /// Merges `quantity` units of a product into the cart.
    ///
    /// ## Behavior
    /// - Product already in cart: its quantity increases, position unchanged
    /// - Product not in cart: a new line is appended at the end
    ///
    /// ## Returns
    /// The line's quantity after the merge.
    pub fn add(&mut self, product_id: ProductId, quantity: i64) -> Result<i64, ValidationError> {
        validate_quantity(quantity)?;

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            let merged = item
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: 1,
                    max: i64::MAX,
                })?;
            item.quantity = merged;
            return Ok(merged);
        }

        self.append(CartLineItem::new(product_id, quantity)?)?;
        Ok(quantity)
    }

    /// Appends a new line item at the end of the cart.
    ///
    /// ## Errors
    /// `ValidationError::Duplicate` if the product already has a line.
    pub fn append(&mut self, item: CartLineItem) -> Result<(), ValidationError> {
        if self.find(item.product_id).is_some() {
            return Err(ValidationError::Duplicate {
                field: "product_id".to_string(),
                value: item.product_id.to_string(),
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Cart Ledger
// =============================================================================

/// Shared handle to a single user's cart.
pub type CartHandle = Arc<Mutex<Cart>>;

/// Process-wide map of user id to cart.
///
/// A cart is created lazily by the first successful add for a user and is
/// never removed.
#[derive(Debug, Default)]
pub struct CartLedger {
    carts: Mutex<HashMap<UserId, CartHandle>>,
}

impl CartLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the user's cart, creating an empty one if needed.
    pub fn entry(&self, user_id: UserId) -> CartHandle {
        let mut carts = self.carts.lock().unwrap_or_else(PoisonError::into_inner);
        carts
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(Cart::new())))
            .clone()
    }

    /// Returns the user's cart without creating one.
    pub fn get(&self, user_id: UserId) -> Option<CartHandle> {
        let carts = self.carts.lock().unwrap_or_else(PoisonError::into_inner);
        carts.get(&user_id).cloned()
    }

    /// Returns a copy of the user's cart as it is right now.
    pub fn snapshot(&self, user_id: UserId) -> Option<Cart> {
        self.get(user_id).map(|handle| lock_cart(&handle).clone())
    }

    /// Number of carts held.
    pub fn len(&self) -> usize {
        self.carts.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Locks a cart, recovering the guard if a previous holder panicked.
///
/// Merges update a single integer in place, so a poisoned cart is still
/// internally consistent.
pub fn lock_cart(handle: &Mutex<Cart>) -> MutexGuard<'_, Cart> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// Unit Tests
// =============================================================================
