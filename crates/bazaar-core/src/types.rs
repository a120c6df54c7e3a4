//! # Domain Types
//!
//! Core domain types used throughout Bazaar.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      User       │   │  CartLineItem   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  product_id     │       │
//! │  │  name           │   │  username       │   │  quantity (>0)  │       │
//! │  │  price (cents)  │   │  email          │   └─────────────────┘       │
//! │  │  stock          │   │  (no credential)│                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌──────────────────────────┐   ┌──────────────────────────┐           │
//! │  │    CheckoutSummary       │   │    AddToCartReceipt      │           │
//! │  │  cart_items + total      │   │  what was just merged    │           │
//! │  │  (derived, never stored) │   │                          │           │
//! │  └──────────────────────────┘   └──────────────────────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identifiers
//! Products and users are keyed by positive integers assigned by the record
//! store. Newtypes keep a `UserId` from being passed where a `ProductId` is
//! expected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Identifiers
// =============================================================================

/// Catalog identifier of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(pub i64);

/// Directory identifier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct UserId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Owned by the catalog store. The cart engine and checkout calculator only
/// read products; stock and price changes happen outside the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: ProductId,

    /// Display name.
    pub name: String,

    pub description: String,

    /// Unit price in cents.
    pub price: Money,

    /// Image URL.
    pub image: String,

    /// Units currently available. Never negative.
    pub stock: i64,
}

impl Product {
    /// Creates a product with an empty description and image.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money, stock: i64) -> Self {
        Product {
            id,
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
            stock,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// The stock gate: can a single request for `quantity` units be served?
    ///
    /// Compares against the current stock figure only; what is already in
    /// somebody's cart does not count against it.
    #[inline]
    pub fn can_supply(&self, quantity: i64) -> bool {
        quantity <= self.stock
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered user.
///
/// Carries no credential. Password hashes stay in the record store and are
/// only reachable through the API's credential verifier, so nothing in the
/// cart engine can ever see them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a user record stamped with the current time.
    pub fn new(id: UserId, username: impl Into<String>, email: impl Into<String>) -> Self {
        User {
            id,
            username: username.into(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// A (product, quantity) pair inside a cart.
///
/// ## Invariant
/// `quantity > 0`. The constructor rejects anything else, and quantities
/// only ever grow through merges, so a zero-quantity line never exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLineItem {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl CartLineItem {
    /// Creates a line item, rejecting non-positive quantities.
    pub fn new(product_id: ProductId, quantity: i64) -> Result<Self, ValidationError> {
        if quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }
        Ok(CartLineItem {
            product_id,
            quantity,
        })
    }
}

// =============================================================================
// Add-to-Cart Receipt
// =============================================================================

/// Confirmation of a successful add-to-cart call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AddToCartReceipt {
    pub user_id: UserId,
    pub product_id: ProductId,
    /// Units added by this call.
    pub quantity: i64,
    /// Quantity of the line item after the merge.
    pub line_quantity: i64,
}

impl AddToCartReceipt {
    /// Human-readable confirmation, e.g.
    /// `"Added 3 of product 1 to cart for user 1"`.
    pub fn message(&self) -> String {
        format!(
            "Added {} of product {} to cart for user {}",
            self.quantity, self.product_id, self.user_id
        )
    }
}

// =============================================================================
// Checkout Summary
// =============================================================================

/// The priced view of a cart at checkout time.
///
/// A derived snapshot: building one never stores an order, clears the cart,
/// or touches stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutSummary {
    pub user_id: UserId,
    /// The cart's line items, in cart order.
    pub cart_items: Vec<CartLineItem>,
    /// Σ unit price × quantity, in cents.
    pub total_price: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
