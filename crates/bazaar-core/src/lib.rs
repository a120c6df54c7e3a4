//! # bazaar-core: Cart & Checkout Logic for Bazaar
//!
//! This crate is the **heart** of Bazaar. It owns the only part of the
//! storefront with real invariants: how a cart accumulates line items against
//! a mutable catalog, and how checkout prices that cart.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/api (axum request surface)                 │   │
//! │  │   /products  /register  /login  /cart  /checkout               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bazaar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  engine   │  │ checkout  │  │   cart    │  │   store   │  │   │
//! │  │   │ AddToCart │  │ Checkout  │  │CartLedger │  │ Catalog   │  │   │
//! │  │   │ GetCart   │  │Calculator │  │   Cart    │  │ Users     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO LOGGING               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               bazaar-db (SQLite record store)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, User, CartLineItem, CheckoutSummary)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`store`] - Catalog / user accessor traits and in-memory stores
//! - [`cart`] - Cart and the per-user Cart Ledger
//! - [`engine`] - Cart Engine (AddToCart, GetCart)
//! - [`checkout`] - Checkout Calculator
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use bazaar_core::{
//!     CartEngine, CartLedger, CheckoutCalculator, InMemoryCatalog, InMemoryUserDirectory,
//!     Money, Product, ProductId, User, UserId,
//! };
//!
//! let catalog = Arc::new(InMemoryCatalog::new());
//! catalog
//!     .upsert(Product::new(ProductId(1), "Smartphone", Money::from_cents(69999), 15))
//!     .unwrap();
//!
//! let users = Arc::new(InMemoryUserDirectory::new());
//! users.insert(User::new(UserId(1), "ada", "ada@example.com")).unwrap();
//!
//! let ledger = Arc::new(CartLedger::new());
//! let engine = CartEngine::new(catalog.clone(), users.clone(), ledger.clone());
//! let checkout = CheckoutCalculator::new(catalog, users, ledger);
//!
//! engine.add_to_cart(UserId(1), ProductId(1), 5).unwrap();
//! engine.add_to_cart(UserId(1), ProductId(1), 3).unwrap();
//!
//! let summary = checkout.checkout(UserId(1)).unwrap();
//! assert_eq!(summary.total_price.cents(), 559_992); // $5599.92
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod engine;
pub mod error;
pub mod money;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLedger};
pub use checkout::CheckoutCalculator;
pub use engine::CartEngine;
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use store::{CatalogStore, InMemoryCatalog, InMemoryUserDirectory, UserDirectory};
pub use types::*;
