//! # Store Module
//!
//! Read-side accessors the cart engine and checkout calculator depend on,
//! plus the in-memory stores the API serves from.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  bazaar-db (SQLite)  ── load at startup / write-through ──┐            │
//! │                                                            ▼            │
//! │                              ┌────────────────────────────────────┐    │
//! │                              │ InMemoryCatalog                    │    │
//! │                              │ InMemoryUserDirectory              │    │
//! │                              └───────────────┬────────────────────┘    │
//! │                                              │ CatalogStore            │
//! │                                              │ UserDirectory           │
//! │                                              ▼                         │
//! │                              CartEngine / CheckoutCalculator           │
//! │                              (read only, never mutate)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine only needs lookups, so the traits expose nothing else. Writes
//! (seeding, registration, stock changes) go through the concrete stores.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use crate::error::ValidationError;
use crate::types::{Product, ProductId, User, UserId};
use crate::validation::{validate_product, validate_stock, ValidationResult};

// =============================================================================
// Accessor Traits
// =============================================================================

/// Product lookup.
pub trait CatalogStore: Send + Sync {
    /// Returns the product with the given id, if it exists.
    fn get_product(&self, id: ProductId) -> Option<Product>;

    /// Returns every product, ordered by id.
    fn list_products(&self) -> Vec<Product>;
}

/// User lookup.
pub trait UserDirectory: Send + Sync {
    /// Returns the user with the given id, if it exists.
    fn get_user(&self, id: UserId) -> Option<User>;

    fn user_exists(&self, id: UserId) -> bool {
        self.get_user(id).is_some()
    }
}

// =============================================================================
// In-Memory Catalog
// =============================================================================

/// Catalog held in memory, keyed by product id.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<BTreeMap<ProductId, Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from an existing product list.
    ///
    /// ## Errors
    /// The first product that fails [`validate_product`].
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> ValidationResult<Self> {
        let catalog = Self::new();
        for product in products {
            catalog.upsert(product)?;
        }
        Ok(catalog)
    }

    /// Inserts or replaces a product after validating it.
    pub fn upsert(&self, product: Product) -> ValidationResult<()> {
        validate_product(&product)?;

        let mut products = self.products.write().unwrap_or_else(PoisonError::into_inner);
        products.insert(product.id, product);
        Ok(())
    }

    /// Removes a product. Returns the removed product, if any.
    pub fn remove(&self, id: ProductId) -> Option<Product> {
        let mut products = self.products.write().unwrap_or_else(PoisonError::into_inner);
        products.remove(&id)
    }

    /// Overwrites a product's stock figure.
    ///
    /// Returns `Ok(false)` when the product does not exist, and an error for
    /// negative stock.
    pub fn set_stock(&self, id: ProductId, stock: i64) -> ValidationResult<bool> {
        validate_stock(stock)?;

        let mut products = self.products.write().unwrap_or_else(PoisonError::into_inner);
        Ok(match products.get_mut(&id) {
            Some(product) => {
                product.stock = stock;
                true
            }
            None => false,
        })
    }

    pub fn len(&self) -> usize {
        self.products.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CatalogStore for InMemoryCatalog {
    fn get_product(&self, id: ProductId) -> Option<Product> {
        let products = self.products.read().unwrap_or_else(PoisonError::into_inner);
        products.get(&id).cloned()
    }

    fn list_products(&self) -> Vec<Product> {
        let products = self.products.read().unwrap_or_else(PoisonError::into_inner);
        products.values().cloned().collect()
    }
}

// =============================================================================
// In-Memory User Directory
// =============================================================================

/// User directory held in memory.
///
/// Enforces the same uniqueness the record store does: one user per id,
/// username, and email.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<BTreeMap<UserId, User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a user.
    ///
    /// ## Errors
    /// `ValidationError::Duplicate` if the id, username, or email is taken.
    pub fn insert(&self, user: User) -> Result<(), ValidationError> {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);

        if users.contains_key(&user.id) {
            return Err(duplicate("id", user.id.to_string()));
        }
        if users.values().any(|u| u.username == user.username) {
            return Err(duplicate("username", user.username));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(duplicate("email", user.email));
        }

        users.insert(user.id, user);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.users.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn duplicate(field: &str, value: String) -> ValidationError {
    ValidationError::Duplicate {
        field: field.to_string(),
        value,
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn get_user(&self, id: UserId) -> Option<User> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        users.get(&id).cloned()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
