//! # Error Types
//!
//! Domain-specific error types for bazaar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bazaar-core errors (this file)                                        │
//! │  ├── CoreError        - Cart / checkout failures                       │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── ErrorKind        - NotFound | InsufficientStock | InvalidInput    │
//! │                                                                         │
//! │  bazaar-db errors (separate crate)                                     │
//! │  └── DbError          - Record store failures                          │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - What HTTP clients see (code + message)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → HTTP status            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (which id, which constraint)
//! 3. Never leak storage representation in a message
//! 4. The core raises typed failures, never transport codes

use thiserror::Error;

use crate::types::{ProductId, UserId};

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification of a core failure.
///
/// The request surface maps each kind onto a transport-level signal
/// ("not found" vs "bad request"); the core itself stays transport-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Referenced user, product, or cart does not exist (an empty cart counts).
    NotFound,
    /// Requested quantity exceeds the catalog's current stock.
    InsufficientStock,
    /// Non-positive quantity, malformed identifier, or similar bad input.
    InvalidInput,
}

// =============================================================================
// Core Error
// =============================================================================

/// Cart and checkout failures.
///
/// Every variant carries the identifier and constraint involved so the
/// request surface can produce an actionable message.
#[derive(Debug, Error)]
pub enum CoreError {
    /// User does not exist in the user directory.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Product does not exist in the catalog.
    ///
    /// ## When This Occurs
    /// - AddToCart with an unknown product id
    /// - Checkout where a line item's product was removed from the catalog
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// User has no cart, or the cart has no line items.
    #[error("Cart not found for user {0}")]
    CartNotFound(UserId),

    /// A single add-to-cart request asks for more than the catalog holds.
    ///
    /// ## User Workflow
    /// ```text
    /// AddToCart (qty: 2)
    ///      │
    ///      ▼
    /// Check stock: available=1
    ///      │
    ///      ▼
    /// InsufficientStock { product_name: "jeans", available: 1, requested: 2 }
    ///      │
    ///      ▼
    /// Client shows: "Not enough stock for product 'jeans'"
    /// ```
    #[error("Not enough stock for product '{product_name}' ({product_id}): available {available}, requested {requested}")]
    InsufficientStock {
        product_id: ProductId,
        product_name: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Classifies this error for the request surface.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::UserNotFound(_)
            | CoreError::ProductNotFound(_)
            | CoreError::CartNotFound(_) => ErrorKind::NotFound,
            CoreError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            CoreError::Validation(_) => ErrorKind::InvalidInput,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., username already registered).
    #[error("{field} '{value}' already registered")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
