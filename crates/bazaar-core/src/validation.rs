//! # Validation Module
//!
//! Input validation utilities for Bazaar.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractors (axum)                                       │
//! │  └── Type validation (JSON / path deserialization)                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rule validation (positive ids, quantities, formats)      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE constraints (username, email)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bazaar_core::validation::{validate_email, validate_quantity};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_email("ada@example.com").is_ok());
//! ```

use crate::error::ValidationError;
use crate::types::{Product, ProductId, UserId};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 50;
const EMAIL_MAX: usize = 254;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 128;
const PRODUCT_NAME_MAX: usize = 200;

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates a product identifier (must be positive).
pub fn validate_product_id(id: ProductId) -> ValidationResult<()> {
    validate_positive_id("product_id", id.0)
}

/// Validates a user identifier (must be positive).
pub fn validate_user_id(id: UserId) -> ValidationResult<()> {
    validate_positive_id("user_id", id.0)
}

fn validate_positive_id(field: &str, id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "identifiers start at 1".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an add-to-cart quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// There is deliberately no upper cap here: the only ceiling on a request
/// is the product's stock, checked by the cart engine.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use bazaar_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(69999).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a stock count (must be non-negative).
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > PRODUCT_NAME_MAX {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: PRODUCT_NAME_MAX,
        });
    }

    Ok(())
}

/// Validates a username.
///
/// ## Rules
/// - 3 to 50 characters
/// - Letters, digits, hyphens and underscores only
///
/// ## Example
/// ```rust
/// use bazaar_core::validation::validate_username;
///
/// assert!(validate_username("ada_lovelace").is_ok());
/// assert!(validate_username("ab").is_err());
/// assert!(validate_username("has space").is_err());
/// ```
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    let len = username.chars().count();
    if len < USERNAME_MIN {
        return Err(ValidationError::TooShort {
            field: "username".to_string(),
            min: USERNAME_MIN,
        });
    }
    if len > USERNAME_MAX {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: USERNAME_MAX,
        });
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Not empty, at most 254 characters, no whitespace
/// - Exactly one `@` with a non-empty local part
/// - Domain contains a dot that is neither first nor last
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > EMAIL_MAX {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: EMAIL_MAX,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }

    let (local, domain) = match email.split_once('@') {
        Some(parts) => parts,
        None => return Err(invalid("missing '@'")),
    };

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@domain.tld"));
    }

    match domain.rfind('.') {
        Some(dot) if dot > 0 && dot < domain.len() - 1 => Ok(()),
        _ => Err(invalid("domain must contain a dot")),
    }
}

/// Validates a password before it is hashed.
///
/// ## Rules
/// - 8 to 128 characters
pub fn validate_password(password: &str) -> ValidationResult<()> {
    let len = password.chars().count();

    if len < PASSWORD_MIN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: PASSWORD_MIN,
        });
    }
    if len > PASSWORD_MAX {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: PASSWORD_MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a catalog record before it is stored.
///
/// Checks the id, name, price, and stock. Description and image are free text.
///
/// ## Example
/// ```rust
/// use bazaar_core::validation::validate_product;
/// use bazaar_core::{Money, Product, ProductId};
///
/// let laptop = Product::new(ProductId(2), "Laptop", Money::from_cents(120000), 8);
/// assert!(validate_product(&laptop).is_ok());
/// assert!(validate_product(&Product { stock: -1, ..laptop }).is_err());
/// ```
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(product.id)?;
    validate_product_name(&product.name)?;
    validate_price_cents(product.price.cents())?;
    validate_stock(product.stock)
}

// =============================================================================
// Unit Tests
// =============================================================================
