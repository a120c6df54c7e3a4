//! # Default Catalog
//!
//! The six products a fresh storefront starts with.
//!
//! ```text
//! id  name                 price     stock
//! ──  ───────────────────  ────────  ─────
//!  1  Smartphone            $699.99     15
//!  2  Laptop               $1200.00      8
//!  3  Wireless Headphones   $199.50     30
//!  4  bag                   $500.00      5
//!  5  lacoste               $300.00     22
//!  6  jeans                 $250.00      1
//! ```

use tracing::info;

use bazaar_core::{Money, Product, ProductId};

use crate::error::DbResult;
use crate::pool::Database;

/// (id, name, price cents, stock, description, image)
const DEFAULT_PRODUCTS: &[(i64, &str, i64, i64, &str, &str)] = &[
    (
        1,
        "Smartphone",
        69999,
        15,
        "A great phone with a fantastic camera.",
        "https://example.com/smartphone.jpg",
    ),
    (
        2,
        "Laptop",
        120000,
        8,
        "Powerful laptop for work and gaming.",
        "https://example.com/laptop.jpg",
    ),
    (
        3,
        "Wireless Headphones",
        19950,
        30,
        "Noise-cancelling headphones with long battery life.",
        "https://example.com/headphones.jpg",
    ),
    (4, "bag", 50000, 5, "Louis Vuitton - black", "https://example.com/bag.jpg"),
    (5, "lacoste", 30000, 22, "Polo - Blue", "https://example.com/lacoste.jpg"),
    (6, "jeans", 25000, 1, "Baggy - Seablue", "https://example.com/jeans.jpg"),
];

/// Returns the default catalog.
pub fn default_catalog() -> Vec<Product> {
    DEFAULT_PRODUCTS
        .iter()
        .map(|&(id, name, cents, stock, description, image)| {
            Product::new(ProductId(id), name, Money::from_cents(cents), stock)
                .with_description(description)
                .with_image(image)
        })
        .collect()
}

/// Writes the default catalog if the products table is empty.
///
/// ## Returns
/// Number of products inserted (0 when the catalog already had data).
pub async fn seed_default_catalog(db: &Database) -> DbResult<usize> {
    let existing = db.products().count().await?;
    if existing > 0 {
        info!(existing, "Catalog already populated, skipping seed");
        return Ok(0);
    }

    let products = default_catalog();
    let repo = db.products();
    for product in &products {
        repo.upsert(product).await?;
    }

    info!(count = products.len(), "Seeded default catalog");
    Ok(products.len())
}
