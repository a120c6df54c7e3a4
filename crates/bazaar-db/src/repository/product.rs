//! # Product Repository
//!
//! Database operations for the catalog.
//!
//! ## Key Operations
//! - Load the whole catalog at startup (`list_all`)
//! - Idempotent, validated writes for seeding (`upsert`)

use sqlx::SqlitePool;
use tracing::debug;

use bazaar_core::validation::validate_product;
use bazaar_core::{Money, Product, ProductId};

use crate::error::DbResult;

/// Row shape of the `products` table.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price_cents: i64,
    image: String,
    stock: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId(row.id),
            name: row.name,
            description: row.description,
            price: Money::from_cents(row.price_cents),
            image: row.image,
            stock: row.stock,
        }
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// repo.upsert(&phone).await?;
/// let catalog = repo.list_all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product, ordered by id.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price_cents, image, stock
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Inserts a product, or overwrites every column of an existing one.
    ///
    /// ## Errors
    /// `DbError::Validation` for a product [`validate_product`] rejects; the
    /// table is left untouched.
    pub async fn upsert(&self, product: &Product) -> DbResult<()> {
        validate_product(product)?;

        debug!(product_id = %product.id, name = %product.name, "Upserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price_cents, image, stock)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                price_cents = excluded.price_cents,
                image = excluded.image,
                stock = excluded.stock
            "#,
        )
        .bind(product.id.0)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(&product.image)
        .bind(product.stock)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Counts total products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
