//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - CRUD with validated inputs
//! - Low-stock listing for the dashboard
//! - Guarded stock adjustments (restock / correction)
//!
//! Stock decrements that belong to a sale are NOT done here - the sales
//! ledger owns that write so it stays atomic with the ledger append.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use duka_core::validation::{validate_name, validate_new_product, validate_money_cents, validate_non_negative};
use duka_core::{NewProduct, Product, DEFAULT_REORDER_LEVEL};

const PRODUCT_COLUMNS: &str = "id, name, brand, category, buying_price_cents, selling_price_cents, \
     quantity, reorder_level, supplier_id, expiry_date, created_at, updated_at";

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Creates a product: validates the input, assigns a fresh UUID and
    /// timestamps, and inserts the row.
    pub async fn create(&self, input: &NewProduct) -> DbResult<Product> {
        validate_new_product(input)?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            brand: input.brand.clone(),
            category: input.category.clone(),
            buying_price_cents: input.buying_price_cents,
            selling_price_cents: input.selling_price_cents,
            quantity: input.quantity,
            reorder_level: input.reorder_level.unwrap_or(DEFAULT_REORDER_LEVEL),
            supplier_id: input.supplier_id.clone(),
            expiry_date: input.expiry_date,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            "INSERT INTO products (
                id, name, brand, category,
                buying_price_cents, selling_price_cents,
                quantity, reorder_level, supplier_id, expiry_date,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.brand)
        .bind(&product.category)
        .bind(product.buying_price_cents)
        .bind(product.selling_price_cents)
        .bind(product.quantity)
        .bind(product.reorder_level)
        .bind(&product.supplier_id)
        .bind(product.expiry_date)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists the whole catalog, sorted by name.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Lists products with units on the shelf (quantity > 0), the set the
    /// till can actually sell from.
    pub async fn list_in_stock(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE quantity > 0 ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Lists products at or below their reorder level, most depleted first.
    pub async fn list_low_stock(&self, limit: u32) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE quantity <= reorder_level ORDER BY quantity, name LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Updates an existing product, replacing all mutable fields.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        validate_name("name", &product.name)?;
        validate_money_cents("buying_price", product.buying_price_cents)?;
        validate_money_cents("selling_price", product.selling_price_cents)?;
        validate_non_negative("quantity", product.quantity)?;
        validate_non_negative("reorder_level", product.reorder_level)?;

        debug!(id = %product.id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE products SET
                name = ?2,
                brand = ?3,
                category = ?4,
                buying_price_cents = ?5,
                selling_price_cents = ?6,
                quantity = ?7,
                reorder_level = ?8,
                supplier_id = ?9,
                expiry_date = ?10,
                updated_at = ?11
            WHERE id = ?1",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.brand)
        .bind(&product.category)
        .bind(product.buying_price_cents)
        .bind(product.selling_price_cents)
        .bind(product.quantity)
        .bind(product.reorder_level)
        .bind(&product.supplier_id)
        .bind(product.expiry_date)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Adjusts stock by a delta: positive for restocking, negative for
    /// shrinkage corrections. Runs as a guarded update so the quantity
    /// can never go below zero, even under concurrent adjustments.
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> DbResult<Product> {
        debug!(id = %id, delta = %delta, "Adjusting stock");

        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Product", id))?;

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE products
             SET quantity = quantity + ?1, updated_at = ?2
             WHERE id = ?3 AND quantity + ?1 >= 0",
        )
        .bind(delta)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // The guard lost: the delta would push stock below zero.
            return Err(DbError::InsufficientStock {
                name: current.name,
                available: current.quantity,
                requested: -delta,
            });
        }

        let updated = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Deletes a product.
    ///
    /// Blocked with [`DbError::ReferencedBySales`] when the ledger holds
    /// sales for it - history must stay resolvable.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let mut tx = self.pool.begin().await?;

        let references: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sales WHERE product_id = ?1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        if references > 0 {
            return Err(DbError::referenced_by_sales("Product", id));
        }

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        tx.commit().await?;

        Ok(())
    }

    /// Counts products in the catalog.
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
