//! # Sale Repository
//!
//! The append-only transaction ledger.
//!
//! ## Recording a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     SINGLE TRANSACTION                          │
//! │                                                                 │
//! │  1. Load product             → NotFound if absent               │
//! │  2. Check requested ≤ stock  → InsufficientStock                │
//! │  3. Snapshot price, total, profit at sale time                  │
//! │  4. Allocate receipt number from receipt_counters               │
//! │  5. UPDATE products SET quantity = quantity - ?                 │
//! │        WHERE id = ? AND quantity >= ?   ← guarded decrement     │
//! │  6. INSERT INTO sales (...)                                     │
//! │                                                                 │
//! │  COMMIT ← stock decrement and ledger append land together,      │
//! │           or the whole thing rolls back                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The guarded decrement is what makes concurrent sales safe: two callers
//! racing for the last units both pass the read-side check, but only one
//! UPDATE can satisfy `quantity >= ?` - the loser affects zero rows and
//! rolls back with `InsufficientStock`.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use duka_core::receipt::{format_receipt_number, receipt_period};
use duka_core::validation::validate_sale_request;
use duka_core::{Sale, SaleRequest};

const SALE_COLUMNS: &str = "id, product_id, customer_id, quantity, unit_price_cents, \
     total_cents, profit_cents, payment_method, receipt_number, sale_date";

/// Repository for the sales ledger.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale: checks stock, snapshots price and profit, allocates
    /// a receipt number, decrements stock, and appends the ledger row - all
    /// in one transaction.
    ///
    /// ## Errors
    /// * `Validation` - quantity ≤ 0 or missing product id (no I/O runs)
    /// * `NotFound` - unknown product or customer
    /// * `InsufficientStock` - requested more than available (state unchanged)
    /// * `DuplicateReceipt` - receipt uniqueness backstop tripped
    pub async fn record_sale(&self, request: &SaleRequest) -> DbResult<Sale> {
        validate_sale_request(request)?;

        let mut tx = self.pool.begin().await?;

        let product: Option<(String, i64, i64, i64)> = sqlx::query_as(
            "SELECT name, buying_price_cents, selling_price_cents, quantity
             FROM products WHERE id = ?1",
        )
        .bind(&request.product_id)
        .fetch_optional(&mut *tx)
        .await?;

        let (name, buying_price_cents, selling_price_cents, available) =
            product.ok_or_else(|| DbError::not_found("Product", &request.product_id))?;

        if let Some(customer_id) = &request.customer_id {
            let exists: i64 =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE id = ?1)")
                    .bind(customer_id)
                    .fetch_one(&mut *tx)
                    .await?;
            if exists == 0 {
                return Err(DbError::not_found("Customer", customer_id));
            }
        }

        if available < request.quantity {
            return Err(DbError::InsufficientStock {
                name,
                available,
                requested: request.quantity,
            });
        }

        let now = Utc::now();

        // Snapshots: later price edits must not touch this sale.
        let unit_price_cents = selling_price_cents;
        let total_cents = unit_price_cents * request.quantity;
        let profit_cents = (unit_price_cents - buying_price_cents) * request.quantity;

        let receipt_number = next_receipt_number(&mut tx, now).await?;

        let decremented = sqlx::query(
            "UPDATE products
             SET quantity = quantity - ?1, updated_at = ?2
             WHERE id = ?3 AND quantity >= ?1",
        )
        .bind(request.quantity)
        .bind(now)
        .bind(&request.product_id)
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() == 0 {
            // A concurrent sale took the units between our read and write.
            return Err(DbError::InsufficientStock {
                name,
                available,
                requested: request.quantity,
            });
        }

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            product_id: request.product_id.clone(),
            customer_id: request.customer_id.clone(),
            quantity: request.quantity,
            unit_price_cents,
            total_cents,
            profit_cents,
            payment_method: request.payment_method,
            receipt_number,
            sale_date: now,
        };

        debug!(id = %sale.id, receipt_number = %sale.receipt_number, "Inserting sale");

        sqlx::query(
            "INSERT INTO sales (
                id, product_id, customer_id, quantity,
                unit_price_cents, total_cents, profit_cents,
                payment_method, receipt_number, sale_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(&sale.id)
        .bind(&sale.product_id)
        .bind(&sale.customer_id)
        .bind(sale.quantity)
        .bind(sale.unit_price_cents)
        .bind(sale.total_cents)
        .bind(sale.profit_cents)
        .bind(sale.payment_method)
        .bind(&sale.receipt_number)
        .bind(sale.sale_date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            receipt_number = %sale.receipt_number,
            total = %sale.total_cents,
            "Sale recorded"
        );

        Ok(sale)
    }

    /// Gets a sale by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets a sale by its receipt number.
    pub async fn get_by_receipt(&self, receipt_number: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE receipt_number = ?1"
        ))
        .bind(receipt_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Lists the most recent sales, newest first.
    pub async fn recent(&self, limit: u32) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales \
             ORDER BY sale_date DESC, receipt_number DESC LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists all sales for a product, newest first. Backed by the
    /// `sales(product_id)` index.
    pub async fn for_product(&self, product_id: &str) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales \
             WHERE product_id = ?1 ORDER BY sale_date DESC, receipt_number DESC"
        ))
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists all sales for a customer, newest first.
    pub async fn for_customer(&self, customer_id: &str) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales \
             WHERE customer_id = ?1 ORDER BY sale_date DESC, receipt_number DESC"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists sales in the half-open instant window `[from, to)`, oldest
    /// first. Use [`duka_core::reports::day_bounds`] /
    /// [`duka_core::reports::range_bounds`] to build windows from calendar
    /// dates.
    pub async fn between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales \
             WHERE sale_date >= ?1 AND sale_date < ?2 \
             ORDER BY sale_date, receipt_number"
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists sales at or after `from`, oldest first.
    pub async fn since(&self, from: DateTime<Utc>) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales \
             WHERE sale_date >= ?1 ORDER BY sale_date, receipt_number"
        ))
        .bind(from)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists sales strictly before `to`, oldest first.
    pub async fn until(&self, to: DateTime<Utc>) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales \
             WHERE sale_date < ?1 ORDER BY sale_date, receipt_number"
        ))
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists the whole ledger, oldest first.
    pub async fn list_all(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales ORDER BY sale_date, receipt_number"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Counts recorded sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Allocates the next receipt number for the sale's calendar month.
///
/// The counter row is bumped inside the caller's transaction, so a rolled
/// back sale releases its number and concurrent sales serialize on the
/// row write - no two committed sales can share a number.
async fn next_receipt_number(
    tx: &mut SqliteConnection,
    at: DateTime<Utc>,
) -> DbResult<String> {
    let period = receipt_period(at.date_naive());

    let seq: i64 = sqlx::query_scalar(
        "INSERT INTO receipt_counters (period, next_seq) VALUES (?1, 2)
         ON CONFLICT (period) DO UPDATE SET next_seq = receipt_counters.next_seq + 1
         RETURNING next_seq - 1",
    )
    .bind(&period)
    .fetch_one(&mut *tx)
    .await?;

    Ok(format_receipt_number(&period, seq))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use duka_core::{NewCustomer, NewProduct, PaymentMethod, Product};

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_lotion(db: &Database) -> Product {
        db.products()
            .create(&NewProduct {
                name: "Moisturizing Lotion".to_string(),
                brand: Some("Nivea".to_string()),
                category: Some("skincare".to_string()),
                buying_price_cents: 250,
                selling_price_cents: 450,
                quantity: 50,
                reorder_level: Some(15),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    fn cash_sale(product_id: &str, quantity: i64) -> SaleRequest {
        SaleRequest {
            product_id: product_id.to_string(),
            customer_id: None,
            quantity,
            payment_method: PaymentMethod::Cash,
        }
    }

    #[tokio::test]
    async fn test_record_sale_snapshots_totals_and_decrements_stock() {
        let db = setup().await;
        let product = seed_lotion(&db).await;

        let sale = db
            .sales()
            .record_sale(&cash_sale(&product.id, 10))
            .await
            .unwrap();

        assert_eq!(sale.unit_price_cents, 450);
        assert_eq!(sale.total_cents, 4500);
        assert_eq!(sale.profit_cents, 2000);
        assert_eq!(sale.payment_method, PaymentMethod::Cash);

        let fetched = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fetched.quantity, 40);
    }

    #[tokio::test]
    async fn test_insufficient_stock_leaves_state_unchanged() {
        let db = setup().await;
        let product = seed_lotion(&db).await;

        let err = db
            .sales()
            .record_sale(&cash_sale(&product.id, 51))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::InsufficientStock { available: 50, requested: 51, .. }));

        let fetched = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fetched.quantity, 50);
        assert_eq!(db.sales().count().await.unwrap(), 0);

        // The failed attempt consumed no receipt number either.
        let sale = db
            .sales()
            .record_sale(&cash_sale(&product.id, 1))
            .await
            .unwrap();
        assert!(sale.receipt_number.ends_with("-0001"));
    }

    #[tokio::test]
    async fn test_non_positive_quantity_is_rejected() {
        let db = setup().await;
        let product = seed_lotion(&db).await;

        assert!(matches!(
            db.sales().record_sale(&cash_sale(&product.id, 0)).await,
            Err(DbError::Validation(_))
        ));
        assert!(matches!(
            db.sales().record_sale(&cash_sale(&product.id, -2)).await,
            Err(DbError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let db = setup().await;
        let err = db
            .sales()
            .record_sale(&cash_sale(&Uuid::new_v4().to_string(), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_unknown_customer_is_not_found() {
        let db = setup().await;
        let product = seed_lotion(&db).await;

        let request = SaleRequest {
            customer_id: Some(Uuid::new_v4().to_string()),
            ..cash_sale(&product.id, 1)
        };
        let err = db.sales().record_sale(&request).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let fetched = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fetched.quantity, 50);
    }

    #[tokio::test]
    async fn test_receipt_numbers_are_unique_and_sequential() {
        let db = setup().await;
        let product = seed_lotion(&db).await;

        let mut receipts = Vec::new();
        for _ in 0..5 {
            let sale = db
                .sales()
                .record_sale(&cash_sale(&product.id, 1))
                .await
                .unwrap();
            receipts.push(sale.receipt_number);
        }

        let mut deduped = receipts.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), receipts.len());

        assert!(receipts[0].ends_with("-0001"));
        assert!(receipts[4].ends_with("-0005"));

        let period = receipt_period(Utc::now().date_naive());
        assert_eq!(receipts[0], format!("REC-{}-0001", period));
    }

    #[tokio::test]
    async fn test_sale_totals_survive_price_edits() {
        let db = setup().await;
        let mut product = seed_lotion(&db).await;

        let sale = db
            .sales()
            .record_sale(&cash_sale(&product.id, 2))
            .await
            .unwrap();

        product = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        product.selling_price_cents = 900;
        product.buying_price_cents = 500;
        db.products().update(&product).await.unwrap();

        let fetched = db.sales().get_by_id(&sale.id).await.unwrap().unwrap();
        assert_eq!(fetched.unit_price_cents, 450);
        assert_eq!(fetched.total_cents, 900);
        assert_eq!(fetched.profit_cents, 400);
    }

    #[tokio::test]
    async fn test_sale_links_customer() {
        let db = setup().await;
        let product = seed_lotion(&db).await;
        let customer = db
            .customers()
            .create(&NewCustomer {
                name: "Grace Atieno".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let request = SaleRequest {
            customer_id: Some(customer.id.clone()),
            ..cash_sale(&product.id, 1)
        };
        db.sales().record_sale(&request).await.unwrap();

        let purchases = db.sales().for_customer(&customer.id).await.unwrap();
        assert_eq!(purchases.len(), 1);

        // And the customer is now delete-blocked.
        assert!(matches!(
            db.customers().delete(&customer.id).await,
            Err(DbError::ReferencedBySales { .. })
        ));
    }

    #[tokio::test]
    async fn test_product_with_sales_is_delete_blocked() {
        let db = setup().await;
        let product = seed_lotion(&db).await;
        db.sales()
            .record_sale(&cash_sale(&product.id, 1))
            .await
            .unwrap();

        assert!(matches!(
            db.products().delete(&product.id).await,
            Err(DbError::ReferencedBySales { .. })
        ));
    }

    #[tokio::test]
    async fn test_for_product_and_recent() {
        let db = setup().await;
        let product = seed_lotion(&db).await;

        for _ in 0..3 {
            db.sales()
                .record_sale(&cash_sale(&product.id, 1))
                .await
                .unwrap();
        }

        assert_eq!(db.sales().for_product(&product.id).await.unwrap().len(), 3);

        let recent = db.sales().recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        // Newest first: the highest sequence leads.
        assert!(recent[0].receipt_number > recent[1].receipt_number);
    }

    #[tokio::test]
    async fn test_empty_ledger_queries() {
        let db = setup().await;
        assert!(db.sales().recent(5).await.unwrap().is_empty());
        assert!(db.sales().list_all().await.unwrap().is_empty());
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }
}
