//! # Supplier Repository
//!
//! Database operations for the supplier roster.
//!
//! Suppliers are advisory bookkeeping: products point at them, but deleting
//! a supplier only detaches its products (`ON DELETE SET NULL`) rather than
//! blocking.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use duka_core::validation::{validate_name, validate_new_supplier};
use duka_core::{NewSupplier, Supplier};

const SUPPLIER_COLUMNS: &str =
    "id, name, contact, email, address, products_supplied, delivery_time, credit_terms, created_at";

/// Repository for supplier database operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Creates a supplier from validated input.
    pub async fn create(&self, input: &NewSupplier) -> DbResult<Supplier> {
        validate_new_supplier(input)?;

        let supplier = Supplier {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            contact: input.contact.clone(),
            email: input.email.clone(),
            address: input.address.clone(),
            products_supplied: input.products_supplied.clone(),
            delivery_time: input.delivery_time.clone(),
            credit_terms: input.credit_terms.clone(),
            created_at: Utc::now(),
        };

        debug!(id = %supplier.id, name = %supplier.name, "Inserting supplier");

        sqlx::query(
            "INSERT INTO suppliers (
                id, name, contact, email, address,
                products_supplied, delivery_time, credit_terms, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&supplier.id)
        .bind(&supplier.name)
        .bind(&supplier.contact)
        .bind(&supplier.email)
        .bind(&supplier.address)
        .bind(&supplier.products_supplied)
        .bind(&supplier.delivery_time)
        .bind(&supplier.credit_terms)
        .bind(supplier.created_at)
        .execute(&self.pool)
        .await?;

        Ok(supplier)
    }

    /// Gets a supplier by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(supplier)
    }

    /// Lists all suppliers, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {SUPPLIER_COLUMNS} FROM suppliers ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(suppliers)
    }

    /// Updates an existing supplier, replacing all mutable fields.
    pub async fn update(&self, supplier: &Supplier) -> DbResult<()> {
        validate_name("name", &supplier.name)?;

        debug!(id = %supplier.id, "Updating supplier");

        let result = sqlx::query(
            "UPDATE suppliers SET
                name = ?2,
                contact = ?3,
                email = ?4,
                address = ?5,
                products_supplied = ?6,
                delivery_time = ?7,
                credit_terms = ?8
            WHERE id = ?1",
        )
        .bind(&supplier.id)
        .bind(&supplier.name)
        .bind(&supplier.contact)
        .bind(&supplier.email)
        .bind(&supplier.address)
        .bind(&supplier.products_supplied)
        .bind(&supplier.delivery_time)
        .bind(&supplier.credit_terms)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", &supplier.id));
        }

        Ok(())
    }

    /// Deletes a supplier. Products pointing at it are detached, not
    /// deleted (the catalog keeps its rows, supplier_id goes NULL).
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting supplier");

        let result = sqlx::query("DELETE FROM suppliers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", id));
        }

        Ok(())
    }

    /// Counts suppliers on the roster.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM suppliers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use duka_core::NewProduct;

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn beauty_supplies() -> NewSupplier {
        NewSupplier {
            name: "Beauty Supplies Kenya".to_string(),
            contact: Some("John Mwangi".to_string()),
            email: Some("john@beautysupplies.co.ke".to_string()),
            address: Some("Mombasa Road, Nairobi".to_string()),
            products_supplied: Some("Lotions, Creams, Hair Products".to_string()),
            delivery_time: Some("3-5 days".to_string()),
            credit_terms: Some("Net 30".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = setup().await;
        let created = db.suppliers().create(&beauty_supplies()).await.unwrap();

        let fetched = db
            .suppliers()
            .get_by_id(&created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.name, "Beauty Supplies Kenya");
        assert_eq!(fetched.credit_terms.as_deref(), Some("Net 30"));
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let db = setup().await;
        let nameless = NewSupplier {
            name: String::new(),
            ..beauty_supplies()
        };
        assert!(matches!(
            db.suppliers().create(&nameless).await,
            Err(DbError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update() {
        let db = setup().await;
        let mut supplier = db.suppliers().create(&beauty_supplies()).await.unwrap();

        supplier.delivery_time = Some("1-2 days".to_string());
        db.suppliers().update(&supplier).await.unwrap();

        let fetched = db
            .suppliers()
            .get_by_id(&supplier.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.delivery_time.as_deref(), Some("1-2 days"));
    }

    #[tokio::test]
    async fn test_delete_detaches_products() {
        let db = setup().await;
        let supplier = db.suppliers().create(&beauty_supplies()).await.unwrap();

        let product = db
            .products()
            .create(&NewProduct {
                name: "Body Lotion".to_string(),
                buying_price_cents: 180,
                selling_price_cents: 350,
                quantity: 60,
                supplier_id: Some(supplier.id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();

        db.suppliers().delete(&supplier.id).await.unwrap();

        // The product survives with its supplier link nulled.
        let fetched = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fetched.supplier_id, None);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let db = setup().await;
        assert!(matches!(
            db.suppliers().delete("no-such-id").await,
            Err(DbError::NotFound { .. })
        ));
    }
}
