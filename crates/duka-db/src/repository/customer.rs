//! # Customer Repository
//!
//! Database operations for the customer roster.
//!
//! Unlike suppliers, customers are referenced by the sales ledger, so a
//! customer with purchase history cannot be deleted.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use duka_core::validation::{validate_name, validate_new_customer};
use duka_core::{Customer, NewCustomer};

const CUSTOMER_COLUMNS: &str = "id, name, phone, email, skin_type, hair_type, notes, created_at";

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Creates a customer from validated input.
    pub async fn create(&self, input: &NewCustomer) -> DbResult<Customer> {
        validate_new_customer(input)?;

        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            phone: input.phone.clone(),
            email: input.email.clone(),
            skin_type: input.skin_type.clone(),
            hair_type: input.hair_type.clone(),
            notes: input.notes.clone(),
            created_at: Utc::now(),
        };

        debug!(id = %customer.id, name = %customer.name, "Inserting customer");

        sqlx::query(
            "INSERT INTO customers (
                id, name, phone, email, skin_type, hair_type, notes, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(&customer.skin_type)
        .bind(&customer.hair_type)
        .bind(&customer.notes)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Gets a customer by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Lists all customers, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Updates an existing customer, replacing all mutable fields.
    pub async fn update(&self, customer: &Customer) -> DbResult<()> {
        validate_name("name", &customer.name)?;

        debug!(id = %customer.id, "Updating customer");

        let result = sqlx::query(
            "UPDATE customers SET
                name = ?2,
                phone = ?3,
                email = ?4,
                skin_type = ?5,
                hair_type = ?6,
                notes = ?7
            WHERE id = ?1",
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(&customer.skin_type)
        .bind(&customer.hair_type)
        .bind(&customer.notes)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", &customer.id));
        }

        Ok(())
    }

    /// Deletes a customer.
    ///
    /// Blocked with [`DbError::ReferencedBySales`] when the ledger holds
    /// sales for them.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting customer");

        let mut tx = self.pool.begin().await?;

        let references: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sales WHERE customer_id = ?1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        if references > 0 {
            return Err(DbError::referenced_by_sales("Customer", id));
        }

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        tx.commit().await?;

        Ok(())
    }

    /// Counts customers on the roster.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
