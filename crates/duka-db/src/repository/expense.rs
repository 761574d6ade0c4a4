//! # Expense Repository
//!
//! Database operations for the expense ledger: rent, transport, utilities,
//! stock purchases. Expenses stand alone - nothing references them.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use duka_core::validation::{validate_money_cents, validate_new_expense};
use duka_core::{Expense, NewExpense};

const EXPENSE_COLUMNS: &str = "id, date, category, description, amount_cents, created_at";

/// Repository for expense database operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

impl ExpenseRepository {
    /// Creates a new ExpenseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ExpenseRepository { pool }
    }

    /// Records an expense from validated input.
    pub async fn create(&self, input: &NewExpense) -> DbResult<Expense> {
        validate_new_expense(input)?;

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            date: input.date,
            category: input.category.clone(),
            description: input.description.clone(),
            amount_cents: input.amount_cents,
            created_at: Utc::now(),
        };

        debug!(id = %expense.id, amount = %expense.amount_cents, "Inserting expense");

        sqlx::query(
            "INSERT INTO expenses (
                id, date, category, description, amount_cents, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&expense.id)
        .bind(expense.date)
        .bind(&expense.category)
        .bind(&expense.description)
        .bind(expense.amount_cents)
        .bind(expense.created_at)
        .execute(&self.pool)
        .await?;

        Ok(expense)
    }

    /// Gets an expense by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Expense>> {
        let expense = sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(expense)
    }

    /// Lists all expenses, most recent date first.
    pub async fn list_all(&self) -> DbResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses ORDER BY date DESC, created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    /// Updates an existing expense, replacing all mutable fields.
    pub async fn update(&self, expense: &Expense) -> DbResult<()> {
        validate_money_cents("amount", expense.amount_cents)?;

        debug!(id = %expense.id, "Updating expense");

        let result = sqlx::query(
            "UPDATE expenses SET
                date = ?2,
                category = ?3,
                description = ?4,
                amount_cents = ?5
            WHERE id = ?1",
        )
        .bind(&expense.id)
        .bind(expense.date)
        .bind(&expense.category)
        .bind(&expense.description)
        .bind(expense.amount_cents)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Expense", &expense.id));
        }

        Ok(())
    }

    /// Deletes an expense.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting expense");

        let result = sqlx::query("DELETE FROM expenses WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Expense", id));
        }

        Ok(())
    }

    /// Sums all expense amounts in cents. Zero for an empty ledger.
    pub async fn total_amount(&self) -> DbResult<i64> {
        let total: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(amount_cents), 0) FROM expenses")
                .fetch_one(&self.pool)
                .await?;

        Ok(total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
