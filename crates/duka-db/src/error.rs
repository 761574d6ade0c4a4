//! # Database Error Types
//!
//! Error types for storage and ledger operations.
//!
//! ## Error Flow
//! ```text
//! sqlx::Error ──► DbError (this module) ──► caller
//!                     ▲
//! ValidationError ────┘  (duka-core, via #[from])
//! ```
//!
//! The domain errors a caller is expected to match on — `NotFound`,
//! `InsufficientStock`, `DuplicateReceipt`, `ReferencedBySales`,
//! `Validation` — live alongside the storage failures so every repository
//! method returns one `DbResult<T>`.

use duka_core::ValidationError;
use thiserror::Error;

/// Storage and ledger operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in the database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A sale asked for more units than are on the shelf.
    ///
    /// Also raised when a concurrent sale wins the race for the last units:
    /// the guarded decrement affects zero rows and the transaction rolls
    /// back with state untouched.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Receipt number collision.
    ///
    /// The counter allocation makes this unreachable in normal operation;
    /// the UNIQUE index surfaces it if the counter table is ever tampered
    /// with or restored from a mismatched backup.
    #[error("Duplicate receipt number: {receipt_number}")]
    DuplicateReceipt { receipt_number: String },

    /// Delete blocked: historical sales reference this entity.
    #[error("{entity} {id} has recorded sales and cannot be deleted")]
    ReferencedBySales { entity: String, id: String },

    /// Input validation failed before any I/O ran.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Unique constraint violation (other than receipt numbers).
    #[error("Duplicate {field}: value already exists")]
    UniqueViolation { field: String },

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a ReferencedBySales error.
    pub fn referenced_by_sales(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::ReferencedBySales {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// SQLite reports constraint failures as message text, so the mapping
/// inspects the message:
///
/// ```text
/// "UNIQUE constraint failed: sales.receipt_number" → DuplicateReceipt
/// "UNIQUE constraint failed: <table>.<column>"     → UniqueViolation
/// "FOREIGN KEY constraint failed"                  → ForeignKeyViolation
/// RowNotFound                                      → NotFound
/// PoolTimedOut                                     → PoolExhausted
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();

                    if field.starts_with("sales.receipt_number") {
                        DbError::DuplicateReceipt {
                            receipt_number: "unknown".to_string(),
                        }
                    } else {
                        DbError::UniqueViolation { field }
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DbError::InsufficientStock {
            name: "Moisturizing Lotion".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Moisturizing Lotion: available 3, requested 5"
        );

        let err = DbError::not_found("Product", "abc-123");
        assert_eq!(err.to_string(), "Product not found: abc-123");

        let err = DbError::referenced_by_sales("Customer", "c-9");
        assert_eq!(
            err.to_string(),
            "Customer c-9 has recorded sales and cannot be deleted"
        );
    }

    #[test]
    fn test_validation_converts_to_db_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let db_err: DbError = validation_err.into();
        assert!(matches!(db_err, DbError::Validation(_)));
    }
}
