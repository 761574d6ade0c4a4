//! # duka-db: Database Layer for Duka
//!
//! This crate provides storage for the Duka retail manager. It uses SQLite
//! for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Duka Data Flow                           │
//! │                                                                 │
//! │  External caller (HTTP handler, CLI, seed)                      │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                  duka-db (THIS CRATE)                   │   │
//! │  │                                                         │   │
//! │  │  ┌───────────┐  ┌──────────────┐  ┌───────────────┐    │   │
//! │  │  │ Database  │  │ Repositories │  │  Migrations   │    │   │
//! │  │  │ (pool.rs) │◄─│ product/sale │  │  (embedded)   │    │   │
//! │  │  │           │  │ customer/... │  │ 001_schema.sql│    │   │
//! │  │  └───────────┘  └──────────────┘  └───────────────┘    │   │
//! │  │                 ┌──────────────┐                       │   │
//! │  │                 │ ReportEngine │  read-only sums       │   │
//! │  │                 │ (reports.rs) │  over the ledger      │   │
//! │  │                 └──────────────┘                       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  SQLite database file (or :memory: in tests)                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database and domain error types
//! - [`repository`] - Repository implementations (product, supplier, ...)
//! - [`reports`] - Read-only report engine
//!
//! ## Usage
//!
//! ```rust,ignore
//! use duka_db::{Database, DbConfig};
//! use duka_core::{PaymentMethod, SaleRequest};
//!
//! let db = Database::new(DbConfig::new("path/to/duka.db")).await?;
//!
//! let sale = db.sales().record_sale(&SaleRequest {
//!     product_id,
//!     customer_id: None,
//!     quantity: 2,
//!     payment_method: PaymentMethod::Cash,
//! }).await?;
//!
//! let dashboard = db.reports().dashboard_summary().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod reports;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use reports::ReportRepository;
pub use repository::customer::CustomerRepository;
pub use repository::expense::ExpenseRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::supplier::SupplierRepository;
