//! # duka-core: Pure Business Logic for Duka
//!
//! This crate is the heart of the Duka retail manager. It contains all
//! business logic as pure functions and types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Duka Architecture                          │
//! │                                                                 │
//! │  External caller (HTTP handler, CLI, ...)                       │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │               ★ duka-core (THIS CRATE) ★                │   │
//! │  │                                                         │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────────┐   │   │
//! │  │  │  types  │ │  money  │ │ receipt  │ │ validation │   │   │
//! │  │  │ Product │ │  Money  │ │ REC-...  │ │   rules    │   │   │
//! │  │  │  Sale   │ │ (cents) │ │ numbers  │ │   checks   │   │   │
//! │  │  └─────────┘ └─────────┘ └──────────┘ └────────────┘   │   │
//! │  │                                                         │   │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS     │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  duka-db (SQLite storage, repositories, report engine)          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Supplier, Customer, Sale, Expense)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`receipt`] - Receipt number formatting
//! - [`reports`] - Report result types and calendar helpers
//! - [`error`] - Validation error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are in cents (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod receipt;
pub mod reports;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default reorder level applied when a product is created without one.
///
/// A product whose quantity drops to or below its reorder level is flagged
/// as low stock on the dashboard.
pub const DEFAULT_REORDER_LEVEL: i64 = 10;
