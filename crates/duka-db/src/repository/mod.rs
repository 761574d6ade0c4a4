//! # Repository Module
//!
//! Database repository implementations for Duka.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Caller                                                         │
//! │    │                                                            │
//! │    │  db.sales().record_sale(&request)                          │
//! │    ▼                                                            │
//! │  SaleRepository                                                 │
//! │  ├── record_sale(&self, request)   ← single transaction        │
//! │  ├── get_by_id(&self, id)                                       │
//! │  ├── for_product(&self, product_id)                             │
//! │  └── between(&self, start, end)                                 │
//! │    │                                                            │
//! │    ▼  SQL                                                       │
//! │  SQLite                                                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each repository owns the SQL for one table; multi-table invariants
//! (stock decrement + ledger append) run inside one transaction in the
//! repository that owns the write.
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Catalog CRUD, stock adjustments
//! - [`supplier::SupplierRepository`] - Supplier roster CRUD
//! - [`customer::CustomerRepository`] - Customer roster CRUD
//! - [`expense::ExpenseRepository`] - Expense ledger CRUD
//! - [`sale::SaleRepository`] - The append-only transaction ledger

pub mod customer;
pub mod expense;
pub mod product;
pub mod sale;
pub mod supplier;
