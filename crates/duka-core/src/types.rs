//! # Domain Types
//!
//! Core domain types used throughout Duka.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Domain Types                             │
//! │                                                                 │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐        │
//! │  │   Product    │   │     Sale     │   │   Customer   │        │
//! │  │ ──────────── │   │ ──────────── │   │ ──────────── │        │
//! │  │ id (UUID)    │   │ id (UUID)    │   │ id (UUID)    │        │
//! │  │ prices cents │◄──│ product_id   │   │ skin_type    │        │
//! │  │ quantity     │   │ customer_id ─┼──►│ hair_type    │        │
//! │  │ reorder lvl  │   │ receipt_no   │   └──────────────┘        │
//! │  │ supplier_id ─┼─┐ │ snapshots    │                           │
//! │  └──────────────┘ │ └──────────────┘   ┌──────────────┐        │
//! │                   │                    │   Expense    │        │
//! │  ┌──────────────┐ │                    │ ──────────── │        │
//! │  │   Supplier   │◄┘                    │ date, amount │        │
//! │  └──────────────┘                      └──────────────┘        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sales never hold back-references; the ledger is queried through the
//! indexed `for_product` / `for_customer` operations instead.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid for.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// Mobile money transfer (M-Pesa and friends).
    Mobile,
}

impl PaymentMethod {
    /// Canonical lowercase name, used as the key in report breakdowns.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Mobile => "mobile",
            PaymentMethod::Card => "card",
        }
    }

    /// Parses a user-supplied method name. Accepts the common aliases the
    /// till staff actually type.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "cash" => Some(PaymentMethod::Cash),
            "card" | "credit" | "debit" => Some(PaymentMethod::Card),
            "mobile" | "mpesa" | "m-pesa" => Some(PaymentMethod::Mobile),
            _ => None,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product on the shelf.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Brand label (e.g. "Nivea").
    pub brand: Option<String>,

    /// Category slug (e.g. "skincare", "makeup", "hair", "baby").
    pub category: Option<String>,

    /// What the shop paid per unit, in cents.
    pub buying_price_cents: i64,

    /// What the shop charges per unit, in cents.
    pub selling_price_cents: i64,

    /// Units currently in stock. Never negative.
    pub quantity: i64,

    /// Stock level at or below which the product counts as low stock.
    pub reorder_level: i64,

    /// Supplier this product is usually restocked from.
    pub supplier_id: Option<String>,

    /// Expiry date for perishables.
    pub expiry_date: Option<NaiveDate>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the buying price as Money.
    #[inline]
    pub fn buying_price(&self) -> Money {
        Money::from_cents(self.buying_price_cents)
    }

    /// Returns the selling price as Money.
    #[inline]
    pub fn selling_price(&self) -> Money {
        Money::from_cents(self.selling_price_cents)
    }

    /// Per-unit profit basis: selling price minus buying price.
    #[inline]
    pub fn margin(&self) -> Money {
        self.selling_price() - self.buying_price()
    }

    /// A product is low stock when quantity has fallen to its reorder level.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }

    /// Whether the product has expired as of the given date.
    pub fn is_expired(&self, on: NaiveDate) -> bool {
        match self.expiry_date {
            Some(expiry) => expiry < on,
            None => false,
        }
    }
}

/// Input for creating a product. The store assigns id and timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub buying_price_cents: i64,
    pub selling_price_cents: i64,
    pub quantity: i64,
    /// Defaults to [`crate::DEFAULT_REORDER_LEVEL`] when `None`.
    pub reorder_level: Option<i64>,
    pub supplier_id: Option<String>,
    pub expiry_date: Option<NaiveDate>,
}

// =============================================================================
// Supplier
// =============================================================================

/// A supplier the shop restocks from. Everything beyond the name is
/// free-form contact/terms bookkeeping.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub products_supplied: Option<String>,
    pub delivery_time: Option<String>,
    pub credit_terms: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a supplier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub products_supplied: Option<String>,
    pub delivery_time: Option<String>,
    pub credit_terms: Option<String>,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer on the shop's roster, with the beauty-profile fields the
/// till staff use for recommendations.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub skin_type: Option<String>,
    pub hair_type: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub skin_type: Option<String>,
    pub hair_type: Option<String>,
    pub notes: Option<String>,
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale: one product, one quantity, one payment.
///
/// `unit_price_cents` and `profit_cents` are snapshots taken at sale time.
/// Editing the product's prices later must not change recorded sales.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    pub product_id: String,
    pub customer_id: Option<String>,
    pub quantity: i64,
    /// Selling price per unit at time of sale (frozen).
    pub unit_price_cents: i64,
    /// unit_price × quantity.
    pub total_cents: i64,
    /// (unit_price − buying price at time of sale) × quantity.
    pub profit_cents: i64,
    pub payment_method: PaymentMethod,
    /// Human-readable unique receipt identifier, e.g. `REC-202608-0042`.
    pub receipt_number: String,
    pub sale_date: DateTime<Utc>,
}

impl Sale {
    /// Returns the frozen unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Returns the sale profit as Money.
    #[inline]
    pub fn profit(&self) -> Money {
        Money::from_cents(self.profit_cents)
    }
}

/// Input for recording a sale. Price, total, profit and receipt number are
/// derived by the ledger, never supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRequest {
    pub product_id: String,
    pub customer_id: Option<String>,
    pub quantity: i64,
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Expense
// =============================================================================

/// A standalone outgoing: rent, transport, utilities, stock purchases.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    /// Calendar date the expense applies to (not the entry timestamp).
    pub date: NaiveDate,
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Returns the expense amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// Input for recording an expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(quantity: i64, reorder_level: i64) -> Product {
        let now = Utc::now();
        Product {
            id: "p-1".to_string(),
            name: "Moisturizing Lotion".to_string(),
            brand: Some("Nivea".to_string()),
            category: Some("skincare".to_string()),
            buying_price_cents: 250,
            selling_price_cents: 450,
            quantity,
            reorder_level,
            supplier_id: None,
            expiry_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_margin() {
        let p = product(50, 15);
        assert_eq!(p.margin().cents(), 200);
    }

    #[test]
    fn test_low_stock_boundary() {
        assert!(product(15, 15).is_low_stock());
        assert!(product(0, 15).is_low_stock());
        assert!(!product(16, 15).is_low_stock());
    }

    #[test]
    fn test_is_expired() {
        let mut p = product(10, 5);
        let today = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        assert!(!p.is_expired(today));

        p.expiry_date = NaiveDate::from_ymd_opt(2026, 8, 4);
        assert!(p.is_expired(today));

        p.expiry_date = Some(today);
        assert!(!p.is_expired(today));
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!(PaymentMethod::parse("cash"), Some(PaymentMethod::Cash));
        assert_eq!(PaymentMethod::parse(" M-Pesa "), Some(PaymentMethod::Mobile));
        assert_eq!(PaymentMethod::parse("debit"), Some(PaymentMethod::Card));
        assert_eq!(PaymentMethod::parse("cheque"), None);
    }

    #[test]
    fn test_payment_method_names() {
        assert_eq!(PaymentMethod::Cash.as_str(), "cash");
        assert_eq!(PaymentMethod::Card.as_str(), "card");
        assert_eq!(PaymentMethod::Mobile.as_str(), "mobile");
    }
}
