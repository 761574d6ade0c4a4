//! # Report Types
//!
//! Result shapes for the read-only report engine, plus the pure calendar
//! math the engine needs (day windows, Monday-Sunday weeks).
//!
//! The aggregation itself runs in duka-db against the ledger; everything
//! here is plain data so callers (HTTP layers, CLIs) can serialize results
//! without touching the database crate.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{Product, Sale};

// =============================================================================
// Calendar Helpers
// =============================================================================

/// Weekday bucket labels, Monday first, matching [`week_bounds`].
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Returns the UTC instant window `[midnight, next midnight)` covering a
/// calendar date.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let next = date
        .checked_add_days(Days::new(1))
        .unwrap_or(date)
        .and_time(NaiveTime::MIN)
        .and_utc();
    (start, next)
}

/// Returns the instant window for an inclusive date range: midnight of
/// `start` up to (exclusive) midnight after `end`.
pub fn range_bounds(start: NaiveDate, end: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let (from, _) = day_bounds(start);
    let (_, to) = day_bounds(end);
    (from, to)
}

/// Returns the Monday and Sunday of the week containing `anchor`.
pub fn week_bounds(anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = anchor.weekday().num_days_from_monday() as u64;
    let monday = anchor.checked_sub_days(Days::new(offset)).unwrap_or(anchor);
    let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(monday);
    (monday, sunday)
}

// =============================================================================
// Dashboard
// =============================================================================

/// The at-a-glance numbers for the shop dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_products: i64,
    /// Products where quantity ≤ reorder_level.
    pub low_stock: i64,
    pub total_customers: i64,
    pub total_suppliers: i64,
    /// Revenue from sales dated today, in cents.
    pub today_revenue_cents: i64,
    /// Profit from sales dated today, in cents.
    pub today_profit_cents: i64,
    /// Up to 5 most recent sales, newest first.
    pub recent_sales: Vec<Sale>,
    /// Up to 5 products at or below their reorder level.
    pub low_stock_products: Vec<Product>,
}

// =============================================================================
// Sales Report
// =============================================================================

/// Ledger totals over a filtered set of sales.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SalesTotals {
    pub revenue_cents: i64,
    pub profit_cents: i64,
    pub quantity: i64,
    pub sale_count: i64,
}

/// One row of the top-products table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopProduct {
    pub product_id: String,
    pub name: String,
    pub quantity_sold: i64,
    pub revenue_cents: i64,
}

/// Sales over an optional inclusive date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesReport {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// The filtered sales, newest first.
    pub sales: Vec<Sale>,
    pub totals: SalesTotals,
    /// Top 10 products by quantity sold. Ties keep first-encountered
    /// order over the chronological sale stream.
    pub top_products: Vec<TopProduct>,
    /// Revenue per payment method, keyed by the method's canonical name.
    pub payment_breakdown: BTreeMap<String, i64>,
}

// =============================================================================
// Weekly Report
// =============================================================================

/// Totals for a single weekday within a weekly report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekdayBucket {
    /// Weekday label ("Monday" ... "Sunday").
    pub weekday: String,
    pub revenue_cents: i64,
    pub profit_cents: i64,
    pub quantity: i64,
}

impl WeekdayBucket {
    /// An empty bucket for a weekday with no sales.
    pub fn empty(weekday: &str) -> Self {
        WeekdayBucket {
            weekday: weekday.to_string(),
            revenue_cents: 0,
            profit_cents: 0,
            quantity: 0,
        }
    }
}

/// Monday-Sunday breakdown of the week containing the anchor date.
///
/// All seven `days` buckets are always present, zeroed when empty, in
/// Monday-first order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub days: Vec<WeekdayBucket>,
    pub totals: SalesTotals,
    /// Revenue per product category; uncategorized products bucket under
    /// "uncategorized".
    pub category_revenue: BTreeMap<String, i64>,
}

// =============================================================================
// Finance Summary
// =============================================================================

/// Whole-ledger financial position.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FinanceSummary {
    pub total_expenses_cents: i64,
    pub total_revenue_cents: i64,
    pub total_profit_cents: i64,
    /// total_profit − total_expenses. May be negative.
    pub net_profit_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
