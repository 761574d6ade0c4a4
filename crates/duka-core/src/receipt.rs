//! # Receipt Numbers
//!
//! Formatting for the sequential receipt-number scheme.
//!
//! Receipts look like `REC-202608-0042`: a `REC` prefix, the calendar
//! period (`YYYYMM`), and a per-period running sequence starting at 1.
//! The sequence itself is allocated by the ledger from a counter row inside
//! the sale transaction; this module only owns the pure formatting so the
//! scheme is testable without a database.

use chrono::{Datelike, NaiveDate};

/// Prefix shared by every receipt number.
pub const RECEIPT_PREFIX: &str = "REC";

/// Width the per-period sequence is zero-padded to. Sequences past
/// 9999 simply widen; uniqueness does not depend on the padding.
const SEQ_WIDTH: usize = 4;

/// Derives the counter period (`YYYYMM`) for a sale date.
pub fn receipt_period(date: NaiveDate) -> String {
    format!("{:04}{:02}", date.year(), date.month())
}

/// Formats a receipt number from a period and an allocated sequence.
///
/// ```rust
/// use chrono::NaiveDate;
/// use duka_core::receipt::{format_receipt_number, receipt_period};
///
/// let period = receipt_period(NaiveDate::from_ymd_opt(2026, 8, 5).unwrap());
/// assert_eq!(format_receipt_number(&period, 42), "REC-202608-0042");
/// ```
pub fn format_receipt_number(period: &str, seq: i64) -> String {
    format!("{}-{}-{:0width$}", RECEIPT_PREFIX, period, seq, width = SEQ_WIDTH)
}

// =============================================================================
// Unit Tests
// =============================================================================
