//! # Report Engine
//!
//! Read-only aggregation over the sales ledger, the expense ledger, and the
//! catalog. Nothing here ever writes.
//!
//! Counts and sums run in SQL (`COALESCE` keeps empty ledgers at zero);
//! the weekday and top-product bucketing runs in Rust over the
//! chronologically ordered sale stream, which is also what pins down the
//! top-product tie-break: first encountered wins.

use chrono::{Datelike, NaiveDate, Utc};
use sqlx::SqlitePool;
use std::collections::{BTreeMap, HashMap};

use crate::error::DbResult;
use crate::repository::product::ProductRepository;
use crate::repository::sale::SaleRepository;
use duka_core::reports::{
    day_bounds, range_bounds, week_bounds, DashboardSummary, FinanceSummary, SalesReport,
    SalesTotals, TopProduct, WeekdayBucket, WeeklyReport, WEEKDAY_NAMES,
};
use duka_core::Sale;

/// How many rows the dashboard lists for recent sales and low stock.
const DASHBOARD_LIST_LIMIT: u32 = 5;

/// How many products the sales report ranks.
const TOP_PRODUCTS_LIMIT: usize = 10;

/// Read-only report engine over the shop's ledgers.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    /// Dashboard summary for the current UTC date.
    pub async fn dashboard_summary(&self) -> DbResult<DashboardSummary> {
        self.dashboard_summary_on(Utc::now().date_naive()).await
    }

    /// Dashboard summary with an injectable "today", for callers in other
    /// timezones and for deterministic tests.
    pub async fn dashboard_summary_on(&self, today: NaiveDate) -> DbResult<DashboardSummary> {
        let total_products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        let low_stock: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE quantity <= reorder_level")
                .fetch_one(&self.pool)
                .await?;

        let total_customers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        let total_suppliers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM suppliers")
            .fetch_one(&self.pool)
            .await?;

        let (from, to) = day_bounds(today);
        let (today_revenue_cents, today_profit_cents): (i64, i64) = sqlx::query_as(
            "SELECT COALESCE(SUM(total_cents), 0), COALESCE(SUM(profit_cents), 0)
             FROM sales WHERE sale_date >= ?1 AND sale_date < ?2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        let recent_sales = SaleRepository::new(self.pool.clone())
            .recent(DASHBOARD_LIST_LIMIT)
            .await?;
        let low_stock_products = ProductRepository::new(self.pool.clone())
            .list_low_stock(DASHBOARD_LIST_LIMIT)
            .await?;

        Ok(DashboardSummary {
            total_products,
            low_stock,
            total_customers,
            total_suppliers,
            today_revenue_cents,
            today_profit_cents,
            recent_sales,
            low_stock_products,
        })
    }

    // =========================================================================
    // Sales Report
    // =========================================================================

    /// Sales report over an optional inclusive date range.
    ///
    /// `start` bounds from midnight of that day, `end` up to (exclusive)
    /// midnight after it; either side may be open.
    pub async fn sales_report(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> DbResult<SalesReport> {
        let sales = self.sales_in_range(start, end).await?;

        let totals = sum_totals(&sales);
        let payment_breakdown = payment_breakdown(&sales);
        let top_products = self.rank_top_products(&sales).await?;

        // The report lists newest first; aggregation consumed oldest first.
        let mut sales = sales;
        sales.reverse();

        Ok(SalesReport {
            start,
            end,
            sales,
            totals,
            top_products,
            payment_breakdown,
        })
    }

    /// Fetches sales chronologically, bounded by the optional date range.
    async fn sales_in_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> DbResult<Vec<Sale>> {
        let repo = SaleRepository::new(self.pool.clone());

        match (start, end) {
            (Some(s), Some(e)) => {
                let (from, to) = range_bounds(s, e);
                repo.between(from, to).await
            }
            (Some(s), None) => {
                let (from, _) = day_bounds(s);
                repo.since(from).await
            }
            (None, Some(e)) => {
                let (_, to) = day_bounds(e);
                repo.until(to).await
            }
            (None, None) => repo.list_all().await,
        }
    }

    /// Ranks products by quantity sold over the given (chronological) sale
    /// stream. Ties keep first-encountered order: the accumulator preserves
    /// insertion order and the sort is stable.
    async fn rank_top_products(&self, sales: &[Sale]) -> DbResult<Vec<TopProduct>> {
        let names = self.product_names().await?;

        let mut order: Vec<String> = Vec::new();
        let mut acc: HashMap<String, (i64, i64)> = HashMap::new();

        for sale in sales {
            let entry = acc.entry(sale.product_id.clone()).or_insert_with(|| {
                order.push(sale.product_id.clone());
                (0, 0)
            });
            entry.0 += sale.quantity;
            entry.1 += sale.total_cents;
        }

        let mut ranked: Vec<TopProduct> = order
            .into_iter()
            .map(|product_id| {
                let (quantity_sold, revenue_cents) = acc[&product_id];
                let name = names
                    .get(&product_id)
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string());
                TopProduct {
                    product_id,
                    name,
                    quantity_sold,
                    revenue_cents,
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.quantity_sold.cmp(&a.quantity_sold));
        ranked.truncate(TOP_PRODUCTS_LIMIT);

        Ok(ranked)
    }

    // =========================================================================
    // Weekly Report
    // =========================================================================

    /// Weekly report for the Monday-Sunday week containing `anchor`.
    pub async fn weekly_report(&self, anchor: NaiveDate) -> DbResult<WeeklyReport> {
        let (week_start, week_end) = week_bounds(anchor);
        let (from, to) = range_bounds(week_start, week_end);

        let sales = SaleRepository::new(self.pool.clone()).between(from, to).await?;
        let categories = self.product_categories().await?;

        let mut days: Vec<WeekdayBucket> = WEEKDAY_NAMES
            .iter()
            .map(|name| WeekdayBucket::empty(name))
            .collect();
        let mut category_revenue: BTreeMap<String, i64> = BTreeMap::new();

        for sale in &sales {
            let index = sale.sale_date.date_naive().weekday().num_days_from_monday() as usize;
            let bucket = &mut days[index];
            bucket.revenue_cents += sale.total_cents;
            bucket.profit_cents += sale.profit_cents;
            bucket.quantity += sale.quantity;

            let category = categories
                .get(&sale.product_id)
                .and_then(|c| c.clone())
                .unwrap_or_else(|| "uncategorized".to_string());
            *category_revenue.entry(category).or_insert(0) += sale.total_cents;
        }

        let totals = sum_totals(&sales);

        Ok(WeeklyReport {
            week_start,
            week_end,
            days,
            totals,
            category_revenue,
        })
    }

    // =========================================================================
    // Finance Summary
    // =========================================================================

    /// Whole-ledger financial position: revenue, profit, expenses, net.
    pub async fn finance_summary(&self) -> DbResult<FinanceSummary> {
        let total_expenses_cents: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(amount_cents), 0) FROM expenses")
                .fetch_one(&self.pool)
                .await?;

        let (total_revenue_cents, total_profit_cents): (i64, i64) = sqlx::query_as(
            "SELECT COALESCE(SUM(total_cents), 0), COALESCE(SUM(profit_cents), 0) FROM sales",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(FinanceSummary {
            total_expenses_cents,
            total_revenue_cents,
            total_profit_cents,
            net_profit_cents: total_profit_cents - total_expenses_cents,
        })
    }

    // =========================================================================
    // Catalog Lookups
    // =========================================================================

    async fn product_names(&self) -> DbResult<HashMap<String, String>> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT id, name FROM products")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().collect())
    }

    async fn product_categories(&self) -> DbResult<HashMap<String, Option<String>>> {
        let rows: Vec<(String, Option<String>)> =
            sqlx::query_as("SELECT id, category FROM products")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().collect())
    }
}

/// Sums ledger totals over a slice of sales.
fn sum_totals(sales: &[Sale]) -> SalesTotals {
    let mut totals = SalesTotals::default();
    for sale in sales {
        totals.revenue_cents += sale.total_cents;
        totals.profit_cents += sale.profit_cents;
        totals.quantity += sale.quantity;
        totals.sale_count += 1;
    }
    totals
}

/// Revenue per payment method, keyed by canonical method name.
fn payment_breakdown(sales: &[Sale]) -> BTreeMap<String, i64> {
    let mut breakdown = BTreeMap::new();
    for sale in sales {
        *breakdown
            .entry(sale.payment_method.as_str().to_string())
            .or_insert(0) += sale.total_cents;
    }
    breakdown
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Days;
    use duka_core::{NewCustomer, NewExpense, NewProduct, PaymentMethod, Product, SaleRequest};

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(db: &Database, name: &str, selling: i64, quantity: i64) -> Product {
        db.products()
            .create(&NewProduct {
                name: name.to_string(),
                category: Some("skincare".to_string()),
                buying_price_cents: selling / 2,
                selling_price_cents: selling,
                quantity,
                reorder_level: Some(5),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    async fn sell(db: &Database, product: &Product, quantity: i64, method: PaymentMethod) {
        db.sales()
            .record_sale(&SaleRequest {
                product_id: product.id.clone(),
                customer_id: None,
                quantity,
                payment_method: method,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_dashboard_on_empty_store_is_all_zeros() {
        let db = setup().await;
        let summary = db.reports().dashboard_summary().await.unwrap();

        assert_eq!(summary.total_products, 0);
        assert_eq!(summary.low_stock, 0);
        assert_eq!(summary.total_customers, 0);
        assert_eq!(summary.total_suppliers, 0);
        assert_eq!(summary.today_revenue_cents, 0);
        assert_eq!(summary.today_profit_cents, 0);
        assert!(summary.recent_sales.is_empty());
        assert!(summary.low_stock_products.is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_counts_and_today_totals() {
        let db = setup().await;
        let lotion = seed_product(&db, "Moisturizing Lotion", 450, 50).await;
        seed_product(&db, "Face Serum", 1800, 3).await; // low stock: 3 <= 5
        db.customers()
            .create(&NewCustomer {
                name: "Grace Atieno".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        sell(&db, &lotion, 10, PaymentMethod::Cash).await;

        let summary = db.reports().dashboard_summary().await.unwrap();
        assert_eq!(summary.total_products, 2);
        assert_eq!(summary.low_stock, 1);
        assert_eq!(summary.total_customers, 1);
        assert_eq!(summary.total_suppliers, 0);
        assert_eq!(summary.today_revenue_cents, 4500);
        assert_eq!(summary.today_profit_cents, 2250);
        assert_eq!(summary.recent_sales.len(), 1);
        assert_eq!(summary.low_stock_products.len(), 1);
        assert_eq!(summary.low_stock_products[0].name, "Face Serum");
    }

    #[tokio::test]
    async fn test_dashboard_ignores_other_days() {
        let db = setup().await;
        let lotion = seed_product(&db, "Moisturizing Lotion", 450, 50).await;
        sell(&db, &lotion, 1, PaymentMethod::Cash).await;

        let tomorrow = Utc::now().date_naive().checked_add_days(Days::new(1)).unwrap();
        let summary = db.reports().dashboard_summary_on(tomorrow).await.unwrap();
        assert_eq!(summary.today_revenue_cents, 0);
        assert_eq!(summary.today_profit_cents, 0);
    }

    #[tokio::test]
    async fn test_sales_report_single_day_totals() {
        let db = setup().await;
        let cheap = seed_product(&db, "Lip Balm", 100, 10).await;
        let dear = seed_product(&db, "Night Cream", 200, 10).await;

        sell(&db, &cheap, 1, PaymentMethod::Cash).await;
        sell(&db, &dear, 1, PaymentMethod::Card).await;

        let today = Utc::now().date_naive();
        let report = db
            .reports()
            .sales_report(Some(today), Some(today))
            .await
            .unwrap();

        assert_eq!(report.sales.len(), 2);
        assert_eq!(report.totals.revenue_cents, 300);
        assert_eq!(report.totals.sale_count, 2);
        assert_eq!(report.totals.quantity, 2);

        assert_eq!(report.payment_breakdown.get("cash"), Some(&100));
        assert_eq!(report.payment_breakdown.get("card"), Some(&200));
        assert_eq!(report.payment_breakdown.get("mobile"), None);
    }

    #[tokio::test]
    async fn test_sales_report_empty_range() {
        let db = setup().await;
        let lotion = seed_product(&db, "Moisturizing Lotion", 450, 50).await;
        sell(&db, &lotion, 1, PaymentMethod::Cash).await;

        // A window well before the sale sees nothing.
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2000, 1, 31).unwrap();
        let report = db
            .reports()
            .sales_report(Some(start), Some(end))
            .await
            .unwrap();

        assert!(report.sales.is_empty());
        assert_eq!(report.totals.revenue_cents, 0);
        assert!(report.top_products.is_empty());
        assert!(report.payment_breakdown.is_empty());
    }

    #[tokio::test]
    async fn test_top_products_ranked_by_quantity() {
        let db = setup().await;
        let shampoo = seed_product(&db, "Shampoo", 450, 100).await;
        let lipstick = seed_product(&db, "Lipstick", 600, 100).await;

        sell(&db, &shampoo, 2, PaymentMethod::Cash).await;
        sell(&db, &lipstick, 5, PaymentMethod::Cash).await;
        sell(&db, &shampoo, 1, PaymentMethod::Mobile).await;

        let report = db.reports().sales_report(None, None).await.unwrap();
        assert_eq!(report.top_products.len(), 2);
        assert_eq!(report.top_products[0].name, "Lipstick");
        assert_eq!(report.top_products[0].quantity_sold, 5);
        assert_eq!(report.top_products[1].name, "Shampoo");
        assert_eq!(report.top_products[1].quantity_sold, 3);
        assert_eq!(report.top_products[1].revenue_cents, 1350);
    }

    #[tokio::test]
    async fn test_weekly_report_empty_week_has_all_buckets() {
        let db = setup().await;
        let anchor = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let report = db.reports().weekly_report(anchor).await.unwrap();

        assert_eq!(report.week_start, NaiveDate::from_ymd_opt(2026, 8, 3).unwrap());
        assert_eq!(report.week_end, NaiveDate::from_ymd_opt(2026, 8, 9).unwrap());
        assert_eq!(report.days.len(), 7);
        for (i, bucket) in report.days.iter().enumerate() {
            assert_eq!(bucket.weekday, WEEKDAY_NAMES[i]);
            assert_eq!(bucket.revenue_cents, 0);
            assert_eq!(bucket.profit_cents, 0);
            assert_eq!(bucket.quantity, 0);
        }
        assert_eq!(report.totals.sale_count, 0);
        assert!(report.category_revenue.is_empty());
    }

    #[tokio::test]
    async fn test_weekly_report_buckets_todays_sales() {
        let db = setup().await;
        let lotion = seed_product(&db, "Moisturizing Lotion", 450, 50).await;
        sell(&db, &lotion, 10, PaymentMethod::Cash).await;

        let today = Utc::now().date_naive();
        let report = db.reports().weekly_report(today).await.unwrap();

        let index = today.weekday().num_days_from_monday() as usize;
        assert_eq!(report.days[index].revenue_cents, 4500);
        assert_eq!(report.days[index].quantity, 10);

        // Every other bucket stays zero.
        for (i, bucket) in report.days.iter().enumerate() {
            if i != index {
                assert_eq!(bucket.revenue_cents, 0);
            }
        }

        assert_eq!(report.category_revenue.get("skincare"), Some(&4500));
        assert_eq!(report.totals.revenue_cents, 4500);
    }

    #[tokio::test]
    async fn test_finance_summary() {
        let db = setup().await;
        let lotion = seed_product(&db, "Moisturizing Lotion", 450, 50).await;
        sell(&db, &lotion, 10, PaymentMethod::Cash).await;

        db.expenses()
            .create(&NewExpense {
                date: Utc::now().date_naive(),
                category: Some("transport".to_string()),
                description: None,
                amount_cents: 500,
            })
            .await
            .unwrap();

        let summary = db.reports().finance_summary().await.unwrap();
        assert_eq!(summary.total_revenue_cents, 4500);
        assert_eq!(summary.total_profit_cents, 2250);
        assert_eq!(summary.total_expenses_cents, 500);
        assert_eq!(summary.net_profit_cents, 1750);
    }

    #[tokio::test]
    async fn test_finance_summary_empty_ledgers() {
        let db = setup().await;
        let summary = db.reports().finance_summary().await.unwrap();
        assert_eq!(summary.total_revenue_cents, 0);
        assert_eq!(summary.total_profit_cents, 0);
        assert_eq!(summary.total_expenses_cents, 0);
        assert_eq!(summary.net_profit_cents, 0);
    }
}
