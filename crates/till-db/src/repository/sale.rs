//! # Sale Repository
//!
//! Append-only storage of sales and the aggregate query behind every report.
//!
//! ## Aggregate Query
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  aggregate(Delivery, [10:00, 18:00])                                    │
//! │                                                                         │
//! │  sales                                                                  │
//! │  ┌────┬─────────────┬─────────┬─────┬───────────┐                      │
//! │  │ id │ kind        │ product │ fee │ created   │                      │
//! │  ├────┼─────────────┼─────────┼─────┼───────────┤                      │
//! │  │  1 │ on_premises │    1000 │   0 │ 09:30     │  kind ✗              │
//! │  │  2 │ delivery    │    2000 │ 500 │ 10:00     │  ✓ (inclusive)       │
//! │  │  3 │ delivery    │    1500 │ 300 │ 12:15     │  ✓                   │
//! │  │  4 │ delivery    │    4000 │ 700 │ 18:05     │  time ✗              │
//! │  └────┴─────────────┴─────────┴─────┴───────────┘                      │
//! │                                                                         │
//! │  → SaleTotals { product_amount: 3500, delivery_fee: 800, count: 2 }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One parameterized statement covers every bound combination: a `NULL`
//! bound disables its side of the filter.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use till_core::validation::validate_sale;
use till_core::{NewSale, ReportPeriod, Sale, SaleKind, SaleTotals};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Appends an immutable sale recorded at `at` and returns its id.
    ///
    /// Amounts are validated first; an invalid sale never reaches SQLite.
    pub async fn record_sale(&self, sale: &NewSale, at: DateTime<Utc>) -> DbResult<i64> {
        validate_sale(sale)?;

        debug!(
            kind = %sale.kind,
            product_cents = sale.product_amount.cents(),
            fee_cents = sale.delivery_fee.cents(),
            "Recording sale"
        );

        let result = sqlx::query(
            r#"
            INSERT INTO sales (kind, product_amount_cents, delivery_fee_cents, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(sale.kind)
        .bind(sale.product_amount)
        .bind(sale.delivery_fee)
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Sums and counts sales of `kind` whose timestamp lies in `period`
    /// (both bounds inclusive, missing bounds open-ended).
    ///
    /// Returns zeros, never an error, when nothing matches.
    pub async fn aggregate(&self, kind: SaleKind, period: &ReportPeriod) -> DbResult<SaleTotals> {
        debug!(kind = %kind, from = ?period.from, to = ?period.to, "Aggregating sales");

        let totals = sqlx::query_as::<_, SaleTotals>(
            r#"
            SELECT
                COALESCE(SUM(product_amount_cents), 0) AS product_amount,
                COALESCE(SUM(delivery_fee_cents), 0)   AS delivery_fee,
                COUNT(id)                              AS count
            FROM sales
            WHERE kind = ?1
              AND (?2 IS NULL OR created_at >= ?2)
              AND (?3 IS NULL OR created_at <= ?3)
            "#,
        )
        .bind(kind)
        .bind(period.from)
        .bind(period.to)
        .fetch_one(&self.pool)
        .await?;

        Ok(totals)
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT
                id,
                kind,
                product_amount_cents AS product_amount,
                delivery_fee_cents   AS delivery_fee,
                created_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Latest sales first.
    pub async fn recent(&self, limit: i64) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT
                id,
                kind,
                product_amount_cents AS product_amount,
                delivery_fee_cents   AS delivery_fee,
                created_at
            FROM sales
            ORDER BY id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Total number of recorded sales, of any kind.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
