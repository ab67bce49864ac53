//! # Report Module
//!
//! Financial report over a time window, split by sale kind.
//!
//! A report is a pure function of two [`SaleTotals`]: one for on-premises
//! sales, one for deliveries, both over the same window. The close
//! operation and the date-range report endpoint share this code, so a
//! session report always equals a date-range report over the session's
//! `[opened_at, closed_at]`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{SaleTotals, TillSession};

/// Aggregated totals and counts over a time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Report {
    /// Sum of product amounts of on-premises sales.
    pub total_on_premises: Money,
    pub count_on_premises: i64,
    /// Sum of product amounts of deliveries (fees excluded).
    pub total_delivery_products: Money,
    pub total_delivery_fees: Money,
    pub count_delivery: i64,
    /// `total_on_premises + total_delivery_products + total_delivery_fees`
    pub grand_total: Money,
}

impl Report {
    /// Combines per-kind totals into a report.
    ///
    /// Any delivery fee carried by `on_premises` is ignored: on-premises
    /// sales have no fee by construction.
    pub fn from_totals(on_premises: &SaleTotals, delivery: &SaleTotals) -> Self {
        let total_on_premises = on_premises.product_amount;
        let total_delivery_products = delivery.product_amount;
        let total_delivery_fees = delivery.delivery_fee;

        Report {
            total_on_premises,
            count_on_premises: on_premises.count,
            total_delivery_products,
            total_delivery_fees,
            count_delivery: delivery.count,
            grand_total: total_on_premises + total_delivery_products + total_delivery_fees,
        }
    }

    /// Total number of sales of both kinds.
    pub fn sale_count(&self) -> i64 {
        self.count_on_premises + self.count_delivery
    }
}

/// A till session together with the report over its interval.
///
/// Returned by close. For a still-open session the report runs up to the
/// moment it was computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionReport {
    pub session: TillSession,
    pub report: Report,
}
