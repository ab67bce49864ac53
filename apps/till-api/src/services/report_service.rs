//! Reporting façade.
//!
//! Builds [`Report`]s from two aggregate queries over the same window. Reads
//! only: calling it any number of times leaves the ledger unchanged.

use chrono::FixedOffset;
use tracing::debug;

use till_core::period::parse_date;
use till_core::{Report, ReportPeriod, SaleKind};
use till_db::Database;

use crate::error::ApiResult;

/// Report service over the Ledger Store.
#[derive(Debug, Clone)]
pub struct ReportService {
    db: Database,
}

impl ReportService {
    pub fn new(db: Database) -> Self {
        ReportService { db }
    }

    /// Report over `period`, bounds inclusive.
    pub async fn build_report(&self, period: &ReportPeriod) -> ApiResult<Report> {
        let sales = self.db.sales();

        let (on_premises, delivery) = tokio::try_join!(
            sales.aggregate(SaleKind::OnPremises, period),
            sales.aggregate(SaleKind::Delivery, period),
        )?;

        let report = Report::from_totals(&on_premises, &delivery);
        debug!(
            sales = report.sale_count(),
            grand_total_cents = report.grand_total.cents(),
            "Report built"
        );

        Ok(report)
    }

    /// Report over whole local days given as `YYYY-MM-DD`.
    ///
    /// Either bound may be absent; both absent reports over all time.
    pub async fn report_for_dates(
        &self,
        from: Option<&str>,
        to: Option<&str>,
        offset: FixedOffset,
    ) -> ApiResult<Report> {
        let from = from.map(|v| parse_date("from", v)).transpose()?;
        let to = to.map(|v| parse_date("to", v)).transpose()?;

        let period = ReportPeriod::from_dates(from, to, offset)?;
        self.build_report(&period).await
    }
}
