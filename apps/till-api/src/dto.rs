//! Request and response bodies.
//!
//! Amounts cross the HTTP boundary as decimal numbers (`10.5`) and are held
//! as integer cents everywhere else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use till_core::{Report, Sale, SaleKind, SessionReport, TillSession};

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct OnPremisesSaleRequest {
    pub amount: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeliverySaleRequest {
    pub product_amount: f64,
    pub delivery_fee: f64,
}

/// `GET /report?from=YYYY-MM-DD&to=YYYY-MM-DD`
///
/// Empty values count as absent, so a form submitted with blank dates
/// reports over all time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl ReportQuery {
    pub fn from_date(&self) -> Option<&str> {
        non_blank(self.from.as_deref())
    }

    pub fn to_date(&self) -> Option<&str> {
        non_blank(self.to.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenResponse {
    pub message: String,
    pub session_id: i64,
    pub opened_at: DateTime<Utc>,
}

impl From<&TillSession> for OpenResponse {
    fn from(session: &TillSession) -> Self {
        OpenResponse {
            message: "till opened".to_string(),
            session_id: session.id,
            opened_at: session.opened_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecordedResponse {
    pub message: String,
    pub sale_id: i64,
}

impl From<&Sale> for SaleRecordedResponse {
    fn from(sale: &Sale) -> Self {
        let message = match sale.kind {
            SaleKind::OnPremises => "on-premises sale recorded",
            SaleKind::Delivery => "delivery sale recorded",
        };

        SaleRecordedResponse {
            message: message.to_string(),
            sale_id: sale.id,
        }
    }
}

/// Report with decimal amounts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportResponse {
    pub total_on_premises: f64,
    pub count_on_premises: i64,
    pub total_delivery_products: f64,
    pub total_delivery_fees: f64,
    pub count_delivery: i64,
    pub grand_total: f64,
}

impl From<&Report> for ReportResponse {
    fn from(report: &Report) -> Self {
        ReportResponse {
            total_on_premises: report.total_on_premises.to_decimal(),
            count_on_premises: report.count_on_premises,
            total_delivery_products: report.total_delivery_products.to_decimal(),
            total_delivery_fees: report.total_delivery_fees.to_decimal(),
            count_delivery: report.count_delivery,
            grand_total: report.grand_total.to_decimal(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReportResponse {
    pub session: TillSession,
    pub report: ReportResponse,
}

impl From<&SessionReport> for SessionReportResponse {
    fn from(value: &SessionReport) -> Self {
        SessionReportResponse {
            session: value.session.clone(),
            report: ReportResponse::from(&value.report),
        }
    }
}

/// A recorded sale with decimal amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleResponse {
    pub id: i64,
    pub kind: SaleKind,
    pub product_amount: f64,
    pub delivery_fee: f64,
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

impl From<&Sale> for SaleResponse {
    fn from(sale: &Sale) -> Self {
        SaleResponse {
            id: sale.id,
            kind: sale.kind,
            product_amount: sale.product_amount.to_decimal(),
            delivery_fee: sale.delivery_fee.to_decimal(),
            total: sale.total().to_decimal(),
            created_at: sale.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::{Money, SaleTotals};

    #[test]
    fn test_report_amounts_are_decimal() {
        let report = Report::from_totals(
            &SaleTotals::new(Money::from_cents(1000), Money::zero(), 1),
            &SaleTotals::new(Money::from_cents(2000), Money::from_cents(500), 1),
        );

        let json = serde_json::to_value(ReportResponse::from(&report)).unwrap();
        assert_eq!(json["total_on_premises"], 10.0);
        assert_eq!(json["total_delivery_fees"], 5.0);
        assert_eq!(json["grand_total"], 35.0);
        assert_eq!(json["count_delivery"], 1);
    }

    #[test]
    fn test_blank_report_dates_are_absent() {
        let query = ReportQuery {
            from: Some("  ".to_string()),
            to: Some("2024-05-10".to_string()),
        };
        assert_eq!(query.from_date(), None);
        assert_eq!(query.to_date(), Some("2024-05-10"));
    }
}
