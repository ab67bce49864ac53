//! HTTP routes.
//!
//! ```text
//! POST /till/open                   → OpenResponse
//! POST /till/close                  → SessionReportResponse
//! GET  /till/status                 → RegisterStatus
//! GET  /till/sessions?limit=N       → [TillSession]
//! GET  /till/sessions/{id}/report   → SessionReportResponse
//! GET  /till/last-report            → SessionReportResponse
//! POST /sales/on-premises           → SaleRecordedResponse
//! POST /sales/delivery              → SaleRecordedResponse
//! GET  /sales/recent?limit=N        → [SaleResponse]
//! GET  /report?from=&to=            → ReportResponse
//! GET  /health                      → HealthResponse
//! ```

use axum::Router;

use crate::AppState;

pub mod health;
pub mod report;
pub mod sales;
pub mod till;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/till", till::router())
        .nest("/sales", sales::router())
        .merge(report::router())
        .merge(health::router())
        .with_state(state)
}
