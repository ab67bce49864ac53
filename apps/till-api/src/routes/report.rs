//! Date-range report endpoint.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::dto::{ReportQuery, ReportResponse};
use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/report", get(report))
}

/// `GET /report?from=YYYY-MM-DD&to=YYYY-MM-DD`, whole days, both inclusive.
pub async fn report(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> ApiResult<Json<ReportResponse>> {
    let Query(query) = query?;

    let report = state
        .reports()
        .report_for_dates(query.from_date(), query.to_date(), state.config.utc_offset())
        .await?;

    Ok(Json(ReportResponse::from(&report)))
}
