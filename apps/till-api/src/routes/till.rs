//! Till session endpoints.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use till_core::{RegisterStatus, TillSession};

use crate::dto::{LimitQuery, OpenResponse, SessionReportResponse};
use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/open", post(open_till))
        .route("/close", post(close_till))
        .route("/status", get(till_status))
        .route("/sessions", get(list_sessions))
        .route("/sessions/{id}/report", get(session_report))
        .route("/last-report", get(last_report))
}

pub async fn open_till(State(state): State<AppState>) -> ApiResult<Json<OpenResponse>> {
    let session = state.till().open().await?;
    Ok(Json(OpenResponse::from(&session)))
}

pub async fn close_till(State(state): State<AppState>) -> ApiResult<Json<SessionReportResponse>> {
    let closed = state.till().close().await?;
    Ok(Json(SessionReportResponse::from(&closed)))
}

pub async fn till_status(State(state): State<AppState>) -> ApiResult<Json<RegisterStatus>> {
    Ok(Json(state.till().status().await?))
}

pub async fn list_sessions(
    State(state): State<AppState>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<TillSession>>> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(state.config.history_limit);
    Ok(Json(state.till().history(limit).await?))
}

pub async fn session_report(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<SessionReportResponse>> {
    let Path(id) = id?;
    let report = state.till().session_report(id).await?;
    Ok(Json(SessionReportResponse::from(&report)))
}

pub async fn last_report(State(state): State<AppState>) -> ApiResult<Json<SessionReportResponse>> {
    let report = state.till().last_closed_report().await?;
    Ok(Json(SessionReportResponse::from(&report)))
}
