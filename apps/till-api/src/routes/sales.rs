//! Sale registration endpoints.
//!
//! Both sale kinds pass through the till gate: with no open session the
//! request fails with `TILL_CLOSED` and nothing is written.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use till_core::validation::parse_amount;
use till_core::NewSale;

use crate::dto::{
    DeliverySaleRequest, LimitQuery, OnPremisesSaleRequest, SaleRecordedResponse, SaleResponse,
};
use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/on-premises", post(register_on_premises))
        .route("/delivery", post(register_delivery))
        .route("/recent", get(recent_sales))
}

pub async fn register_on_premises(
    State(state): State<AppState>,
    body: Result<Json<OnPremisesSaleRequest>, JsonRejection>,
) -> ApiResult<Json<SaleRecordedResponse>> {
    let Json(body) = body?;
    let sale = NewSale::on_premises(parse_amount("amount", body.amount)?);

    let recorded = state.till().register_sale(sale).await?;
    Ok(Json(SaleRecordedResponse::from(&recorded)))
}

pub async fn register_delivery(
    State(state): State<AppState>,
    body: Result<Json<DeliverySaleRequest>, JsonRejection>,
) -> ApiResult<Json<SaleRecordedResponse>> {
    let Json(body) = body?;
    let sale = NewSale::delivery(
        parse_amount("product_amount", body.product_amount)?,
        parse_amount("delivery_fee", body.delivery_fee)?,
    );

    let recorded = state.till().register_sale(sale).await?;
    Ok(Json(SaleRecordedResponse::from(&recorded)))
}

pub async fn recent_sales(
    State(state): State<AppState>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<SaleResponse>>> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(state.config.history_limit);

    let sales = state.till().recent_sales(limit).await?;
    Ok(Json(sales.iter().map(SaleResponse::from).collect()))
}
