//! Black-box tests driving the router over HTTP requests, no socket.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use till_api::{router, ApiConfig, AppState};
use till_db::{Database, DbConfig};

async fn app() -> Router {
    app_with(ApiConfig::default()).await
}

async fn app_with(config: ApiConfig) -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    router(AppState::new(db, config))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

async fn post_empty(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::POST, uri, None).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

#[tokio::test]
async fn status_starts_closed() {
    let app = app().await;
    let (status, body) = get(&app, "/till/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "closed" }));
}

#[tokio::test]
async fn open_sale_close_flow() {
    let app = app().await;

    let (status, opened) = post_empty(&app, "/till/open").await;
    assert_eq!(status, StatusCode::OK);
    let session_id = opened["session_id"].as_i64().unwrap();
    assert!(opened["opened_at"].is_string());

    let (_, till) = get(&app, "/till/status").await;
    assert_eq!(till["status"], "open");
    assert_eq!(till["session_id"], session_id);

    let (status, recorded) = post(&app, "/sales/on-premises", json!({ "amount": 10.0 })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(recorded["sale_id"].as_i64().is_some());
    assert!(recorded["message"].is_string());

    let (status, closed) = post_empty(&app, "/till/close").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closed["session"]["id"], session_id);
    assert_eq!(closed["session"]["status"], "closed");
    assert_eq!(closed["report"]["grand_total"], 10.0);
    assert_eq!(closed["report"]["count_on_premises"], 1);

    let (_, till) = get(&app, "/till/status").await;
    assert_eq!(till["status"], "closed");

    let (status, last) = get(&app, "/till/last-report").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(last["report"], closed["report"]);
}

#[tokio::test]
async fn report_over_both_kinds() {
    let app = app().await;
    post_empty(&app, "/till/open").await;

    post(&app, "/sales/on-premises", json!({ "amount": 10.0 })).await;
    post(
        &app,
        "/sales/delivery",
        json!({ "product_amount": 20.0, "delivery_fee": 5.0 }),
    )
    .await;

    let (status, report) = get(&app, "/report").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        report,
        json!({
            "total_on_premises": 10.0,
            "count_on_premises": 1,
            "total_delivery_products": 20.0,
            "total_delivery_fees": 5.0,
            "count_delivery": 1,
            "grand_total": 35.0
        })
    );
}

#[tokio::test]
async fn sale_while_closed_is_rejected() {
    let app = app().await;

    let (status, body) = post(&app, "/sales/on-premises", json!({ "amount": 10.0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "TILL_CLOSED");
    assert!(body["message"].is_string());

    let (_, report) = get(&app, "/report").await;
    assert_eq!(report["count_on_premises"], 0);
    assert_eq!(report["grand_total"], 0.0);
}

#[tokio::test]
async fn double_open_is_rejected() {
    let app = app().await;
    post_empty(&app, "/till/open").await;

    let (status, body) = post_empty(&app, "/till/open").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CONFLICT");

    let (_, sessions) = get(&app, "/till/sessions").await;
    assert_eq!(sessions.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn close_when_closed_is_rejected() {
    let app = app().await;

    let (status, body) = post_empty(&app, "/till/close").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn invalid_amounts_are_rejected() {
    let app = app().await;
    post_empty(&app, "/till/open").await;

    let (status, body) = post(&app, "/sales/on-premises", json!({ "amount": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = post(
        &app,
        "/sales/delivery",
        json!({ "product_amount": 20.0, "delivery_fee": -1.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post(&app, "/sales/delivery", json!({ "product_amount": "abc" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, recent) = get(&app, "/sales/recent").await;
    assert_eq!(recent, json!([]));
}

#[tokio::test]
async fn report_date_validation() {
    let app = app().await;

    let (status, body) = get(&app, "/report?from=2024-05-11&to=2024-05-10").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = get(&app, "/report?from=11-05-2024").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/report?from=&to=").await;
    assert_eq!(status, StatusCode::OK);

    let (status, report) = get(&app, "/report?from=2024-05-10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["grand_total"], 0.0);
}

#[tokio::test]
async fn report_dates_past_year_9999_are_rejected_with_offset() {
    let app = app_with(ApiConfig {
        utc_offset_minutes: -180,
        ..ApiConfig::default()
    })
    .await;
    post_empty(&app, "/till/open").await;
    post(&app, "/sales/on-premises", json!({ "amount": 10.0 })).await;

    // The end of 9999-12-31 at -03:00 is already in year 10000 UTC.
    let (status, body) = get(&app, "/report?from=2024-01-01&to=9999-12-31").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, report) = get(&app, "/report?from=2024-01-01&to=9999-12-30").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["count_on_premises"], 1);
}

#[tokio::test]
async fn session_report_lookup() {
    let app = app().await;

    let (status, body) = get(&app, "/till/sessions/7/report").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = get(&app, "/till/last-report").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, opened) = post_empty(&app, "/till/open").await;
    let id = opened["session_id"].as_i64().unwrap();
    post(
        &app,
        "/sales/delivery",
        json!({ "product_amount": 12.5, "delivery_fee": 3.0 }),
    )
    .await;

    // Running report of the open session.
    let (status, running) = get(&app, &format!("/till/sessions/{id}/report")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(running["session"]["status"], "open");
    assert_eq!(running["report"]["grand_total"], 15.5);
}

#[tokio::test]
async fn recent_sales_listing() {
    let app = app().await;
    post_empty(&app, "/till/open").await;
    for amount in [1.5, 2.5, 3.5] {
        post(&app, "/sales/on-premises", json!({ "amount": amount })).await;
    }

    let (status, recent) = get(&app, "/sales/recent?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    let recent = recent.as_array().unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0]["product_amount"], 3.5);
    assert_eq!(recent[0]["kind"], "on_premises");

    let (status, body) = get(&app, "/sales/recent?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app().await;
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}
