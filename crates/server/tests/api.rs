use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::Engine as _;
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, Database, Statement};
use serde_json::{Value, json};
use tower::ServiceExt;

use server::{ServerState, router};

async fn test_router() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();

    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (username, password) VALUES (?, ?)",
        vec!["alice".into(), "password".into()],
    ))
    .await
    .unwrap();

    let engine = engine::Engine::builder().database(db.clone()).build();
    router(ServerState {
        engine: Arc::new(engine),
        db,
    })
}

fn basic_auth() -> String {
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode("alice:password")
    )
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, basic_auth());

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

#[tokio::test]
async fn missing_credentials_are_rejected() {
    let router = test_router().await;

    let request = Request::builder()
        .method("GET")
        .uri("/reports/ownerShares")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn owner_shares_report_uses_the_success_envelope() {
    let router = test_router().await;

    let (status, _) = send(
        &router,
        "POST",
        "/owners",
        Some(json!({"name": "Ayesha", "investmentAmount": 6000.0})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    send(
        &router,
        "POST",
        "/owners",
        Some(json!({"name": "Omar", "investmentAmount": 4000.0})),
    )
    .await;
    send(
        &router,
        "POST",
        "/sales",
        Some(json!({"totalAmount": 10000.0, "date": "2026-03-02T00:00:00Z"})),
    )
    .await;
    send(
        &router,
        "POST",
        "/production",
        Some(json!({"product": "LED panel", "units": 50, "totalCost": 3000.0})),
    )
    .await;
    send(
        &router,
        "POST",
        "/expenses",
        Some(json!({"category": "Electricity", "amount": 2000.0, "createdAt": "2026-03-09T00:00:00Z"})),
    )
    .await;

    let (status, body) = send(&router, "GET", "/reports/ownerShares", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["totalInvestment"], json!(10000.0));
    assert_eq!(body["totalProfitLoss"], json!(5000.0));
    assert_eq!(body["shares"][0]["name"], json!("Ayesha"));
    assert_eq!(body["shares"][0]["ownershipPercentage"], json!("60.00"));
    assert_eq!(body["shares"][0]["profitShare"], json!("3000.00"));
    assert_eq!(body["shares"][1]["ownershipPercentage"], json!("40.00"));
}

#[tokio::test]
async fn forecast_carries_a_single_month_forward() {
    let router = test_router().await;

    let (status, _) = send(
        &router,
        "POST",
        "/expenses",
        Some(json!({"amount": 500.0, "createdAt": "2024-01-15T00:00:00Z"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&router, "GET", "/expenses/predict", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["historicalData"], json!({"2024-01": 500.0}));
    assert_eq!(body["predictedNextMonth"], json!(500.0));
    assert_eq!(body["confidence"], json!("Low"));
}

#[tokio::test]
async fn forecast_extrapolates_two_months() {
    let router = test_router().await;

    send(
        &router,
        "POST",
        "/expenses",
        Some(json!({"amount": 1000.0, "createdAt": "2024-01-10T00:00:00Z"})),
    )
    .await;
    send(
        &router,
        "POST",
        "/expenses",
        Some(json!({"amount": 1500.0, "createdAt": "2024-02-10T00:00:00Z"})),
    )
    .await;

    let (_, body) = send(&router, "GET", "/expenses/predict", None).await;

    assert_eq!(body["predictedNextMonth"], json!(2000.0));
    assert_eq!(body["confidence"], json!("Medium"));
}

#[tokio::test]
async fn missing_records_render_the_error_envelope() {
    let router = test_router().await;

    let (status, body) = send(
        &router,
        "DELETE",
        "/owners/8c2f9a74-51d5-4f6e-9a2d-3f6a6f0c1b42",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
}

#[tokio::test]
async fn invalid_month_renders_the_error_envelope() {
    let router = test_router().await;

    let (status, body) = send(&router, "GET", "/reports/monthly?year=2026&month=13", None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn dashboard_counts_warranty_claims() {
    let router = test_router().await;

    let (_, created) = send(
        &router,
        "POST",
        "/warranty",
        Some(json!({"customer": "Bilal Traders", "product": "LX-200"})),
    )
    .await;
    send(
        &router,
        "POST",
        "/warranty",
        Some(json!({"product": "LX-400"})),
    )
    .await;

    let id = created["id"].as_str().unwrap().to_string();
    let (status, _) = send(
        &router,
        "PATCH",
        &format!("/warranty/{id}"),
        Some(json!({"replaced": true})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&router, "GET", "/reports/dashboard", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["metrics"]["warrantyCount"], json!(2));
    assert_eq!(body["metrics"]["warrantyReplaced"], json!(1));
    assert_eq!(body["metrics"]["warrantyPending"], json!(1));
}

#[tokio::test]
async fn monthly_report_sums_a_single_bucket() {
    let router = test_router().await;

    send(
        &router,
        "POST",
        "/sales",
        Some(json!({"totalAmount": 100.0, "date": "2026-01-15T00:00:00Z"})),
    )
    .await;
    send(
        &router,
        "POST",
        "/sales",
        Some(json!({"totalAmount": 900.0, "date": "2026-02-15T00:00:00Z"})),
    )
    .await;
    send(
        &router,
        "POST",
        "/expenses",
        Some(json!({"amount": 20.0, "createdAt": "2026-01-31T00:00:00Z"})),
    )
    .await;

    let (status, body) = send(&router, "GET", "/reports/monthly?year=2026&month=1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["month"], json!("2026-01"));
    assert_eq!(body["totalSales"], json!(100.0));
    assert_eq!(body["totalExpenses"], json!(20.0));
    assert_eq!(body["profitLoss"], json!(80.0));
}
