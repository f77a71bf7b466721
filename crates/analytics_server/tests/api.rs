use std::{collections::HashMap, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Json, Router,
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    routing::get,
};
use chrono::{NaiveDate, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use analytics_server::{AnalyticsState, StoreClient, router};
use api_types::{
    Category,
    error::ErrorResponse,
    expense::{ExpenseListResponse, ExpenseView},
};

fn expense(title: &str, amount: f64, category: Category, date: &str) -> ExpenseView {
    let now = Utc::now();
    ExpenseView {
        id: Uuid::new_v4(),
        title: title.to_string(),
        amount,
        category,
        date: date.parse().unwrap(),
        notes: String::new(),
        created_at: now,
        updated_at: now,
    }
}

// A stand-in for the expenses service: serves the given records from
// `/api/expenses`, honoring the same from/to/category query filters.
async fn stub_list(
    State(records): State<Arc<Vec<ExpenseView>>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<ExpenseListResponse> {
    let from = params.get("from").and_then(|v| v.parse::<NaiveDate>().ok());
    let to = params.get("to").and_then(|v| v.parse::<NaiveDate>().ok());
    let category = params.get("category");

    let data: Vec<ExpenseView> = records
        .iter()
        .filter(|e| from.is_none_or(|f| e.date >= f))
        .filter(|e| to.is_none_or(|t| e.date <= t))
        .filter(|e| category.is_none_or(|c| e.category.as_str() == c.as_str()))
        .cloned()
        .collect();

    Json(ExpenseListResponse {
        success: true,
        count: data.len(),
        data,
    })
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn stub_expenses_service(records: Vec<ExpenseView>) -> SocketAddr {
    let router = Router::new()
        .route("/api/expenses", get(stub_list))
        .with_state(Arc::new(records));
    serve(router).await
}

fn app_against(addr: SocketAddr) -> Router {
    let client = StoreClient::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap();
    router(AnalyticsState { client })
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn summary_covers_every_category_sorted_by_total() {
    let addr = stub_expenses_service(vec![
        expense("Lunch", 10.0, Category::Food, "2024-01-10"),
        expense("Groceries", 5.01, Category::Food, "2024-01-12"),
        expense("Train", 20.0, Category::Transport, "2024-01-15"),
    ])
    .await;

    let (status, body) = get_json(app_against(addr), "/api/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["totalAmount"], 35.01);
    assert_eq!(body["data"]["count"], 3);

    let by_category = body["data"]["byCategory"].as_array().unwrap();
    assert_eq!(by_category.len(), 5);
    assert_eq!(by_category[0]["category"], "Transport");
    assert_eq!(by_category[0]["total"], 20.0);
    assert_eq!(by_category[1]["category"], "Food");
    assert_eq!(by_category[1]["total"], 15.01);
    for entry in &by_category[2..] {
        assert_eq!(entry["total"], 0.0);
        assert_eq!(entry["count"], 0);
    }
}

#[tokio::test]
async fn summary_forwards_filters_to_the_expenses_service() {
    let addr = stub_expenses_service(vec![
        expense("Lunch", 10.0, Category::Food, "2024-01-10"),
        expense("Dinner", 25.0, Category::Food, "2024-02-05"),
        expense("Train", 20.0, Category::Transport, "2024-01-15"),
    ])
    .await;

    let (status, body) = get_json(
        app_against(addr),
        "/api/summary?from=2024-01-01&to=2024-01-31&category=Food",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalAmount"], 10.0);
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["filters"]["from"], "2024-01-01");
    assert_eq!(body["filters"]["category"], "Food");
}

#[tokio::test]
async fn summary_rejects_inverted_range_without_calling_upstream() {
    // Closed port: any upstream call would fail, proving validation runs first.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (status, body) = get_json(
        app_against(addr),
        "/api/summary?from=2024-02-01&to=2024-01-01",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Start date cannot be after end date");
}

#[tokio::test]
async fn summary_rejects_malformed_date() {
    let addr = stub_expenses_service(vec![]).await;

    let (status, body) = get_json(app_against(addr), "/api/summary?to=01-01-2024").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid to date format. Use YYYY-MM-DD");
    assert_eq!(body["statusCode"], 400);
}

#[tokio::test]
async fn trend_compares_the_two_periods() {
    let addr = stub_expenses_service(vec![
        expense("Lunch", 10.0, Category::Food, "2024-01-10"),
        expense("Dinner", 15.0, Category::Food, "2024-02-10"),
        expense("Train", 99.0, Category::Transport, "2024-02-11"),
    ])
    .await;

    let (status, body) = get_json(
        app_against(addr),
        "/api/category-trend/Food?from1=2024-01-01&to1=2024-01-31&from2=2024-02-01&to2=2024-02-29",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["category"], "Food");
    assert_eq!(data["period1"]["total"], 10.0);
    assert_eq!(data["period2"]["total"], 15.0);
    assert_eq!(data["change"], 5.0);
    assert_eq!(data["percentChange"], "50.00");
}

#[tokio::test]
async fn trend_with_empty_first_period_reports_numeric_zero() {
    let addr = stub_expenses_service(vec![expense(
        "Dinner",
        15.0,
        Category::Food,
        "2024-02-10",
    )])
    .await;

    let (status, body) = get_json(
        app_against(addr),
        "/api/category-trend/Food?from1=2024-01-01&to1=2024-01-31&from2=2024-02-01&to2=2024-02-29",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["period1"]["total"], 0.0);
    assert_eq!(data["change"], 15.0);
    // Zero baseline: a JSON number, not a percentage string.
    assert!(data["percentChange"].is_number());
    assert_eq!(data["percentChange"], 0);
}

#[tokio::test]
async fn trend_requires_all_four_range_params() {
    let addr = stub_expenses_service(vec![]).await;

    let (status, body) = get_json(
        app_against(addr),
        "/api/category-trend/Food?from1=2024-01-01&to1=2024-01-31",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Required query params: from1, to1, from2, to2 (all in YYYY-MM-DD format)"
    );
}

#[tokio::test]
async fn unreachable_expenses_service_maps_to_503() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (status, body) = get_json(app_against(addr), "/api/summary").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body["error"],
        "Expenses service is not available. Please ensure it is running."
    );
    assert_eq!(body["statusCode"], 503);
}

#[tokio::test]
async fn slow_expenses_service_maps_to_504() {
    async fn stall() -> Json<serde_json::Value> {
        tokio::time::sleep(Duration::from_secs(2)).await;
        Json(serde_json::json!({}))
    }
    let addr = serve(Router::new().route("/api/expenses", get(stall))).await;

    let client = StoreClient::new(&format!("http://{addr}"), Duration::from_millis(100)).unwrap();
    let app = router(AnalyticsState { client });

    let (status, body) = get_json(app, "/api/summary").await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], "Request to expenses service timed out");
}

#[tokio::test]
async fn upstream_error_is_relayed_with_prefix() {
    async fn reject() -> (StatusCode, Json<ErrorResponse>) {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid category filter".to_string(),
                status_code: 400,
                timestamp: Utc::now(),
                details: None,
            }),
        )
    }
    let addr = serve(Router::new().route("/api/expenses", get(reject))).await;

    let (status, body) = get_json(app_against(addr), "/api/summary").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Expenses service error: Invalid category filter"
    );
    assert_eq!(body["statusCode"], 400);
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let addr = stub_expenses_service(vec![]).await;

    let (status, body) = get_json(app_against(addr), "/api/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
    assert_eq!(body["path"], "/api/nope");
}
