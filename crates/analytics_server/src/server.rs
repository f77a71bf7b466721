use axum::{
    Json, Router,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use chrono::Utc;

use crate::{analytics, client::StoreClient};
use api_types::health::Health;

const SERVICE_NAME: &str = "analytics-service";

#[derive(Clone)]
pub struct AnalyticsState {
    pub client: StoreClient,
}

async fn log_request(request: Request, next: Next) -> Response {
    tracing::info!("{} {}", request.method(), request.uri().path());
    next.run(request).await
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        timestamp: Utc::now(),
    })
}

async fn not_found(request: Request) -> (StatusCode, Json<serde_json::Value>) {
    let body = serde_json::json!({
        "error": "Route not found",
        "path": request.uri().path(),
    });
    (StatusCode::NOT_FOUND, Json(body))
}

pub fn router(state: AnalyticsState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/summary", get(analytics::get_summary))
        .route(
            "/api/category-trend/{category}",
            get(analytics::category_trend),
        )
        .fallback(not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

pub async fn run_with_listener(
    client: StoreClient,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Analytics service listening on {}", addr);

    let state = AnalyticsState { client };
    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    client: StoreClient,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(client, listener).await {
            tracing::error!("analytics service failed: {err}");
        }
    });

    Ok(addr)
}
