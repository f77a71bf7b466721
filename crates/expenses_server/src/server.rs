use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use chrono::Utc;

use crate::expenses;
use api_types::health::Health;
use store::Store;

const SERVICE_NAME: &str = "expenses-service";

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<Store>,
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

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/expenses", get(expenses::list).post(expenses::create))
        .route(
            "/api/expenses/{id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        .fallback(not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

pub async fn run_with_listener(
    store: Store,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Expenses service listening on {}", addr);

    let state = ServerState {
        store: Arc::new(store),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    store: Store,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(store, listener).await {
            tracing::error!("expenses service failed: {err}");
        }
    });

    Ok(addr)
}
