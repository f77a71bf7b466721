//! Analytics service over the expenses data service.
//!
//! A pure consumer: it re-requests filtered expense data over HTTP on every
//! call and reduces it into summaries and trends. It never touches the
//! expenses database.

use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::Utc;

use api_types::error::ErrorResponse;

pub use client::{StoreClient, StoreClientError};
pub use query::QueryError;
pub use server::{AnalyticsState, router, run_with_listener, spawn_with_listener};
pub use summary::summarize;

mod analytics;
mod client;
mod query;
mod server;
mod summary;

pub enum ServerError {
    Query(QueryError),
    Upstream(StoreClientError),
}

fn status_for_upstream_error(err: &StoreClientError) -> StatusCode {
    match err {
        StoreClientError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        StoreClientError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        // Relay the upstream status where it is a valid one.
        StoreClientError::Remote { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        StoreClientError::Transport(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Query(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ServerError::Upstream(err) => {
                tracing::error!("error calling expenses service: {err}");
                (status_for_upstream_error(&err), err.to_string())
            }
        };

        let body = ErrorResponse {
            error,
            status_code: status.as_u16(),
            timestamp: Utc::now(),
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<QueryError> for ServerError {
    fn from(value: QueryError) -> Self {
        Self::Query(value)
    }
}

impl From<StoreClientError> for ServerError {
    fn from(value: StoreClientError) -> Self {
        Self::Upstream(value)
    }
}
