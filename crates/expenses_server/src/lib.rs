//! HTTP data service for expense records.
//!
//! Thin axum layer over the [`store`] crate: CRUD routes plus the query
//! engine that turns raw query strings into validated filters. Every error
//! leaves as the uniform envelope `{error, statusCode, timestamp, details?}`.

use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::Utc;

use api_types::error::{ErrorResponse, FieldDetail};
use store::StoreError;

pub use query::QueryError;
pub use server::{ServerState, router, run_with_listener, spawn_with_listener};

mod expenses;
mod query;
mod server;

pub enum ServerError {
    Store(StoreError),
    Query(QueryError),
    InvalidId(String),
}

fn status_for_store_error(err: &StoreError) -> StatusCode {
    match err {
        StoreError::Validation(_) | StoreError::EmptyUpdate => StatusCode::BAD_REQUEST,
        StoreError::NotFound => StatusCode::NOT_FOUND,
        StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn render_store_error(err: StoreError) -> (String, Option<Vec<FieldDetail>>) {
    match err {
        StoreError::Validation(violations) => {
            let details = violations
                .into_iter()
                .map(|v| FieldDetail {
                    field: v.field.to_string(),
                    message: v.message,
                    value: v.value,
                })
                .collect();
            ("Validation failed".to_string(), Some(details))
        }
        StoreError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            ("internal server error".to_string(), None)
        }
        other => (other.to_string(), None),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error, details) = match self {
            ServerError::Store(err) => {
                let status = status_for_store_error(&err);
                let (error, details) = render_store_error(err);
                (status, error, details)
            }
            ServerError::Query(err) => (StatusCode::BAD_REQUEST, err.to_string(), None),
            ServerError::InvalidId(id) => {
                (StatusCode::BAD_REQUEST, format!("Invalid id: {id}"), None)
            }
        };

        let body = ErrorResponse {
            error,
            status_code: status.as_u16(),
            timestamp: Utc::now(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ServerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<QueryError> for ServerError {
    fn from(value: QueryError) -> Self {
        Self::Query(value)
    }
}
