//! HTTP client for the expenses service.
//!
//! The analytics service holds no state of its own: every summary is
//! recomputed from data fetched fresh through this client. Calls carry a
//! bounded timeout and are never retried; the three failure modes
//! (unreachable, timed out, explicit upstream error) stay distinguishable.

use std::time::Duration;

use api_types::{
    error::ErrorResponse,
    expense::{ExpenseListResponse, ExpenseView},
    summary::SummaryFilters,
};
use reqwest::Client;

#[derive(Debug, thiserror::Error)]
pub enum StoreClientError {
    #[error("Expenses service is not available. Please ensure it is running.")]
    Unavailable,
    #[error("Request to expenses service timed out")]
    Timeout,
    /// The expenses service answered with its own error payload.
    #[error("Expenses service error: {message}")]
    Remote { status: u16, message: String },
    #[error("unexpected expenses service response: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for StoreClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Unavailable
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[derive(Clone, Debug)]
pub struct StoreClient {
    http: Client,
    base_url: String,
}

impl StoreClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| StoreClientError::Transport(err.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Fetches the expenses matching the filters from the expenses service.
    pub async fn fetch_expenses(
        &self,
        filters: &SummaryFilters,
    ) -> Result<Vec<ExpenseView>, StoreClientError> {
        let url = self.url("/api/expenses");
        tracing::debug!("calling expenses service: {url}");

        let resp = self.http.get(&url).query(filters).send().await?;
        let status = resp.status();

        if status.is_success() {
            let body = resp.json::<ExpenseListResponse>().await?;
            tracing::debug!("retrieved {} expenses", body.count);
            return Ok(body.data);
        }

        let message = match resp.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        Err(StoreClientError::Remote {
            status: status.as_u16(),
            message,
        })
    }
}
