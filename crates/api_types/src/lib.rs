//! Wire types shared by the expenses service, the analytics service and any
//! HTTP client.
//!
//! Field names follow the JSON contract (camelCase where the two differ from
//! Rust convention). No business logic lives here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Expense category. The set is closed: no other value is ever accepted or
/// persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Bills,
    Other,
}

impl Category {
    /// All categories, in declaration order. Zero-valued summary entries are
    /// emitted in this order.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Bills,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a date in the literal `YYYY-MM-DD` shape.
///
/// Stricter than chrono's `%Y-%m-%d`, which tolerates unpadded components:
/// the wire contract requires exactly four digits, a dash, two digits, a
/// dash, two digits.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub mod expense {
    use super::*;

    /// A stored expense as it appears on the wire.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseView {
        pub id: Uuid,
        pub title: String,
        /// Always carries at most two decimal places.
        pub amount: f64,
        pub category: Category,
        /// Day precision, serialized as `YYYY-MM-DD`.
        pub date: NaiveDate,
        pub notes: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    /// Request body for creating an expense.
    ///
    /// Every field is `Option` so that an absent or malformed value surfaces
    /// as a field-level validation error in the uniform envelope, never as a
    /// bare deserialization rejection. The service enforces which fields are
    /// actually required.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub title: Option<String>,
        pub amount: Option<f64>,
        pub category: Option<String>,
        /// `YYYY-MM-DD`.
        pub date: Option<String>,
        pub notes: Option<String>,
    }

    /// Request body for a partial update. Every field is optional; an all-empty
    /// body is rejected by the service.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub title: Option<String>,
        pub amount: Option<f64>,
        pub category: Option<String>,
        pub date: Option<String>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseListResponse {
        pub success: bool,
        pub count: usize,
        pub data: Vec<ExpenseView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseResponse {
        pub success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub message: Option<String>,
        pub data: ExpenseView,
    }
}

pub mod summary {
    use super::*;

    /// Filters echoed back by the analytics service. Also reused as the
    /// query sent upstream to the expenses service.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct SummaryFilters {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub from: Option<NaiveDate>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub to: Option<NaiveDate>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CategorySummary {
        pub category: Category,
        pub total: f64,
        pub count: u64,
    }

    /// Aggregated totals over a filtered set of expenses. `by_category`
    /// always lists all five categories, sorted by total descending.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Summary {
        pub total_amount: f64,
        pub count: u64,
        pub by_category: Vec<CategorySummary>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SummaryResponse {
        pub success: bool,
        pub filters: SummaryFilters,
        pub data: Summary,
    }
}

pub mod trend {
    use super::*;

    /// Percent change between the two periods of a trend.
    ///
    /// Serialized as a two-decimal string, except when the first period's
    /// total is zero: the baseline makes no percentage computable and the
    /// literal number `0` is emitted instead.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum PercentChange {
        ZeroBaseline(u8),
        Percent(String),
    }

    impl PercentChange {
        pub fn zero_baseline() -> Self {
            Self::ZeroBaseline(0)
        }
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TrendPeriod {
        pub from: NaiveDate,
        pub to: NaiveDate,
        pub total: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Trend {
        pub category: String,
        pub period1: TrendPeriod,
        pub period2: TrendPeriod,
        pub change: f64,
        pub percent_change: PercentChange,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TrendResponse {
        pub success: bool,
        pub data: Trend,
    }
}

pub mod error {
    use super::*;

    /// One field-level validation failure.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct FieldDetail {
        pub field: String,
        pub message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub value: Option<serde_json::Value>,
    }

    /// Uniform error envelope used by both services.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ErrorResponse {
        pub error: String,
        pub status_code: u16,
        pub timestamp: DateTime<Utc>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub details: Option<Vec<FieldDetail>>,
    }
}

pub mod health {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Health {
        pub status: String,
        pub service: String,
        pub timestamp: DateTime<Utc>,
    }
}
