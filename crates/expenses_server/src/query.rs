//! Query engine: raw query-string parameters to a validated filter.
//!
//! All shape errors are resolved here, before any store access.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use api_types::parse_iso_date;
use store::{Category, ExpenseFilter};

/// Raw list parameters as they arrive on the query string.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawListParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub category: Option<String>,
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid {param} date format. Use YYYY-MM-DD")]
    InvalidDateFormat { param: &'static str },
    #[error("Start date cannot be after end date")]
    InvalidDateRange,
    #[error("Invalid category filter")]
    InvalidFilter,
}

/// Builds a validated [`ExpenseFilter`] from raw parameters.
///
/// Dates must match the literal `YYYY-MM-DD` pattern; `from` must not be
/// after `to`; `category`, if present, must be one of the fixed set.
pub fn parse_filter(params: &RawListParams) -> Result<ExpenseFilter, QueryError> {
    let from = params
        .from
        .as_deref()
        .map(|value| require_iso_date(value, "from"))
        .transpose()?;
    let to = params
        .to
        .as_deref()
        .map(|value| require_iso_date(value, "to"))
        .transpose()?;

    if let (Some(from), Some(to)) = (from, to)
        && from > to
    {
        return Err(QueryError::InvalidDateRange);
    }

    let category = params
        .category
        .as_deref()
        .map(|value| Category::from_name(value).ok_or(QueryError::InvalidFilter))
        .transpose()?;

    Ok(ExpenseFilter { from, to, category })
}

fn require_iso_date(value: &str, param: &'static str) -> Result<NaiveDate, QueryError> {
    parse_iso_date(value).ok_or(QueryError::InvalidDateFormat { param })
}
