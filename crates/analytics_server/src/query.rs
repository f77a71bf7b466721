//! Fail-fast parsing of summary and trend query parameters.
//!
//! Date shape and range errors are resolved here, before any call to the
//! expenses service. The category is passed through as-is: the expenses
//! service owns the category filter rules and its rejection is relayed.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use api_types::{parse_iso_date, summary::SummaryFilters};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawSummaryParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub category: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawTrendParams {
    pub from1: Option<String>,
    pub to1: Option<String>,
    pub from2: Option<String>,
    pub to2: Option<String>,
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid {param} date format. Use YYYY-MM-DD")]
    InvalidDateFormat { param: &'static str },
    #[error("Start date cannot be after end date")]
    InvalidDateRange,
    #[error("Required query params: from1, to1, from2, to2 (all in YYYY-MM-DD format)")]
    MissingTrendRange,
}

pub fn parse_summary_filters(params: &RawSummaryParams) -> Result<SummaryFilters, QueryError> {
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

    Ok(SummaryFilters {
        from,
        to,
        category: params.category.clone(),
    })
}

/// Both date ranges of a trend request; all four parameters are mandatory.
pub fn parse_trend_ranges(
    params: &RawTrendParams,
) -> Result<((NaiveDate, NaiveDate), (NaiveDate, NaiveDate)), QueryError> {
    let (Some(from1), Some(to1), Some(from2), Some(to2)) = (
        params.from1.as_deref(),
        params.to1.as_deref(),
        params.from2.as_deref(),
        params.to2.as_deref(),
    ) else {
        return Err(QueryError::MissingTrendRange);
    };

    let from1 = require_iso_date(from1, "from1")?;
    let to1 = require_iso_date(to1, "to1")?;
    let from2 = require_iso_date(from2, "from2")?;
    let to2 = require_iso_date(to2, "to2")?;

    if from1 > to1 || from2 > to2 {
        return Err(QueryError::InvalidDateRange);
    }

    Ok(((from1, to1), (from2, to2)))
}

fn require_iso_date(value: &str, param: &'static str) -> Result<NaiveDate, QueryError> {
    parse_iso_date(value).ok_or(QueryError::InvalidDateFormat { param })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_filters_validate_dates_and_range() {
        let params = RawSummaryParams {
            from: Some("2024-01-01".to_string()),
            to: Some("2024-01-31".to_string()),
            category: Some("Food".to_string()),
        };
        let filters = parse_summary_filters(&params).unwrap();
        assert_eq!(filters.from, Some("2024-01-01".parse().unwrap()));
        assert_eq!(filters.category.as_deref(), Some("Food"));

        let bad = RawSummaryParams {
            from: Some("2024-02-01".to_string()),
            to: Some("2024-01-01".to_string()),
            category: None,
        };
        assert_eq!(
            parse_summary_filters(&bad).unwrap_err(),
            QueryError::InvalidDateRange
        );

        let malformed = RawSummaryParams {
            from: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert_eq!(
            parse_summary_filters(&malformed).unwrap_err(),
            QueryError::InvalidDateFormat { param: "from" }
        );
    }

    #[test]
    fn trend_requires_all_four_params() {
        let params = RawTrendParams {
            from1: Some("2024-01-01".to_string()),
            to1: Some("2024-01-31".to_string()),
            from2: Some("2024-02-01".to_string()),
            to2: None,
        };
        assert_eq!(
            parse_trend_ranges(&params).unwrap_err(),
            QueryError::MissingTrendRange
        );
    }

    #[test]
    fn trend_parses_both_ranges() {
        let params = RawTrendParams {
            from1: Some("2024-01-01".to_string()),
            to1: Some("2024-01-31".to_string()),
            from2: Some("2024-02-01".to_string()),
            to2: Some("2024-02-29".to_string()),
        };
        let ((from1, to1), (from2, to2)) = parse_trend_ranges(&params).unwrap();
        assert!(from1 < to1 && to1 < from2 && from2 < to2);
    }
}
