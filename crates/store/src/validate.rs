//! Per-field validation rules for expense writes.
//!
//! Each rule is a pure function returning the normalized value or a
//! [`FieldViolation`]. Creates and updates share the same rules; an update
//! only runs the rules for the fields it supplies.

use chrono::{Local, NaiveDate};
use serde_json::json;

use crate::{Category, Cents, FieldViolation, StoreError};

pub(crate) const TITLE_MIN: usize = 2;
pub(crate) const TITLE_MAX: usize = 100;
pub(crate) const NOTES_MAX: usize = 200;

/// Rejects an absent required field. The per-field rules below assume a
/// present value; this runs first for creates.
pub(crate) fn check_required<T>(
    value: Option<T>,
    field: &'static str,
    message: &'static str,
) -> Result<T, FieldViolation> {
    value.ok_or_else(|| FieldViolation::new(field, message, None))
}

pub(crate) fn check_title(value: &str) -> Result<String, FieldViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::new(
            "title",
            "Title is required",
            Some(json!(value)),
        ));
    }
    let len = trimmed.chars().count();
    if !(TITLE_MIN..=TITLE_MAX).contains(&len) {
        return Err(FieldViolation::new(
            "title",
            format!("Title must be between {TITLE_MIN} and {TITLE_MAX} characters"),
            Some(json!(value)),
        ));
    }
    Ok(trimmed.to_string())
}

/// Rounds to cents (half away from zero) and requires a positive result.
/// Inputs with more than two decimals are accepted and rounded, never
/// rejected.
pub(crate) fn check_amount(value: f64) -> Result<Cents, FieldViolation> {
    let invalid = || {
        FieldViolation::new(
            "amount",
            "Amount must be greater than 0",
            Some(json!(value)),
        )
    };
    let cents = Cents::from_amount(value).ok_or_else(invalid)?;
    if !cents.is_positive() {
        return Err(invalid());
    }
    Ok(cents)
}

pub(crate) fn check_category(value: &str) -> Result<Category, FieldViolation> {
    Category::from_name(value).ok_or_else(|| {
        FieldViolation::new(
            "category",
            "Category must be one of: Food, Transport, Shopping, Bills, Other",
            Some(json!(value)),
        )
    })
}

/// Accepts the literal `YYYY-MM-DD` shape only. The future cutoff is the
/// current local calendar day, so any time today still passes.
pub(crate) fn check_date(value: &str, today: NaiveDate) -> Result<NaiveDate, FieldViolation> {
    let Some(date) = parse_iso_date(value) else {
        return Err(FieldViolation::new(
            "date",
            "Date must be in valid ISO format (YYYY-MM-DD)",
            Some(json!(value)),
        ));
    };
    if date > today {
        return Err(FieldViolation::new(
            "date",
            "Date cannot be in the future",
            Some(json!(value)),
        ));
    }
    Ok(date)
}

/// Strict `YYYY-MM-DD` parse; chrono alone tolerates unpadded components.
fn parse_iso_date(value: &str) -> Option<NaiveDate> {
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

pub(crate) fn check_notes(value: &str) -> Result<String, FieldViolation> {
    let trimmed = value.trim();
    if trimmed.chars().count() > NOTES_MAX {
        return Err(FieldViolation::new(
            "notes",
            format!("Notes cannot exceed {NOTES_MAX} characters"),
            Some(json!(value)),
        ));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Collects the result of one field rule, recording a violation on failure.
pub(crate) fn collect<T>(
    result: Result<T, FieldViolation>,
    violations: &mut Vec<FieldViolation>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(violation) => {
            violations.push(violation);
            None
        }
    }
}

pub(crate) fn fail_if_any(violations: Vec<FieldViolation>) -> Result<(), StoreError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(StoreError::Validation(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn absent_required_fields_are_violations() {
        let err = check_required(None::<f64>, "amount", "Amount is required").unwrap_err();
        assert_eq!(err.field, "amount");
        assert_eq!(err.message, "Amount is required");
        assert_eq!(err.value, None);

        assert_eq!(
            check_required(Some(5.0), "amount", "Amount is required").unwrap(),
            5.0
        );
    }

    #[test]
    fn title_is_trimmed_and_bounded() {
        assert_eq!(check_title("  Lunch  ").unwrap(), "Lunch");
        assert!(check_title("").is_err());
        assert!(check_title("   ").is_err());
        assert!(check_title("x").is_err());
        assert!(check_title(&"x".repeat(101)).is_err());
        assert_eq!(check_title(&"x".repeat(100)).unwrap().len(), 100);
    }

    #[test]
    fn amount_rounds_and_must_stay_positive() {
        assert_eq!(check_amount(5.005).unwrap().cents(), 501);
        assert_eq!(check_amount(0.01).unwrap().cents(), 1);
        assert!(check_amount(0.0).is_err());
        assert!(check_amount(-3.0).is_err());
        // Rounds to zero cents.
        assert!(check_amount(0.004).is_err());
        assert!(check_amount(f64::NAN).is_err());
    }

    #[test]
    fn category_must_be_in_fixed_set() {
        assert_eq!(check_category("Bills").unwrap(), Category::Bills);
        let err = check_category("Groceries").unwrap_err();
        assert_eq!(err.field, "category");
    }

    #[test]
    fn date_must_not_be_in_the_future() {
        let today = day("2024-06-15");
        assert_eq!(check_date("2024-06-15", today).unwrap(), today);
        assert!(check_date("2020-01-01", today).is_ok());
        assert!(check_date("2024-06-16", today).is_err());
    }

    #[test]
    fn date_must_match_iso_shape() {
        let today = day("2024-06-15");
        assert!(check_date("2024-6-1", today).is_err());
        assert!(check_date("not-a-date", today).is_err());
        assert!(check_date("2024-02-30", today).is_err());
        assert!(check_date("2024-01-01T10:00:00", today).is_err());
    }

    #[test]
    fn notes_are_trimmed_and_capped() {
        assert_eq!(check_notes(" ok ").unwrap(), "ok");
        assert_eq!(check_notes("").unwrap(), "");
        assert!(check_notes(&"x".repeat(201)).is_err());
    }
}
