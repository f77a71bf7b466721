//! Errors the store can return.
//!
//! [`Validation`] carries one [`FieldViolation`] per failed field rule so the
//! caller can report every problem in a single response.
//!
//! [`Validation`]: StoreError::Validation

use sea_orm::DbErr;
use thiserror::Error;

/// A single field rule violation, with the offending value when available.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
    pub value: Option<serde_json::Value>,
}

impl FieldViolation {
    pub fn new(
        field: &'static str,
        message: impl Into<String>,
        value: Option<serde_json::Value>,
    ) -> Self {
        Self {
            field,
            message: message.into(),
            value,
        }
    }
}

/// Store custom errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),
    #[error("Expense not found")]
    NotFound,
    #[error("No update data provided")]
    EmptyUpdate,
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for StoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::NotFound, Self::NotFound) => true,
            (Self::EmptyUpdate, Self::EmptyUpdate) => true,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
