//! Persistent store for expense records.
//!
//! The store owns validation and storage of [`Expense`] records. It is built
//! from an explicit [`sea_orm::DatabaseConnection`] via [`Store::builder`];
//! there is no ambient global connection.

pub use category::Category;
pub use cents::Cents;
pub use error::{FieldViolation, StoreError};
pub use expense::{CreateExpense, Expense, UpdateExpense};
pub use filter::ExpenseFilter;
pub use ops::{Store, StoreBuilder};

mod category;
mod cents;
mod error;
mod expense;
mod filter;
mod ops;
mod validate;

type ResultStore<T> = Result<T, StoreError>;
