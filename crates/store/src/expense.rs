//! Expense primitives.
//!
//! An [`Expense`] is a single recorded spending event. The sea-orm [`Model`]
//! mirrors the `expenses` table; the domain struct carries typed fields.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Category, Cents, StoreError};

/// A stored expense record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub title: String,
    pub amount: Cents,
    pub category: Category,
    pub date: NaiveDate,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw fields for a create. Validation happens inside [`Store::create`];
/// an absent required field is reported as a violation on that field, so
/// callers can hand the body over without pre-checking presence.
///
/// [`Store::create`]: crate::Store::create
#[derive(Clone, Debug, Default)]
pub struct CreateExpense {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    /// `YYYY-MM-DD`; validated alongside the other fields.
    pub date: Option<String>,
    pub notes: Option<String>,
}

/// Raw fields for a partial update. Only supplied fields are validated and
/// written.
#[derive(Clone, Debug, Default)]
pub struct UpdateExpense {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub notes: Option<String>,
}

impl UpdateExpense {
    /// Returns `true` if no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.notes.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub amount_cents: i64,
    pub category: String,
    pub date: Date,
    pub notes: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            title: ActiveValue::Set(expense.title.clone()),
            amount_cents: ActiveValue::Set(expense.amount.cents()),
            category: ActiveValue::Set(expense.category.as_str().to_string()),
            date: ActiveValue::Set(expense.date),
            notes: ActiveValue::Set(expense.notes.clone()),
            created_at: ActiveValue::Set(expense.created_at),
            updated_at: ActiveValue::Set(expense.updated_at),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id).map_err(|_| StoreError::NotFound)?,
            title: model.title,
            amount: Cents::new(model.amount_cents),
            category: Category::from_name(&model.category).ok_or(StoreError::NotFound)?,
            date: model.date,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
