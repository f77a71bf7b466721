//! CRUD operations on expense records.

use chrono::Utc;
use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    CreateExpense, Expense, ExpenseFilter, ResultStore, StoreError, UpdateExpense, expense,
    filter::ApplyExpenseFilter,
    validate::{self, collect, fail_if_any},
};

use super::{Store, with_tx};

impl Store {
    /// Validates and persists a new expense.
    ///
    /// The amount is rounded to two decimals on write; `id`, `created_at` and
    /// `updated_at` are assigned here. All field rules are checked, absent
    /// required fields included, and every violation is reported in one
    /// [`StoreError::Validation`].
    pub async fn create(&self, input: CreateExpense) -> ResultStore<Expense> {
        let today = validate::today();
        let mut violations = Vec::new();

        let title = collect(
            validate::check_required(input.title.as_deref(), "title", "Title is required")
                .and_then(validate::check_title),
            &mut violations,
        );
        let amount = collect(
            validate::check_required(input.amount, "amount", "Amount is required")
                .and_then(validate::check_amount),
            &mut violations,
        );
        let category = collect(
            validate::check_required(input.category.as_deref(), "category", "Category is required")
                .and_then(validate::check_category),
            &mut violations,
        );
        let date = collect(
            validate::check_required(input.date.as_deref(), "date", "Date is required")
                .and_then(|value| validate::check_date(value, today)),
            &mut violations,
        );
        let notes = collect(
            validate::check_notes(input.notes.as_deref().unwrap_or("")),
            &mut violations,
        );
        fail_if_any(violations)?;

        // All fields validated above.
        let (Some(title), Some(amount), Some(category), Some(date), Some(notes)) =
            (title, amount, category, date, notes)
        else {
            return Err(StoreError::Validation(Vec::new()));
        };

        let now = Utc::now();
        let record = Expense {
            id: Uuid::new_v4(),
            title,
            amount,
            category,
            date,
            notes,
            created_at: now,
            updated_at: now,
        };

        expense::ActiveModel::from(&record)
            .insert(self.database())
            .await?;

        Ok(record)
    }

    /// Returns the expense with the given id.
    pub async fn get(&self, id: Uuid) -> ResultStore<Expense> {
        let model = expense::Entity::find_by_id(id.to_string())
            .one(self.database())
            .await?
            .ok_or(StoreError::NotFound)?;

        model.try_into()
    }

    /// Lists expenses matching the filter, newest first.
    ///
    /// Order is `date DESC`, ties broken by `created_at DESC`.
    pub async fn list(&self, filter: &ExpenseFilter) -> ResultStore<Vec<Expense>> {
        let models = expense::Entity::find()
            .apply_expense_filter(filter)
            .order_by_desc(expense::Column::Date)
            .order_by_desc(expense::Column::CreatedAt)
            .all(self.database())
            .await?;

        models.into_iter().map(Expense::try_from).collect()
    }

    /// Applies a partial update, re-validating only the supplied fields.
    ///
    /// An empty update fails with [`StoreError::EmptyUpdate`] before any
    /// database access. `updated_at` is refreshed on success.
    pub async fn update(&self, id: Uuid, changes: UpdateExpense) -> ResultStore<Expense> {
        if changes.is_empty() {
            return Err(StoreError::EmptyUpdate);
        }

        let today = validate::today();
        let mut violations = Vec::new();

        let title = changes
            .title
            .as_deref()
            .and_then(|value| collect(validate::check_title(value), &mut violations));
        let amount = changes
            .amount
            .and_then(|value| collect(validate::check_amount(value), &mut violations));
        let category = changes
            .category
            .as_deref()
            .and_then(|value| collect(validate::check_category(value), &mut violations));
        let date = changes
            .date
            .as_deref()
            .and_then(|value| collect(validate::check_date(value, today), &mut violations));
        let notes = changes
            .notes
            .as_deref()
            .and_then(|value| collect(validate::check_notes(value), &mut violations));
        fail_if_any(violations)?;

        with_tx!(self, |tx| {
            let result = async {
                let model = expense::Entity::find_by_id(id.to_string())
                    .one(&tx)
                    .await?
                    .ok_or(StoreError::NotFound)?;

                let mut active = expense::ActiveModel {
                    id: ActiveValue::Unchanged(model.id.clone()),
                    ..Default::default()
                };
                if let Some(title) = title {
                    active.title = ActiveValue::Set(title);
                }
                if let Some(amount) = amount {
                    active.amount_cents = ActiveValue::Set(amount.cents());
                }
                if let Some(category) = category {
                    active.category = ActiveValue::Set(category.as_str().to_string());
                }
                if let Some(date) = date {
                    active.date = ActiveValue::Set(date);
                }
                if let Some(notes) = notes {
                    active.notes = ActiveValue::Set(notes);
                }
                active.updated_at = ActiveValue::Set(Utc::now());

                let updated = active.update(&tx).await?;
                Expense::try_from(updated)
            }
            .await;
            result
        })
    }

    /// Deletes an expense and returns its prior state.
    pub async fn delete(&self, id: Uuid) -> ResultStore<Expense> {
        with_tx!(self, |tx| {
            let result = async {
                let model = expense::Entity::find_by_id(id.to_string())
                    .one(&tx)
                    .await?
                    .ok_or(StoreError::NotFound)?;

                expense::Entity::delete_by_id(model.id.clone())
                    .exec(&tx)
                    .await?;

                Expense::try_from(model)
            }
            .await;
            result
        })
    }
}
