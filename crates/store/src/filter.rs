//! Typed filter for listing expenses.

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, QueryFilter};

use crate::{Category, expense};

/// Filter for [`Store::list`].
///
/// `from` and `to` are both inclusive bounds on `date`. Dates carry day
/// precision, so an inclusive `to` covers every record on that day (the
/// end-of-day semantics of the HTTP contract).
///
/// [`Store::list`]: crate::Store::list
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub category: Option<Category>,
}

pub(crate) trait ApplyExpenseFilter: QueryFilter + Sized {
    fn apply_expense_filter(self, filter: &ExpenseFilter) -> Self;
}

impl<T> ApplyExpenseFilter for T
where
    T: QueryFilter + Sized,
{
    fn apply_expense_filter(mut self, filter: &ExpenseFilter) -> Self {
        if let Some(from) = filter.from {
            self = self.filter(expense::Column::Date.gte(from));
        }
        if let Some(to) = filter.to {
            self = self.filter(expense::Column::Date.lte(to));
        }
        if let Some(category) = filter.category {
            self = self.filter(expense::Column::Category.eq(category.as_str()));
        }
        self
    }
}
