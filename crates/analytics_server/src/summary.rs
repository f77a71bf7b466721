//! Pure reduction of expense records into a category summary.

use std::collections::HashMap;

use api_types::{
    Category,
    expense::ExpenseView,
    summary::{CategorySummary, Summary},
};

/// Converts a wire amount (at most two decimals) to integer cents.
pub(crate) fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Reduces a list of expenses into per-category totals plus a grand total.
///
/// The output always carries exactly one entry per category, zero-valued for
/// categories with no records, sorted by total descending. Equal totals keep
/// their accumulation order: categories in first-seen order, then absent
/// categories in declaration order (the sort is stable).
pub fn summarize(expenses: &[ExpenseView]) -> Summary {
    let mut order: Vec<Category> = Vec::new();
    let mut buckets: HashMap<Category, (i64, u64)> = HashMap::new();
    let mut grand_total = 0i64;

    for expense in expenses {
        let cents = to_cents(expense.amount);
        grand_total += cents;

        let bucket = buckets.entry(expense.category).or_insert_with(|| {
            order.push(expense.category);
            (0, 0)
        });
        bucket.0 += cents;
        bucket.1 += 1;
    }

    for category in Category::ALL {
        buckets.entry(category).or_insert_with(|| {
            order.push(category);
            (0, 0)
        });
    }

    let mut entries: Vec<(Category, i64, u64)> = order
        .into_iter()
        .map(|category| {
            let (total, count) = buckets[&category];
            (category, total, count)
        })
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    Summary {
        total_amount: grand_total as f64 / 100.0,
        count: expenses.len() as u64,
        by_category: entries
            .into_iter()
            .map(|(category, total, count)| CategorySummary {
                category,
                total: total as f64 / 100.0,
                count,
            })
            .collect(),
    }
}

/// Returns the total for one category, 0 if absent.
pub(crate) fn category_total_cents(summary: &Summary, category: &str) -> i64 {
    summary
        .by_category
        .iter()
        .find(|entry| entry.category.as_str() == category)
        .map(|entry| to_cents(entry.total))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn expense(category: Category, amount: f64) -> ExpenseView {
        let now = Utc::now();
        ExpenseView {
            id: Uuid::new_v4(),
            title: "test".to_string(),
            amount,
            category,
            date: now.date_naive(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_input_yields_five_zero_entries() {
        let summary = summarize(&[]);

        assert_eq!(summary.total_amount, 0.0);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.by_category.len(), 5);
        // Declaration order when everything ties at zero.
        let categories: Vec<Category> = summary.by_category.iter().map(|c| c.category).collect();
        assert_eq!(categories, Category::ALL);
        for entry in &summary.by_category {
            assert_eq!(entry.total, 0.0);
            assert_eq!(entry.count, 0);
        }
    }

    #[test]
    fn totals_accumulate_per_category_and_sort_descending() {
        let summary = summarize(&[
            expense(Category::Food, 10.00),
            expense(Category::Food, 5.01),
            expense(Category::Transport, 20.00),
        ]);

        assert_eq!(summary.total_amount, 35.01);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.by_category.len(), 5);

        assert_eq!(summary.by_category[0].category, Category::Transport);
        assert_eq!(summary.by_category[0].total, 20.00);
        assert_eq!(summary.by_category[0].count, 1);

        assert_eq!(summary.by_category[1].category, Category::Food);
        assert_eq!(summary.by_category[1].total, 15.01);
        assert_eq!(summary.by_category[1].count, 2);

        for entry in &summary.by_category[2..] {
            assert_eq!(entry.total, 0.0);
            assert_eq!(entry.count, 0);
        }
    }

    #[test]
    fn equal_totals_keep_first_seen_order() {
        let summary = summarize(&[
            expense(Category::Bills, 7.50),
            expense(Category::Food, 7.50),
        ]);

        assert_eq!(summary.by_category[0].category, Category::Bills);
        assert_eq!(summary.by_category[1].category, Category::Food);
        // Remaining zero entries stay in declaration order.
        let rest: Vec<Category> = summary.by_category[2..].iter().map(|c| c.category).collect();
        assert_eq!(
            rest,
            [Category::Transport, Category::Shopping, Category::Other]
        );
    }

    #[test]
    fn cent_accumulation_avoids_float_drift() {
        let items: Vec<ExpenseView> = (0..10).map(|_| expense(Category::Other, 0.10)).collect();
        let summary = summarize(&items);
        assert_eq!(summary.total_amount, 1.0);
    }

    #[test]
    fn category_total_defaults_to_zero() {
        let summary = summarize(&[expense(Category::Food, 3.00)]);
        assert_eq!(category_total_cents(&summary, "Food"), 300);
        assert_eq!(category_total_cents(&summary, "Bills"), 0);
        assert_eq!(category_total_cents(&summary, "Unknown"), 0);
    }
}
