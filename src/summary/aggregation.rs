//! Groups expenses by category and totals them.

use std::collections::HashMap;

use crate::expense::{Expense, fold_case};

/// The expenses that share a case-folded category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBucket {
    /// The lower-cased category shared by every expense in the bucket.
    pub category: String,
    /// The expenses in this category, in the order they were seen.
    pub expenses: Vec<Expense>,
    /// The sum of `amount` over `expenses`.
    pub subtotal: f64,
}

/// Expenses grouped by category, with the grand total.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseSummary {
    /// One bucket per category in first-seen order.
    pub buckets: Vec<CategoryBucket>,
    /// The sum of `amount` over every summarized expense.
    pub grand_total: f64,
}

impl ExpenseSummary {
    /// Whether there were no expenses to summarize.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Group `expenses` by lower-cased category and total them.
///
/// Buckets appear in the order their category is first seen and keep the
/// order of `expenses` within each bucket. An empty input gives an empty
/// summary with a grand total of zero.
pub fn summarize(expenses: Vec<Expense>) -> ExpenseSummary {
    let grand_total: f64 = expenses.iter().map(|expense| expense.amount).sum();

    let mut buckets: Vec<CategoryBucket> = Vec::new();
    let mut bucket_index: HashMap<String, usize> = HashMap::new();

    for expense in expenses {
        let category = fold_case(&expense.category);

        let index = *bucket_index.entry(category.clone()).or_insert_with(|| {
            buckets.push(CategoryBucket {
                category,
                expenses: Vec::new(),
                subtotal: 0.0,
            });
            buckets.len() - 1
        });

        let bucket = &mut buckets[index];
        bucket.subtotal += expense.amount;
        bucket.expenses.push(expense);
    }

    ExpenseSummary {
        buckets,
        grand_total,
    }
}
