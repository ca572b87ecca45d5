//! The search and category filter for the expense list.
//!
//! Matching is case-insensitive: categories, names and the search text are
//! all lower-cased before they are compared.

use std::collections::BTreeSet;

use crate::expense::Expense;

/// The value of the category parameter that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Which categories to keep in the expense list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Keep every category.
    #[default]
    All,
    /// Keep only expenses whose lower-cased category equals the inner
    /// (already lower-cased) value.
    Only(String),
}

impl CategoryFilter {
    /// Parse the category query parameter.
    ///
    /// A missing parameter and any casing of "all" mean [CategoryFilter::All].
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(fold_case) {
            None => CategoryFilter::All,
            Some(category) if category == ALL_CATEGORIES => CategoryFilter::All,
            Some(category) => CategoryFilter::Only(category),
        }
    }

    fn matches(&self, expense: &Expense) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => fold_case(&expense.category) == *category,
        }
    }
}

/// The filters from the search form, applied together (AND).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpenseFilter {
    /// Lower-cased, trimmed search text. Empty means no search.
    search: String,
    /// The category selection.
    category: CategoryFilter,
}

impl ExpenseFilter {
    /// Build a filter from the raw `search` and `category` query parameters.
    pub fn new(search: Option<&str>, category: Option<&str>) -> Self {
        Self {
            search: search.map(|text| fold_case(text.trim())).unwrap_or_default(),
            category: CategoryFilter::from_param(category),
        }
    }

    /// The normalised search text, empty if there is no search.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// The category selection.
    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// Whether `expense` passes both the category filter and the search.
    ///
    /// The search matches a substring of either the name or the category.
    pub fn matches(&self, expense: &Expense) -> bool {
        if !self.category.matches(expense) {
            return false;
        }

        self.search.is_empty()
            || fold_case(&expense.name).contains(&self.search)
            || fold_case(&expense.category).contains(&self.search)
    }
}

/// Keep the expenses that match `filter`, preserving their order.
pub fn filter_expenses(expenses: Vec<Expense>, filter: &ExpenseFilter) -> Vec<Expense> {
    expenses
        .into_iter()
        .filter(|expense| filter.matches(expense))
        .collect()
}

/// The distinct lower-cased categories of `expenses`, sorted ascending.
pub fn distinct_categories(expenses: &[Expense]) -> Vec<String> {
    expenses
        .iter()
        .map(|expense| fold_case(&expense.category))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The case folding used for every comparison and grouping of expense text.
pub(crate) fn fold_case(text: &str) -> String {
    text.to_lowercase()
}
