//! Expense management.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and `ExpenseBuilder` for creating expenses
//! - Database functions for storing, reading and deleting expenses
//! - The search/category filter applied to the expense list
//! - Route handlers for creating and deleting expenses

mod core;
mod create_endpoint;
mod delete_endpoint;
mod query;

pub use core::{
    Expense, ExpenseBuilder, create_expense, create_expense_table, delete_expense,
    get_all_expenses,
};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use query::{
    ALL_CATEGORIES, CategoryFilter, ExpenseFilter, distinct_categories, filter_expenses,
};
pub(crate) use query::fold_case;

pub use crate::database_id::ExpenseId;

#[cfg(test)]
pub use core::{count_expenses, get_expense};
