//! Defines the expense model and the database queries for expenses.

use rusqlite::{Connection, Row};

use crate::{Error, database_id::ExpenseId};

// ============================================================================
// MODELS
// ============================================================================

/// A record of money spent.
///
/// To create a new `Expense`, use [Expense::build].
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// The ID of the expense, assigned by the database.
    pub id: ExpenseId,
    /// What the money was spent on, e.g. "Coffee".
    pub name: String,
    /// How much was spent.
    pub amount: f64,
    /// A free-form label used to group expenses, e.g. "Food".
    ///
    /// Categories are compared case-insensitively, so "Food" and "food" are
    /// the same category.
    pub category: String,
    /// When the expense happened, stored and displayed as-is.
    pub date: String,
}

impl Expense {
    /// Create a new expense.
    ///
    /// Shortcut for [ExpenseBuilder] for discoverability.
    pub fn build(name: &str, amount: f64, category: &str, date: &str) -> ExpenseBuilder {
        ExpenseBuilder {
            name: name.to_owned(),
            amount,
            category: category.to_owned(),
            date: date.to_owned(),
        }
    }
}

/// The data needed to insert an expense, everything except the ID.
///
/// Pass this to [create_expense] to get an [Expense] back.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseBuilder {
    /// What the money was spent on.
    pub name: String,
    /// How much was spent.
    pub amount: f64,
    /// The category label.
    pub category: String,
    /// When the expense happened.
    pub date: String,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create an expense and return it with its generated ID.
///
/// # Errors
/// Returns [Error::SqlError] if the insert fails.
pub fn create_expense(builder: ExpenseBuilder, connection: &Connection) -> Result<Expense, Error> {
    connection.execute(
        "INSERT INTO expenses (name, amount, category, date) VALUES (?1, ?2, ?3, ?4)",
        (
            &builder.name,
            builder.amount,
            &builder.category,
            &builder.date,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Expense {
        id,
        name: builder.name,
        amount: builder.amount,
        category: builder.category,
        date: builder.date,
    })
}

/// Retrieve a single expense by ID.
///
/// # Errors
/// Returns [Error::NotFound] if there is no expense with `id`.
#[cfg(test)]
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare("SELECT id, name, amount, category, date FROM expenses WHERE id = :id")?
        .query_row(&[(":id", &id)], map_expense_row)
        .map_err(|error| error.into())
}

/// Retrieve every expense in insertion order.
///
/// # Errors
/// Returns [Error::SqlError] if the query or the row mapping fails.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare("SELECT id, name, amount, category, date FROM expenses ORDER BY id ASC")?
        .query_map([], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// The number of rows changed by a statement.
pub type RowsAffected = usize;

/// Delete the expense with `id`.
///
/// Deleting an ID that does not exist is not an error, it affects zero rows.
///
/// # Errors
/// Returns [Error::SqlError] if the delete fails.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM expenses WHERE id = :id", &[(":id", &id)])
        .map_err(|error| error.into())
}

/// Count the stored expenses.
#[cfg(test)]
pub fn count_expenses(connection: &Connection) -> Result<usize, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expenses;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the expense table in the database if it does not exist.
///
/// The columns are nullable so that databases created by earlier versions of
/// the app can be opened as-is.
///
/// # Errors
/// Returns an error if the table cannot be created.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT,
                amount REAL,
                category TEXT,
                date TEXT
                )",
        (),
    )?;

    Ok(())
}

/// Map a row selected as `id, name, amount, category, date` to an [Expense].
///
/// NULL columns are read as empty text or a zero amount.
fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        amount: row.get::<_, Option<f64>>(2)?.unwrap_or_default(),
        category: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        date: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}
