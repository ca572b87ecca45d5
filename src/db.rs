//! Schema bootstrap for the application's SQLite database.

use rusqlite::Connection;

use crate::{Error, expense::create_expense_table};

/// Create the tables for the domain models if they do not exist.
///
/// Safe to call on every start-up, existing data is left untouched.
///
/// # Errors
/// Returns an error if a table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_expense_table(connection)?;

    Ok(())
}
