use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::Redirect,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints,
    expense::{ExpenseId, delete_expense},
};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an expense, redirects to the expense list.
///
/// Deleting an expense that does not exist is not an error, the client is
/// redirected all the same.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<Redirect, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let rows_affected = delete_expense(expense_id, &connection)
        .inspect_err(|error| tracing::error!("Could not delete expense {expense_id}: {error}"))?;

    if rows_affected == 0 {
        tracing::debug!("Tried to delete expense {expense_id} but it does not exist");
    }

    Ok(Redirect::to(endpoints::ROOT))
}
