//! Defines the endpoint for creating a new expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::Redirect,
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, Error, endpoints,
    expense::{Expense, ExpenseBuilder, create_expense},
};

/// Expense dates are calendar dates, e.g. "2024-01-31".
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for creating an expense.
///
/// Every field is text so that bad input is reported by [ExpenseForm::validate]
/// instead of being rejected by the extractor.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    /// What the money was spent on.
    #[serde(default)]
    pub name: String,
    /// How much was spent.
    #[serde(default)]
    pub amount: String,
    /// The category label.
    #[serde(default)]
    pub category: String,
    /// When the expense happened, as YYYY-MM-DD.
    #[serde(default)]
    pub date: String,
}

impl ExpenseForm {
    /// Check the form fields and turn them into an [ExpenseBuilder].
    ///
    /// Name, category and date are trimmed before they are stored.
    ///
    /// # Errors
    /// - [Error::EmptyExpenseName] if the name is empty or whitespace.
    /// - [Error::EmptyCategory] if the category is empty or whitespace.
    /// - [Error::InvalidAmount] if the amount is not a finite number.
    /// - [Error::InvalidDate] if the date is not a YYYY-MM-DD calendar date.
    pub fn validate(&self) -> Result<ExpenseBuilder, Error> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::EmptyExpenseName);
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite())
            .ok_or_else(|| Error::InvalidAmount(self.amount.clone()))?;

        let date = self.date.trim();
        Date::parse(date, DATE_FORMAT).map_err(|_| Error::InvalidDate(self.date.clone()))?;

        Ok(Expense::build(name, amount, category, date))
    }
}

/// A route handler for creating a new expense, redirects to the expense list on success.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<ExpenseForm>,
) -> Result<Redirect, Error> {
    let expense = form
        .validate()
        .inspect_err(|error| tracing::debug!("Rejected expense form {form:?}: {error}"))?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expense = create_expense(expense, &connection)
        .inspect_err(|error| tracing::error!("could not create expense: {error}"))?;
    tracing::debug!("Created expense {}", expense.id);

    Ok(Redirect::to(endpoints::ROOT))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::Form;
    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        endpoints,
        expense::{Expense, count_expenses, get_all_expenses},
        test_utils::get_header,
    };

    use super::{CreateExpenseState, ExpenseForm, create_expense_endpoint};

    fn get_test_state() -> CreateExpenseState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        CreateExpenseState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn form(name: &str, amount: &str, category: &str, date: &str) -> ExpenseForm {
        ExpenseForm {
            name: name.to_owned(),
            amount: amount.to_owned(),
            category: category.to_owned(),
            date: date.to_owned(),
        }
    }

    #[tokio::test]
    async fn creates_expense_and_redirects() {
        let state = get_test_state();

        let response = create_expense_endpoint(
            State(state.clone()),
            Form(form(" Coffee ", "3.50", "Food", "2024-01-01")),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(get_header(&response, "location"), endpoints::ROOT);

        let expenses = get_all_expenses(&state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].name, "Coffee");
        assert_eq!(expenses[0].amount, 3.5);
        assert_eq!(expenses[0].category, "Food");
        assert_eq!(expenses[0].date, "2024-01-01");
    }

    #[tokio::test]
    async fn invalid_form_is_bad_request_and_inserts_nothing() {
        let state = get_test_state();

        let response = create_expense_endpoint(
            State(state.clone()),
            Form(form("Coffee", "three fifty", "Food", "2024-01-01")),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(count_expenses(&state.db_connection.lock().unwrap()), Ok(0));
    }

    #[test]
    fn validate_accepts_negative_amounts() {
        let got = form("Refund", "-12.5", "Shopping", "2024-02-29").validate();

        assert_eq!(got, Ok(Expense::build("Refund", -12.5, "Shopping", "2024-02-29")));
    }

    #[test]
    fn validate_rejects_empty_name() {
        assert_eq!(
            form("  ", "1", "Food", "2024-01-01").validate(),
            Err(Error::EmptyExpenseName)
        );
    }

    #[test]
    fn validate_rejects_empty_category() {
        assert_eq!(
            form("Coffee", "1", "\t", "2024-01-01").validate(),
            Err(Error::EmptyCategory)
        );
    }

    #[test]
    fn validate_rejects_non_numeric_and_non_finite_amounts() {
        for amount in ["", "abc", "NaN", "inf", "1,000"] {
            assert_eq!(
                form("Coffee", amount, "Food", "2024-01-01").validate(),
                Err(Error::InvalidAmount(amount.to_owned())),
                "amount {amount:?} should be rejected"
            );
        }
    }

    #[test]
    fn validate_rejects_malformed_dates() {
        for date in ["", "01/02/2024", "2024-13-01", "2023-02-29", "yesterday"] {
            assert_eq!(
                form("Coffee", "1", "Food", date).validate(),
                Err(Error::InvalidDate(date.to_owned())),
                "date {date:?} should be rejected"
            );
        }
    }

    #[test]
    fn form_deserializes_from_urlencoded_body() {
        let form: ExpenseForm =
            serde_html_form::from_str("name=Bus&amount=2&category=Transport&date=2024-01-02")
                .unwrap();

        assert_eq!(
            form.validate(),
            Ok(Expense::build("Bus", 2.0, "Transport", "2024-01-02"))
        );
    }
}
