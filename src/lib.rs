//! Expense Tracker is a small web app for recording expenses and seeing
//! where the money goes.
//!
//! This library provides a web server that directly serves HTML pages: a
//! searchable list of expenses grouped by category, plus a bar chart and a
//! pie chart of the category totals.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::response::{IntoResponse, Response};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod database_id;
mod db;
mod display_preferences;
mod endpoints;
mod error_pages;
mod expense;
mod html;
mod index_page;
mod logging;
mod routing;
mod summary;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use expense::{Expense, ExpenseBuilder, ExpenseId, create_expense};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

use crate::error_pages::{
    bad_request_response, internal_server_error_response, not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The charting library failed to render a chart.
    ///
    /// The string holds the underlying error and should only be logged on the server.
    #[error("could not render chart: {0}")]
    ChartRenderError(String),

    /// An empty string (or just whitespace) was used as an expense name.
    #[error("expense name cannot be empty")]
    EmptyExpenseName,

    /// An empty string (or just whitespace) was used as an expense category.
    #[error("expense category cannot be empty")]
    EmptyCategory,

    /// The amount could not be parsed as a finite number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The date was not a calendar date in the form YYYY-MM-DD.
    #[error("\"{0}\" is not a valid date, expected YYYY-MM-DD")]
    InvalidDate(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => not_found_response(),
            Error::EmptyExpenseName
            | Error::EmptyCategory
            | Error::InvalidAmount(_)
            | Error::InvalidDate(_) => bad_request_response(&self.to_string()),
            Error::DatabaseLockError => internal_server_error_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                internal_server_error_response()
            }
        }
    }
}
