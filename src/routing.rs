//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    display_preferences::toggle_dark_mode_endpoint,
    endpoints,
    error_pages::get_404_not_found,
    expense::{create_expense_endpoint, delete_expense_endpoint},
    index_page::get_index_page,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::EXPENSES, post(create_expense_endpoint))
        .route(endpoints::DELETE_EXPENSE, get(delete_expense_endpoint))
        .route(endpoints::TOGGLE_DARK_MODE, get(toggle_dark_mode_endpoint))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
