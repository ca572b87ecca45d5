//! The expense list page: search form, grouped expenses, totals and charts.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    display_preferences::get_dark_mode,
    endpoints::{self, format_endpoint},
    expense::{
        ALL_CATEGORIES, CategoryFilter, ExpenseFilter, distinct_categories, filter_expenses,
        get_all_expenses,
    },
    html::{
        AMOUNT_CELL_STYLE, BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, CATEGORY_BADGE_STYLE,
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_STYLE, base, format_currency,
    },
    summary::{CategoryBucket, ChartImages, ChartTheme, ExpenseSummary, render_charts, summarize},
};

/// The state needed for the expense list page.
#[derive(Debug, Clone)]
pub struct IndexPageState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for IndexPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters of the expense list page.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct IndexQuery {
    /// Text to look for in expense names and categories.
    pub search: Option<String>,
    /// The category to show, "all" or missing for every category.
    pub category: Option<String>,
}

/// Everything the page template needs.
struct IndexView<'a> {
    dark_mode: bool,
    filter: &'a ExpenseFilter,
    categories: &'a [String],
    summary: &'a ExpenseSummary,
    charts: &'a ChartImages,
}

/// Route handler for the expense list page.
///
/// # Errors
/// Fails without rendering a partial page if the expenses cannot be read or
/// the charts cannot be drawn.
pub async fn get_index_page(
    State(state): State<IndexPageState>,
    jar: PrivateCookieJar,
    Query(query): Query<IndexQuery>,
) -> Result<Response, Error> {
    let expenses = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_expenses(&connection)
            .inspect_err(|error| tracing::error!("Failed to retrieve expenses: {error}"))?
    };

    let filter = ExpenseFilter::new(query.search.as_deref(), query.category.as_deref());
    let categories = distinct_categories(&expenses);
    let summary = summarize(filter_expenses(expenses, &filter));

    let dark_mode = get_dark_mode(&jar);
    let theme = ChartTheme::from_dark_mode(dark_mode);
    let chart_summary = summary.clone();
    let charts = tokio::task::spawn_blocking(move || render_charts(&chart_summary, theme))
        .await
        .map_err(|error| Error::ChartRenderError(error.to_string()))?
        .inspect_err(|error| tracing::error!("Could not render charts: {error}"))?;

    let view = IndexView {
        dark_mode,
        filter: &filter,
        categories: &categories,
        summary: &summary,
        charts: &charts,
    };

    Ok(index_view(&view).into_response())
}

fn index_view(view: &IndexView) -> Markup {
    let toggle_label = if view.dark_mode {
        "Light mode"
    } else {
        "Dark mode"
    };

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            header class="page-header"
            {
                h1 { "Expense Tracker" }

                a href=(endpoints::TOGGLE_DARK_MODE) class=(LINK_STYLE) id="toggle-dark-mode"
                {
                    (toggle_label)
                }
            }

            (filter_form(view.filter, view.categories))

            (new_expense_form())

            section class="charts"
            {
                img id="bar-chart" src=(view.charts.bar) alt="Bar chart of expenses by category";
                img id="pie-chart" src=(view.charts.pie) alt="Pie chart of expense distribution";
            }

            (expense_table(view.summary))
        }
    );

    base("Expenses", view.dark_mode, &content)
}

fn filter_form(filter: &ExpenseFilter, categories: &[String]) -> Markup {
    let current = filter.category();

    html!(
        form method="get" action=(endpoints::ROOT) class="filter-form"
        {
            label for="search" class=(FORM_LABEL_STYLE) { "Search" }
            input
                type="search"
                name="search"
                id="search"
                placeholder="Name or category"
                value=(filter.search())
                class=(FORM_TEXT_INPUT_STYLE);

            label for="category" class=(FORM_LABEL_STYLE) { "Category" }
            select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
            {
                option value=(ALL_CATEGORIES) selected[*current == CategoryFilter::All]
                {
                    "All"
                }

                @for category in categories {
                    option
                        value=(category)
                        selected[matches!(current, CategoryFilter::Only(only) if only == category)]
                    {
                        (category)
                    }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Filter" }
        }
    )
}

fn new_expense_form() -> Markup {
    html!(
        form method="post" action=(endpoints::EXPENSES) class="expense-form"
        {
            h2 { "Add Expense" }

            label for="name" class=(FORM_LABEL_STYLE) { "Name" }
            input type="text" name="name" id="name" required class=(FORM_TEXT_INPUT_STYLE);

            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
            input
                type="number"
                name="amount"
                id="amount"
                step="0.01"
                required
                class=(FORM_TEXT_INPUT_STYLE);

            label for="new-category" class=(FORM_LABEL_STYLE) { "Category" }
            input
                type="text"
                name="category"
                id="new-category"
                required
                class=(FORM_TEXT_INPUT_STYLE);

            label for="date" class=(FORM_LABEL_STYLE) { "Date" }
            input type="date" name="date" id="date" required class=(FORM_TEXT_INPUT_STYLE);

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add" }
        }
    )
}

fn expense_table(summary: &ExpenseSummary) -> Markup {
    html!(
        table class=(TABLE_STYLE)
        {
            thead
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                }
            }

            @for bucket in &summary.buckets {
                (bucket_rows(bucket))
            }

            @if summary.is_empty() {
                tbody
                {
                    tr
                    {
                        td colspan="4" class="table-empty" { "No expenses found." }
                    }
                }
            }

            tfoot
            {
                tr
                {
                    th scope="row" class=(TABLE_CELL_STYLE) { "Total" }
                    td id="grand-total" class=(AMOUNT_CELL_STYLE)
                    {
                        (format_currency(summary.grand_total))
                    }
                    td colspan="2" {}
                }
            }
        }
    )
}

fn bucket_rows(bucket: &CategoryBucket) -> Markup {
    html!(
        tbody class="category-group" data-category=(bucket.category)
        {
            tr class="category-header"
            {
                th scope="rowgroup" class=(TABLE_CELL_STYLE)
                {
                    span class=(CATEGORY_BADGE_STYLE) { (bucket.category) }
                }
                td class={ (AMOUNT_CELL_STYLE) " subtotal" }
                {
                    (format_currency(bucket.subtotal))
                }
                td colspan="2" {}
            }

            @for expense in &bucket.expenses {
                tr class="expense-row" data-expense-id=(expense.id)
                {
                    td class=(TABLE_CELL_STYLE) { (expense.name) }
                    td class=(AMOUNT_CELL_STYLE) { (format_currency(expense.amount)) }
                    td class=(TABLE_CELL_STYLE) { (expense.date) }
                    td class=(TABLE_CELL_STYLE)
                    {
                        a
                            href=(format_endpoint(endpoints::DELETE_EXPENSE, expense.id))
                            class=(BUTTON_DELETE_STYLE)
                        {
                            "Delete"
                        }
                    }
                }
            }
        }
    )
}
