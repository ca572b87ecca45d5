//! The URIs served by the app.
//!
//! For endpoints that take a parameter, e.g., '/delete/{expense_id}', use [format_endpoint].

/// The expense list with its search form and charts.
pub const ROOT: &str = "/";
/// The route for deleting an expense.
///
/// This is a GET route so that a plain link can delete a row.
pub const DELETE_EXPENSE: &str = "/delete/{expense_id}";
/// The route that flips the dark mode preference for the current session.
pub const TOGGLE_DARK_MODE: &str = "/toggle-dark-mode";
/// The route for creating an expense from a form submission.
pub const EXPENSES: &str = "/expenses";
/// The route for static files.
pub const STATIC: &str = "/static";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is everything from the first left brace up to and including
/// the next right brace, e.g. '{expense_id}' in '/delete/{expense_id}'.
/// An unterminated parameter runs to the end of the path.
///
/// If no parameter is found in `endpoint_path`, the original path is returned.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let end = endpoint_path[start..]
        .find('}')
        .map(|offset| start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!("{}{id}{}", &endpoint_path[..start], &endpoint_path[end..])
}

// These tests are here so that we know the routes will parse as URIs.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    #[track_caller]
    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri} is not a valid URI");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::DELETE_EXPENSE, 1));
        assert_endpoint_is_valid_uri(endpoints::TOGGLE_DARK_MODE);
        assert_endpoint_is_valid_uri(endpoints::EXPENSES);
        assert_endpoint_is_valid_uri(endpoints::STATIC);
    }

    #[test]
    fn replaces_parameter_with_id() {
        assert_eq!(format_endpoint(endpoints::DELETE_EXPENSE, 42), "/delete/42");
        assert_eq!(format_endpoint("/hello/{world}/bye", 1), "/hello/1/bye");
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        assert_eq!(format_endpoint("/hello/world", 1), "/hello/world");
    }

    #[test]
    fn unterminated_parameter_runs_to_end() {
        assert_eq!(format_endpoint("/hello/{world", 7), "/hello/7");
    }
}
