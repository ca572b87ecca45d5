//! The pages shown when a request cannot be served.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

const DEFAULT_ERROR_DESCRIPTION: &str = "Sorry, something went wrong.";
const DEFAULT_ERROR_FIX: &str = "Try again later or check the server logs.";

/// Fallback route handler for unknown paths.
pub async fn get_404_not_found() -> Response {
    not_found_response()
}

/// A 404 page pointing back to the expense list.
pub fn not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        error_view(
            "Not Found",
            "404",
            "Something's missing.",
            "Sorry, we can't find that page. Your expenses are on the home page.",
        ),
    )
        .into_response()
}

/// A 400 page explaining what was wrong with the submitted data.
pub fn bad_request_response(description: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        error_view(
            "Bad Request",
            "400",
            description,
            "Go back, check the expense details and try again.",
        ),
    )
        .into_response()
}

/// A generic 500 page. The cause should be logged, not shown to the client.
pub fn internal_server_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_view(
            "Internal Server Error",
            "500",
            DEFAULT_ERROR_DESCRIPTION,
            DEFAULT_ERROR_FIX,
        ),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::test_utils::{assert_content_type, assert_valid_html, parse_html_document};

    use super::{
        DEFAULT_ERROR_DESCRIPTION, bad_request_response, get_404_not_found,
        internal_server_error_response,
    };

    #[tokio::test]
    async fn renders_404_page() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
    }

    #[tokio::test]
    async fn renders_400_page_with_description() {
        let response = bad_request_response("\"abc\" is not a valid amount");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_document(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("\"abc\" is not a valid amount"), "{text}");
    }

    #[tokio::test]
    async fn renders_500_page() {
        let response = internal_server_error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_content_type(&response, "text/html; charset=utf-8");

        let html = parse_html_document(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains(DEFAULT_ERROR_DESCRIPTION), "{text}");
    }
}
