//! The fallback response for unknown routes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Respond with 404 and a JSON error body for any route that is not registered.
pub async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}

#[cfg(test)]
mod not_found_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_utils::parse_json_body;

    use super::get_404_not_found;

    #[tokio::test]
    async fn responds_with_404_and_json_error() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(parse_json_body(response).await, json!({ "error": "Not found" }));
    }
}
