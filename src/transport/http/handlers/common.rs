use crate::transport::http::types::ErrorBody;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Uniform backend-failure response. The underlying error is logged
/// server-side and never leaked to the client.
pub fn internal_error(err: impl std::fmt::Display) -> Response {
    eprintln!("> Store error: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            message: "Internal server error".to_string(),
        }),
    )
        .into_response()
}

/// Missing-document (and unmatched-route) response.
pub fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            message: "Not Found".to_string(),
        }),
    )
        .into_response()
}
