use crate::transport::http::types::{AppState, ErrorBody};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy (store reachable)"),
        (status = 503, description = "Service is unhealthy (store unreachable)", body = ErrorBody)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    match sqlx::query("SELECT 1").execute(state.store.pool()).await {
        Ok(_) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ok" })),
        )
            .into_response(),
        Err(e) => {
            eprintln!("> Store ping failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorBody {
                    message: "Service unavailable".to_string(),
                }),
            )
                .into_response()
        }
    }
}
