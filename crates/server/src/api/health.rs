use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::schemas::HealthResponse;

/// `GET /api/health` -- liveness check.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    summary = "Health check",
    description = "Returns service status and the platform posts are published to.",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let body = HealthResponse {
        status: "ok".into(),
        message: "Herald publishing service is running".into(),
        platform: state.publisher.platform_name().to_owned(),
    };

    (StatusCode::OK, Json(body))
}
