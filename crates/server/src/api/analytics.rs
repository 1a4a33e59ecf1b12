use axum::Json;
use axum::extract::State;
use tracing::instrument;

use super::AppState;
use super::schemas::{AnalyticsResponse, ErrorResponse};
use crate::error::ServerError;

/// `GET /api/twitter/fetch-analytics` -- engagement summary of recent posts.
#[utoipa::path(
    get,
    path = "/api/twitter/fetch-analytics",
    tag = "Analytics",
    summary = "Fetch analytics",
    description = "Fetches the account's recent posts and returns totals, a daily timeline for the trailing window, every item with its metrics, and the best-performing item.",
    responses(
        (status = 200, description = "Analytics summary", body = AnalyticsResponse),
        (status = 401, description = "Platform credentials rejected", body = ErrorResponse),
        (status = 500, description = "Fetching recent posts failed", body = ErrorResponse)
    )
)]
#[instrument(name = "fetch_analytics", skip_all)]
pub async fn fetch_analytics(
    State(state): State<AppState>,
) -> Result<Json<AnalyticsResponse>, ServerError> {
    let summary = state.analytics.summarize().await?;
    Ok(Json(summary.into()))
}
