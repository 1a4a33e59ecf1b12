pub mod analytics;
pub mod health;
pub mod media;
pub mod openapi;
pub mod publish;
pub mod schemas;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use herald_media::{LocalArtifactResolver, MediaIngestor};
use herald_pipeline::{AnalyticsAggregator, Publisher};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Room for multipart framing and the JSON envelope around an image.
const BODY_OVERHEAD: usize = 64 * 1024;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Materializes inline and uploaded images.
    pub ingestor: MediaIngestor,
    /// Finds images referenced by path.
    pub resolver: LocalArtifactResolver,
    /// Runs the staged publish.
    pub publisher: Publisher,
    /// Builds engagement summaries.
    pub analytics: AnalyticsAggregator,
}

/// Build the Axum router with all API routes and middleware.
pub fn router(state: AppState) -> Router {
    // A base64 data URL is a third larger than the image it carries.
    let max_bytes = usize::try_from(state.ingestor.max_bytes()).unwrap_or(usize::MAX);
    let body_limit = max_bytes
        .saturating_add(max_bytes / 3)
        .saturating_add(BODY_OVERHEAD);

    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/save-image", post(media::save_image))
        .route("/api/tweet", post(publish::tweet))
        .route(
            "/api/tweet-with-local-image",
            post(publish::tweet_with_local_image),
        )
        .route(
            "/api/twitter/fetch-analytics",
            get(analytics::fetch_analytics),
        )
        .route("/api-doc/openapi.json", get(openapi::openapi_json))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
