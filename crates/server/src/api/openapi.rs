#![allow(clippy::needless_for_each)]

use axum::Json;
use herald_core::{
    AccountProfile, AnalyticsTotals, EngagementMetrics, PublishStage, PublishedItemRecord,
    TimelineBucket,
};
use utoipa::OpenApi;

use super::schemas::{
    AnalyticsResponse, ErrorResponse, HealthResponse, LocalImageTweetRequest,
    PublishErrorResponse, SaveImageRequest, SaveImageResponse, TweetForm, TweetResponse,
};

#[derive(utoipa::OpenApi)]
#[openapi(
    info(
        title = "Herald API",
        version = "0.1.0",
        description = "Publish posts with images to a social platform and summarize their engagement.",
        license(name = "Apache-2.0")
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Media", description = "Image ingestion"),
        (name = "Publish", description = "Staged post publishing"),
        (name = "Analytics", description = "Engagement summaries")
    ),
    paths(
        super::health::health,
        super::media::save_image,
        super::publish::tweet,
        super::publish::tweet_with_local_image,
        super::analytics::fetch_analytics,
    ),
    components(schemas(
        HealthResponse,
        ErrorResponse,
        PublishErrorResponse,
        SaveImageRequest,
        SaveImageResponse,
        TweetForm,
        LocalImageTweetRequest,
        TweetResponse,
        AnalyticsResponse,
        AccountProfile,
        AnalyticsTotals,
        EngagementMetrics,
        PublishStage,
        PublishedItemRecord,
        TimelineBucket,
    ))
)]
pub struct ApiDoc;

/// `GET /api-doc/openapi.json` -- the OpenAPI document for this server.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
