use herald_core::{
    AccountProfile, AnalyticsSummary, AnalyticsTotals, PublishStage, PublishedItemRecord,
    TimelineBucket,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response body for `GET /api/health`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "Herald publishing service is running")]
    pub message: String,
    /// Name of the platform posts are published to.
    #[schema(example = "twitter")]
    pub platform: String,
}

/// Generic error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    #[schema(example = "no text provided")]
    pub error: String,
}

/// Error body for a failed publish.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublishErrorResponse {
    #[schema(example = "rate limit exceeded during media upload; please try again later")]
    pub error: String,
    /// Stage the publish stopped at.
    pub stage: PublishStage,
    /// Whether the platform reported a rate limit.
    pub rate_limited: bool,
}

/// Request body for `POST /api/save-image`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveImageRequest {
    /// Image as a `data:<mime>;base64,<payload>` URL.
    #[serde(alias = "imageData")]
    #[schema(example = "data:image/png;base64,iVBORw0KGgo=")]
    pub image_data: Option<String>,
    /// Desired file name. The extension is replaced to match the MIME type and
    /// a unique suffix is added.
    #[schema(example = "campaign.png")]
    pub filename: Option<String>,
}

/// Response body for `POST /api/save-image`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveImageResponse {
    #[schema(example = "image saved successfully")]
    pub message: String,
    /// Path of the saved file, usable with `/api/tweet-with-local-image`.
    #[schema(example = "temp_uploads/campaign_1741600000000_0.png")]
    pub image_path: String,
}

/// Multipart form accepted by `POST /api/tweet`.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct TweetForm {
    /// Post text. Longer than 280 characters is truncated.
    pub text: String,
    /// Optional image file.
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

/// Request body for `POST /api/tweet-with-local-image`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LocalImageTweetRequest {
    /// Post text. Longer than 280 characters is truncated.
    #[schema(example = "New drop this Friday")]
    pub text: Option<String>,
    /// Path of an image already on the server.
    #[serde(alias = "imagePath")]
    #[schema(example = "temp_uploads/campaign_1741600000000_0.png")]
    pub image_path: Option<String>,
}

/// Response body for a successful publish.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TweetResponse {
    #[schema(example = "post published successfully")]
    pub message: String,
    /// Platform identifier of the new post.
    #[schema(example = "1880122259378962432")]
    pub content_id: String,
}

/// Response body for `GET /api/twitter/fetch-analytics`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsResponse {
    pub profile: AccountProfile,
    pub totals: AnalyticsTotals,
    /// Average engagement per item as a percentage with one decimal place.
    #[schema(example = "800.0%")]
    pub engagement_rate: String,
    /// One bucket per day, oldest first.
    pub timeline: Vec<TimelineBucket>,
    /// Recent items, newest first.
    pub items: Vec<PublishedItemRecord>,
    pub best_item: Option<PublishedItemRecord>,
}

impl From<AnalyticsSummary> for AnalyticsResponse {
    fn from(summary: AnalyticsSummary) -> Self {
        Self {
            profile: summary.profile,
            totals: summary.totals,
            engagement_rate: summary.engagement_rate.to_string(),
            timeline: summary.timeline,
            items: summary.items,
            best_item: summary.best_item,
        }
    }
}
