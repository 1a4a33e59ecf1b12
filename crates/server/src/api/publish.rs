use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use herald_core::ContentDraft;
use herald_media::ScopedArtifact;
use tracing::{debug, info, instrument};

use super::AppState;
use super::schemas::{
    ErrorResponse, LocalImageTweetRequest, PublishErrorResponse, TweetForm, TweetResponse,
};
use crate::error::ServerError;

/// `POST /api/tweet` -- publish text with an optional uploaded image.
///
/// The uploaded image is streamed to a temporary file that is removed once
/// the publish finishes, whatever the outcome.
#[utoipa::path(
    post,
    path = "/api/tweet",
    tag = "Publish",
    summary = "Publish a post with an uploaded image",
    request_body(content = TweetForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Post published", body = TweetResponse),
        (status = 400, description = "Missing text, empty file name or invalid upload", body = ErrorResponse),
        (status = 429, description = "The platform rate-limited a stage", body = PublishErrorResponse),
        (status = 500, description = "A stage failed", body = PublishErrorResponse)
    )
)]
#[instrument(name = "tweet", skip_all)]
pub async fn tweet(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TweetResponse>, ServerError> {
    let mut text: Option<String> = None;
    let mut image: Option<ScopedArtifact> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(e.body_text()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("text") => {
                text = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ServerError::BadRequest(e.body_text()))?,
                );
            }
            Some("image") => {
                let filename = field.file_name().unwrap_or_default().to_owned();
                if filename.is_empty() {
                    return Err(ServerError::BadRequest("no image selected".into()));
                }
                image = Some(state.ingestor.materialize_upload(&filename, field).await?);
            }
            other => debug!(field = ?other, "ignoring unknown multipart field"),
        }
    }

    let text = text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ServerError::BadRequest("no text provided".into()))?;

    publish(&state, &text, image).await
}

/// `POST /api/tweet-with-local-image` -- publish text with an image already on
/// the server.
///
/// The path is tried as given, then relative to the working directory, then by
/// file name in the public directory. The file is never deleted.
#[utoipa::path(
    post,
    path = "/api/tweet-with-local-image",
    tag = "Publish",
    summary = "Publish a post with a local image",
    request_body = LocalImageTweetRequest,
    responses(
        (status = 200, description = "Post published", body = TweetResponse),
        (status = 400, description = "Missing text or image path", body = ErrorResponse),
        (status = 404, description = "Image file not found", body = ErrorResponse),
        (status = 429, description = "The platform rate-limited a stage", body = PublishErrorResponse),
        (status = 500, description = "A stage failed", body = PublishErrorResponse)
    )
)]
#[instrument(name = "tweet_with_local_image", skip_all)]
pub async fn tweet_with_local_image(
    State(state): State<AppState>,
    body: Result<Json<LocalImageTweetRequest>, JsonRejection>,
) -> Result<Json<TweetResponse>, ServerError> {
    let Json(req) = body.map_err(|e| ServerError::BadRequest(e.body_text()))?;

    let text = req
        .text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ServerError::BadRequest("no text provided".into()))?;
    let image_path = req
        .image_path
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ServerError::BadRequest("no image path provided".into()))?;

    let image = state.resolver.resolve(&image_path).await?;
    publish(&state, &text, Some(image)).await
}

async fn publish(
    state: &AppState,
    text: &str,
    image: Option<ScopedArtifact>,
) -> Result<Json<TweetResponse>, ServerError> {
    let draft = ContentDraft::new(text, image.as_ref().map(|i| i.artifact().clone()));
    let outcome = state.publisher.publish(&draft).await;

    if let Some(image) = image {
        image.release().await;
    }

    let content_id = ServerError::from_outcome(outcome)?;
    info!(content_id = %content_id, "post published");
    Ok(Json(TweetResponse {
        message: "post published successfully".into(),
        content_id,
    }))
}
