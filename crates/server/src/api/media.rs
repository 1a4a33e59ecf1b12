use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use herald_media::default_filename;
use tracing::{info, instrument};

use super::AppState;
use super::schemas::{ErrorResponse, SaveImageRequest, SaveImageResponse};
use crate::error::ServerError;

/// `POST /api/save-image` -- decode an inline image and keep it on disk.
///
/// The saved path can later be published with `/api/tweet-with-local-image`.
#[utoipa::path(
    post,
    path = "/api/save-image",
    tag = "Media",
    summary = "Save an inline image",
    description = "Decodes a base64 data URL and writes it to the upload directory. The file extension follows the declared MIME type (png, gif, otherwise jpg).",
    request_body = SaveImageRequest,
    responses(
        (status = 200, description = "Image saved", body = SaveImageResponse),
        (status = 400, description = "Missing data, malformed data URL, undecodable payload, unusable filename or oversized image", body = ErrorResponse),
        (status = 500, description = "The image could not be written", body = ErrorResponse)
    )
)]
#[instrument(name = "save_image", skip_all)]
pub async fn save_image(
    State(state): State<AppState>,
    body: Result<Json<SaveImageRequest>, JsonRejection>,
) -> Result<Json<SaveImageResponse>, ServerError> {
    let Json(req) = body.map_err(|e| ServerError::BadRequest(e.body_text()))?;

    let image_data = req
        .image_data
        .filter(|d| !d.is_empty())
        .ok_or_else(|| ServerError::BadRequest("no image data provided".into()))?;
    let filename = req
        .filename
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(default_filename);

    let scoped = state
        .ingestor
        .materialize_data_url(&image_data, &filename)
        .await?;
    let artifact = scoped.persist();
    info!(
        path = %artifact.path.display(),
        size_bytes = artifact.size_bytes,
        "image saved"
    );

    Ok(Json(SaveImageResponse {
        message: "image saved successfully".into(),
        image_path: artifact.path.display().to_string(),
    }))
}
