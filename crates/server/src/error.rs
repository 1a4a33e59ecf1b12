use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use herald_core::{PublishOutcome, PublishStage};
use herald_media::MediaError;
use herald_pipeline::AnalyticsError;
use thiserror::Error;

/// Errors that can occur when running the Herald server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The request was missing a field or could not be parsed.
    #[error("{0}")]
    BadRequest(String),

    /// Ingesting or resolving an image failed.
    #[error(transparent)]
    Media(#[from] MediaError),

    /// A publish call stopped at `stage`.
    #[error("{message}")]
    Publish {
        stage: PublishStage,
        rate_limited: bool,
        message: String,
    },

    /// Building an analytics summary failed.
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

impl ServerError {
    /// Convert a failed outcome into an error; successes yield their content id.
    pub fn from_outcome(outcome: PublishOutcome) -> Result<String, Self> {
        match outcome {
            PublishOutcome::Success { content_id } => Ok(content_id),
            PublishOutcome::Failure {
                stage,
                rate_limited,
                message,
            } => Err(Self::Publish {
                stage,
                rate_limited,
                message,
            }),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Config(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Media(MediaError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Media(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Media(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Publish {
                rate_limited: true,
                ..
            } => StatusCode::TOO_MANY_REQUESTS,
            Self::Publish { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Analytics(AnalyticsError::AuthFailed { .. }) => StatusCode::UNAUTHORIZED,
            Self::Analytics(AnalyticsError::FetchFailed { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "request rejected");
        }

        let body = match &self {
            Self::Publish {
                stage,
                rate_limited,
                message,
            } => serde_json::json!({
                "error": message,
                "stage": stage,
                "rate_limited": rate_limited,
            }),
            other => serde_json::json!({ "error": other.to_string() }),
        };

        (status, axum::Json(body)).into_response()
    }
}
