use herald_platform::PlatformError;
use thiserror::Error;

/// Errors specific to the X/Twitter integration.
///
/// These are internal errors that get converted into [`PlatformError`] at the
/// trait boundary.
#[derive(Debug, Error)]
pub enum TwitterError {
    /// An HTTP-level transport error occurred.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error response.
    #[error("X API error: {0}")]
    Api(String),

    /// The API returned HTTP 429 (Too Many Requests).
    #[error("rate limited by X API")]
    RateLimited,

    /// The media file could not be read.
    #[error("failed to read media: {0}")]
    Io(#[from] std::io::Error),

    /// A successful response did not have the expected shape.
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

impl From<TwitterError> for PlatformError {
    fn from(err: TwitterError) -> Self {
        match err {
            TwitterError::Http(e) if e.is_decode() => PlatformError::Serialization(e.to_string()),
            TwitterError::Http(e) => PlatformError::Connection(e.to_string()),
            TwitterError::Api(msg) => PlatformError::Api(msg),
            TwitterError::RateLimited => PlatformError::RateLimited,
            TwitterError::Io(e) => PlatformError::Media(e.to_string()),
            TwitterError::InvalidResponse(msg) => PlatformError::Serialization(msg),
        }
    }
}
