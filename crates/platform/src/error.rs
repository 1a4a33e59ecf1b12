use std::time::Duration;

use thiserror::Error;

use crate::classify::is_rate_limit_message;

/// Errors returned by platform operations.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// A network or transport-level error occurred.
    #[error("connection error: {0}")]
    Connection(String),

    /// The platform API rejected the request.
    #[error("API error: {0}")]
    Api(String),

    /// The platform answered with HTTP 429.
    #[error("rate limit exceeded")]
    RateLimited,

    /// The operation did not complete within the allowed duration.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Local media could not be read for upload.
    #[error("media error: {0}")]
    Media(String),

    /// The platform's response could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The integration was given invalid configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl PlatformError {
    /// Whether this error reports a rate limit.
    ///
    /// Classification runs on the rendered message, so an API error whose
    /// text mentions a rate limit is treated the same as an HTTP 429.
    pub fn is_rate_limited(&self) -> bool {
        is_rate_limit_message(&self.to_string())
    }
}
