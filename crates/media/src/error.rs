use thiserror::Error;

/// Errors produced while ingesting or resolving media.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The input was not a `data:<mime>;base64,<payload>` URL.
    #[error("invalid data URL format")]
    InvalidFormat,

    /// The base64 payload could not be decoded.
    #[error("failed to decode image data: {0}")]
    DecodeFailed(String),

    /// The filename was empty after sanitizing.
    #[error("invalid filename: {0:?}")]
    InvalidFilename(String),

    /// The image exceeds the configured size cap.
    #[error("image is larger than the {limit} byte limit")]
    TooLarge { limit: u64 },

    /// No file exists at the requested path or any fallback location.
    #[error("image file not found: {0}")]
    NotFound(String),

    /// The upload stream failed part-way through.
    #[error("upload stream failed: {0}")]
    Stream(String),

    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// Whether the error was caused by the caller's input rather than the
    /// server's environment.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            MediaError::InvalidFormat.to_string(),
            "invalid data URL format"
        );
        assert_eq!(
            MediaError::TooLarge { limit: 10 }.to_string(),
            "image is larger than the 10 byte limit"
        );
        assert_eq!(
            MediaError::NotFound("/a.png".into()).to_string(),
            "image file not found: /a.png"
        );
    }

    #[test]
    fn io_is_not_a_client_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!MediaError::from(io).is_client_error());
        assert!(MediaError::InvalidFormat.is_client_error());
        assert!(MediaError::DecodeFailed("bad".into()).is_client_error());
    }
}
