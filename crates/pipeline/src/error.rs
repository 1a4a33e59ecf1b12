use herald_platform::PlatformError;
use thiserror::Error;

/// Errors that stop an analytics summary from being produced.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The credential check failed; nothing else was attempted.
    #[error("authentication failed: {source}")]
    AuthFailed {
        #[source]
        source: PlatformError,
        rate_limited: bool,
    },

    /// Listing the account's recent items failed.
    #[error("failed to fetch recent items: {source}")]
    FetchFailed {
        #[source]
        source: PlatformError,
        rate_limited: bool,
    },
}

impl AnalyticsError {
    pub fn auth(source: PlatformError) -> Self {
        let rate_limited = source.is_rate_limited();
        Self::AuthFailed {
            source,
            rate_limited,
        }
    }

    pub fn fetch(source: PlatformError) -> Self {
        let rate_limited = source.is_rate_limited();
        Self::FetchFailed {
            source,
            rate_limited,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::AuthFailed { rate_limited, .. } | Self::FetchFailed { rate_limited, .. } => {
                *rate_limited
            }
        }
    }
}
