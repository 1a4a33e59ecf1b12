use std::time::Duration;

/// Configuration for the X/Twitter platform.
#[derive(Clone)]
pub struct TwitterConfig {
    /// OAuth 2.0 user-context access token sent as a bearer token.
    pub access_token: String,

    /// Base URL for the REST API. Override this for testing against a mock
    /// server.
    pub api_base_url: String,

    /// Base URL for media uploads. Defaults to the API base URL.
    pub upload_base_url: String,

    /// Base URL used to build public permalinks to posts.
    pub web_base_url: String,

    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,
}

impl std::fmt::Debug for TwitterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterConfig")
            .field("access_token", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("upload_base_url", &self.upload_base_url)
            .field("web_base_url", &self.web_base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl TwitterConfig {
    /// Create a new configuration with the given access token.
    ///
    /// Uses the public API (`https://api.x.com`) for both REST calls and
    /// media uploads, and a 30 second request timeout.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            api_base_url: "https://api.x.com".to_owned(),
            upload_base_url: "https://api.x.com".to_owned(),
            web_base_url: "https://x.com".to_owned(),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Override the API base URL (useful for testing).
    ///
    /// The upload URL follows unless it is overridden afterwards.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.upload_base_url.clone_from(&url);
        self.api_base_url = url;
        self
    }

    /// Override the media upload base URL.
    #[must_use]
    pub fn with_upload_base_url(mut self, url: impl Into<String>) -> Self {
        self.upload_base_url = url.into();
        self
    }

    /// Override the base URL for permalinks.
    #[must_use]
    pub fn with_web_base_url(mut self, url: impl Into<String>) -> Self {
        self.web_base_url = url.into();
        self
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
