use std::fmt;

use serde::Deserialize;

/// Environment variable consulted when `access_token` is absent from the file.
pub const ACCESS_TOKEN_ENV: &str = "HERALD_ACCESS_TOKEN";

/// Which platform implementation the server publishes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    /// The X/Twitter v2 API.
    #[default]
    Twitter,
    /// Log every call and succeed without network access.
    Log,
}

/// Outbound platform configuration.
///
/// # Example
///
/// ```toml
/// [platform]
/// type = "twitter"
/// access_token = "..."
/// request_timeout_seconds = 30
/// ```
#[derive(Deserialize)]
pub struct PlatformConfig {
    #[serde(rename = "type", default)]
    pub kind: PlatformKind,
    /// OAuth 2.0 user-context access token (required for `"twitter"`).
    pub access_token: Option<String>,
    /// REST API base URL.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Media upload base URL. Defaults to `api_base_url`.
    pub upload_base_url: Option<String>,
    /// Base URL for post permalinks.
    #[serde(default = "default_web_base_url")]
    pub web_base_url: String,
    /// Account name reported by the `"log"` platform.
    #[serde(default = "default_username")]
    pub username: String,
    /// Timeout for each HTTP request made by the platform client.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    /// Upper bound for each platform call made by the pipeline.
    #[serde(default = "default_timeout")]
    pub call_timeout_seconds: u64,
}

impl PlatformConfig {
    /// The configured access token, falling back to `env_token` (normally the
    /// value of [`ACCESS_TOKEN_ENV`]). Blank values count as missing.
    pub fn access_token_or(&self, env_token: Option<String>) -> Option<String> {
        self.access_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| env_token.filter(|t| !t.trim().is_empty()))
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            kind: PlatformKind::default(),
            access_token: None,
            api_base_url: default_api_base_url(),
            upload_base_url: None,
            web_base_url: default_web_base_url(),
            username: default_username(),
            request_timeout_seconds: default_timeout(),
            call_timeout_seconds: default_timeout(),
        }
    }
}

impl fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("kind", &self.kind)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("api_base_url", &self.api_base_url)
            .field("upload_base_url", &self.upload_base_url)
            .field("web_base_url", &self.web_base_url)
            .field("username", &self.username)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("call_timeout_seconds", &self.call_timeout_seconds)
            .finish()
    }
}

fn default_api_base_url() -> String {
    "https://api.x.com".to_owned()
}

fn default_web_base_url() -> String {
    "https://x.com".to_owned()
}

fn default_username() -> String {
    "herald".to_owned()
}

fn default_timeout() -> u64 {
    30
}
