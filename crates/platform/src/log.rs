use chrono::Utc;
use herald_core::{AccountProfile, MediaArtifact, MediaRef, RecentItem};
use tracing::info;

use crate::error::PlatformError;
use crate::platform::SocialPlatform;

/// A platform that logs every call and succeeds without any external I/O.
///
/// Useful for local development and demos where no platform credentials are
/// available. It has no history, so analytics always come back empty.
pub struct LogPlatform {
    username: String,
}

impl LogPlatform {
    /// Create a new `LogPlatform` posting as `username`.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

impl SocialPlatform for LogPlatform {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "log"
    }

    #[allow(clippy::unused_async)]
    async fn verify_credentials(&self) -> Result<AccountProfile, PlatformError> {
        Ok(AccountProfile {
            id: "0".into(),
            username: self.username.clone(),
            display_name: self.username.clone(),
            ..AccountProfile::default()
        })
    }

    #[allow(clippy::unused_async)]
    async fn upload_media(&self, artifact: &MediaArtifact) -> Result<MediaRef, PlatformError> {
        info!(
            path = %artifact.path.display(),
            media_type = %artifact.media_type,
            size_bytes = artifact.size_bytes,
            "log platform accepted media upload"
        );
        Ok(MediaRef(format!(
            "log-{}",
            artifact.file_name().unwrap_or("media")
        )))
    }

    #[allow(clippy::unused_async)]
    async fn create_post(
        &self,
        text: &str,
        media: Option<&MediaRef>,
    ) -> Result<String, PlatformError> {
        let id = Utc::now().timestamp_millis().to_string();
        info!(
            id = %id,
            chars = text.chars().count(),
            media = media.map(MediaRef::as_str),
            "log platform created post"
        );
        Ok(id)
    }

    #[allow(clippy::unused_async)]
    async fn recent_items(
        &self,
        _account: &AccountProfile,
        _max_items: usize,
    ) -> Result<Vec<RecentItem>, PlatformError> {
        Ok(Vec::new())
    }
}
