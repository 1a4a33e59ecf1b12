use async_trait::async_trait;
use herald_core::{AccountProfile, MediaArtifact, MediaRef, RecentItem};

use crate::error::PlatformError;

/// Strongly-typed platform trait with native `async fn`.
///
/// This trait is **not** object-safe because its methods return opaque
/// futures. Code that needs dynamic dispatch uses [`DynPlatform`], which every
/// `SocialPlatform` implements through a blanket implementation.
pub trait SocialPlatform: Send + Sync {
    /// Short name of the platform, used in logs and health output.
    fn name(&self) -> &str;

    /// Verify the configured credentials and return the authenticated account.
    fn verify_credentials(
        &self,
    ) -> impl std::future::Future<Output = Result<AccountProfile, PlatformError>> + Send;

    /// Upload a media file and return the platform's reference to it.
    fn upload_media(
        &self,
        artifact: &MediaArtifact,
    ) -> impl std::future::Future<Output = Result<MediaRef, PlatformError>> + Send;

    /// Create a post, optionally attaching previously uploaded media.
    ///
    /// Returns the identifier of the new post.
    fn create_post(
        &self,
        text: &str,
        media: Option<&MediaRef>,
    ) -> impl std::future::Future<Output = Result<String, PlatformError>> + Send;

    /// List up to `max_items` of the account's most recent posts, newest
    /// first, with engagement metrics and media attachments.
    fn recent_items(
        &self,
        account: &AccountProfile,
        max_items: usize,
    ) -> impl std::future::Future<Output = Result<Vec<RecentItem>, PlatformError>> + Send;
}

/// Object-safe platform trait for use behind `Arc<dyn DynPlatform>`.
///
/// Implement [`SocialPlatform`] and rely on the blanket implementation rather
/// than implementing this directly; test doubles are the exception.
#[async_trait]
pub trait DynPlatform: Send + Sync {
    fn name(&self) -> &str;

    async fn verify_credentials(&self) -> Result<AccountProfile, PlatformError>;

    async fn upload_media(&self, artifact: &MediaArtifact) -> Result<MediaRef, PlatformError>;

    async fn create_post(
        &self,
        text: &str,
        media: Option<&MediaRef>,
    ) -> Result<String, PlatformError>;

    async fn recent_items(
        &self,
        account: &AccountProfile,
        max_items: usize,
    ) -> Result<Vec<RecentItem>, PlatformError>;
}

#[async_trait]
impl<T: SocialPlatform + Sync> DynPlatform for T {
    fn name(&self) -> &str {
        SocialPlatform::name(self)
    }

    async fn verify_credentials(&self) -> Result<AccountProfile, PlatformError> {
        SocialPlatform::verify_credentials(self).await
    }

    async fn upload_media(&self, artifact: &MediaArtifact) -> Result<MediaRef, PlatformError> {
        SocialPlatform::upload_media(self, artifact).await
    }

    async fn create_post(
        &self,
        text: &str,
        media: Option<&MediaRef>,
    ) -> Result<String, PlatformError> {
        SocialPlatform::create_post(self, text, media).await
    }

    async fn recent_items(
        &self,
        account: &AccountProfile,
        max_items: usize,
    ) -> Result<Vec<RecentItem>, PlatformError> {
        SocialPlatform::recent_items(self, account, max_items).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use herald_core::MediaType;

    use super::*;

    /// A platform that either accepts everything or rejects everything.
    struct MockPlatform {
        should_fail: bool,
    }

    impl SocialPlatform for MockPlatform {
        fn name(&self) -> &str {
            "mock"
        }

        async fn verify_credentials(&self) -> Result<AccountProfile, PlatformError> {
            if self.should_fail {
                return Err(PlatformError::Api("Unauthorized".into()));
            }
            Ok(AccountProfile {
                id: "42".into(),
                username: "brand".into(),
                ..AccountProfile::default()
            })
        }

        async fn upload_media(&self, artifact: &MediaArtifact) -> Result<MediaRef, PlatformError> {
            if self.should_fail {
                return Err(PlatformError::RateLimited);
            }
            Ok(MediaRef(format!("media-{}", artifact.size_bytes)))
        }

        async fn create_post(
            &self,
            text: &str,
            media: Option<&MediaRef>,
        ) -> Result<String, PlatformError> {
            if self.should_fail {
                return Err(PlatformError::Connection("reset".into()));
            }
            Ok(format!("{text}:{}", media.map_or("none", MediaRef::as_str)))
        }

        async fn recent_items(
            &self,
            _account: &AccountProfile,
            _max_items: usize,
        ) -> Result<Vec<RecentItem>, PlatformError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn blanket_dyn_platform_impl() {
        let platform: Arc<dyn DynPlatform> = Arc::new(MockPlatform { should_fail: false });
        assert_eq!(platform.name(), "mock");

        let profile = platform.verify_credentials().await.unwrap();
        assert_eq!(profile.username, "brand");

        let artifact = MediaArtifact::new("a.png", MediaType::Png, 7);
        let media = platform.upload_media(&artifact).await.unwrap();
        assert_eq!(media.as_str(), "media-7");

        let id = platform.create_post("hi", Some(&media)).await.unwrap();
        assert_eq!(id, "hi:media-7");

        let items = platform.recent_items(&profile, 10).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn dyn_platform_propagates_errors() {
        let platform: Arc<dyn DynPlatform> = Arc::new(MockPlatform { should_fail: true });
        let err = platform.verify_credentials().await.unwrap_err();
        assert!(matches!(err, PlatformError::Api(_)));

        let artifact = MediaArtifact::new("a.png", MediaType::Png, 7);
        let err = platform.upload_media(&artifact).await.unwrap_err();
        assert!(err.is_rate_limited());
    }
}
