//! Scriptable platform double shared by the pipeline tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use herald_core::{AccountProfile, MediaArtifact, MediaRef, RecentItem};
use herald_platform::{DynPlatform, PlatformError};

/// What a scripted call should do.
#[derive(Clone)]
pub enum Step<T> {
    Ok(T),
    Fail(String),
    RateLimited,
    Hang,
    Panic,
}

impl<T: Clone> Step<T> {
    async fn run(&self) -> Result<T, PlatformError> {
        match self {
            Self::Ok(value) => Ok(value.clone()),
            Self::Fail(msg) => Err(PlatformError::Api(msg.clone())),
            Self::RateLimited => Err(PlatformError::RateLimited),
            Self::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                unreachable!("hung call should have timed out")
            }
            Self::Panic => panic!("platform client blew up"),
        }
    }
}

pub struct StubPlatform {
    pub verify: Step<AccountProfile>,
    pub upload: Step<MediaRef>,
    pub create: Step<String>,
    pub recent: Step<Vec<RecentItem>>,
    pub verify_calls: AtomicUsize,
    pub upload_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub recent_calls: AtomicUsize,
    pub last_post: Mutex<Option<(String, Option<MediaRef>)>>,
}

impl StubPlatform {
    pub fn healthy() -> Self {
        Self {
            verify: Step::Ok(account()),
            upload: Step::Ok(MediaRef("media-1".into())),
            create: Step::Ok("post-1".into()),
            recent: Step::Ok(Vec::new()),
            verify_calls: AtomicUsize::new(0),
            upload_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            recent_calls: AtomicUsize::new(0),
            last_post: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.verify_calls.load(Ordering::SeqCst),
            self.upload_calls.load(Ordering::SeqCst),
            self.create_calls.load(Ordering::SeqCst),
        )
    }
}

pub fn account() -> AccountProfile {
    AccountProfile {
        id: "42".into(),
        username: "brand".into(),
        display_name: "Brand".into(),
        followers: 1250,
        following: 340,
        total_items: 245,
    }
}

#[async_trait]
impl DynPlatform for StubPlatform {
    fn name(&self) -> &str {
        "stub"
    }

    async fn verify_credentials(&self) -> Result<AccountProfile, PlatformError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.verify.run().await
    }

    async fn upload_media(&self, _artifact: &MediaArtifact) -> Result<MediaRef, PlatformError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.upload.run().await
    }

    async fn create_post(
        &self,
        text: &str,
        media: Option<&MediaRef>,
    ) -> Result<String, PlatformError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_post.lock().unwrap() = Some((text.to_owned(), media.cloned()));
        self.create.run().await
    }

    async fn recent_items(
        &self,
        _account: &AccountProfile,
        _max_items: usize,
    ) -> Result<Vec<RecentItem>, PlatformError> {
        self.recent_calls.fetch_add(1, Ordering::SeqCst);
        self.recent.run().await
    }
}
