use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use herald_core::{ContentDraft, PublishOutcome, PublishStage};
use herald_platform::{DynPlatform, PlatformError};
use tracing::{debug, error, info, instrument, warn};

/// Default bound on every individual platform call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs the staged publish against a platform.
///
/// The stages are strictly ordered: credential check, media upload (only when
/// the draft carries media), then post creation. A failure at any stage skips
/// the remaining ones and is reported as a [`PublishOutcome::Failure`] naming
/// that stage. `publish` never returns an error and never panics.
///
/// The publisher does not touch the draft's media file; releasing a temporary
/// artifact after `publish` returns is the caller's job.
#[derive(Clone)]
pub struct Publisher {
    platform: Arc<dyn DynPlatform>,
    call_timeout: Duration,
}

impl Publisher {
    pub fn new(platform: Arc<dyn DynPlatform>, call_timeout: Duration) -> Self {
        Self {
            platform,
            call_timeout,
        }
    }

    pub fn platform_name(&self) -> &str {
        self.platform.name()
    }

    #[instrument(
        skip(self, draft),
        fields(
            platform = self.platform.name(),
            chars = draft.char_len(),
            truncated = draft.was_truncated(),
            has_media = draft.media().is_some(),
        )
    )]
    pub async fn publish(&self, draft: &ContentDraft) -> PublishOutcome {
        match AssertUnwindSafe(self.run_stages(draft)).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(panic) => {
                let reason = panic_reason(panic.as_ref());
                error!(reason = %reason, "publish panicked");
                PublishOutcome::failure(
                    PublishStage::Submission,
                    false,
                    format!("{} failed: unexpected error: {reason}", PublishStage::Submission),
                )
            }
        }
    }

    async fn run_stages(&self, draft: &ContentDraft) -> PublishOutcome {
        let account = match self
            .call(PublishStage::Auth, self.platform.verify_credentials())
            .await
        {
            Ok(account) => account,
            Err(outcome) => return outcome,
        };
        debug!(username = %account.username, "credentials verified");

        let media = match draft.media() {
            Some(artifact) => {
                match self
                    .call(PublishStage::MediaUpload, self.platform.upload_media(artifact))
                    .await
                {
                    Ok(media) => {
                        debug!(media = %media, "media uploaded");
                        Some(media)
                    }
                    Err(outcome) => return outcome,
                }
            }
            None => None,
        };

        match self
            .call(
                PublishStage::Submission,
                self.platform.create_post(draft.text(), media.as_ref()),
            )
            .await
        {
            Ok(content_id) => {
                info!(content_id = %content_id, "post published");
                PublishOutcome::success(content_id)
            }
            Err(outcome) => outcome,
        }
    }

    /// Run one platform call under the call timeout, turning any failure into
    /// the outcome for `stage`.
    async fn call<T>(
        &self,
        stage: PublishStage,
        fut: impl Future<Output = Result<T, PlatformError>>,
    ) -> Result<T, PublishOutcome> {
        let result = match tokio::time::timeout(self.call_timeout, fut).await {
            Ok(result) => result,
            Err(_elapsed) => Err(PlatformError::Timeout(self.call_timeout)),
        };
        result.map_err(|err| stage_failure(stage, &err))
    }
}

fn stage_failure(stage: PublishStage, err: &PlatformError) -> PublishOutcome {
    let rate_limited = err.is_rate_limited();
    let message = if rate_limited {
        format!("rate limit exceeded during {stage}; please try again later")
    } else {
        format!("{stage} failed: {err}")
    };
    warn!(stage = %stage, rate_limited, error = %err, "publish stage failed");
    PublishOutcome::failure(stage, rate_limited, message)
}

fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}
