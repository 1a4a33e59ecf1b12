use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three ordered steps of a publish call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum PublishStage {
    /// Credential verification.
    Auth,
    /// Uploading the attached media.
    MediaUpload,
    /// Creating the post itself.
    Submission,
}

impl PublishStage {
    /// Human-readable label used in failure messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Auth => "authentication",
            Self::MediaUpload => "media upload",
            Self::Submission => "post creation",
        }
    }
}

impl fmt::Display for PublishStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a publish call.
///
/// This is the only thing the pipeline returns: vendor errors are classified
/// into a [`Failure`](Self::Failure) before they reach the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PublishOutcome {
    /// The post was created.
    Success {
        /// Platform identifier of the new post.
        content_id: String,
    },
    /// The publish call stopped at `stage`.
    Failure {
        stage: PublishStage,
        /// Whether the platform reported a rate limit.
        rate_limited: bool,
        message: String,
    },
}

impl PublishOutcome {
    pub fn success(content_id: impl Into<String>) -> Self {
        Self::Success {
            content_id: content_id.into(),
        }
    }

    pub fn failure(stage: PublishStage, rate_limited: bool, message: impl Into<String>) -> Self {
        Self::Failure {
            stage,
            rate_limited,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            Self::Failure {
                rate_limited: true,
                ..
            }
        )
    }

    /// The stage a failure occurred at, or `None` on success.
    pub fn failed_stage(&self) -> Option<PublishStage> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { stage, .. } => Some(*stage),
        }
    }
}
