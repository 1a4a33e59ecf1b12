use std::ops::AddAssign;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Interaction counters for a published item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EngagementMetrics {
    pub likes: u64,
    /// Reposts / retweets.
    pub shares: u64,
    pub replies: u64,
}

impl EngagementMetrics {
    pub fn new(likes: u64, shares: u64, replies: u64) -> Self {
        Self {
            likes,
            shares,
            replies,
        }
    }

    /// Sum of likes, shares and replies, saturating at `u64::MAX`.
    pub fn engagement_score(&self) -> u64 {
        self.likes
            .saturating_add(self.shares)
            .saturating_add(self.replies)
    }
}

impl AddAssign for EngagementMetrics {
    fn add_assign(&mut self, rhs: Self) {
        self.likes = self.likes.saturating_add(rhs.likes);
        self.shares = self.shares.saturating_add(rhs.shares);
        self.replies = self.replies.saturating_add(rhs.replies);
    }
}

/// Kind of media attached to a published item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    Video,
    AnimatedGif,
    Other,
}

/// Media attachment as reported by the platform's list operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAttachment {
    pub kind: MediaKind,
    /// Direct URL (photos).
    pub url: Option<String>,
    /// Still preview (videos and animated GIFs).
    pub preview_image_url: Option<String>,
}

impl MediaAttachment {
    pub fn photo(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Photo,
            url: Some(url.into()),
            preview_image_url: None,
        }
    }

    pub fn video(preview_image_url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Video,
            url: None,
            preview_image_url: Some(preview_image_url.into()),
        }
    }
}

/// A recently published item in the platform-neutral shape returned by a
/// platform's "list recent items" call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentItem {
    pub id: String,
    pub text: String,
    pub metrics: EngagementMetrics,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub attachments: Vec<MediaAttachment>,
    pub permalink: String,
}

impl RecentItem {
    /// Pick the image that best represents this item.
    ///
    /// A photo's direct URL wins; otherwise the preview image of a video or
    /// animated GIF is used.
    pub fn image_url(&self) -> Option<&str> {
        let photo = self
            .attachments
            .iter()
            .filter(|m| m.kind == MediaKind::Photo)
            .find_map(|m| m.url.as_deref());
        photo.or_else(|| {
            self.attachments
                .iter()
                .filter(|m| matches!(m.kind, MediaKind::Video | MediaKind::AnimatedGif))
                .find_map(|m| m.preview_image_url.as_deref())
        })
    }
}

/// A published item as presented in an analytics summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PublishedItemRecord {
    pub id: String,
    pub text: String,
    pub metrics: EngagementMetrics,
    pub created_at: DateTime<Utc>,
    pub media_url: Option<String>,
    pub permalink: String,
}

impl PublishedItemRecord {
    pub fn engagement_score(&self) -> u64 {
        self.metrics.engagement_score()
    }
}

impl From<RecentItem> for PublishedItemRecord {
    fn from(item: RecentItem) -> Self {
        let media_url = item.image_url().map(str::to_owned);
        Self {
            id: item.id,
            text: item.text,
            metrics: item.metrics,
            created_at: item.created_at,
            media_url,
            permalink: item.permalink,
        }
    }
}
