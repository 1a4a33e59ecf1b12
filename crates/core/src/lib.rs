pub mod account;
pub mod analytics;
pub mod draft;
pub mod engagement;
pub mod media;
pub mod outcome;

pub use account::AccountProfile;
pub use analytics::{AnalyticsSummary, AnalyticsTotals, EngagementRate, TimelineBucket};
pub use draft::{ContentDraft, TEXT_LIMIT, TRUNCATION_MARKER, truncate_text};
pub use engagement::{
    EngagementMetrics, MediaAttachment, MediaKind, PublishedItemRecord, RecentItem,
};
pub use media::{MediaArtifact, MediaRef, MediaType};
pub use outcome::{PublishOutcome, PublishStage};
