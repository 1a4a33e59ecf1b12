use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use herald_core::{
    AccountProfile, AnalyticsSummary, AnalyticsTotals, PublishedItemRecord, RecentItem,
};
use herald_platform::{DynPlatform, PlatformError};
use tracing::{debug, info, instrument, warn};

use crate::error::AnalyticsError;
use crate::timeline::{MAX_WINDOW_DAYS, build_timeline};

/// Days covered by the timeline unless configured otherwise.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Recent items requested from the platform unless configured otherwise.
pub const DEFAULT_MAX_ITEMS: usize = 100;

/// Builds engagement summaries from the account's recent posts.
///
/// Nothing is cached: every call re-reads the account and its items from the
/// platform.
#[derive(Clone)]
pub struct AnalyticsAggregator {
    platform: Arc<dyn DynPlatform>,
    call_timeout: Duration,
    window_days: u32,
    max_items: usize,
}

impl AnalyticsAggregator {
    pub fn new(platform: Arc<dyn DynPlatform>, call_timeout: Duration) -> Self {
        Self {
            platform,
            call_timeout,
            window_days: DEFAULT_WINDOW_DAYS,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }

    /// Set the timeline length, clamped to `1..=MAX_WINDOW_DAYS`.
    #[must_use]
    pub fn with_window_days(mut self, days: u32) -> Self {
        let clamped = days.clamp(1, MAX_WINDOW_DAYS);
        if clamped != days {
            warn!(requested = days, window_days = clamped, "analytics window clamped");
        }
        self.window_days = clamped;
        self
    }

    #[must_use]
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    pub async fn summarize(&self) -> Result<AnalyticsSummary, AnalyticsError> {
        self.summarize_at(Utc::now()).await
    }

    /// Summarize with the timeline ending on `now`'s UTC date.
    #[instrument(skip(self), fields(platform = self.platform.name(), window_days = self.window_days))]
    pub async fn summarize_at(&self, now: DateTime<Utc>) -> Result<AnalyticsSummary, AnalyticsError> {
        let profile = self
            .bounded(self.platform.verify_credentials())
            .await
            .map_err(|e| {
                warn!(error = %e, "analytics credential check failed");
                AnalyticsError::auth(e)
            })?;

        let items = self
            .bounded(self.platform.recent_items(&profile, self.max_items))
            .await
            .map_err(|e| {
                warn!(error = %e, "fetching recent items failed");
                AnalyticsError::fetch(e)
            })?;
        debug!(count = items.len(), "fetched recent items");

        let summary = aggregate(profile, items, now.date_naive(), self.window_days);
        info!(
            items = summary.totals.item_count,
            engagement_rate = %summary.engagement_rate,
            best_item = summary.best_item.as_ref().map(|b| b.id.as_str()),
            "analytics summary built"
        );
        Ok(summary)
    }

    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, PlatformError>>,
    ) -> Result<T, PlatformError> {
        match tokio::time::timeout(self.call_timeout, fut).await {
            Ok(result) => result,
            Err(_elapsed) => Err(PlatformError::Timeout(self.call_timeout)),
        }
    }
}

/// Roll `items` up into a summary.
///
/// Totals cover every item; the timeline only those created inside the
/// `window_days` ending on `today`. The best item has the strictly greatest
/// engagement score, so the earliest of several tied items wins.
pub fn aggregate(
    profile: AccountProfile,
    items: Vec<RecentItem>,
    today: NaiveDate,
    window_days: u32,
) -> AnalyticsSummary {
    let items: Vec<PublishedItemRecord> = items.into_iter().map(Into::into).collect();

    let mut totals = AnalyticsTotals::default();
    let mut best: Option<&PublishedItemRecord> = None;
    for item in &items {
        totals.record(&item.metrics);
        if best.is_none_or(|b| item.engagement_score() > b.engagement_score()) {
            best = Some(item);
        }
    }
    let best_item = best.cloned();

    AnalyticsSummary {
        profile,
        engagement_rate: totals.engagement_rate(),
        timeline: build_timeline(&items, today, window_days),
        totals,
        items,
        best_item,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use chrono::TimeZone;
    use herald_core::{EngagementMetrics, EngagementRate, MediaAttachment};

    use super::*;
    use crate::publish::DEFAULT_CALL_TIMEOUT;
    use crate::testing::{Step, StubPlatform, account};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 15, 30, 0).unwrap()
    }

    fn recent(id: &str, day: u32, metrics: EngagementMetrics) -> RecentItem {
        RecentItem {
            id: id.into(),
            text: format!("post {id}"),
            metrics,
            created_at: Utc.with_ymd_and_hms(2025, 3, day, 9, 0, 0).unwrap(),
            attachments: Vec::new(),
            permalink: format!("https://x.com/brand/status/{id}"),
        }
    }

    fn aggregator(stub: StubPlatform) -> (Arc<StubPlatform>, AnalyticsAggregator) {
        let stub = Arc::new(stub);
        let aggregator =
            AnalyticsAggregator::new(Arc::clone(&stub) as Arc<dyn DynPlatform>, DEFAULT_CALL_TIMEOUT);
        (stub, aggregator)
    }

    #[tokio::test]
    async fn zero_items_gives_empty_summary() {
        let (_, aggregator) = aggregator(StubPlatform::healthy());

        let summary = aggregator.summarize_at(now()).await.unwrap();

        assert_eq!(summary.profile, account());
        assert_eq!(summary.totals, AnalyticsTotals::default());
        assert_eq!(summary.engagement_rate.to_string(), "0.0%");
        assert_eq!(summary.timeline.len(), 7);
        assert!(summary.timeline.iter().all(|b| b.item_count == 0));
        assert_eq!(
            summary.timeline.last().unwrap().date,
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
        );
        assert!(summary.items.is_empty());
        assert!(summary.best_item.is_none());
    }

    #[tokio::test]
    async fn tie_goes_to_first_item() {
        let mut stub = StubPlatform::healthy();
        stub.recent = Step::Ok(vec![
            recent("A", 10, EngagementMetrics::new(5, 2, 1)),
            recent("B", 9, EngagementMetrics::new(3, 3, 2)),
        ]);
        let (_, aggregator) = aggregator(stub);

        let summary = aggregator.summarize_at(now()).await.unwrap();

        assert_eq!(summary.best_item.as_ref().unwrap().id, "A");
        assert_eq!(summary.totals.item_count, 2);
        assert_eq!(summary.totals.metrics, EngagementMetrics::new(8, 5, 3));
        assert_eq!(summary.engagement_rate, EngagementRate::new(16, 2));
        assert_eq!(summary.engagement_rate.to_string(), "800.0%");
        assert_eq!(
            summary.items.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(),
            vec!["A", "B"]
        );
    }

    #[tokio::test]
    async fn strictly_greater_score_wins() {
        let mut stub = StubPlatform::healthy();
        stub.recent = Step::Ok(vec![
            recent("low", 10, EngagementMetrics::new(1, 0, 0)),
            recent("high", 9, EngagementMetrics::new(4, 4, 4)),
            recent("tied", 8, EngagementMetrics::new(12, 0, 0)),
        ]);
        let (_, aggregator) = aggregator(stub);

        let summary = aggregator.summarize_at(now()).await.unwrap();
        assert_eq!(summary.best_item.unwrap().id, "high");
    }

    #[tokio::test]
    async fn items_outside_window_still_count_in_totals() {
        let mut stub = StubPlatform::healthy();
        stub.recent = Step::Ok(vec![
            recent("new", 10, EngagementMetrics::new(1, 1, 1)),
            recent("old", 1, EngagementMetrics::new(10, 0, 0)),
        ]);
        let (_, aggregator) = aggregator(stub);

        let summary = aggregator.summarize_at(now()).await.unwrap();

        assert_eq!(summary.items.len(), 2);
        assert_eq!(summary.totals.metrics.likes, 11);
        let bucketed: u64 = summary.timeline.iter().map(|b| b.item_count).sum();
        assert_eq!(bucketed, 1);
        assert_eq!(summary.best_item.unwrap().id, "old");
    }

    #[tokio::test]
    async fn media_url_prefers_photo() {
        let mut item = recent("pic", 10, EngagementMetrics::default());
        item.attachments = vec![
            MediaAttachment::video("https://pbs/preview.jpg"),
            MediaAttachment::photo("https://pbs/photo.jpg"),
        ];
        let mut stub = StubPlatform::healthy();
        stub.recent = Step::Ok(vec![item]);
        let (_, aggregator) = aggregator(stub);

        let summary = aggregator.summarize_at(now()).await.unwrap();
        assert_eq!(
            summary.items[0].media_url.as_deref(),
            Some("https://pbs/photo.jpg")
        );
    }

    #[tokio::test]
    async fn auth_failure_is_terminal() {
        let mut stub = StubPlatform::healthy();
        stub.verify = Step::Fail("HTTP 401: Unauthorized".into());
        let (stub, aggregator) = aggregator(stub);

        let err = aggregator.summarize_at(now()).await.unwrap_err();

        assert!(matches!(err, AnalyticsError::AuthFailed { rate_limited: false, .. }));
        assert_eq!(stub.recent_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fetch_failure_carries_rate_limit_flag() {
        let mut stub = StubPlatform::healthy();
        stub.recent = Step::RateLimited;
        let (stub, aggregator) = aggregator(stub);

        let err = aggregator.summarize_at(now()).await.unwrap_err();

        assert!(matches!(err, AnalyticsError::FetchFailed { rate_limited: true, .. }));
        assert_eq!(stub.verify_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn hung_fetch_times_out() {
        tokio::time::pause();
        let mut stub = StubPlatform::healthy();
        stub.recent = Step::Hang;
        let stub = Arc::new(stub);
        let aggregator = AnalyticsAggregator::new(
            Arc::clone(&stub) as Arc<dyn DynPlatform>,
            Duration::from_millis(50),
        );

        let err = aggregator.summarize_at(now()).await.unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::FetchFailed {
                source: PlatformError::Timeout(_),
                rate_limited: false
            }
        ));
    }

    #[tokio::test]
    async fn window_is_configurable() {
        let (_, aggregator) = aggregator(StubPlatform::healthy());
        let aggregator = aggregator.with_window_days(30).with_max_items(10);
        assert_eq!(aggregator.window_days(), 30);

        let summary = aggregator.summarize_at(now()).await.unwrap();
        assert_eq!(summary.timeline.len(), 30);
        assert_eq!(aggregator.with_window_days(0).window_days(), 1);
    }

    #[tokio::test]
    async fn oversized_window_is_clamped() {
        let (_, aggregator) = aggregator(StubPlatform::healthy());
        let aggregator = aggregator.with_window_days(200_000_000);
        assert_eq!(aggregator.window_days(), MAX_WINDOW_DAYS);

        let summary = aggregator.summarize_at(now()).await.unwrap();
        assert_eq!(summary.timeline.len(), MAX_WINDOW_DAYS as usize);
    }
}
