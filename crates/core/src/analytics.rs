use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::account::AccountProfile;
use crate::engagement::{EngagementMetrics, PublishedItemRecord};

/// Aggregated engagement for a single UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TimelineBucket {
    pub date: NaiveDate,
    pub item_count: u64,
    pub likes: u64,
    pub shares: u64,
    pub replies: u64,
}

impl TimelineBucket {
    /// An empty bucket for `date`.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            item_count: 0,
            likes: 0,
            shares: 0,
            replies: 0,
        }
    }

    /// Fold one item's metrics into the bucket.
    pub fn record(&mut self, metrics: &EngagementMetrics) {
        self.item_count = self.item_count.saturating_add(1);
        self.likes = self.likes.saturating_add(metrics.likes);
        self.shares = self.shares.saturating_add(metrics.shares);
        self.replies = self.replies.saturating_add(metrics.replies);
    }
}

/// Rollup of every item in a summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AnalyticsTotals {
    pub item_count: u64,
    #[serde(flatten)]
    pub metrics: EngagementMetrics,
}

impl AnalyticsTotals {
    pub fn record(&mut self, metrics: &EngagementMetrics) {
        self.item_count = self.item_count.saturating_add(1);
        self.metrics += *metrics;
    }

    pub fn engagement_rate(&self) -> EngagementRate {
        EngagementRate::new(self.metrics.engagement_score(), self.item_count)
    }
}

/// Average engagement per item, expressed as a percentage.
///
/// Kept as the exact ratio `engagement / item_count`; it is only rendered
/// (one decimal place, `%` suffix) when it leaves the service. Because the
/// inputs are raw counts the value is not bounded by 100%.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementRate {
    pub engagement: u64,
    pub item_count: u64,
}

impl EngagementRate {
    pub fn new(engagement: u64, item_count: u64) -> Self {
        Self {
            engagement,
            item_count,
        }
    }

    /// `100 * engagement / max(item_count, 1)`.
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        100.0 * self.engagement as f64 / self.item_count.max(1) as f64
    }
}

impl fmt::Display for EngagementRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.percent())
    }
}

/// Result of one analytics aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub profile: AccountProfile,
    pub totals: AnalyticsTotals,
    pub engagement_rate: EngagementRate,
    /// One bucket per day of the trailing window, oldest first.
    pub timeline: Vec<TimelineBucket>,
    /// Items in the order the platform returned them (newest first).
    pub items: Vec<PublishedItemRecord>,
    pub best_item: Option<PublishedItemRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_formats_to_one_decimal() {
        assert_eq!(EngagementRate::new(16, 2).to_string(), "800.0%");
        assert_eq!(EngagementRate::new(1, 3).to_string(), "33.3%");
        assert_eq!(EngagementRate::new(2, 3).to_string(), "66.7%");
    }

    #[test]
    fn rate_with_no_items_is_zero() {
        let rate = EngagementRate::new(0, 0);
        assert!(rate.percent().abs() < f64::EPSILON);
        assert_eq!(rate.to_string(), "0.0%");
    }

    #[test]
    fn rate_guards_division_by_zero_items() {
        // Engagement without items can only come from inconsistent input,
        // but must not divide by zero.
        assert_eq!(EngagementRate::new(5, 0).to_string(), "500.0%");
    }

    #[test]
    fn totals_record_and_rate() {
        let mut totals = AnalyticsTotals::default();
        totals.record(&EngagementMetrics::new(5, 2, 1));
        totals.record(&EngagementMetrics::new(3, 3, 2));
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.metrics, EngagementMetrics::new(8, 5, 3));
        assert_eq!(totals.engagement_rate(), EngagementRate::new(16, 2));
    }

    #[test]
    fn totals_serialize_flat() {
        let totals = AnalyticsTotals {
            item_count: 1,
            metrics: EngagementMetrics::new(1, 2, 3),
        };
        let json = serde_json::to_value(totals).unwrap();
        assert_eq!(json["item_count"], 1);
        assert_eq!(json["likes"], 1);
        assert_eq!(json["shares"], 2);
        assert_eq!(json["replies"], 3);
    }

    #[test]
    fn totals_and_buckets_saturate() {
        let extreme = EngagementMetrics::new(u64::MAX, u64::MAX, u64::MAX);

        let mut totals = AnalyticsTotals::default();
        totals.record(&extreme);
        totals.record(&extreme);
        assert_eq!(totals.metrics, extreme);
        assert_eq!(totals.engagement_rate().engagement, u64::MAX);

        let mut bucket = TimelineBucket::empty(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        bucket.record(&extreme);
        bucket.record(&EngagementMetrics::new(1, 1, 1));
        assert_eq!(bucket.likes, u64::MAX);
        assert_eq!(bucket.replies, u64::MAX);
        assert_eq!(bucket.item_count, 2);
    }

    #[test]
    fn bucket_record() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let mut bucket = TimelineBucket::empty(date);
        bucket.record(&EngagementMetrics::new(1, 1, 1));
        bucket.record(&EngagementMetrics::new(2, 0, 0));
        assert_eq!(bucket.item_count, 2);
        assert_eq!(bucket.likes, 3);
        assert_eq!(bucket.shares, 1);
        assert_eq!(bucket.replies, 1);
    }
}
