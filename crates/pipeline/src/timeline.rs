use chrono::{Days, NaiveDate};
use herald_core::{PublishedItemRecord, TimelineBucket};

/// Longest timeline window, in days.
pub const MAX_WINDOW_DAYS: u32 = 366;

/// Bucket items by UTC calendar day over the `days`-day window ending `today`.
///
/// Returns `days` buckets (at most [`MAX_WINDOW_DAYS`]), oldest first,
/// zero-filled. Items created outside the window are ignored here.
pub fn build_timeline(
    items: &[PublishedItemRecord],
    today: NaiveDate,
    days: u32,
) -> Vec<TimelineBucket> {
    let days = days.min(MAX_WINDOW_DAYS);
    let start = today
        .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
        .unwrap_or(NaiveDate::MIN);
    let mut buckets: Vec<TimelineBucket> = start
        .iter_days()
        .take(days as usize)
        .map(TimelineBucket::empty)
        .collect();

    for item in items {
        let offset = (item.created_at.date_naive() - start).num_days();
        if let Ok(index) = usize::try_from(offset)
            && let Some(bucket) = buckets.get_mut(index)
        {
            bucket.record(&item.metrics);
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use herald_core::EngagementMetrics;

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn item(id: &str, d: u32, hour: u32, metrics: EngagementMetrics) -> PublishedItemRecord {
        PublishedItemRecord {
            id: id.into(),
            text: String::new(),
            metrics,
            created_at: Utc.with_ymd_and_hms(2025, 3, d, hour, 0, 0).unwrap(),
            media_url: None,
            permalink: String::new(),
        }
    }

    #[test]
    fn empty_window_is_zero_filled() {
        let buckets = build_timeline(&[], day(10), 7);
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].date, day(4));
        assert_eq!(buckets[6].date, day(10));
        assert!(buckets.iter().all(|b| b.item_count == 0 && b.likes == 0));
    }

    #[test]
    fn items_land_on_their_day() {
        let items = vec![
            item("a", 10, 23, EngagementMetrics::new(5, 2, 1)),
            item("b", 10, 1, EngagementMetrics::new(1, 0, 0)),
            item("c", 7, 12, EngagementMetrics::new(0, 3, 2)),
        ];
        let buckets = build_timeline(&items, day(10), 7);

        assert_eq!(buckets[6].item_count, 2);
        assert_eq!(buckets[6].likes, 6);
        assert_eq!(buckets[6].shares, 2);
        assert_eq!(buckets[3].date, day(7));
        assert_eq!(buckets[3].item_count, 1);
        assert_eq!(buckets[3].replies, 2);
    }

    #[test]
    fn items_outside_window_are_ignored() {
        let items = vec![
            item("old", 3, 12, EngagementMetrics::new(9, 9, 9)),
            item("future", 11, 0, EngagementMetrics::new(9, 9, 9)),
        ];
        let buckets = build_timeline(&items, day(10), 7);
        assert!(buckets.iter().all(|b| b.item_count == 0));
    }

    #[test]
    fn oversized_window_is_capped() {
        let buckets = build_timeline(&[], day(10), 200_000_000);
        assert_eq!(buckets.len(), MAX_WINDOW_DAYS as usize);
        assert_eq!(buckets.last().unwrap().date, day(10));

        let buckets = build_timeline(&[], day(10), u32::MAX);
        assert_eq!(buckets.len(), MAX_WINDOW_DAYS as usize);
    }

    #[test]
    fn window_near_the_minimum_date_does_not_panic() {
        let early = NaiveDate::MIN + Days::new(3);
        let buckets = build_timeline(&[], early, 30);
        assert_eq!(buckets[0].date, NaiveDate::MIN);
        assert!(buckets.len() <= 30);
    }

    #[test]
    fn window_length_is_configurable() {
        let buckets = build_timeline(&[], day(10), 3);
        assert_eq!(
            buckets.iter().map(|b| b.date).collect::<Vec<_>>(),
            vec![day(8), day(9), day(10)]
        );
    }
}
