use serde::Deserialize;

/// Analytics summary configuration.
#[derive(Debug, Deserialize)]
pub struct AnalyticsConfig {
    /// Number of days in the engagement timeline, clamped to
    /// `1..=herald_pipeline::MAX_WINDOW_DAYS` when the aggregator is built.
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// Maximum number of recent items fetched per summary.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            max_items: default_max_items(),
        }
    }
}

fn default_window_days() -> u32 {
    herald_pipeline::DEFAULT_WINDOW_DAYS
}

fn default_max_items() -> usize {
    herald_pipeline::DEFAULT_MAX_ITEMS
}
