//! Publishing and analytics on top of a [`DynPlatform`](herald_platform::DynPlatform).
//!
//! [`Publisher`] runs the three-stage publish (credential check, media upload,
//! post creation) and reports exactly where a failure happened.
//! [`AnalyticsAggregator`] rolls the account's recent posts up into totals, a
//! daily timeline and a best-performing item.

pub mod analytics;
pub mod error;
pub mod publish;
pub mod timeline;

#[cfg(test)]
mod testing;

pub use analytics::{AnalyticsAggregator, DEFAULT_MAX_ITEMS, DEFAULT_WINDOW_DAYS, aggregate};
pub use error::AnalyticsError;
pub use publish::{DEFAULT_CALL_TIMEOUT, Publisher};
pub use timeline::{MAX_WINDOW_DAYS, build_timeline};
