//! Outbound interface to the social platform that Herald publishes to.
//!
//! Integrations implement [`SocialPlatform`]; the pipeline works against the
//! object-safe [`DynPlatform`] so a single client can be shared behind an
//! `Arc` by every request.

pub mod classify;
pub mod error;
pub mod log;
pub mod platform;

pub use classify::{RATE_LIMIT_SIGNATURE, is_rate_limit_message};
pub use error::PlatformError;
pub use log::LogPlatform;
pub use platform::{DynPlatform, SocialPlatform};
