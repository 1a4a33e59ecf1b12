//! X/Twitter platform integration for Herald.
//!
//! This crate implements the [`SocialPlatform`](herald_platform::SocialPlatform)
//! trait against the [X API v2](https://docs.x.com/x-api), authenticating with
//! an OAuth 2.0 user-context bearer token.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use herald_twitter::{TwitterConfig, TwitterPlatform};
//!
//! let config = TwitterConfig::new("user-access-token");
//! let platform = TwitterPlatform::new(config).expect("client should build");
//! ```

pub mod config;
pub mod error;
pub mod platform;
pub mod types;

pub use config::TwitterConfig;
pub use error::TwitterError;
pub use platform::TwitterPlatform;
pub use types::{CreateTweetRequest, TimelineResponse};
