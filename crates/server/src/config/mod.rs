mod analytics;
mod logging;
mod media;
mod platform;
mod server;


pub use analytics::*;
pub use logging::*;
pub use media::*;
pub use platform::*;
pub use server::*;

use serde::Deserialize;

/// Top-level configuration for the Herald server, loaded from a TOML file.
///
/// Every section is optional; a missing file or an empty one yields the
/// defaults.
#[derive(Debug, Default, Deserialize)]
pub struct HeraldConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Log level and output format.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Temporary and public media directories.
    #[serde(default)]
    pub media: MediaConfig,
    /// Outbound platform selection and credentials.
    #[serde(default)]
    pub platform: PlatformConfig,
    /// Analytics window and fetch size.
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}
