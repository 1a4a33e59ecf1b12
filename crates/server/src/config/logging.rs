use serde::Deserialize;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
///
/// `RUST_LOG`, when set, takes precedence over `level`.
///
/// ```toml
/// [logging]
/// level = "herald=debug,tower_http=info"
/// format = "json"
/// ```
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_level() -> String {
    "info".to_owned()
}
