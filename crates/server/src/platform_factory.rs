use std::sync::Arc;
use std::time::Duration;

use herald_platform::{DynPlatform, LogPlatform};
use herald_twitter::{TwitterConfig, TwitterPlatform};
use tracing::info;

use crate::config::{ACCESS_TOKEN_ENV, PlatformConfig, PlatformKind};
use crate::error::ServerError;

/// Create the configured platform client.
///
/// `env_token` is the value of [`ACCESS_TOKEN_ENV`], used when the config file
/// does not carry an access token.
pub fn create_platform(
    config: &PlatformConfig,
    env_token: Option<String>,
) -> Result<Arc<dyn DynPlatform>, ServerError> {
    match config.kind {
        PlatformKind::Log => {
            info!(username = %config.username, "using log platform, posts will not be published");
            Ok(Arc::new(LogPlatform::new(config.username.clone())))
        }
        PlatformKind::Twitter => {
            let token = config.access_token_or(env_token).ok_or_else(|| {
                ServerError::Config(format!(
                    "platform type \"twitter\" requires platform.access_token or {ACCESS_TOKEN_ENV}"
                ))
            })?;

            let mut twitter = TwitterConfig::new(token)
                .with_api_base_url(&config.api_base_url)
                .with_web_base_url(&config.web_base_url)
                .with_request_timeout(Duration::from_secs(config.request_timeout_seconds));
            if let Some(upload) = &config.upload_base_url {
                twitter = twitter.with_upload_base_url(upload);
            }

            let platform = TwitterPlatform::new(twitter)
                .map_err(|e| ServerError::Config(format!("failed to build X client: {e}")))?;
            info!(api_base_url = %config.api_base_url, "using X platform");
            Ok(Arc::new(platform))
        }
    }
}
