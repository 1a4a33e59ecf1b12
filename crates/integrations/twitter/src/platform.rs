use std::collections::HashMap;

use herald_core::{AccountProfile, MediaArtifact, MediaAttachment, MediaRef, RecentItem};
use herald_platform::{PlatformError, SocialPlatform};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::TwitterConfig;
use crate::error::TwitterError;
use crate::types::{
    ApiProblem, CreateTweetRequest, CreatedTweet, DataEnvelope, MediaObject, MediaUploadResponse,
    TimelineResponse, TweetData, TweetMedia, UserData,
};

/// Smallest and largest page size accepted by the timeline endpoint.
const MIN_PAGE_SIZE: usize = 5;
const MAX_PAGE_SIZE: usize = 100;

/// Platform client for the X API v2.
///
/// Holds a pooled `reqwest::Client` and read-only credentials, so a single
/// instance can serve any number of concurrent requests.
pub struct TwitterPlatform {
    config: TwitterConfig,
    client: Client,
}

impl TwitterPlatform {
    /// Create a new platform client using the configured request timeout.
    pub fn new(config: TwitterConfig) -> Result<Self, TwitterError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { config, client })
    }

    /// Create a new platform client with a custom HTTP client.
    pub fn with_client(config: TwitterConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_base_url)
    }

    fn permalink(&self, username: &str, id: &str) -> String {
        format!("{}/{username}/status/{id}", self.config.web_base_url)
    }

    /// Map rate limits and error statuses, passing successful responses through.
    async fn check_status(response: Response) -> Result<Response, TwitterError> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("X API rate limit hit");
            return Err(TwitterError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiProblem>(&body)
                .ok()
                .and_then(|p| p.describe().map(str::to_owned))
                .unwrap_or(body);
            return Err(TwitterError::Api(format!("HTTP {status}: {detail}")));
        }

        Ok(response)
    }

    /// Decode a `{"data": ...}` envelope, surfacing API-level errors.
    async fn read_data<T: DeserializeOwned>(response: Response) -> Result<T, TwitterError> {
        let envelope: DataEnvelope<T> = Self::check_status(response).await?.json().await?;
        match envelope.data {
            Some(data) => Ok(data),
            None => {
                let detail = envelope
                    .errors
                    .first()
                    .and_then(ApiProblem::describe)
                    .unwrap_or("response contained no data")
                    .to_owned();
                Err(TwitterError::Api(detail))
            }
        }
    }

    async fn fetch_me(&self) -> Result<UserData, TwitterError> {
        let response = self
            .client
            .get(self.api_url("/2/users/me"))
            .bearer_auth(&self.config.access_token)
            .query(&[("user.fields", "public_metrics")])
            .send()
            .await?;
        Self::read_data(response).await
    }

    async fn send_media(&self, artifact: &MediaArtifact) -> Result<String, TwitterError> {
        let bytes = tokio::fs::read(&artifact.path).await?;
        let file_name = artifact.file_name().unwrap_or("media").to_owned();

        debug!(
            path = %artifact.path.display(),
            size_bytes = bytes.len(),
            "uploading media to X"
        );

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(artifact.media_type.mime())?;
        let form = reqwest::multipart::Form::new()
            .text("media_category", "tweet_image")
            .part("media", part);

        let response = self
            .client
            .post(format!("{}/2/media/upload", self.config.upload_base_url))
            .bearer_auth(&self.config.access_token)
            .multipart(form)
            .send()
            .await?;

        let upload: MediaUploadResponse = Self::check_status(response).await?.json().await?;
        upload
            .media_id()
            .ok_or_else(|| TwitterError::InvalidResponse("upload returned no media id".into()))
    }

    async fn send_tweet(&self, request: &CreateTweetRequest) -> Result<CreatedTweet, TwitterError> {
        debug!(chars = request.text.chars().count(), "creating post on X");

        let response = self
            .client
            .post(self.api_url("/2/tweets"))
            .bearer_auth(&self.config.access_token)
            .json(request)
            .send()
            .await?;
        Self::read_data(response).await
    }

    async fn fetch_timeline(
        &self,
        user_id: &str,
        page_size: usize,
    ) -> Result<TimelineResponse, TwitterError> {
        let response = self
            .client
            .get(self.api_url(&format!("/2/users/{user_id}/tweets")))
            .bearer_auth(&self.config.access_token)
            .query(&[
                ("max_results", page_size.to_string().as_str()),
                ("tweet.fields", "created_at,public_metrics,attachments"),
                ("expansions", "attachments.media_keys"),
                ("media.fields", "type,url,preview_image_url"),
            ])
            .send()
            .await?;
        Ok(Self::check_status(response).await?.json().await?)
    }

    fn to_recent_item(
        &self,
        username: &str,
        tweet: TweetData,
        media: &HashMap<&str, &MediaObject>,
    ) -> Result<RecentItem, TwitterError> {
        let created_at = tweet.created_at.ok_or_else(|| {
            TwitterError::InvalidResponse(format!("post {} has no created_at", tweet.id))
        })?;
        let attachments = tweet
            .attachments
            .map(|a| a.media_keys)
            .unwrap_or_default()
            .iter()
            .filter_map(|key| media.get(key.as_str()).map(|m| MediaAttachment::from(*m)))
            .collect();
        Ok(RecentItem {
            permalink: self.permalink(username, &tweet.id),
            id: tweet.id,
            text: tweet.text,
            metrics: tweet.public_metrics.unwrap_or_default().into(),
            created_at,
            attachments,
        })
    }
}

impl SocialPlatform for TwitterPlatform {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "twitter"
    }

    #[instrument(skip(self), fields(platform = "twitter"))]
    async fn verify_credentials(&self) -> Result<AccountProfile, PlatformError> {
        let user = self.fetch_me().await?;
        debug!(username = %user.username, "X credentials verified");
        Ok(user.into())
    }

    #[instrument(skip(self, artifact), fields(platform = "twitter", media_type = %artifact.media_type))]
    async fn upload_media(&self, artifact: &MediaArtifact) -> Result<MediaRef, PlatformError> {
        let id = self.send_media(artifact).await?;
        debug!(media_id = %id, "media uploaded to X");
        Ok(MediaRef(id))
    }

    #[instrument(skip(self, text, media), fields(platform = "twitter"))]
    async fn create_post(
        &self,
        text: &str,
        media: Option<&MediaRef>,
    ) -> Result<String, PlatformError> {
        let request = CreateTweetRequest {
            text: text.to_owned(),
            media: media.map(|m| TweetMedia {
                media_ids: vec![m.as_str().to_owned()],
            }),
        };
        let created = self.send_tweet(&request).await?;
        debug!(id = %created.id, "post created on X");
        Ok(created.id)
    }

    #[instrument(skip(self, account), fields(platform = "twitter", user_id = %account.id))]
    async fn recent_items(
        &self,
        account: &AccountProfile,
        max_items: usize,
    ) -> Result<Vec<RecentItem>, PlatformError> {
        if max_items == 0 {
            return Ok(Vec::new());
        }

        let page_size = max_items.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);
        let timeline = self.fetch_timeline(&account.id, page_size).await?;
        let media = timeline.includes.media_by_key();

        let items = timeline
            .data
            .into_iter()
            .take(max_items)
            .map(|tweet| self.to_recent_item(&account.username, tweet, &media))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = items.len(), "fetched recent posts from X");
        Ok(items)
    }
}
