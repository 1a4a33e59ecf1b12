use std::collections::HashMap;

use chrono::{DateTime, Utc};
use herald_core::{AccountProfile, EngagementMetrics, MediaAttachment, MediaKind};
use serde::{Deserialize, Serialize};

/// Standard `{"data": ...}` envelope used by most v2 endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<ApiProblem>,
}

/// Problem details returned by the API on failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiProblem {
    pub title: Option<String>,
    pub detail: Option<String>,
    pub message: Option<String>,
}

impl ApiProblem {
    /// The most specific human-readable text available.
    pub fn describe(&self) -> Option<&str> {
        self.detail
            .as_deref()
            .or(self.message.as_deref())
            .or(self.title.as_deref())
    }
}

/// `GET /2/users/me` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub username: String,
    pub public_metrics: Option<UserPublicMetrics>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct UserPublicMetrics {
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default)]
    pub tweet_count: u64,
}

impl From<UserData> for AccountProfile {
    fn from(user: UserData) -> Self {
        let metrics = user.public_metrics.unwrap_or_default();
        Self {
            id: user.id,
            username: user.username,
            display_name: user.name,
            followers: metrics.followers_count,
            following: metrics.following_count,
            total_items: metrics.tweet_count,
        }
    }
}

/// `POST /2/media/upload` response.
///
/// The v2 endpoint nests the identifier under `data.id`; the legacy endpoint
/// returns `media_id_string` at the top level. Both are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaUploadResponse {
    pub data: Option<MediaUploadData>,
    pub media_id_string: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaUploadData {
    pub id: String,
}

impl MediaUploadResponse {
    pub fn media_id(self) -> Option<String> {
        self.data.map(|d| d.id).or(self.media_id_string)
    }
}

/// JSON body for `POST /2/tweets`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTweetRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<TweetMedia>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TweetMedia {
    pub media_ids: Vec<String>,
}

/// `POST /2/tweets` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedTweet {
    pub id: String,
}

/// `GET /2/users/{id}/tweets` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimelineResponse {
    #[serde(default)]
    pub data: Vec<TweetData>,
    #[serde(default)]
    pub includes: Includes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TweetData {
    pub id: String,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
    pub public_metrics: Option<TweetPublicMetrics>,
    pub attachments: Option<TweetAttachments>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TweetPublicMetrics {
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub reply_count: u64,
}

impl From<TweetPublicMetrics> for EngagementMetrics {
    fn from(m: TweetPublicMetrics) -> Self {
        Self::new(m.like_count, m.retweet_count, m.reply_count)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TweetAttachments {
    #[serde(default)]
    pub media_keys: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub media: Vec<MediaObject>,
}

impl Includes {
    /// Index expanded media objects by their `media_key`.
    pub fn media_by_key(&self) -> HashMap<&str, &MediaObject> {
        self.media
            .iter()
            .map(|m| (m.media_key.as_str(), m))
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaObject {
    pub media_key: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: Option<String>,
    pub preview_image_url: Option<String>,
}

impl From<&MediaObject> for MediaAttachment {
    fn from(m: &MediaObject) -> Self {
        let kind = match m.kind.as_str() {
            "photo" => MediaKind::Photo,
            "video" => MediaKind::Video,
            "animated_gif" => MediaKind::AnimatedGif,
            _ => MediaKind::Other,
        };
        Self {
            kind,
            url: m.url.clone(),
            preview_image_url: m.preview_image_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_omits_media_when_absent() {
        let req = CreateTweetRequest {
            text: "hello".into(),
            media: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"text": "hello"}));

        let req = CreateTweetRequest {
            text: "pic".into(),
            media: Some(TweetMedia {
                media_ids: vec!["123".into()],
            }),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["media"]["media_ids"][0], "123");
    }

    #[test]
    fn user_converts_to_profile() {
        let json = r#"{"data":{"id":"42","name":"Brand","username":"brand",
            "public_metrics":{"followers_count":1250,"following_count":340,"tweet_count":245}}}"#;
        let env: DataEnvelope<UserData> = serde_json::from_str(json).unwrap();
        let profile = AccountProfile::from(env.data.unwrap());
        assert_eq!(profile.username, "brand");
        assert_eq!(profile.display_name, "Brand");
        assert_eq!(profile.followers, 1250);
        assert_eq!(profile.following, 340);
        assert_eq!(profile.total_items, 245);
    }

    #[test]
    fn media_upload_accepts_both_shapes() {
        let v2: MediaUploadResponse = serde_json::from_str(r#"{"data":{"id":"111"}}"#).unwrap();
        assert_eq!(v2.media_id().as_deref(), Some("111"));
        let v1: MediaUploadResponse =
            serde_json::from_str(r#"{"media_id":222,"media_id_string":"222"}"#).unwrap();
        assert_eq!(v1.media_id().as_deref(), Some("222"));
        let none: MediaUploadResponse = serde_json::from_str("{}").unwrap();
        assert!(none.media_id().is_none());
    }

    #[test]
    fn timeline_deserializes_with_includes() {
        let json = r#"{
            "data": [{
                "id": "1", "text": "hello", "created_at": "2025-03-01T12:00:00.000Z",
                "public_metrics": {"like_count": 5, "retweet_count": 2, "reply_count": 1, "quote_count": 0},
                "attachments": {"media_keys": ["3_1"]}
            }],
            "includes": {"media": [{"media_key": "3_1", "type": "photo", "url": "https://pbs/1.jpg"}]},
            "meta": {"result_count": 1}
        }"#;
        let timeline: TimelineResponse = serde_json::from_str(json).unwrap();
        assert_eq!(timeline.data.len(), 1);
        let metrics = EngagementMetrics::from(timeline.data[0].public_metrics.unwrap());
        assert_eq!(metrics, EngagementMetrics::new(5, 2, 1));
        let media = timeline.includes.media_by_key();
        let attachment = MediaAttachment::from(media["3_1"]);
        assert_eq!(attachment.kind, MediaKind::Photo);
    }

    #[test]
    fn empty_timeline_has_no_data_field() {
        let timeline: TimelineResponse =
            serde_json::from_str(r#"{"meta":{"result_count":0}}"#).unwrap();
        assert!(timeline.data.is_empty());
        assert!(timeline.includes.media.is_empty());
    }

    #[test]
    fn problem_prefers_detail() {
        let problem: ApiProblem =
            serde_json::from_str(r#"{"title":"Unauthorized","detail":"Token expired"}"#).unwrap();
        assert_eq!(problem.describe(), Some("Token expired"));
        let problem: ApiProblem = serde_json::from_str(r#"{"title":"Forbidden"}"#).unwrap();
        assert_eq!(problem.describe(), Some("Forbidden"));
    }
}
