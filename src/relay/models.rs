//! The slice of the Mastodon streaming API the relay reads.
//!
//! Only the fields the relay acts on are modelled; everything else in the
//! payload is ignored during deserialization.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One message from `/api/v1/streaming`. `payload` is itself a JSON
/// document encoded as a string.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamEnvelope {
    #[serde(default)]
    pub stream: Vec<String>,
    pub event: String,
    #[serde(default)]
    pub payload: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Unlisted,
    Private,
    Direct,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Gifv,
    Video,
    Audio,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaAttachment {
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Link preview card attached to a status.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewCard {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Payload of an `update` event.
#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub url: Option<String>,
    pub visibility: Visibility,
    pub content: String,
    #[serde(default)]
    pub in_reply_to_id: Option<String>,
    #[serde(default)]
    pub reblog: Option<serde_json::Value>,
    #[serde(default)]
    pub media_attachments: Vec<MediaAttachment>,
    #[serde(default)]
    pub card: Option<PreviewCard>,
}

impl Status {
    /// Best identifier for log lines: the public URL when there is one.
    pub fn display_url(&self) -> &str {
        self.url.as_deref().unwrap_or(&self.id)
    }
}
