//! Turns Mastodon streaming events into Bluesky post records.
//!
//! This is the posting-side policy around [`crate::richtext`]: which statuses
//! are relayed at all, and what the resulting record looks like. Uploading
//! media and talking to either network is left to the caller.

pub mod models;
pub mod record;


pub use models::{AttachmentKind, MediaAttachment, PreviewCard, Status, StreamEnvelope, Visibility};
pub use record::{EmbedPlan, ImagePlan, PostRecord, PreparedPost, POST_RECORD_TYPE};

use crate::core::config::Config;
use crate::richtext;
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;
use tracing::info;
use unicode_segmentation::UnicodeSegmentation;

const UPDATE_EVENT: &str = "update";
// app.bsky.embed.images accepts at most four images.
const MAX_IMAGES: usize = 4;

/// Why a status was not relayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotAnUpdate,
    Reply,
    Reblog,
    TooLong,
    OptOut,
    NotPublic,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::NotAnUpdate => "not an update event",
            SkipReason::Reply => "reply post",
            SkipReason::Reblog => "reblog",
            SkipReason::TooLong => "post with too much text",
            SkipReason::OptOut => "post meant for Mastodon only",
            SkipReason::NotPublic => "non-public post",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    Ready(PreparedPost),
    Skipped(SkipReason),
}

#[derive(Debug)]
pub enum RelayError {
    /// The envelope or its embedded payload was not valid JSON for the
    /// expected shape.
    Decode(serde_json::Error),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::Decode(source) => write!(f, "Failed to decode streaming message: {source}"),
        }
    }
}

impl StdError for RelayError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            RelayError::Decode(source) => Some(source),
        }
    }
}

pub fn decode_envelope(raw: &str) -> Result<StreamEnvelope, RelayError> {
    serde_json::from_str(raw).map_err(RelayError::Decode)
}

/// Decodes the payload of an envelope and prepares it for posting.
pub fn prepare_post(envelope: &StreamEnvelope, config: &Config) -> Result<PostOutcome, RelayError> {
    if envelope.event != UPDATE_EVENT {
        return Ok(PostOutcome::Skipped(SkipReason::NotAnUpdate));
    }
    let status: Status = serde_json::from_str(&envelope.payload).map_err(RelayError::Decode)?;
    Ok(prepare_status(&status, config))
}

pub fn prepare_status(status: &Status, config: &Config) -> PostOutcome {
    let url = status.display_url();
    info!(url = %url, "Received post");

    let skip = |reason: SkipReason| {
        info!(url = %url, reason = %reason, "Ignoring post");
        PostOutcome::Skipped(reason)
    };

    if status.in_reply_to_id.is_some() {
        return skip(SkipReason::Reply);
    }
    if status.reblog.is_some() {
        return skip(SkipReason::Reblog);
    }

    let options = config.extract_options();
    let rich = richtext::parse_with(&status.content, &options);

    if rich.text.graphemes(true).count() > config.relay.max_graphemes() {
        return skip(SkipReason::TooLong);
    }
    let prefix = config.relay.opt_out_prefix();
    if !prefix.is_empty() && rich.text.starts_with(prefix) {
        return skip(SkipReason::OptOut);
    }
    if config.relay.require_public() && status.visibility != Visibility::Public {
        return skip(SkipReason::NotPublic);
    }

    PostOutcome::Ready(PreparedPost {
        source_url: url.to_string(),
        record: PostRecord {
            record_type: POST_RECORD_TYPE,
            text: rich.text,
            facets: rich.facets,
            created_at: status.created_at,
            embed: embed_plan(status),
        },
    })
}

/// Images win over the link card, as only one embed is allowed per post.
fn embed_plan(status: &Status) -> Option<EmbedPlan> {
    let images: Vec<ImagePlan> = status
        .media_attachments
        .iter()
        .filter(|attachment| attachment.kind == AttachmentKind::Image)
        .take(MAX_IMAGES)
        .map(|attachment| ImagePlan {
            url: attachment.url.clone(),
            alt: attachment.description.clone().unwrap_or_default(),
        })
        .collect();

    if !images.is_empty() {
        return Some(EmbedPlan::Images { images });
    }

    status.card.as_ref().map(|card| EmbedPlan::External {
        uri: card.url.clone(),
        title: card.title.clone(),
        description: card.description.clone().unwrap_or_default(),
        thumb: card.image.clone(),
    })
}
