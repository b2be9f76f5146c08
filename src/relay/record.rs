use crate::richtext::Facet;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const POST_RECORD_TYPE: &str = "app.bsky.feed.post";

/// An image the posting layer should upload and attach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePlan {
    pub url: String,
    pub alt: String,
}

/// What to embed once blobs are uploaded. Carries source URLs only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EmbedPlan {
    Images {
        images: Vec<ImagePlan>,
    },
    External {
        uri: String,
        title: String,
        description: String,
        thumb: Option<String>,
    },
}

/// A Bluesky `app.bsky.feed.post` record, minus uploaded blobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRecord {
    #[serde(rename = "$type")]
    pub record_type: &'static str,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub facets: Vec<Facet>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed: Option<EmbedPlan>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedPost {
    pub source_url: String,
    pub record: PostRecord,
}
