//! Conversion of extracted spans into Bluesky rich-text facets
//! (`app.bsky.richtext.facet`).

use super::extract::Extraction;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Byte range a facet applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteSlice {
    #[serde(rename = "byteStart")]
    pub byte_start: usize,
    #[serde(rename = "byteEnd")]
    pub byte_end: usize,
}

impl From<Range<usize>> for ByteSlice {
    fn from(range: Range<usize>) -> Self {
        Self {
            byte_start: range.start,
            byte_end: range.end,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "$type")]
pub enum FacetFeature {
    #[serde(rename = "app.bsky.richtext.facet#link")]
    Link { uri: String },
    #[serde(rename = "app.bsky.richtext.facet#tag")]
    Tag { tag: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub index: ByteSlice,
    pub features: Vec<FacetFeature>,
}

impl Facet {
    pub fn link(range: Range<usize>, uri: impl Into<String>) -> Self {
        Self {
            index: range.into(),
            features: vec![FacetFeature::Link { uri: uri.into() }],
        }
    }

    pub fn tag(range: Range<usize>, tag: impl Into<String>) -> Self {
        Self {
            index: range.into(),
            features: vec![FacetFeature::Tag { tag: tag.into() }],
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.index.byte_start..self.index.byte_end
    }

    /// The single feature every facet built here carries.
    pub fn feature(&self) -> Option<&FacetFeature> {
        self.features.first()
    }

    pub fn uri(&self) -> Option<&str> {
        match self.feature()? {
            FacetFeature::Link { uri } => Some(uri),
            FacetFeature::Tag { .. } => None,
        }
    }

    pub fn tag_label(&self) -> Option<&str> {
        match self.feature()? {
            FacetFeature::Tag { tag } => Some(tag),
            FacetFeature::Link { .. } => None,
        }
    }
}

fn hashtag_label(raw: &str, strip_hash: bool) -> String {
    let label = raw.trim();
    if strip_hash {
        label.strip_prefix('#').unwrap_or(label).to_string()
    } else {
        label.to_string()
    }
}

/// Builds facets for every closed span: links first, then hashtags, each in
/// the order they appeared.
pub fn build_facets(extraction: &Extraction, strip_hash: bool) -> Vec<Facet> {
    let links = extraction
        .links
        .iter()
        .map(|span| Facet::link(span.range(), span.url.trim()));
    let hashtags = extraction
        .hashtags
        .iter()
        .map(|span| Facet::tag(span.range(), hashtag_label(&span.tag, strip_hash)));
    links.chain(hashtags).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::richtext::{HashtagSpan, LinkSpan};
    use serde_json::json;

    #[test]
    fn facets_serialize_in_bluesky_shape() {
        let facet = Facet::link(6..11, "https://x.com");
        assert_eq!(
            serde_json::to_value(&facet).unwrap(),
            json!({
                "index": { "byteStart": 6, "byteEnd": 11 },
                "features": [
                    { "$type": "app.bsky.richtext.facet#link", "uri": "https://x.com" }
                ]
            })
        );

        let tag = Facet::tag(0..5, "#test");
        assert_eq!(
            serde_json::to_value(&tag).unwrap()["features"][0],
            json!({ "$type": "app.bsky.richtext.facet#tag", "tag": "#test" })
        );
    }

    #[test]
    fn links_precede_hashtags_and_payloads_are_trimmed() {
        let extraction = Extraction {
            text: "#a x #b".to_string(),
            links: vec![LinkSpan {
                start: 3,
                end: 4,
                url: " https://x.example \n".to_string(),
            }],
            hashtags: vec![
                HashtagSpan {
                    start: 0,
                    end: 2,
                    tag: " #a".to_string(),
                },
                HashtagSpan {
                    start: 5,
                    end: 7,
                    tag: "#b ".to_string(),
                },
            ],
        };

        let facets = build_facets(&extraction, false);
        assert_eq!(facets.len(), 3);
        assert_eq!(facets[0].uri(), Some("https://x.example"));
        assert_eq!(facets[1].tag_label(), Some("#a"));
        assert_eq!(facets[2].tag_label(), Some("#b"));
        assert_eq!(facets[2].range(), 5..7);

        let stripped = build_facets(&extraction, true);
        assert_eq!(stripped[1].tag_label(), Some("a"));
    }
}
