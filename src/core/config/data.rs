use crate::richtext::{ExtractOptions, DEFAULT_HASHTAG_CLASS, DEFAULT_MENTION_CLASS};
use serde::{Deserialize, Serialize};
use directories::BaseDirs;
use std::path::Path;

pub const DEFAULT_MAX_GRAPHEMES: usize = 300;
pub const DEFAULT_OPT_OUT_PREFIX: &str = "[Mastodon]";

/// Policy applied before a post is handed to Bluesky.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct RelaySettings {
    /// Longest post text, in grapheme clusters, that will be relayed.
    pub max_graphemes: Option<usize>,
    /// Posts whose text starts with this prefix stay on Mastodon.
    pub opt_out_prefix: Option<String>,
    /// Only relay posts with `public` visibility (default: true).
    pub require_public: Option<bool>,
}

impl RelaySettings {
    pub fn max_graphemes(&self) -> usize {
        self.max_graphemes.unwrap_or(DEFAULT_MAX_GRAPHEMES)
    }

    pub fn opt_out_prefix(&self) -> &str {
        self.opt_out_prefix
            .as_deref()
            .unwrap_or(DEFAULT_OPT_OUT_PREFIX)
    }

    pub fn require_public(&self) -> bool {
        self.require_public.unwrap_or(true)
    }
}

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// `class` substring identifying hashtag anchors
    pub hashtag_class: Option<String>,
    /// `class` substring identifying mention anchors
    pub mention_class: Option<String>,
    /// Remove the leading `#` from hashtag facet labels
    pub strip_hash: Option<bool>,
    #[serde(default)]
    pub relay: RelaySettings,
}

impl Config {
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            hashtag_class: self
                .hashtag_class
                .clone()
                .unwrap_or_else(|| DEFAULT_HASHTAG_CLASS.to_string()),
            mention_class: self
                .mention_class
                .clone()
                .unwrap_or_else(|| DEFAULT_MENTION_CLASS.to_string()),
            strip_hash: self.strip_hash.unwrap_or(false),
        }
    }
}

impl Config {
    /// Defaults with every setting spelled out, as written by `mastosky init`.
    pub fn with_defaults() -> Config {
        let options = ExtractOptions::default();
        Config {
            hashtag_class: Some(options.hashtag_class),
            mention_class: Some(options.mention_class),
            strip_hash: Some(options.strip_hash),
            relay: RelaySettings {
                max_graphemes: Some(DEFAULT_MAX_GRAPHEMES),
                opt_out_prefix: Some(DEFAULT_OPT_OUT_PREFIX.to_string()),
                require_public: Some(true),
            },
        }
    }
}

/// Shortens paths under the user's home directory to `~/...` for messages.
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
    match home.as_deref().and_then(|home| path.strip_prefix(home).ok()) {
        Some(rest) if !rest.as_os_str().is_empty() => {
            format!("~{}{}", std::path::MAIN_SEPARATOR, rest.display())
        }
        _ => path.display().to_string(),
    }
}
