use crate::core::config::Config;
use crate::relay::{decode_envelope, prepare_post, PostOutcome};
use serde_json::json;
use std::error::Error;

/// Prepares one streaming message and renders either the post record or the
/// reason it was skipped.
pub fn render_relay(raw: &str, config: &Config) -> Result<String, Box<dyn Error>> {
    let envelope = decode_envelope(raw)?;
    let rendered = match prepare_post(&envelope, config)? {
        PostOutcome::Ready(post) => serde_json::to_string_pretty(&post)?,
        PostOutcome::Skipped(reason) => serde_json::to_string_pretty(&json!({
            "skipped": reason,
            "reason": reason.to_string(),
        }))?,
    };
    Ok(rendered)
}
