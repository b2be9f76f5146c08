use crate::core::config::Config;
use crate::richtext;

/// Converts `markup` and renders the result as pretty JSON.
pub fn render_conversion(
    markup: &str,
    config: &Config,
    strip_hash: bool,
) -> Result<String, serde_json::Error> {
    let mut options = config.extract_options();
    options.strip_hash |= strip_hash;
    let rich = richtext::parse_with(markup, &options);
    serde_json::to_string_pretty(&rich)
}
