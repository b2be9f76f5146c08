use super::data::{path_display, Config, RelaySettings, DEFAULT_MAX_GRAPHEMES, DEFAULT_OPT_OUT_PREFIX};
use super::io::ConfigError;
use crate::richtext::ExtractOptions;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
    assert_eq!(config.extract_options(), ExtractOptions::default());
    assert_eq!(config.relay.max_graphemes(), DEFAULT_MAX_GRAPHEMES);
    assert_eq!(config.relay.opt_out_prefix(), DEFAULT_OPT_OUT_PREFIX);
    assert!(config.relay.require_public());
}

#[test]
fn test_config_persistence_roundtrip() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let config = Config {
        hashtag_class: Some("hashtag".to_string()),
        strip_hash: Some(true),
        relay: RelaySettings {
            max_graphemes: Some(280),
            opt_out_prefix: Some("[local]".to_string()),
            require_public: Some(false),
        },
        ..Default::default()
    };
    config
        .save_to_path(&config_path)
        .expect("Failed to save config");

    let loaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(loaded, config);

    let options = loaded.extract_options();
    assert_eq!(options.hashtag_class, "hashtag");
    assert_eq!(options.mention_class, "u-url mention");
    assert!(options.strip_hash);
    assert_eq!(loaded.relay.max_graphemes(), 280);
    assert_eq!(loaded.relay.opt_out_prefix(), "[local]");
    assert!(!loaded.relay.require_public());
}

#[test]
fn test_partial_config_uses_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[relay]\nmax_graphemes = 500\n").expect("write failed");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(config.relay.max_graphemes(), 500);
    assert_eq!(config.relay.opt_out_prefix(), DEFAULT_OPT_OUT_PREFIX);
    assert_eq!(config.extract_options(), ExtractOptions::default());
}

#[test]
fn test_invalid_toml_reports_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "strip_hash = \"sometimes\"\n").expect("write failed");

    let err = Config::load_from_path(&config_path).expect_err("parse should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("Failed to parse config at"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_save_reports_write_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let blocker = temp_dir.path().join("not-a-dir");
    fs::write(&blocker, "").expect("write failed");

    let err = Config::default()
        .save_to_path(&blocker.join("config.toml"))
        .expect_err("save under a file should fail");
    assert!(matches!(err, ConfigError::Write { .. }));
    assert!(err.to_string().starts_with("Failed to write config at"));
}

#[test]
fn test_with_defaults_matches_fallbacks() {
    let explicit = Config::with_defaults();
    let implicit = Config::default();
    assert_eq!(explicit.extract_options(), implicit.extract_options());
    assert_eq!(explicit.relay.max_graphemes(), implicit.relay.max_graphemes());
    assert_eq!(explicit.relay.opt_out_prefix(), implicit.relay.opt_out_prefix());
    assert_eq!(explicit.relay.require_public(), implicit.relay.require_public());
}

#[test]
fn test_path_display_leaves_relative_paths_alone() {
    assert_eq!(path_display("conf/config.toml"), "conf/config.toml");
}
