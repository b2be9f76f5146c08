//! Diagnostic output for the `mastosky` binary.
//!
//! Library code only emits `tracing` events; this module installs the
//! subscriber that prints them. Logs go to stderr so stdout stays clean JSON.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Maps the number of `-v` flags to a default filter directive.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        _ => "debug",
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `verbosity` when set.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_tracing(verbosity: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let console_layer = fmt::layer()
        .with_target(verbosity > 0)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(env_filter)
        .try_init();
}
