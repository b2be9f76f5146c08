//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod convert;
pub mod init;
pub mod relay;

use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

use crate::cli::convert::render_conversion;
use crate::cli::init::write_default_config;
use crate::cli::relay::render_relay;
use crate::core::config::{path_display, Config, ConfigError};
use crate::logging::init_tracing;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_DESCRIBE"),
    ", built ",
    env!("VERGEN_BUILD_DATE"),
    ")"
);

#[derive(Parser)]
#[command(name = "mastosky")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Convert Mastodon post markup into Bluesky text and facets")]
#[command(
    long_about = "mastosky turns the HTML body of a Mastodon post into the plain text and \
rich-text facets (links, hashtags) that a Bluesky post record expects. Offsets are UTF-8 \
byte ranges into the produced text.\n\n\
Input is read from FILE, or from stdin when FILE is omitted or '-'. Results are printed \
as JSON on stdout; diagnostics go to stderr.\n\n\
Configuration:\n\
  The config file (TOML) lives in the platform config directory as mastosky/config.toml,\n\
  or wherever --config points. Missing files mean defaults.\n\n\
Environment Variables:\n\
  RUST_LOG          Log filter, overrides -v (e.g. RUST_LOG=mastosky=debug)"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the config file
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level instead of info
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert post HTML into text and facets
    Convert {
        /// File holding the markup ('-' for stdin)
        input: Option<PathBuf>,
        /// Drop the leading '#' from hashtag facet labels
        #[arg(long)]
        strip_hash: bool,
    },
    /// Turn one streaming API message into a Bluesky post record
    Relay {
        /// File holding the JSON message ('-' for stdin)
        input: Option<PathBuf>,
    },
    /// Write a config file holding every default (to --config or the default location)
    Init {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);
    run(args)
}

pub fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let output = match args.command {
        Commands::Convert { input, strip_hash } => {
            let config = load_config(args.config.as_deref())?;
            let markup = read_input(input.as_deref())?;
            render_conversion(&markup, &config, strip_hash)?
        }
        Commands::Relay { input } => {
            let config = load_config(args.config.as_deref())?;
            let raw = read_input(input.as_deref())?;
            render_relay(&raw, &config)?
        }
        Commands::Init { force } => {
            let path = args
                .config
                .or_else(Config::default_path)
                .ok_or("No config directory found for this platform; pass --config")?;
            write_default_config(&path, force)?
        }
    };

    println!("{output}");
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => {
            debug!(path = %path_display(path), "Using config from --config");
            Config::load_from_path(path)
        }
        None => Config::load(),
    }
}

/// Reads the whole input, from stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
