//! mastosky converts Mastodon post bodies into Bluesky posts.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`markup`] tokenizes post HTML into a flat event stream.
//! - [`richtext`] walks those events once, producing plain text plus link
//!   and hashtag facets with UTF-8 byte offsets.
//! - [`relay`] decodes Mastodon streaming messages, decides which statuses
//!   to relay and assembles `app.bsky.feed.post` records.
//! - [`core`] holds configuration loading and persistence.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`].
//!
//! ```
//! let rich = mastosky::richtext::parse("<p>hello <a href=\"https://x.com\">world</a></p>");
//! assert_eq!(rich.text, "hello world");
//! assert_eq!(rich.facets[0].range(), 6..11);
//! ```

pub mod cli;
pub mod core;
pub mod logging;
pub mod markup;
pub mod relay;
pub mod richtext;
