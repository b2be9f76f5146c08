//! Post markup to Bluesky rich text.
//!
//! [`RichTextExtractor`] walks the markup events once and records link and
//! hashtag spans as UTF-8 byte ranges; [`build_facets`] then turns those
//! spans into `app.bsky.richtext.facet` records. [`parse`] wires the two
//! together with the built-in tokenizer.

mod extract;
mod facet;
mod span;

#[cfg(test)]
mod tests;

pub use extract::{
    ExtractOptions, Extraction, RichTextExtractor, DEFAULT_HASHTAG_CLASS, DEFAULT_MENTION_CLASS,
};
pub use facet::{build_facets, ByteSlice, Facet, FacetFeature};
pub use span::{HashtagSpan, LinkSpan, TextMode};

use crate::markup::Tokenizer;
use serde::Serialize;

/// Plain text and the facets annotating it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RichText {
    pub text: String,
    pub facets: Vec<Facet>,
}

impl RichText {
    /// The slice of `text` a facet covers, if its range is valid.
    pub fn facet_text(&self, facet: &Facet) -> Option<&str> {
        self.text.get(facet.range())
    }
}

pub fn parse(markup: &str) -> RichText {
    parse_with(markup, &ExtractOptions::default())
}

pub fn parse_with(markup: &str, options: &ExtractOptions) -> RichText {
    let mut extractor = RichTextExtractor::new(options.clone());
    extractor.extend(Tokenizer::new(markup));
    let extraction = extractor.finish();
    let facets = build_facets(&extraction, options.strip_hash);
    RichText {
        text: extraction.text,
        facets,
    }
}
