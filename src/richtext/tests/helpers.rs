use crate::markup::tokenize;
use crate::richtext::{parse, Extraction, Facet, RichText, RichTextExtractor};

pub fn extract_for_test(markup: &str) -> Extraction {
    let mut extractor = RichTextExtractor::default();
    extractor.extend(tokenize(markup));
    extractor.finish()
}

pub fn covered<'a>(rich: &'a RichText, facet: &Facet) -> &'a str {
    rich.facet_text(facet).expect("facet range should be valid for the text")
}

pub fn parse_text(markup: &str) -> String {
    parse(markup).text
}
