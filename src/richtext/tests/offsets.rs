use super::helpers::{covered, extract_for_test};
use crate::richtext::parse;

#[test]
fn offsets_are_utf8_bytes() {
    let rich = parse("<p>héllo <a href=\"https://é.example\">wörld</a> 👋</p>");
    assert_eq!(rich.text, "héllo wörld 👋");
    let facet = &rich.facets[0];
    assert_eq!(facet.range(), 7..13);
    assert_eq!(covered(&rich, facet), "wörld");
}

#[test]
fn emoji_inside_hashtag() {
    let rich = parse("<p>🎉🎉 <a class=\"mention hashtag\" href=\"#\">#día</a></p>");
    let facet = &rich.facets[0];
    assert_eq!(covered(&rich, facet), "#día");
    assert_eq!(facet.range(), 9..14);
}

#[test]
fn leading_whitespace_is_trimmed_and_offsets_follow() {
    let rich = parse("   \n <a href=\"https://x.com\">x.com</a> tail");
    assert_eq!(rich.text, "x.com tail");
    assert_eq!(rich.facets[0].range(), 0..5);
    assert_eq!(covered(&rich, &rich.facets[0]), "x.com");
}

#[test]
fn trailing_whitespace_inside_anchor_is_clamped() {
    let rich = parse("<p>see <a href=\"https://x.com\">x.com  </a></p>");
    assert_eq!(rich.text, "see x.com");
    assert_eq!(covered(&rich, &rich.facets[0]), "x.com");
}

#[test]
fn anchor_after_paragraph_break_starts_after_the_gap() {
    let rich = parse(
        "<p>one</p><p><a class=\"mention hashtag\" href=\"#\">#two</a> and \
<a href=\"https://x.com\">link</a></p>",
    );
    assert_eq!(rich.text, "one\n\n#two and link");
    for facet in &rich.facets {
        let text = covered(&rich, facet);
        assert!(!text.starts_with('\n'), "facet covers the break: {text:?}");
    }
    assert_eq!(covered(&rich, &rich.facets[0]), "link");
    assert_eq!(covered(&rich, &rich.facets[1]), "#two");
}

#[test]
fn every_span_reconstructs_its_anchor_text() {
    let markup = "<p>a <a href=\"https://1\">one</a></p><p>b <a href=\"https://2\">twö</a><br>\
c <a class=\"mention hashtag\" href=\"#\">#three</a> <a href=\"https://4\">four</a></p>";
    let extraction = extract_for_test(markup);
    let texts: Vec<&str> = extraction
        .links
        .iter()
        .map(|span| {
            assert!(span.start <= span.end);
            &extraction.text[span.range()]
        })
        .collect();
    assert_eq!(texts, vec!["one", "twö", "four"]);
    assert_eq!(
        &extraction.text[extraction.hashtags[0].range()],
        "#three"
    );
    assert_eq!(extraction.hashtags[0].tag, "#three");
}

#[test]
fn entity_decoding_happens_before_offsets() {
    let rich = parse("<p>Q&amp;A <a href=\"https://x.com/?a=1&amp;b=2\">R&amp;D</a></p>");
    assert_eq!(rich.text, "Q&A R&D");
    assert_eq!(covered(&rich, &rich.facets[0]), "R&D");
    assert_eq!(rich.facets[0].uri(), Some("https://x.com/?a=1&b=2"));
}

#[test]
fn link_opening_a_paragraph_with_span_children_keeps_its_start() {
    let extraction = extract_for_test(
        "<p>first</p><p><a href=\"https://x.com/p\"><span class=\"invisible\">https://</span>\
<span>x.com/p</span></a></p>",
    );
    assert_eq!(extraction.text, "firsthttps://x.com/p");
    let link = &extraction.links[0];
    assert_eq!(link.range(), 5..20);
    assert_eq!(&extraction.text[link.range()], "https://x.com/p");
}

#[test]
fn span_child_after_paragraph_never_splits_a_character() {
    let extraction = extract_for_test("<p>a</p><p><a href=\"u\"><span>👋b</span></a></p>");
    assert_eq!(extraction.text, "a👋b");
    assert_eq!(extraction.links[0].range(), 1..6);
    assert_eq!(&extraction.text[extraction.links[0].range()], "👋b");
}

#[test]
fn hashtag_opening_a_paragraph_moves_past_the_break() {
    let extraction =
        extract_for_test("<p>one</p><p><a class=\"mention hashtag\" href=\"#\">#two</a></p>");
    assert_eq!(extraction.text, "one\n\n#two");
    assert_eq!(extraction.hashtags[0].range(), 5..9);
    assert_eq!(&extraction.text[extraction.hashtags[0].range()], "#two");
}
