use super::span::{rebase, HashtagSpan, LinkSpan, OpenHashtag, OpenLink, TextMode};
use crate::markup::{attribute_value, Attribute, MarkupEvent};
use tracing::debug;

const PARAGRAPH_BREAK: &str = "\n\n";
const LINE_BREAK: &str = "\n";

pub const DEFAULT_HASHTAG_CLASS: &str = "mention hashtag";
pub const DEFAULT_MENTION_CLASS: &str = "u-url mention";

/// The tags the extractor reacts to. Everything else is ignored, although
/// text nested inside unknown tags is still captured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Element {
    Paragraph,
    Break,
    Span,
    Anchor,
}

impl Element {
    fn from_tag_name(name: &str) -> Option<Self> {
        match name {
            "p" => Some(Element::Paragraph),
            "br" => Some(Element::Break),
            "span" => Some(Element::Span),
            "a" => Some(Element::Anchor),
            _ => None,
        }
    }
}

/// Knobs for how anchors are classified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Substring of an anchor's `class` marking it as a hashtag.
    pub hashtag_class: String,
    /// Substring of an anchor's `class` marking it as a user mention.
    pub mention_class: String,
    /// Drop one leading `#` from hashtag labels when building facets.
    pub strip_hash: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            hashtag_class: DEFAULT_HASHTAG_CLASS.to_string(),
            mention_class: DEFAULT_MENTION_CLASS.to_string(),
            strip_hash: false,
        }
    }
}

fn class_has_marker(class: &str, marker: &str) -> bool {
    !marker.is_empty() && class.contains(marker)
}

/// Output of a finished extractor.
///
/// `text` is trimmed and every span has already been re-based onto it, so
/// `&text[span.range()]` is the annotated text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub links: Vec<LinkSpan>,
    pub hashtags: Vec<HashtagSpan>,
}

/// Single-pass state machine turning markup events into plain text plus
/// link and hashtag spans.
///
/// One extractor handles exactly one post: feed it every event, then call
/// [`RichTextExtractor::finish`].
///
/// Anchors do not nest. Opening a second anchor of the same kind while one
/// is still open drops the earlier one.
///
/// ```
/// use mastosky::markup::Tokenizer;
/// use mastosky::richtext::{ExtractOptions, RichTextExtractor};
///
/// let mut extractor = RichTextExtractor::new(ExtractOptions::default());
/// extractor.extend(Tokenizer::new("<p>hi <a href=\"https://x.com\">there</a></p>"));
/// let out = extractor.finish();
/// assert_eq!(out.text, "hi there");
/// assert_eq!(&out.text[out.links[0].range()], "there");
/// ```
#[derive(Debug)]
pub struct RichTextExtractor {
    options: ExtractOptions,
    mode: TextMode,
    pending_paragraph_break: bool,
    // Concatenation of every fragment appended so far; its length is the
    // running byte offset.
    buffer: String,
    links: Vec<LinkSpan>,
    hashtags: Vec<HashtagSpan>,
    open_link: Option<OpenLink>,
    open_hashtag: Option<OpenHashtag>,
}

impl RichTextExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            mode: TextMode::Url,
            pending_paragraph_break: false,
            buffer: String::new(),
            links: Vec::new(),
            hashtags: Vec::new(),
            open_link: None,
            open_hashtag: None,
        }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    pub fn mode(&self) -> TextMode {
        self.mode
    }

    /// Current byte offset into the untrimmed buffer.
    pub fn offset(&self) -> usize {
        self.buffer.len()
    }

    pub fn feed(&mut self, event: &MarkupEvent<'_>) {
        match event {
            MarkupEvent::Text(text) => self.push_text(text),
            MarkupEvent::StartTag { name, attributes } => {
                match Element::from_tag_name(name) {
                    Some(Element::Anchor) => self.open_anchor(attributes),
                    Some(Element::Break) => self.push_line_break(),
                    Some(Element::Span) => self.pending_paragraph_break = false,
                    Some(Element::Paragraph) | None => {}
                }
            }
            MarkupEvent::SelfClosingTag { name, .. } => {
                if Element::from_tag_name(name) == Some(Element::Break) {
                    self.push_line_break();
                }
            }
            MarkupEvent::EndTag { name } => match Element::from_tag_name(name) {
                Some(Element::Anchor) => self.close_anchor(),
                Some(Element::Paragraph) => self.pending_paragraph_break = true,
                Some(Element::Span) => self.pending_paragraph_break = false,
                Some(Element::Break) | None => {}
            },
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.pending_paragraph_break {
            self.push_paragraph_break();
        }
        if self.mode == TextMode::Hashtag {
            if let Some(open) = self.open_hashtag.as_mut() {
                open.tag.push_str(text);
            }
        }
        self.buffer.push_str(text);
    }

    /// Writes the pending separator. Spans opened since the last fragment
    /// start at the separator's offset and are moved past it.
    fn push_paragraph_break(&mut self) {
        let before = self.buffer.len();
        self.buffer.push_str(PARAGRAPH_BREAK);
        self.pending_paragraph_break = false;

        let after = self.buffer.len();
        if let Some(open) = self.open_link.as_mut().filter(|open| open.start == before) {
            open.start = after;
        }
        if let Some(open) = self.open_hashtag.as_mut().filter(|open| open.start == before) {
            open.start = after;
        }
    }

    fn push_line_break(&mut self) {
        self.buffer.push_str(LINE_BREAK);
        self.pending_paragraph_break = false;
    }

    fn open_anchor(&mut self, attributes: &[Attribute<'_>]) {
        let start = self.buffer.len();
        let class = attribute_value(attributes, "class");

        if class.is_some_and(|c| class_has_marker(c, &self.options.hashtag_class)) {
            self.mode = TextMode::Hashtag;
            let replaced = self.open_hashtag.replace(OpenHashtag {
                start,
                tag: String::new(),
            });
            if let Some(dropped) = replaced {
                debug!(start = dropped.start, "Dropping unclosed hashtag span");
            }
        } else if class.is_some_and(|c| class_has_marker(c, &self.options.mention_class)) {
            self.mode = TextMode::Mention;
        } else if let Some(href) = attribute_value(attributes, "href") {
            self.mode = TextMode::Url;
            let replaced = self.open_link.replace(OpenLink {
                start,
                url: href.to_string(),
            });
            if let Some(dropped) = replaced {
                debug!(url = %dropped.url, "Dropping unclosed link span");
            }
        }
    }

    fn close_anchor(&mut self) {
        let end = self.buffer.len();
        match self.mode {
            TextMode::Mention => {}
            TextMode::Hashtag => {
                if let Some(open) = self.open_hashtag.take() {
                    self.hashtags.push(open.close(end));
                }
                self.mode = TextMode::Url;
            }
            TextMode::Url => {
                if let Some(open) = self.open_link.take() {
                    self.links.push(open.close(end));
                }
            }
        }
    }

    /// Trims the text, re-bases every closed span onto it and drops spans
    /// that were never closed or cover no text.
    pub fn finish(self) -> Extraction {
        if let Some(open) = &self.open_link {
            debug!(url = %open.url, "Discarding link left open at end of input");
        }
        if let Some(open) = &self.open_hashtag {
            debug!(tag = %open.tag, "Discarding hashtag left open at end of input");
        }

        let untrimmed = self.buffer.as_str();
        let text = untrimmed.trim();
        let shift = untrimmed.len() - untrimmed.trim_start().len();
        let len = text.len();

        let links: Vec<LinkSpan> = self
            .links
            .into_iter()
            .filter_map(|span| {
                let range = rebase(span.range(), shift, len)?;
                Some(LinkSpan {
                    start: range.start,
                    end: range.end,
                    url: span.url,
                })
            })
            .collect();
        let hashtags: Vec<HashtagSpan> = self
            .hashtags
            .into_iter()
            .filter_map(|span| {
                let range = rebase(span.range(), shift, len)?;
                Some(HashtagSpan {
                    start: range.start,
                    end: range.end,
                    tag: span.tag,
                })
            })
            .collect();

        debug!(
            bytes = len,
            links = links.len(),
            hashtags = hashtags.len(),
            "Extracted rich text"
        );

        Extraction {
            text: text.to_string(),
            links,
            hashtags,
        }
    }
}

impl Default for RichTextExtractor {
    fn default() -> Self {
        Self::new(ExtractOptions::default())
    }
}

impl<'a> Extend<MarkupEvent<'a>> for RichTextExtractor {
    fn extend<I: IntoIterator<Item = MarkupEvent<'a>>>(&mut self, events: I) {
        for event in events {
            self.feed(&event);
        }
    }
}
