//! Annotation spans collected while walking post markup.
//!
//! Offsets are UTF-8 byte positions into the extracted text, which is what
//! Bluesky's `byteStart`/`byteEnd` facet indices expect.

use std::ops::Range;

/// Interpretation of the anchor currently being walked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextMode {
    /// A plain link (or no anchor at all).
    #[default]
    Url,
    /// A hashtag anchor; its text accumulates into the open hashtag span.
    Hashtag,
    /// A mention anchor. Mentions are rendered but never annotated.
    Mention,
}

/// A closed link annotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkSpan {
    pub start: usize,
    pub end: usize,
    pub url: String,
}

/// A closed hashtag annotation. `tag` is the anchor's visible text,
/// including any literal `#`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashtagSpan {
    pub start: usize,
    pub end: usize,
    pub tag: String,
}

impl LinkSpan {
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl HashtagSpan {
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// A link whose closing `</a>` has not been seen yet.
#[derive(Clone, Debug)]
pub(super) struct OpenLink {
    pub(super) start: usize,
    pub(super) url: String,
}

impl OpenLink {
    pub(super) fn close(self, end: usize) -> LinkSpan {
        LinkSpan {
            start: self.start,
            end,
            url: self.url,
        }
    }
}

/// A hashtag whose closing `</a>` has not been seen yet.
#[derive(Clone, Debug)]
pub(super) struct OpenHashtag {
    pub(super) start: usize,
    pub(super) tag: String,
}

impl OpenHashtag {
    pub(super) fn close(self, end: usize) -> HashtagSpan {
        HashtagSpan {
            start: self.start,
            end,
            tag: self.tag,
        }
    }
}

/// Moves a range measured against the untrimmed buffer onto the trimmed
/// text. `shift` is the number of bytes trimmed from the front and `len` the
/// trimmed length. Returns `None` when nothing of the range survives.
pub(super) fn rebase(range: Range<usize>, shift: usize, len: usize) -> Option<Range<usize>> {
    let start = range.start.saturating_sub(shift).min(len);
    let end = range.end.saturating_sub(shift).min(len);
    (start < end).then_some(start..end)
}
