use super::entities::decode_entities;
use super::event::{Attribute, MarkupEvent};
use memchr::{memchr, memmem};
use std::borrow::Cow;

const COMMENT_OPEN: &[u8] = b"<!--";
const COMMENT_CLOSE: &[u8] = b"-->";

#[inline]
fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}

#[inline]
fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

fn lowercase(name: &str) -> Cow<'_, str> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

/// Find the '>' closing a tag that starts at `start` (`s[start] == b'<'`).
///
/// Quotes only open an attribute value right after `=`, so an apostrophe in
/// prose does not swallow later tags. Outside quotes the scan stops at the
/// next `<`.
fn find_tag_end(s: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    let mut after_equals = false;
    while i < s.len() {
        match s[i] {
            b'>' => return Some(i),
            b'<' => return None,
            quote @ (b'"' | b'\'') if after_equals => {
                let close = memchr(quote, &s[i + 1..])?;
                i += close + 1;
                after_equals = false;
            }
            b'=' => after_equals = true,
            b if is_ws(b) => {}
            _ => after_equals = false,
        }
        i += 1;
    }
    None
}

/// Parses the attribute list between the tag name and the closing `>`.
fn parse_attributes(src: &str) -> Vec<Attribute<'_>> {
    let bytes = src.as_bytes();
    let n = bytes.len();
    let mut attrs = Vec::new();
    let mut i = 0;

    while i < n {
        while i < n && (is_ws(bytes[i]) || bytes[i] == b'/') {
            i += 1;
        }
        if i >= n {
            break;
        }

        let name_start = i;
        while i < n && !is_ws(bytes[i]) && bytes[i] != b'=' && bytes[i] != b'/' {
            i += 1;
        }
        let name = &src[name_start..i];

        while i < n && is_ws(bytes[i]) {
            i += 1;
        }
        if i >= n || bytes[i] != b'=' {
            if !name.is_empty() {
                attrs.push(Attribute::new(lowercase(name), ""));
            }
            continue;
        }

        i += 1;
        while i < n && is_ws(bytes[i]) {
            i += 1;
        }
        let value = if i < n && (bytes[i] == b'"' || bytes[i] == b'\'') {
            let quote = bytes[i];
            let value_start = i + 1;
            let value_end = memchr(quote, &bytes[value_start..]).map_or(n, |off| value_start + off);
            i = (value_end + 1).min(n);
            &src[value_start..value_end]
        } else {
            let value_start = i;
            while i < n && !is_ws(bytes[i]) {
                i += 1;
            }
            &src[value_start..i]
        };

        if !name.is_empty() {
            attrs.push(Attribute::new(lowercase(name), decode_entities(value)));
        }
    }

    attrs
}

/// A small forgiving tokenizer for the HTML subset found in federated post
/// bodies.
///
/// Text is entity-decoded, tag and attribute names are lowercased, and
/// comments, doctypes and processing instructions are dropped. Anything that
/// does not look like a tag is passed through as text, so the iterator never
/// fails.
///
/// ```
/// use mastosky::markup::{MarkupEvent, Tokenizer};
///
/// let events: Vec<_> = Tokenizer::new("<p>a &amp; b<br/></p>").collect();
/// assert_eq!(events[1], MarkupEvent::text("a & b"));
/// assert_eq!(events[2], MarkupEvent::self_closing("br"));
/// ```
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn text_until_next_tag(&mut self, from: usize) -> MarkupEvent<'a> {
        let src = self.src;
        let bytes = src.as_bytes();
        let end = memchr(b'<', &bytes[from..]).map_or(bytes.len(), |off| from + off);
        let text = &src[self.pos..end];
        self.pos = end;
        MarkupEvent::Text(decode_entities(text))
    }

    fn end_tag(&mut self, lt: usize, gt: usize) -> Option<MarkupEvent<'a>> {
        let src = self.src;
        let inner = &src[lt + 2..gt];
        let name_len = inner
            .bytes()
            .position(|b| !is_name_char(b))
            .unwrap_or(inner.len());
        if name_len == 0 {
            return None;
        }
        self.pos = gt + 1;
        Some(MarkupEvent::EndTag {
            name: lowercase(&inner[..name_len]),
        })
    }

    fn start_tag(&mut self, lt: usize, gt: usize) -> MarkupEvent<'a> {
        let src = self.src;
        let mut inner = &src[lt + 1..gt];
        let self_closing = inner.trim_end().ends_with('/');
        if self_closing {
            inner = inner.trim_end().trim_end_matches('/');
        }
        let name_len = inner
            .bytes()
            .position(|b| !is_name_char(b))
            .unwrap_or(inner.len());
        let name = lowercase(&inner[..name_len]);
        let attributes = parse_attributes(&inner[name_len..]);
        self.pos = gt + 1;

        if self_closing {
            MarkupEvent::SelfClosingTag { name, attributes }
        } else {
            MarkupEvent::StartTag { name, attributes }
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = MarkupEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let src = self.src;
        let bytes = src.as_bytes();
        loop {
            let lt = self.pos;
            if lt >= bytes.len() {
                return None;
            }
            if bytes[lt] != b'<' {
                return Some(self.text_until_next_tag(lt));
            }

            let rest = &bytes[lt..];
            if rest.starts_with(COMMENT_OPEN) {
                match memmem::find(&rest[COMMENT_OPEN.len()..], COMMENT_CLOSE) {
                    Some(off) => {
                        self.pos = lt + COMMENT_OPEN.len() + off + COMMENT_CLOSE.len();
                        continue;
                    }
                    None => return Some(self.text_until_next_tag(lt + 1)),
                }
            }

            let Some(gt) = find_tag_end(bytes, lt) else {
                return Some(self.text_until_next_tag(lt + 1));
            };

            match rest.get(1).copied() {
                Some(b'!') | Some(b'?') => {
                    self.pos = gt + 1;
                }
                Some(b'/') => {
                    if let Some(event) = self.end_tag(lt, gt) {
                        return Some(event);
                    }
                    return Some(self.text_until_next_tag(lt + 1));
                }
                Some(b) if b.is_ascii_alphabetic() => return Some(self.start_tag(lt, gt)),
                _ => return Some(self.text_until_next_tag(lt + 1)),
            }
        }
    }
}

/// Convenience wrapper returning every event of `src`.
pub fn tokenize(src: &str) -> Vec<MarkupEvent<'_>> {
    Tokenizer::new(src).collect()
}
