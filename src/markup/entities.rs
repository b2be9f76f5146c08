use memchr::memchr;
use std::borrow::Cow;

// Longest named reference we recognise, plus the trailing ';'.
const MAX_REFERENCE_LEN: usize = 10;

fn named_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        "hellip" => Some('\u{2026}'),
        "mdash" => Some('\u{2014}'),
        "ndash" => Some('\u{2013}'),
        _ => None,
    }
}

fn numeric_reference(body: &str) -> Option<char> {
    let code = match body.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => body.parse::<u32>().ok()?,
    };
    match code {
        0 => Some('\u{fffd}'),
        _ => char::from_u32(code),
    }
}

/// Decodes a character reference starting at `&` in `rest`.
/// Returns the decoded char and the number of bytes consumed.
fn decode_one(rest: &str) -> Option<(char, usize)> {
    let window = &rest.as_bytes()[..rest.len().min(MAX_REFERENCE_LEN + 1)];
    let semi = memchr(b';', window)?;
    let body = &rest[1..semi];
    let decoded = match body.strip_prefix('#') {
        Some(num) => numeric_reference(num)?,
        None => named_reference(body)?,
    };
    Some((decoded, semi + 1))
}

/// Replaces character references (`&amp;`, `&#39;`, `&#x1F600;`) with the
/// characters they name. Unknown or malformed references are kept verbatim.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    let Some(first) = memchr(b'&', bytes) else {
        return Cow::Borrowed(input);
    };

    let mut out = String::with_capacity(input.len());
    out.push_str(&input[..first]);
    let mut i = first;
    while i < bytes.len() {
        match decode_one(&input[i..]) {
            Some((ch, consumed)) => {
                out.push(ch);
                i += consumed;
            }
            None => {
                out.push('&');
                i += 1;
            }
        }
        let next = memchr(b'&', &bytes[i..]).map_or(bytes.len(), |off| i + off);
        out.push_str(&input[i..next]);
        i = next;
    }
    Cow::Owned(out)
}
