//! URL helpers for capture extraction
//!
//! Captures are cut out of the raw URL and decoded afterwards, one path segment
//! at a time, so an encoded `%2F` never turns into a segment boundary.

use std::borrow::Cow;

// =============================================================================
// Percent Decoding
// =============================================================================

/// Percent-decode a captured URL fragment.
///
/// `+` is left alone (this is path decoding, not form decoding). A fragment with a
/// malformed escape, or one that decodes to invalid UTF-8, is returned unchanged.
pub fn percent_decode(input: &str) -> Cow<'_, str> {
    if !input.contains('%') {
        return Cow::Borrowed(input);
    }

    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b != b'%' {
            out.push(b);
            i += 1;
            continue;
        }

        let high = bytes.get(i + 1).copied().and_then(hex_digit);
        let low = bytes.get(i + 2).copied().and_then(hex_digit);
        match (high, low) {
            (Some(high), Some(low)) => {
                out.push(high << 4 | low);
                i += 3;
            }
            _ => return Cow::Borrowed(input),
        }
    }

    match String::from_utf8(out) {
        Ok(decoded) => Cow::Owned(decoded),
        Err(_) => Cow::Borrowed(input),
    }
}

#[inline]
fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

// =============================================================================
// Path Segments
// =============================================================================

/// Split a raw fragment on `/`, skipping empty segments.
#[inline]
pub fn path_segments(fragment: &str) -> impl Iterator<Item = &str> {
    fragment.split('/').filter(|segment| !segment.is_empty())
}
