//! UTF-8 and UTF-16 transcoding primitives.

use crate::error::{BufferError, Result};

/// Substituted for unpaired surrogates when assertions are off.
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// Number of bytes in the UTF-8 sequence introduced by `lead`, or `None` if
/// `lead` cannot start a sequence (continuation bytes, overlong leads, and
/// leads past U+10FFFF).
#[inline]
pub(crate) fn sequence_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7f => Some(1),
        0xc2..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf4 => Some(4),
        _ => None,
    }
}

/// Number of bytes `s` takes as UTF-8.
pub fn calculate_utf8_bytes(s: &str) -> usize {
    s.len()
}

/// Number of code points in `s`.
pub fn calculate_utf8_chars(s: &str) -> usize {
    s.chars().count()
}

/// Composes UTF-16 code units into code points.
///
/// An unpaired surrogate yields [`BufferError::InvalidEncoding`] (offset in
/// code units) when `strict`, and [`REPLACEMENT_CHARACTER`] otherwise.
pub fn utf16_chars(units: &[u16], strict: bool) -> impl Iterator<Item = Result<char>> + '_ {
    let mut index = 0;
    char::decode_utf16(units.iter().copied()).map(move |unit| match unit {
        Ok(c) => {
            index += c.len_utf16();
            Ok(c)
        }
        Err(_) => {
            let at = index;
            index += 1;
            if strict {
                Err(BufferError::InvalidEncoding {
                    offset: at,
                    reason: "unpaired surrogate",
                })
            } else {
                Ok(REPLACEMENT_CHARACTER)
            }
        }
    })
}

/// Counts the code points and UTF-8 bytes `units` transcode to.
pub fn calculate_utf16_as_utf8(units: &[u16], strict: bool) -> Result<(usize, usize)> {
    let mut chars = 0;
    let mut bytes = 0;
    for c in utf16_chars(units, strict) {
        chars += 1;
        bytes += c?.len_utf8();
    }
    Ok((chars, bytes))
}

/// Validates `bytes` as UTF-8. `base` is the buffer offset of `bytes[0]`,
/// used in errors.
pub(crate) fn validate(bytes: &[u8], base: usize) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| {
        let valid = e.valid_up_to();
        let offset = base + valid;
        match e.error_len() {
            Some(_) => BufferError::InvalidEncoding {
                offset,
                reason: "invalid UTF-8 sequence",
            },
            None => BufferError::Truncated {
                offset,
                needed: sequence_width(bytes[valid]).unwrap_or(1),
                available: bytes.len() - valid,
            },
        }
    })
}

/// Finds where `chars` code points starting at `start` end, without reading
/// past `end`. Only lead bytes are inspected; run [`validate`] on the span.
pub(crate) fn span_chars(bytes: &[u8], start: usize, end: usize, chars: usize) -> Result<usize> {
    let mut at = start;
    for _ in 0..chars {
        if at >= end {
            return Err(BufferError::Truncated {
                offset: at,
                needed: 1,
                available: 0,
            });
        }
        let lead = bytes[at];
        let width = sequence_width(lead).ok_or(BufferError::InvalidEncoding {
            offset: at,
            reason: if lead & 0xc0 == 0x80 {
                "unexpected continuation byte"
            } else {
                "invalid UTF-8 lead byte"
            },
        })?;
        if width > end - at {
            return Err(BufferError::Truncated {
                offset: at,
                needed: width,
                available: end - at,
            });
        }
        at += width;
    }
    Ok(at)
}
