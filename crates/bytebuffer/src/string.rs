//! UTF-8 string records: plain, NUL-terminated and varint32-length-prefixed.
//!
//! Decoding always validates UTF-8, whatever the assertion mode.

use crate::buffer::ByteBuffer;
use crate::error::{BufferError, Result};
use crate::utf8::{calculate_utf16_as_utf8, span_chars, utf16_chars, validate};
use crate::varint::calculate_varint32;

/// How much of the buffer a string read consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringLength {
    /// A number of code points.
    Chars(usize),
    /// A number of bytes.
    Bytes(usize),
    /// Up to the next NUL byte, which is consumed but not returned.
    NulTerminated,
}

/// Encoded size of `s` as a varint32-length-prefixed record. Fails like
/// [`ByteBuffer::write_vstring`] when `s` is longer than `u32::MAX` bytes.
pub fn calculate_vstring(s: &str) -> Result<usize> {
    let (_, prefix) = vstring_prefix(s.len())?;
    Ok(prefix + s.len())
}

/// Length prefix of a V string body of `len` bytes and its encoded size.
fn vstring_prefix(len: usize) -> Result<(u32, usize)> {
    let n = u32::try_from(len)
        .map_err(|_| BufferError::InvalidArgument("string longer than u32::MAX bytes"))?;
    Ok((n, calculate_varint32(n)))
}

impl ByteBuffer {
    fn put_bytes(&mut self, bytes: &[u8], offset: Option<usize>) -> Result<usize> {
        let at = self.write_target(offset, bytes.len())?;
        self.storage[at..at + bytes.len()].copy_from_slice(bytes);
        Ok(bytes.len())
    }

    /// Writes `s` as UTF-8 at the cursor. Returns the byte count.
    pub fn write_utf8_string(&mut self, s: &str) -> Result<usize> {
        self.put_bytes(s.as_bytes(), None)
    }

    /// Writes `s` as UTF-8 at `offset`. Returns the byte count.
    pub fn write_utf8_string_at(&mut self, s: &str, offset: usize) -> Result<usize> {
        self.put_bytes(s.as_bytes(), Some(offset))
    }

    /// Transcodes UTF-16 code units to UTF-8 at the cursor. Returns the byte
    /// count.
    ///
    /// Surrogate pairs become a single 4-byte sequence. An unpaired surrogate
    /// fails with [`BufferError::InvalidEncoding`] when assertions are on and
    /// is written as U+FFFD when they are off.
    pub fn write_utf16(&mut self, units: &[u16]) -> Result<usize> {
        self.put_utf16(units, None)
    }

    /// Transcodes UTF-16 code units to UTF-8 at `offset`.
    pub fn write_utf16_at(&mut self, units: &[u16], offset: usize) -> Result<usize> {
        self.put_utf16(units, Some(offset))
    }

    fn put_utf16(&mut self, units: &[u16], offset: Option<usize>) -> Result<usize> {
        let strict = self.assertions;
        let (_, len) = calculate_utf16_as_utf8(units, strict)?;
        let mut at = self.write_target(offset, len)?;
        for c in utf16_chars(units, strict) {
            at += c?.encode_utf8(&mut self.storage[at..]).len();
        }
        Ok(len)
    }

    /// Decodes a string at the cursor and advances past it.
    ///
    /// Fails with [`BufferError::Truncated`] when the limit cuts the string
    /// short and [`BufferError::InvalidEncoding`] on malformed UTF-8.
    pub fn read_utf8_string(&mut self, length: StringLength) -> Result<String> {
        let (s, consumed) = self.utf8_span(self.offset, self.limit, length)?;
        let s = s.to_owned();
        self.offset += consumed;
        Ok(s)
    }

    /// Decodes a string at `offset`, returning it with the bytes consumed.
    pub fn read_utf8_string_at(&self, length: StringLength, offset: usize) -> Result<(String, usize)> {
        let (s, consumed) = self.utf8_span(offset, self.read_bound(), length)?;
        Ok((s.to_owned(), consumed))
    }

    fn utf8_span(&self, start: usize, end: usize, length: StringLength) -> Result<(&str, usize)> {
        if start > end {
            return Err(BufferError::OutOfBounds {
                offset: start,
                len: 0,
                bound: end,
            });
        }
        let bytes = &self.storage[..end];
        match length {
            StringLength::Bytes(n) => {
                if n > end - start {
                    return Err(BufferError::Truncated {
                        offset: start,
                        needed: n,
                        available: end - start,
                    });
                }
                Ok((validate(&bytes[start..start + n], start)?, n))
            }
            StringLength::Chars(n) => {
                let stop = span_chars(bytes, start, end, n)?;
                Ok((validate(&bytes[start..stop], start)?, stop - start))
            }
            StringLength::NulTerminated => {
                let nul = bytes[start..]
                    .iter()
                    .position(|&b| b == 0)
                    .ok_or(BufferError::Truncated {
                        offset: start,
                        needed: end - start + 1,
                        available: end - start,
                    })?;
                Ok((validate(&bytes[start..start + nul], start)?, nul + 1))
            }
        }
    }

    // ---------------------------------------------------------------- C strings

    /// Writes `s` followed by a NUL byte. Returns the byte count including the
    /// terminator. With assertions on, a string containing NUL is rejected.
    pub fn write_cstring(&mut self, s: &str) -> Result<usize> {
        self.put_cstring(s, None)
    }

    /// Writes `s` followed by a NUL byte at `offset`.
    pub fn write_cstring_at(&mut self, s: &str, offset: usize) -> Result<usize> {
        self.put_cstring(s, Some(offset))
    }

    fn put_cstring(&mut self, s: &str, offset: Option<usize>) -> Result<usize> {
        if self.assertions && s.as_bytes().contains(&0) {
            return Err(BufferError::InvalidArgument("string contains NUL"));
        }
        let len = s.len() + 1;
        let at = self.write_target(offset, len)?;
        self.storage[at..at + s.len()].copy_from_slice(s.as_bytes());
        self.storage[at + s.len()] = 0;
        Ok(len)
    }

    /// Reads up to the next NUL byte and moves the cursor past it.
    pub fn read_cstring(&mut self) -> Result<String> {
        self.read_utf8_string(StringLength::NulTerminated)
    }

    /// Reads a NUL-terminated string at `offset`, returning it and the bytes
    /// consumed including the NUL.
    pub fn read_cstring_at(&self, offset: usize) -> Result<(String, usize)> {
        self.read_utf8_string_at(StringLength::NulTerminated, offset)
    }

    // ---------------------------------------------------------------- V strings

    /// Writes the UTF-8 byte length of `s` as a varint32 and then the bytes.
    /// Returns the total byte count.
    pub fn write_vstring(&mut self, s: &str) -> Result<usize> {
        self.put_vstring(s, None)
    }

    /// Writes a varint32-length-prefixed string at `offset`.
    pub fn write_vstring_at(&mut self, s: &str, offset: usize) -> Result<usize> {
        self.put_vstring(s, Some(offset))
    }

    fn put_vstring(&mut self, s: &str, offset: Option<usize>) -> Result<usize> {
        let (n, prefix) = vstring_prefix(s.len())?;
        let total = prefix + s.len();
        let at = self.write_target(offset, total)?;
        self.write_varint32_at(n, at)?;
        self.storage[at + prefix..at + total].copy_from_slice(s.as_bytes());
        Ok(total)
    }

    /// Reads a varint32-length-prefixed string at the cursor.
    pub fn read_vstring(&mut self) -> Result<String> {
        let (s, consumed) = self.vstring_span(self.offset, self.limit)?;
        self.offset += consumed;
        Ok(s)
    }

    /// Reads a varint32-length-prefixed string at `offset`, returning it and
    /// the bytes consumed.
    pub fn read_vstring_at(&self, offset: usize) -> Result<(String, usize)> {
        self.vstring_span(offset, self.read_bound())
    }

    fn vstring_span(&self, start: usize, end: usize) -> Result<(String, usize)> {
        let (n, prefix) = crate::varint::decode_varint32(&self.storage, start, end)?;
        let (s, len) = self.utf8_span(start + prefix, end, StringLength::Bytes(n as usize))?;
        Ok((s.to_owned(), prefix + len))
    }
}
