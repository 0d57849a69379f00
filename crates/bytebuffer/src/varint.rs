//! LEB128 varints with optional zig-zag mapping.
//!
//! Each byte carries 7 payload bits, least significant group first, and sets
//! the high bit when more bytes follow. 32-bit values take at most 5 bytes,
//! 64-bit values at most 10.

use crate::buffer::ByteBuffer;
use crate::error::{BufferError, Result};
use crate::long::{from_u64, to_u64, Long};

/// Longest encoding of a 32-bit varint.
pub const MAX_VARINT32_BYTES: usize = 5;
/// Longest encoding of a 64-bit varint.
pub const MAX_VARINT64_BYTES: usize = 10;

/// Maps a signed value onto an unsigned one so that small magnitudes stay small.
#[inline]
pub fn zigzag_encode32(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

#[inline]
pub fn zigzag_decode32(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

#[inline]
pub fn zigzag_encode64(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

#[inline]
pub fn zigzag_decode64(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Encoded length of `value` as a varint32.
#[inline]
pub fn calculate_varint32(value: u32) -> usize {
    match value {
        0..=0x7f => 1,
        0x80..=0x3fff => 2,
        0x4000..=0x1f_ffff => 3,
        0x20_0000..=0xfff_ffff => 4,
        _ => 5,
    }
}

/// Encoded length of `value` as a varint64.
#[inline]
pub fn calculate_varint64(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Writes `value` into the front of `out`, returning the byte count.
#[inline]
fn encode(mut value: u64, out: &mut [u8]) -> usize {
    let mut i = 0;
    while value >= 0x80 {
        out[i] = (value as u8) | 0x80;
        value >>= 7;
        i += 1;
    }
    out[i] = value as u8;
    i + 1
}

/// Decodes a varint starting at `start`, reading no further than `end`.
/// Returns the value and the number of bytes consumed.
fn decode(bytes: &[u8], start: usize, end: usize, max_bytes: usize) -> Result<(u64, usize)> {
    let mut value = 0u64;
    let mut at = start;
    loop {
        let count = at - start;
        if count == max_bytes {
            return Err(BufferError::Malformed {
                offset: start,
                reason: "varint exceeds maximum length",
            });
        }
        if at >= end {
            return Err(BufferError::Truncated {
                offset: start,
                needed: count + 1,
                available: end.saturating_sub(start),
            });
        }
        let byte = bytes[at];
        at += 1;
        value |= ((byte & 0x7f) as u64) << (7 * count);
        if byte & 0x80 == 0 {
            return Ok((value, at - start));
        }
    }
}

/// Decodes a varint32 at `start` bounded by `end`.
#[inline]
pub(crate) fn decode_varint32(bytes: &[u8], start: usize, end: usize) -> Result<(u32, usize)> {
    decode(bytes, start, end, MAX_VARINT32_BYTES).map(|(v, len)| (v as u32, len))
}

impl ByteBuffer {
    fn write_varint(&mut self, value: u64, offset: Option<usize>) -> Result<usize> {
        let len = calculate_varint64(value);
        let at = self.write_target(offset, len)?;
        Ok(encode(value, &mut self.storage[at..at + len]))
    }

    fn read_varint(&mut self, max_bytes: usize) -> Result<u64> {
        let (value, len) = decode(&self.storage, self.offset, self.limit, max_bytes)?;
        self.offset += len;
        Ok(value)
    }

    fn varint_at(&self, offset: usize, max_bytes: usize) -> Result<(u64, usize)> {
        decode(&self.storage, offset, self.read_bound(), max_bytes)
    }

    /// Writes an unsigned varint32 at the cursor. Returns the byte count.
    pub fn write_varint32(&mut self, value: u32) -> Result<usize> {
        self.write_varint(value as u64, None)
    }

    /// Writes an unsigned varint32 at `offset`, which must have room for it.
    pub fn write_varint32_at(&mut self, value: u32, offset: usize) -> Result<usize> {
        self.write_varint(value as u64, Some(offset))
    }

    /// Writes a signed value as a zig-zag varint32 at the cursor.
    pub fn write_varint32_zigzag(&mut self, value: i32) -> Result<usize> {
        self.write_varint32(zigzag_encode32(value))
    }

    /// Writes a signed value as a zig-zag varint32 at `offset`.
    pub fn write_varint32_zigzag_at(&mut self, value: i32, offset: usize) -> Result<usize> {
        self.write_varint32_at(zigzag_encode32(value), offset)
    }

    /// Reads an unsigned varint32 at the cursor. Bits beyond the 32nd in a
    /// fifth byte are dropped.
    pub fn read_varint32(&mut self) -> Result<u32> {
        self.read_varint(MAX_VARINT32_BYTES).map(|v| v as u32)
    }

    /// Reads an unsigned varint32 at `offset`, returning the value and its
    /// encoded length.
    pub fn read_varint32_at(&self, offset: usize) -> Result<(u32, usize)> {
        decode_varint32(&self.storage, offset, self.read_bound())
    }

    /// Reads a zig-zag varint32 at the cursor.
    pub fn read_varint32_zigzag(&mut self) -> Result<i32> {
        self.read_varint32().map(zigzag_decode32)
    }

    /// Reads a zig-zag varint32 at `offset`, returning the value and its
    /// encoded length.
    pub fn read_varint32_zigzag_at(&self, offset: usize) -> Result<(i32, usize)> {
        self.read_varint32_at(offset)
            .map(|(v, len)| (zigzag_decode32(v), len))
    }

    /// Writes the 64-bit pattern of `value` as an unsigned varint64.
    pub fn write_varint64<L: Long>(&mut self, value: L) -> Result<usize> {
        self.write_varint(to_u64(value), None)
    }

    /// Writes the 64-bit pattern of `value` as an unsigned varint64 at `offset`.
    pub fn write_varint64_at<L: Long>(&mut self, value: L, offset: usize) -> Result<usize> {
        self.write_varint(to_u64(value), Some(offset))
    }

    /// Writes `value` as a zig-zag varint64. The value is taken as signed.
    pub fn write_varint64_zigzag<L: Long>(&mut self, value: L) -> Result<usize> {
        self.write_varint(zigzag_encode64(to_u64(value) as i64), None)
    }

    /// Writes `value` as a zig-zag varint64 at `offset`.
    pub fn write_varint64_zigzag_at<L: Long>(&mut self, value: L, offset: usize) -> Result<usize> {
        self.write_varint(zigzag_encode64(to_u64(value) as i64), Some(offset))
    }

    /// Reads an unsigned varint64 at the cursor.
    pub fn read_varint64<L: Long>(&mut self) -> Result<L> {
        self.read_varint(MAX_VARINT64_BYTES).map(from_u64)
    }

    /// Reads an unsigned varint64 at `offset`, returning the value and its
    /// encoded length.
    pub fn read_varint64_at<L: Long>(&self, offset: usize) -> Result<(L, usize)> {
        self.varint_at(offset, MAX_VARINT64_BYTES)
            .map(|(v, len)| (from_u64(v), len))
    }

    /// Reads a zig-zag varint64 at the cursor.
    pub fn read_varint64_zigzag<L: Long>(&mut self) -> Result<L> {
        self.read_varint(MAX_VARINT64_BYTES)
            .map(|v| from_u64(zigzag_decode64(v) as u64))
    }

    /// Reads a zig-zag varint64 at `offset`, returning the value and its
    /// encoded length.
    pub fn read_varint64_zigzag_at<L: Long>(&self, offset: usize) -> Result<(L, usize)> {
        self.varint_at(offset, MAX_VARINT64_BYTES)
            .map(|(v, len)| (from_u64(zigzag_decode64(v) as u64), len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ByteBufferConfig;

    #[test]
    fn encodes_300() {
        let mut bb = ByteBuffer::new();
        assert_eq!(bb.write_varint32(300).unwrap(), 2);
        assert_eq!(&bb.as_slice()[..2], &[0xAC, 0x02]);
        assert_eq!(bb.offset(), 2);
    }

    #[test]
    fn lengths() {
        assert_eq!(calculate_varint32(0), 1);
        assert_eq!(calculate_varint32(127), 1);
        assert_eq!(calculate_varint32(128), 2);
        assert_eq!(calculate_varint32(u32::MAX), 5);
        assert_eq!(calculate_varint64(0), 1);
        assert_eq!(calculate_varint64(1 << 35), 6);
        assert_eq!(calculate_varint64(u64::MAX), 10);
    }

    #[test]
    fn zigzag_edges() {
        assert_eq!(zigzag_encode32(0), 0);
        assert_eq!(zigzag_encode32(-1), 1);
        assert_eq!(zigzag_encode32(1), 2);
        assert_eq!(zigzag_encode32(i32::MAX), u32::MAX - 1);
        assert_eq!(zigzag_encode32(i32::MIN), u32::MAX);
        assert_eq!(zigzag_decode32(u32::MAX), i32::MIN);
        assert_eq!(zigzag_decode64(zigzag_encode64(i64::MIN)), i64::MIN);
    }

    #[test]
    fn negative_varint32_takes_five_bytes() {
        let mut bb = ByteBuffer::new();
        assert_eq!(bb.write_varint32(-1i32 as u32).unwrap(), 5);
        bb.flip();
        assert_eq!(bb.read_varint32().unwrap(), u32::MAX);
    }

    #[test]
    fn zigzag_roundtrip() {
        let mut bb = ByteBuffer::new();
        bb.write_varint32_zigzag(-64).unwrap();
        bb.write_varint64_zigzag(i64::MIN).unwrap();
        bb.flip();
        assert_eq!(bb.read_varint32_zigzag().unwrap(), -64);
        assert_eq!(bb.read_varint64_zigzag::<i64>().unwrap(), i64::MIN);
    }

    #[test]
    fn varint64_roundtrip() {
        let mut bb = ByteBuffer::new();
        assert_eq!(bb.write_varint64(u64::MAX).unwrap(), 10);
        bb.write_varint64(-1i64).unwrap();
        bb.flip();
        assert_eq!(bb.read_varint64::<u64>().unwrap(), u64::MAX);
        assert_eq!(bb.read_varint64::<i64>().unwrap(), -1);
    }

    #[test]
    fn truncated_at_limit() {
        let mut bb = ByteBuffer::from_bytes(vec![0x80, 0x80]);
        assert_eq!(
            bb.read_varint32().unwrap_err(),
            BufferError::Truncated {
                offset: 0,
                needed: 3,
                available: 2
            }
        );
        assert_eq!(bb.offset(), 0);
    }

    #[test]
    fn malformed_after_max_bytes() {
        let mut bb = ByteBuffer::from_bytes(vec![0xff; 12]);
        assert!(matches!(
            bb.read_varint32(),
            Err(BufferError::Malformed { offset: 0, .. })
        ));
        assert!(matches!(
            bb.read_varint64::<u64>(),
            Err(BufferError::Malformed { offset: 0, .. })
        ));
    }

    #[test]
    fn absolute_needs_room() {
        let mut bb = ByteBuffer::allocate(2).unwrap();
        assert!(bb.write_varint32_at(1 << 20, 0).is_err());
        assert_eq!(bb.write_varint32_at(300, 0).unwrap(), 2);
        assert_eq!(bb.read_varint32_at(0).unwrap(), (300, 2));
        assert_eq!(bb.offset(), 0);
    }

    #[test]
    fn absolute_read_respects_limit_with_assertions() {
        let config = ByteBufferConfig::default().with_capacity(4).with_assertions(true);
        let mut bb = ByteBuffer::with_config(config).unwrap();
        bb.write_varint32_at(300, 0).unwrap();
        bb.set_limit(1).unwrap();
        assert!(matches!(
            bb.read_varint32_at(0),
            Err(BufferError::Truncated { .. })
        ));
    }
}
