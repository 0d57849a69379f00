//! 64-bit integer accessors composed from two 32-bit halves.

use crate::buffer::ByteBuffer;
use crate::config::Endianness;
use crate::error::Result;
use crate::long::Long;

impl ByteBuffer {
    /// Writes a 64-bit value as two 32-bit halves. Little-endian puts the low
    /// half first, big-endian the high half.
    pub fn write_long<L: Long>(
        &mut self,
        value: L,
        offset: Option<usize>,
        order: Option<Endianness>,
    ) -> Result<&mut Self> {
        let order = order.unwrap_or(self.endianness);
        let at = self.write_target(offset, 8)?;
        let (low, high) = (value.low_bits(), value.high_bits());
        let out = &mut self.storage[at..at + 8];
        match order {
            Endianness::Little => {
                out[..4].copy_from_slice(&low.to_le_bytes());
                out[4..].copy_from_slice(&high.to_le_bytes());
            }
            Endianness::Big => {
                out[..4].copy_from_slice(&high.to_be_bytes());
                out[4..].copy_from_slice(&low.to_be_bytes());
            }
        }
        Ok(self)
    }

    /// Reads a 64-bit value. Signedness follows `L`.
    pub fn read_long<L: Long>(
        &mut self,
        offset: Option<usize>,
        order: Option<Endianness>,
    ) -> Result<L> {
        let order = order.unwrap_or(self.endianness);
        let at = self.read_target(offset, 8)?;
        Ok(decode_long(&self.storage[at..at + 8], order))
    }

    /// Writes a signed 64-bit integer at the cursor.
    pub fn write_int64(&mut self, value: i64) -> Result<&mut Self> {
        self.write_long(value, None, None)
    }

    /// Writes a signed 64-bit integer at `offset`.
    pub fn write_int64_at(&mut self, value: i64, offset: usize) -> Result<&mut Self> {
        self.write_long(value, Some(offset), None)
    }

    /// Writes an unsigned 64-bit integer at the cursor.
    pub fn write_uint64(&mut self, value: u64) -> Result<&mut Self> {
        self.write_long(value, None, None)
    }

    /// Writes an unsigned 64-bit integer at `offset`.
    pub fn write_uint64_at(&mut self, value: u64, offset: usize) -> Result<&mut Self> {
        self.write_long(value, Some(offset), None)
    }

    /// Reads a signed 64-bit integer at the cursor.
    pub fn read_int64(&mut self) -> Result<i64> {
        self.read_long(None, None)
    }

    /// Reads a signed 64-bit integer at `offset`.
    pub fn read_int64_at(&self, offset: usize) -> Result<i64> {
        self.long_at(offset)
    }

    /// Reads an unsigned 64-bit integer at the cursor.
    pub fn read_uint64(&mut self) -> Result<u64> {
        self.read_long(None, None)
    }

    /// Reads an unsigned 64-bit integer at `offset`.
    pub fn read_uint64_at(&self, offset: usize) -> Result<u64> {
        self.long_at(offset)
    }

    fn long_at<L: Long>(&self, offset: usize) -> Result<L> {
        self.check_read(offset, 8)?;
        Ok(decode_long(&self.storage[offset..offset + 8], self.endianness))
    }
}

fn decode_long<L: Long>(bytes: &[u8], order: Endianness) -> L {
    let first = [bytes[0], bytes[1], bytes[2], bytes[3]];
    let second = [bytes[4], bytes[5], bytes[6], bytes[7]];
    match order {
        Endianness::Little => L::from_bits(u32::from_le_bytes(first), u32::from_le_bytes(second)),
        Endianness::Big => L::from_bits(u32::from_be_bytes(second), u32::from_be_bytes(first)),
    }
}
