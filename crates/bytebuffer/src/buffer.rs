//! Storage and region model: backing bytes plus the offset/limit/mark cursor.

use std::fmt;

use crate::config::{ByteBufferConfig, Endianness};
use crate::error::{BufferError, Result};
use crate::octets::write_octets;

/// A growable byte store addressed by a read/write cursor.
///
/// The buffer keeps `0 <= offset <= limit <= capacity` after every public
/// operation. Relative accessors work at `offset` and advance it; absolute
/// (`*_at`) accessors take an explicit offset and leave the cursor alone.
///
/// # Example
///
/// ```
/// use bytebuffer::ByteBuffer;
///
/// let mut bb = ByteBuffer::new();
/// bb.write_u8(0x01).unwrap().write_u16(0x0203).unwrap();
/// bb.flip();
/// assert_eq!(bb.read_u8().unwrap(), 0x01);
/// assert_eq!(bb.read_u16().unwrap(), 0x0203);
/// assert_eq!(bb.remaining(), 0);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ByteBuffer {
    pub(crate) storage: Vec<u8>,
    pub(crate) offset: usize,
    pub(crate) limit: usize,
    pub(crate) mark: Option<usize>,
    pub(crate) endianness: Endianness,
    pub(crate) assertions: bool,
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn end_of(offset: usize, len: usize, bound: usize) -> Result<usize> {
    match offset.checked_add(len) {
        Some(end) if end <= bound => Ok(end),
        _ => Err(BufferError::OutOfBounds { offset, len, bound }),
    }
}

fn check_capacity(capacity: usize) -> Result<()> {
    if capacity > isize::MAX as usize {
        return Err(BufferError::InvalidArgument("capacity exceeds isize::MAX"));
    }
    Ok(())
}

/// Zeroed storage of `capacity` bytes, failing instead of aborting when the
/// allocation cannot be made.
fn zeroed(capacity: usize) -> Result<Vec<u8>> {
    check_capacity(capacity)?;
    let mut storage = Vec::new();
    storage
        .try_reserve_exact(capacity)
        .map_err(|_| BufferError::InvalidArgument("capacity cannot be allocated"))?;
    storage.resize(capacity, 0);
    Ok(storage)
}

impl ByteBuffer {
    /// Creates a buffer with the default configuration (16 bytes, big-endian,
    /// assertions off).
    pub fn new() -> Self {
        let config = ByteBufferConfig::default();
        Self::from_parts(vec![0; config.capacity], config)
    }

    /// Allocates a zeroed buffer of `capacity` bytes with default options.
    pub fn allocate(capacity: usize) -> Result<Self> {
        Self::with_config(ByteBufferConfig::default().with_capacity(capacity))
    }

    /// Allocates a zeroed buffer from an explicit configuration.
    pub fn with_config(config: ByteBufferConfig) -> Result<Self> {
        let storage = zeroed(config.capacity)?;
        Ok(Self::from_parts(storage, config))
    }

    /// Adopts `bytes` as backing storage. The cursor starts at 0 and the limit
    /// at the end of the bytes; `config.capacity` is ignored.
    pub fn wrap(bytes: impl Into<Vec<u8>>, config: ByteBufferConfig) -> Self {
        Self::from_parts(bytes.into(), config)
    }

    /// Adopts `bytes` with default options.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::wrap(bytes, ByteBufferConfig::default())
    }

    fn from_parts(storage: Vec<u8>, config: ByteBufferConfig) -> Self {
        let limit = storage.len();
        Self {
            storage,
            offset: 0,
            limit,
            mark: None,
            endianness: config.endianness,
            assertions: config.assertions,
        }
    }

    /// Concatenates the `[offset, limit)` regions of `buffers` into a new
    /// buffer whose limit is the total length.
    pub fn concat(buffers: &[ByteBuffer], config: ByteBufferConfig) -> Self {
        let total = buffers.iter().map(ByteBuffer::remaining).sum();
        let mut storage = Vec::with_capacity(total);
        for buffer in buffers {
            storage.extend_from_slice(buffer.remaining_slice());
        }
        Self::from_parts(storage, config)
    }

    // ---------------------------------------------------------------- state

    /// Length of the backing storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Current read/write cursor.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// End of the valid data.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The saved cursor, if any.
    #[inline]
    pub fn marked_offset(&self) -> Option<usize> {
        self.mark
    }

    /// Number of bytes between the cursor and the limit.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.limit - self.offset
    }

    /// Byte order used when an accessor is not given one.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Sets the byte order used when an accessor is not given one.
    pub fn set_order(&mut self, endianness: Endianness) -> &mut Self {
        self.endianness = endianness;
        self
    }

    /// Whether bounds and range checks are enforced.
    pub fn assertions(&self) -> bool {
        self.assertions
    }

    /// Turns bounds and range checks on or off.
    pub fn set_assertions(&mut self, assertions: bool) -> &mut Self {
        self.assertions = assertions;
        self
    }

    /// Moves the cursor. Fails unless `offset <= limit`.
    pub fn set_offset(&mut self, offset: usize) -> Result<()> {
        end_of(offset, 0, self.limit)?;
        self.offset = offset;
        Ok(())
    }

    /// Moves the limit. Fails unless `offset <= limit <= capacity`.
    pub fn set_limit(&mut self, limit: usize) -> Result<()> {
        end_of(limit, 0, self.capacity())?;
        if limit < self.offset {
            return Err(BufferError::OutOfBounds {
                offset: self.offset,
                len: 0,
                bound: limit,
            });
        }
        self.limit = limit;
        Ok(())
    }

    // ---------------------------------------------------------------- bytes

    /// The whole backing storage.
    pub fn as_slice(&self) -> &[u8] {
        &self.storage
    }

    /// The whole backing storage, mutably. Cursor state is unaffected.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.storage
    }

    /// Bytes between the cursor and the limit.
    pub fn remaining_slice(&self) -> &[u8] {
        &self.storage[self.offset..self.limit]
    }

    /// Copies the bytes between the cursor and the limit.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.remaining_slice().to_vec()
    }

    /// Releases the backing storage.
    pub fn into_inner(self) -> Vec<u8> {
        self.storage
    }

    // ---------------------------------------------------------------- growth

    /// Grows the storage to at least `min_capacity` bytes by repeated
    /// doubling. Existing bytes and cursor state are preserved.
    pub fn ensure_capacity(&mut self, min_capacity: usize) -> Result<()> {
        let current = self.capacity();
        if current >= min_capacity {
            return Ok(());
        }
        let mut target = current.max(1);
        while target < min_capacity {
            target = match target.checked_mul(2) {
                Some(doubled) => doubled,
                None => min_capacity,
            };
        }
        if target > isize::MAX as usize {
            target = min_capacity;
        }
        self.resize(target)
    }

    /// Sets the capacity exactly. When shrinking, the cursor, limit and mark
    /// are clamped to the new capacity and the truncated bytes are dropped.
    pub fn resize(&mut self, capacity: usize) -> Result<()> {
        check_capacity(capacity)?;
        let current = self.capacity();
        if capacity > current {
            self.storage
                .try_reserve_exact(capacity - current)
                .map_err(|_| BufferError::InvalidArgument("capacity cannot be allocated"))?;
            self.storage.resize(capacity, 0);
            tracing::trace!(from = current, to = capacity, "buffer storage grown");
        } else if capacity < current {
            self.storage.truncate(capacity);
            self.storage.shrink_to_fit();
            self.limit = self.limit.min(capacity);
            self.offset = self.offset.min(self.limit);
            self.mark = self.mark.map(|mark| mark.min(capacity));
            tracing::trace!(from = current, to = capacity, "buffer storage shrunk");
        }
        Ok(())
    }

    // ---------------------------------------------------------------- regions

    fn range(&self, begin: Option<usize>, end: Option<usize>) -> Result<(usize, usize)> {
        let begin = begin.unwrap_or(self.offset);
        let end = end.unwrap_or(self.limit);
        if begin > end {
            return Err(BufferError::OutOfBounds {
                offset: begin,
                len: 0,
                bound: end,
            });
        }
        end_of(begin, end - begin, self.capacity())?;
        Ok((begin, end))
    }

    /// Returns a new buffer holding a copy of `[begin, end)`, with the cursor
    /// at 0 and the limit at the copied length.
    pub fn slice(&self, begin: usize, end: usize) -> Result<ByteBuffer> {
        let (begin, end) = self.range(Some(begin), Some(end))?;
        Ok(Self {
            storage: self.storage[begin..end].to_vec(),
            offset: 0,
            limit: end - begin,
            mark: None,
            endianness: self.endianness,
            assertions: self.assertions,
        })
    }

    /// Copies `[begin, end)` out as plain bytes.
    pub fn copy(&self, begin: usize, end: usize) -> Result<Vec<u8>> {
        let (begin, end) = self.range(Some(begin), Some(end))?;
        Ok(self.storage[begin..end].to_vec())
    }

    /// Copies `[source_begin, source_end)` (default `[offset, limit)`) into
    /// `target` at `target_offset` (default: its cursor, growing it).
    ///
    /// Cursors whose offsets were defaulted advance past the copied bytes.
    /// Returns the number of bytes copied.
    pub fn copy_to(
        &mut self,
        target: &mut ByteBuffer,
        target_offset: Option<usize>,
        source_begin: Option<usize>,
        source_end: Option<usize>,
    ) -> Result<usize> {
        let (begin, end) = self.range(source_begin, source_end)?;
        let len = end - begin;
        let at = target.write_target(target_offset, len)?;
        target.storage[at..at + len].copy_from_slice(&self.storage[begin..end]);
        if source_begin.is_none() {
            self.offset = end.min(self.limit);
        }
        Ok(len)
    }

    /// Discards everything outside `[begin, end)` (default `[offset, limit)`)
    /// and moves that region to the front. Afterwards the cursor is 0, the
    /// limit and capacity are `end - begin`, and a mark inside the region
    /// follows its byte.
    pub fn compact(&mut self, begin: Option<usize>, end: Option<usize>) -> Result<()> {
        let (begin, end) = self.range(begin, end)?;
        let len = end - begin;
        self.storage.copy_within(begin..end, 0);
        self.storage.truncate(len);
        self.storage.shrink_to_fit();
        self.mark = self
            .mark
            .filter(|mark| (begin..=end).contains(mark))
            .map(|mark| mark - begin);
        self.offset = 0;
        self.limit = len;
        tracing::trace!(begin, end, "buffer compacted");
        Ok(())
    }

    /// Resets the cursor to 0 and the limit to the capacity, dropping the
    /// mark. Bytes are left as they are.
    pub fn clear(&mut self) -> &mut Self {
        self.offset = 0;
        self.limit = self.capacity();
        self.mark = None;
        self
    }

    /// Switches from writing to reading: the limit becomes the cursor and the
    /// cursor goes back to 0.
    pub fn flip(&mut self) -> &mut Self {
        self.limit = self.offset;
        self.offset = 0;
        self
    }

    /// Reverses `[begin, end)` (default `[offset, limit)`) in place.
    pub fn reverse(&mut self, begin: Option<usize>, end: Option<usize>) -> Result<()> {
        let (begin, end) = self.range(begin, end)?;
        self.storage[begin..end].reverse();
        Ok(())
    }

    /// Sets every byte of `[begin, end)` to `value`. Without `begin` the fill
    /// starts at the cursor and the cursor moves to `end`.
    pub fn fill(&mut self, value: u8, begin: Option<usize>, end: Option<usize>) -> Result<()> {
        let (from, to) = self.range(begin, end)?;
        self.storage[from..to].fill(value);
        if begin.is_none() {
            self.offset = to.min(self.limit);
        }
        Ok(())
    }

    /// Saves the current cursor.
    pub fn mark(&mut self) -> &mut Self {
        self.mark = Some(self.offset);
        self
    }

    /// Saves an explicit offset as the mark.
    pub fn mark_at(&mut self, offset: usize) -> Result<()> {
        end_of(offset, 0, self.capacity())?;
        self.mark = Some(offset);
        Ok(())
    }

    /// Restores the cursor from the mark and clears the mark.
    pub fn reset(&mut self) -> Result<()> {
        let mark = self
            .mark
            .ok_or(BufferError::InvalidState("no mark set"))?;
        end_of(mark, 0, self.limit)?;
        self.offset = mark;
        self.mark = None;
        Ok(())
    }

    /// Moves the cursor by `delta` bytes, backwards when negative.
    pub fn skip(&mut self, delta: isize) -> Result<()> {
        let target = self
            .offset
            .checked_add_signed(delta)
            .ok_or(BufferError::OutOfBounds {
                offset: self.offset,
                len: 0,
                bound: self.limit,
            })?;
        self.set_offset(target)
    }

    // ---------------------------------------------------------------- raw bytes

    /// Writes `source` at the cursor, growing the storage if needed.
    pub fn append(&mut self, source: &[u8]) -> Result<&mut Self> {
        let at = self.claim_write(source.len())?;
        self.storage[at..at + source.len()].copy_from_slice(source);
        Ok(self)
    }

    /// Writes `source` at `offset`, which must already be within capacity.
    pub fn append_at(&mut self, source: &[u8], offset: usize) -> Result<&mut Self> {
        self.check_write(offset, source.len())?;
        self.storage[offset..offset + source.len()].copy_from_slice(source);
        Ok(self)
    }

    /// Appends the remaining bytes of `source`, consuming them.
    pub fn append_from(&mut self, source: &mut ByteBuffer) -> Result<&mut Self> {
        self.append(source.remaining_slice())?;
        source.offset = source.limit;
        Ok(self)
    }

    /// Writes `source` so that it ends right before `offset` (default: the
    /// cursor). When fewer than `source.len()` bytes precede it, the storage
    /// grows at the front; bytes before `offset` are dropped and the cursor,
    /// limit and mark shift with the data. The relative form leaves the
    /// cursor at the first prepended byte.
    pub fn prepend(&mut self, source: &[u8], offset: Option<usize>) -> Result<&mut Self> {
        let len = source.len();
        let mut at = offset.unwrap_or(self.offset);
        end_of(at, 0, self.capacity())?;
        if len > at {
            let diff = len - at;
            let capacity = self
                .capacity()
                .checked_add(diff)
                .ok_or(BufferError::InvalidArgument("capacity overflow"))?;
            let mut storage = zeroed(capacity)?;
            storage[len..].copy_from_slice(&self.storage[at..]);
            self.storage = storage;
            self.offset += diff;
            self.limit += diff;
            self.mark = self.mark.map(|mark| mark + diff);
            at += diff;
            tracing::trace!(grown = diff, "buffer grown at front for prepend");
        }
        self.storage[at - len..at].copy_from_slice(source);
        if offset.is_none() {
            self.offset -= len;
        }
        Ok(self)
    }

    /// Reads `len` bytes at the cursor, advancing it.
    pub fn read_bytes(&mut self, len: usize) -> Result<&[u8]> {
        let at = self.claim_read(len)?;
        Ok(&self.storage[at..at + len])
    }

    /// Reads `len` bytes at `offset`.
    pub fn read_bytes_at(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.check_read(offset, len)?;
        Ok(&self.storage[offset..offset + len])
    }

    // ---------------------------------------------------------------- accessor plumbing

    /// Upper bound for absolute reads: the limit with assertions on, the
    /// capacity otherwise.
    #[inline]
    pub(crate) fn read_bound(&self) -> usize {
        if self.assertions {
            self.limit
        } else {
            self.capacity()
        }
    }

    #[inline]
    pub(crate) fn check_write(&self, offset: usize, len: usize) -> Result<()> {
        end_of(offset, len, self.capacity()).map(drop)
    }

    #[inline]
    pub(crate) fn check_read(&self, offset: usize, len: usize) -> Result<()> {
        end_of(offset, len, self.read_bound()).map(drop)
    }

    /// Reserves `len` bytes at the cursor, grows the storage as needed and
    /// advances past them. Returns where the bytes start.
    #[inline]
    pub(crate) fn claim_write(&mut self, len: usize) -> Result<usize> {
        let start = self.offset;
        let end = start
            .checked_add(len)
            .ok_or(BufferError::InvalidArgument("capacity overflow"))?;
        self.ensure_capacity(end)?;
        self.advance_to(end);
        Ok(start)
    }

    /// Consumes `len` bytes before the limit. Returns where they start.
    #[inline]
    pub(crate) fn claim_read(&mut self, len: usize) -> Result<usize> {
        let start = self.offset;
        self.offset = end_of(start, len, self.limit)?;
        Ok(start)
    }

    /// Moves the cursor to `end`, pulling the limit along if it passes it.
    #[inline]
    pub(crate) fn advance_to(&mut self, end: usize) {
        self.offset = end;
        if end > self.limit {
            self.limit = end;
        }
    }

    #[inline]
    pub(crate) fn write_target(&mut self, offset: Option<usize>, len: usize) -> Result<usize> {
        match offset {
            Some(at) => {
                self.check_write(at, len)?;
                Ok(at)
            }
            None => self.claim_write(len),
        }
    }

    #[inline]
    pub(crate) fn read_target(&mut self, offset: Option<usize>, len: usize) -> Result<usize> {
        match offset {
            Some(at) => {
                self.check_read(at, len)?;
                Ok(at)
            }
            None => self.claim_read(len),
        }
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ByteBuffer(offset={}, mark={:?}, limit={}, capacity={}, {:?}) [",
            self.offset,
            self.mark,
            self.limit,
            self.capacity(),
            self.endianness,
        )?;
        write_octets(f, &self.storage, 16)?;
        f.write_str("]")
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        self.remaining_slice()
    }
}
