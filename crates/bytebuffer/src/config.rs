//! Construction-time configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default initial capacity of a buffer.
pub const DEFAULT_CAPACITY: usize = 16;

/// Default byte order.
pub const DEFAULT_ENDIANNESS: Endianness = Endianness::Big;

/// Byte order used by multi-byte accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Endianness {
    #[default]
    Big,
    Little,
}

impl Endianness {
    /// Returns `true` for little-endian.
    pub fn is_little(self) -> bool {
        self == Endianness::Little
    }
}

impl From<bool> for Endianness {
    /// Maps a "little endian" flag to a byte order.
    fn from(little_endian: bool) -> Self {
        if little_endian {
            Endianness::Little
        } else {
            Endianness::Big
        }
    }
}

/// Options for [`ByteBuffer::with_config`](crate::ByteBuffer::with_config).
///
/// | field        | default |
/// |--------------|---------|
/// | `capacity`   | 16      |
/// | `endianness` | big     |
/// | `assertions` | off     |
///
/// With `assertions` off, value-range checks and limit checks on reads are
/// skipped. Accesses are still confined to the allocated storage, and UTF-8 and
/// varint structure is always validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ByteBufferConfig {
    pub capacity: usize,
    pub endianness: Endianness,
    pub assertions: bool,
}

impl Default for ByteBufferConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            endianness: DEFAULT_ENDIANNESS,
            assertions: false,
        }
    }
}

impl ByteBufferConfig {
    /// Sets the initial capacity in bytes.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the default byte order.
    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    /// Shorthand for `with_endianness(Endianness::Little)`.
    pub fn little_endian(self) -> Self {
        self.with_endianness(Endianness::Little)
    }

    /// Enables or disables bounds and range checks.
    pub fn with_assertions(mut self, assertions: bool) -> Self {
        self.assertions = assertions;
        self
    }
}
