//! Error type for buffer operations.

use thiserror::Error;

/// Error type for buffer operations.
///
/// Variants carry the offsets involved as plain fields so the error path never
/// allocates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// A constructor or parameter value is unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// An access of `len` bytes at `offset` exceeds `bound` (capacity or limit).
    #[error("out of bounds: {offset} + {len} > {bound}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        bound: usize,
    },
    /// A value does not fit the target type.
    #[error("value {value} out of range for {ty}")]
    Range { value: i64, ty: &'static str },
    /// Fewer than `needed` bytes remain before the limit at `offset`.
    #[error("truncated: {needed} bytes needed at {offset}, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// A structurally invalid encoding, such as an unterminated varint.
    #[error("malformed data at {offset}: {reason}")]
    Malformed { offset: usize, reason: &'static str },
    /// An invalid UTF-8 byte sequence or unpaired surrogate.
    #[error("invalid encoding at {offset}: {reason}")]
    InvalidEncoding { offset: usize, reason: &'static str },
    /// The operation is not valid in the buffer's current state.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

/// Result alias for buffer operations.
pub type Result<T> = std::result::Result<T, BufferError>;
