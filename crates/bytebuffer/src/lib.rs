//! A cursor-addressed binary buffer.
//!
//! [`ByteBuffer`] owns a growable byte store and tracks an `offset` (next
//! read/write position), a `limit` (end of valid data) and an optional mark.
//! Typed accessors come in a relative form, which works at the cursor and
//! advances it, and an absolute `*_at` form.
//!
//! # Overview
//!
//! - Fixed-width integers and floats under big- or little-endian order
//! - 64-bit integers through the [`Long`] capability (feature `int64`)
//! - LEB128 and zig-zag varints (feature `varints`)
//! - UTF-8 strings, C strings and varint-prefixed strings (feature `strings`)
//!
//! # Example
//!
//! ```
//! use bytebuffer::{ByteBuffer, ByteBufferConfig};
//!
//! let config = ByteBufferConfig::default().with_capacity(4).little_endian();
//! let mut bb = ByteBuffer::with_config(config).unwrap();
//! bb.write_u32(0x01020304).unwrap();
//! bb.write_vstring("hi").unwrap();
//! bb.flip();
//!
//! assert_eq!(bb.read_u32().unwrap(), 0x01020304);
//! assert_eq!(bb.read_vstring().unwrap(), "hi");
//! ```

mod buffer;
mod config;
mod error;
mod long;
mod numeric;
mod octets;

#[cfg(feature = "int64")]
mod int64;
#[cfg(feature = "strings")]
mod string;
#[cfg(feature = "strings")]
pub mod utf8;
#[cfg(feature = "varints")]
pub mod varint;

pub use buffer::ByteBuffer;
pub use config::{ByteBufferConfig, Endianness, DEFAULT_CAPACITY, DEFAULT_ENDIANNESS};
pub use error::{BufferError, Result};
pub use long::Long;
pub use numeric::{Integer, Primitive};

#[cfg(feature = "strings")]
pub use string::{calculate_vstring, StringLength};
#[cfg(feature = "strings")]
pub use utf8::{calculate_utf8_bytes, calculate_utf8_chars};
#[cfg(feature = "varints")]
pub use varint::{
    calculate_varint32, calculate_varint64, zigzag_decode32, zigzag_decode64, zigzag_encode32,
    zigzag_encode64,
};
