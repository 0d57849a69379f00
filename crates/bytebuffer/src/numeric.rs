//! Fixed-width integer and IEEE-754 float accessors.

use crate::buffer::ByteBuffer;
use crate::config::Endianness;
use crate::error::{BufferError, Result};

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width value that can be stored in a [`ByteBuffer`].
pub trait Primitive: Copy + sealed::Sealed {
    /// Encoded size in bytes.
    const WIDTH: usize;

    /// Writes the value into the first `WIDTH` bytes of `out`.
    fn encode(self, order: Endianness, out: &mut [u8]);

    /// Reads a value from the first `WIDTH` bytes of `bytes`.
    fn decode(bytes: &[u8], order: Endianness) -> Self;
}

/// An integer type narrower than 64 bits, writable from a wide `i64`.
pub trait Integer: Primitive {
    const NAME: &'static str;
    const MIN: i64;
    const MAX: i64;

    /// Two's-complement truncation of `value`.
    fn wrapping_from(value: i64) -> Self;
}

macro_rules! impl_primitive {
    ($($ty:ty => $width:literal),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Primitive for $ty {
            const WIDTH: usize = $width;

            #[inline]
            fn encode(self, order: Endianness, out: &mut [u8]) {
                let raw = match order {
                    Endianness::Big => self.to_be_bytes(),
                    Endianness::Little => self.to_le_bytes(),
                };
                out[..$width].copy_from_slice(&raw);
            }

            #[inline]
            fn decode(bytes: &[u8], order: Endianness) -> Self {
                let mut raw = [0u8; $width];
                raw.copy_from_slice(&bytes[..$width]);
                match order {
                    Endianness::Big => <$ty>::from_be_bytes(raw),
                    Endianness::Little => <$ty>::from_le_bytes(raw),
                }
            }
        }
    )*};
}

impl_primitive! {
    u8 => 1,
    i8 => 1,
    u16 => 2,
    i16 => 2,
    u32 => 4,
    i32 => 4,
    f32 => 4,
    f64 => 8,
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl Integer for $ty {
            const NAME: &'static str = stringify!($ty);
            const MIN: i64 = <$ty>::MIN as i64;
            const MAX: i64 = <$ty>::MAX as i64;

            #[inline]
            fn wrapping_from(value: i64) -> Self {
                value as $ty
            }
        }
    )*};
}

impl_integer!(u8, i8, u16, i16, u32, i32);

impl ByteBuffer {
    /// Writes `value` at `offset`, or at the cursor (growing and advancing)
    /// when `offset` is `None`. `order` overrides the buffer's byte order.
    ///
    /// Absolute writes never grow the storage.
    #[inline]
    pub fn write_value<T: Primitive>(
        &mut self,
        value: T,
        offset: Option<usize>,
        order: Option<Endianness>,
    ) -> Result<&mut Self> {
        let order = order.unwrap_or(self.endianness);
        let at = self.write_target(offset, T::WIDTH)?;
        value.encode(order, &mut self.storage[at..at + T::WIDTH]);
        Ok(self)
    }

    /// Reads a value at `offset`, or at the cursor (advancing) when `offset`
    /// is `None`. `order` overrides the buffer's byte order.
    #[inline]
    pub fn read_value<T: Primitive>(
        &mut self,
        offset: Option<usize>,
        order: Option<Endianness>,
    ) -> Result<T> {
        let order = order.unwrap_or(self.endianness);
        let at = self.read_target(offset, T::WIDTH)?;
        Ok(T::decode(&self.storage[at..], order))
    }

    /// Reads a value at `offset` without touching the cursor.
    #[inline]
    pub fn value_at<T: Primitive>(&self, offset: usize, order: Option<Endianness>) -> Result<T> {
        self.check_read(offset, T::WIDTH)?;
        Ok(T::decode(
            &self.storage[offset..],
            order.unwrap_or(self.endianness),
        ))
    }

    /// Writes a wide integer as `T`.
    ///
    /// With assertions on, values outside `T`'s range fail with
    /// [`BufferError::Range`]. With assertions off they wrap (two's
    /// complement truncation).
    ///
    /// ```
    /// use bytebuffer::{ByteBuffer, ByteBufferConfig, BufferError};
    ///
    /// let mut bb = ByteBuffer::new();
    /// bb.write_int_as::<u8>(300, None).unwrap();
    /// assert_eq!(bb.read_u8_at(0).unwrap(), 44);
    ///
    /// let mut strict = ByteBuffer::with_config(ByteBufferConfig::default().with_assertions(true)).unwrap();
    /// assert!(matches!(strict.write_int_as::<u8>(300, None), Err(BufferError::Range { .. })));
    /// ```
    pub fn write_int_as<T: Integer>(&mut self, value: i64, offset: Option<usize>) -> Result<&mut Self> {
        if self.assertions && !(T::MIN..=T::MAX).contains(&value) {
            return Err(BufferError::Range {
                value,
                ty: T::NAME,
            });
        }
        self.write_value(T::wrapping_from(value), offset, None)
    }
}

macro_rules! numeric_accessors {
    ($($ty:ty: $write:ident, $write_at:ident, $read:ident, $read_at:ident;)*) => {
        impl ByteBuffer {$(
            #[doc = concat!("Writes a `", stringify!($ty), "` at the cursor, growing the storage as needed.")]
            #[inline]
            pub fn $write(&mut self, value: $ty) -> Result<&mut Self> {
                self.write_value(value, None, None)
            }

            #[doc = concat!("Writes a `", stringify!($ty), "` at `offset`.")]
            #[inline]
            pub fn $write_at(&mut self, value: $ty, offset: usize) -> Result<&mut Self> {
                self.write_value(value, Some(offset), None)
            }

            #[doc = concat!("Reads a `", stringify!($ty), "` at the cursor.")]
            #[inline]
            pub fn $read(&mut self) -> Result<$ty> {
                self.read_value(None, None)
            }

            #[doc = concat!("Reads a `", stringify!($ty), "` at `offset`.")]
            #[inline]
            pub fn $read_at(&self, offset: usize) -> Result<$ty> {
                self.value_at(offset, None)
            }
        )*}
    };
}

numeric_accessors! {
    u8: write_u8, write_u8_at, read_u8, read_u8_at;
    i8: write_i8, write_i8_at, read_i8, read_i8_at;
    u16: write_u16, write_u16_at, read_u16, read_u16_at;
    i16: write_i16, write_i16_at, read_i16, read_i16_at;
    u32: write_u32, write_u32_at, read_u32, read_u32_at;
    i32: write_i32, write_i32_at, read_i32, read_i32_at;
    f32: write_f32, write_f32_at, read_f32, read_f32_at;
    f64: write_f64, write_f64_at, read_f64, read_f64_at;
}
