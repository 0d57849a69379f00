//! The 64-bit integer capability the 64-bit codecs are written against.
//!
//! Any 64-bit two's-complement type can be plugged into the int64 and varint64
//! accessors by implementing [`Long`]. `i64` and `u64` are provided.

/// A 64-bit two's-complement value made of two 32-bit halves.
pub trait Long: Copy + Ord {
    /// Whether the high bit is magnitude rather than sign.
    const UNSIGNED: bool;

    /// Builds a value from its low and high 32-bit halves.
    fn from_bits(low: u32, high: u32) -> Self;

    /// The low 32 bits.
    fn low_bits(self) -> u32;

    /// The high 32 bits.
    fn high_bits(self) -> u32;

    /// Whether both halves are zero.
    fn is_zero(self) -> bool {
        self.low_bits() == 0 && self.high_bits() == 0
    }

    /// Whether the value is below zero. Always false for unsigned types.
    fn is_negative(self) -> bool {
        !Self::UNSIGNED && self.high_bits() & 0x8000_0000 != 0
    }

    /// Two's-complement addition, carrying from the low half into the high half.
    fn wrapping_add(self, rhs: Self) -> Self {
        let (low, carry) = self.low_bits().overflowing_add(rhs.low_bits());
        let high = self
            .high_bits()
            .wrapping_add(rhs.high_bits())
            .wrapping_add(carry as u32);
        Self::from_bits(low, high)
    }
}

impl Long for u64 {
    const UNSIGNED: bool = true;

    #[inline]
    fn from_bits(low: u32, high: u32) -> Self {
        ((high as u64) << 32) | low as u64
    }

    #[inline]
    fn low_bits(self) -> u32 {
        self as u32
    }

    #[inline]
    fn high_bits(self) -> u32 {
        (self >> 32) as u32
    }
}

impl Long for i64 {
    const UNSIGNED: bool = false;

    #[inline]
    fn from_bits(low: u32, high: u32) -> Self {
        u64::from_bits(low, high) as i64
    }

    #[inline]
    fn low_bits(self) -> u32 {
        self as u32
    }

    #[inline]
    fn high_bits(self) -> u32 {
        ((self as u64) >> 32) as u32
    }
}

/// Raw 64-bit pattern of `value`.
#[cfg_attr(not(feature = "varints"), allow(dead_code))]
#[inline]
pub(crate) fn to_u64<L: Long>(value: L) -> u64 {
    u64::from_bits(value.low_bits(), value.high_bits())
}

/// Builds an `L` from a raw 64-bit pattern.
#[cfg_attr(not(feature = "varints"), allow(dead_code))]
#[inline]
pub(crate) fn from_u64<L: Long>(bits: u64) -> L {
    L::from_bits(bits as u32, (bits >> 32) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves() {
        let v: i64 = -2;
        assert_eq!(v.low_bits(), 0xffff_fffe);
        assert_eq!(v.high_bits(), 0xffff_ffff);
        assert_eq!(i64::from_bits(0xffff_fffe, 0xffff_ffff), -2);
        assert_eq!(u64::from_bits(0xffff_fffe, 0xffff_ffff), u64::MAX - 1);
    }

    #[test]
    fn predicates() {
        assert!(0i64.is_zero());
        assert!(Long::is_negative(-1i64));
        assert!(!u64::MAX.is_negative());
        assert!(!Long::is_negative(i64::MAX));
    }

    #[test]
    fn add_carries() {
        assert_eq!(Long::wrapping_add(0xffff_ffffu64, 1), 0x1_0000_0000);
        assert_eq!(Long::wrapping_add(-1i64, 1), 0);
        assert_eq!(Long::wrapping_add(i64::MAX, 1), i64::MIN);
    }

    #[test]
    fn pattern_helpers() {
        assert_eq!(to_u64(-1i64), u64::MAX);
        assert_eq!(from_u64::<i64>(u64::MAX), -1);
    }
}
