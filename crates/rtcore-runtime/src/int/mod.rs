//! Fixed-width signed integer kernel.
//!
//! Two's-complement arithmetic for 32- and 64-bit signed integers.
//! Wrapping operations are carried out on the unsigned counterpart of the
//! same width, where overflow is plain modulo `2^W`, and only the final bit
//! pattern is reinterpreted as signed. Operations that can fail return a
//! [`Fallible`](crate::Fallible).

mod checked;
mod format;
mod parse;
mod wrapping;

pub use checked::{div_checked, modulo_checked, narrow_to_i32, truncate_to_i32, widen_to_i64};
pub use format::format_radix;
pub use parse::{MAX_BASE, MIN_BASE, parse_i32, parse_i64};
pub(crate) use parse::parse_bytes;
pub use wrapping::{add, div, modulo, mul, neg, sub};

mod sealed {
    pub trait Sealed {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
}

/// A signed integer width supported by the kernel.
pub trait FixedWidth: Copy + Eq + Ord + core::fmt::Debug + sealed::Sealed {
    /// The unsigned type with the same bit width.
    type Unsigned: Copy + Eq + Ord + core::fmt::Debug;

    const BITS: u32;
    const MIN: Self;
    const MAX: Self;
    const ZERO: Self;
    const MINUS_ONE: Self;

    /// Reinterpret the bit pattern as unsigned.
    fn to_unsigned(self) -> Self::Unsigned;

    /// Reinterpret an unsigned bit pattern as signed.
    ///
    /// Values below `2^(W-1)` map to themselves; the upper half lands in the
    /// negative range as `u - 2^(W-1) + MIN`.
    fn to_signed(bits: Self::Unsigned) -> Self;

    fn unsigned_add(a: Self::Unsigned, b: Self::Unsigned) -> Self::Unsigned;
    fn unsigned_sub(a: Self::Unsigned, b: Self::Unsigned) -> Self::Unsigned;
    fn unsigned_mul(a: Self::Unsigned, b: Self::Unsigned) -> Self::Unsigned;

    /// Truncating quotient. The divisor is never zero and `(MIN, -1)` never occurs.
    fn quotient(self, rhs: Self) -> Self;

    /// Truncating remainder, same preconditions as [`FixedWidth::quotient`].
    fn remainder(self, rhs: Self) -> Self;

    /// Exact conversion to 64 bits.
    fn widen(self) -> i64;
}

macro_rules! impl_fixed_width {
    ($signed:ty, $unsigned:ty) => {
        impl FixedWidth for $signed {
            type Unsigned = $unsigned;

            const BITS: u32 = <$signed>::BITS;
            const MIN: Self = <$signed>::MIN;
            const MAX: Self = <$signed>::MAX;
            const ZERO: Self = 0;
            const MINUS_ONE: Self = -1;

            #[inline]
            fn to_unsigned(self) -> $unsigned {
                self as $unsigned
            }

            #[inline]
            fn to_signed(bits: $unsigned) -> Self {
                const HALF: $unsigned = 1 << (<$signed>::BITS - 1);
                if bits < HALF {
                    bits as $signed
                } else {
                    (bits - HALF) as $signed + <$signed>::MIN
                }
            }

            #[inline]
            fn unsigned_add(a: $unsigned, b: $unsigned) -> $unsigned {
                a.wrapping_add(b)
            }

            #[inline]
            fn unsigned_sub(a: $unsigned, b: $unsigned) -> $unsigned {
                a.wrapping_sub(b)
            }

            #[inline]
            fn unsigned_mul(a: $unsigned, b: $unsigned) -> $unsigned {
                a.wrapping_mul(b)
            }

            #[inline]
            fn quotient(self, rhs: Self) -> Self {
                self / rhs
            }

            #[inline]
            fn remainder(self, rhs: Self) -> Self {
                self % rhs
            }

            #[inline]
            fn widen(self) -> i64 {
                i64::from(self)
            }
        }
    };
}

impl_fixed_width!(i32, u32);
impl_fixed_width!(i64, u64);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_to_signed_boundaries() {
        assert_eq!(i32::to_signed(0), 0);
        assert_eq!(i32::to_signed(0x7fff_ffff), i32::MAX);
        assert_eq!(i32::to_signed(0x8000_0000), i32::MIN);
        assert_eq!(i32::to_signed(u32::MAX), -1);
        assert_eq!(i64::to_signed(1 << 63), i64::MIN);
        assert_eq!(i64::to_signed(u64::MAX - 1), -2);
    }

    #[test]
    fn test_to_unsigned_boundaries() {
        assert_eq!((-1i32).to_unsigned(), u32::MAX);
        assert_eq!(i32::MIN.to_unsigned(), 0x8000_0000);
        assert_eq!(i64::MIN.to_unsigned(), 1 << 63);
    }

    proptest! {
        #[test]
        fn bit_pattern_round_trip_32(n in any::<i32>()) {
            prop_assert_eq!(i32::to_signed(n.to_unsigned()), n);
        }

        #[test]
        fn bit_pattern_round_trip_64(n in any::<i64>()) {
            prop_assert_eq!(i64::to_signed(n.to_unsigned()), n);
        }

        #[test]
        fn to_signed_matches_hardware_reinterpretation(bits in any::<u64>()) {
            prop_assert_eq!(i64::to_signed(bits), bits as i64);
            prop_assert_eq!(i32::to_signed(bits as u32), bits as u32 as i32);
        }
    }
}
