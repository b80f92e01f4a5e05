//! Overflow-checked operations and width conversions.

use super::FixedWidth;
use super::wrapping::{div, modulo};
use crate::error::ErrorToken;
use crate::result::Fallible;

/// Division that reports a zero divisor instead of trapping.
pub fn div_checked<W: FixedWidth>(i: W, j: W) -> Fallible<W> {
    if j == W::ZERO {
        return Err(ErrorToken::DivideByZero.traced());
    }
    Ok(div(i, j))
}

/// Remainder that reports a zero divisor instead of trapping.
pub fn modulo_checked<W: FixedWidth>(i: W, j: W) -> Fallible<W> {
    if j == W::ZERO {
        return Err(ErrorToken::ModuloByZero.traced());
    }
    Ok(modulo(i, j))
}

/// Convert to 32 bits if the value is in `[-2^31, 2^31 - 1]`.
pub fn narrow_to_i32(i: i64) -> Fallible<i32> {
    if (i64::from(i32::MIN)..=i64::from(i32::MAX)).contains(&i) {
        Ok(truncate_to_i32(i))
    } else {
        Err(ErrorToken::NarrowingOutOfRange.traced())
    }
}

/// Keep the low 32 bits, reinterpreted as signed.
pub fn truncate_to_i32(i: i64) -> i32 {
    i32::to_signed(i.to_unsigned() as u32)
}

pub fn widen_to_i64(i: i32) -> i64 {
    i.widen()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_div_checked() {
        assert_eq!(div_checked(84i32, 2), Ok(42));
        assert_eq!(div_checked(i32::MIN, -1), Ok(i32::MIN));
        assert_eq!(div_checked(i64::MIN, -1), Ok(i64::MIN));
        assert_eq!(div_checked(1i64, 0), Err(ErrorToken::DivideByZero));
    }

    #[test]
    fn test_modulo_checked() {
        assert_eq!(modulo_checked(85i32, 2), Ok(1));
        assert_eq!(modulo_checked(i32::MIN, -1), Ok(0));
        assert_eq!(modulo_checked(i64::MIN, -1), Ok(0));
        assert_eq!(modulo_checked(0i32, 0), Err(ErrorToken::ModuloByZero));
    }

    #[test]
    fn test_narrow_boundaries() {
        assert_eq!(narrow_to_i32(1 << 31), Err(ErrorToken::NarrowingOutOfRange));
        assert_eq!(narrow_to_i32((1 << 31) - 1), Ok(i32::MAX));
        assert_eq!(narrow_to_i32(-(1 << 31)), Ok(i32::MIN));
        assert_eq!(narrow_to_i32(-(1 << 31) - 1), Err(ErrorToken::NarrowingOutOfRange));
        assert_eq!(narrow_to_i32(i64::MIN), Err(ErrorToken::NarrowingOutOfRange));
    }

    #[test]
    fn test_truncate_keeps_low_bits() {
        assert_eq!(truncate_to_i32(1 << 31), i32::MIN);
        assert_eq!(truncate_to_i32(0x1_0000_0005), 5);
        assert_eq!(truncate_to_i32(-1), -1);
        assert_eq!(truncate_to_i32(i64::MIN), 0);
    }

    proptest! {
        #[test]
        fn checked_division_by_zero_always_fails(i in any::<i64>()) {
            prop_assert_eq!(div_checked(i, 0), Err(ErrorToken::DivideByZero));
            prop_assert_eq!(modulo_checked(i, 0), Err(ErrorToken::ModuloByZero));
            prop_assert_eq!(div_checked(truncate_to_i32(i), 0), Err(ErrorToken::DivideByZero));
            prop_assert_eq!(modulo_checked(truncate_to_i32(i), 0), Err(ErrorToken::ModuloByZero));
        }

        #[test]
        fn widen_then_narrow_is_identity(i in any::<i32>()) {
            prop_assert_eq!(narrow_to_i32(widen_to_i64(i)), Ok(i));
        }

        #[test]
        fn narrow_agrees_with_try_from(i in any::<i64>()) {
            prop_assert_eq!(narrow_to_i32(i).ok(), i32::try_from(i).ok());
            prop_assert_eq!(truncate_to_i32(i), i as i32);
        }
    }
}
