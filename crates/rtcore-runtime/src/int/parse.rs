//! Base-N numeral parsing.
//!
//! Grammar: optional whitespace, an optional `-`, then one or more digits
//! valid for the base (`0-9`, then `a-z` / `A-Z` for 10 to 35). Parsing
//! stops at the first character that is not a digit; anything after it is
//! ignored.

use super::FixedWidth;
use super::checked::narrow_to_i32;
use super::wrapping::neg;
use crate::error::ErrorToken;
use crate::result::Fallible;

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

/// Magnitude of `i64::MIN`, one more than `i64::MAX`.
const NEGATIVE_LIMIT: u64 = 1 << 63;
const POSITIVE_LIMIT: u64 = NEGATIVE_LIMIT - 1;

pub fn parse_i64(text: &str, base: u32) -> Fallible<i64> {
    parse_bytes(text.as_bytes(), base)
}

/// Parse as 64 bits, then narrow.
pub fn parse_i32(text: &str, base: u32) -> Fallible<i32> {
    parse_i64(text, base).and_then(narrow_to_i32)
}

/// Byte-level parser shared with the C ABI, which may hand over non-UTF-8 text.
pub(crate) fn parse_bytes(text: &[u8], base: u32) -> Fallible<i64> {
    if !(MIN_BASE..=MAX_BASE).contains(&base) || text.is_empty() {
        return Err(ErrorToken::BadBase.traced());
    }

    let start = text.iter().position(|b| !is_space(*b)).unwrap_or(text.len());
    let (negative, digits) = match &text[start..] {
        [b'-', rest @ ..] => (true, rest),
        rest => (false, rest),
    };
    let limit = if negative {
        NEGATIVE_LIMIT
    } else {
        POSITIVE_LIMIT
    };

    let radix = u64::from(base);
    let mut magnitude: u64 = 0;
    let mut consumed = 0usize;
    for &byte in digits {
        let Some(digit) = char::from(byte).to_digit(base) else {
            break;
        };
        let digit = u64::from(digit);
        if magnitude > (limit - digit) / radix {
            return Err(ErrorToken::ParseOverflow.traced());
        }
        magnitude = magnitude * radix + digit;
        consumed += 1;
    }
    if consumed == 0 {
        return Err(ErrorToken::EmptyNumeral.traced());
    }

    let value = i64::to_signed(magnitude);
    Ok(if negative { neg(value) } else { value })
}

/// The C `isspace` set.
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::int::format_radix;
    use proptest::prelude::*;

    #[test]
    fn test_decimal() {
        assert_eq!(parse_i64("0", 10), Ok(0));
        assert_eq!(parse_i64("12345", 10), Ok(12345));
        assert_eq!(parse_i64("-12345", 10), Ok(-12345));
        assert_eq!(parse_i64("-0", 10), Ok(0));
    }

    #[test]
    fn test_other_bases() {
        assert_eq!(parse_i64("ff", 16), Ok(255));
        assert_eq!(parse_i64("FF", 16), Ok(255));
        assert_eq!(parse_i64("-101", 2), Ok(-5));
        assert_eq!(parse_i64("zz", 36), Ok(35 * 36 + 35));
        assert_eq!(parse_i32("777", 8), Ok(511));
    }

    #[test]
    fn test_leading_whitespace_is_skipped() {
        assert_eq!(parse_i64("  \t\n42", 10), Ok(42));
        assert_eq!(parse_i64("\x0b\x0c\r-7", 10), Ok(-7));
    }

    #[test]
    fn test_parsing_stops_at_first_non_digit() {
        assert_eq!(parse_i64("12abc", 10), Ok(12));
        assert_eq!(parse_i64("12 34", 10), Ok(12));
        assert_eq!(parse_i64("1012", 2), Ok(5));
        assert_eq!(parse_i64("7fz", 16), Ok(0x7f));
    }

    #[test]
    fn test_bad_base() {
        assert_eq!(parse_i64("10", 1), Err(ErrorToken::BadBase));
        assert_eq!(parse_i64("10", 37), Err(ErrorToken::BadBase));
        assert_eq!(parse_i64("10", 0), Err(ErrorToken::BadBase));
        assert_eq!(parse_i32("10", 37), Err(ErrorToken::BadBase));
    }

    #[test]
    fn test_empty_input_is_rejected_with_the_base_check() {
        assert_eq!(parse_i64("", 10), Err(ErrorToken::BadBase));
    }

    #[test]
    fn test_no_digits() {
        assert_eq!(parse_i64("   ", 10), Err(ErrorToken::EmptyNumeral));
        assert_eq!(parse_i64("-", 10), Err(ErrorToken::EmptyNumeral));
        assert_eq!(parse_i64("abc", 10), Err(ErrorToken::EmptyNumeral));
        assert_eq!(parse_i64("+5", 10), Err(ErrorToken::EmptyNumeral));
        assert_eq!(parse_i64("--5", 10), Err(ErrorToken::EmptyNumeral));
        assert_eq!(parse_i64("2", 2), Err(ErrorToken::EmptyNumeral));
    }

    #[test]
    fn test_64_bit_limits() {
        assert_eq!(parse_i64("9223372036854775807", 10), Ok(i64::MAX));
        assert_eq!(parse_i64("-9223372036854775808", 10), Ok(i64::MIN));
        assert_eq!(
            parse_i64("9223372036854775808", 10),
            Err(ErrorToken::ParseOverflow)
        );
        assert_eq!(
            parse_i64("-9223372036854775809", 10),
            Err(ErrorToken::ParseOverflow)
        );
        assert_eq!(
            parse_i64("99999999999999999999999", 10),
            Err(ErrorToken::ParseOverflow)
        );
        assert_eq!(parse_i64("-8000000000000000", 16), Ok(i64::MIN));
        assert_eq!(
            parse_i64("8000000000000000", 16),
            Err(ErrorToken::ParseOverflow)
        );
    }

    #[test]
    fn test_leading_zeros_do_not_overflow() {
        assert_eq!(
            parse_i64("000000000000000000000000009223372036854775807", 10),
            Ok(i64::MAX)
        );
    }

    #[test]
    fn test_32_bit_limits() {
        assert_eq!(parse_i32("2147483647", 10), Ok(i32::MAX));
        assert_eq!(parse_i32("-2147483648", 10), Ok(i32::MIN));
        assert_eq!(
            parse_i32("2147483648", 10),
            Err(ErrorToken::NarrowingOutOfRange)
        );
        assert_eq!(
            parse_i32("9223372036854775808", 10),
            Err(ErrorToken::ParseOverflow)
        );
    }

    #[test]
    fn test_non_ascii_bytes_end_the_numeral() {
        assert_eq!(parse_bytes(b"42\xff", 10), Ok(42));
        assert_eq!(parse_i64("١٢", 10), Err(ErrorToken::EmptyNumeral));
    }

    fn base() -> impl Strategy<Value = u32> {
        prop_oneof![Just(2u32), Just(10), Just(16), Just(36)]
    }

    proptest! {
        #[test]
        fn format_then_parse_64(n in any::<i64>(), base in base()) {
            let text = format_radix(n, base).unwrap();
            prop_assert_eq!(parse_i64(&text, base), Ok(n));
        }

        #[test]
        fn format_then_parse_32(n in any::<i32>(), base in base()) {
            let text = format_radix(n, base).unwrap();
            prop_assert_eq!(parse_i32(&text, base), Ok(n));
        }

        #[test]
        fn agrees_with_std_on_clean_numerals(n in any::<i64>(), base in MIN_BASE..=MAX_BASE) {
            let text = format_radix(n, base).unwrap();
            prop_assert_eq!(parse_i64(&text, base).ok(), i64::from_str_radix(&text, base).ok());
        }

        #[test]
        fn any_base_outside_range_is_rejected(text in "[0-9]{1,8}", base in 37u32..=u32::MAX) {
            prop_assert_eq!(parse_i64(&text, base), Err(ErrorToken::BadBase));
        }
    }
}
