//! Base-N formatting, the inverse of [`parse_i64`](super::parse_i64).

use super::FixedWidth;
use super::parse::{MAX_BASE, MIN_BASE};
use crate::error::ErrorToken;
use crate::result::Fallible;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Render `n` in `base` with lowercase digits and a leading `-` for negatives.
pub fn format_radix<W: FixedWidth>(n: W, base: u32) -> Fallible<String> {
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(ErrorToken::BadBase.traced());
    }
    let value = n.widen();
    let radix = u64::from(base);
    let mut magnitude = value.unsigned_abs();

    // 64 binary digits plus a sign.
    let mut buf = [0u8; 65];
    let mut at = buf.len();
    loop {
        at -= 1;
        buf[at] = DIGITS[(magnitude % radix) as usize];
        magnitude /= radix;
        if magnitude == 0 {
            break;
        }
    }
    if value < 0 {
        at -= 1;
        buf[at] = b'-';
    }
    Ok(buf[at..].iter().map(|&b| char::from(b)).collect())
}
