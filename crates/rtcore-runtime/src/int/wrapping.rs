//! Wraparound arithmetic. Never fails.

use super::FixedWidth;
use crate::error::contract_violation;

#[inline]
pub fn add<W: FixedWidth>(i: W, j: W) -> W {
    W::to_signed(W::unsigned_add(i.to_unsigned(), j.to_unsigned()))
}

#[inline]
pub fn sub<W: FixedWidth>(i: W, j: W) -> W {
    W::to_signed(W::unsigned_sub(i.to_unsigned(), j.to_unsigned()))
}

#[inline]
pub fn mul<W: FixedWidth>(i: W, j: W) -> W {
    W::to_signed(W::unsigned_mul(i.to_unsigned(), j.to_unsigned()))
}

/// `0 - i`. Negating `MIN` yields `MIN`.
#[inline]
pub fn neg<W: FixedWidth>(i: W) -> W {
    sub(W::ZERO, i)
}

/// Truncating division for a divisor already known to be non-zero.
///
/// `MIN / -1` wraps to `MIN`. A zero divisor is a contract violation; use
/// [`div_checked`](super::div_checked) when it is possible.
#[track_caller]
pub fn div<W: FixedWidth>(i: W, j: W) -> W {
    if j == W::ZERO {
        contract_violation("unchecked division by zero");
    }
    if j == W::MINUS_ONE && i == W::MIN {
        W::MIN
    } else {
        i.quotient(j)
    }
}

/// Truncating remainder for a divisor already known to be non-zero.
///
/// Any value modulo `-1` is `0`, computed without dividing.
#[track_caller]
pub fn modulo<W: FixedWidth>(i: W, j: W) -> W {
    if j == W::ZERO {
        contract_violation("unchecked modulo by zero");
    }
    if j == W::MINUS_ONE {
        W::ZERO
    } else {
        i.remainder(j)
    }
}
