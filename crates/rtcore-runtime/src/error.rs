//! Error tokens and contract violations.
//!
//! Two disjoint failure classes exist in the runtime:
//!
//! - Recoverable domain errors are reported as an [`ErrorToken`] inside a
//!   [`Fallible`](crate::Fallible). The caller decides what to do with them.
//! - Contract violations (dereferencing an empty cell, unwrapping the wrong
//!   variant of a result) are bugs in the calling code. They go through
//!   [`contract_violation`], which never returns. Under the `runtime`
//!   profile (`panic = "abort"`) this terminates the process.

use core::ffi::CStr;
use core::fmt;

use derive_more::Error;

/// Stable identifier of a recoverable runtime failure.
///
/// The display text names the failing operation and never changes between
/// releases, so it is safe to match on in logs or surface to users.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorToken {
    /// Checked division with a zero divisor.
    DivideByZero = 1,

    /// Checked modulo with a zero divisor.
    ModuloByZero = 2,

    /// A 64-bit value does not fit the 32-bit signed range.
    NarrowingOutOfRange = 3,

    /// Radix outside `2..=36`, or no input text at all.
    BadBase = 4,

    /// No digits after leading whitespace and sign.
    EmptyNumeral = 5,

    /// The numeral does not fit the target width.
    ParseOverflow = 6,
}

impl ErrorToken {
    pub const ALL: [ErrorToken; 6] = [
        ErrorToken::DivideByZero,
        ErrorToken::ModuloByZero,
        ErrorToken::NarrowingOutOfRange,
        ErrorToken::BadBase,
        ErrorToken::EmptyNumeral,
        ErrorToken::ParseOverflow,
    ];

    /// The identifier as a static string.
    pub const fn as_str(self) -> &'static str {
        match self.as_c_str().to_str() {
            Ok(name) => name,
            // Every identifier is an ASCII literal.
            Err(_) => unreachable!(),
        }
    }

    /// NUL-terminated identifier handed out over the C ABI.
    pub const fn as_c_str(self) -> &'static CStr {
        match self {
            ErrorToken::DivideByZero => c"int.div_checked",
            ErrorToken::ModuloByZero => c"int.mod_checked",
            ErrorToken::NarrowingOutOfRange => c"int.narrow_to_i32",
            ErrorToken::BadBase => c"int.parse.bad_base",
            ErrorToken::EmptyNumeral => c"int.parse.empty",
            ErrorToken::ParseOverflow => c"int.parse.overflow",
        }
    }

    /// Status code used by the C ABI. Never zero; zero means success.
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|token| token.code() == code)
    }

    /// Emit a debug event for this failure and hand the token back.
    pub(crate) fn traced(self) -> Self {
        tracing::debug!(error = %self, "checked integer operation failed");
        self
    }
}

impl fmt::Display for ErrorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abort the current operation because the caller broke the runtime contract.
///
/// This is not an error channel: misuse fails loudly instead of returning
/// garbage. The failure is a panic, so process termination is guaranteed
/// only when it reaches an `extern "C"` boundary (a panic cannot unwind out
/// of one) or when the crate is built with `[profile.runtime]`
/// (`panic = "abort"`). Rust callers under an unwinding profile can still
/// intercept it with `catch_unwind`.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn contract_violation(what: &str) -> ! {
    tracing::error!(violation = what, "runtime contract violated");
    panic!("contract violation: {what}");
}
