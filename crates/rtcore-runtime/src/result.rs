//! Fallible results.
//!
//! Every runtime operation that can fail returns a [`Fallible<T>`]. The
//! success payload is generic; the error payload is always an
//! [`ErrorToken`]. Callers branch explicitly, there is no conversion to or
//! from panics.

use crate::error::{ErrorToken, contract_violation};

pub type Fallible<T> = Result<T, ErrorToken>;

/// Inspectors that treat the wrong variant as a contract violation.
///
/// Unlike [`Result::unwrap`] these do not require `Debug` on the payload,
/// which generated code cannot always provide.
pub trait FallibleExt<T> {
    /// Take the success value. Calling this on a failure is a contract violation.
    fn unwrap_value(self) -> T;

    /// Take the error token. Calling this on a success is a contract violation.
    fn unwrap_error(self) -> ErrorToken;
}

impl<T> FallibleExt<T> for Fallible<T> {
    #[track_caller]
    fn unwrap_value(self) -> T {
        match self {
            Ok(value) => value,
            Err(token) => {
                tracing::error!(error = %token, "value read from failed result");
                contract_violation("unwrap_value on a failed result")
            }
        }
    }

    #[track_caller]
    fn unwrap_error(self) -> ErrorToken {
        match self {
            Ok(_) => contract_violation("unwrap_error on a successful result"),
            Err(token) => token,
        }
    }
}
