//! rtcore runtime kernel.
//!
//! Provides the primitives compiled programs call into:
//! - Shared-ownership cells ([`Shared`]) with a plain, non-atomic owner count
//! - Fallible results ([`Fallible`]) carrying a static [`ErrorToken`]
//! - Two's-complement 32/64-bit integer arithmetic, parsing and formatting ([`int`])
//! - A C ABI over all of the above (`rtcore_*`, see [`ffi`])

pub mod cell;
pub mod error;
pub mod ffi;
pub mod int;
pub mod result;

pub use cell::Shared;
pub use error::ErrorToken;
pub use result::{Fallible, FallibleExt};
