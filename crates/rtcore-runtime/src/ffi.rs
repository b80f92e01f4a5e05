//! C ABI used by generated code.
//!
//! Wrapping arithmetic returns its result directly. Fallible operations
//! return a status byte: [`RTCORE_OK`] on success, with the value written
//! through `out`, or an [`ErrorToken::code`] on failure, leaving `out`
//! untouched. A null `out` discards the value but still reports the status.
//!
//! Contract violations (unchecked division by zero, reading an empty string
//! cell) panic, and a panic cannot unwind out of an `extern "C"` function,
//! so the process aborts.

use core::ffi::c_char;
use core::mem::ManuallyDrop;

use crate::cell::Shared;
use crate::error::ErrorToken;
use crate::int::{self, parse_bytes};
use crate::result::Fallible;

/// Status returned by fallible entry points on success.
pub const RTCORE_OK: u8 = 0;

/// Store a successful value through `out` and translate the result to a status byte.
///
/// # Safety
///
/// `out` must be null or valid for a write of `T`.
unsafe fn store<T>(result: Fallible<T>, out: *mut T) -> u8 {
    match result {
        Ok(value) => {
            if !out.is_null() {
                unsafe { out.write(value) };
            }
            RTCORE_OK
        }
        Err(token) => token.code(),
    }
}

/// View `len` bytes at `data`; null yields an empty slice.
///
/// # Safety
///
/// A non-null `data` must be valid for reads of `len` bytes for `'a`.
unsafe fn bytes<'a>(data: *const u8, len: usize) -> &'a [u8] {
    if data.is_null() {
        &[]
    } else {
        unsafe { core::slice::from_raw_parts(data, len) }
    }
}

macro_rules! export_width {
    (
        $ty:ty,
        add: $add:ident,
        sub: $sub:ident,
        mul: $mul:ident,
        neg: $neg:ident,
        div: $div:ident,
        modulo: $modulo:ident,
        div_checked: $div_checked:ident,
        mod_checked: $mod_checked:ident $(,)?
    ) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn $add(i: $ty, j: $ty) -> $ty {
            int::add(i, j)
        }

        #[unsafe(no_mangle)]
        pub extern "C" fn $sub(i: $ty, j: $ty) -> $ty {
            int::sub(i, j)
        }

        #[unsafe(no_mangle)]
        pub extern "C" fn $mul(i: $ty, j: $ty) -> $ty {
            int::mul(i, j)
        }

        #[unsafe(no_mangle)]
        pub extern "C" fn $neg(i: $ty) -> $ty {
            int::neg(i)
        }

        /// Division for a divisor the compiler proved non-zero. Aborts on zero.
        #[unsafe(no_mangle)]
        pub extern "C" fn $div(i: $ty, j: $ty) -> $ty {
            int::div(i, j)
        }

        /// Remainder for a divisor the compiler proved non-zero. Aborts on zero.
        #[unsafe(no_mangle)]
        pub extern "C" fn $modulo(i: $ty, j: $ty) -> $ty {
            int::modulo(i, j)
        }

        /// # Safety
        ///
        /// `out` must be null or valid for writes.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $div_checked(i: $ty, j: $ty, out: *mut $ty) -> u8 {
            unsafe { store(int::div_checked(i, j), out) }
        }

        /// # Safety
        ///
        /// `out` must be null or valid for writes.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $mod_checked(i: $ty, j: $ty, out: *mut $ty) -> u8 {
            unsafe { store(int::modulo_checked(i, j), out) }
        }
    };
}

export_width!(
    i32,
    add: rtcore_i32_add,
    sub: rtcore_i32_sub,
    mul: rtcore_i32_mul,
    neg: rtcore_i32_neg,
    div: rtcore_i32_div,
    modulo: rtcore_i32_mod,
    div_checked: rtcore_i32_div_checked,
    mod_checked: rtcore_i32_mod_checked,
);

export_width!(
    i64,
    add: rtcore_i64_add,
    sub: rtcore_i64_sub,
    mul: rtcore_i64_mul,
    neg: rtcore_i64_neg,
    div: rtcore_i64_div,
    modulo: rtcore_i64_mod,
    div_checked: rtcore_i64_div_checked,
    mod_checked: rtcore_i64_mod_checked,
);

/// # Safety
///
/// `out` must be null or valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rtcore_narrow_to_i32(i: i64, out: *mut i32) -> u8 {
    unsafe { store(int::narrow_to_i32(i), out) }
}

#[unsafe(no_mangle)]
pub extern "C" fn rtcore_truncate_to_i32(i: i64) -> i32 {
    int::truncate_to_i32(i)
}

#[unsafe(no_mangle)]
pub extern "C" fn rtcore_widen_to_i64(i: i32) -> i64 {
    int::widen_to_i64(i)
}

/// Parse `len` bytes at `data` as a base-`base` numeral.
///
/// Null `data` or zero `len` fails with the bad-base status.
///
/// # Safety
///
/// A non-null `data` must be valid for reads of `len` bytes; `out` must be
/// null or valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rtcore_parse_i64(
    data: *const u8,
    len: usize,
    base: u32,
    out: *mut i64,
) -> u8 {
    let text = unsafe { bytes(data, len) };
    unsafe { store(parse_bytes(text, base), out) }
}

/// 32-bit variant of [`rtcore_parse_i64`].
///
/// # Safety
///
/// Same as [`rtcore_parse_i64`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rtcore_parse_i32(
    data: *const u8,
    len: usize,
    base: u32,
    out: *mut i32,
) -> u8 {
    let text = unsafe { bytes(data, len) };
    let result = parse_bytes(text, base).and_then(int::narrow_to_i32);
    unsafe { store(result, out) }
}

/// Static NUL-terminated name for a status code, or null if the code is
/// `RTCORE_OK` or unknown.
#[unsafe(no_mangle)]
pub extern "C" fn rtcore_error_name(code: u8) -> *const c_char {
    ErrorToken::from_code(code).map_or(core::ptr::null(), |token| token.as_c_str().as_ptr())
}

// =============================================================================
// String cells
// =============================================================================

/// Opaque handle to a shared, immutable byte string.
#[repr(C)]
pub struct RtString {
    _opaque: [u8; 0],
}

type StringCell = Shared<Box<[u8]>>;

/// Look at a handle without taking over its ownership.
///
/// # Safety
///
/// `handle` must be null or a live handle from this module.
unsafe fn peek(handle: *mut RtString) -> ManuallyDrop<StringCell> {
    ManuallyDrop::new(unsafe { StringCell::from_raw(handle.cast()) })
}

/// Copy `len` bytes into a new string cell with one owner.
///
/// # Safety
///
/// A non-null `data` must be valid for reads of `len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rtcore_string_new(data: *const u8, len: usize) -> *mut RtString {
    let contents: Box<[u8]> = unsafe { bytes(data, len) }.into();
    Shared::into_raw(StringCell::new(contents)).cast()
}

/// Add an owner. Returns the same handle; null stays null.
///
/// # Safety
///
/// `handle` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rtcore_string_retain(handle: *mut RtString) -> *mut RtString {
    let cell = unsafe { peek(handle) };
    Shared::into_raw(StringCell::clone(&cell)).cast()
}

/// Drop an owner, freeing the string with the last one. Null is a no-op.
///
/// # Safety
///
/// `handle` must be null or a live handle, and is dead after this call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rtcore_string_release(handle: *mut RtString) {
    drop(unsafe { StringCell::from_raw(handle.cast()) });
}

/// Byte length. Aborts on a null handle.
///
/// # Safety
///
/// `handle` must be a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rtcore_string_len(handle: *mut RtString) -> usize {
    let cell = unsafe { peek(handle) };
    cell.len()
}

/// Pointer to the bytes, valid while any owner lives. Aborts on a null handle.
///
/// # Safety
///
/// `handle` must be a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rtcore_string_data(handle: *mut RtString) -> *const u8 {
    let cell = unsafe { peek(handle) };
    cell.as_ptr()
}

/// Live owners of the string; 0 for a null handle.
///
/// # Safety
///
/// `handle` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rtcore_string_owner_count(handle: *mut RtString) -> usize {
    let cell = unsafe { peek(handle) };
    cell.owner_count()
}
