//! Shared-ownership cells.
//!
//! A [`Shared<T>`] is a handle to a heap control block holding one value
//! and a count of live owners. Cloning a handle bumps the count, dropping
//! one lowers it, and the value is destroyed exactly once when the count
//! goes from 1 to 0.
//!
//! The count is a plain integer. `Shared<T>` is neither `Send` nor `Sync`,
//! so the compiler keeps handles on the thread that created them; callers
//! that need sharing across threads must bring their own synchronization.
//!
//! A handle may also be empty (the null handle). Dropping or releasing an
//! empty handle is a no-op; dereferencing one is a contract violation.

use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::error::contract_violation;

/// Control block: owner count followed by the value.
struct CellBox<T> {
    owners: Cell<usize>,
    value: T,
}

/// Reference-counted handle to a heap-allocated `T`.
pub struct Shared<T> {
    ptr: Option<NonNull<CellBox<T>>>,
    _owns: PhantomData<CellBox<T>>,
}

impl<T> Shared<T> {
    /// Move `value` to the heap and return its first owner.
    pub fn new(value: T) -> Self {
        let boxed = Box::new(CellBox {
            owners: Cell::new(1),
            value,
        });
        let ptr = NonNull::from(Box::leak(boxed));
        counters::record_allocation();
        tracing::trace!(cell = ?ptr, "shared cell allocated");
        Self::from_ptr(Some(ptr))
    }

    /// The null handle. Owns nothing.
    pub const fn empty() -> Self {
        Self::from_ptr(None)
    }

    const fn from_ptr(ptr: Option<NonNull<CellBox<T>>>) -> Self {
        Self {
            ptr,
            _owns: PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    /// Number of live handles to this cell, or 0 for the null handle.
    pub fn owner_count(&self) -> usize {
        self.inner().map_or(0, |inner| inner.owners.get())
    }

    /// Whether both handles refer to the same cell (two null handles count as the same).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }

    /// Give up this handle's ownership and leave it empty.
    ///
    /// Destroys the value if this was the last owner.
    pub fn release(&mut self) {
        let Some(ptr) = self.ptr.take() else {
            return;
        };
        // SAFETY: a non-null handle always points at a live control block,
        // since its own ownership keeps the count above zero.
        let remaining = unsafe {
            let owners = &ptr.as_ref().owners;
            let remaining = owners.get() - 1;
            owners.set(remaining);
            remaining
        };
        #[cfg(feature = "debug_runtime")]
        tracing::trace!(cell = ?ptr, owners = remaining, "shared cell released");
        if remaining == 0 {
            // SAFETY: the count reached zero, so no other handle can reach
            // this block. It was allocated by `Box` in `new`.
            drop(unsafe { Box::from_raw(ptr.as_ptr()) });
            counters::record_deallocation();
            tracing::trace!(cell = ?ptr, "shared cell deallocated");
        }
    }

    /// Point this handle at `source`'s cell.
    ///
    /// The old target is released before the new one is adopted. Assigning a
    /// handle to a cell it already refers to leaves every count unchanged.
    pub fn assign(&mut self, source: &Shared<T>) {
        if self.ptr_eq(source) {
            return;
        }
        self.release();
        self.ptr = source.adopt();
    }

    /// Mutable access when this is the only owner.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self.ptr {
            // SAFETY: a single owner means no other reference to the value
            // can exist, and `&mut self` excludes borrows through this handle.
            Some(ptr) if self.owner_count() == 1 => Some(unsafe { &mut (*ptr.as_ptr()).value }),
            _ => None,
        }
    }

    /// Take the value out if this is the only owner; otherwise hand the handle back.
    pub fn try_unwrap(mut this: Self) -> Result<T, Self> {
        match this.ptr {
            Some(ptr) if this.owner_count() == 1 => {
                this.ptr = None;
                // SAFETY: sole owner, and the handle was emptied above so the
                // block is not freed a second time on drop.
                let boxed = unsafe { Box::from_raw(ptr.as_ptr()) };
                counters::record_deallocation();
                tracing::trace!(cell = ?ptr, "shared cell unwrapped");
                Ok(boxed.value)
            }
            _ => Err(this),
        }
    }

    /// Hand the handle's ownership to a raw pointer, for the C ABI.
    pub(crate) fn into_raw(this: Self) -> *mut () {
        let raw = this.ptr.map_or(std::ptr::null_mut(), |ptr| ptr.as_ptr().cast());
        std::mem::forget(this);
        raw
    }

    /// Rebuild a handle from [`Shared::into_raw`] output, taking its ownership.
    ///
    /// # Safety
    ///
    /// `raw` must be null or come from `into_raw` on a `Shared<T>` of the
    /// same `T`, and that ownership must not have been reclaimed already.
    pub(crate) unsafe fn from_raw(raw: *mut ()) -> Self {
        Self::from_ptr(NonNull::new(raw.cast()))
    }

    fn inner(&self) -> Option<&CellBox<T>> {
        // SAFETY: see `release`.
        self.ptr.map(|ptr| unsafe { &*ptr.as_ptr() })
    }

    /// Bump the owner count and return the pointer for a new handle.
    fn adopt(&self) -> Option<NonNull<CellBox<T>>> {
        let inner = self.inner()?;
        let owners = inner
            .owners
            .get()
            .checked_add(1)
            .unwrap_or_else(|| contract_violation("shared cell owner count overflow"));
        inner.owners.set(owners);
        #[cfg(feature = "debug_runtime")]
        tracing::trace!(cell = ?self.ptr, owners, "shared cell copied");
        self.ptr
    }
}

impl<T: Clone> Shared<T> {
    /// Mutable access, cloning the value into a fresh cell first if it is shared.
    pub fn make_mut(&mut self) -> &mut T {
        if self.is_empty() {
            contract_violation("mutable access through an empty shared cell");
        }
        if self.owner_count() > 1 {
            let copy = Shared::new((**self).clone());
            self.assign(&copy);
        }
        match self.get_mut() {
            Some(value) => value,
            None => contract_violation("shared cell is not unique after copy-on-write"),
        }
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self::from_ptr(self.adopt())
    }
}

impl<T> Drop for Shared<T> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T> Deref for Shared<T> {
    type Target = T;

    #[track_caller]
    fn deref(&self) -> &T {
        match self.inner() {
            Some(inner) => &inner.value,
            None => contract_violation("dereference of an empty shared cell"),
        }
    }
}

impl<T> DerefMut for Shared<T> {
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        if self.is_empty() {
            contract_violation("mutable access through an empty shared cell");
        }
        match self.get_mut() {
            Some(value) => value,
            None => contract_violation("mutable access to a cell with other owners"),
        }
    }
}

impl<T> Default for Shared<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<T> for Shared<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: PartialEq> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.inner(), other.inner()) {
            (Some(a), Some(b)) => a.value == b.value,
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner() {
            Some(inner) => f.debug_tuple("Shared").field(&inner.value).finish(),
            None => f.write_str("Shared(<empty>)"),
        }
    }
}

pub use counters::{CellStats, reset_stats, stats};

mod counters {
    use std::cell::Cell;

    /// Per-thread allocation counters for shared cells.
    ///
    /// `allocated`, `deallocated` and `peak_live` count from the last
    /// [`reset_stats`]; `live` is the number of cells alive right now,
    /// including those created before the reset.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct CellStats {
        pub allocated: u64,
        pub deallocated: u64,
        pub live: u64,
        pub peak_live: u64,
    }

    thread_local! {
        static STATS: Cell<CellStats> = const {
            Cell::new(CellStats {
                allocated: 0,
                deallocated: 0,
                live: 0,
                peak_live: 0,
            })
        };
    }

    /// Snapshot of this thread's counters.
    pub fn stats() -> CellStats {
        STATS.with(Cell::get)
    }

    /// Zero the counters. Cells still alive stay counted in `live`.
    pub fn reset_stats() {
        STATS.with(|s| {
            let live = s.get().live;
            s.set(CellStats {
                live,
                peak_live: live,
                ..CellStats::default()
            });
        });
    }

    pub(super) fn record_allocation() {
        STATS.with(|s| {
            let mut stats = s.get();
            stats.allocated += 1;
            stats.live += 1;
            stats.peak_live = stats.peak_live.max(stats.live);
            s.set(stats);
        });
    }

    pub(super) fn record_deallocation() {
        STATS.with(|s| {
            let mut stats = s.get();
            stats.deallocated += 1;
            stats.live = stats.live.saturating_sub(1);
            s.set(stats);
        });
    }
}
