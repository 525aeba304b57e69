//! Low-level primitives for buffer memory operations.
//!
//! Everything here works on a raw element pointer plus a capacity. Callers
//! in [`buffer`](crate::buffer) and [`ops`](crate::ops) own the invariants
//! (`len <= cap`, which slots are initialised); these functions only move
//! bytes and talk to the allocator. Each `unsafe` block carries a
//! `// SAFETY:` comment.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::mem;
use std::ptr::{self, NonNull};

use crate::alloc::BlockAllocator;
use crate::error::BufError;

/// Layout of a block holding `cap` elements of `T`.
pub(crate) fn block_layout<T>(cap: usize) -> Result<Layout, BufError> {
    Layout::array::<T>(cap).map_err(|_| BufError::CapacityOverflow { requested: cap })
}

/// Whether `T` needs a block at all.
pub(crate) const fn is_zst<T>() -> bool {
    mem::size_of::<T>() == 0
}

/// Grow the block at `ptr` from `old_cap` to `new_cap` elements.
///
/// `old_cap == 0` means there is no block yet and a fresh one is requested.
/// Zero-sized types never touch the allocator and keep the dangling pointer.
/// On error the old block is untouched and still owned by the caller.
///
/// # Safety
///
/// - `new_cap > old_cap`.
/// - If `old_cap > 0` and `T` is not zero-sized, `ptr` must be the block
///   previously returned for `old_cap` elements by `alloc`.
pub(crate) unsafe fn grow_block<T, A: BlockAllocator>(
    alloc: &A,
    ptr: NonNull<T>,
    old_cap: usize,
    new_cap: usize,
) -> Result<NonNull<T>, BufError> {
    debug_assert!(new_cap > old_cap);
    if is_zst::<T>() {
        return Ok(ptr);
    }
    let new_layout = block_layout::<T>(new_cap)?;
    let old_layout = block_layout::<T>(old_cap)?;
    let existing = (old_cap > 0).then(|| ptr.cast::<u8>());
    // SAFETY: `new_cap > 0` and `T` is not zero-sized, so the size is
    // non-zero; `existing` matches `old_layout` per the caller contract and
    // both layouts share `align_of::<T>()`.
    let block = unsafe { alloc.reallocate(existing, old_layout, new_layout) };
    block
        .map(NonNull::cast::<T>)
        .ok_or(BufError::AllocFailed {
            requested_bytes: new_layout.size(),
        })
}

/// Return the block at `ptr` (holding `cap` elements) to `alloc`.
///
/// # Safety
///
/// `ptr` must be the live block returned for `cap` elements by `alloc`, or
/// `cap` must be zero, or `T` zero-sized. The pointer is dead afterwards.
pub(crate) unsafe fn release_block<T, A: BlockAllocator>(alloc: &A, ptr: NonNull<T>, cap: usize) {
    if cap == 0 || is_zst::<T>() {
        return;
    }
    // `Layout::array` already succeeded for this capacity when the block was
    // obtained, so it cannot fail now.
    if let Ok(layout) = block_layout::<T>(cap) {
        // SAFETY: per the caller contract `ptr` is the live block for `layout`.
        unsafe { alloc.release(ptr.cast::<u8>(), layout) };
    }
}

/// Move `count` elements starting at `from` so they start at `to`.
///
/// Source and destination may overlap. The source slots are left as
/// bitwise duplicates and must be treated as uninitialised by the caller.
///
/// # Safety
///
/// Both `[from, from + count)` and `[to, to + count)` must lie within the
/// block's capacity.
pub(crate) unsafe fn shift<T>(base: NonNull<T>, from: usize, to: usize, count: usize) {
    // SAFETY: both ranges are in bounds per the caller contract; `ptr::copy`
    // handles overlap.
    unsafe {
        let base = base.as_ptr();
        ptr::copy(base.add(from), base.add(to), count);
    }
}

/// Bitwise-copy `count` elements from a different block into `dst + at`.
///
/// # Safety
///
/// `src` must be valid for `count` reads, `[at, at + count)` within the
/// destination's capacity, and the two ranges must not overlap.
pub(crate) unsafe fn copy_in<T>(dst: NonNull<T>, at: usize, src: *const T, count: usize) {
    // SAFETY: forwarded caller contract.
    unsafe { ptr::copy_nonoverlapping(src, dst.as_ptr().add(at), count) }
}

/// Write `value` into slot `at` without dropping what was there.
///
/// # Safety
///
/// `at` must be within the block's capacity.
pub(crate) unsafe fn write<T>(base: NonNull<T>, at: usize, value: T) {
    // SAFETY: slot is in bounds per the caller contract.
    unsafe { base.as_ptr().add(at).write(value) }
}

/// Move the value out of slot `at`, leaving it logically uninitialised.
///
/// # Safety
///
/// Slot `at` must hold an initialised value that is not read again.
pub(crate) unsafe fn take<T>(base: NonNull<T>, at: usize) -> T {
    // SAFETY: slot is initialised per the caller contract.
    unsafe { base.as_ptr().add(at).read() }
}

/// Drop the initialised elements in `[from, to)` in place.
///
/// # Safety
///
/// Every slot in the range must be initialised and not used afterwards.
pub(crate) unsafe fn drop_range<T>(base: NonNull<T>, from: usize, to: usize) {
    if !mem::needs_drop::<T>() || from >= to {
        return;
    }
    // SAFETY: the range is initialised per the caller contract.
    unsafe {
        let tail = ptr::slice_from_raw_parts_mut(base.as_ptr().add(from), to - from);
        ptr::drop_in_place(tail);
    }
}
