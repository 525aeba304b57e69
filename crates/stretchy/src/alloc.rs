//! Block allocation primitives consumed by the capacity manager.
//!
//! A buffer owns at most one block. The capacity manager only ever asks for
//! two things: "give me a block of this layout, seeded with my old one" and
//! "take this block back". [`BlockAllocator`] is exactly that pair, modelled
//! on C's `realloc`/`free`, so a failed growth leaves the old block intact.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;

/// Host allocator interface used by [`StretchyBuf`](crate::StretchyBuf).
///
/// # Safety
///
/// Implementations must return blocks that are valid for reads and writes of
/// `new.size()` bytes and aligned to `new.align()`, and must leave the old
/// block untouched (still owned by the caller) when `reallocate` fails.
pub unsafe trait BlockAllocator {
    /// Allocate a block for `new`, or resize `block` from `old` to `new`.
    ///
    /// `block == None` requests a fresh allocation; `old` is ignored then.
    /// On success the first `min(old.size(), new.size())` bytes of the old
    /// block are preserved in the returned one. Returns `None` on failure.
    ///
    /// # Safety
    ///
    /// - `new.size()` must be non-zero.
    /// - If `block` is `Some`, it must have been returned by this allocator
    ///   for layout `old`, not yet released, and `new.align() == old.align()`.
    unsafe fn reallocate(
        &self,
        block: Option<NonNull<u8>>,
        old: Layout,
        new: Layout,
    ) -> Option<NonNull<u8>>;

    /// Return `block` to the allocator.
    ///
    /// # Safety
    ///
    /// `block` must have been returned by this allocator for `layout` and
    /// must not be used afterwards.
    unsafe fn release(&self, block: NonNull<u8>, layout: Layout);
}

/// The process-wide allocator from `std::alloc`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Global;

// SAFETY: delegates to `std::alloc`, which upholds the realloc contract.
unsafe impl BlockAllocator for Global {
    unsafe fn reallocate(
        &self,
        block: Option<NonNull<u8>>,
        old: Layout,
        new: Layout,
    ) -> Option<NonNull<u8>> {
        let raw = match block {
            // SAFETY: the caller guarantees `new.size() != 0`.
            None => unsafe { std::alloc::alloc(new) },
            // SAFETY: `block` came from `std::alloc` with layout `old`, the
            // alignment is unchanged and `new.size()` is a valid `Layout` size.
            Some(block) => unsafe { std::alloc::realloc(block.as_ptr(), old, new.size()) },
        };
        NonNull::new(raw)
    }

    unsafe fn release(&self, block: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded caller contract.
        unsafe { std::alloc::dealloc(block.as_ptr(), layout) }
    }
}

// SAFETY: forwards every call to `A`.
unsafe impl<A: BlockAllocator + ?Sized> BlockAllocator for &A {
    unsafe fn reallocate(
        &self,
        block: Option<NonNull<u8>>,
        old: Layout,
        new: Layout,
    ) -> Option<NonNull<u8>> {
        // SAFETY: forwarded caller contract.
        unsafe { (**self).reallocate(block, old, new) }
    }

    unsafe fn release(&self, block: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded caller contract.
        unsafe { (**self).release(block, layout) }
    }
}

/// Point-in-time counters collected by [`Tracking`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocStats {
    /// Fresh allocations (`reallocate` with no prior block) that succeeded.
    pub allocations: usize,
    /// Resizes of an existing block that succeeded.
    pub reallocations: usize,
    /// `reallocate` calls the inner allocator refused.
    pub failures: usize,
    /// Blocks handed back through `release`.
    pub releases: usize,
    /// Bytes currently held in blocks obtained through this allocator.
    pub live_bytes: usize,
}

impl AllocStats {
    /// Successful growth events of any kind.
    pub fn growth_events(&self) -> usize {
        self.allocations + self.reallocations
    }
}

/// Allocator wrapper that counts every call passing through it.
///
/// Counters live in [`Cell`]s, so a `Tracking` is shared by reference:
/// hand `&tracking` to a buffer and read [`stats`](Tracking::stats)
/// afterwards.
///
/// ```
/// use stretchy::{StretchyBuf, Tracking};
///
/// let tracking: Tracking = Tracking::default();
/// let mut buf = StretchyBuf::new_in(&tracking);
/// for i in 0..100 {
///     buf.push(i).unwrap();
/// }
/// assert_eq!(tracking.stats().growth_events(), 4); // 8, 24, 56, 120
/// ```
#[derive(Debug, Default)]
pub struct Tracking<A = Global> {
    inner: A,
    allocations: Cell<usize>,
    reallocations: Cell<usize>,
    failures: Cell<usize>,
    releases: Cell<usize>,
    live_bytes: Cell<usize>,
}

impl<A> Tracking<A> {
    /// Wrap `inner`, starting all counters at zero.
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            allocations: Cell::new(0),
            reallocations: Cell::new(0),
            failures: Cell::new(0),
            releases: Cell::new(0),
            live_bytes: Cell::new(0),
        }
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> AllocStats {
        AllocStats {
            allocations: self.allocations.get(),
            reallocations: self.reallocations.get(),
            failures: self.failures.get(),
            releases: self.releases.get(),
            live_bytes: self.live_bytes.get(),
        }
    }

    /// The wrapped allocator.
    pub fn inner(&self) -> &A {
        &self.inner
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

// SAFETY: forwards every call to `A` and only observes the results.
unsafe impl<A: BlockAllocator> BlockAllocator for Tracking<A> {
    unsafe fn reallocate(
        &self,
        block: Option<NonNull<u8>>,
        old: Layout,
        new: Layout,
    ) -> Option<NonNull<u8>> {
        // SAFETY: forwarded caller contract.
        let result = unsafe { self.inner.reallocate(block, old, new) };
        match (result, block) {
            (None, _) => bump(&self.failures),
            (Some(_), None) => {
                bump(&self.allocations);
                self.live_bytes.set(self.live_bytes.get() + new.size());
            }
            (Some(_), Some(_)) => {
                bump(&self.reallocations);
                self.live_bytes
                    .set(self.live_bytes.get() - old.size() + new.size());
            }
        }
        result
    }

    unsafe fn release(&self, block: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded caller contract.
        unsafe { self.inner.release(block, layout) };
        bump(&self.releases);
        self.live_bytes.set(self.live_bytes.get() - layout.size());
    }
}
