//! The buffer type, its accessors and the capacity manager.
//!
//! A [`StretchyBuf`] is born unallocated (the "null" state: length 0,
//! capacity 0, no block). The first capacity-increasing operation obtains a
//! block from its [`BlockAllocator`]; later growth reallocates that block,
//! possibly moving it. Because every growing operation takes `&mut self`,
//! a move is applied in place and callers never hold a stale handle.
//!
//! ```text
//! StretchyBuf<T, A>
//! ├── ptr ──────────► [ e0 | e1 | ... | e(len-1) | uninit ... ]   one block
//! ├── len                 <──────── len ────────>
//! ├── cap                 <─────────────── cap ──────────────────>
//! ├── config  (growth law, max capacity)
//! └── alloc   (reallocate / release)
//! ```

#![allow(unsafe_code)]

use std::marker::PhantomData;
use std::ptr::NonNull;
use std::slice;

use crate::alloc::{BlockAllocator, Global};
use crate::config::BufConfig;
use crate::error::BufError;
use crate::raw;

/// A growable, contiguous buffer of `T` with an explicit capacity manager.
///
/// # Invariants
///
/// - `len <= cap`.
/// - `cap == 0` means no block is owned and `ptr` is dangling (zero-sized
///   `T` never owns a block regardless of `cap`).
/// - Slots `[0, len)` are initialised, `[len, cap)` are not.
pub struct StretchyBuf<T, A: BlockAllocator = Global> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) len: usize,
    pub(crate) cap: usize,
    pub(crate) config: BufConfig,
    pub(crate) alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: the buffer uniquely owns its elements and block, like `Vec<T>`.
unsafe impl<T: Send, A: BlockAllocator + Send> Send for StretchyBuf<T, A> {}

// SAFETY: shared access only hands out `&T` and `&A`.
unsafe impl<T: Sync, A: BlockAllocator + Sync> Sync for StretchyBuf<T, A> {}

impl<T> StretchyBuf<T> {
    /// Create an empty buffer on the global allocator. Does not allocate.
    pub const fn new() -> Self {
        Self::from_parts(BufConfig::new(), Global)
    }

    /// Create an empty buffer with a custom growth configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BufError::InvalidConfig`] if `config` fails validation.
    pub fn with_config(config: BufConfig) -> Result<Self, BufError> {
        Self::with_config_in(config, Global)
    }

    /// Create a buffer that can hold exactly `capacity` elements before
    /// it reallocates.
    ///
    /// # Errors
    ///
    /// Returns an error if the block cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self, BufError> {
        Self::with_capacity_in(capacity, Global)
    }
}

impl<T, A: BlockAllocator> StretchyBuf<T, A> {
    pub(crate) const fn from_parts(config: BufConfig, alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            cap: 0,
            config,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Create an empty buffer backed by `alloc`. Does not allocate.
    pub const fn new_in(alloc: A) -> Self {
        Self::from_parts(BufConfig::new(), alloc)
    }

    /// Create an empty buffer backed by `alloc` with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BufError::InvalidConfig`] if `config` fails validation.
    pub fn with_config_in(config: BufConfig, alloc: A) -> Result<Self, BufError> {
        config.validate()?;
        Ok(Self::from_parts(config, alloc))
    }

    /// Create a buffer backed by `alloc` with exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the block cannot be allocated.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, BufError> {
        let mut buf = Self::new_in(alloc);
        buf.ensure_capacity(capacity)?;
        Ok(buf)
    }

    /// Number of live elements. Zero for an unallocated buffer.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the buffer can hold without reallocating.
    /// Zero for an unallocated buffer.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Whether the buffer has left the unallocated state.
    ///
    /// Zero-sized element types report `true` once capacity was requested,
    /// even though they never touch the allocator.
    pub fn is_allocated(&self) -> bool {
        self.cap != 0
    }

    /// The growth configuration in effect.
    pub fn config(&self) -> &BufConfig {
        &self.config
    }

    /// The allocator backing this buffer.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Pointer to the first element. Dangling (but non-null and aligned)
    /// while unallocated. Invalidated by any reallocation.
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// View the live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `ptr` is aligned and non-null, and `[0, len)` is initialised.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// View the live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, and `&mut self` guarantees uniqueness.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Guarantee room for at least `requested` elements, reallocating to
    /// exactly `requested` slots if the current capacity is smaller.
    ///
    /// Existing elements are preserved; the block may move. A request that
    /// already fits is a no-op.
    ///
    /// # Errors
    ///
    /// - [`BufError::CapacityExceeded`] if `requested` is above the
    ///   configured `max_capacity`.
    /// - [`BufError::CapacityOverflow`] if the block size overflows.
    /// - [`BufError::AllocFailed`] if the allocator refuses. The buffer and
    ///   its contents are unchanged in every error case.
    pub fn ensure_capacity(&mut self, requested: usize) -> Result<(), BufError> {
        if requested <= self.cap {
            return Ok(());
        }
        if requested > self.config.max_capacity {
            return Err(BufError::CapacityExceeded {
                requested,
                max: self.config.max_capacity,
            });
        }
        // SAFETY: `requested > cap`, and `ptr` is the block obtained for
        // `cap` elements from `self.alloc` (or `cap == 0`).
        match unsafe { raw::grow_block(&self.alloc, self.ptr, self.cap, requested) } {
            Ok(ptr) => {
                tracing::trace!(
                    old_capacity = self.cap,
                    new_capacity = requested,
                    len = self.len,
                    "stretchy buffer reallocated"
                );
                self.ptr = ptr;
                self.cap = requested;
                Ok(())
            }
            Err(err) => {
                tracing::debug!(
                    capacity = self.cap,
                    requested,
                    error = %err,
                    "stretchy buffer growth failed"
                );
                Err(err)
            }
        }
    }

    /// Grow capacity by the configured heuristic so that at least
    /// `min_capacity` elements fit.
    ///
    /// The target is `max(growth_factor * capacity + base_increment,
    /// min_capacity)`, which keeps a run of single-element insertions
    /// amortized O(1) and lets bulk operations reach their size in one step.
    ///
    /// # Errors
    ///
    /// Same as [`ensure_capacity`](Self::ensure_capacity).
    pub fn grow(&mut self, min_capacity: usize) -> Result<(), BufError> {
        let target = self.config.grow_target(self.cap, min_capacity)?;
        self.ensure_capacity(target)
    }

    /// Make room for `additional` more elements, growing by the heuristic
    /// only when the current capacity is insufficient.
    pub(crate) fn grow_for(&mut self, additional: usize) -> Result<(), BufError> {
        let needed = self
            .len
            .checked_add(additional)
            .ok_or(BufError::CapacityOverflow {
                requested: additional,
            })?;
        if needed > self.cap {
            self.grow(needed)?;
        }
        Ok(())
    }

    /// Drop every element, free the block and return to the unallocated
    /// state. Calling it again is a no-op.
    pub fn release(&mut self) {
        if self.cap == 0 {
            return;
        }
        let (ptr, len, cap) = (self.ptr, self.len, self.cap);
        self.ptr = NonNull::dangling();
        self.len = 0;
        self.cap = 0;
        // SAFETY: `[0, len)` was initialised and is no longer reachable
        // through `self`; `ptr` was the live block for `cap` elements.
        unsafe {
            raw::drop_range(ptr, 0, len);
            raw::release_block(&self.alloc, ptr, cap);
        }
        tracing::trace!(capacity = cap, len, "stretchy buffer released");
    }
}

impl<T, A: BlockAllocator> Drop for StretchyBuf<T, A> {
    fn drop(&mut self) {
        self.release();
    }
}
