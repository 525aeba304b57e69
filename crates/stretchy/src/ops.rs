//! Mutating operations.
//!
//! Each operation secures capacity first (through
//! [`grow`](StretchyBuf::grow)) and only then moves elements, so a capacity
//! error never leaves a half-shifted buffer behind. Index preconditions are
//! always checked and reported as [`BufError::IndexOutOfBounds`].

#![allow(unsafe_code)]

use crate::alloc::BlockAllocator;
use crate::buffer::StretchyBuf;
use crate::error::BufError;
use crate::raw;

impl<T, A: BlockAllocator> StretchyBuf<T, A> {
    /// Append `item` to the back, growing if the buffer is full.
    ///
    /// # Errors
    ///
    /// Returns a capacity error if growth fails; `item` is dropped and the
    /// buffer is unchanged.
    pub fn push(&mut self, item: T) -> Result<(), BufError> {
        if self.len == self.cap {
            self.grow_for(1)?;
        }
        // SAFETY: `len < cap` after growth; slot `len` is uninitialised.
        unsafe { raw::write(self.ptr, self.len, item) };
        self.len += 1;
        Ok(())
    }

    /// Insert `item` at `index`, shifting `[index, len)` one slot right.
    ///
    /// `index == len` behaves exactly like [`push`](Self::push).
    ///
    /// # Errors
    ///
    /// Returns [`BufError::IndexOutOfBounds`] if `index > len`, or a capacity
    /// error if growth fails.
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), BufError> {
        self.check_insert_index(index)?;
        if self.len == self.cap {
            self.grow_for(1)?;
        }
        // SAFETY: `len < cap`, so `[index + 1, len + 1)` is in bounds; the
        // vacated slot `index` is overwritten before anything reads it.
        unsafe {
            raw::shift(self.ptr, index, index + 1, self.len - index);
            raw::write(self.ptr, index, item);
        }
        self.len += 1;
        Ok(())
    }

    /// Remove and return the element at `index`, shifting the tail left.
    ///
    /// # Errors
    ///
    /// Returns [`BufError::IndexOutOfBounds`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<T, BufError> {
        self.check_index(index)?;
        // SAFETY: `index < len`; the taken slot is immediately overwritten
        // by the shifted tail, and `len` shrinks to cover the duplicate.
        let item = unsafe {
            let item = raw::take(self.ptr, index);
            raw::shift(self.ptr, index + 1, index, self.len - index - 1);
            item
        };
        self.len -= 1;
        Ok(item)
    }

    /// Remove and return the element at `index`, filling the hole with the
    /// last element. O(1), does not preserve order.
    ///
    /// # Errors
    ///
    /// Returns [`BufError::IndexOutOfBounds`] if `index >= len`.
    pub fn swap_remove(&mut self, index: usize) -> Result<T, BufError> {
        self.check_index(index)?;
        let last = self.len - 1;
        // SAFETY: `index <= last < len`; the last slot is moved into the hole
        // and then dropped from the live range.
        let item = unsafe {
            let item = raw::take(self.ptr, index);
            if index != last {
                raw::shift(self.ptr, last, index, 1);
            }
            item
        };
        self.len = last;
        Ok(item)
    }

    /// Remove and return the last element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was the last initialised slot and is now outside
        // the live range.
        Some(unsafe { raw::take(self.ptr, self.len) })
    }

    /// The first element, or `None` if empty.
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Mutable access to the first element.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// The last element, or `None` if empty.
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Mutable access to the last element.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Drop every element. Capacity and the block are kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Drop the elements past `new_len`. No-op if `new_len >= len`.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let old_len = self.len;
        self.len = new_len;
        // SAFETY: `[new_len, old_len)` was initialised and is no longer live.
        unsafe { raw::drop_range(self.ptr, new_len, old_len) };
    }

    /// Resize to `new_len`, filling new slots with values produced by `f`.
    ///
    /// Growing past the capacity uses the growth heuristic with
    /// `new_len` as the minimum. Shrinking truncates.
    ///
    /// # Errors
    ///
    /// Returns a capacity error if growth fails; the buffer is unchanged.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F) -> Result<(), BufError>
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        if new_len > self.cap {
            self.grow(new_len)?;
        }
        while self.len < new_len {
            // SAFETY: `len < new_len <= cap`; slot `len` is uninitialised.
            unsafe { raw::write(self.ptr, self.len, f()) };
            self.len += 1;
        }
        Ok(())
    }

    /// Reserve room for exactly `new_capacity` elements in total (not
    /// additional ones). The length is unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`ensure_capacity`](Self::ensure_capacity).
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), BufError> {
        self.ensure_capacity(new_capacity)
    }

    /// Move every element of `other` to the back of `self`, leaving `other`
    /// empty. `other` keeps its capacity.
    ///
    /// # Errors
    ///
    /// Returns a capacity error if growth fails; both buffers are unchanged.
    pub fn append<B: BlockAllocator>(
        &mut self,
        other: &mut StretchyBuf<T, B>,
    ) -> Result<(), BufError> {
        let count = other.len;
        self.grow_for(count)?;
        // SAFETY: `[len, len + count)` is within capacity, the two blocks are
        // distinct allocations, and `other` gives up ownership by setting its
        // length to zero.
        unsafe { raw::copy_in(self.ptr, self.len, other.ptr.as_ptr(), count) };
        other.len = 0;
        self.len += count;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), BufError> {
        if index < self.len {
            Ok(())
        } else {
            Err(BufError::IndexOutOfBounds {
                index,
                len: self.len,
            })
        }
    }

    fn check_insert_index(&self, index: usize) -> Result<(), BufError> {
        if index <= self.len {
            Ok(())
        } else {
            Err(BufError::IndexOutOfBounds {
                index,
                len: self.len,
            })
        }
    }
}

impl<T: Clone, A: BlockAllocator> StretchyBuf<T, A> {
    /// Append clones of `items`, growing once if needed.
    ///
    /// Produces the same sequence as pushing each item in order.
    ///
    /// # Errors
    ///
    /// Returns a capacity error if growth fails; the buffer is unchanged.
    pub fn append_range(&mut self, items: &[T]) -> Result<(), BufError> {
        self.grow_for(items.len())?;
        for item in items {
            // SAFETY: capacity covers `len + items.len()`; slot `len` is
            // uninitialised. `len` advances per item so a panicking `clone`
            // leaves a consistent buffer.
            unsafe { raw::write(self.ptr, self.len, item.clone()) };
            self.len += 1;
        }
        Ok(())
    }

    /// Insert clones of `items` at `index`, shifting `[index, len)` right by
    /// `items.len()` slots. `index == len` behaves like
    /// [`append_range`](Self::append_range).
    ///
    /// If a `clone` panics midway, the shifted tail is leaked, never dropped
    /// twice.
    ///
    /// # Errors
    ///
    /// Returns [`BufError::IndexOutOfBounds`] if `index > len`, or a capacity
    /// error if growth fails.
    pub fn insert_range(&mut self, index: usize, items: &[T]) -> Result<(), BufError> {
        self.check_insert_index(index)?;
        let count = items.len();
        self.grow_for(count)?;
        let tail = self.len - index;
        // Only the prefix stays live while user `clone` code runs.
        self.len = index;
        // SAFETY: capacity covers `index + count + tail`; the gap
        // `[index, index + count)` is filled before `len` re-covers it.
        unsafe {
            raw::shift(self.ptr, index, index + count, tail);
            for (offset, item) in items.iter().enumerate() {
                raw::write(self.ptr, index + offset, item.clone());
            }
        }
        self.len = index + count + tail;
        Ok(())
    }

    /// Resize to `new_len`, filling new slots with clones of `value`.
    ///
    /// # Errors
    ///
    /// Returns a capacity error if growth fails; the buffer is unchanged.
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<(), BufError> {
        self.resize_with(new_len, || value.clone())
    }
}
