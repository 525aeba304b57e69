//! Owning iterator.

#![allow(unsafe_code)]

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ptr::{self, NonNull};
use std::slice;

use crate::alloc::{BlockAllocator, Global};
use crate::buffer::StretchyBuf;
use crate::raw;

/// Iterator that moves elements out of a [`StretchyBuf`].
///
/// Created by `StretchyBuf::into_iter`. Frees the block when dropped,
/// dropping any elements that were not yielded.
pub struct IntoIter<T, A: BlockAllocator = Global> {
    ptr: NonNull<T>,
    cap: usize,
    front: usize,
    back: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: the iterator uniquely owns the remaining elements and the block.
unsafe impl<T: Send, A: BlockAllocator + Send> Send for IntoIter<T, A> {}

// SAFETY: shared access only exposes `&[T]`.
unsafe impl<T: Sync, A: BlockAllocator + Sync> Sync for IntoIter<T, A> {}

impl<T, A: BlockAllocator> IntoIter<T, A> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[front, back)` is initialised and within the block.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr().add(self.front), self.back - self.front) }
    }
}

impl<T, A: BlockAllocator> IntoIterator for StretchyBuf<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        let buf = ManuallyDrop::new(self);
        // SAFETY: `buf` is never dropped or touched again, so the allocator
        // is moved out exactly once.
        let alloc = unsafe { ptr::read(&buf.alloc) };
        IntoIter {
            ptr: buf.ptr,
            cap: buf.cap,
            front: 0,
            back: buf.len,
            alloc,
            _marker: PhantomData,
        }
    }
}

impl<T, A: BlockAllocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: `front < back`, so the slot is initialised; advancing
        // `front` makes sure it is never read again.
        let item = unsafe { raw::take(self.ptr, self.front) };
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T, A: BlockAllocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: slot `back` was the last initialised one and is now
        // outside the remaining range.
        Some(unsafe { raw::take(self.ptr, self.back) })
    }
}

impl<T, A: BlockAllocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: BlockAllocator> FusedIterator for IntoIter<T, A> {}

impl<T: fmt::Debug, A: BlockAllocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: BlockAllocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        // SAFETY: `[front, back)` is still initialised, and the block was the
        // buffer's live block for `cap` elements.
        unsafe {
            raw::drop_range(self.ptr, self.front, self.back);
            raw::release_block(&self.alloc, self.ptr, self.cap);
        }
    }
}
