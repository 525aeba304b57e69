//! Standard trait implementations for [`StretchyBuf`].
//!
//! Slice access comes through `Deref<Target = [T]>`, so indexing,
//! iteration by reference and every `[T]` method work directly on a buffer.
//! Traits whose signatures cannot carry a `Result` (`Clone`, `Extend`,
//! `FromIterator`) panic if the allocator fails.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};

use crate::alloc::BlockAllocator;
use crate::buffer::StretchyBuf;
use crate::error::BufError;

#[cold]
#[track_caller]
fn growth_failed(err: BufError) -> ! {
    panic!("stretchy buffer growth failed: {err}")
}

impl<T, A: BlockAllocator> Deref for StretchyBuf<T, A> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: BlockAllocator> DerefMut for StretchyBuf<T, A> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: BlockAllocator> AsRef<[T]> for StretchyBuf<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: BlockAllocator> AsMut<[T]> for StretchyBuf<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: BlockAllocator + Default> Default for StretchyBuf<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

/// Deep copy with capacity equal to the source length and the same config.
///
/// # Panics
///
/// Panics if the allocator cannot provide the new block.
impl<T: Clone, A: BlockAllocator + Clone> Clone for StretchyBuf<T, A> {
    fn clone(&self) -> Self {
        let mut out = Self::from_parts(self.config, self.alloc.clone());
        if let Err(err) = out
            .ensure_capacity(self.len)
            .and_then(|()| out.append_range(self.as_slice()))
        {
            growth_failed(err);
        }
        out
    }
}

impl<T: fmt::Debug, A: BlockAllocator> fmt::Debug for StretchyBuf<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T, U, A, B> PartialEq<StretchyBuf<U, B>> for StretchyBuf<T, A>
where
    T: PartialEq<U>,
    A: BlockAllocator,
    B: BlockAllocator,
{
    fn eq(&self, other: &StretchyBuf<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U, A: BlockAllocator> PartialEq<[U]> for StretchyBuf<T, A> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, A: BlockAllocator> PartialEq<&[U]> for StretchyBuf<T, A> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, A: BlockAllocator, const N: usize> PartialEq<[U; N]>
    for StretchyBuf<T, A>
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, A: BlockAllocator> PartialEq<Vec<U>> for StretchyBuf<T, A> {
    fn eq(&self, other: &Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: BlockAllocator> Eq for StretchyBuf<T, A> {}

impl<T: Hash, A: BlockAllocator> Hash for StretchyBuf<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

/// # Panics
///
/// Panics if the allocator fails while growing.
impl<T, A: BlockAllocator> Extend<T> for StretchyBuf<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if let Err(err) = self.grow_for(lower) {
            growth_failed(err);
        }
        for item in iter {
            if let Err(err) = self.push(item) {
                growth_failed(err);
            }
        }
    }
}

impl<'a, T: Copy + 'a, A: BlockAllocator> Extend<&'a T> for StretchyBuf<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

/// # Panics
///
/// Panics if the global allocator fails while growing.
impl<T> FromIterator<T> for StretchyBuf<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut buf = Self::new();
        buf.extend(iter);
        buf
    }
}

impl<'a, T, A: BlockAllocator> IntoIterator for &'a StretchyBuf<T, A> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, A: BlockAllocator> IntoIterator for &'a mut StretchyBuf<T, A> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
