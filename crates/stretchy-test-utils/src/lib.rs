//! Test fixtures for stretchy buffer development.
//!
//! Provides a failure-injecting [`FailingAllocator`] for exercising the
//! capacity manager's error paths, and a [`DropLedger`] that records every
//! element drop so tests can check that each value is dropped exactly once.

#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::alloc::Layout;
use std::cell::{Cell, RefCell};
use std::ptr::NonNull;
use std::rc::Rc;

use stretchy::{BlockAllocator, Global};

/// Allocator that refuses requests once a budget is spent or a size
/// limit is crossed. Releases always succeed.
///
/// Shared by reference like [`stretchy::Tracking`]: hand `&failing` to the
/// buffer and reconfigure it between operations.
#[derive(Debug)]
pub struct FailingAllocator {
    remaining: Cell<Option<usize>>,
    max_bytes: Cell<Option<usize>>,
    refused: Cell<usize>,
}

impl FailingAllocator {
    /// An allocator that never fails until told to.
    pub fn new() -> Self {
        Self {
            remaining: Cell::new(None),
            max_bytes: Cell::new(None),
            refused: Cell::new(0),
        }
    }

    /// Allow `successes` more (re)allocations, then refuse all of them.
    pub fn fail_after(successes: usize) -> Self {
        let alloc = Self::new();
        alloc.remaining.set(Some(successes));
        alloc
    }

    /// Refuse any block larger than `max_bytes`.
    pub fn fail_above(max_bytes: usize) -> Self {
        let alloc = Self::new();
        alloc.max_bytes.set(Some(max_bytes));
        alloc
    }

    /// Refuse every request from now on.
    pub fn fail_now(&self) {
        self.remaining.set(Some(0));
    }

    /// Stop refusing requests.
    pub fn recover(&self) {
        self.remaining.set(None);
        self.max_bytes.set(None);
    }

    /// How many requests were refused so far.
    pub fn refused(&self) -> usize {
        self.refused.get()
    }

    fn admit(&self, layout: Layout) -> bool {
        if self.max_bytes.get().is_some_and(|max| layout.size() > max) {
            return false;
        }
        match self.remaining.get() {
            None => true,
            Some(0) => false,
            Some(n) => {
                self.remaining.set(Some(n - 1));
                true
            }
        }
    }
}

impl Default for FailingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: either refuses without touching `block`, or forwards to `Global`.
unsafe impl BlockAllocator for FailingAllocator {
    unsafe fn reallocate(
        &self,
        block: Option<NonNull<u8>>,
        old: Layout,
        new: Layout,
    ) -> Option<NonNull<u8>> {
        if !self.admit(new) {
            self.refused.set(self.refused.get() + 1);
            return None;
        }
        // SAFETY: forwarded caller contract.
        unsafe { Global.reallocate(block, old, new) }
    }

    unsafe fn release(&self, block: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded caller contract.
        unsafe { Global.release(block, layout) }
    }
}

/// Shared record of which [`Tracked`] values have been dropped.
#[derive(Clone, Debug, Default)]
pub struct DropLedger {
    dropped: Rc<RefCell<Vec<u32>>>,
}

impl DropLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A value whose drop will be recorded under `id`.
    pub fn track(&self, id: u32) -> Tracked {
        Tracked {
            id,
            ledger: Rc::clone(&self.dropped),
        }
    }

    /// Number of drops recorded so far.
    pub fn drop_count(&self) -> usize {
        self.dropped.borrow().len()
    }

    /// Ids of dropped values, sorted.
    pub fn dropped_ids(&self) -> Vec<u32> {
        let mut ids = self.dropped.borrow().clone();
        ids.sort_unstable();
        ids
    }
}

/// Element type that reports its own drop to a [`DropLedger`].
///
/// Clones share the id, so a cloned value shows up twice in the ledger
/// once both copies are gone.
#[derive(Debug)]
pub struct Tracked {
    id: u32,
    ledger: Rc<RefCell<Vec<u32>>>,
}

impl Tracked {
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            ledger: Rc::clone(&self.ledger),
        }
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.ledger.borrow_mut().push(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_after_counts_down() {
        let alloc = FailingAllocator::fail_after(1);
        let layout = Layout::new::<u64>();
        unsafe {
            let block = alloc.reallocate(None, layout, layout).unwrap();
            assert!(alloc.reallocate(None, layout, layout).is_none());
            alloc.release(block, layout);
        }
        assert_eq!(alloc.refused(), 1);
    }

    #[test]
    fn fail_above_checks_size() {
        let alloc = FailingAllocator::fail_above(8);
        let big = Layout::array::<u64>(2).unwrap();
        unsafe {
            assert!(alloc.reallocate(None, big, big).is_none());
        }
        alloc.recover();
        unsafe {
            let block = alloc.reallocate(None, big, big).unwrap();
            alloc.release(block, big);
        }
    }

    #[test]
    fn ledger_records_each_drop() {
        let ledger = DropLedger::new();
        let a = ledger.track(1);
        let b = a.clone();
        drop(a);
        assert_eq!(ledger.drop_count(), 1);
        drop(b);
        drop(ledger.track(0));
        assert_eq!(ledger.dropped_ids(), vec![0, 1, 1]);
    }
}
