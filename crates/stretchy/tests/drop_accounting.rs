//! Every element placed in a buffer is dropped exactly once, whichever
//! operation removes it.

use stretchy::StretchyBuf;
use stretchy_test_utils::{DropLedger, FailingAllocator, Tracked};

fn filled(ledger: &DropLedger, n: u32) -> StretchyBuf<Tracked> {
    let mut buf = StretchyBuf::new();
    for id in 0..n {
        buf.push(ledger.track(id)).unwrap();
    }
    buf
}

#[test]
fn release_drops_all_elements() {
    let ledger = DropLedger::new();
    let mut buf = filled(&ledger, 5);
    buf.release();
    assert_eq!(ledger.dropped_ids(), vec![0, 1, 2, 3, 4]);
    buf.release();
    assert_eq!(ledger.drop_count(), 5);
}

#[test]
fn drop_of_buffer_drops_elements() {
    let ledger = DropLedger::new();
    drop(filled(&ledger, 3));
    assert_eq!(ledger.dropped_ids(), vec![0, 1, 2]);
}

#[test]
fn clear_and_truncate_drop_only_the_removed() {
    let ledger = DropLedger::new();
    let mut buf = filled(&ledger, 6);
    buf.truncate(4);
    assert_eq!(ledger.dropped_ids(), vec![4, 5]);
    buf.clear();
    assert_eq!(ledger.dropped_ids(), vec![0, 1, 2, 3, 4, 5]);
    drop(buf);
    assert_eq!(ledger.drop_count(), 6);
}

#[test]
fn remove_and_pop_hand_ownership_to_caller() {
    let ledger = DropLedger::new();
    let mut buf = filled(&ledger, 4);
    let removed = buf.remove(1).unwrap();
    let swapped = buf.swap_remove(0).unwrap();
    let popped = buf.pop().unwrap();
    assert_eq!(ledger.drop_count(), 0);
    assert_eq!((removed.id(), swapped.id(), popped.id()), (1, 0, 2));
    drop((removed, swapped, popped));
    drop(buf);
    assert_eq!(ledger.dropped_ids(), vec![0, 1, 2, 3]);
}

#[test]
fn shifts_never_duplicate_or_lose_elements() {
    let ledger = DropLedger::new();
    let mut buf = filled(&ledger, 3);
    buf.insert(1, ledger.track(10)).unwrap();
    buf.insert_range(0, &[ledger.track(20), ledger.track(21)])
        .unwrap();
    // The range argument's temporaries are gone by now.
    assert_eq!(ledger.dropped_ids(), vec![20, 21]);
    let ids: Vec<u32> = buf.iter().map(Tracked::id).collect();
    assert_eq!(ids, vec![20, 21, 0, 10, 1, 2]);
    drop(buf);
    assert_eq!(ledger.dropped_ids(), vec![0, 1, 2, 10, 20, 20, 21, 21]);
}

#[test]
fn into_iter_drops_unyielded_elements() {
    let ledger = DropLedger::new();
    let mut iter = filled(&ledger, 4).into_iter();
    let first = iter.next().unwrap();
    drop(iter);
    assert_eq!(ledger.dropped_ids(), vec![1, 2, 3]);
    drop(first);
    assert_eq!(ledger.drop_count(), 4);
}

#[test]
fn resize_and_clone_account_for_copies() {
    let ledger = DropLedger::new();
    let mut buf = StretchyBuf::new();
    buf.resize(3, ledger.track(7)).unwrap();
    // The fill value itself is dropped once resize returns.
    assert_eq!(ledger.drop_count(), 1);
    let copy = buf.clone();
    drop(buf);
    drop(copy);
    assert_eq!(ledger.dropped_ids(), vec![7; 7]);
}

#[test]
fn failed_push_drops_the_rejected_item_only() {
    let ledger = DropLedger::new();
    let failing = FailingAllocator::fail_after(1);
    let mut buf = StretchyBuf::new_in(&failing);
    for id in 0..8 {
        buf.push(ledger.track(id)).unwrap();
    }
    assert!(buf.push(ledger.track(8)).is_err());
    assert_eq!(ledger.dropped_ids(), vec![8]);
    assert_eq!(buf.len(), 8);
}

#[test]
fn append_moves_without_dropping() {
    let ledger = DropLedger::new();
    let mut a = filled(&ledger, 2);
    let mut b = StretchyBuf::new();
    b.push(ledger.track(5)).unwrap();
    a.append(&mut b).unwrap();
    drop(b);
    assert_eq!(ledger.drop_count(), 0);
    drop(a);
    assert_eq!(ledger.dropped_ids(), vec![0, 1, 5]);
}
