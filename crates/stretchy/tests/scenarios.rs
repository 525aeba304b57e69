//! End-to-end scenarios on `f32` buffers, mirroring how a caller drives the
//! buffer from an empty start.

use stretchy::{BufError, StretchyBuf};

#[test]
fn fresh_buffer_is_empty_and_release_is_noop() {
    let mut buf = StretchyBuf::<f32>::new();
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.capacity(), 0);
    buf.release();
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.capacity(), 0);
    assert!(!buf.is_allocated());
}

#[test]
fn push_then_read_back() {
    let mut buf = StretchyBuf::new();
    for v in [1.0f32, 2.0, 3.0] {
        buf.push(v).unwrap();
    }
    assert_eq!(buf[0], 1.0);
    assert_eq!(buf[1], 2.0);
    assert_eq!(buf[2], 3.0);
    assert_eq!(buf.len(), 3);
    assert!(buf.capacity() >= 3);

    buf.release();
    assert!(!buf.is_allocated());
}

#[test]
fn insert_into_three_elements() {
    let mut buf = StretchyBuf::new();
    buf.push(1.0f32).unwrap();
    buf.push(2.0).unwrap();
    buf.push(3.0).unwrap();
    buf.insert(1, 4.0).unwrap();
    assert_eq!(buf, [1.0, 4.0, 2.0, 3.0]);
    assert_eq!(buf.len(), 4);
}

#[test]
fn insert_range_into_two_elements() {
    let mut buf = StretchyBuf::new();
    buf.push(1.0f32).unwrap();
    buf.push(2.0).unwrap();
    buf.insert_range(1, &[3.0, 4.0, 5.0, 6.0]).unwrap();
    assert_eq!(buf, [1.0, 3.0, 4.0, 5.0, 6.0, 2.0]);
    assert_eq!(buf.len(), 6);
}

#[test]
fn delete_from_three_elements() {
    let mut buf = StretchyBuf::new();
    buf.append_range(&[1.0f32, 2.0, 3.0]).unwrap();
    buf.remove(1).unwrap();
    assert_eq!(buf, [1.0, 3.0]);
    assert_eq!(buf.len(), 2);
}

#[test]
fn pop_front_back_clear() {
    let mut buf = StretchyBuf::new();
    buf.append_range(&[1.0f32, 2.0, 3.0]).unwrap();
    assert_eq!(buf.front(), Some(&1.0));
    assert_eq!(buf.back(), Some(&3.0));

    assert_eq!(buf.pop(), Some(3.0));
    assert_eq!(buf.len(), 2);

    let cap = buf.capacity();
    buf.clear();
    assert_eq!(buf.capacity(), cap);
    assert_eq!(buf.len(), 0);
}

#[test]
fn push_pop_duality() {
    let mut buf = StretchyBuf::new();
    buf.append_range(&[5.0f32, 6.0]).unwrap();
    let before = buf.len();
    buf.push(42.0).unwrap();
    assert_eq!(buf.pop(), Some(42.0));
    assert_eq!(buf.len(), before);
}

#[test]
fn ensure_capacity_and_grow_from_empty() {
    let mut exact = StretchyBuf::<f32>::new();
    exact.ensure_capacity(100).unwrap();
    assert_eq!(exact.capacity(), 100);

    let mut grown = StretchyBuf::<f32>::new();
    grown.grow(100).unwrap();
    assert!(grown.capacity() >= 100);
}

#[test]
fn contract_violations_are_errors() {
    let mut buf = StretchyBuf::new();
    buf.append_range(&[1.0f32, 2.0]).unwrap();
    assert_eq!(
        buf.insert(5, 0.0),
        Err(BufError::IndexOutOfBounds { index: 5, len: 2 })
    );
    assert_eq!(
        buf.remove(2),
        Err(BufError::IndexOutOfBounds { index: 2, len: 2 })
    );
    assert_eq!(buf, [1.0, 2.0]);
}

#[test]
fn owned_iteration_after_mixed_ops() {
    let mut buf = StretchyBuf::new();
    buf.resize(3, 0.5f32).unwrap();
    buf.insert(0, -1.0).unwrap();
    buf.swap_remove(1).unwrap();
    let collected: Vec<f32> = buf.into_iter().collect();
    assert_eq!(collected, vec![-1.0, 0.5, 0.5]);
}
