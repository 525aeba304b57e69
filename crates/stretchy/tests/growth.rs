//! Growth-law checks measured through the `Tracking` allocator.

use proptest::prelude::*;
use stretchy::{BufConfig, Global, StretchyBuf, Tracking};

/// Number of growth events the default law `2c + 8` needs to hold `n`
/// elements pushed one at a time.
fn expected_growths(n: usize) -> usize {
    let config = BufConfig::new();
    let (mut cap, mut events) = (0, 0);
    while cap < n {
        cap = config.grow_target(cap, cap + 1).unwrap();
        events += 1;
    }
    events
}

#[test]
fn known_capacity_sequence() {
    let mut buf = StretchyBuf::new();
    let mut seen = Vec::new();
    for i in 0..1_000u32 {
        buf.push(i).unwrap();
        if seen.last() != Some(&buf.capacity()) {
            seen.push(buf.capacity());
        }
    }
    assert_eq!(seen, vec![8, 24, 56, 120, 248, 504, 1016]);
}

#[test]
fn pushes_reallocate_logarithmically() {
    for n in [1usize, 10, 1_000, 100_000] {
        let tracking = Tracking::new(Global);
        let mut buf = StretchyBuf::new_in(&tracking);
        for i in 0..n {
            buf.push(i).unwrap();
        }
        let events = tracking.stats().growth_events();
        assert_eq!(events, expected_growths(n));
        // log2(100_000) ~ 17; the +8 head start keeps it below that.
        assert!(events <= (usize::BITS - n.leading_zeros()) as usize + 1);
    }
}

#[test]
fn only_one_live_block_per_buffer() {
    let tracking = Tracking::new(Global);
    {
        let mut buf = StretchyBuf::new_in(&tracking);
        for i in 0..5_000u64 {
            buf.push(i).unwrap();
        }
        let stats = tracking.stats();
        assert_eq!(stats.allocations, 1);
        assert_eq!(stats.live_bytes, buf.capacity() * std::mem::size_of::<u64>());
    }
    let stats = tracking.stats();
    assert_eq!(stats.releases, 1);
    assert_eq!(stats.live_bytes, 0);
}

#[test]
fn custom_growth_factor_is_honoured() {
    let config = BufConfig {
        growth_factor: 4,
        base_increment: 1,
        ..BufConfig::new()
    };
    let mut buf = StretchyBuf::with_config(config).unwrap();
    let mut seen = Vec::new();
    for i in 0..100u8 {
        buf.push(i).unwrap();
        if seen.last() != Some(&buf.capacity()) {
            seen.push(buf.capacity());
        }
    }
    assert_eq!(seen, vec![1, 5, 21, 85, 341]);
}

proptest! {
    #[test]
    fn push_count_matches_and_capacity_covers(n in 0usize..3_000) {
        let tracking = Tracking::new(Global);
        let mut buf = StretchyBuf::new_in(&tracking);
        let mut last_cap = 0;
        for i in 0..n {
            buf.push(i as u32).unwrap();
            prop_assert!(buf.capacity() >= last_cap);
            last_cap = buf.capacity();
        }
        prop_assert_eq!(buf.len(), n);
        prop_assert!(buf.capacity() >= n);
        prop_assert_eq!(tracking.stats().growth_events(), expected_growths(n));
        prop_assert!(buf.iter().copied().eq(0..n as u32));
    }
}
