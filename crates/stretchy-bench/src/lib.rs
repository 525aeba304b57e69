//! Workload builders shared by the stretchy buffer benchmarks.
//!
//! - [`index_sequence`]: deterministic insertion positions via seed
//! - [`filled`]: a buffer with `n` sequential values
//! - [`growth_trace`]: capacities visited while pushing `n` elements

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use stretchy::{BufConfig, BufError, StretchyBuf};

/// Generate `n` insertion indices that are valid for a buffer growing from
/// `start_len` by one element per insert.
///
/// Index `i` lies in `0..=start_len + i`, so feeding the sequence to
/// `insert` in order never goes out of bounds.
pub fn index_sequence(start_len: usize, n: usize, seed: u64) -> Vec<usize> {
    let mut indices = Vec::with_capacity(n);
    let mut state = seed;
    for i in 0..n {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let bound = (start_len + i + 1) as u64;
        indices.push(((state >> 33) % bound) as usize);
    }
    indices
}

/// A buffer holding `0..n`, allocated with exactly `n` slots.
pub fn filled(n: u64) -> Result<StretchyBuf<u64>, BufError> {
    let mut buf = StretchyBuf::new();
    buf.reserve(n as usize)?;
    for value in 0..n {
        buf.push(value)?;
    }
    Ok(buf)
}

/// Capacities a buffer with `config` passes through while `n` elements are
/// pushed one at a time, starting from the unallocated state.
pub fn growth_trace(config: BufConfig, n: usize) -> Vec<usize> {
    let mut trace = Vec::new();
    let mut cap = 0;
    for len in 0..n {
        if len == cap {
            cap = match config.grow_target(cap, len + 1) {
                Ok(next) => next,
                Err(_) => break,
            };
            trace.push(cap);
        }
    }
    trace
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_sequence_stays_in_bounds() {
        let indices = index_sequence(3, 500, 42);
        assert_eq!(indices.len(), 500);
        for (i, &idx) in indices.iter().enumerate() {
            assert!(idx <= 3 + i, "index {idx} out of bounds at step {i}");
        }
    }

    #[test]
    fn index_sequence_deterministic() {
        assert_eq!(index_sequence(0, 64, 7), index_sequence(0, 64, 7));
        assert_ne!(index_sequence(0, 64, 7), index_sequence(0, 64, 8));
    }

    #[test]
    fn index_sequence_replays_cleanly() {
        let mut buf = filled(10).unwrap();
        for idx in index_sequence(10, 200, 1) {
            buf.insert(idx, 0).unwrap();
        }
        assert_eq!(buf.len(), 210);
    }

    #[test]
    fn filled_is_sequential() {
        let buf = filled(5).unwrap();
        assert_eq!(buf, [0, 1, 2, 3, 4]);
        assert_eq!(buf.capacity(), 5);
    }

    #[test]
    fn default_trace_matches_heuristic() {
        assert_eq!(
            growth_trace(BufConfig::default(), 200),
            vec![8, 24, 56, 120, 248]
        );
    }
}
