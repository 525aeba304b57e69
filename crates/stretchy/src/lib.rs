//! A growable contiguous buffer with an explicit capacity manager.
//!
//! [`StretchyBuf<T, A>`] stores `len` live elements in a single block that
//! can hold `capacity` of them. All mutating operations are expressed in
//! terms of two primitives plus an overlap-safe element move:
//!
//! - [`ensure_capacity`](StretchyBuf::ensure_capacity): reallocate to an
//!   exact capacity if the current one is too small, preserving contents.
//! - [`grow`](StretchyBuf::grow): pick a target with the amortized law
//!   `max(2 * capacity + 8, min_capacity)` and ensure it.
//!
//! # Architecture
//!
//! ```text
//! StretchyBuf<T, A>
//! ├── buffer   accessors, capacity manager, release / Drop
//! ├── ops      push, insert, append_range, insert_range, remove, pop, ...
//! ├── raw      block (re)allocation and element moves (unsafe lives here)
//! ├── alloc    BlockAllocator: reallocate + release (Global, Tracking<A>)
//! └── config   BufConfig: growth factor, base increment, max capacity
//! ```
//!
//! # Errors instead of aborts
//!
//! Allocation failure, capacity limits and out-of-range indices are all
//! reported as [`BufError`]. A failed growth never frees the old block, so
//! the buffer is still intact afterwards.
//!
//! ```
//! use stretchy::{BufError, StretchyBuf};
//!
//! let mut buf = StretchyBuf::new();
//! buf.push(1.0f32)?;
//! buf.push(2.0)?;
//! buf.push(3.0)?;
//! buf.insert(1, 4.0)?;
//! assert_eq!(buf, [1.0, 4.0, 2.0, 3.0]);
//!
//! assert_eq!(
//!     buf.remove(9),
//!     Err(BufError::IndexOutOfBounds { index: 9, len: 4 })
//! );
//! # Ok::<(), BufError>(())
//! ```
//!
//! # Threading
//!
//! A buffer has exactly one owner and does no internal synchronisation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod alloc;
pub mod buffer;
pub mod config;
pub mod error;
pub mod iter;
mod macros;
mod ops;
mod raw;
mod traits;

// Public re-exports for the primary API surface.
pub use alloc::{AllocStats, BlockAllocator, Global, Tracking};
pub use buffer::StretchyBuf;
pub use config::BufConfig;
pub use error::BufError;
pub use iter::IntoIter;
