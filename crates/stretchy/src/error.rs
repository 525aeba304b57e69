//! Buffer error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during buffer operations.
///
/// Capacity errors are raised before any element is moved, so a buffer that
/// returned one of these is exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BufError {
    /// The allocator could not satisfy a growth request.
    AllocFailed {
        /// Size in bytes of the block that was requested.
        requested_bytes: usize,
    },
    /// The requested element count or its byte size does not fit in `usize`
    /// (or exceeds `isize::MAX` bytes).
    CapacityOverflow {
        /// The element count that could not be represented.
        requested: usize,
    },
    /// The request is larger than the buffer's configured maximum capacity.
    CapacityExceeded {
        /// Number of elements requested.
        requested: usize,
        /// The configured maximum capacity in elements.
        max: usize,
    },
    /// An index outside the valid range was passed to an operation.
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of live elements at the time of the call.
        len: usize,
    },
    /// A [`BufConfig`](crate::BufConfig) failed validation.
    InvalidConfig {
        /// What was wrong with the configuration.
        reason: &'static str,
    },
}

impl fmt::Display for BufError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocFailed { requested_bytes } => {
                write!(f, "allocation of {requested_bytes} bytes failed")
            }
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} elements")
            }
            Self::CapacityExceeded { requested, max } => {
                write!(
                    f,
                    "buffer capacity exceeded: requested {requested} elements, max {max} elements"
                )
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid buffer config: {reason}"),
        }
    }
}

impl Error for BufError {}
