//! Buffer configuration parameters.

use crate::error::BufError;

/// Configuration for a buffer's capacity manager.
///
/// Controls the amortized-growth heuristic and an optional hard limit on
/// capacity. Validated when handed to a buffer; copied into it afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufConfig {
    /// Multiplier applied to the current capacity on growth.
    ///
    /// Default: 2. Must be at least 2, otherwise repeated single-element
    /// insertions stop being amortized O(1).
    pub growth_factor: usize,

    /// Constant added to the multiplied capacity on growth.
    ///
    /// Default: 8. Keeps the first few pushes into an empty buffer from
    /// reallocating one slot at a time.
    pub base_increment: usize,

    /// Largest capacity (in elements) the buffer may ever request.
    ///
    /// Default: `usize::MAX`, i.e. bounded only by what a `Layout` can
    /// describe. Requests beyond it fail with
    /// [`BufError::CapacityExceeded`].
    pub max_capacity: usize,
}

impl BufConfig {
    /// Default growth multiplier.
    pub const DEFAULT_GROWTH_FACTOR: usize = 2;

    /// Default additive growth term.
    pub const DEFAULT_BASE_INCREMENT: usize = 8;

    /// Default capacity ceiling.
    pub const DEFAULT_MAX_CAPACITY: usize = usize::MAX;

    /// Create a config with the default growth law `2 * capacity + 8`.
    pub const fn new() -> Self {
        Self {
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
            base_increment: Self::DEFAULT_BASE_INCREMENT,
            max_capacity: Self::DEFAULT_MAX_CAPACITY,
        }
    }

    /// Same config with a different capacity ceiling.
    #[must_use]
    pub const fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Check the configuration for values the growth law cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`BufError::InvalidConfig`] if `growth_factor < 2` or
    /// `max_capacity == 0`.
    pub fn validate(&self) -> Result<(), BufError> {
        if self.growth_factor < 2 {
            return Err(BufError::InvalidConfig {
                reason: "growth_factor must be at least 2",
            });
        }
        if self.max_capacity == 0 {
            return Err(BufError::InvalidConfig {
                reason: "max_capacity must be non-zero",
            });
        }
        Ok(())
    }

    /// Capacity to grow to from `current` when at least `min_capacity`
    /// slots are needed.
    ///
    /// Computes `max(growth_factor * current + base_increment, min_capacity)`.
    /// If the heuristic overflows `usize` it falls back to the exact
    /// `min_capacity`. A heuristic target above `max_capacity` is clamped
    /// to it as long as `min_capacity` itself still fits.
    ///
    /// # Errors
    ///
    /// Returns [`BufError::CapacityExceeded`] if `min_capacity` is larger
    /// than `max_capacity`.
    pub fn grow_target(&self, current: usize, min_capacity: usize) -> Result<usize, BufError> {
        if min_capacity > self.max_capacity {
            return Err(BufError::CapacityExceeded {
                requested: min_capacity,
                max: self.max_capacity,
            });
        }
        let heuristic = current
            .checked_mul(self.growth_factor)
            .and_then(|c| c.checked_add(self.base_increment))
            .unwrap_or(min_capacity);
        Ok(heuristic.max(min_capacity).min(self.max_capacity))
    }
}

impl Default for BufConfig {
    fn default() -> Self {
        Self::new()
    }
}
