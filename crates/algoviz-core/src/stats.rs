#![forbid(unsafe_code)]

//! Per-run operation counters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Counters for the current run. Monotonically non-decreasing until reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stats {
    pub comparisons: u64,
    pub swaps: u64,
    /// Relocations that are not pairwise swaps (merge sort's in-place merge).
    pub writes: u64,
}

impl Stats {
    /// All counters at zero.
    pub const ZERO: Self = Self {
        comparisons: 0,
        swaps: 0,
        writes: 0,
    };

    pub fn reset(&mut self) {
        *self = Self::ZERO;
    }
}
