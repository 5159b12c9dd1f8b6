#![forbid(unsafe_code)]

//! Input array generation.
//!
//! This is the only place randomness enters a run. Executors are
//! deterministic, so a seeded generator reproduces an entire visualization.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::element::Value;
use crate::error::{ModelError, Result};

/// Arrangement of generated values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ArrayShape {
    /// Uniformly random values.
    #[default]
    Random,
    /// Random values in descending order.
    Reversed,
    /// Sorted, then a few adjacent pairs swapped.
    NearlySorted,
}

/// Build an RNG from an optional seed; `None` seeds from the OS.
#[must_use]
pub fn rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

/// `len` values drawn uniformly from `min..=max`.
pub fn random_values<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    min: Value,
    max: Value,
) -> Result<Vec<Value>> {
    if min > max {
        return Err(ModelError::InvalidRange { min, max });
    }
    Ok((0..len).map(|_| rng.random_range(min..=max)).collect())
}

/// `len` values in `min..=max` arranged according to `shape`.
pub fn shaped_values<R: Rng + ?Sized>(
    rng: &mut R,
    shape: ArrayShape,
    len: usize,
    min: Value,
    max: Value,
) -> Result<Vec<Value>> {
    let mut values = random_values(rng, len, min, max)?;
    match shape {
        ArrayShape::Random => {}
        ArrayShape::Reversed => values.sort_unstable_by(|a, b| b.cmp(a)),
        ArrayShape::NearlySorted => {
            values.sort_unstable();
            let disturbances = (len / 10).max(1);
            for _ in 0..disturbances {
                if len < 2 {
                    break;
                }
                let i = rng.random_range(0..len - 1);
                values.swap(i, i + 1);
            }
        }
    }
    Ok(values)
}

/// Shuffle `values` in place.
pub fn shuffle<R: Rng + ?Sized>(rng: &mut R, values: &mut [Value]) {
    values.shuffle(rng);
}
