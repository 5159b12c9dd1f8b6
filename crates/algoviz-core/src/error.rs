#![forbid(unsafe_code)]

//! Errors raised by the array model and algorithm registry.

use thiserror::Error;

/// Result alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Failures of array-model mutations and lookups.
///
/// Every fallible mutation validates its indices before touching the
/// sequence, so an `Err` always leaves the model exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A mutation addressed a position outside `0..len`.
    #[error("index {index} out of range for array of length {len}")]
    OutOfRange { index: usize, len: usize },

    /// An algorithm name did not match any registered executor.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// A value range for array generation was empty.
    #[error("invalid value range: min {min} exceeds max {max}")]
    InvalidRange { min: i64, max: i64 },
}

impl ModelError {
    #[must_use]
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_index_and_len() {
        let err = ModelError::out_of_range(7, 3);
        assert_eq!(err.to_string(), "index 7 out of range for array of length 3");
    }

    #[test]
    fn unknown_algorithm_message() {
        let err = ModelError::UnknownAlgorithm("bogo".into());
        assert_eq!(err.to_string(), "unknown algorithm: bogo");
    }
}
