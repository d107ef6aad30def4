//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised when building scheduler configuration or normalizing input.
///
/// Scheduling itself never fails; these only cover values supplied from
/// configuration or user-entered text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("interval table is empty")]
    EmptyIntervals,

    #[error("interval at stage {stage} must be at least one day")]
    ZeroInterval { stage: usize },

    #[error("interval at stage {stage} exceeds {max} days")]
    IntervalTooLarge { stage: usize, max: u32 },

    #[error("word is empty")]
    EmptyWord,
}
