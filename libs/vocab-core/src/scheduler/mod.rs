//! Review scheduling.

pub mod ladder;

use crate::types::{Recall, ReviewState};
use chrono::{DateTime, Utc};

/// Result of scheduling a word after a recall attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulingResult {
    pub new_state: ReviewState,
    /// `None` once the word is mastered.
    pub next_due: Option<DateTime<Utc>>,
    /// True only on the attempt that moved the word into `mastered`.
    pub newly_mastered: bool,
}

/// Trait for review schedulers.
///
/// Implementations are pure: the caller supplies `now` and persists the
/// returned state itself.
pub trait Scheduler: Send + Sync {
    /// Scheduler identifier.
    fn name(&self) -> &'static str;

    /// Calculate the next review state after a recall attempt.
    fn advance(&self, state: &ReviewState, recall: Recall, now: DateTime<Utc>) -> SchedulingResult;

    /// Initial state for a newly stored word.
    fn initial_state(&self) -> ReviewState {
        ReviewState::default()
    }
}
