//! Fixed stage-ladder scheduler.
//!
//! Each correct recall climbs one rung of an escalating interval table;
//! an incorrect recall drops one rung and retries tomorrow. Answering
//! correctly past the last rung masters the word.

use super::{Scheduler, SchedulingResult};
use crate::error::{CoreError, Result};
use crate::types::{Recall, ReviewState};
use chrono::{DateTime, Duration, Utc};

/// Default day offsets indexed by review stage.
pub const DEFAULT_INTERVALS: [u32; 5] = [1, 3, 7, 14, 30];

/// Retry delay after an incorrect recall, regardless of stage.
pub const RETRY_DAYS: i64 = 1;

/// Longest accepted interval, about a century.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// Stage-ladder scheduler with a configurable interval table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageLadder {
    intervals_days: Vec<u32>,
}

impl Default for StageLadder {
    fn default() -> Self {
        Self {
            intervals_days: DEFAULT_INTERVALS.to_vec(),
        }
    }
}

impl StageLadder {
    /// Build a ladder from a custom interval table.
    pub fn new(intervals_days: Vec<u32>) -> Result<Self> {
        if intervals_days.is_empty() {
            return Err(CoreError::EmptyIntervals);
        }
        if let Some(stage) = intervals_days.iter().position(|&d| d == 0) {
            return Err(CoreError::ZeroInterval { stage });
        }
        if let Some(stage) = intervals_days.iter().position(|&d| d > MAX_INTERVAL_DAYS) {
            return Err(CoreError::IntervalTooLarge {
                stage,
                max: MAX_INTERVAL_DAYS,
            });
        }
        Ok(Self { intervals_days })
    }

    pub fn intervals_days(&self) -> &[u32] {
        &self.intervals_days
    }

    /// Stage at which the next correct answer masters the word.
    pub fn graduation_stage(&self) -> u32 {
        self.intervals_days.len() as u32
    }

    fn on_correct(&self, stage: u32, now: DateTime<Utc>) -> SchedulingResult {
        match self.intervals_days.get(stage as usize) {
            Some(&days) => {
                let next_due = days_after(now, days as i64);
                SchedulingResult {
                    new_state: ReviewState {
                        review_stage: stage + 1,
                        next_review_date: Some(next_due),
                        mastered: false,
                    },
                    next_due: Some(next_due),
                    newly_mastered: false,
                }
            }
            None => SchedulingResult {
                new_state: ReviewState {
                    review_stage: stage.saturating_add(1),
                    next_review_date: None,
                    mastered: true,
                },
                next_due: None,
                newly_mastered: true,
            },
        }
    }

    fn on_incorrect(&self, stage: u32, now: DateTime<Utc>) -> SchedulingResult {
        let next_due = days_after(now, RETRY_DAYS);
        SchedulingResult {
            new_state: ReviewState {
                review_stage: stage.saturating_sub(1),
                next_review_date: Some(next_due),
                mastered: false,
            },
            next_due: Some(next_due),
            newly_mastered: false,
        }
    }
}

/// `now` plus whole days, pinned to the latest representable instant.
fn days_after(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now.checked_add_signed(Duration::days(days))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

impl Scheduler for StageLadder {
    fn name(&self) -> &'static str {
        "stage_ladder"
    }

    fn advance(&self, state: &ReviewState, recall: Recall, now: DateTime<Utc>) -> SchedulingResult {
        // Mastered is absorbing; callers are expected to filter these out.
        if state.mastered {
            return SchedulingResult {
                new_state: ReviewState {
                    next_review_date: None,
                    ..state.clone()
                },
                next_due: None,
                newly_mastered: false,
            };
        }

        match recall {
            Recall::Correct => self.on_correct(state.review_stage, now),
            Recall::Incorrect => self.on_incorrect(state.review_stage, now),
        }
    }
}
