//! Core types for review scheduling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a recall attempt, as judged by an external evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recall {
    Correct,
    Incorrect,
}

impl Recall {
    /// Map a pass/fail verdict to a recall outcome.
    pub fn from_bool(correct: bool) -> Self {
        if correct { Self::Correct } else { Self::Incorrect }
    }
}

/// Review state of a single learned word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReviewState {
    /// Index into the scheduler's interval table.
    pub review_stage: u32,
    /// `None` means due now (never scheduled, or legacy data).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_date: Option<DateTime<Utc>>,
    pub mastered: bool,
}

impl ReviewState {
    /// Build a state from stored values, clamping a negative stage to 0.
    pub fn from_raw_stage(
        review_stage: i64,
        next_review_date: Option<DateTime<Utc>>,
        mastered: bool,
    ) -> Self {
        let review_stage = review_stage.clamp(0, u32::MAX as i64) as u32;
        Self {
            review_stage,
            next_review_date,
            mastered,
        }
    }

    /// Whether the word should be presented for review at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.mastered && self.next_review_date.map_or(true, |due| due <= now)
    }
}

/// Anything carrying a review state that can be scheduled or bucketed.
pub trait Reviewable {
    fn review_state(&self) -> &ReviewState;
}

impl Reviewable for ReviewState {
    fn review_state(&self) -> &ReviewState {
        self
    }
}

impl<T: Reviewable + ?Sized> Reviewable for &T {
    fn review_state(&self) -> &ReviewState {
        (**self).review_state()
    }
}

/// Urgency bucket for a word, ordered from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    OverdueNow,
    Tomorrow,
    InThreeDays,
    InOneWeek,
    Mastered,
}

impl Bucket {
    /// Human-readable label for presentation.
    pub fn label(self) -> &'static str {
        match self {
            Self::OverdueNow => "Overdue/Now",
            Self::Tomorrow => "Tomorrow",
            Self::InThreeDays => "In 3 Days",
            Self::InOneWeek => "In 1 Week",
            Self::Mastered => "Mastered",
        }
    }
}
