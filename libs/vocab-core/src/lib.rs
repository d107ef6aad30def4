//! Core review scheduling library shared by the vocabulary backend.
//!
//! Provides:
//! - Stage-ladder scheduler that advances or regresses a word's review state
//! - Bucketizer that classifies words by review urgency
//! - Rule-based recall judging (Levenshtein similarity)
//! - Shared types (ReviewState, Recall, Bucket, etc.)

pub mod bucket;
pub mod error;
pub mod matching;
pub mod scheduler;
pub mod types;
pub mod word;

pub use bucket::{bucketize, days_until, due_now, practice_targets, BucketCounts};
pub use error::{CoreError, Result};
pub use matching::{judge_sentence, levenshtein_distance, normalized_similarity, RecallJudgment};
pub use scheduler::{ladder::StageLadder, Scheduler, SchedulingResult};
pub use types::{Bucket, Recall, ReviewState, Reviewable};
pub use word::normalize_word;
