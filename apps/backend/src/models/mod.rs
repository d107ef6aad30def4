//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from vocab-core
pub use vocab_core::{Bucket, BucketCounts, Recall, RecallJudgment, ReviewState, Reviewable};

// === Database Entity Types ===

/// Word stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbWord {
    pub id: Uuid,
    pub word: String,
    pub definition: Option<String>,
    pub translation: Option<String>,
    pub examples: Vec<String>,
    pub collocations: Vec<String>,
    pub review_stage: i32,
    pub next_review_date: Option<DateTime<Utc>>,
    pub mastered: bool,
    pub created_at: DateTime<Utc>,
}

impl DbWord {
    /// Review state as seen by the scheduler (negative stages clamp to 0)
    pub fn review_state(&self) -> ReviewState {
        ReviewState::from_raw_stage(
            self.review_stage as i64,
            self.next_review_date,
            self.mastered,
        )
    }

    /// Convert to API word type
    pub fn to_api_word(&self) -> Word {
        Word {
            id: self.id,
            word: self.word.clone(),
            definition: self.definition.clone(),
            translation: self.translation.clone(),
            examples: self.examples.clone(),
            collocations: self.collocations.clone(),
            created_at: self.created_at,
            state: self.review_state(),
        }
    }
}

/// Recall attempt record, written in the same transaction as the new state
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRecallAttempt {
    pub id: Uuid,
    pub word_id: Uuid,
    pub attempted_at: DateTime<Utc>,
    pub answer: String,
    pub is_correct: bool,
    pub feedback: String,
    pub judge: String,
    pub stage_before: i32,
    pub stage_after: i32,
    pub next_review_before: Option<DateTime<Utc>>,
    pub next_review_after: Option<DateTime<Utc>>,
    pub mastered_after: bool,
}

/// Fields for a new word row
#[derive(Debug, Clone)]
pub struct NewWord {
    pub word: String,
    pub definition: Option<String>,
    pub translation: Option<String>,
    pub examples: Vec<String>,
    pub collocations: Vec<String>,
}

/// Convert a scheduler stage to its column value
pub fn stage_to_db(stage: u32) -> i32 {
    i32::try_from(stage).unwrap_or(i32::MAX)
}

// === API Types ===

/// Word with its review state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    pub id: Uuid,
    pub word: String,
    pub definition: Option<String>,
    pub translation: Option<String>,
    pub examples: Vec<String>,
    pub collocations: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub state: ReviewState,
}

impl Reviewable for Word {
    fn review_state(&self) -> &ReviewState {
        &self.state
    }
}

impl Word {
    pub fn summary(&self) -> WordSummary {
        WordSummary {
            id: self.id,
            word: self.word.clone(),
            definition: self.definition.clone(),
            next_review_date: self.state.next_review_date,
        }
    }
}

/// Word as listed in review sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSummary {
    pub id: Uuid,
    pub word: String,
    pub definition: Option<String>,
    pub next_review_date: Option<DateTime<Utc>>,
}

// Word types
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateWordRequest {
    pub word: String,
    pub definition: Option<String>,
    pub translation: Option<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub collocations: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordListResponse {
    pub words: Vec<Word>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteWordResponse {
    pub id: Uuid,
    pub message: String,
}

// Review types
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DueWordsResponse {
    pub words: Vec<WordSummary>,
    /// Due words beyond the returned cap
    pub remaining: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BucketGroup {
    pub bucket: Bucket,
    pub label: String,
    pub words: Vec<WordSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BucketsResponse {
    pub buckets: Vec<BucketGroup>,
    pub counts: BucketCounts,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PracticeTargetsResponse {
    pub words: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CheckRecallRequest {
    #[serde(default)]
    pub sentence: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckRecallResponse {
    pub is_correct: bool,
    pub feedback: String,
    pub word_id: Uuid,
    pub review_stage: u32,
    pub next_review_date: Option<DateTime<Utc>>,
    pub mastered: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecallHistoryResponse {
    pub attempts: Vec<DbRecallAttempt>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn db_word(review_stage: i32) -> DbWord {
        DbWord {
            id: Uuid::nil(),
            word: "Serene".to_string(),
            definition: Some("Calm and peaceful.".to_string()),
            translation: None,
            examples: vec!["The lake was serene.".to_string()],
            collocations: vec![],
            review_stage,
            next_review_date: Some(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()),
            mastered: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_negative_stage_clamped_on_read() {
        assert_eq!(db_word(-2).review_state().review_stage, 0);
        assert_eq!(db_word(3).review_state().review_stage, 3);
    }

    #[test]
    fn test_summary_fields() {
        let word = db_word(1).to_api_word();
        let summary = word.summary();
        assert_eq!(summary.word, "Serene");
        assert_eq!(summary.next_review_date, word.state.next_review_date);
    }

    #[test]
    fn test_word_serializes_state_inline() {
        let json = serde_json::to_value(db_word(2).to_api_word()).unwrap();
        assert_eq!(json["review_stage"], 2);
        assert_eq!(json["mastered"], false);
        assert!(json.get("state").is_none());
    }

    #[test]
    fn test_stage_to_db_saturates() {
        assert_eq!(stage_to_db(4), 4);
        assert_eq!(stage_to_db(u32::MAX), i32::MAX);
    }
}
