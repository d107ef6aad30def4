//! Review session endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use vocab_core::{bucketize, due_now, practice_targets, Scheduler};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

const HISTORY_LIMIT: i64 = 50;

async fn load_words(state: &AppState) -> Result<Vec<Word>> {
    let words = state.db.list_words().await?;
    Ok(words.iter().map(DbWord::to_api_word).collect())
}

/// GET /api/review/due
pub async fn due(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<DueWordsResponse>> {
    let now = Utc::now();
    let limit = query.limit.unwrap_or(state.config.due_limit);
    let words = load_words(&state).await?;

    let due = due_now(&words, now);
    let remaining = due.len().saturating_sub(limit);

    Ok(Json(DueWordsResponse {
        words: due.into_iter().take(limit).map(Word::summary).collect(),
        remaining,
    }))
}

/// GET /api/review/buckets
pub async fn buckets(State(state): State<AppState>) -> Result<Json<BucketsResponse>> {
    let now = Utc::now();
    let words = load_words(&state).await?;

    let buckets = bucketize(&words, now)
        .into_iter()
        .map(|(bucket, members)| BucketGroup {
            bucket,
            label: bucket.label().to_string(),
            words: members.into_iter().map(Word::summary).collect(),
        })
        .collect();

    let counts = BucketCounts::tally(&words, now);
    Ok(Json(BucketsResponse {
        buckets,
        counts,
        total: counts.total(),
    }))
}

/// GET /api/review/targets
/// Overdue words to practice in a story or roleplay
pub async fn targets(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<PracticeTargetsResponse>> {
    let now = Utc::now();
    let limit = query.limit.unwrap_or(state.config.targets_limit);
    let words = load_words(&state).await?;

    Ok(Json(PracticeTargetsResponse {
        words: practice_targets(&words, now, limit)
            .into_iter()
            .map(|w| w.word.clone())
            .collect(),
    }))
}

/// POST /api/review/:id/check
/// Judges a sentence, advances the schedule and stores both atomically
pub async fn check(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CheckRecallRequest>,
) -> Result<Json<CheckRecallResponse>> {
    let sentence = payload.sentence.trim();
    if sentence.is_empty() {
        return Err(ApiError::BadRequest("Sentence is required".to_string()));
    }

    let word = state
        .db
        .get_word(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Word not found".to_string()))?;

    let before = word.review_state();
    if before.mastered {
        return Err(ApiError::BadRequest(format!(
            "\"{}\" is already mastered",
            word.word
        )));
    }

    let judgment = state
        .judge
        .evaluate(&word.word, sentence)
        .await
        .map_err(|e| {
            tracing::warn!("Recall judge failed for {}: {}", word.id, e);
            ApiError::JudgeUnavailable(e.to_string())
        })?;

    let now = Utc::now();
    let result = state
        .scheduler
        .advance(&before, Recall::from_bool(judgment.is_correct), now);

    let attempt = DbRecallAttempt {
        id: Uuid::new_v4(),
        word_id: word.id,
        attempted_at: now,
        answer: sentence.to_string(),
        is_correct: judgment.is_correct,
        feedback: judgment.feedback.clone(),
        judge: state.judge.name().to_string(),
        stage_before: stage_to_db(before.review_stage),
        stage_after: stage_to_db(result.new_state.review_stage),
        next_review_before: before.next_review_date,
        next_review_after: result.new_state.next_review_date,
        mastered_after: result.new_state.mastered,
    };
    state
        .db
        .apply_recall(word.id, &before, &result.new_state, &attempt)
        .await?;

    if result.newly_mastered {
        tracing::info!("Word {} ({}) mastered", word.word, word.id);
    } else {
        tracing::debug!(
            "Word {} moved to stage {} (correct: {})",
            word.id,
            result.new_state.review_stage,
            judgment.is_correct
        );
    }

    Ok(Json(CheckRecallResponse {
        is_correct: judgment.is_correct,
        feedback: judgment.feedback,
        word_id: word.id,
        review_stage: result.new_state.review_stage,
        next_review_date: result.new_state.next_review_date,
        mastered: result.new_state.mastered,
    }))
}

/// GET /api/review/:id/history
pub async fn history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecallHistoryResponse>> {
    if state.db.get_word(id).await?.is_none() {
        return Err(ApiError::NotFound("Word not found".to_string()));
    }
    let attempts = state.db.get_recall_attempts(id, HISTORY_LIMIT).await?;
    Ok(Json(RecallHistoryResponse { attempts }))
}
