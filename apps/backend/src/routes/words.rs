//! Word endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use vocab_core::{normalize_word, Scheduler};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/words
pub async fn list(State(state): State<AppState>) -> Result<Json<WordListResponse>> {
    let words = state.db.list_words().await?;
    Ok(Json(WordListResponse {
        words: words.iter().map(DbWord::to_api_word).collect(),
    }))
}

/// GET /api/words/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Word>> {
    let word = state
        .db
        .get_word(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Word not found".to_string()))?;
    Ok(Json(word.to_api_word()))
}

/// POST /api/words
/// Stores a manually entered word with a fresh review state
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateWordRequest>,
) -> Result<(StatusCode, Json<Word>)> {
    let text = normalize_word(&payload.word)
        .map_err(|_| ApiError::BadRequest("Word is required".to_string()))?;

    if state.db.find_word(&text).await?.is_some() {
        return Err(ApiError::Duplicate(format!(
            "The word \"{}\" is already in your list.",
            text
        )));
    }

    let new_word = NewWord {
        word: text,
        definition: non_blank(payload.definition),
        translation: non_blank(payload.translation),
        examples: clean_list(payload.examples),
        collocations: clean_list(payload.collocations),
    };
    let word = state
        .db
        .insert_word(&new_word, &state.scheduler.initial_state())
        .await?;

    tracing::info!("Saved word {} ({})", word.word, word.id);

    Ok((StatusCode::CREATED, Json(word.to_api_word())))
}

/// DELETE /api/words/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteWordResponse>> {
    if !state.db.delete_word(id).await? {
        return Err(ApiError::NotFound("Word not found".to_string()));
    }

    tracing::info!("Deleted word {}", id);

    Ok(Json(DeleteWordResponse {
        id,
        message: "Word removed".to_string(),
    }))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
