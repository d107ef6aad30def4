//! PostgreSQL database operations

use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

const WORD_COLUMNS: &str = "id, word, definition, translation, examples, collocations, \
                            review_stage, next_review_date, mastered, created_at";

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a pool that connects on first use
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Database(e.into()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Word Repository ===

    /// All words, newest first
    pub async fn list_words(&self) -> Result<Vec<DbWord>> {
        let words = sqlx::query_as::<_, DbWord>(&format!(
            "SELECT {WORD_COLUMNS} FROM words ORDER BY created_at DESC, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(words)
    }

    /// Get word by ID
    pub async fn get_word(&self, word_id: Uuid) -> Result<Option<DbWord>> {
        let word = sqlx::query_as::<_, DbWord>(&format!(
            "SELECT {WORD_COLUMNS} FROM words WHERE id = $1"
        ))
        .bind(word_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(word)
    }

    /// Find word by its normalized text
    pub async fn find_word(&self, text: &str) -> Result<Option<DbWord>> {
        let word = sqlx::query_as::<_, DbWord>(&format!(
            "SELECT {WORD_COLUMNS} FROM words WHERE word = $1"
        ))
        .bind(text)
        .fetch_optional(&self.pool)
        .await?;

        Ok(word)
    }

    /// Insert a word with the scheduler's initial state
    pub async fn insert_word(&self, word: &NewWord, state: &ReviewState) -> Result<DbWord> {
        let inserted = sqlx::query_as::<_, DbWord>(&format!(
            r#"
            INSERT INTO words (id, word, definition, translation, examples, collocations,
                               review_stage, next_review_date, mastered)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {WORD_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&word.word)
        .bind(&word.definition)
        .bind(&word.translation)
        .bind(&word.examples)
        .bind(&word.collocations)
        .bind(stage_to_db(state.review_stage))
        .bind(state.next_review_date)
        .bind(state.mastered)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return ApiError::Duplicate(format!(
                        "The word \"{}\" is already in your list.",
                        word.word
                    ));
                }
            }
            ApiError::Database(e)
        })?;

        Ok(inserted)
    }

    /// Delete a word and its attempt history
    pub async fn delete_word(&self, word_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM words WHERE id = $1")
            .bind(word_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // === Review Repository ===

    /// Persist a scheduling decision together with the attempt that produced it.
    ///
    /// The update only applies if the stored state still equals `before`;
    /// otherwise another attempt won the race and nothing is written.
    pub async fn apply_recall(
        &self,
        word_id: Uuid,
        before: &ReviewState,
        after: &ReviewState,
        attempt: &DbRecallAttempt,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE words
            SET review_stage = $2, next_review_date = $3, mastered = $4
            WHERE id = $1
              AND review_stage = $5
              AND next_review_date IS NOT DISTINCT FROM $6
              AND mastered = $7
            "#,
        )
        .bind(word_id)
        .bind(stage_to_db(after.review_stage))
        .bind(after.next_review_date)
        .bind(after.mastered)
        .bind(stage_to_db(before.review_stage))
        .bind(before.next_review_date)
        .bind(before.mastered)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(ApiError::Conflict(
                "Word was reviewed concurrently, reload and try again".to_string(),
            ));
        }

        sqlx::query(
            r#"
            INSERT INTO recall_attempts (id, word_id, attempted_at, answer, is_correct, feedback,
                                         judge, stage_before, stage_after, next_review_before,
                                         next_review_after, mastered_after)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(attempt.id)
        .bind(attempt.word_id)
        .bind(attempt.attempted_at)
        .bind(&attempt.answer)
        .bind(attempt.is_correct)
        .bind(&attempt.feedback)
        .bind(&attempt.judge)
        .bind(attempt.stage_before)
        .bind(attempt.stage_after)
        .bind(attempt.next_review_before)
        .bind(attempt.next_review_after)
        .bind(attempt.mastered_after)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Most recent recall attempts for a word
    pub async fn get_recall_attempts(&self, word_id: Uuid, limit: i64) -> Result<Vec<DbRecallAttempt>> {
        let attempts = sqlx::query_as::<_, DbRecallAttempt>(
            r#"
            SELECT id, word_id, attempted_at, answer, is_correct, feedback, judge,
                   stage_before, stage_after, next_review_before, next_review_after, mastered_after
            FROM recall_attempts
            WHERE word_id = $1
            ORDER BY attempted_at DESC
            LIMIT $2
            "#,
        )
        .bind(word_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(attempts)
    }
}
