//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up test environment with database
//! - Helpers for creating words and forcing review states
//!
//! # Requirements
//! Tests built with `TestContext::new` require a PostgreSQL database
//! (set DATABASE_URL env var). `TestContext::without_database` never
//! connects and only suits requests rejected before storage is touched.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use vocab_backend::config::Config;
use vocab_backend::db::Database;
use vocab_backend::models::NewWord;
use vocab_backend::{build_router, AppState};
use vocab_core::ReviewState;

/// Test context containing database connection and router.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let config = test_config();
        let db = Database::connect(&config.database_url)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        Self::from_parts(config, db)
    }

    /// Create a context whose pool never connects unless a handler queries it.
    pub fn without_database() -> Self {
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://localhost:1/unreachable".to_string()),
            _ => None,
        })
        .expect("Failed to build test config");
        let db = Database::connect_lazy(&config.database_url).expect("Failed to create lazy pool");

        Self::from_parts(config, db)
    }

    fn from_parts(config: Config, db: Database) -> Self {
        let state = AppState::new(config, db).expect("Failed to build app state");
        let db = state.db.clone();
        let app = build_router(state);
        Self { db, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Insert a word directly, bypassing the API.
    pub async fn create_test_word(&self, text: &str) -> Uuid {
        let word = self
            .db
            .insert_word(
                &NewWord {
                    word: text.to_string(),
                    definition: Some(format!("Definition of {}", text)),
                    translation: None,
                    examples: vec![],
                    collocations: vec![],
                },
                &ReviewState::default(),
            )
            .await
            .expect("Failed to create test word");
        word.id
    }

    /// Overwrite a word's review state.
    pub async fn set_review_state(
        &self,
        word_id: Uuid,
        review_stage: i32,
        next_review_date: Option<DateTime<Utc>>,
        mastered: bool,
    ) {
        sqlx::query(
            "UPDATE words SET review_stage = $2, next_review_date = $3, mastered = $4 WHERE id = $1",
        )
        .bind(word_id)
        .bind(review_stage)
        .bind(next_review_date)
        .bind(mastered)
        .execute(self.db.pool())
        .await
        .expect("Failed to set review state");
    }

    /// Clean up test words. Attempts cascade.
    pub async fn cleanup_words(&self, word_ids: &[Uuid]) {
        let _ = sqlx::query("DELETE FROM words WHERE id = ANY($1)")
            .bind(word_ids)
            .execute(self.db.pool())
            .await;
    }
}

fn test_config() -> Config {
    Config::from_env().expect("DATABASE_URL must be set for integration tests")
}
