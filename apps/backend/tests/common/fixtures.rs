//! Test fixtures and factory functions for creating test data.

use serde_json::json;
use uuid::Uuid;

/// Generate a unique, title-cased test word to avoid collisions.
pub fn unique_word(prefix: &str) -> String {
    format!("{}{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}

/// Create a word request body with manual context.
pub fn create_word_request(word: &str) -> serde_json::Value {
    json!({
        "word": word,
        "definition": "A word used in tests.",
        "translation": "",
        "examples": ["An example sentence.", "  "],
    })
}

/// Create a check-recall request body.
pub fn check_request(sentence: &str) -> serde_json::Value {
    json!({ "sentence": sentence })
}

/// A sentence the rule-based judge accepts for `word`.
pub fn good_sentence(word: &str) -> String {
    format!("Yesterday the {} surprised everyone.", word.to_lowercase())
}

/// A sentence the rule-based judge rejects for any test word.
pub fn bad_sentence() -> String {
    "I went to the market yesterday.".to_string()
}
