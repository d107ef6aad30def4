//! Rule-based recall judging for sentence practice.
//!
//! Used when no remote judge is available: a sentence passes when it uses
//! the target word (allowing small typos) in something longer than a
//! fragment.

use serde::{Deserialize, Serialize};

/// Default similarity a token needs to count as the target word.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Shortest sentence, in words, accepted as real usage.
pub const MIN_SENTENCE_WORDS: usize = 3;

/// Pass/fail verdict with feedback for the learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecallJudgment {
    pub is_correct: bool,
    pub feedback: String,
}

/// Judge whether `sentence` uses `word`.
pub fn judge_sentence(word: &str, sentence: &str, threshold: f64) -> RecallJudgment {
    let target = word.trim().to_lowercase();
    let tokens: Vec<String> = sentence
        .split_whitespace()
        .map(|t| {
            t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-')
                .to_lowercase()
        })
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.len() < MIN_SENTENCE_WORDS {
        return RecallJudgment {
            is_correct: false,
            feedback: format!(
                "Write a full sentence of at least {} words using \"{}\".",
                MIN_SENTENCE_WORDS,
                word.trim()
            ),
        };
    }

    let best = tokens
        .iter()
        .map(|t| token_similarity(&target, t))
        .fold(0.0_f64, f64::max);

    if best >= 1.0 {
        RecallJudgment {
            is_correct: true,
            feedback: format!("Nice, \"{}\" is used in a complete sentence.", word.trim()),
        }
    } else if best >= threshold {
        RecallJudgment {
            is_correct: true,
            feedback: format!("Good sentence. Check the spelling of \"{}\".", word.trim()),
        }
    } else {
        RecallJudgment {
            is_correct: false,
            feedback: format!("The sentence does not use \"{}\".", word.trim()),
        }
    }
}

/// Similarity of a sentence token to the target, accepting simple
/// inflections ("run" matches "runs", "running").
fn token_similarity(target: &str, token: &str) -> f64 {
    if token == target {
        return 1.0;
    }
    if target.chars().count() >= 3 && token.starts_with(target) {
        let suffix = &token[target.len()..];
        if matches!(suffix, "s" | "es" | "ed" | "d" | "ing" | "ly" | "er" | "est") {
            return 1.0;
        }
    }
    normalized_similarity(target, token)
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rolling rows instead of the full matrix
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Normalized similarity (0.0 to 1.0) based on Levenshtein distance.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - (levenshtein_distance(a, b) as f64 / max_len as f64)
}
