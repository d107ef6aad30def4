//! Recall judging: decides whether a learner's sentence uses the word correctly.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use vocab_core::{judge_sentence, RecallJudgment};

use crate::config::JudgeConfig;

/// Judge errors. Any of these means no verdict, so no scheduling change.
#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("network error: {0}")]
    Network(String),

    #[error("judge returned status {0}")]
    Status(u16),

    #[error("invalid judge response: {0}")]
    Parse(String),
}

/// Request body sent to a remote judge
#[derive(Debug, Serialize)]
struct JudgeRequest<'a> {
    word: &'a str,
    sentence: &'a str,
}

/// HTTP-backed judge (e.g. a language-model service)
#[derive(Debug, Clone)]
pub struct RemoteJudge {
    client: Client,
    url: String,
}

impl RemoteJudge {
    pub fn new(url: String, timeout: Duration) -> Result<Self, JudgeError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| JudgeError::Network(e.to_string()))?;
        Ok(Self { client, url })
    }

    async fn evaluate(&self, word: &str, sentence: &str) -> Result<RecallJudgment, JudgeError> {
        let resp = self
            .client
            .post(&self.url)
            .json(&JudgeRequest { word, sentence })
            .send()
            .await
            .map_err(|e| JudgeError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(JudgeError::Status(resp.status().as_u16()));
        }

        resp.json()
            .await
            .map_err(|e| JudgeError::Parse(e.to_string()))
    }
}

/// Recall judge selected from configuration
#[derive(Debug, Clone)]
pub enum Judge {
    /// Offline similarity rules
    Rules { threshold: f64 },
    Remote(RemoteJudge),
}

impl Judge {
    pub fn from_config(config: &JudgeConfig) -> Result<Self, JudgeError> {
        match &config.url {
            Some(url) => Ok(Self::Remote(RemoteJudge::new(
                url.clone(),
                Duration::from_secs(config.timeout_secs),
            )?)),
            None => Ok(Self::Rules {
                threshold: config.threshold,
            }),
        }
    }

    /// Judge identifier recorded with each attempt.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rules { .. } => "rules",
            Self::Remote(_) => "remote",
        }
    }

    pub async fn evaluate(&self, word: &str, sentence: &str) -> Result<RecallJudgment, JudgeError> {
        match self {
            Self::Rules { threshold } => Ok(judge_sentence(word, sentence, *threshold)),
            Self::Remote(remote) => remote.evaluate(word, sentence).await,
        }
    }
}
