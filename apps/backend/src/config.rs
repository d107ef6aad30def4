//! Environment-driven configuration

use std::fmt;

use thiserror::Error;
use vocab_core::matching::DEFAULT_THRESHOLD;
use vocab_core::scheduler::ladder::DEFAULT_INTERVALS;

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Server configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// `None` allows any origin.
    pub allowed_origin: Option<String>,
    pub review_intervals: Vec<u32>,
    pub due_limit: usize,
    pub targets_limit: usize,
    pub judge: JudgeConfig,
}

/// Recall judge settings
#[derive(Debug, Clone, PartialEq)]
pub struct JudgeConfig {
    /// Remote judge endpoint; the offline rule-based judge is used when unset.
    pub url: Option<String>,
    pub timeout_secs: u64,
    pub threshold: f64,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: 15,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"***REDACTED***")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("allowed_origin", &self.allowed_origin)
            .field("review_intervals", &self.review_intervals)
            .field("due_limit", &self.due_limit)
            .field("targets_limit", &self.targets_limit)
            .field("judge", &self.judge)
            .finish()
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let review_intervals = match get("REVIEW_INTERVALS") {
            Some(raw) => parse_intervals(&raw)?,
            None => DEFAULT_INTERVALS.to_vec(),
        };

        let judge_defaults = JudgeConfig::default();
        let judge = JudgeConfig {
            url: get("JUDGE_URL"),
            timeout_secs: parse_or("JUDGE_TIMEOUT_SECS", get("JUDGE_TIMEOUT_SECS"), judge_defaults.timeout_secs)?,
            threshold: parse_or("JUDGE_THRESHOLD", get("JUDGE_THRESHOLD"), judge_defaults.threshold)?,
        };
        if !(0.0..=1.0).contains(&judge.threshold) {
            return Err(ConfigError::Invalid {
                key: "JUDGE_THRESHOLD",
                value: judge.threshold.to_string(),
            });
        }

        Ok(Self {
            database_url,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", get("PORT"), 3000)?,
            allowed_origin: get("ALLOWED_ORIGIN").filter(|o| o != "*"),
            review_intervals,
            due_limit: parse_or("DUE_LIMIT", get("DUE_LIMIT"), 10)?,
            targets_limit: parse_or("TARGETS_LIMIT", get("TARGETS_LIMIT"), 5)?,
            judge,
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn parse_intervals(raw: &str) -> Result<Vec<u32>, ConfigError> {
    raw.split(',')
        .map(|part| {
            part.trim().parse::<u32>().map_err(|_| ConfigError::Invalid {
                key: "REVIEW_INTERVALS",
                value: raw.to_string(),
            })
        })
        .collect()
}
