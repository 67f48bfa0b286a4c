#![allow(dead_code)]

//! Score Record: the validated result of one relevance-scoring call.
//!
//! A `ScoreRecord` can only be built by validating a [`RawScoreResponse`], which is how
//! the invariants hold everywhere a record exists: score in `0..=100`, a known activity
//! level, at most three key topics. Deserializing a record goes through the same path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const MAX_RELEVANCE_SCORE: i64 = 100;
pub const MAX_KEY_TOPICS: usize = 3;
/// Scores at or above this are treated as warm leads.
pub const WARM_LEAD_THRESHOLD: u8 = 60;

/// How often the member posts, as judged by the LLM from their recent posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ActivityLevel {
    High,
    Medium,
    Low,
    Inactive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::High => "High",
            ActivityLevel::Medium => "Medium",
            ActivityLevel::Low => "Low",
            ActivityLevel::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(ActivityLevel::High),
            "medium" => Ok(ActivityLevel::Medium),
            "low" => Ok(ActivityLevel::Low),
            "inactive" => Ok(ActivityLevel::Inactive),
            _ => Err(ValidationError::UnknownActivityLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for ActivityLevel {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Field-level contract violations in an LLM scoring reply.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("relevance_score is not an integer: {0}")]
    ScoreNotInteger(String),

    #[error("relevance_score {0} is outside 0-100")]
    ScoreOutOfRange(i64),

    #[error("unknown activity_level {0:?} (expected High, Medium, Low or Inactive)")]
    UnknownActivityLevel(String),
}

/// The scoring reply exactly as decoded, before any field is trusted.
///
/// Everything is optional here; LLMs occasionally send `null` for a list or quote a
/// number, and that is for validation to judge, not for decoding to choke on.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawScoreResponse {
    pub relevance_score: Option<Value>,
    pub activity_level: Option<String>,
    pub key_topics: Option<Vec<String>>,
    pub areas_of_interest: Option<Vec<String>>,
    pub recent_activity_summary: Option<String>,
    pub engagement_metrics: Option<String>,
    pub recommendation: Option<String>,
    pub reasoning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScoreResponse")]
pub struct ScoreRecord {
    relevance_score: u8,
    activity_level: ActivityLevel,
    key_topics: Vec<String>,
    areas_of_interest: Vec<String>,
    recent_activity_summary: String,
    engagement_metrics: String,
    recommendation: String,
    reasoning: String,
}

impl ScoreRecord {
    pub fn relevance_score(&self) -> u8 {
        self.relevance_score
    }

    pub fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }

    pub fn key_topics(&self) -> &[String] {
        &self.key_topics
    }

    pub fn areas_of_interest(&self) -> &[String] {
        &self.areas_of_interest
    }

    pub fn recent_activity_summary(&self) -> &str {
        &self.recent_activity_summary
    }

    pub fn engagement_metrics(&self) -> &str {
        &self.engagement_metrics
    }

    pub fn recommendation(&self) -> &str {
        &self.recommendation
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn is_warm(&self) -> bool {
        self.relevance_score >= WARM_LEAD_THRESHOLD
    }
}

impl TryFrom<RawScoreResponse> for ScoreRecord {
    type Error = ValidationError;

    fn try_from(raw: RawScoreResponse) -> Result<Self, Self::Error> {
        let score_value = raw
            .relevance_score
            .ok_or(ValidationError::MissingField("relevance_score"))?;
        let relevance_score = coerce_score(&score_value)?;

        let activity_level = raw
            .activity_level
            .ok_or(ValidationError::MissingField("activity_level"))?
            .parse::<ActivityLevel>()?;

        let mut key_topics = clean_list(raw.key_topics);
        key_topics.truncate(MAX_KEY_TOPICS);

        Ok(ScoreRecord {
            relevance_score,
            activity_level,
            key_topics,
            areas_of_interest: clean_list(raw.areas_of_interest),
            recent_activity_summary: clean_text(raw.recent_activity_summary),
            engagement_metrics: clean_text(raw.engagement_metrics),
            recommendation: clean_text(raw.recommendation),
            reasoning: clean_text(raw.reasoning),
        })
    }
}

/// Accepts a JSON integer, an integral float (`85.0`) or a numeric string (`"85"`).
/// Fractions and anything outside `0..=100` are rejected, never clamped.
fn coerce_score(value: &Value) -> Result<u8, ValidationError> {
    let score = match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i,
            None => integral_f64(n.as_f64(), value)?,
        },
        Value::String(s) => {
            let trimmed = s.trim();
            match trimmed.parse::<i64>() {
                Ok(i) => i,
                Err(_) => integral_f64(trimmed.parse::<f64>().ok(), value)?,
            }
        }
        other => return Err(ValidationError::ScoreNotInteger(other.to_string())),
    };

    if !(0..=MAX_RELEVANCE_SCORE).contains(&score) {
        return Err(ValidationError::ScoreOutOfRange(score));
    }
    u8::try_from(score).map_err(|_| ValidationError::ScoreOutOfRange(score))
}

fn integral_f64(f: Option<f64>, original: &Value) -> Result<i64, ValidationError> {
    match f {
        Some(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
        _ => Err(ValidationError::ScoreNotInteger(original.to_string())),
    }
}

fn clean_list(values: Option<Vec<String>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

fn clean_text(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}
