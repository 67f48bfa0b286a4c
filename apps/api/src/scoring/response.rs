//! Scoring reply handling as three independent stages:
//! sanitize (strip fences and whitespace) → decode (JSON) → validate (field contracts).

use crate::llm_client::strip_json_fences;
use crate::models::score::{RawScoreResponse, ScoreRecord, ValidationError};
use crate::scoring::error::ScoringError;

/// Stage 1: removes surrounding markdown code fences and whitespace.
pub fn sanitize_response(raw: &str) -> &str {
    strip_json_fences(raw)
}

/// Stage 2: structured decode. Unknown fields are ignored.
pub fn decode_response(sanitized: &str) -> Result<RawScoreResponse, serde_json::Error> {
    serde_json::from_str(sanitized)
}

/// Stage 3: field-level validation into an immutable [`ScoreRecord`].
pub fn validate_response(decoded: RawScoreResponse) -> Result<ScoreRecord, ValidationError> {
    ScoreRecord::try_from(decoded)
}

/// Runs all three stages. Failures keep the untouched reply for diagnostics.
pub fn parse_score_response(raw: &str) -> Result<ScoreRecord, ScoringError> {
    let decoded = decode_response(sanitize_response(raw)).map_err(|source| ScoringError::Decode {
        source,
        raw: raw.to_string(),
    })?;

    validate_response(decoded).map_err(|source| ScoringError::Validation {
        source,
        raw: raw.to_string(),
    })
}
