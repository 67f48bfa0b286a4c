use thiserror::Error;

use crate::llm_client::LlmError;
use crate::models::score::ValidationError;

/// Why one profile could not be scored. Reported per profile; never turned into a score.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("LLM provider call failed: {0}")]
    Provider(#[from] LlmError),

    #[error("scoring response is not valid JSON: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    #[error("scoring response failed validation: {source}")]
    Validation {
        #[source]
        source: ValidationError,
        raw: String,
    },
}

impl ScoringError {
    /// Stable tag for API consumers: `provider`, `decode` or `validation`.
    pub fn kind(&self) -> &'static str {
        match self {
            ScoringError::Provider(_) => "provider",
            ScoringError::Decode { .. } => "decode",
            ScoringError::Validation { .. } => "validation",
        }
    }

    /// The model's raw reply, when one was received.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            ScoringError::Provider(_) => None,
            ScoringError::Decode { raw, .. } | ScoringError::Validation { raw, .. } => Some(raw),
        }
    }
}
