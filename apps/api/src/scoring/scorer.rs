//! Relevance scoring. One independent LLM call per profile, run concurrently with a
//! caller-supplied bound.
//!
//! Flow per batch: build_system_prompt (once) → for each profile, build_scoring_request →
//! provider.complete → parse_score_response. Nothing is shared between calls except
//! read-only inputs, so one failure never affects another profile's result.

use std::sync::Arc;

use futures::stream::{self, Stream, StreamExt};
use tracing::{info, warn};
use uuid::Uuid;

use crate::llm_client::CompletionProvider;
use crate::models::filters::FilterSet;
use crate::models::profile::Profile;
use crate::models::score::ScoreRecord;
use crate::scoring::error::ScoringError;
use crate::scoring::prompts::{build_scoring_request, build_system_prompt};
use crate::scoring::response::parse_score_response;

/// Upper bound on how many profiles a caller may submit for scoring at once.
pub const MAX_SELECTED_PROFILES: usize = 25;

async fn score_with_system(
    provider: &dyn CompletionProvider,
    system_prompt: &str,
    profile: &Profile,
) -> Result<ScoreRecord, ScoringError> {
    let request = build_scoring_request(system_prompt, profile);
    let raw = provider.complete(&request).await?;
    parse_score_response(&raw)
}

/// Scores a single profile against `query` and `filters`.
pub async fn score_profile(
    provider: &dyn CompletionProvider,
    query: &str,
    filters: &FilterSet,
    profile: &Profile,
) -> Result<ScoreRecord, ScoringError> {
    let system_prompt = build_system_prompt(query, filters);
    score_with_system(provider, &system_prompt, profile).await
}

/// Yields `(input_index, result)` pairs as scoring calls complete, with at most
/// `concurrency` calls in flight (values below 1 are treated as 1).
///
/// Dropping the stream cancels whatever is still in flight; completed results are unaffected.
pub fn score_stream<'a>(
    provider: &'a dyn CompletionProvider,
    query: &str,
    filters: &FilterSet,
    profiles: &'a [Profile],
    concurrency: usize,
) -> impl Stream<Item = (usize, Result<ScoreRecord, ScoringError>)> + 'a {
    let system_prompt: Arc<str> = build_system_prompt(query, filters).into();

    stream::iter(profiles.iter().enumerate())
        .map(move |(index, profile)| {
            let system_prompt = Arc::clone(&system_prompt);
            async move {
                let result = score_with_system(provider, &system_prompt, profile).await;
                (index, result)
            }
        })
        .buffer_unordered(concurrency.max(1))
}

/// Outcome for one profile of a batch.
#[derive(Debug)]
pub struct ProfileOutcome {
    pub index: usize,
    pub name: String,
    pub linkedin_url: String,
    pub result: Result<ScoreRecord, ScoringError>,
}

/// Counts over a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub scored: usize,
    pub failed: usize,
    /// Scored profiles at or above the warm-lead threshold.
    pub warm_leads: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[ProfileOutcome]) -> Self {
        let mut summary = BatchSummary {
            total: outcomes.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            match &outcome.result {
                Ok(record) => {
                    summary.scored += 1;
                    if record.is_warm() {
                        summary.warm_leads += 1;
                    }
                }
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }
}

/// Scores every profile and returns one outcome per profile, in input order.
pub async fn score_batch(
    provider: &dyn CompletionProvider,
    query: &str,
    filters: &FilterSet,
    profiles: &[Profile],
    concurrency: usize,
) -> Vec<ProfileOutcome> {
    let batch_id = Uuid::new_v4();
    info!(
        "Scoring batch {}: {} profiles, concurrency {}",
        batch_id,
        profiles.len(),
        concurrency.max(1)
    );

    let mut outcomes: Vec<ProfileOutcome> =
        score_stream(provider, query, filters, profiles, concurrency)
            .map(|(index, result)| {
                let profile = &profiles[index];
                match &result {
                    Ok(record) => info!(
                        "[batch {}] scored {}/{} {} -> {}",
                        batch_id,
                        index + 1,
                        profiles.len(),
                        profile.display_name(),
                        record.relevance_score()
                    ),
                    Err(e) => warn!(
                        "[batch {}] failed {}/{} {} ({}): {}",
                        batch_id,
                        index + 1,
                        profiles.len(),
                        profile.display_name(),
                        e.kind(),
                        e
                    ),
                }
                ProfileOutcome {
                    index,
                    name: profile.name.clone(),
                    linkedin_url: profile.linkedin_url.clone(),
                    result,
                }
            })
            .collect()
            .await;

    outcomes.sort_by_key(|o| o.index);

    let summary = BatchSummary::from_outcomes(&outcomes);
    info!(
        "Scoring batch {} complete: {} scored, {} failed, {} warm",
        batch_id, summary.scored, summary.failed, summary.warm_leads
    );

    outcomes
}
