//! Axum route handler for batch relevance scoring.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::filters::FilterSet;
use crate::models::profile::Profile;
use crate::models::score::ScoreRecord;
use crate::scoring::error::ScoringError;
use crate::scoring::funnel::{
    leads_from_outcomes, ranked_indices, segment_leads, write_csv, FunnelCounts, Lead, Segment,
};
use crate::scoring::scorer::{score_batch, BatchSummary, ProfileOutcome, MAX_SELECTED_PROFILES};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub filters: FilterSet,
    pub profiles: Vec<Profile>,
    /// Overrides the configured concurrency for this batch.
    #[serde(default)]
    pub concurrency: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Scored,
    Failed,
}

#[derive(Debug, Serialize)]
pub struct ScoringErrorBody {
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl From<&ScoringError> for ScoringErrorBody {
    fn from(err: &ScoringError) -> Self {
        ScoringErrorBody {
            kind: err.kind(),
            message: err.to_string(),
            raw_response: err.raw_response().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScoredProfile {
    pub index: usize,
    pub name: String,
    pub linkedin_url: String,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ScoringErrorBody>,
}

impl From<ProfileOutcome> for ScoredProfile {
    fn from(outcome: ProfileOutcome) -> Self {
        let (status, score, error) = match outcome.result {
            Ok(record) => (OutcomeStatus::Scored, Some(record), None),
            Err(ref e) => (OutcomeStatus::Failed, None, Some(ScoringErrorBody::from(e))),
        };
        ScoredProfile {
            index: outcome.index,
            name: outcome.name,
            linkedin_url: outcome.linkedin_url,
            status,
            score,
            error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub summary: BatchSummary,
    pub funnel: FunnelCounts,
    /// Indices into `results`, highest relevance score first; failed profiles rank last.
    pub ranking: Vec<usize>,
    pub results: Vec<ScoredProfile>,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    /// Scored profiles as returned by a scoring batch, in any order.
    pub leads: Vec<Lead>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/profiles/score
///
/// Scores 1 to 25 profiles. Individual failures are reported per profile and never
/// fail the request.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    if request.profiles.is_empty() {
        return Err(AppError::Validation(
            "profiles cannot be empty".to_string(),
        ));
    }
    if request.profiles.len() > MAX_SELECTED_PROFILES {
        return Err(AppError::Validation(format!(
            "at most {MAX_SELECTED_PROFILES} profiles can be scored at once, got {}",
            request.profiles.len()
        )));
    }

    let concurrency = request
        .concurrency
        .unwrap_or(state.config.scoring_concurrency)
        .clamp(1, MAX_SELECTED_PROFILES);

    let outcomes = score_batch(
        state.provider.as_ref(),
        &request.query,
        &request.filters,
        &request.profiles,
        concurrency,
    )
    .await;

    let summary = BatchSummary::from_outcomes(&outcomes);
    let leads = leads_from_outcomes(&request.profiles, &outcomes);
    let funnel = FunnelCounts::from_leads(&leads);
    let ranking = ranked_indices(&leads);
    let results = outcomes.into_iter().map(ScoredProfile::from).collect();

    Ok(Json(ScoreResponse {
        summary,
        funnel,
        ranking,
        results,
    }))
}

/// POST /api/v1/profiles/export/:segment
///
/// `segment` is `all`, `with-email` or `warm`. Returns the segment, ranked by score,
/// as a CSV attachment. An empty segment yields the header row only.
pub async fn handle_export(
    Path(segment): Path<String>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let segment: Segment = segment.parse().map_err(AppError::NotFound)?;
    let total = request.leads.len();
    let leads = segment_leads(request.leads, segment);
    let body = write_csv(&leads)?;

    info!(
        "Exported {} of {} leads as {}",
        leads.len(),
        total,
        segment.file_name()
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", segment.file_name()),
            ),
        ],
        body,
    )
        .into_response())
}
