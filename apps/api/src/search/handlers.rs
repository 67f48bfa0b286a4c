//! Axum route handlers for the local search stages. Neither touches the LLM.

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::search::boolean_query::{filter_profiles, BooleanQuery, FilterOutcome};
use crate::search::normalize::parse_profiles;

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    /// Raw dataset items, exactly as the profile scraper emits them.
    pub items: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub profiles: Vec<Profile>,
    /// Items dropped as duplicates of an earlier profile URL.
    pub duplicates_removed: usize,
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub query: String,
    pub profiles: Vec<Profile>,
}

#[derive(Debug, Serialize)]
pub struct FilterResponse {
    pub query: BooleanQuery,
    #[serde(flatten)]
    pub outcome: FilterOutcome,
}

/// POST /api/v1/profiles/import
pub async fn handle_import(
    Json(request): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, AppError> {
    let total = request.items.len();
    let profiles = parse_profiles(&request.items);

    Ok(Json(ImportResponse {
        duplicates_removed: total - profiles.len(),
        profiles,
    }))
}

/// POST /api/v1/profiles/filter
///
/// An empty query keeps every profile.
pub async fn handle_filter(
    Json(request): Json<FilterRequest>,
) -> Result<Json<FilterResponse>, AppError> {
    let query = BooleanQuery::parse(&request.query);
    let outcome = filter_profiles(request.profiles, &request.query);

    Ok(Json(FilterResponse { query, outcome }))
}
