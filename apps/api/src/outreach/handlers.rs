//! Axum route handlers for profile chat and outreach drafting.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::models::score::ScoreRecord;
use crate::outreach::chat::{chat_with_profile, HistoryTurn};
use crate::outreach::email::{draft_outreach_email, OutreachDraft};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub profile: Profile,
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct OutreachRequest {
    pub profile: Profile,
    #[serde(default)]
    pub analysis: Option<ScoreRecord>,
}

/// POST /api/v1/profiles/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let reply = chat_with_profile(
        state.provider.as_ref(),
        &request.profile,
        request.message.trim(),
        &request.history,
    )
    .await?;

    Ok(Json(ChatResponse { reply }))
}

/// POST /api/v1/profiles/outreach
///
/// Requires SENDER_NAME and COMPANY_NAME to be configured.
pub async fn handle_outreach(
    State(state): State<AppState>,
    Json(request): Json<OutreachRequest>,
) -> Result<Json<OutreachDraft>, AppError> {
    let sender = state.config.sender.as_ref().ok_or_else(|| {
        AppError::NotConfigured(
            "outreach sender is not configured; set SENDER_NAME and COMPANY_NAME".to_string(),
        )
    })?;

    let draft = draft_outreach_email(
        state.provider.as_ref(),
        sender,
        &request.profile,
        request.analysis.as_ref(),
    )
    .await?;

    Ok(Json(draft))
}
