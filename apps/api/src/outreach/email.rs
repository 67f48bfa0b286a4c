//! Personalised cold-email drafts for a scored (or unscored) profile.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SenderIdentity;
use crate::llm_client::{complete_json, ChatMessage, CompletionProvider, CompletionRequest, LlmError};
use crate::models::profile::Profile;
use crate::models::score::ScoreRecord;
use crate::outreach::prompts::{build_outreach_prompt, EMAIL_MAX_TOKENS, EMAIL_TEMPERATURE};

/// A draft ready for the user to review. `to` is the profile's email, empty when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachDraft {
    pub subject: String,
    pub body: String,
    pub to: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EmailReply {
    subject: String,
    body: String,
}

pub fn build_outreach_request(
    sender: &SenderIdentity,
    profile: &Profile,
    analysis: Option<&ScoreRecord>,
) -> CompletionRequest {
    CompletionRequest {
        system: None,
        messages: vec![ChatMessage::user(build_outreach_prompt(
            sender, profile, analysis,
        ))],
        temperature: EMAIL_TEMPERATURE,
        max_tokens: EMAIL_MAX_TOKENS,
        json_mode: true,
    }
}

/// Drafts an outreach email from `sender` to `profile`, using `analysis` for
/// personalisation when the profile has been scored.
pub async fn draft_outreach_email(
    provider: &dyn CompletionProvider,
    sender: &SenderIdentity,
    profile: &Profile,
    analysis: Option<&ScoreRecord>,
) -> Result<OutreachDraft, LlmError> {
    let request = build_outreach_request(sender, profile, analysis);
    let reply: EmailReply = complete_json(provider, &request).await?;

    info!(
        "Drafted outreach email for {} (analysis: {})",
        profile.display_name(),
        analysis.is_some()
    );

    Ok(OutreachDraft {
        subject: reply.subject.trim().to_string(),
        body: reply.body.trim().to_string(),
        to: profile.email.clone(),
    })
}
