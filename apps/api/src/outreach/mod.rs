// Outreach: conversational Q&A about a single profile and personalised cold-email drafts.
// Both build on the same profile rendering as scoring but are free-text generation tasks,
// so they run at higher temperatures than the deterministic scoring call.

pub mod chat;
pub mod email;
pub mod handlers;
pub mod prompts;
