use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Chat-completion backend. `LlmClient` in production, scripted fakes in tests.
    pub provider: Arc<dyn CompletionProvider>,
    pub config: Config,
}
