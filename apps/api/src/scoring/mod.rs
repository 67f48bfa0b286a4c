// Relevance Scorer: prompt construction, one LLM call per profile, reply validation.
// All LLM calls go through llm_client::CompletionProvider.

pub mod error;
pub mod funnel;
pub mod handlers;
pub mod prompts;
pub mod response;
pub mod scorer;
