pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::outreach::handlers as outreach;
use crate::scoring::handlers as scoring;
use crate::search::handlers as search;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Local stages
        .route("/api/v1/profiles/import", post(search::handle_import))
        .route("/api/v1/profiles/filter", post(search::handle_filter))
        // LLM-backed stages
        .route("/api/v1/profiles/score", post(scoring::handle_score))
        .route(
            "/api/v1/profiles/export/:segment",
            post(scoring::handle_export),
        )
        .route("/api/v1/profiles/chat", post(outreach::handle_chat))
        .route("/api/v1/profiles/outreach", post(outreach::handle_outreach))
        .with_state(state)
}
