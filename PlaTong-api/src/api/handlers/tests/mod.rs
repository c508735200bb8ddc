// Handler tests that call the handler functions directly

use std::sync::Arc;

use pla_tong_data::SiteContent;
use pla_tong_domain::services::StatsService;

use crate::state::AppState;

mod blood_pressure_test;

/// State over the bundled content with no stats endpoint
pub(crate) fn test_state() -> AppState {
    test_state_with(StatsService::fallback_only(), 10)
}

pub(crate) fn test_state_with(stats: StatsService, session_limit: usize) -> AppState {
    let content = Arc::new(SiteContent::embedded().unwrap().clone());
    AppState::new(content, stats, session_limit, "test").unwrap()
}

/// Collect a response body as JSON
pub(crate) async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
