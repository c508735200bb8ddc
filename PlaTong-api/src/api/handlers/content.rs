use axum::{extract::State, Json};
use tracing::{debug, instrument};

use pla_tong_domain::entities::{StatsSnapshot, Step};

use crate::entities::content::{HomeResponse, KnowledgeResponse};
use crate::state::AppState;

/// Home page content with the current counters
#[utoipa::path(
    get,
    path = "/api/v1/home",
    responses(
        (status = 200, description = "Home page content", body = HomeResponse),
    ),
    tag = "content"
)]
#[instrument(skip(state))]
pub async fn get_home(State(state): State<AppState>) -> Json<HomeResponse> {
    let stats = state.stats.current().await;
    let content = &state.content;
    debug!(source = ?stats.source, "Serving home page");

    Json(HomeResponse {
        stats,
        about: content.about.clone(),
        features: content.features.clone(),
        reviews: content.reviews.clone(),
        demo_slides: content.demo_slides.clone(),
        links: content.links.clone(),
    })
}

/// Aggregate counters; falls back to the default figures
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    responses(
        (status = 200, description = "Current counters", body = StatsSnapshot),
    ),
    tag = "content"
)]
#[instrument(skip(state))]
pub async fn get_stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.stats.current().await)
}

/// Knowledge page content
#[utoipa::path(
    get,
    path = "/api/v1/knowledge",
    responses(
        (status = 200, description = "Knowledge page content", body = KnowledgeResponse),
    ),
    tag = "content"
)]
#[instrument(skip(state))]
pub async fn get_knowledge(State(state): State<AppState>) -> Json<KnowledgeResponse> {
    let content = &state.content;
    Json(KnowledgeResponse {
        interpretation: content.interpretation.clone(),
        tips: content.tips.clone(),
        notes: content.notes.clone(),
        emergency_advisory: content.emergency_advisory.clone(),
        links: content.links.clone(),
    })
}

/// Steps of the measurement guide
#[utoipa::path(
    get,
    path = "/api/v1/tutorial/steps",
    responses(
        (status = 200, description = "Guide steps in order", body = [Step]),
    ),
    tag = "tutorial"
)]
#[instrument(skip(state))]
pub async fn get_tutorial_steps(State(state): State<AppState>) -> Json<Vec<Step>> {
    Json(state.content.steps.clone())
}
