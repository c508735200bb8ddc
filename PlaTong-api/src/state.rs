use std::sync::Arc;

use pla_tong_data::{ContentError, HttpStatsSource, SiteContent, StatsError};
use pla_tong_domain::health::{HealthService, HealthServiceTrait};
use pla_tong_domain::services::{BpClassifier, ClassifyError, ClientNarration, StatsService};
use thiserror::Error;
use tracing::info;

use crate::config::AppConfig;
use crate::sessions::SessionRegistry;

/// Errors while assembling the application state
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to load site content: {0}")]
    Content(#[from] ContentError),

    #[error("Invalid interpretation table: {0}")]
    Classifier(#[from] ClassifyError),

    #[error("Failed to create stats client: {0}")]
    Stats(#[from] StatsError),
}

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub content: Arc<SiteContent>,
    pub classifier: Arc<BpClassifier>,
    pub stats: StatsService,
    pub sessions: SessionRegistry,
    pub environment: String,
}

impl AppState {
    /// Build the state from content and a stats service
    pub fn new(
        content: Arc<SiteContent>,
        stats: StatsService,
        session_limit: usize,
        environment: impl Into<String>,
    ) -> Result<Self, StateError> {
        let classifier = Arc::new(BpClassifier::from_content(&content)?);
        let narration = Arc::new(ClientNarration::for_steps(&content.steps));
        let sessions = SessionRegistry::new(content.steps.clone().into(), narration, session_limit);

        Ok(Self {
            content,
            classifier,
            stats,
            sessions,
            environment: environment.into(),
        })
    }

    /// Build the state described by `config`
    pub fn from_config(config: &AppConfig) -> Result<Self, StateError> {
        let content = match &config.content_path {
            Some(path) => SiteContent::load_from_path(path)?,
            None => SiteContent::embedded()?.clone(),
        };

        let stats = match &config.stats_url {
            Some(url) => {
                info!(endpoint = %url, "Stats endpoint configured");
                StatsService::new(Arc::new(HttpStatsSource::new(url.clone(), config.stats_timeout)?))
            }
            None => {
                info!("No stats endpoint configured, home page shows default figures");
                StatsService::fallback_only()
            }
        };

        let mut state = Self::new(
            Arc::new(content),
            stats,
            config.session_limit,
            config.environment.clone(),
        )?;
        state.sessions = state.sessions.with_idle_timeout(config.session_idle_timeout);
        Ok(state)
    }

    /// Health service over this state's content and stats
    pub fn health_service(&self) -> Arc<dyn HealthServiceTrait + Send + Sync> {
        Arc::new(HealthService::new(self.content.clone(), self.stats.clone()))
    }
}
