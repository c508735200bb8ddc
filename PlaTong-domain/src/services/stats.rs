use std::sync::Arc;

use chrono::Utc;
use pla_tong_data::{StatsError, StatsSource, DEFAULT_STATS};
use tracing::{debug, warn};

use crate::entities::stats::{StatsOrigin, StatsSnapshot};

/// Home page counters with a built-in fallback
///
/// Without a source every call returns the default figures.
#[derive(Clone, Default)]
pub struct StatsService {
    source: Option<Arc<dyn StatsSource>>,
}

impl std::fmt::Debug for StatsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsService")
            .field("source", &self.source.as_ref().map(|s| s.describe()))
            .finish()
    }
}

impl StatsService {
    pub fn new(source: Arc<dyn StatsSource>) -> Self {
        Self {
            source: Some(source),
        }
    }

    /// A service that never calls out
    pub fn fallback_only() -> Self {
        Self::default()
    }

    pub fn is_configured(&self) -> bool {
        self.source.is_some()
    }

    /// Current counters; never fails
    pub async fn current(&self) -> StatsSnapshot {
        match self.fetch().await {
            Ok(stats) => StatsSnapshot {
                stats,
                source: StatsOrigin::Live,
                fetched_at: Utc::now(),
            },
            Err(StatsError::NotConfigured) => {
                debug!("No stats endpoint configured, using default figures");
                Self::fallback()
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch site stats, using default figures");
                Self::fallback()
            }
        }
    }

    /// Fetch from the source without falling back
    pub async fn fetch(&self) -> Result<pla_tong_data::SiteStats, StatsError> {
        match &self.source {
            Some(source) => source.fetch().await,
            None => Err(StatsError::NotConfigured),
        }
    }

    fn fallback() -> StatsSnapshot {
        StatsSnapshot {
            stats: DEFAULT_STATS,
            source: StatsOrigin::Fallback,
            fetched_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use pla_tong_data::SiteStats;

    mock! {
        Source {}

        #[async_trait]
        impl StatsSource for Source {
            async fn fetch(&self) -> Result<SiteStats, StatsError>;
            fn describe(&self) -> String;
        }
    }

    #[tokio::test]
    async fn test_live_stats_are_passed_through() {
        let mut source = MockSource::new();
        source.expect_fetch().times(1).returning(|| {
            Ok(SiteStats {
                total_users: 42,
                total_bp_logs: 420,
                total_appointments: 7,
            })
        });
        let service = StatsService::new(Arc::new(source));

        let snapshot = service.current().await;

        assert_eq!(snapshot.source, StatsOrigin::Live);
        assert_eq!(snapshot.stats.total_users, 42);
        assert_eq!(snapshot.stats.total_bp_logs, 420);
        assert_eq!(snapshot.stats.total_appointments, 7);
    }

    #[tokio::test]
    async fn test_failed_fetch_falls_back_to_defaults() {
        let mut source = MockSource::new();
        source
            .expect_fetch()
            .returning(|| Err(StatsError::Malformed(serde_json::from_str::<SiteStats>("{").unwrap_err())));
        source.expect_describe().returning(|| "mock".to_string());
        let service = StatsService::new(Arc::new(source));

        let snapshot = service.current().await;

        assert_eq!(snapshot.source, StatsOrigin::Fallback);
        assert_eq!(snapshot.stats, DEFAULT_STATS);
        assert_eq!(snapshot.stats.total_users, 1_000);
        assert_eq!(snapshot.stats.total_bp_logs, 5_000);
        assert_eq!(snapshot.stats.total_appointments, 500);
    }

    #[tokio::test]
    async fn test_unconfigured_service_uses_defaults() {
        let service = StatsService::fallback_only();
        assert!(!service.is_configured());

        let snapshot = service.current().await;
        assert_eq!(snapshot.source, StatsOrigin::Fallback);
        assert_eq!(snapshot.stats, DEFAULT_STATS);

        assert!(matches!(service.fetch().await, Err(StatsError::NotConfigured)));
    }
}
