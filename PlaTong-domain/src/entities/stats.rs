use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

pub use pla_tong_data::models::stats::SiteStats;

/// Whether counters came from the remote endpoint or the built-in defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum StatsOrigin {
    Live,
    Fallback,
}

/// Counters together with where they came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct StatsSnapshot {
    pub stats: SiteStats,
    pub source: StatsOrigin,
    pub fetched_at: DateTime<Utc>,
}
