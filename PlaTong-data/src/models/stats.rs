use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Aggregate counters published by the companion service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct SiteStats {
    /// Registered LINE OA users
    #[serde(rename = "totalUsers")]
    pub total_users: u64,

    /// Blood pressure readings logged so far
    #[serde(rename = "totalBPLogs")]
    pub total_bp_logs: u64,

    /// Appointments tracked so far
    #[serde(rename = "totalAppointments")]
    pub total_appointments: u64,
}

/// Counters shown when the remote endpoint cannot be reached
pub const DEFAULT_STATS: SiteStats = SiteStats {
    total_users: 1_000,
    total_bp_logs: 5_000,
    total_appointments: 500,
};

impl Default for SiteStats {
    fn default() -> Self {
        DEFAULT_STATS
    }
}
