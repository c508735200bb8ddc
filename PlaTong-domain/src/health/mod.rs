//! Domain layer health check functionality
//! Reports whether the site content is usable and the stats endpoint reachable

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use pla_tong_data::{SiteContent, StatsError};
use tracing::debug;

use crate::services::stats::StatsService;

/// System health status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the site still works
    Degraded,
    /// The site cannot serve its content
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    pub status: ComponentStatus,
    pub details: Option<String>,
}

impl HealthComponent {
    pub fn healthy() -> Self {
        Self {
            status: ComponentStatus::Healthy,
            details: None,
        }
    }

    pub fn with_details(status: ComponentStatus, details: impl Into<String>) -> Self {
        Self {
            status,
            details: Some(details.into()),
        }
    }
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

impl SystemHealth {
    /// Derive the overall status from the worst component
    pub fn from_components(components: HashMap<String, HealthComponent>) -> Self {
        let status = if components
            .values()
            .any(|c| c.status == ComponentStatus::Unhealthy)
        {
            SystemStatus::Unhealthy
        } else if components
            .values()
            .any(|c| c.status == ComponentStatus::Degraded)
        {
            SystemStatus::Degraded
        } else {
            SystemStatus::Healthy
        };

        Self { status, components }
    }
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;
}

/// Checks the loaded content and the remote stats endpoint
#[derive(Debug, Clone)]
pub struct HealthService {
    content: Arc<SiteContent>,
    stats: StatsService,
}

impl HealthService {
    pub fn new(content: Arc<SiteContent>, stats: StatsService) -> Self {
        Self { content, stats }
    }

    fn check_content(&self) -> HealthComponent {
        match self.content.check() {
            Ok(()) => HealthComponent::healthy(),
            Err(e) => HealthComponent::with_details(ComponentStatus::Unhealthy, e.to_string()),
        }
    }

    async fn check_stats(&self) -> HealthComponent {
        match self.stats.fetch().await {
            Ok(_) => HealthComponent::healthy(),
            Err(StatsError::NotConfigured) => HealthComponent {
                status: ComponentStatus::Healthy,
                details: Some("No endpoint configured, serving default figures".to_string()),
            },
            // The home page still renders with the default figures
            Err(e) => HealthComponent::with_details(ComponentStatus::Degraded, e.to_string()),
        }
    }
}

#[async_trait]
impl HealthServiceTrait for HealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let components: HashMap<String, HealthComponent> = vec![
            ("content".to_string(), self.check_content()),
            ("stats".to_string(), self.check_stats().await),
        ]
        .into_iter()
        .collect();

        let health = SystemHealth::from_components(components);
        debug!(status = ?health.status, "Computed system health");
        health
    }
}
