// Testing utilities and mock implementations for the domain layer
// This module is only available in tests or when the "mock" feature is enabled

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use pla_tong_data::{SiteStats, StatsError, StatsSource};

use crate::entities::tutorial::Step;
use crate::health::{ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth};
use crate::services::audio::{AudioOutput, PlaybackError};

/// Audio output that records every request and always succeeds
#[derive(Debug, Default)]
pub struct RecordingAudioOutput {
    played: Mutex<Vec<String>>,
    pauses: AtomicUsize,
}

impl RecordingAudioOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sources handed to `play`, oldest first
    pub fn played(&self) -> Vec<String> {
        self.played.lock().unwrap().clone()
    }

    pub fn pause_count(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AudioOutput for RecordingAudioOutput {
    async fn play(&self, source: &str) -> Result<(), PlaybackError> {
        self.played.lock().unwrap().push(source.to_string());
        Ok(())
    }

    async fn pause(&self) -> Result<(), PlaybackError> {
        self.pauses.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Stats source that always returns the same counters
#[derive(Debug, Clone, Copy)]
pub struct FixedStatsSource {
    stats: SiteStats,
}

impl FixedStatsSource {
    pub fn new(stats: SiteStats) -> Self {
        Self { stats }
    }
}

#[async_trait]
impl StatsSource for FixedStatsSource {
    async fn fetch(&self) -> Result<SiteStats, StatsError> {
        Ok(self.stats)
    }

    fn describe(&self) -> String {
        "fixed".to_string()
    }
}

/// Stats source whose endpoint is never reachable
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStatsSource;

#[async_trait]
impl StatsSource for FailingStatsSource {
    async fn fetch(&self) -> Result<SiteStats, StatsError> {
        // Any parse failure will do; the caller only sees an error
        let err = serde_json::from_str::<SiteStats>("not json").unwrap_err();
        Err(StatsError::Malformed(err))
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

/// A short guide: narrated intro, a timed step, a silent closing step
pub fn sample_steps() -> Vec<Step> {
    let step = |id: u32, timer: Option<u32>, audio: Option<&str>| Step {
        id,
        title: format!("Step {}", id),
        content: format!("Content for step {}", id),
        points: vec![],
        timer,
        audio: audio.map(String::from),
        image: None,
        link: None,
        link_text: None,
    };

    vec![
        step(1, None, Some("/audio/step-1.mp3")),
        step(2, Some(5), Some("/audio/step-2.mp3")),
        step(3, None, None),
    ]
}

/// Mock implementation of health services for testing system health
#[derive(Debug)]
pub struct MockHealthService {
    components: HashMap<String, HealthComponent>,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    /// Create a new mock health service with all components healthy
    pub fn new() -> Self {
        let components = vec![
            ("content".to_string(), HealthComponent::healthy()),
            ("stats".to_string(), HealthComponent::healthy()),
        ]
        .into_iter()
        .collect();
        Self { components }
    }

    /// Configure the mock with an unreachable stats endpoint
    pub fn with_degraded_stats(self) -> Self {
        self.with_component(
            "stats",
            ComponentStatus::Degraded,
            Some("Stats endpoint unreachable".to_string()),
        )
    }

    /// Configure the mock with unusable content
    pub fn with_unhealthy_content(self) -> Self {
        self.with_component(
            "content",
            ComponentStatus::Unhealthy,
            Some("Content failed validation".to_string()),
        )
    }

    /// Add or replace a component with a specific status
    pub fn with_component(
        mut self,
        name: &str,
        status: ComponentStatus,
        details: Option<String>,
    ) -> Self {
        self.components
            .insert(name.to_string(), HealthComponent { status, details });
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        SystemHealth::from_components(self.components.clone())
    }
}
