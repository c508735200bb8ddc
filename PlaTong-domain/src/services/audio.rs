use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::entities::tutorial::Step;

/// Narration playback errors
///
/// None of these are fatal; the player shows a paused state instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The device refused to start playback without a user gesture
    #[error("Playback blocked: {0}")]
    Blocked(String),

    /// The audio reference does not resolve to a playable resource
    #[error("Audio resource not found: {0}")]
    MissingResource(String),

    /// Any other device failure
    #[error("Audio device error: {0}")]
    Device(String),
}

/// The playback device narration is sent to
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AudioOutput: Send + Sync {
    /// Start or resume playing `source`
    async fn play(&self, source: &str) -> Result<(), PlaybackError>;

    /// Pause whatever is playing
    async fn pause(&self) -> Result<(), PlaybackError>;
}

/// Server-side stand-in for the browser's audio element
///
/// The browser does the actual playback and reports the outcome back as
/// audio events. This output only accepts references that belong to the
/// guide, so a typo in the content shows up as a missing resource.
#[derive(Debug, Clone, Default)]
pub struct ClientNarration {
    known_sources: HashSet<String>,
}

impl ClientNarration {
    pub fn for_steps(steps: &[Step]) -> Self {
        let known_sources = steps.iter().filter_map(|step| step.audio.clone()).collect();
        Self { known_sources }
    }
}

#[async_trait]
impl AudioOutput for ClientNarration {
    async fn play(&self, source: &str) -> Result<(), PlaybackError> {
        if !self.known_sources.contains(source) {
            return Err(PlaybackError::MissingResource(source.to_string()));
        }
        debug!(source, "Narration handed to client");
        Ok(())
    }

    async fn pause(&self) -> Result<(), PlaybackError> {
        Ok(())
    }
}
