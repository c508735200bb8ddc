use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

pub use pla_tong_data::models::content::Step;

/// Where a guide session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum TutorialPhase {
    /// Intro screen, waiting for the user to start
    NotStarted,
    /// Walking through the steps
    InProgress,
    /// Past the last step
    Finished,
}

/// User commands accepted by a guide session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum TutorialCommand {
    Start,
    Next,
    Previous,
    Restart,
    ToggleTimer,
    ToggleAudio,
}

/// Playback state changes reported by the audio device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum AudioEvent {
    Played,
    Paused,
    Ended,
    /// Playback could not start (autoplay blocked, resource missing)
    Failed,
}

/// Read-only view of a guide session for the rendering layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct SessionSnapshot {
    pub phase: TutorialPhase,

    /// True once the user has started and not yet finished
    pub started: bool,

    /// True after advancing past the last step
    pub finished: bool,

    /// Zero-based index of the current step
    pub current_index: usize,

    /// Number of steps in the guide
    pub step_count: usize,

    /// The step at `current_index`
    pub step: Step,

    /// Seconds left on the countdown; absent when the step has no timer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_remaining: Option<u32>,

    pub timer_running: bool,

    /// The countdown has reached zero
    pub timer_complete: bool,

    pub audio_playing: bool,
}
