use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use pla_tong_domain::entities::{AudioEvent, SessionSnapshot, TutorialCommand};

/// A user command for a guide session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct CommandRequest {
    pub command: TutorialCommand,
}

/// A playback change reported by the client's audio element
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct AudioEventRequest {
    pub event: AudioEvent,
}

/// A guide session and its current state
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub id: Uuid,
    pub session: SessionSnapshot,
}
