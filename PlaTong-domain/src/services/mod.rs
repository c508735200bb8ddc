// Domain services
// Classification, the measurement guide and the home page counters

pub mod audio;
pub mod classifier;
pub mod player;
pub mod stats;
pub mod tutorial;

// Re-export the types handlers work with
pub use audio::{AudioOutput, ClientNarration, PlaybackError};
pub use classifier::{categorize_blood_pressure, BpClassifier, ClassifyError, INVALID_READING_MESSAGE};
pub use player::{TutorialPlayer, SETTLE_DELAY};
pub use stats::StatsService;
pub use tutorial::{TutorialError, TutorialSession};
