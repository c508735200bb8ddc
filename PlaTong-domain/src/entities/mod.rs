// Domain entities and value objects
pub mod blood_pressure;
pub mod stats;
pub mod tutorial;

// Re-export common types for easier imports
pub use blood_pressure::{BpCategory, BpLevel, BpReading, Classification, RawReading};
pub use stats::{SiteStats, StatsOrigin, StatsSnapshot};
pub use tutorial::{AudioEvent, SessionSnapshot, Step, TutorialCommand, TutorialPhase};
