// PlaTong Data
// This crate holds the static site content and talks to external services

// Error types for content loading and remote fetches
pub mod errors;

// Data models
pub mod models;

// Loading and validation of the bundled site content
pub mod content;

// Remote statistics client
pub mod stats;

// Re-export commonly used types
pub use errors::{ContentError, StatsError};
pub use models::{SiteContent, SiteStats, Step, DEFAULT_STATS};
pub use stats::{HttpStatsSource, StatsSource};
