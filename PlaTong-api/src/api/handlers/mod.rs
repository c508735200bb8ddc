pub mod blood_pressure;
pub mod content;
pub mod health;
pub mod tutorial;

// Tests module
#[cfg(test)]
pub(crate) mod tests;

// Re-export handlers for easier imports
pub use blood_pressure::interpret_blood_pressure;
pub use content::{get_home, get_knowledge, get_stats, get_tutorial_steps};
pub use health::health_check;
pub use tutorial::{apply_command, create_session, delete_session, get_session, report_audio_event};
