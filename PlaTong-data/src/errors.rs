use thiserror::Error;
use validator::ValidationErrors;

/// Error type for loading the static site content
#[derive(Error, Debug)]
pub enum ContentError {
    /// The content file could not be read
    #[error("Content IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The content is not valid JSON or does not match the expected shape
    #[error("Content parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field-level validation rule failed
    #[error("Content validation error: {0}")]
    Validation(String),

    /// The step list is not ordered by its 1-based ids
    #[error("Step ordering error: expected step id {expected}, found {found}")]
    StepOrder { expected: u32, found: u32 },

    /// The interpretation table does not have exactly one row per level
    #[error("Interpretation table error: {0}")]
    Interpretation(String),
}

impl From<ValidationErrors> for ContentError {
    fn from(errors: ValidationErrors) -> Self {
        ContentError::Validation(errors.to_string())
    }
}

/// Error type for the remote statistics fetch
#[derive(Error, Debug)]
pub enum StatsError {
    /// No endpoint was configured
    #[error("Stats endpoint is not configured")]
    NotConfigured,

    /// Transport failure or non-success status
    #[error("Stats request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a body that is not the expected shape
    #[error("Malformed stats response: {0}")]
    Malformed(#[from] serde_json::Error),
}
