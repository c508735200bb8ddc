use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

pub use pla_tong_data::models::content::{BpCategory, BpLevel};

/// A reading value as entered by the user: a number or free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(untagged)]
pub enum RawReading {
    /// A JSON number
    Number(f64),
    /// Text from an input field, parsed leniently
    Text(String),
}

impl From<&str> for RawReading {
    fn from(value: &str) -> Self {
        RawReading::Text(value.to_string())
    }
}

impl From<String> for RawReading {
    fn from(value: String) -> Self {
        RawReading::Text(value)
    }
}

impl From<i64> for RawReading {
    fn from(value: i64) -> Self {
        RawReading::Number(value as f64)
    }
}

/// A parsed blood pressure reading in mmHg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BpReading {
    /// Systolic blood pressure (the higher number)
    pub systolic: i64,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: i64,
}

/// Outcome of classifying a reading against the interpretation table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Classification {
    /// The reading that was classified
    pub reading: BpReading,

    /// Matched interpretation row
    pub category: BpCategory,

    /// Set only for a hypertensive crisis
    pub emergency: bool,

    /// Advisory to render prominently when `emergency` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_advisory: Option<String>,
}

impl Classification {
    pub fn level(&self) -> BpLevel {
        self.category.level
    }
}
