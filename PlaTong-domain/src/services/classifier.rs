use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::entities::blood_pressure::{BpCategory, BpLevel, BpReading, Classification, RawReading};

/// Advisory shown when a reading cannot be classified
pub const INVALID_READING_MESSAGE: &str = "กรุณากรอกค่าความดันให้ถูกต้อง";

/// Classifier errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// Non-numeric or non-positive input
    #[error("กรุณากรอกค่าความดันให้ถูกต้อง")]
    InvalidReading,

    /// The interpretation table given to the classifier lacks a level
    #[error("Interpretation table has no row for level {0}")]
    MissingCategory(BpLevel),
}

/// Parse an entered value the way a browser's `parseInt(value, 10)` would
///
/// Leading whitespace and an optional sign are accepted, then the longest
/// run of ASCII digits; anything after it is ignored. Numbers are truncated
/// toward zero.
pub fn parse_reading_value(raw: &RawReading) -> Option<i64> {
    match raw {
        RawReading::Number(value) if value.is_finite() => Some(value.trunc() as i64),
        RawReading::Number(_) => None,
        RawReading::Text(text) => parse_leading_integer(text),
    }
}

fn parse_leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_count = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return None;
    }

    // Digits only, so the one failure mode left is overflow
    let magnitude = rest[..digit_count].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Map a reading to its severity level
///
/// Checks run highest severity first and the first match wins. Anything the
/// five ranges miss resolves to Elevated, the same band as the fourth check.
pub fn categorize_blood_pressure(systolic: i64, diastolic: i64) -> BpLevel {
    if systolic > 180 || diastolic > 120 {
        BpLevel::Crisis
    } else if systolic >= 140 || diastolic >= 90 {
        BpLevel::Stage2
    } else if (130..=139).contains(&systolic) || (80..=89).contains(&diastolic) {
        BpLevel::Stage1
    } else if (120..=129).contains(&systolic) && diastolic < 80 {
        BpLevel::Elevated
    } else if systolic < 120 && diastolic < 80 {
        BpLevel::Normal
    } else {
        BpLevel::Elevated
    }
}

/// Classifies readings against an interpretation table
#[derive(Debug, Clone)]
pub struct BpClassifier {
    categories: HashMap<BpLevel, BpCategory>,
    emergency_advisory: String,
}

impl BpClassifier {
    /// Build a classifier; every level must have a row in `table`
    pub fn new(
        table: &[BpCategory],
        emergency_advisory: impl Into<String>,
    ) -> Result<Self, ClassifyError> {
        let categories: HashMap<BpLevel, BpCategory> = table
            .iter()
            .map(|row| (row.level, row.clone()))
            .collect();

        if let Some(missing) = BpLevel::ALL.iter().find(|level| !categories.contains_key(*level)) {
            return Err(ClassifyError::MissingCategory(*missing));
        }

        Ok(Self {
            categories,
            emergency_advisory: emergency_advisory.into(),
        })
    }

    /// Build a classifier from the site content
    pub fn from_content(content: &pla_tong_data::SiteContent) -> Result<Self, ClassifyError> {
        Self::new(&content.interpretation, content.emergency_advisory.clone())
    }

    /// Parse and classify a reading
    pub fn classify(
        &self,
        systolic: &RawReading,
        diastolic: &RawReading,
    ) -> Result<Classification, ClassifyError> {
        let reading = match (parse_reading_value(systolic), parse_reading_value(diastolic)) {
            (Some(sys), Some(dia)) if sys > 0 && dia > 0 => BpReading {
                systolic: sys,
                diastolic: dia,
            },
            _ => {
                debug!(?systolic, ?diastolic, "Rejected blood pressure input");
                return Err(ClassifyError::InvalidReading);
            }
        };

        Ok(self.classify_reading(reading))
    }

    /// Classify an already-parsed reading
    pub fn classify_reading(&self, reading: BpReading) -> Classification {
        let level = categorize_blood_pressure(reading.systolic, reading.diastolic);
        // `new` guarantees a row for every level
        let category = self.categories[&level].clone();
        let emergency = level.is_emergency();

        debug!(
            systolic = reading.systolic,
            diastolic = reading.diastolic,
            level = %level,
            "Classified blood pressure reading"
        );

        Classification {
            reading,
            category,
            emergency,
            emergency_advisory: emergency.then(|| self.emergency_advisory.clone()),
        }
    }
}
