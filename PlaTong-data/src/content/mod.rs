//! Static site content
//!
//! The site's copy, guide steps and interpretation table are shipped as JSON.
//! The bundled copy is compiled into the binary; a deployment may point at a
//! replacement file instead. Either way the content is validated once on load
//! and treated as immutable afterwards.

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::OnceCell;
use tracing::{debug, info};
use validator::Validate;

use crate::errors::ContentError;
use crate::models::content::{BpCategory, BpLevel, SiteContent, Step};

const EMBEDDED_JSON: &str = include_str!("site.json");

static EMBEDDED: OnceCell<SiteContent> = OnceCell::new();

impl SiteContent {
    /// The content bundled with the binary, parsed on first use
    pub fn embedded() -> Result<&'static SiteContent, ContentError> {
        EMBEDDED.get_or_try_init(|| {
            debug!("Parsing embedded site content");
            Self::from_json(EMBEDDED_JSON)
        })
    }

    /// Load content from a JSON file on disk
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        info!("Loading site content from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse and validate content from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let content: SiteContent = serde_json::from_str(json)?;
        content.check()?;
        debug!(
            steps = content.steps.len(),
            tips = content.tips.len(),
            "Site content validated"
        );
        Ok(content)
    }

    /// Run field rules plus the cross-item invariants
    pub fn check(&self) -> Result<(), ContentError> {
        self.validate()?;
        check_step_order(&self.steps)?;
        check_interpretation_table(&self.interpretation)?;
        Ok(())
    }

    /// Interpretation row for a level
    pub fn category(&self, level: BpLevel) -> Option<&BpCategory> {
        self.interpretation.iter().find(|row| row.level == level)
    }
}

fn check_step_order(steps: &[Step]) -> Result<(), ContentError> {
    if steps.is_empty() {
        return Err(ContentError::Validation(
            "steps: the guide needs at least one step".to_string(),
        ));
    }

    for (position, step) in steps.iter().enumerate() {
        let expected = position as u32 + 1;
        if step.id != expected {
            return Err(ContentError::StepOrder {
                expected,
                found: step.id,
            });
        }
    }

    Ok(())
}

fn check_interpretation_table(rows: &[BpCategory]) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for row in rows {
        if !seen.insert(row.level) {
            return Err(ContentError::Interpretation(format!(
                "level {} appears more than once",
                row.level
            )));
        }
    }

    if let Some(missing) = BpLevel::ALL.iter().find(|level| !seen.contains(*level)) {
        return Err(ContentError::Interpretation(format!(
            "no row for level {}",
            missing
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedded_value() -> serde_json::Value {
        serde_json::from_str(EMBEDDED_JSON).unwrap()
    }

    #[test]
    fn test_embedded_content_loads() {
        let content = SiteContent::embedded().expect("embedded content should be valid");

        assert!(!content.steps.is_empty());
        assert_eq!(content.interpretation.len(), BpLevel::ALL.len());
        assert!(content.emergency_advisory.contains("1669"));
        assert!(content.links.line_oa.starts_with("https://"));
    }

    #[test]
    fn test_embedded_steps_have_positive_timers() {
        let content = SiteContent::embedded().unwrap();
        let timed: Vec<&Step> = content.steps.iter().filter(|s| s.timer.is_some()).collect();

        assert!(!timed.is_empty(), "the guide should contain at least one timed step");
        assert!(timed.iter().all(|s| s.timer.unwrap() > 0));
    }

    #[test]
    fn test_category_lookup() {
        let content = SiteContent::embedded().unwrap();
        let crisis = content.category(BpLevel::Crisis).unwrap();
        assert_eq!(crisis.level, BpLevel::Crisis);
        assert_eq!(crisis.label, "วิกฤต");
    }

    #[test]
    fn test_zero_timer_is_rejected() {
        let mut value = embedded_value();
        value["steps"][1]["timer"] = serde_json::json!(0);

        let result = SiteContent::from_json(&value.to_string());
        assert!(matches!(result, Err(ContentError::Validation(_))));
    }

    #[test]
    fn test_non_contiguous_step_ids_are_rejected() {
        let mut value = embedded_value();
        value["steps"][2]["id"] = serde_json::json!(9);

        match SiteContent::from_json(&value.to_string()) {
            Err(ContentError::StepOrder { expected, found }) => {
                assert_eq!(expected, 3);
                assert_eq!(found, 9);
            }
            other => panic!("expected a step order error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_step_list_is_rejected() {
        let mut value = embedded_value();
        value["steps"] = serde_json::json!([]);

        let result = SiteContent::from_json(&value.to_string());
        assert!(matches!(result, Err(ContentError::Validation(_))));
    }

    #[test]
    fn test_duplicate_interpretation_level_is_rejected() {
        let mut value = embedded_value();
        value["interpretation"][1]["level"] = serde_json::json!("normal");

        let result = SiteContent::from_json(&value.to_string());
        assert!(matches!(result, Err(ContentError::Interpretation(_))));
    }

    #[test]
    fn test_missing_interpretation_level_is_rejected() {
        let mut value = embedded_value();
        value["interpretation"]
            .as_array_mut()
            .unwrap()
            .retain(|row| row["level"] != "crisis");

        let err = SiteContent::from_json(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("Hypertensive Crisis"));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let result = SiteContent::from_json("{ not json");
        assert!(matches!(result, Err(ContentError::Parse(_))));
    }

    #[test]
    fn test_load_from_missing_path() {
        let result = SiteContent::load_from_path("/definitely/not/here/site.json");
        assert!(matches!(result, Err(ContentError::Io(_))));
    }
}
