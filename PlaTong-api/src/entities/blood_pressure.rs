use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use pla_tong_domain::entities::RawReading;

/// Request payload for interpreting a reading
///
/// Both values may be sent as numbers or as the raw text of an input field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InterpretRequest {
    /// Systolic blood pressure (the higher number)
    pub systolic: RawReading,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: RawReading,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_text_and_numbers() {
        let request: InterpretRequest =
            serde_json::from_str(r#"{"systolic": "135", "diastolic": 85}"#).unwrap();
        assert_eq!(request.systolic, RawReading::Text("135".to_string()));
        assert_eq!(request.diastolic, RawReading::Number(85.0));
    }
}
