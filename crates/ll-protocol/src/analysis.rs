use serde::{Deserialize, Serialize};

/// Response envelope for analysis requests.
///
/// Every outcome, successful or not, is reported in this shape; failures
/// carry a human-readable diagnostic in `analysis`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub success: bool,
    pub analysis: String,
}

impl AnalysisResult {
    pub fn success(analysis: impl Into<String>) -> Self {
        Self {
            success: true,
            analysis: analysis.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            analysis: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_success() {
        let result = AnalysisResult::success("## Root cause\nOut of memory");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["analysis"], "## Root cause\nOut of memory");
    }

    #[test]
    fn serialize_failure_has_exactly_two_fields() {
        let result = AnalysisResult::failure("Log not found");
        let json = serde_json::to_value(&result).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(json["success"], false);
        assert_eq!(json["analysis"], "Log not found");
    }

    #[test]
    fn deserialize_envelope() {
        let result: AnalysisResult =
            serde_json::from_str(r#"{"success": false, "analysis": "boom"}"#).unwrap();
        assert_eq!(result, AnalysisResult::failure("boom"));
    }
}
