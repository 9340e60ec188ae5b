use crate::engine::Diagnosis;
use serde::Serialize;

/// Prediction string reported when no fracture is detected.
pub const NORMAL_PREDICTION: &str = "normal, no fracture detected";

/// Prediction string reported for a detected fracture.
pub const FRACTURED_PREDICTION: &str = "fractured";

/// Stable caller-facing record for one diagnosis.
///
/// `body_part` is present only for fractured results and is omitted from
/// the serialized form otherwise. No other transformation of the diagnosis
/// happens here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisRecord {
    pub prediction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_part: Option<String>,
}

impl From<&Diagnosis> for DiagnosisRecord {
    fn from(diagnosis: &Diagnosis) -> Self {
        match diagnosis {
            Diagnosis::Normal => Self {
                prediction: NORMAL_PREDICTION.to_string(),
                body_part: None,
            },
            Diagnosis::Fractured { body_part, .. } => Self {
                prediction: FRACTURED_PREDICTION.to_string(),
                body_part: Some(body_part.as_str().to_string()),
            },
        }
    }
}
