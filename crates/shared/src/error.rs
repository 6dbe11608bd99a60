use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON body the predictor service returns alongside 4xx/5xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invalid_questions: Vec<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            missing: Vec::new(),
            invalid_questions: Vec::new(),
        }
    }

    /// One-line description including any offending question ids.
    pub fn summary(&self) -> String {
        let mut summary = self.error.clone();
        if !self.missing.is_empty() {
            summary.push_str(&format!(" (missing: {})", self.missing.join(", ")));
        }
        if !self.invalid_questions.is_empty() {
            summary.push_str(&format!(
                " (invalid: {})",
                self.invalid_questions.join(", ")
            ));
        }
        summary
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("score {value} is outside the 0-10 scale")]
pub struct ScoreError {
    pub value: i64,
}
