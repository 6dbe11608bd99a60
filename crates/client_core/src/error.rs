use shared::domain::QuestionId;
use thiserror::Error;

/// Question catalog unavailable or unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("question catalog request failed: {0}")]
    Transport(String),
    #[error("question catalog returned HTTP {status}")]
    Status { status: u16 },
    #[error("malformed question catalog: {0}")]
    Malformed(String),
    #[error("question catalog is empty")]
    Empty,
    #[error("question catalog repeats id {0}")]
    DuplicateId(QuestionId),
}

/// Prediction request failed. Always folded into a failed submission result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("prediction request failed: {0}")]
    Transport(String),
    #[error("prediction service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed prediction response: {0}")]
    Malformed(String),
}

/// Caller bug: an answer that the questionnaire can never accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("answer {value} for question {question_id} is outside the 0-10 scale")]
    OutOfRange { question_id: QuestionId, value: i64 },
    #[error("question {0} is not part of the current question set")]
    UnknownQuestion(QuestionId),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
            }
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
