//! UI/backend events and error modeling for the quiz controller.

use client_core::{FetchError, SubmissionError, SubmissionResult};
use shared::{
    domain::{Question, QuestionId},
    protocol::HousesResponse,
};

use crate::backend_bridge::commands::{LoadingTimer, SessionEpoch};

/// User intent, already parsed from raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Start,
    SetAnswer { question_id: QuestionId, value: i64 },
    Next,
    Previous,
    Restart,
}

/// Posted by the backend worker.
pub enum UiEvent {
    Info(String),
    Error(UiError),
    HousesLoaded(Result<HousesResponse, FetchError>),
    QuestionsLoaded {
        epoch: SessionEpoch,
        outcome: Result<Vec<Question>, FetchError>,
    },
    SubmissionResolved {
        epoch: SessionEpoch,
        result: SubmissionResult,
    },
    TimerElapsed {
        epoch: SessionEpoch,
        timer: LoadingTimer,
    },
}

/// Single input type of the controller's update function.
pub enum AppMessage {
    Action(UiAction),
    Event(UiEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Decode,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    ServiceHealth,
    QuestionFetch,
    Submission,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("malformed")
            || message_lower.contains("decode")
            || message_lower.contains("empty")
        {
            UiErrorCategory::Decode
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("outside")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("unavailable")
            || message_lower.contains("runtime")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_fetch_error(err: &FetchError) -> Self {
        let category = match err {
            FetchError::Transport(_) | FetchError::Status { .. } => UiErrorCategory::Transport,
            FetchError::Malformed(_) | FetchError::Empty | FetchError::DuplicateId(_) => {
                UiErrorCategory::Decode
            }
        };
        Self {
            category,
            context: UiErrorContext::QuestionFetch,
            message: err.to_string(),
        }
    }

    /// Same classification as a question fetch, reported under another context.
    pub fn with_context(mut self, context: UiErrorContext) -> Self {
        self.context = context;
        self
    }

    pub fn from_submission_error(err: &SubmissionError) -> Self {
        let category = match err {
            SubmissionError::Transport(_) => UiErrorCategory::Transport,
            SubmissionError::Status { status, .. } if (400..500).contains(status) => {
                UiErrorCategory::Validation
            }
            SubmissionError::Status { .. } => UiErrorCategory::Transport,
            SubmissionError::Malformed(_) => UiErrorCategory::Decode,
        };
        Self {
            category,
            context: UiErrorContext::Submission,
            message: err.to_string(),
        }
    }

    /// Short user-facing explanation; the full message goes to the log.
    pub fn headline(&self) -> &'static str {
        match (self.context, self.category) {
            (UiErrorContext::QuestionFetch, UiErrorCategory::Transport) => {
                "The question catalog could not be reached."
            }
            (UiErrorContext::QuestionFetch, _) => "The question catalog sent something unreadable.",
            (UiErrorContext::Submission, UiErrorCategory::Transport) => {
                "The Sorting Hat could not be reached."
            }
            (UiErrorContext::Submission, UiErrorCategory::Validation) => {
                "The Sorting Hat rejected the answers."
            }
            (UiErrorContext::Submission, _) => "The Sorting Hat answered in riddles.",
            (UiErrorContext::BackendStartup, _) => "The backend worker failed to start.",
            (UiErrorContext::ServiceHealth, _) => "The Sorting Hat service did not answer.",
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
