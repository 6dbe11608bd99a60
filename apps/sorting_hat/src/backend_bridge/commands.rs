//! Backend commands queued from the controller to the backend worker.

use std::time::Duration;

use client_core::AnswerStore;

/// Generation of a quiz session. Bumped on every restart so late results from an
/// abandoned session can be told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SessionEpoch(pub u64);

impl SessionEpoch {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Fixed minimum display timers for the two loading visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingTimer {
    EnterQuestionnaire,
    RevealResult,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    /// Probes the predictor once at startup; only logs and status text come back.
    CheckHealth,
    /// The house catalog is the same for every session, so it carries no epoch.
    FetchHouses,
    FetchQuestions {
        epoch: SessionEpoch,
    },
    Submit {
        epoch: SessionEpoch,
        answers: AnswerStore,
    },
    StartTimer {
        epoch: SessionEpoch,
        timer: LoadingTimer,
        after: Duration,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::CheckHealth => "check_health",
            BackendCommand::FetchHouses => "fetch_houses",
            BackendCommand::FetchQuestions { .. } => "fetch_questions",
            BackendCommand::Submit { .. } => "submit",
            BackendCommand::StartTimer { .. } => "start_timer",
        }
    }
}
