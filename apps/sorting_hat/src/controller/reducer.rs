//! Screen state machine: one owned state object advanced by `update`.
//!
//! Side effects are never performed here. Every transition returns the backend commands
//! it needs, and every backend answer comes back as a [`UiEvent`] tagged with the
//! [`SessionEpoch`] it was issued under.

use std::time::Duration;

use client_core::{
    AnswerStore, FetchError, NextOutcome, QuestionnaireNavigator, ResultView, SubmissionResult,
    ValidationError,
};
use shared::{
    domain::{Question, QuestionId},
    protocol::HousesResponse,
};
use tracing::{debug, error, info, warn};

use crate::{
    backend_bridge::commands::{BackendCommand, LoadingTimer, SessionEpoch},
    controller::events::{AppMessage, UiAction, UiError, UiEvent},
};

/// Minimum time a loading screen stays up, independent of network latency.
pub const DEFAULT_LOADING_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    /// Before the questionnaire.
    Summoning,
    /// While the answers are being classified.
    Sorting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Loading(LoadingPhase),
    Questionnaire,
    Result,
}

#[derive(Debug, Clone)]
pub enum QuestionSetState {
    Idle,
    /// Requested; the questionnaire may already be on screen.
    Pending,
    Failed(UiError),
    Ready(QuestionnaireNavigator),
}

pub struct ScreenController {
    screen: Screen,
    epoch: SessionEpoch,
    question_set: QuestionSetState,
    answers: Option<AnswerStore>,
    result: Option<SubmissionResult>,
    /// Survives restarts; `None` until the service has answered.
    house_catalog: Option<HousesResponse>,
    loading_delay: Duration,
    status: String,
}

impl Default for ScreenController {
    fn default() -> Self {
        Self::new(DEFAULT_LOADING_DELAY)
    }
}

impl ScreenController {
    pub fn new(loading_delay: Duration) -> Self {
        Self {
            screen: Screen::Welcome,
            epoch: SessionEpoch::default(),
            question_set: QuestionSetState::Idle,
            answers: None,
            result: None,
            house_catalog: None,
            loading_delay,
            status: String::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn epoch(&self) -> SessionEpoch {
        self.epoch
    }

    pub fn question_set(&self) -> &QuestionSetState {
        &self.question_set
    }

    pub fn navigator(&self) -> Option<&QuestionnaireNavigator> {
        match &self.question_set {
            QuestionSetState::Ready(navigator) => Some(navigator),
            _ => None,
        }
    }

    /// Question under the cursor, when the questionnaire is on screen and loaded.
    pub fn current_question(&self) -> Option<&Question> {
        if self.screen != Screen::Questionnaire {
            return None;
        }
        self.navigator().map(QuestionnaireNavigator::current_question)
    }

    /// Snapshot handed to the submission pipeline.
    pub fn answers(&self) -> Option<&AnswerStore> {
        self.answers.as_ref()
    }

    pub fn result(&self) -> Option<&SubmissionResult> {
        self.result.as_ref()
    }

    pub fn result_view(&self) -> ResultView {
        ResultView::from_result(self.result()).with_house_catalog(self.house_catalog.as_ref())
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut String {
        &mut self.status
    }

    /// One-off requests issued when the app comes up, before any session starts.
    pub fn boot(&self) -> Vec<BackendCommand> {
        let mut commands = vec![BackendCommand::CheckHealth];
        if self.house_catalog.is_none() {
            commands.push(BackendCommand::FetchHouses);
        }
        commands
    }

    pub fn update(&mut self, message: AppMessage) -> Result<Vec<BackendCommand>, ValidationError> {
        match message {
            AppMessage::Action(action) => self.apply_action(action),
            AppMessage::Event(event) => Ok(self.apply_event(event)),
        }
    }

    fn apply_action(&mut self, action: UiAction) -> Result<Vec<BackendCommand>, ValidationError> {
        match action {
            UiAction::Start => Ok(self.start()),
            UiAction::SetAnswer { question_id, value } => {
                self.answer(question_id, value)?;
                Ok(Vec::new())
            }
            UiAction::Next => Ok(self.next()),
            UiAction::Previous => {
                self.previous();
                Ok(Vec::new())
            }
            UiAction::Restart => {
                self.restart();
                Ok(Vec::new())
            }
        }
    }

    fn apply_event(&mut self, event: UiEvent) -> Vec<BackendCommand> {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
                Vec::new()
            }
            UiEvent::Error(err) => {
                warn!(context = ?err.context(), "backend error: {}", err.message());
                self.status = format!("{} {}", err.headline(), err.message());
                Vec::new()
            }
            UiEvent::HousesLoaded(outcome) => {
                match outcome {
                    Ok(catalog) => {
                        debug!(houses = catalog.houses.len(), "house catalog loaded");
                        self.house_catalog = Some(catalog);
                    }
                    Err(err) => warn!("house catalog unavailable, using built-in text: {err}"),
                }
                Vec::new()
            }
            UiEvent::QuestionsLoaded { epoch, outcome } => {
                if self.is_stale(epoch, "questions_loaded") {
                    return Vec::new();
                }
                self.questions_loaded(outcome);
                Vec::new()
            }
            UiEvent::SubmissionResolved { epoch, result } => {
                if self.is_stale(epoch, "submission_resolved") {
                    return Vec::new();
                }
                self.submission_resolved(result)
            }
            UiEvent::TimerElapsed { epoch, timer } => {
                if self.is_stale(epoch, "timer_elapsed") {
                    return Vec::new();
                }
                self.timer_elapsed(timer);
                Vec::new()
            }
        }
    }

    fn is_stale(&self, epoch: SessionEpoch, event: &'static str) -> bool {
        let stale = epoch != self.epoch;
        if stale {
            debug!(
                event,
                event_epoch = epoch.0,
                current_epoch = self.epoch.0,
                "discarding event from an abandoned session"
            );
        }
        stale
    }

    /// Welcome -> Loading. The question fetch and the display timer race; either may win.
    pub fn start(&mut self) -> Vec<BackendCommand> {
        if self.screen != Screen::Welcome {
            debug!(screen = ?self.screen, "start ignored outside the welcome screen");
            return Vec::new();
        }

        info!(epoch = self.epoch.0, "starting questionnaire");
        self.screen = Screen::Loading(LoadingPhase::Summoning);
        self.question_set = QuestionSetState::Pending;
        vec![
            BackendCommand::FetchQuestions { epoch: self.epoch },
            BackendCommand::StartTimer {
                epoch: self.epoch,
                timer: LoadingTimer::EnterQuestionnaire,
                after: self.loading_delay,
            },
        ]
    }

    pub fn answer(&mut self, question_id: QuestionId, value: i64) -> Result<(), ValidationError> {
        if self.screen != Screen::Questionnaire {
            debug!(screen = ?self.screen, "answer ignored outside the questionnaire");
            return Ok(());
        }
        let QuestionSetState::Ready(navigator) = &mut self.question_set else {
            debug!("answer ignored while the question set is not ready");
            return Ok(());
        };

        navigator.answer(question_id, value).inspect_err(|err| {
            error!("rejected answer: {err}");
        })
    }

    pub fn next(&mut self) -> Vec<BackendCommand> {
        if self.screen != Screen::Questionnaire {
            return Vec::new();
        }
        let QuestionSetState::Ready(navigator) = &mut self.question_set else {
            return Vec::new();
        };

        match navigator.next() {
            NextOutcome::ReadyToSubmit => {
                let answers = navigator.answers().clone();
                self.complete_questionnaire(answers)
            }
            NextOutcome::Advanced | NextOutcome::AwaitingAnswers => Vec::new(),
        }
    }

    pub fn previous(&mut self) {
        if self.screen != Screen::Questionnaire {
            return;
        }
        if let QuestionSetState::Ready(navigator) = &mut self.question_set {
            navigator.previous();
        }
    }

    /// Questionnaire -> Loading, handing the finished answers to the submission pipeline.
    pub fn complete_questionnaire(&mut self, answers: AnswerStore) -> Vec<BackendCommand> {
        if self.screen != Screen::Questionnaire {
            debug!(screen = ?self.screen, "completion ignored outside the questionnaire");
            return Vec::new();
        }

        info!(
            epoch = self.epoch.0,
            answers = answers.len(),
            "questionnaire complete"
        );
        self.answers = Some(answers.clone());
        self.result = None;
        self.question_set = QuestionSetState::Idle;
        self.screen = Screen::Loading(LoadingPhase::Sorting);
        vec![BackendCommand::Submit {
            epoch: self.epoch,
            answers,
        }]
    }

    /// Back to Welcome from any screen. In-flight work is not cancelled, only disowned.
    pub fn restart(&mut self) {
        self.epoch = self.epoch.next();
        info!(epoch = self.epoch.0, from = ?self.screen, "restarting");
        self.screen = Screen::Welcome;
        self.question_set = QuestionSetState::Idle;
        self.answers = None;
        self.result = None;
        self.status.clear();
    }

    fn questions_loaded(&mut self, outcome: Result<Vec<Question>, FetchError>) {
        if !matches!(self.question_set, QuestionSetState::Pending) {
            debug!("question set arrived when none was requested");
            return;
        }

        self.question_set = match outcome.map(QuestionnaireNavigator::new) {
            Ok(Some(navigator)) => QuestionSetState::Ready(navigator),
            Ok(None) => QuestionSetState::Failed(UiError::from_fetch_error(&FetchError::Empty)),
            Err(err) => QuestionSetState::Failed(UiError::from_fetch_error(&err)),
        };
    }

    fn submission_resolved(&mut self, result: SubmissionResult) -> Vec<BackendCommand> {
        if self.screen != Screen::Loading(LoadingPhase::Sorting) || self.result.is_some() {
            debug!(screen = ?self.screen, "submission result arrived unexpectedly");
            return Vec::new();
        }

        if let SubmissionResult::Failure(err) = &result {
            let ui_error = UiError::from_submission_error(err);
            warn!(
                category = ?ui_error.category(),
                "showing fallback result: {}",
                ui_error.message()
            );
        }
        self.result = Some(result);
        vec![BackendCommand::StartTimer {
            epoch: self.epoch,
            timer: LoadingTimer::RevealResult,
            after: self.loading_delay,
        }]
    }

    fn timer_elapsed(&mut self, timer: LoadingTimer) {
        match (timer, self.screen) {
            (LoadingTimer::EnterQuestionnaire, Screen::Loading(LoadingPhase::Summoning)) => {
                self.screen = Screen::Questionnaire;
            }
            (LoadingTimer::RevealResult, Screen::Loading(LoadingPhase::Sorting))
                if self.result.is_some() =>
            {
                self.screen = Screen::Result;
            }
            (timer, screen) => {
                debug!(?timer, ?screen, "timer fired for a screen no longer shown");
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
