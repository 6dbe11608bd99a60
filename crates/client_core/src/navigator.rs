//! Cursor over a fetched question set plus the answers collected so far.

use shared::domain::{Question, QuestionId, Score};

use crate::{answers::AnswerStore, error::ValidationError};

/// What `next()` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutcome {
    Advanced,
    /// Last question reached but some questions are still unanswered.
    AwaitingAnswers,
    ReadyToSubmit,
}

#[derive(Debug, Clone)]
pub struct QuestionnaireNavigator {
    questions: Vec<Question>,
    answers: AnswerStore,
    current_index: usize,
}

impl QuestionnaireNavigator {
    /// `None` for an empty question set: there is no valid cursor position.
    pub fn new(questions: Vec<Question>) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }
        Some(Self {
            questions,
            answers: AnswerStore::new(),
            current_index: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    pub fn progress_percent(&self) -> f64 {
        (self.current_index + 1) as f64 / self.questions.len() as f64 * 100.0
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_answered(&self, question_id: &QuestionId) -> bool {
        self.answers.contains(question_id)
    }

    pub fn is_current_answered(&self) -> bool {
        self.is_answered(&self.current_question().id)
    }

    /// Value to show on the slider. Reading the midpoint default never records it.
    pub fn display_value(&self, question_id: &QuestionId) -> Score {
        self.answers.get(question_id).unwrap_or(Score::MIDPOINT)
    }

    pub fn current_display_value(&self) -> Score {
        self.display_value(&self.current_question().id)
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.questions.len()
    }

    /// Records an explicit answer. The cursor does not move.
    pub fn answer(&mut self, question_id: QuestionId, value: i64) -> Result<(), ValidationError> {
        let score = Score::new(value).map_err(|_| ValidationError::OutOfRange {
            question_id: question_id.clone(),
            value,
        })?;
        if !self.questions.iter().any(|q| q.id == question_id) {
            return Err(ValidationError::UnknownQuestion(question_id));
        }
        self.answers.upsert(question_id, score);
        Ok(())
    }

    pub fn next(&mut self) -> NextOutcome {
        if !self.is_last() {
            self.current_index += 1;
            NextOutcome::Advanced
        } else if self.is_complete() {
            NextOutcome::ReadyToSubmit
        } else {
            NextOutcome::AwaitingAnswers
        }
    }

    /// Returns whether the cursor moved. Answers are kept.
    pub fn previous(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        true
    }
}

#[cfg(test)]
#[path = "tests/navigator_tests.rs"]
mod tests;
