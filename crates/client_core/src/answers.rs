//! Per-session answer store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared::domain::{QuestionId, Score};

/// Question id -> score. Serialises as the `POST /predict` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerStore {
    scores: BTreeMap<QuestionId, Score>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites; returns the previous score for the question.
    pub fn upsert(&mut self, question_id: QuestionId, score: Score) -> Option<Score> {
        self.scores.insert(question_id, score)
    }

    pub fn get(&self, question_id: &QuestionId) -> Option<Score> {
        self.scores.get(question_id).copied()
    }

    pub fn contains(&self, question_id: &QuestionId) -> bool {
        self.scores.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

}

impl FromIterator<(QuestionId, Score)> for AnswerStore {
    fn from_iter<T: IntoIterator<Item = (QuestionId, Score)>>(iter: T) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}
