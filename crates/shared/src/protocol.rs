use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::Question;

/// `GET /questions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
}

/// `POST /predict` response. Percentages are rendered as given; they need not sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predicted_house: String,
    #[serde(default)]
    pub probabilities: BTreeMap<String, f64>,
    #[serde(default)]
    pub trait_scores: BTreeMap<String, f64>,
}

/// `GET /` health probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub features_required: Vec<String>,
}

/// One house from `GET /houses`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseProfile {
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub element: Option<String>,
    #[serde(default)]
    pub animal: Option<String>,
}

/// `GET /houses`, keyed by house name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousesResponse {
    pub houses: BTreeMap<String, HouseProfile>,
}
