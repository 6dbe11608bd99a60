//! Submission outcome and the renderable view derived from it.

use shared::protocol::{HouseProfile, HousesResponse, PredictResponse};

use crate::error::SubmissionError;

/// Shown whenever the predictor gave no usable answer.
pub const DEFAULT_HOUSE: &str = "Gryffindor";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    Success(PredictResponse),
    Failure(SubmissionError),
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityLine {
    pub house: String,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraitLine {
    pub name: String,
    pub score: f64,
}

/// Everything the result screen needs, with safe defaults for a failed or missing result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub house: String,
    pub description: &'static str,
    /// Sorted by percentage, highest first.
    pub probabilities: Vec<ProbabilityLine>,
    pub traits: Vec<TraitLine>,
    /// From the service's house catalog, when it could be loaded.
    pub profile: Option<HouseProfile>,
    pub degraded_reason: Option<String>,
}

impl ResultView {
    pub fn from_result(result: Option<&SubmissionResult>) -> Self {
        match result {
            Some(SubmissionResult::Success(prediction)) => Self::from_prediction(prediction),
            Some(SubmissionResult::Failure(err)) => Self::fallback(Some(err.to_string())),
            None => Self::fallback(None),
        }
    }

    fn from_prediction(prediction: &PredictResponse) -> Self {
        let house = if prediction.predicted_house.trim().is_empty() {
            DEFAULT_HOUSE.to_string()
        } else {
            prediction.predicted_house.clone()
        };

        let mut probabilities: Vec<ProbabilityLine> = prediction
            .probabilities
            .iter()
            .map(|(house, percent)| ProbabilityLine {
                house: house.clone(),
                percent: *percent,
            })
            .collect();
        // Stable: equal percentages keep the map's alphabetical order.
        probabilities.sort_by(|a, b| b.percent.total_cmp(&a.percent));

        let traits = prediction
            .trait_scores
            .iter()
            .map(|(name, score)| TraitLine {
                name: name.replace('_', " "),
                score: *score,
            })
            .collect();

        Self {
            description: house_description(&house),
            house,
            probabilities,
            traits,
            profile: None,
            degraded_reason: None,
        }
    }

    fn fallback(reason: Option<String>) -> Self {
        Self {
            house: DEFAULT_HOUSE.to_string(),
            description: house_description(DEFAULT_HOUSE),
            probabilities: Vec::new(),
            traits: Vec::new(),
            profile: None,
            degraded_reason: reason,
        }
    }

    /// Attaches the catalog entry for the shown house. Without one the view keeps
    /// only the built-in description.
    pub fn with_house_catalog(mut self, catalog: Option<&HousesResponse>) -> Self {
        self.profile = catalog.and_then(|catalog| catalog.houses.get(&self.house).cloned());
        self
    }

    pub fn profile_lines(&self) -> Vec<String> {
        let Some(profile) = &self.profile else {
            return Vec::new();
        };
        let mut lines = Vec::new();
        if !profile.traits.is_empty() {
            lines.push(format!("Traits: {}", profile.traits.join(", ")));
        }
        if !profile.colors.is_empty() {
            lines.push(format!("Colors: {}", profile.colors.join(" and ")));
        }
        if let Some(element) = &profile.element {
            lines.push(format!("Element: {element}"));
        }
        if let Some(animal) = &profile.animal {
            lines.push(format!("Animal: {animal}"));
        }
        lines
    }

    pub fn probability_lines(&self) -> Vec<String> {
        self.probabilities
            .iter()
            .map(|line| format!("{}: {}%", line.house, line.percent))
            .collect()
    }

    pub fn trait_lines(&self) -> Vec<String> {
        self.traits
            .iter()
            .map(|line| format!("{}: {}/10", line.name, line.score))
            .collect()
    }
}

pub fn house_description(house: &str) -> &'static str {
    match house {
        "Gryffindor" => "You belong in Gryffindor! You are brave, daring, and chivalrous. You stand up for what's right and aren't afraid to face danger when needed.",
        "Hufflepuff" => "You belong in Hufflepuff! You are loyal, patient, and hardworking. You value fairness and friendship above all else.",
        "Ravenclaw" => "You belong in Ravenclaw! You are intelligent, creative, and wise. You have a thirst for knowledge and love solving complex problems.",
        "Slytherin" => "You belong in Slytherin! You are ambitious, cunning, and resourceful. You have strong leadership qualities and determination to achieve your goals.",
        _ => "The Sorting Hat has made its decision!",
    }
}
