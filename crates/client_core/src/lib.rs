use std::{collections::HashSet, sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::Question,
    error::ErrorBody,
    protocol::{HealthResponse, HousesResponse, PredictResponse, QuestionsResponse},
};
use tracing::{info, warn};
use url::Url;

pub mod answers;
pub mod error;
pub mod navigator;
pub mod result;

pub use answers::AnswerStore;
pub use error::{FetchError, SubmissionError, ValidationError};
pub use navigator::{NextOutcome, QuestionnaireNavigator};
pub use result::{ResultView, SubmissionResult, DEFAULT_HOUSE};

const QUESTIONS_PATH: &str = "questions";
const PREDICT_PATH: &str = "predict";
const HOUSES_PATH: &str = "houses";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// The quiz service: question catalog, predictor, and the informational routes next to them.
#[async_trait]
pub trait QuizApi: Send + Sync {
    async fn fetch_questions(&self) -> Result<Vec<Question>, FetchError>;
    async fn predict(&self, answers: &AnswerStore) -> Result<PredictResponse, SubmissionError>;
    /// `GET /` on the predictor service.
    async fn health(&self) -> Result<HealthResponse, FetchError>;
    async fn houses(&self) -> Result<HousesResponse, FetchError>;
}

pub struct HttpQuizApi {
    http: Client,
    base_url: Url,
}

impl HttpQuizApi {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url.trim())
            .with_context(|| format!("invalid api base url '{base_url}'"))?;
        if base_url.cannot_be_a_base() {
            bail!("api base url '{base_url}' must be an http(s) url");
        }
        // `Url::join` drops the last path segment unless it ends in a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }
}

#[async_trait]
impl QuizApi for HttpQuizApi {
    async fn fetch_questions(&self) -> Result<Vec<Question>, FetchError> {
        let url = self
            .endpoint(QUESTIONS_PATH)
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        let body: QuestionsResponse = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.questions)
    }

    async fn predict(&self, answers: &AnswerStore) -> Result<PredictResponse, SubmissionError> {
        let url = self
            .endpoint(PREDICT_PATH)
            .map_err(|err| SubmissionError::Transport(err.to_string()))?;
        let response = self.http.post(url).json(answers).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.summary(),
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            };
            return Err(SubmissionError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<PredictResponse>().await?)
    }

    async fn health(&self) -> Result<HealthResponse, FetchError> {
        Ok(self
            .http
            .get(self.base_url.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    async fn houses(&self) -> Result<HousesResponse, FetchError> {
        let url = self
            .endpoint(HOUSES_PATH)
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        Ok(self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}

/// Fetches the question set once and checks it is usable for navigation.
pub async fn load_question_set(api: &dyn QuizApi) -> Result<Vec<Question>, FetchError> {
    let questions = match api.fetch_questions().await {
        Ok(questions) => questions,
        Err(err) => {
            warn!("question catalog unavailable: {err}");
            return Err(err);
        }
    };

    if questions.is_empty() {
        warn!("question catalog returned no questions");
        return Err(FetchError::Empty);
    }

    let mut seen = HashSet::with_capacity(questions.len());
    for question in &questions {
        if !seen.insert(&question.id) {
            warn!(question_id = %question.id, "question catalog repeats an id");
            return Err(FetchError::DuplicateId(question.id.clone()));
        }
    }

    info!(count = questions.len(), "question set loaded");
    Ok(questions)
}

/// One-shot prediction round trip. Never retries; every failure becomes
/// [`SubmissionResult::Failure`].
#[derive(Clone)]
pub struct SubmissionPipeline {
    api: Arc<dyn QuizApi>,
}

impl SubmissionPipeline {
    pub fn new(api: Arc<dyn QuizApi>) -> Self {
        Self { api }
    }

    pub async fn submit(&self, answers: &AnswerStore) -> SubmissionResult {
        info!(answers = answers.len(), "submitting answers for sorting");
        match self.api.predict(answers).await {
            Ok(prediction) => {
                info!(house = %prediction.predicted_house, "prediction received");
                SubmissionResult::Success(prediction)
            }
            Err(err) => {
                warn!("prediction failed, falling back to default result: {err}");
                SubmissionResult::Failure(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
