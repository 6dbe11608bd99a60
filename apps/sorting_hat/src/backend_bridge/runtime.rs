//! Runtime bridge between the controller's command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{load_question_set, QuizApi, SubmissionPipeline};
use crossbeam_channel::{Receiver, Sender};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::events::{UiError, UiErrorContext, UiEvent},
};

pub const MODEL_NOT_LOADED_STATUS: &str =
    "The Sorting Hat's model is not loaded; results will fall back to Gryffindor.";

/// Spawns the backend worker thread. It exits once every command sender is dropped.
pub fn launch(
    api: Arc<dyn QuizApi>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let pipeline = SubmissionPipeline::new(api.clone());
            let _ = ui_tx.send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                let ui_tx = ui_tx.clone();
                match cmd {
                    BackendCommand::CheckHealth => {
                        let api = api.clone();
                        tokio::spawn(async move {
                            match api.health().await {
                                Ok(health) if health.model_loaded => {
                                    tracing::info!("predictor healthy: {}", health.message);
                                }
                                Ok(health) => {
                                    tracing::warn!(
                                        "predictor reports no model loaded: {}",
                                        health.message
                                    );
                                    post(
                                        &ui_tx,
                                        UiEvent::Info(MODEL_NOT_LOADED_STATUS.to_string()),
                                    );
                                }
                                Err(err) => {
                                    tracing::warn!("predictor health check failed: {err}");
                                    post(
                                        &ui_tx,
                                        UiEvent::Error(
                                            UiError::from_fetch_error(&err)
                                                .with_context(UiErrorContext::ServiceHealth),
                                        ),
                                    );
                                }
                            }
                        });
                    }
                    BackendCommand::FetchHouses => {
                        let api = api.clone();
                        tokio::spawn(async move {
                            let outcome = api.houses().await;
                            post(&ui_tx, UiEvent::HousesLoaded(outcome));
                        });
                    }
                    BackendCommand::FetchQuestions { epoch } => {
                        let api = api.clone();
                        tokio::spawn(async move {
                            let outcome = load_question_set(api.as_ref()).await;
                            post(&ui_tx, UiEvent::QuestionsLoaded { epoch, outcome });
                        });
                    }
                    BackendCommand::Submit { epoch, answers } => {
                        let pipeline = pipeline.clone();
                        tokio::spawn(async move {
                            let result = pipeline.submit(&answers).await;
                            post(&ui_tx, UiEvent::SubmissionResolved { epoch, result });
                        });
                    }
                    BackendCommand::StartTimer {
                        epoch,
                        timer,
                        after,
                    } => {
                        tokio::spawn(async move {
                            tokio::time::sleep(after).await;
                            post(&ui_tx, UiEvent::TimerElapsed { epoch, timer });
                        });
                    }
                }
            }
            tracing::debug!("backend command queue closed; worker exiting");
        });
    })
}

fn post(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    if ui_tx.send(event).is_err() {
        tracing::debug!("ui event dropped: controller is gone");
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
