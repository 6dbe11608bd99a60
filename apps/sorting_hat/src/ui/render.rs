//! Plain-text rendering of the current screen.

use std::fmt::Write as _;

use client_core::QuestionnaireNavigator;

use crate::controller::{
    events::UiError,
    reducer::{LoadingPhase, QuestionSetState, Screen, ScreenController},
};

const PROGRESS_WIDTH: usize = 24;

pub fn render(controller: &ScreenController) -> String {
    let mut out = String::new();
    match controller.screen() {
        Screen::Welcome => render_welcome(&mut out),
        Screen::Loading(phase) => render_loading(&mut out, phase),
        Screen::Questionnaire => match controller.question_set() {
            QuestionSetState::Ready(navigator) => render_question(&mut out, navigator),
            QuestionSetState::Failed(err) => render_fetch_error(&mut out, err),
            QuestionSetState::Pending | QuestionSetState::Idle => {
                out.push_str("Loading Questions...\n");
            }
        },
        Screen::Result => render_result(&mut out, controller),
    }

    if !controller.status().is_empty() {
        let _ = writeln!(out, "\n[{}]", controller.status());
    }
    out
}

fn render_welcome(out: &mut String) {
    out.push_str("Welcome to Hogwarts!\n\n");
    out.push_str("Answer a few questions and the Sorting Hat will choose your house.\n");
    out.push_str("Press Enter to begin, q to quit.\n");
}

fn render_loading(out: &mut String, phase: LoadingPhase) {
    match phase {
        LoadingPhase::Summoning => out.push_str("Analyzing your magical essence...\n"),
        LoadingPhase::Sorting => out.push_str("The Sorting Hat is deliberating...\n"),
    }
}

fn render_question(out: &mut String, navigator: &QuestionnaireNavigator) {
    let question = navigator.current_question();
    let percent = navigator.progress_percent();
    let filled = (percent / 100.0 * PROGRESS_WIDTH as f64).round() as usize;

    out.push_str("The Sorting Hat's Questions\n");
    let _ = writeln!(
        out,
        "[{}{}] Question {} of {}",
        "#".repeat(filled),
        ".".repeat(PROGRESS_WIDTH.saturating_sub(filled)),
        navigator.current_index() + 1,
        navigator.len()
    );

    if navigator.is_complete() {
        out.push_str("\nAll Questions Completed!\n");
        if navigator.is_last() {
            out.push_str("Press n to submit your answers to the Sorting Hat.\n");
        } else {
            out.push_str("Go to the last question and press n to submit.\n");
        }
    }

    let _ = writeln!(out, "\n{}", question.prompt);
    let _ = writeln!(out, "{}", question.scale_description);

    let value = navigator.current_display_value();
    if navigator.is_current_answered() {
        let _ = writeln!(out, "Your answer: {value}/10");
    } else {
        let _ = writeln!(out, "Your answer: {value}/10 (not answered yet)");
    }
    let _ = writeln!(
        out,
        "Answered {} of {}",
        navigator.answered_count(),
        navigator.len()
    );
    out.push_str("Type 0-10 to answer, n next, p previous, r restart, q quit.\n");
}

fn render_fetch_error(out: &mut String, err: &UiError) {
    out.push_str("Error loading questions. Please try again.\n");
    let _ = writeln!(out, "{} ({})", err.headline(), err.message());
    out.push_str("Press r to return to the start.\n");
}

fn render_result(out: &mut String, controller: &ScreenController) {
    let view = controller.result_view();

    out.push_str("The Sorting Hat has spoken!\n\n");
    let _ = writeln!(out, "{}", view.house);
    let _ = writeln!(out, "{}", view.description);
    for line in view.profile_lines() {
        let _ = writeln!(out, "  {line}");
    }

    let probabilities = view.probability_lines();
    if !probabilities.is_empty() {
        out.push_str("\nHouse Probabilities\n");
        for line in probabilities {
            let _ = writeln!(out, "  {line}");
        }
    }

    let traits = view.trait_lines();
    if !traits.is_empty() {
        out.push_str("\nYour Magical Traits\n");
        for line in traits {
            let _ = writeln!(out, "  {line}");
        }
    }

    if let Some(answers) = controller.answers() {
        let _ = writeln!(out, "\nSorted from {} answers.", answers.len());
    }

    if let Some(reason) = &view.degraded_reason {
        let _ = writeln!(
            out,
            "\n(The Sorting Hat could not be consulted: {reason}. Showing the default house.)"
        );
    }
    out.push_str("\nPress Enter to take the test again, q to quit.\n");
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use client_core::{FetchError, SubmissionError, SubmissionResult};
    use shared::{
        domain::{Question, QuestionId},
        protocol::{HouseProfile, HousesResponse, PredictResponse},
    };

    use super::*;
    use crate::{
        backend_bridge::commands::LoadingTimer,
        controller::events::{AppMessage, UiAction, UiEvent},
    };

    fn send(controller: &mut ScreenController, event: UiEvent) {
        controller
            .update(AppMessage::Event(event))
            .expect("event");
    }

    fn loaded(outcome: Result<Vec<Question>, FetchError>) -> ScreenController {
        let mut controller = ScreenController::new(Duration::ZERO);
        controller.start();
        let epoch = controller.epoch();
        send(&mut controller, UiEvent::QuestionsLoaded { epoch, outcome });
        send(
            &mut controller,
            UiEvent::TimerElapsed {
                epoch,
                timer: LoadingTimer::EnterQuestionnaire,
            },
        );
        controller
    }

    fn one_question() -> Vec<Question> {
        vec![Question {
            id: QuestionId::from("q1"),
            prompt: "You hear strange noises in a dark alley.".into(),
            scale_description: "0 (Avoid completely) - 10 (Investigate immediately)".into(),
            trait_name: Some("bravery".into()),
        }]
    }

    fn resolved(result: SubmissionResult) -> ScreenController {
        let mut controller = loaded(Ok(one_question()));
        controller
            .update(AppMessage::Action(UiAction::SetAnswer {
                question_id: QuestionId::from("q1"),
                value: 9,
            }))
            .expect("answer");
        controller
            .update(AppMessage::Action(UiAction::Next))
            .expect("submit");
        let epoch = controller.epoch();
        send(&mut controller, UiEvent::SubmissionResolved { epoch, result });
        send(
            &mut controller,
            UiEvent::TimerElapsed {
                epoch,
                timer: LoadingTimer::RevealResult,
            },
        );
        assert_eq!(controller.screen(), Screen::Result);
        controller
    }

    #[test]
    fn untouched_question_shows_the_default_as_unanswered() {
        let text = render(&loaded(Ok(one_question())));
        assert!(text.contains("Question 1 of 1"));
        assert!(text.contains("Your answer: 5/10 (not answered yet)"));
        assert!(text.contains("0 (Avoid completely) - 10 (Investigate immediately)"));
    }

    #[test]
    fn fetch_failure_renders_an_error_state() {
        let text = render(&loaded(Err(FetchError::Status { status: 502 })));
        assert!(text.contains("Error loading questions"));
        assert!(text.contains("HTTP 502"));
    }

    #[test]
    fn result_lists_probabilities_highest_first() {
        let text = render(&resolved(SubmissionResult::Success(PredictResponse {
            predicted_house: "Gryffindor".into(),
            probabilities: [
                ("Hufflepuff".to_string(), 5.0),
                ("Gryffindor".to_string(), 72.0),
                ("Slytherin".to_string(), 15.0),
            ]
            .into_iter()
            .collect(),
            trait_scores: [("bravery".to_string(), 9.0)].into_iter().collect(),
        })));

        let gryffindor = text.find("Gryffindor: 72%").expect("top house line");
        let slytherin = text.find("Slytherin: 15%").expect("second line");
        assert!(gryffindor < slytherin);
        assert!(text.contains("bravery: 9/10"));
        assert!(!text.contains("could not be consulted"));
        assert!(!text.contains("Animal:"));
    }

    #[test]
    fn result_shows_the_house_catalog_entry_when_loaded() {
        let mut controller = ScreenController::new(Duration::ZERO);
        send(
            &mut controller,
            UiEvent::HousesLoaded(Ok(HousesResponse {
                houses: [(
                    "Gryffindor".to_string(),
                    HouseProfile {
                        traits: vec!["Brave".into(), "Daring".into()],
                        colors: vec!["Red".into(), "Gold".into()],
                        element: Some("Fire".into()),
                        animal: Some("Lion".into()),
                    },
                )]
                .into_iter()
                .collect(),
            })),
        );
        controller.start();
        let epoch = controller.epoch();
        send(
            &mut controller,
            UiEvent::QuestionsLoaded {
                epoch,
                outcome: Ok(one_question()),
            },
        );
        send(
            &mut controller,
            UiEvent::TimerElapsed {
                epoch,
                timer: LoadingTimer::EnterQuestionnaire,
            },
        );
        controller
            .update(AppMessage::Action(UiAction::SetAnswer {
                question_id: QuestionId::from("q1"),
                value: 2,
            }))
            .expect("answer");
        controller
            .update(AppMessage::Action(UiAction::Next))
            .expect("submit");
        send(
            &mut controller,
            UiEvent::SubmissionResolved {
                epoch,
                result: SubmissionResult::Failure(SubmissionError::Malformed("bad".into())),
            },
        );
        send(
            &mut controller,
            UiEvent::TimerElapsed {
                epoch,
                timer: LoadingTimer::RevealResult,
            },
        );

        let text = render(&controller);
        assert!(text.contains("Traits: Brave, Daring"));
        assert!(text.contains("Animal: Lion"));
        assert!(text.contains("could not be consulted"));
    }

    #[test]
    fn failed_prediction_renders_the_default_house() {
        let text = render(&resolved(SubmissionResult::Failure(
            SubmissionError::Transport("connection refused".into()),
        )));
        assert!(text.contains("Gryffindor"));
        assert!(text.contains("could not be consulted"));
        assert!(!text.contains("House Probabilities"));
    }
}
