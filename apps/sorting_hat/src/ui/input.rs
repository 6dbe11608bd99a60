//! Screen-aware parsing of typed lines into controller actions.

use std::{io::BufRead, thread};

use crossbeam_channel::Sender;
use shared::domain::Score;

use crate::controller::{
    events::UiAction,
    reducer::{Screen, ScreenController},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInput {
    Action(UiAction),
    Quit,
    /// Typed something that means nothing here; the hint says what would.
    Rejected(&'static str),
}

pub fn parse_input(controller: &ScreenController, line: &str) -> ParsedInput {
    let line = line.trim().to_ascii_lowercase();
    match line.as_str() {
        "q" | "quit" | "exit" => return ParsedInput::Quit,
        "r" | "restart" => return ParsedInput::Action(UiAction::Restart),
        _ => {}
    }

    match controller.screen() {
        Screen::Welcome => match line.as_str() {
            "" | "s" | "start" => ParsedInput::Action(UiAction::Start),
            _ => ParsedInput::Rejected("Press Enter to put on the Sorting Hat."),
        },
        Screen::Loading(_) => ParsedInput::Rejected("The Sorting Hat is thinking; please wait."),
        Screen::Questionnaire => parse_questionnaire_input(controller, &line),
        Screen::Result => match line.as_str() {
            "" | "again" => ParsedInput::Action(UiAction::Restart),
            _ => ParsedInput::Rejected("Press Enter to take the test again, or q to quit."),
        },
    }
}

fn parse_questionnaire_input(controller: &ScreenController, line: &str) -> ParsedInput {
    let Some(question) = controller.current_question() else {
        return ParsedInput::Rejected("No questions to answer yet; r restarts.");
    };

    match line {
        "" | "n" | "next" => ParsedInput::Action(UiAction::Next),
        "p" | "prev" | "previous" | "b" | "back" => ParsedInput::Action(UiAction::Previous),
        other => match other.parse::<i64>() {
            Ok(value) if Score::new(value).is_ok() => ParsedInput::Action(UiAction::SetAnswer {
                question_id: question.id.clone(),
                value,
            }),
            Ok(_) => ParsedInput::Rejected("Answers go from 0 to 10."),
            Err(_) => ParsedInput::Rejected(
                "Type 0-10 to answer, n for next, p for previous, r to restart, q to quit.",
            ),
        },
    }
}

/// Forwards stdin lines until EOF, then drops the sender.
pub fn spawn_stdin_reader(line_tx: Sender<String>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                tracing::warn!("stdin read failed; stopping input");
                break;
            };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use shared::domain::{Question, QuestionId};

    use super::*;
    use crate::{
        backend_bridge::commands::LoadingTimer,
        controller::events::{AppMessage, UiEvent},
    };

    fn questionnaire() -> ScreenController {
        let mut controller = ScreenController::new(Duration::ZERO);
        controller.start();
        let epoch = controller.epoch();
        for event in [
            UiEvent::QuestionsLoaded {
                epoch,
                outcome: Ok(vec![Question {
                    id: QuestionId::from("q1"),
                    prompt: "Dark alley?".into(),
                    scale_description: "0 - 10".into(),
                    trait_name: None,
                }]),
            },
            UiEvent::TimerElapsed {
                epoch,
                timer: LoadingTimer::EnterQuestionnaire,
            },
        ] {
            controller
                .update(AppMessage::Event(event))
                .expect("event");
        }
        controller
    }

    #[test]
    fn enter_starts_from_welcome() {
        let controller = ScreenController::new(Duration::ZERO);
        assert_eq!(
            parse_input(&controller, ""),
            ParsedInput::Action(UiAction::Start)
        );
        assert_eq!(parse_input(&controller, " Q "), ParsedInput::Quit);
    }

    #[test]
    fn numbers_answer_the_current_question() {
        let controller = questionnaire();
        assert_eq!(
            parse_input(&controller, "7"),
            ParsedInput::Action(UiAction::SetAnswer {
                question_id: QuestionId::from("q1"),
                value: 7
            })
        );
        assert_eq!(
            parse_input(&controller, "prev"),
            ParsedInput::Action(UiAction::Previous)
        );
    }

    #[test]
    fn out_of_range_typing_is_a_user_error_not_an_action() {
        let controller = questionnaire();
        assert!(matches!(
            parse_input(&controller, "11"),
            ParsedInput::Rejected(_)
        ));
        assert!(matches!(
            parse_input(&controller, "-1"),
            ParsedInput::Rejected(_)
        ));
    }

    #[test]
    fn loading_screens_only_accept_restart_and_quit() {
        let mut controller = ScreenController::new(Duration::ZERO);
        controller.start();
        assert!(matches!(
            parse_input(&controller, "5"),
            ParsedInput::Rejected(_)
        ));
        assert_eq!(
            parse_input(&controller, "restart"),
            ParsedInput::Action(UiAction::Restart)
        );
    }
}
