use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::HttpQuizApi;
use crossbeam_channel::{bounded, select, unbounded};
use tracing_subscriber::EnvFilter;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::{AppMessage, UiEvent},
        orchestration::dispatch_backend_command,
        reducer::ScreenController,
    },
    ui::input::{parse_input, ParsedInput},
};

const COMMAND_QUEUE_CAPACITY: usize = 64;

enum Incoming {
    Line(Option<String>),
    Event(Option<UiEvent>),
}

/// Terminal client for the Sorting Hat personality quiz.
#[derive(Parser, Debug)]
#[command(name = "sorting_hat", version)]
struct Args {
    /// Base URL of the service exposing /questions and /predict.
    #[arg(long)]
    api_url: Option<String>,
    /// TOML settings file (defaults to ./sorting_hat.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Minimum time each loading screen stays visible.
    #[arg(long)]
    loading_delay_ms: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = config::load_settings(args.config.as_deref())?;
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }
    if let Some(delay) = args.loading_delay_ms {
        settings.loading_delay_ms = delay;
    }
    tracing::info!(?settings, "starting sorting hat");

    let api = HttpQuizApi::with_timeout(&settings.api_base_url, settings.request_timeout())
        .context("failed to configure quiz api client")?;
    let api = Arc::new(api);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(COMMAND_QUEUE_CAPACITY);
    let (ui_tx, ui_rx) = unbounded();
    let (line_tx, line_rx) = unbounded::<String>();
    backend_bridge::runtime::launch(api, cmd_rx, ui_tx);
    ui::input::spawn_stdin_reader(line_tx);

    let mut controller = ScreenController::new(settings.loading_delay());
    for cmd in controller.boot() {
        dispatch_backend_command(&cmd_tx, cmd, controller.status_mut());
    }
    print!("{}", ui::render::render(&controller));

    loop {
        let incoming = select! {
            recv(line_rx) -> line => Incoming::Line(line.ok()),
            recv(ui_rx) -> event => Incoming::Event(event.ok()),
        };

        let message = match incoming {
            Incoming::Line(None) => {
                tracing::info!("stdin closed; exiting");
                break;
            }
            Incoming::Line(Some(line)) => match parse_input(&controller, &line) {
                ParsedInput::Action(action) => AppMessage::Action(action),
                ParsedInput::Quit => break,
                ParsedInput::Rejected(hint) => {
                    println!("{hint}");
                    continue;
                }
            },
            Incoming::Event(None) => {
                tracing::error!("backend worker stopped");
                break;
            }
            Incoming::Event(Some(event)) => AppMessage::Event(event),
        };

        match controller.update(message) {
            Ok(commands) => {
                for cmd in commands {
                    dispatch_backend_command(&cmd_tx, cmd, controller.status_mut());
                }
            }
            Err(err) => tracing::error!("controller rejected input: {err}"),
        }
        tracing::debug!(
            epoch = controller.epoch().0,
            screen = ?controller.screen(),
            "screen updated"
        );
        println!("\n{}", "-".repeat(60));
        print!("{}", ui::render::render(&controller));
    }

    Ok(())
}
