//! A TUI for signing up for a gym membership

/// The "functional core" to the main module's "imperative shell"
mod app;

/// Configuration and argument parsing
mod config;

/// A macro for tab-able form fields
mod form_fields;

use app::{App, EffectContext};
use clap::Parser;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use std::{fs, io, mem, process::ExitCode, sync::Arc};
use tokio::{
    sync::mpsc::{unbounded_channel, UnboundedSender},
    task::JoinHandle,
    time,
};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How long outstanding effects get to finish once the user has asked to quit
const EXIT_GRACE: time::Duration = time::Duration::from_secs(2);

#[tokio::main]
async fn main() -> Result<ExitCode, StartupError> {
    let config = config::Config::parse();

    // held until exit so buffered log lines get flushed
    let _log_guard = init_logging(&config)?;

    tracing::info!(server = %config.server, "starting");

    let mut terminal = ratatui::init();
    terminal.clear()?;
    let res = run(terminal, &config).await;
    ratatui::restore();
    Ok(res?)
}

/// Send tracing output to a daily log file. The terminal belongs to the UI,
/// so we can't log to stdout or stderr.
fn init_logging(config: &config::Config) -> Result<WorkerGuard, StartupError> {
    let log_dir = config.log_dir();
    fs::create_dir_all(&log_dir)?;

    let appender = rolling::Builder::new()
        .rotation(rolling::Rotation::DAILY)
        .filename_prefix("gymreg")
        .filename_suffix("log")
        .build(&log_dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    Ok(guard)
}

/// Manage the lifecycle of the app
async fn run(mut terminal: DefaultTerminal, config: &config::Config) -> io::Result<ExitCode> {
    let mut app = App::new(config.branches.clone(), config.toast_lifetime());
    let context = Arc::new(EffectContext::new(config));

    // Side-effectful behaviors (network access) take place in async tasks.
    // Once those tasks are done, we read their results off of a channel. We
    // keep track of outstanding effects so we can exit cleanly.
    let (effect_tx, mut effect_rx) = unbounded_channel();
    let mut outstanding_effects = Vec::with_capacity(1);

    terminal.draw(|frame| app.render(frame))?;

    let mut event_stream = EventStream::new();

    // Toasts expire on this tick
    let mut ticks = time::interval(time::Duration::from_secs(1));

    loop {
        // Wait for either external input, a tick, or the async result of an
        // effect. We don't need to pay attention to every piece of external
        // input, hence the `Option`.
        let next_action_opt = tokio::select! {
            event_opt = event_stream.next() => {
                match event_opt {
                    Some(Ok(Event::Key(key_event))) => {
                        Some(app::Action::Key(key_event))
                    }
                    Some(Err(err)) => {
                        Some(app::Action::Problem(err.to_string()))
                    }
                    _ => None,
                }
            },

            _ = ticks.tick() => {
                Some(app::Action::TimePassed)
            },

            effect_opt = effect_rx.recv() => {
                effect_opt
            }
        };

        if let Some(action) = next_action_opt {
            for effect in app.handle(action) {
                outstanding_effects.push(spawn_effect_task(
                    effect_tx.clone(),
                    Arc::clone(&context),
                    effect,
                ));
            }
        }

        terminal.draw(|frame| app.render(frame))?;

        // This list should never be too long (we only allow one registration
        // in flight) so a full scan is fine.
        outstanding_effects.retain(|handle| !handle.is_finished());

        // If the app wants to exit, give outstanding requests a moment to
        // finish so their outcome still gets logged, but don't let a server
        // that never answers keep us around.
        if let Some(code) = app.should_exit() {
            finish_effects(mem::take(&mut outstanding_effects), EXIT_GRACE).await;

            return Ok(code);
        }
    }
}

/// Spawn a task to run an effect and send the next action to the app.
fn spawn_effect_task(
    effect_tx: UnboundedSender<app::Action>,
    context: Arc<EffectContext>,
    effect: app::Effect,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let next_action = effect.run(&context).await;

        // A closed channel means we're shutting down, and nobody is left to
        // show the result to.
        let _ = effect_tx.send(next_action);
    })
}

/// Wait up to `grace` (in total, not per task) for effects to finish, then
/// abort whatever is left. Returns how many were abandoned.
async fn finish_effects(effects: Vec<JoinHandle<()>>, grace: time::Duration) -> usize {
    let deadline = time::Instant::now() + grace;
    let mut abandoned = 0;

    for mut effect in effects {
        match time::timeout_at(deadline, &mut effect).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => tracing::error!(?err, "effect task failed"),
            Err(_) => {
                tracing::warn!(?grace, "abandoning effect that did not finish before exit");
                effect.abort();
                abandoned += 1;
            }
        }
    }

    abandoned
}

/// Problems that stop the app from starting (or from shutting down cleanly.)
#[derive(Debug, thiserror::Error)]
enum StartupError {
    /// We had a problem with the terminal or the log directory
    #[error("IO error: {0}")]
    IO(#[from] io::Error),

    /// We couldn't open a log file
    #[error("could not set up logging: {0}")]
    Logging(#[from] rolling::InitError),
}
