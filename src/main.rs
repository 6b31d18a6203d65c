// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Queue pane.
//!
//! A terminal music library browser with a play queue popover.
//!
//! The browser lists artists and their albums; the popover mirrors the
//! player's queue and lets it be reordered, pruned and played from with the
//! keyboard or the mouse.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** owns all widget state, manages the terminal
//!   lifecycle and renders the UI.
//! * A **Background Worker** rescans the media library with its own
//!   database connection.
//! * **Event Threads** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels.

mod art;
mod browser;
mod components;
mod config;
mod db;
mod events;
mod model;
mod player;
mod providers;
mod render;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    path::Path,
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::{
    art::AlbumArt,
    browser::MediaBrowser,
    components::QueueView,
    config::AppConfig,
    db::Database,
    events::{AppEvent, process_events},
    player::QueuePlayer,
    tasks::AppTask,
    theme::Theme,
};

/// Interval between ticks, which bounds the latency of deferred plays.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Application state.
struct App {
    pub config: AppConfig,
    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: Sender<AppTask>,

    pub library: Database,
    pub art: AlbumArt,
    pub player: QueuePlayer,

    pub browser: MediaBrowser,
    pub queue_view: QueueView,

    pub now_playing: Option<String>,
    pub status: Option<String>,
    pub last_error: Option<String>,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, library: Database, task_tx: Sender<AppTask>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        Self {
            theme: Theme::default(),
            player: QueuePlayer::new(event_tx.clone()),
            browser: MediaBrowser::new(&event_tx),
            queue_view: QueueView::new(&config),
            config,
            event_tx,
            event_rx,
            task_tx,
            library,
            art: AlbumArt::new(),
            now_playing: None,
            status: None,
            last_error: None,
        }
    }
}

/// The entry point of the application.
///
/// Sets up logging and the communication channels, initializes the
/// application state, manages the terminal lifecycle, and returns an error if
/// any part of the execution fails.
fn main() -> Result<()> {
    let config = config::load_config();

    let _log_guard = init_logging(&config).context("Failed to initialise logging")?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let library = Database::open(&config.database_file).context("Failed to open library")?;

    let (task_tx, task_rx) = mpsc::channel();

    let mut app = App::new(config, library, task_tx);

    let mut terminal = setup_terminal()?;
    let res = run(&mut terminal, &mut app, task_rx);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Sends log output to the configured file, since the terminal belongs to
/// the UI.
///
/// The returned guard flushes buffered records when dropped and must be held
/// until the application exits.
fn init_logging(config: &AppConfig) -> Result<WorkerGuard> {
    let path = Path::new(&config.log_file);
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path.file_name().context("Log file has no file name")?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,queuepane=debug"));

    tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok(guard)
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
/// * Enables mouse capture, so rows can be clicked and dragged.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`] and makes the cursor
/// visible again. It is best-effort and does not return a result, as it is
/// called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A task worker to process [`AppTask`]s.
/// * An input thread to poll for keyboard and mouse events.
/// * A tick thread that drives deferred queue playback.
///
/// It then loads the artists pane and hands control to [`process_events`].
///
/// # Errors
///
/// Returns an error if the initial library query fails or if the event loop
/// cannot draw to the terminal.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    task_rx: Receiver<AppTask>,
) -> Result<()> {
    tasks::spawn_task_worker(&app.config, task_rx, app.event_tx.clone());

    // Translate raw terminal events to application events. Only key presses
    // are forwarded, terminals that report releases would otherwise act on
    // every key twice.
    let tx_input = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let app_event = match event::read() {
                Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    AppEvent::Key(key)
                }
                Ok(event::Event::Mouse(mouse)) => AppEvent::Mouse(mouse),
                Ok(_) => continue,
                Err(e) => {
                    tracing::error!(error = %e, "failed to read terminal event");
                    break;
                }
            };

            if tx_input.send(app_event).is_err() {
                break;
            }
        }
    });

    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    events::refresh_artists(app)?;

    process_events(terminal, app)
}
