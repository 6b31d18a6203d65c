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

//! Application event dispatch.
//!
//! Every state change in the application arrives as an [`AppEvent`] on a
//! single channel: terminal input and ticks from helper threads, selection
//! changes from the browser lists, playback notifications from the player
//! and results from the task worker. The loop in [`process_events`] handles
//! one event at a time and redraws after each.
//!
//! # Organization
//!
//! * `handlers`: reactions to non-input events.
//! * `key_handlers`: routing of keyboard and mouse input.

mod handlers;
mod key_handlers;

pub(crate) use handlers::refresh_artists;
use handlers::*;
use key_handlers::*;

use std::io::Stdout;

use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{App, model::TrackId, render::draw};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),

    Tick,

    ArtistSelected(i32),
    AlbumSelected(i32),

    NowPlaying(TrackId),

    LibraryUpdated(i64),

    Error(String),

    ExitApplication,
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until an exit event is received or the event channel
/// is closed. A failing handler does not end the loop; its error is logged
/// and shown in the status line.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        if let Err(e) = handle_event(app, event) {
            handle_error(app, format!("{e:#}"));
        }

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

/// Applies a single event to the application state.
pub(crate) fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::Mouse(mouse) => process_mouse_event(app, mouse),
        AppEvent::Tick => handle_tick(app),
        AppEvent::ArtistSelected(id) => handle_artist_selected(app, id)?,
        AppEvent::AlbumSelected(id) => handle_album_selected(app, id),
        AppEvent::NowPlaying(track_id) => handle_now_playing(app, track_id),
        AppEvent::LibraryUpdated(count) => handle_library_updated(app, count)?,
        AppEvent::Error(message) => handle_error(app, message),
        AppEvent::ExitApplication => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::{
        config::AppConfig,
        db::{
            scan::tests::{import, tags},
            tests::sample_library,
        },
        providers::Player,
        tasks::AppTask,
    };

    fn app() -> (App, Receiver<AppTask>) {
        let (task_tx, task_rx) = mpsc::channel();
        let app = App::new(AppConfig::default(), sample_library(), task_tx);
        (app, task_rx)
    }

    /// Handles every event queued by the previous operation.
    fn drain(app: &mut App) {
        while let Ok(event) = app.event_rx.try_recv() {
            handle_event(app, event).unwrap();
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        handle_event(app, AppEvent::Key(key)).unwrap();
        drain(app);
    }

    fn started() -> (App, Receiver<AppTask>) {
        let (mut app, task_rx) = app();
        refresh_artists(&mut app).unwrap();
        drain(&mut app);
        (app, task_rx)
    }

    #[test]
    fn test_startup_selects_first_artist_and_album() {
        let (app, _) = started();

        assert_eq!(app.browser.artists.selected_id(), Some(1));
        assert_eq!(app.browser.artists.rows()[0].label, "The Beatles");
        assert_eq!(app.browser.albums.selected_id(), Some(1));
        assert_eq!(app.browser.albums.rows()[0].label, "Abbey Road");
    }

    #[test]
    fn test_artist_navigation_repopulates_albums() {
        let (mut app, _) = started();

        press(&mut app, KeyCode::Char('j'));

        assert_eq!(app.browser.artists.selected_id(), Some(2));
        assert_eq!(app.browser.albums.rows().len(), 1);
        assert_eq!(app.browser.albums.rows()[0].label, "Dummy");
        assert_eq!(app.browser.albums.selected_id(), Some(2));
    }

    #[test]
    fn test_add_artist_and_album_to_queue() {
        let (mut app, _) = started();

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.player.queue(), vec![1, 2, 3]);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.player.queue(), vec![1, 2, 3, 5, 4]);
    }

    #[test]
    fn test_queue_popover_is_modal() {
        let (mut app, _) = started();
        press(&mut app, KeyCode::Char('a'));

        press(&mut app, KeyCode::Char('Q'));
        assert!(app.queue_view.is_visible());
        assert_eq!(app.queue_view.track_ids(), vec![1, 2, 3]);

        // Navigation goes to the popover, not to the artists list.
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.browser.artists.selected_id(), Some(1));

        press(&mut app, KeyCode::Delete);
        assert_eq!(app.player.queue(), vec![1, 3]);

        press(&mut app, KeyCode::Esc);
        assert!(!app.queue_view.is_visible());
        assert_eq!(app.player.queue(), vec![1, 3]);
    }

    #[test]
    fn test_next_plays_head_of_queue() {
        let (mut app, _) = started();

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.status.as_deref(), Some("The queue is empty"));

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('n'));

        assert_eq!(app.player.current(), Some(5));
        assert_eq!(app.player.queue(), vec![4]);
        assert_eq!(app.now_playing.as_deref(), Some("Portishead - Mysterons"));
    }

    #[test]
    fn test_rescan_is_sent_to_task_worker() {
        let (mut app, task_rx) = started();

        press(&mut app, KeyCode::Char('u'));

        assert!(matches!(task_rx.try_recv(), Ok(AppTask::ScanLibrary)));
    }

    #[test]
    fn test_rescan_keeps_artist_selection_and_queue() {
        let (mut app, _) = started();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('a'));
        let key = app.browser.artists.rows()[1].key;

        // The same files again, plus a new artist that sorts first.
        import(
            app.library.connection(),
            &[
                (tags("Air", "Moon Safari", "Kelly Watch the Stars", 4), "/m/6.mp3"),
                (tags("Beatles, The", "Abbey Road", "Come Together", 1), "/m/1.mp3"),
                (tags("Beatles, The", "Abbey Road", "Something", 2), "/m/2.mp3"),
                (tags("Beatles, The", "Abbey Road", "Maxwell's Silver Hammer", 3), "/m/3.mp3"),
                (tags("Portishead", "Dummy", "Sour Times", 2), "/m/4.mp3"),
                (tags("Portishead", "Dummy", "Mysterons", 1), "/m/5.mp3"),
            ],
        );
        handle_event(&mut app, AppEvent::LibraryUpdated(6)).unwrap();
        drain(&mut app);

        let labels: Vec<&str> = app.browser.artists.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Air", "The Beatles", "Portishead"]);
        assert_eq!(app.browser.artists.selected_id(), Some(2));
        assert_eq!(app.browser.artists.rows()[2].key, key);
        assert_eq!(app.browser.albums.selected_id(), Some(2));
        assert_eq!(app.status.as_deref(), Some("Library scanned, 6 tracks"));

        // Queued ids still resolve to the same tracks.
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.now_playing.as_deref(), Some("Portishead - Mysterons"));
    }

    #[test]
    fn test_errors_are_shown() {
        let (mut app, _) = started();

        handle_event(&mut app, AppEvent::Error("scan failed".into())).unwrap();

        assert_eq!(app.last_error.as_deref(), Some("scan failed"));
    }

    #[test]
    fn test_quit_requests_exit() {
        let (mut app, _) = started();

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        handle_event(&mut app, AppEvent::Key(key)).unwrap();

        assert!(matches!(app.event_rx.try_recv(), Ok(AppEvent::ExitApplication)));
    }
}
