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

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, MouseEvent};

use crate::{App, browser::BrowserPane, events::AppEvent, tasks::AppTask};

/// Routes keyboard input.
///
/// The queue popover sees every key while it is shown. Otherwise the focused
/// browser list gets the first chance at the key, and anything it ignores is
/// treated as a global command.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let event = Event::Key(key);

    if app
        .queue_view
        .process_event(&event, Instant::now(), &mut app.player)
    {
        return Ok(());
    }

    if app.browser.process_event(&event) {
        return Ok(());
    }

    process_global_key_event(app, key)
}

pub(super) fn process_mouse_event(app: &mut App, mouse: MouseEvent) {
    app.queue_view
        .process_event(&Event::Mouse(mouse), Instant::now(), &mut app.player);
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Char('h') | KeyCode::Left => app.browser.set_pane(BrowserPane::Artist),
        KeyCode::Char('l') | KeyCode::Right => app.browser.set_pane(BrowserPane::Album),
        KeyCode::Tab => app.browser.next_pane(),

        KeyCode::Char('Q') => toggle_queue(app),

        KeyCode::Char('a') => add_selection_to_queue(app)?,

        KeyCode::Char('n') => {
            if app.player.next().is_none() {
                app.status = Some("The queue is empty".to_string());
            }
        }

        KeyCode::Char('u') => {
            app.task_tx.send(AppTask::ScanLibrary)?;
            app.status = Some("Scanning library...".to_string());
        }

        _ => {}
    }

    Ok(())
}

fn toggle_queue(app: &mut App) {
    if app.queue_view.is_visible() {
        app.queue_view.hide();
    } else {
        app.queue_view.show(&app.player, &app.library, &mut app.art);
    }
}

fn add_selection_to_queue(app: &mut App) -> Result<()> {
    let Some(id) = app.browser.active_list().selected_id() else {
        return Ok(());
    };

    let tracks = match app.browser.active_pane {
        BrowserPane::Artist => app.library.artist_track_ids(id)?,
        BrowserPane::Album => app.library.album_track_ids(id)?,
    };

    app.status = Some(format!("Added {} tracks to the queue", tracks.len()));
    app.player.append(tracks);

    Ok(())
}
