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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every application event. The queue popover, when shown, is drawn last so
//! that it sits above the browser.

pub(crate) mod icons;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    App,
    render::status::{draw_now_playing, draw_status},
    theme::Theme,
};

const KEY_HELP: [&str; 10] = [
    "j/k    move",
    "h/l    switch pane",
    "/      filter",
    "a      add to queue",
    "Q      show queue",
    "n      play next",
    "u      rescan library",
    "q      quit",
    "",
    "In the queue: Enter plays, Del removes, J/K move",
];

pub(crate) trait Render {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme);
}

/// Renders the user interface to the terminal frame.
///
/// # Arguments
///
/// * `f` - The current terminal frame used for drawing.
/// * `app` - A mutable reference to the application state, allowing widgets
///   to record their scroll positions and on-screen areas.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Outer layout: browser, now playing, status line
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    let browser = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(app.browser.artists.width()),
            Constraint::Length(app.browser.albums.width()),
            Constraint::Min(0),
        ])
        .split(outer[0]);

    app.browser.artists.draw(f, browser[0], &app.theme);
    app.browser.albums.draw(f, browser[1], &app.theme);
    draw_help(f, browser[2], &app.theme);

    draw_now_playing(f, outer[1], app);
    draw_status(f, outer[2], app);

    app.queue_view.draw(f, area, &app.theme);
}

fn draw_help(f: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Keys ")
        .border_style(Style::default().fg(theme.border_colour));

    let lines: Vec<Line> = KEY_HELP.iter().map(|line| Line::from(*line)).collect();

    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(theme.muted_fg)),
        area,
    );
}
