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

//! Render the now playing bar and the status line.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{
    App,
    render::icons::{ICON_PLAY, ICON_STOP},
};

/// Renders the current track and the number of queued tracks.
pub(crate) fn draw_now_playing(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(20)])
        .split(inner_area);

    let track_line = match (&app.now_playing, app.player.current()) {
        (Some(description), Some(_)) => Line::from(vec![
            Span::styled(format!("{ICON_PLAY} "), Style::default().add_modifier(Modifier::BOLD))
                .fg(app.theme.status_fg),
            Span::styled(description.as_str(), Style::default().add_modifier(Modifier::BOLD))
                .fg(app.theme.accent_colour),
        ]),
        _ => Line::from(vec![
            Span::raw(format!("{ICON_STOP} ")),
            Span::raw("Nothing playing"),
        ])
        .fg(app.theme.muted_fg),
    };
    f.render_widget(Paragraph::new(track_line), chunks[0]);

    let queued = Line::from(format!("{} queued", app.player.queue_len())).fg(app.theme.muted_fg);
    f.render_widget(Paragraph::new(queued).alignment(Alignment::Right), chunks[1]);
}

/// Renders the last error, or else the last status message.
pub(crate) fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(error) = &app.last_error {
        Line::from(error.as_str()).fg(app.theme.error_fg)
    } else if app.browser.active_list().is_filtering() {
        Line::from("Type to filter, Enter to keep, Esc to clear").fg(app.theme.muted_fg)
    } else if let Some(status) = &app.status {
        Line::from(status.as_str()).fg(app.theme.status_fg)
    } else {
        Line::default()
    };

    let container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1)])
        .horizontal_margin(1)
        .split(area);

    f.render_widget(Paragraph::new(line), container[0]);
}
