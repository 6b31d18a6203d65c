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

//! UI rendering logic for the queue popover.
//!
//! The popover is drawn over whatever lies beneath it, as a bordered table of
//! two-line rows: artwork, artist and title markup, and a delete icon.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::Style,
    text::Text,
    widgets::{Block, Borders, Cell, Clear, Padding, Paragraph, Row, Table},
};

use crate::{components::QueueView, theme::Theme};

/// Height of each queue row, in terminal lines.
pub(super) const ROW_HEIGHT: u16 = 2;

/// Width reserved at the right edge for the delete icon.
pub(super) const DELETE_COLUMN_WIDTH: u16 = 3;

impl QueueView {
    /// Draws the popover inside `window`, if it is shown.
    pub(crate) fn draw(&mut self, f: &mut Frame, window: Rect, theme: &Theme) {
        if !self.visible {
            return;
        }

        let area = self.popover_rect(window);
        f.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Queue ({}) ", self.rows.len()))
            .border_style(Style::default().fg(theme.accent_colour))
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        f.render_widget(block, area);

        self.popover_area = Some(area);
        self.rows_area = Some(inner);

        if self.rows.is_empty() {
            let empty = Paragraph::new("The queue is empty")
                .style(Style::default().fg(theme.muted_fg));
            f.render_widget(empty, inner);
            return;
        }

        let rows = self.rows.iter().map(|entry| {
            Row::new(vec![
                Cell::from(entry.art.to_text()),
                Cell::from(entry.markup.clone()),
                Cell::from(Text::from(entry.delete_icon).style(Style::default().fg(theme.muted_fg))),
            ])
            .height(ROW_HEIGHT)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(self.art_size),
                Constraint::Fill(1),
                Constraint::Length(DELETE_COLUMN_WIDTH),
            ],
        )
        .column_spacing(1)
        .row_highlight_style(
            Style::default()
                .bg(theme.highlight_bg)
                .fg(theme.highlight_fg),
        );

        f.render_stateful_widget(table, inner, &mut self.table_state);
    }
}
