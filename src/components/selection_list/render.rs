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

//! UI rendering logic for the selection list.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem},
};

use crate::{components::SelectionList, render::Render, theme::Theme};

impl Render for SelectionList {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let border_style = if self.is_active {
            Style::default()
                .fg(theme.accent_colour)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.border_colour)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title))
            .border_style(border_style);

        let filter = self.filter.value();
        if self.filtering || !filter.is_empty() {
            let prompt = if self.filtering { "/" } else { "filter: " };
            block = block.title_bottom(Line::from(format!(" {}{} ", prompt, filter)));
        }

        let cursor = self.cursor;
        let mut selected = None;
        let items: Vec<ListItem> = self
            .visible_rows()
            .enumerate()
            .map(|(index, row)| {
                if Some(row.key) == cursor {
                    selected = Some(index);
                }
                ListItem::new(row.label.clone())
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(theme.highlight_bg)
                    .fg(theme.highlight_fg),
            )
            .highlight_symbol("> ");

        self.list_state.select(selected);
        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}
