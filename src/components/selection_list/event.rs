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

//! Input handling for the selection list.
//!
//! Maps terminal key events to cursor movement and to editing of the filter
//! prompt.

use crossterm::event::{Event, KeyCode};
use tui_input::backend::crossterm::EventHandler;

use crate::components::SelectionList;

impl SelectionList {
    /// Handles a terminal event, returning `true` if the list consumed it.
    pub(crate) fn process_event(&mut self, event: &Event) -> bool {
        let Event::Key(key_event) = event else {
            return false;
        };

        if self.filtering {
            match key_event.code {
                KeyCode::Esc => {
                    self.filter.reset();
                    self.filtering = false;
                    self.apply_filter();
                }
                KeyCode::Enter => self.filtering = false,
                _ => {
                    if self.filter.handle_event(event).is_some() {
                        self.apply_filter();
                    }
                }
            }

            return true;
        }

        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => self.goto_next(),
            KeyCode::Char('k') | KeyCode::Up => self.goto_previous(),
            KeyCode::Char('g') | KeyCode::Home => self.select_first(),
            KeyCode::Char('G') | KeyCode::End => self.goto_last(),
            KeyCode::Char('/') => self.filtering = true,
            _ => return false,
        }

        true
    }
}
