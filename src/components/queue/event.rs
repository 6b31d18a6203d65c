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

//! Input handling for the queue popover.
//!
//! While the popover is shown it is modal: every key is consumed here.
//! Mouse presses, drags and releases over the rows are translated into
//! clicks and drag gestures; a press outside the popover dismisses it.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::{
    components::queue::{
        QueueColumn, QueueView,
        render::{DELETE_COLUMN_WIDTH, ROW_HEIGHT},
    },
    providers::Player,
};

impl QueueView {
    /// Handles a terminal event, returning `true` if the popover consumed it.
    pub(crate) fn process_event(
        &mut self,
        event: &Event,
        now: Instant,
        player: &mut dyn Player,
    ) -> bool {
        if !self.visible {
            return false;
        }

        match event {
            Event::Key(key_event) => {
                self.process_key(key_event, now, player);
                true
            }
            Event::Mouse(mouse_event) => self.process_mouse(mouse_event, now, player),
            _ => false,
        }
    }

    fn process_key(&mut self, key_event: &KeyEvent, now: Instant, player: &mut dyn Player) {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('q'), _) | (KeyCode::Char('Q'), _) => self.hide(),

            (KeyCode::Delete, _) => self.delete_focused(player),

            (KeyCode::Enter, _) => {
                if let Some(index) = self.table_state.selected() {
                    self.activate(index, QueueColumn::Title, now, player);
                }
            }

            (KeyCode::Char('J'), _) | (KeyCode::Down, KeyModifiers::SHIFT) => {
                self.move_focused(1, player)
            }
            (KeyCode::Char('K'), _) | (KeyCode::Up, KeyModifiers::SHIFT) => {
                self.move_focused(-1, player)
            }

            (KeyCode::Char('j'), _) | (KeyCode::Down, _) => self.focus_next(),
            (KeyCode::Char('k'), _) | (KeyCode::Up, _) => self.focus_previous(),

            _ => {}
        }
    }

    fn process_mouse(&mut self, mouse: &MouseEvent, now: Instant, player: &mut dyn Player) -> bool {
        let position = Position::new(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some((index, column)) = self.hit_test(position) {
                    self.press(index, column, now, player);
                } else if self.popover_area.is_some_and(|area| !area.contains(position)) {
                    self.hide();
                }
                true
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(index) = self.drag_target(position) {
                    self.pointer_moved(index);
                }
                true
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.release(player);
                true
            }
            MouseEventKind::ScrollDown => {
                self.focus_next();
                true
            }
            MouseEventKind::ScrollUp => {
                self.focus_previous();
                true
            }
            _ => false,
        }
    }

    /// Finds the row and column under the pointer.
    fn hit_test(&self, position: Position) -> Option<(usize, QueueColumn)> {
        let area = self.rows_area?;
        if !area.contains(position) {
            return None;
        }

        let index = self.table_state.offset() + usize::from((position.y - area.y) / ROW_HEIGHT);
        if index >= self.rows.len() {
            return None;
        }

        let x = position.x - area.x;
        let column = if x < self.art_size {
            QueueColumn::Art
        } else if x >= area.width.saturating_sub(DELETE_COLUMN_WIDTH) {
            QueueColumn::Delete
        } else {
            QueueColumn::Title
        };

        Some((index, column))
    }

    /// Maps a pointer position to the row a dragged row should move to,
    /// clamping positions above or below the rows.
    fn drag_target(&self, position: Position) -> Option<usize> {
        let area = self.rows_area?;
        if self.rows.is_empty() || area.height == 0 {
            return None;
        }

        let y = position.y.clamp(area.y, area.y + area.height - 1) - area.y;
        let index = self.table_state.offset() + usize::from(y / ROW_HEIGHT);

        Some(index.min(self.rows.len() - 1))
    }
}
