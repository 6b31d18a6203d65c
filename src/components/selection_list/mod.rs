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

//! Filterable, id-keyed selection list.
//!
//! A [`SelectionList`] backs one pane of the library browser (artists,
//! albums). Rows are replaced wholesale with [`SelectionList::populate`] or
//! reconciled with [`SelectionList::update`], which keeps the row under the
//! cursor in place so routine refreshes do not reset the selection or scroll
//! position. Observers registered with
//! [`SelectionList::connect_item_selected`] are told the id of the entry
//! whenever the cursor moves onto a row.

mod event;
mod render;

use ratatui::widgets::ListState;
use tui_input::Input;

use crate::{model::SelectionEntry, util::format::display_artist_name};

/// Identity of a row, stable for as long as the row stays in the list.
pub(crate) type RowKey = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectionRow {
    pub(crate) key: RowKey,
    pub(crate) id: i32,
    pub(crate) label: String,
}

type ItemSelected = Box<dyn Fn(i32)>;

pub(crate) struct SelectionList {
    title: String,
    width: u16,
    rows: Vec<SelectionRow>,
    cursor: Option<RowKey>,
    next_key: RowKey,
    filter: Input,
    filtering: bool,
    list_state: ListState,
    observers: Vec<ItemSelected>,
    pub(crate) is_active: bool,
}

impl SelectionList {
    pub(crate) fn new(title: impl Into<String>, width: u16) -> Self {
        Self {
            title: title.into(),
            width,
            rows: Vec::new(),
            cursor: None,
            next_key: 0,
            filter: Input::default(),
            filtering: false,
            list_state: ListState::default(),
            observers: Vec::new(),
            is_active: false,
        }
    }

    /// Registers a callback invoked with the entry id whenever the cursor
    /// moves onto a row.
    pub(crate) fn connect_item_selected(&mut self, callback: impl Fn(i32) + 'static) {
        self.observers.push(Box::new(callback));
    }

    pub(crate) fn width(&self) -> u16 {
        self.width
    }

    pub(crate) fn rows(&self) -> &[SelectionRow] {
        &self.rows
    }

    pub(crate) fn selected_id(&self) -> Option<i32> {
        self.cursor_row().map(|row| row.id)
    }

    pub(crate) fn is_filtering(&self) -> bool {
        self.filtering
    }

    /// Replaces every row with `entries`, clearing the cursor.
    ///
    /// When `is_artist` is set, labels are converted to their display form.
    pub(crate) fn populate(&mut self, entries: Vec<SelectionEntry>, is_artist: bool) {
        self.cursor = None;
        self.list_state = ListState::default();
        self.rows = entries
            .into_iter()
            .map(|entry| {
                let label = Self::display_label(entry.label, is_artist);
                self.new_row(entry.id, label)
            })
            .collect();
    }

    /// Reconciles the rows with `entries` without disturbing the cursor row.
    ///
    /// Every row except the one under the cursor is dropped; the new entries
    /// are then placed before and after the kept row so that the final order
    /// matches `entries` exactly. The kept row retains its [`RowKey`] and
    /// picks up the new label. If its id is no longer present it is removed
    /// as well and the cursor is cleared.
    ///
    /// Without a cursor this is the same as [`SelectionList::populate`].
    pub(crate) fn update(&mut self, entries: Vec<SelectionEntry>, is_artist: bool) {
        let position = self
            .cursor
            .and_then(|key| self.rows.iter().position(|row| row.key == key));

        let Some(mut preserved) = position.map(|index| self.rows.swap_remove(index)) else {
            self.populate(entries, is_artist);
            return;
        };

        self.rows.clear();

        let mut before = Vec::new();
        let mut after = Vec::new();
        let mut found = false;

        for entry in entries {
            let label = Self::display_label(entry.label, is_artist);

            if entry.id == preserved.id {
                preserved.label = label;
                found = true;
                continue;
            }

            let row = self.new_row(entry.id, label);
            if found {
                after.push(row);
            } else {
                before.push(row);
            }
        }

        self.rows = before;

        if found {
            self.rows.push(preserved);
            self.rows.extend(after);
        } else {
            tracing::debug!(id = preserved.id, title = %self.title, "selected row no longer present");
            self.cursor = None;
        }
    }

    /// Moves the cursor to the first visible row. Does nothing on an empty
    /// list.
    pub(crate) fn select_first(&mut self) {
        let first = self.visible_rows().next().map(|row| row.key);
        if first.is_some() {
            self.set_cursor(first);
        }
    }

    fn goto_next(&mut self) {
        let visible: Vec<RowKey> = self.visible_rows().map(|row| row.key).collect();
        if visible.is_empty() {
            return;
        }
        let i = match self.cursor_position(&visible) {
            Some(i) if i < visible.len() - 1 => i + 1,
            _ => 0,
        };
        self.set_cursor(Some(visible[i]));
    }

    fn goto_previous(&mut self) {
        let visible: Vec<RowKey> = self.visible_rows().map(|row| row.key).collect();
        if visible.is_empty() {
            return;
        }
        let i = match self.cursor_position(&visible) {
            Some(0) | None => visible.len() - 1,
            Some(i) => i - 1,
        };
        self.set_cursor(Some(visible[i]));
    }

    fn goto_last(&mut self) {
        let last = self.visible_rows().last().map(|row| row.key);
        if last.is_some() {
            self.set_cursor(last);
        }
    }

    /// Re-applies the filter, moving the cursor to the first visible row if
    /// its current row has been filtered out.
    fn apply_filter(&mut self) {
        let cursor_visible = self
            .cursor
            .is_some_and(|key| self.visible_rows().any(|row| row.key == key));

        if !cursor_visible {
            let first = self.visible_rows().next().map(|row| row.key);
            self.set_cursor(first);
        }
    }

    /// Rows matching the current filter, in display order.
    pub(crate) fn visible_rows(&self) -> impl Iterator<Item = &SelectionRow> {
        let needle = self.filter.value().to_lowercase();
        self.rows
            .iter()
            .filter(move |row| needle.is_empty() || row.label.to_lowercase().contains(&needle))
    }

    fn cursor_row(&self) -> Option<&SelectionRow> {
        let key = self.cursor?;
        self.rows.iter().find(|row| row.key == key)
    }

    fn cursor_position(&self, visible: &[RowKey]) -> Option<usize> {
        let key = self.cursor?;
        visible.iter().position(|&k| k == key)
    }

    fn set_cursor(&mut self, key: Option<RowKey>) {
        if self.cursor == key {
            return;
        }

        self.cursor = key;

        if let Some(id) = self.selected_id() {
            for observer in &self.observers {
                observer(id);
            }
        }
    }

    fn new_row(&mut self, id: i32, label: String) -> SelectionRow {
        let key = self.next_key;
        self.next_key += 1;
        SelectionRow { key, id, label }
    }

    fn display_label(label: String, is_artist: bool) -> String {
        if is_artist {
            display_artist_name(&label)
        } else {
            label
        }
    }
}
