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

//! Queue popover state.
//!
//! [`QueueView`] mirrors the player's queue into a list of rows while the
//! popover is shown, and writes structural edits back: whenever a row is
//! removed or moved, the full visual order is pushed to the player with
//! [`Player::set_queue`].
//!
//! Clicking a row schedules playback after [`PLAY_DELAY`] so that the press
//! which starts a drag gesture does not also start playback. Deferred plays
//! are driven by [`QueueView::run_pending`], called from the application
//! tick.

mod event;
mod render;

use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::TableState,
};

use crate::{
    art::Artwork,
    config::AppConfig,
    model::TrackId,
    providers::{ArtCache, Library, LibraryResult, Player},
    render::icons::ICON_REMOVE,
    util::format::display_artist_name,
};

/// Delay between a click on a row and playback of its track.
pub(crate) const PLAY_DELAY: Duration = Duration::from_millis(500);

const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_TRACK: &str = "Unknown Track";

pub(crate) type RowKey = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QueueColumn {
    Art,
    Title,
    Delete,
}

/// One queued track as displayed in the popover.
#[derive(Debug, Clone)]
pub(crate) struct QueueEntry {
    pub(crate) key: RowKey,
    pub(crate) art: Artwork,
    pub(crate) markup: Text<'static>,
    pub(crate) delete_icon: &'static str,
    pub(crate) track_id: TrackId,
}

#[derive(Debug)]
struct PendingPlay {
    key: RowKey,
    due: Instant,
}

pub(crate) struct QueueView {
    rows: Vec<QueueEntry>,
    visible: bool,
    in_drag: bool,
    pending: Vec<PendingPlay>,
    /// Row under the pointer while the mouse button is held.
    pressed: Option<usize>,
    next_key: RowKey,
    art_size: u16,
    width_percent: u16,
    height_percent: u16,
    table_state: TableState,
    /// Where the rows were last drawn, for mouse hit testing.
    rows_area: Option<Rect>,
    popover_area: Option<Rect>,
}

impl QueueView {
    pub(crate) fn new(config: &AppConfig) -> Self {
        Self {
            rows: Vec::new(),
            visible: false,
            in_drag: false,
            pending: Vec::new(),
            pressed: None,
            next_key: 0,
            art_size: config.art_size,
            width_percent: config.queue_width_percent.min(100),
            height_percent: config.queue_height_percent.min(100),
            table_state: TableState::default(),
            rows_area: None,
            popover_area: None,
        }
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn rows(&self) -> &[QueueEntry] {
        &self.rows
    }

    /// Track ids in visual order.
    pub(crate) fn track_ids(&self) -> Vec<TrackId> {
        self.rows.iter().map(|row| row.track_id).collect()
    }

    /// Fills the popover from the player's queue and shows it.
    pub(crate) fn show(
        &mut self,
        player: &dyn Player,
        library: &dyn Library,
        art: &mut dyn ArtCache,
    ) {
        self.rows.clear();
        self.pending.clear();

        for track_id in player.queue() {
            let row = self.describe(track_id, library, art);
            self.rows.push(row);
        }

        tracing::debug!(rows = self.rows.len(), "queue popover shown");

        self.table_state.select((!self.rows.is_empty()).then_some(0));
        self.visible = true;
    }

    /// Hides the popover and discards its rows.
    ///
    /// The view is marked hidden before the rows are dropped, so clearing
    /// never reaches the player.
    pub(crate) fn hide(&mut self) {
        self.visible = false;
        self.in_drag = false;
        self.pressed = None;
        self.pending.clear();
        self.rows.clear();
        self.table_state.select(None);
        self.rows_area = None;
        self.popover_area = None;
    }

    /// Computes the popover rectangle for a window of the given size.
    pub(crate) fn popover_rect(&self, window: Rect) -> Rect {
        let width = percent_of(window.width, self.width_percent);
        let height = percent_of(window.height, self.height_percent);

        Rect {
            x: window.x + window.width.saturating_sub(width),
            y: window.y + (window.height.saturating_sub(height)) / 2,
            width,
            height,
        }
    }

    /// Handles a click on a row: the delete column removes it, anything else
    /// schedules it for playback.
    pub(crate) fn activate(
        &mut self,
        index: usize,
        column: QueueColumn,
        now: Instant,
        player: &mut dyn Player,
    ) {
        let Some(row) = self.rows.get(index) else {
            return;
        };

        match column {
            QueueColumn::Delete => self.remove_row(index, player),
            QueueColumn::Art | QueueColumn::Title => {
                self.pending.push(PendingPlay {
                    key: row.key,
                    due: now + PLAY_DELAY,
                });
            }
        }
    }

    /// Plays every scheduled row whose delay has elapsed.
    ///
    /// Plays that fall due while a drag is in progress are dropped. A played
    /// row is removed from the queue before the player loads its track.
    pub(crate) fn run_pending(&mut self, now: Instant, player: &mut dyn Player) {
        if self.pending.is_empty() {
            return;
        }

        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|play| play.due <= now);
        self.pending = waiting;

        if self.in_drag {
            return;
        }

        for play in due {
            let Some(index) = self.rows.iter().position(|row| row.key == play.key) else {
                continue;
            };

            let track_id = self.rows[index].track_id;
            self.remove_row(index, player);
            player.load(track_id);
        }
    }

    /// Removes the focused row, provided the player still has a queue.
    pub(crate) fn delete_focused(&mut self, player: &mut dyn Player) {
        if player.queue().is_empty() {
            return;
        }

        if let Some(index) = self.table_state.selected() {
            self.remove_row(index, player);
        }
    }

    /// Moves the focused row up (negative) or down (positive) by one place.
    pub(crate) fn move_focused(&mut self, delta: isize, player: &mut dyn Player) {
        let Some(from) = self.table_state.selected() else {
            return;
        };
        let Some(to) = from.checked_add_signed(delta).filter(|&to| to < self.rows.len()) else {
            return;
        };

        if self.move_row(from, to) {
            self.table_state.select(Some(to));
            self.rows_changed(player);
        }
    }

    /// Starts a pointer press on a row.
    pub(crate) fn press(
        &mut self,
        index: usize,
        column: QueueColumn,
        now: Instant,
        player: &mut dyn Player,
    ) {
        if index >= self.rows.len() {
            return;
        }

        self.table_state.select(Some(index));

        if column != QueueColumn::Delete {
            self.pressed = Some(index);
        }

        self.activate(index, column, now, player);
    }

    /// Follows the pointer while the button is held, dragging the pressed row.
    pub(crate) fn pointer_moved(&mut self, index: usize) {
        let Some(from) = self.pressed else {
            return;
        };
        let to = index.min(self.rows.len().saturating_sub(1));
        if from == to {
            return;
        }

        if !self.in_drag {
            self.begin_drag(from);
        }

        if self.move_row(from, to) {
            self.pressed = Some(to);
            self.table_state.select(Some(to));
        }
    }

    /// Ends a pointer press, completing any drag in progress.
    pub(crate) fn release(&mut self, player: &mut dyn Player) {
        self.pressed = None;

        if self.in_drag {
            self.in_drag = false;
            tracing::debug!("queue drag finished");
            self.rows_changed(player);
        }
    }

    fn begin_drag(&mut self, index: usize) {
        self.in_drag = true;

        // The press that started the drag is not a request to play
        if let Some(key) = self.rows.get(index).map(|row| row.key) {
            self.pending.retain(|play| play.key != key);
        }

        tracing::debug!(index, "queue drag started");
    }

    fn focus_next(&mut self) {
        let len = self.rows.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i < len - 1 => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    fn focus_previous(&mut self) {
        let len = self.rows.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    fn remove_row(&mut self, index: usize, player: &mut dyn Player) {
        if index >= self.rows.len() {
            return;
        }

        self.rows.remove(index);

        if self.pressed.is_some_and(|pressed| pressed >= index) {
            self.pressed = None;
        }

        let focus = match self.table_state.selected() {
            _ if self.rows.is_empty() => None,
            Some(i) => Some(i.min(self.rows.len() - 1)),
            None => None,
        };
        self.table_state.select(focus);

        self.rows_changed(player);
    }

    fn move_row(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.rows.len() || to >= self.rows.len() {
            return false;
        }

        let row = self.rows.remove(from);
        self.rows.insert(to, row);

        true
    }

    /// Pushes the visual order to the player after a structural change.
    fn rows_changed(&self, player: &mut dyn Player) {
        if self.visible {
            player.set_queue(self.track_ids());
        }
    }

    fn describe(
        &mut self,
        track_id: TrackId,
        library: &dyn Library,
        art: &mut dyn ArtCache,
    ) -> QueueEntry {
        let album_id = resolved(library.track_album_id(track_id), track_id);

        let artist_name = album_id
            .and_then(|album_id| {
                let artist = library
                    .album_artist_id(album_id)
                    .and_then(|artist_id| library.artist_name(artist_id));
                resolved(artist, track_id)
            })
            .map(|name| display_artist_name(&name))
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        let track_name = resolved(library.track_name(track_id), track_id)
            .unwrap_or_else(|| UNKNOWN_TRACK.to_string());

        let artwork = match album_id {
            Some(album_id) => art.art(album_id, self.art_size),
            None => Artwork {
                width: self.art_size,
                colour: Color::DarkGray,
            },
        };

        let markup = Text::from(vec![
            Line::from(Span::styled(
                artist_name,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(track_name),
        ]);

        let key = self.next_key;
        self.next_key += 1;

        QueueEntry {
            key,
            art: artwork,
            markup,
            delete_icon: ICON_REMOVE,
            track_id,
        }
    }
}

/// Scales a terminal dimension, widening so large windows cannot overflow.
fn percent_of(length: u16, percent: u16) -> u16 {
    let scaled = u32::from(length) * u32::from(percent.min(100)) / 100;
    u16::try_from(scaled).unwrap_or(length)
}

fn resolved<T>(result: LibraryResult<T>, track_id: TrackId) -> Option<T> {
    result
        .inspect_err(|e| tracing::warn!(track_id, error = %e, "incomplete metadata for queued track"))
        .ok()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{art::AlbumArt, db::tests::sample_library};

    /// Player double that records every queue push and load.
    #[derive(Default)]
    pub(crate) struct FakePlayer {
        pub(crate) queue: Vec<TrackId>,
        pub(crate) pushes: Vec<Vec<TrackId>>,
        pub(crate) loaded: Vec<TrackId>,
    }

    impl Player for FakePlayer {
        fn queue(&self) -> Vec<TrackId> {
            self.queue.clone()
        }

        fn set_queue(&mut self, queue: Vec<TrackId>) {
            self.pushes.push(queue.clone());
            self.queue = queue;
        }

        fn load(&mut self, track_id: TrackId) {
            self.loaded.push(track_id);
        }
    }

    pub(crate) fn shown_view(queue: &[TrackId]) -> (QueueView, FakePlayer) {
        let player = FakePlayer {
            queue: queue.to_vec(),
            ..FakePlayer::default()
        };
        let library = sample_library();
        let mut art = AlbumArt::new();

        let mut view = QueueView::new(&AppConfig::default());
        view.show(&player, &library, &mut art);

        (view, player)
    }

    fn markup_lines(entry: &QueueEntry) -> Vec<String> {
        entry
            .markup
            .lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_show_mirrors_player_queue() {
        let (view, player) = shown_view(&[2, 4, 1]);

        assert!(view.is_visible());
        assert_eq!(view.track_ids(), vec![2, 4, 1]);
        assert_eq!(markup_lines(&view.rows()[0]), ["The Beatles", "Something"]);
        assert_eq!(markup_lines(&view.rows()[1]), ["Portishead", "Sour Times"]);
        assert_eq!(view.rows()[0].delete_icon, ICON_REMOVE);
        assert!(player.pushes.is_empty());
    }

    #[test]
    fn test_show_tolerates_missing_metadata() {
        let (view, _player) = shown_view(&[99]);

        assert_eq!(markup_lines(&view.rows()[0]), [UNKNOWN_ARTIST, UNKNOWN_TRACK]);
        assert_eq!(view.rows()[0].art.colour, Color::DarkGray);
    }

    #[test]
    fn test_hide_discards_rows_without_pushing() {
        let (mut view, player) = shown_view(&[1, 2, 3]);

        view.hide();

        assert!(!view.is_visible());
        assert!(view.rows().is_empty());
        assert!(player.pushes.is_empty());
    }

    #[test]
    fn test_removing_all_rows_pushes_empty_queue() {
        let (mut view, mut player) = shown_view(&[1, 2, 3]);
        let now = Instant::now();

        while !view.rows().is_empty() {
            view.activate(0, QueueColumn::Delete, now, &mut player);
        }

        assert_eq!(player.pushes, vec![vec![2, 3], vec![3], vec![]]);
        assert!(player.queue.is_empty());
        assert!(player.loaded.is_empty());
    }

    #[test]
    fn test_drag_reorder_pushes_visual_order() {
        let (mut view, mut player) = shown_view(&[1, 2, 3, 4]);
        let now = Instant::now();

        view.press(0, QueueColumn::Title, now, &mut player);
        view.pointer_moved(1);
        view.pointer_moved(3);
        assert!(player.pushes.is_empty());

        view.release(&mut player);

        assert_eq!(view.track_ids(), vec![2, 3, 4, 1]);
        assert_eq!(player.queue, view.track_ids());
        assert_eq!(player.pushes.len(), 1);

        // The press that began the drag must not play
        view.run_pending(now + PLAY_DELAY, &mut player);
        assert!(player.loaded.is_empty());
    }

    #[test]
    fn test_click_plays_after_delay() {
        let (mut view, mut player) = shown_view(&[1, 2, 3]);
        let now = Instant::now();

        view.press(1, QueueColumn::Title, now, &mut player);
        view.release(&mut player);

        view.run_pending(now + Duration::from_millis(100), &mut player);
        assert!(player.loaded.is_empty());

        view.run_pending(now + PLAY_DELAY, &mut player);
        assert_eq!(player.loaded, vec![2]);
        assert_eq!(view.track_ids(), vec![1, 3]);
        assert_eq!(player.pushes, vec![vec![1, 3]]);
    }

    #[test]
    fn test_pending_play_is_dropped_during_drag() {
        let (mut view, mut player) = shown_view(&[1, 2, 3]);
        let now = Instant::now();

        view.table_state.select(Some(2));
        view.activate(2, QueueColumn::Title, now, &mut player);

        view.press(0, QueueColumn::Title, now, &mut player);
        view.pointer_moved(1);
        view.run_pending(now + PLAY_DELAY, &mut player);
        view.release(&mut player);

        assert!(player.loaded.is_empty());
        assert_eq!(view.track_ids(), vec![2, 1, 3]);

        view.run_pending(now + PLAY_DELAY * 2, &mut player);
        assert!(player.loaded.is_empty());
    }

    #[test]
    fn test_play_of_removed_row_is_ignored() {
        let (mut view, mut player) = shown_view(&[1, 2]);
        let now = Instant::now();

        view.activate(0, QueueColumn::Title, now, &mut player);
        view.activate(0, QueueColumn::Delete, now, &mut player);
        view.run_pending(now + PLAY_DELAY, &mut player);

        assert!(player.loaded.is_empty());
        assert_eq!(view.track_ids(), vec![2]);
    }

    #[test]
    fn test_delete_focused_requires_player_queue() {
        let (mut view, mut player) = shown_view(&[1, 2, 3]);
        view.table_state.select(Some(1));

        view.delete_focused(&mut player);
        assert_eq!(view.track_ids(), vec![1, 3]);
        assert_eq!(view.table_state.selected(), Some(1));

        player.queue.clear();
        view.delete_focused(&mut player);
        assert_eq!(view.track_ids(), vec![1, 3]);
    }

    #[test]
    fn test_keyboard_move_pushes_order() {
        let (mut view, mut player) = shown_view(&[1, 2, 3]);
        view.table_state.select(Some(0));

        view.move_focused(1, &mut player);
        assert_eq!(player.queue, vec![2, 1, 3]);
        assert_eq!(view.table_state.selected(), Some(1));

        view.move_focused(-1, &mut player);
        view.move_focused(-1, &mut player);
        assert_eq!(player.queue, vec![1, 2, 3]);
        assert_eq!(player.pushes.len(), 2);
    }

    #[test]
    fn test_popover_is_sized_from_settings() {
        let view = QueueView::new(&AppConfig::default());
        let area = view.popover_rect(Rect::new(0, 0, 100, 50));

        assert_eq!(area, Rect::new(60, 5, 40, 40));
    }

    #[test]
    fn test_popover_fits_very_wide_windows() {
        let config = AppConfig {
            queue_width_percent: 100,
            ..AppConfig::default()
        };
        let view = QueueView::new(&config);

        assert_eq!(view.popover_rect(Rect::new(0, 0, 700, 50)), Rect::new(0, 5, 700, 40));

        let view = QueueView::new(&AppConfig::default());
        let area = view.popover_rect(Rect::new(0, 0, 2000, 30));
        assert_eq!(area, Rect::new(1200, 3, 800, 24));
    }
}
