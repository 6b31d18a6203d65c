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

//! Media browser state management.
//!
//! The browser pairs an artist list and an album list, tracks which pane has
//! keyboard focus, and forwards cursor movement in either list to the event
//! loop as [`AppEvent`]s.

use std::sync::mpsc::Sender;

use crossterm::event::Event;

use crate::{components::SelectionList, events::AppEvent};

const ARTIST_PANE_WIDTH: u16 = 32;
const ALBUM_PANE_WIDTH: u16 = 40;

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub(crate) enum BrowserPane {
    #[default]
    Artist,
    Album,
}

pub(crate) struct MediaBrowser {
    pub(crate) active_pane: BrowserPane,
    pub(crate) artists: SelectionList,
    pub(crate) albums: SelectionList,
}

impl MediaBrowser {
    pub(crate) fn new(event_tx: &Sender<AppEvent>) -> Self {
        let mut artists = SelectionList::new("Artists", ARTIST_PANE_WIDTH);
        let tx = event_tx.clone();
        artists.connect_item_selected(move |id| {
            let _ = tx.send(AppEvent::ArtistSelected(id));
        });

        let mut albums = SelectionList::new("Albums", ALBUM_PANE_WIDTH);
        let tx = event_tx.clone();
        albums.connect_item_selected(move |id| {
            let _ = tx.send(AppEvent::AlbumSelected(id));
        });

        let mut browser = Self {
            active_pane: BrowserPane::Artist,
            artists,
            albums,
        };
        browser.set_pane(BrowserPane::Artist);
        browser
    }

    pub(crate) fn set_pane(&mut self, pane: BrowserPane) {
        self.active_pane = pane;
        self.artists.is_active = pane == BrowserPane::Artist;
        self.albums.is_active = pane == BrowserPane::Album;
    }

    pub(crate) fn next_pane(&mut self) {
        let pane = match self.active_pane {
            BrowserPane::Artist => BrowserPane::Album,
            BrowserPane::Album => BrowserPane::Artist,
        };
        self.set_pane(pane);
    }

    pub(crate) fn active_list(&self) -> &SelectionList {
        match self.active_pane {
            BrowserPane::Artist => &self.artists,
            BrowserPane::Album => &self.albums,
        }
    }

    /// Passes an event to the focused list, returning `true` if it was used.
    pub(crate) fn process_event(&mut self, event: &Event) -> bool {
        match self.active_pane {
            BrowserPane::Artist => self.artists.process_event(event),
            BrowserPane::Album => self.albums.process_event(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::model::SelectionEntry;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_pane_switch_moves_focus() {
        let (tx, _rx) = mpsc::channel();
        let mut browser = MediaBrowser::new(&tx);
        assert!(browser.artists.is_active);

        browser.next_pane();
        assert_eq!(browser.active_pane, BrowserPane::Album);
        assert!(browser.albums.is_active);
        assert!(!browser.artists.is_active);

        browser.next_pane();
        assert_eq!(browser.active_pane, BrowserPane::Artist);
    }

    #[test]
    fn test_cursor_moves_are_sent_as_events() {
        let (tx, rx) = mpsc::channel();
        let mut browser = MediaBrowser::new(&tx);
        browser.artists.populate(
            vec![SelectionEntry::new(3, "Air"), SelectionEntry::new(4, "Blur")],
            true,
        );
        browser.albums.populate(vec![SelectionEntry::new(9, "Moon Safari")], false);

        browser.artists.select_first();
        assert!(browser.process_event(&key(KeyCode::Down)));
        browser.set_pane(BrowserPane::Album);
        browser.process_event(&key(KeyCode::Down));

        let events: Vec<AppEvent> = rx.try_iter().collect();
        assert!(matches!(
            events.as_slice(),
            [AppEvent::ArtistSelected(3), AppEvent::ArtistSelected(4), AppEvent::AlbumSelected(9)]
        ));
    }
}
