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

//! Play queue ownership.
//!
//! [`QueuePlayer`] owns the ordered queue of track ids and the currently
//! loaded track. Audio output is delegated elsewhere; loading a track only
//! records it as current and notifies the application through an
//! [`AppEvent`].

use std::sync::mpsc::Sender;

use crate::{events::AppEvent, model::TrackId, providers::Player};

pub(crate) struct QueuePlayer {
    queue: Vec<TrackId>,
    current: Option<TrackId>,
    event_tx: Sender<AppEvent>,
}

impl QueuePlayer {
    pub(crate) fn new(event_tx: Sender<AppEvent>) -> Self {
        Self {
            queue: Vec::new(),
            current: None,
            event_tx,
        }
    }

    /// Appends tracks to the end of the queue.
    pub(crate) fn append(&mut self, tracks: impl IntoIterator<Item = TrackId>) {
        self.queue.extend(tracks);
        tracing::debug!(len = self.queue.len(), "tracks appended to queue");
    }

    /// Loads the track at the head of the queue, if any.
    pub(crate) fn next(&mut self) -> Option<TrackId> {
        if self.queue.is_empty() {
            return None;
        }

        let track_id = self.queue.remove(0);
        self.load(track_id);

        Some(track_id)
    }

    pub(crate) fn current(&self) -> Option<TrackId> {
        self.current
    }

    pub(crate) fn queue_len(&self) -> usize {
        self.queue.len()
    }
}

impl Player for QueuePlayer {
    fn queue(&self) -> Vec<TrackId> {
        self.queue.clone()
    }

    fn set_queue(&mut self, queue: Vec<TrackId>) {
        tracing::debug!(?queue, "queue replaced");
        self.queue = queue;
    }

    fn load(&mut self, track_id: TrackId) {
        tracing::info!(track_id, "loading track");
        self.current = Some(track_id);

        // The receiver only goes away when the application is shutting down
        let _ = self.event_tx.send(AppEvent::NowPlaying(track_id));
    }
}
