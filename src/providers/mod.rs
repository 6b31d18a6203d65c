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

//! Collaborator interfaces consumed by the UI components.
//!
//! The queue view and selection list never talk to SQLite or the player state
//! directly; they go through these traits so the components can be driven by
//! in-memory fakes in tests.

use thiserror::Error;

use crate::{art::Artwork, model::TrackId};

/// Errors raised when resolving library metadata.
#[derive(Debug, Error)]
pub(crate) enum LibraryError {
    #[error("no {kind} with id {id}")]
    NotFound { kind: &'static str, id: i32 },

    #[error("database error")]
    Sqlite(#[from] rusqlite::Error),
}

pub(crate) type LibraryResult<T> = Result<T, LibraryError>;

/// Owner of the play queue and the currently loaded track.
pub(crate) trait Player {
    /// Returns the queued track ids, in play order.
    fn queue(&self) -> Vec<TrackId>;

    /// Replaces the whole queue with a new order.
    fn set_queue(&mut self, queue: Vec<TrackId>);

    /// Loads and starts the given track.
    fn load(&mut self, track_id: TrackId);
}

/// Metadata lookups used to describe a queued track.
pub(crate) trait Library {
    fn track_album_id(&self, track_id: TrackId) -> LibraryResult<i32>;

    fn album_artist_id(&self, album_id: i32) -> LibraryResult<i32>;

    fn artist_name(&self, artist_id: i32) -> LibraryResult<String>;

    fn track_name(&self, track_id: TrackId) -> LibraryResult<String>;
}

/// Source of album artwork at a requested size.
pub(crate) trait ArtCache {
    fn art(&mut self, album_id: i32, size: u16) -> Artwork;
}
