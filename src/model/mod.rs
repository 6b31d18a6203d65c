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

//! Domain models and core data structures.
//!
//! This module defines the library entities (artists and albums) as read from
//! the database, and the transient view-model rows shown by the selection
//! list widget.

pub(crate) type TrackId = i32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub id: i32,
    pub title: String,
    pub artist_id: i32,
}

/// An id-keyed entry for a selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectionEntry {
    pub(crate) id: i32,
    pub(crate) label: String,
}

impl SelectionEntry {
    pub(crate) fn new(id: i32, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

impl From<Artist> for SelectionEntry {
    fn from(artist: Artist) -> Self {
        Self::new(artist.id, artist.name)
    }
}

impl From<Album> for SelectionEntry {
    fn from(album: Album) -> Self {
        Self::new(album.id, album.title)
    }
}
