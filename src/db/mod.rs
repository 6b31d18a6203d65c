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

//! Data access layer.
//!
//! This module handles all interactions with the SQLite database, including
//! schema creation and the metadata lookups the queue view and the browser
//! panes depend on. It uses cached statements for the frequently executed
//! queries.
//!
//! # Tables
//!
//! * `artists` - Stores unique artist names, in their sortable form.
//! * `albums` - Groups tracks under titles, linked to artists.
//! * `tracks` - Individual audio files with metadata and file paths.

mod model;
pub(crate) mod scan;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

use crate::{
    model::{Album, Artist, TrackId},
    providers::{Library, LibraryError, LibraryResult},
};

/// Opens a connection to the SQLite database and configures performance settings.
///
/// This function performs the following setup:
/// * **WAL Mode**: Enables Write-Ahead Logging so the scan worker can write
///   while the UI thread reads.
/// * **Constraints**: Enforces foreign key integrity.
/// * **Schema**: Executes [`create_schema`] to ensure all tables and indices exist.
///
/// # Errors
///
/// Returns an error if the database file cannot be opened, the initial PRAGMA
/// configuration fails, or the schema cannot be created.
pub(crate) fn init_db(path: &str) -> Result<Connection> {
    let conn = Connection::open(path).with_context(|| format!("Failed to open {}", path))?;

    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if journal_mode != "wal" {
        anyhow::bail!(
            "Failed to switch to WAL mode. Current mode: {}",
            journal_mode
        );
    }

    configure(&conn)?;

    Ok(conn)
}

fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
    ",
    )?;

    conn.set_prepared_statement_cache_capacity(50);

    create_schema(conn)
}

/// Create the database schema.
///
/// This function creates the `artists`, `albums`, and `tracks` tables if they
/// do not already exist, together with indices on the foreign keys used by
/// the joins below. The statements run in a single transaction.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS artists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL COLLATE NOCASE UNIQUE
        );

        CREATE TABLE IF NOT EXISTS albums (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            artist_id INTEGER NOT NULL,
            title TEXT NOT NULL COLLATE NOCASE,
            UNIQUE (artist_id, title),
            FOREIGN KEY (artist_id) REFERENCES artists (id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_albums_artist_id ON albums (artist_id);

        CREATE TABLE IF NOT EXISTS tracks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            album_id INTEGER NOT NULL,
            track_number INTEGER,
            title TEXT NOT NULL COLLATE NOCASE,
            filename TEXT NOT NULL UNIQUE,
            FOREIGN KEY (album_id) REFERENCES albums (id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_tracks_album_id ON tracks (album_id);

        COMMIT;",
    )
    .context("Failed to create schema")
}

/// Read access to the music library for the UI thread.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &str) -> Result<Self> {
        Ok(Self {
            conn: init_db(path)?,
        })
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        configure(&conn)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Fetches all artists, sorted alphabetically by their stored name.
    pub(crate) fn artists(&self) -> LibraryResult<Vec<Artist>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name FROM artists ORDER BY name")?;
        let results = stmt
            .query_map([], Artist::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(results)
    }

    /// Fetches the albums of an artist, sorted by title.
    pub(crate) fn artist_albums(&self, artist_id: i32) -> LibraryResult<Vec<Album>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, title, artist_id FROM albums WHERE artist_id = ? ORDER BY title",
        )?;
        let results = stmt
            .query_map([artist_id], Album::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(results)
    }

    /// Fetches the track ids of an album in track number order.
    pub(crate) fn album_track_ids(&self, album_id: i32) -> LibraryResult<Vec<TrackId>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id FROM tracks WHERE album_id = ? ORDER BY track_number, title",
        )?;
        let results = stmt
            .query_map([album_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(results)
    }

    /// Fetches the track ids of every album by an artist.
    pub(crate) fn artist_track_ids(&self, artist_id: i32) -> LibraryResult<Vec<TrackId>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT tr.id
             FROM tracks tr
             JOIN albums al ON tr.album_id = al.id
             WHERE al.artist_id = ?
             ORDER BY al.title, tr.track_number, tr.title",
        )?;
        let results = stmt
            .query_map([artist_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(results)
    }

    fn lookup<T: rusqlite::types::FromSql>(
        &self,
        sql: &str,
        kind: &'static str,
        id: i32,
    ) -> LibraryResult<T> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        stmt.query_row([id], |row| row.get(0))
            .optional()?
            .ok_or(LibraryError::NotFound { kind, id })
    }
}

impl Library for Database {
    fn track_album_id(&self, track_id: TrackId) -> LibraryResult<i32> {
        self.lookup("SELECT album_id FROM tracks WHERE id = ?", "track", track_id)
    }

    fn album_artist_id(&self, album_id: i32) -> LibraryResult<i32> {
        self.lookup("SELECT artist_id FROM albums WHERE id = ?", "album", album_id)
    }

    fn artist_name(&self, artist_id: i32) -> LibraryResult<String> {
        self.lookup("SELECT name FROM artists WHERE id = ?", "artist", artist_id)
    }

    fn track_name(&self, track_id: TrackId) -> LibraryResult<String> {
        self.lookup("SELECT title FROM tracks WHERE id = ?", "track", track_id)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds an in-memory library with two artists.
    ///
    /// Artist 1 "Beatles, The" has album 1 "Abbey Road" with tracks 1..=3;
    /// artist 2 "Portishead" has album 2 "Dummy" with tracks 4 and 5.
    pub(crate) fn sample_library() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.connection()
            .execute_batch(
                "
                INSERT INTO artists (id, name) VALUES (1, 'Beatles, The'), (2, 'Portishead');
                INSERT INTO albums (id, artist_id, title) VALUES (1, 1, 'Abbey Road'), (2, 2, 'Dummy');
                INSERT INTO tracks (id, album_id, track_number, title, filename) VALUES
                    (1, 1, 1, 'Come Together', '/m/1.mp3'),
                    (2, 1, 2, 'Something', '/m/2.mp3'),
                    (3, 1, 3, 'Maxwell''s Silver Hammer', '/m/3.mp3'),
                    (4, 2, 2, 'Sour Times', '/m/4.mp3'),
                    (5, 2, 1, 'Mysterons', '/m/5.mp3');
            ",
            )
            .unwrap();
        db
    }

    #[test]
    fn test_resolves_track_metadata_chain() {
        let db = sample_library();

        let album_id = db.track_album_id(2).unwrap();
        assert_eq!(album_id, 1);
        let artist_id = db.album_artist_id(album_id).unwrap();
        assert_eq!(artist_id, 1);
        assert_eq!(db.artist_name(artist_id).unwrap(), "Beatles, The");
        assert_eq!(db.track_name(2).unwrap(), "Something");
    }

    #[test]
    fn test_missing_rows_are_reported() {
        let db = sample_library();

        let err = db.track_album_id(99).unwrap_err();
        assert!(matches!(err, LibraryError::NotFound { kind: "track", id: 99 }));
    }

    #[test]
    fn test_browser_queries() {
        let db = sample_library();

        let artists = db.artists().unwrap();
        let names: Vec<&str> = artists.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Beatles, The", "Portishead"]);

        let albums = db.artist_albums(2).unwrap();
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].title, "Dummy");
        assert_eq!(albums[0].artist_id, 2);

        assert_eq!(db.album_track_ids(2).unwrap(), vec![5, 4]);
        assert_eq!(db.artist_track_ids(1).unwrap(), vec![1, 2, 3]);
    }
}
