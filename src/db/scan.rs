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

//! Media library indexing.
//!
//! This module discovers audio files under the configured media directories
//! and brings the `artists`, `albums` and `tracks` tables in line with their
//! tags. `WalkDir` handles directory traversal and `Lofty` metadata
//! extraction.
//!
//! A scan updates rows in place rather than rebuilding the tables, so a
//! track keeps its id for as long as its file exists and an artist or album
//! keeps its id for as long as it has tracks. Ids held elsewhere, such as the
//! play queue and the browser selection, stay valid across rescans.

use std::{collections::HashMap, path::Path};

use anyhow::{Context, Result};
use lofty::{prelude::*, probe::Probe, tag::ItemKey};
use rusqlite::{Connection, params};
use walkdir::WalkDir;

use crate::util::format::sortable_artist_name;

const AUDIO_EXTENSIONS: [&str; 5] = ["mp3", "flac", "ogg", "opus", "m4a"];

/// Tag values needed to place a file in the library.
pub(crate) struct TrackTags {
    pub(crate) artist: String,
    pub(crate) album: String,
    pub(crate) title: String,
    pub(crate) track_number: Option<u32>,
}

/// Synchronises the library with every configured media directory.
///
/// Files without readable tags, or whose path is not valid UTF-8, are
/// skipped and logged. Records for files that were not seen are removed.
///
/// # Returns
///
/// Returns the total number of tracks in the library after the scan.
///
/// # Errors
///
/// Returns an error if the transaction fails or database constraints are
/// violated during insertion.
pub(crate) fn process_music_library(conn: &mut Connection, media_dirs: &[String]) -> Result<i64> {
    let tx = conn.transaction()?;
    let mut import = LibraryImport::begin(&tx)?;

    for dir in media_dirs {
        tracing::info!(dir = %dir, "scanning media directory");

        for entry in WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| is_audio_file(e.path()))
        {
            let path = entry.path();

            let Some(filename) = path.to_str() else {
                tracing::warn!(path = %path.display(), "skipping file with non UTF-8 path");
                continue;
            };

            let Some(tags) = read_tags(path) else {
                continue;
            };

            import.add_track(&tags, filename)?;
        }
    }

    import.finish()?;
    tx.commit().context("Failed to commit transaction")?;

    let count: i64 = conn.query_row("SELECT COUNT(*) FROM tracks", [], |row| row.get(0))?;

    tracing::info!(count, "library scan complete");

    Ok(count)
}

/// One pass of importing tracks into the library.
///
/// Tracks are upserted by filename. The ids of the tracks seen are recorded
/// in a temporary table so that [`LibraryImport::finish`] can remove
/// everything else. Expected to run inside a transaction.
pub(crate) struct LibraryImport<'a> {
    conn: &'a Connection,
    artist_cache: HashMap<String, i64>,
    album_cache: HashMap<(i64, String), i64>,
}

impl<'a> LibraryImport<'a> {
    pub(crate) fn begin(conn: &'a Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TEMP TABLE IF NOT EXISTS scanned_tracks (id INTEGER PRIMARY KEY);
             DELETE FROM temp.scanned_tracks;",
        )?;

        Ok(Self {
            conn,
            artist_cache: HashMap::new(),
            album_cache: HashMap::new(),
        })
    }

    /// Inserts or refreshes the track stored at `filename`, returning its id.
    pub(crate) fn add_track(&mut self, tags: &TrackTags, filename: &str) -> Result<i64> {
        let artist_id = self.artist_id(&tags.artist)?;
        let album_id = self.album_id(artist_id, &tags.album)?;

        let track_id: i64 = self.conn.query_row(
            "INSERT INTO tracks (album_id, track_number, title, filename) VALUES (?, ?, ?, ?)
             ON CONFLICT (filename) DO UPDATE SET
                 album_id = excluded.album_id,
                 track_number = excluded.track_number,
                 title = excluded.title
             RETURNING id",
            params![album_id, tags.track_number, tags.title, filename],
            |row| row.get(0),
        )?;

        self.conn.execute(
            "INSERT OR IGNORE INTO temp.scanned_tracks (id) VALUES (?)",
            [track_id],
        )?;

        Ok(track_id)
    }

    /// Removes tracks that were not seen, then albums and artists left
    /// without tracks.
    pub(crate) fn finish(self) -> Result<()> {
        self.conn.execute_batch(
            "DELETE FROM tracks WHERE id NOT IN (SELECT id FROM temp.scanned_tracks);
             DELETE FROM albums WHERE id NOT IN (SELECT album_id FROM tracks);
             DELETE FROM artists WHERE id NOT IN (SELECT artist_id FROM albums);
             DROP TABLE temp.scanned_tracks;",
        )?;

        Ok(())
    }

    fn artist_id(&mut self, name: &str) -> Result<i64> {
        if let Some(&id) = self.artist_cache.get(name) {
            return Ok(id);
        }

        self.conn
            .execute("INSERT OR IGNORE INTO artists (name) VALUES (?)", params![name])?;
        let id: i64 = self.conn.query_row(
            "SELECT id FROM artists WHERE name = ?",
            params![name],
            |r| r.get(0),
        )?;
        self.artist_cache.insert(name.to_string(), id);

        Ok(id)
    }

    fn album_id(&mut self, artist_id: i64, title: &str) -> Result<i64> {
        let key = (artist_id, title.to_string());
        if let Some(&id) = self.album_cache.get(&key) {
            return Ok(id);
        }

        self.conn.execute(
            "INSERT OR IGNORE INTO albums (artist_id, title) VALUES (?, ?)",
            params![artist_id, title],
        )?;
        let id: i64 = self.conn.query_row(
            "SELECT id FROM albums WHERE artist_id = ? AND title = ?",
            params![artist_id, title],
            |r| r.get(0),
        )?;
        self.album_cache.insert(key, id);

        Ok(id)
    }
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| AUDIO_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}

fn read_tags(path: &Path) -> Option<TrackTags> {
    let tagged_file = match Probe::open(path).and_then(|p| p.read()) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable file");
            return None;
        }
    };

    let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) else {
        tracing::debug!(path = %path.display(), "skipping file without tags");
        return None;
    };

    // Albums are filed under the album artist when there is one
    let album_artist = tag
        .get(&ItemKey::AlbumArtist)
        .and_then(|item| item.value().text())
        .map(|s| s.to_string());

    let artist = album_artist
        .or_else(|| tag.artist().map(|a| a.to_string()))
        .unwrap_or_else(|| "Unknown Artist".to_string());

    let title = tag.title().map(|t| t.to_string()).unwrap_or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    Some(TrackTags {
        artist: sortable_artist_name(&artist),
        album: tag
            .album()
            .map(|a| a.to_string())
            .unwrap_or_else(|| "Unknown Album".to_string()),
        title,
        track_number: tag.track(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    pub(crate) fn tags(artist: &str, album: &str, title: &str, track_number: u32) -> TrackTags {
        TrackTags {
            artist: artist.to_string(),
            album: album.to_string(),
            title: title.to_string(),
            track_number: Some(track_number),
        }
    }

    /// Runs one import of `tracks` in its own transaction.
    pub(crate) fn import(conn: &Connection, tracks: &[(TrackTags, &str)]) {
        let tx = conn.unchecked_transaction().unwrap();
        let mut batch = LibraryImport::begin(&tx).unwrap();
        for (tags, filename) in tracks {
            batch.add_track(tags, filename).unwrap();
        }
        batch.finish().unwrap();
        tx.commit().unwrap();
    }

    fn library() -> (TempDir, Connection) {
        let temp = TempDir::new().unwrap();
        let conn_path = temp.path().join("library.db");
        let conn = crate::db::init_db(conn_path.to_str().unwrap()).unwrap();
        (temp, conn)
    }

    fn id_of(conn: &Connection, sql: &str, key: &str) -> i64 {
        conn.query_row(sql, [key], |r| r.get(0)).unwrap()
    }

    #[test]
    fn test_audio_extensions_are_matched_case_insensitively() {
        assert!(is_audio_file(Path::new("/music/a.mp3")));
        assert!(is_audio_file(Path::new("/music/b.FLAC")));
        assert!(!is_audio_file(Path::new("/music/cover.jpg")));
        assert!(!is_audio_file(Path::new("/music/README")));
    }

    #[test]
    fn test_rescan_keeps_ids() {
        let (_temp, conn) = library();

        import(
            &conn,
            &[
                (tags("Portishead", "Dummy", "Sour Times", 2), "/m/sour.mp3"),
                (tags("Beatles, The", "Abbey Road", "Something", 2), "/m/something.mp3"),
            ],
        );
        let artist = id_of(&conn, "SELECT id FROM artists WHERE name = ?", "Portishead");
        let album = id_of(&conn, "SELECT id FROM albums WHERE title = ?", "Dummy");
        let track = id_of(&conn, "SELECT id FROM tracks WHERE filename = ?", "/m/sour.mp3");

        // A new artist found first must not shift the existing ids.
        import(
            &conn,
            &[
                (tags("Air", "Moon Safari", "La Femme d'Argent", 1), "/m/air.mp3"),
                (tags("Portishead", "Dummy", "Sour Times", 2), "/m/sour.mp3"),
                (tags("Beatles, The", "Abbey Road", "Something", 2), "/m/something.mp3"),
            ],
        );

        assert_eq!(id_of(&conn, "SELECT id FROM artists WHERE name = ?", "Portishead"), artist);
        assert_eq!(id_of(&conn, "SELECT id FROM albums WHERE title = ?", "Dummy"), album);
        assert_eq!(id_of(&conn, "SELECT id FROM tracks WHERE filename = ?", "/m/sour.mp3"), track);
    }

    #[test]
    fn test_rescan_refreshes_changed_tags() {
        let (_temp, conn) = library();

        import(&conn, &[(tags("Portishead", "Dummy", "Sour Time", 1), "/m/sour.mp3")]);
        let track = id_of(&conn, "SELECT id FROM tracks WHERE filename = ?", "/m/sour.mp3");

        import(&conn, &[(tags("Portishead", "Dummy", "Sour Times", 2), "/m/sour.mp3")]);

        let (id, title, number): (i64, String, u32) = conn
            .query_row(
                "SELECT id, title, track_number FROM tracks WHERE filename = ?",
                ["/m/sour.mp3"],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!((id, title.as_str(), number), (track, "Sour Times", 2));
    }

    #[test]
    fn test_rescan_removes_missing_files_and_empty_parents() {
        let (_temp, conn) = library();

        import(
            &conn,
            &[
                (tags("Portishead", "Dummy", "Sour Times", 2), "/m/sour.mp3"),
                (tags("Beatles, The", "Abbey Road", "Something", 2), "/m/something.mp3"),
            ],
        );
        import(&conn, &[(tags("Portishead", "Dummy", "Sour Times", 2), "/m/sour.mp3")]);

        let count = |table: &str| -> i64 {
            conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
                .unwrap()
        };
        assert_eq!(count("tracks"), 1);
        assert_eq!(count("albums"), 1);
        assert_eq!(count("artists"), 1);
    }

    #[test]
    fn test_scan_removes_stale_records_and_skips_unreadable_files() {
        let (temp, mut conn) = library();
        std::fs::write(temp.path().join("broken.mp3"), b"not really audio").unwrap();
        conn.execute_batch(
            "INSERT INTO artists (id, name) VALUES (1, 'Stale');
             INSERT INTO albums (id, artist_id, title) VALUES (1, 1, 'Old');",
        )
        .unwrap();

        let dirs = vec![temp.path().to_str().unwrap().to_string()];
        let count = process_music_library(&mut conn, &dirs).unwrap();

        assert_eq!(count, 0);
        let artists: i64 = conn.query_row("SELECT COUNT(*) FROM artists", [], |r| r.get(0)).unwrap();
        assert_eq!(artists, 0);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_scan_skips_non_utf8_paths() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let (temp, mut conn) = library();
        let media = temp.path().join("media");
        std::fs::create_dir(&media).unwrap();
        std::fs::write(media.join(OsStr::from_bytes(b"bad\xff.mp3")), b"audio").unwrap();

        let dirs = vec![media.to_str().unwrap().to_string()];

        assert_eq!(process_music_library(&mut conn, &dirs).unwrap(), 0);
    }
}
