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

use std::time::Instant;

use anyhow::{Context, Result};

use crate::{
    App,
    model::{SelectionEntry, TrackId},
    providers::{Library, LibraryResult},
    util::format::display_artist_name,
};

pub(super) fn handle_tick(app: &mut App) {
    app.queue_view.run_pending(Instant::now(), &mut app.player);
}

pub(super) fn handle_artist_selected(app: &mut App, artist_id: i32) -> Result<()> {
    let albums = app
        .library
        .artist_albums(artist_id)
        .with_context(|| format!("Failed to fetch albums for artist {artist_id}"))?;

    app.browser
        .albums
        .populate(albums.into_iter().map(SelectionEntry::from).collect(), false);
    app.browser.albums.select_first();

    Ok(())
}

pub(super) fn handle_album_selected(_app: &mut App, album_id: i32) {
    tracing::debug!(album_id, "album selected");
}

pub(super) fn handle_now_playing(app: &mut App, track_id: TrackId) {
    let description = describe_track(&app.library, track_id).unwrap_or_else(|e| {
        tracing::warn!(track_id, error = %e, "failed to describe playing track");
        format!("Track {track_id}")
    });

    app.now_playing = Some(description);
}

/// Reloads the artists pane after the library changed.
pub(super) fn handle_library_updated(app: &mut App, track_count: i64) -> Result<()> {
    tracing::info!(track_count, "library updated");

    app.art.clear();
    refresh_artists(app)?;

    // The artist cursor survived, so its albums must be refreshed by hand.
    if let Some(artist_id) = app.browser.artists.selected_id() {
        let albums = app.library.artist_albums(artist_id)?;
        app.browser
            .albums
            .update(albums.into_iter().map(SelectionEntry::from).collect(), false);
        if app.browser.albums.selected_id().is_none() {
            app.browser.albums.select_first();
        }
    } else {
        app.browser.albums.populate(Vec::new(), false);
    }

    app.status = Some(format!("Library scanned, {track_count} tracks"));

    Ok(())
}

pub(super) fn handle_error(app: &mut App, message: String) {
    tracing::error!("{message}");
    app.last_error = Some(message);
}

/// Loads the artists pane from the library, keeping the current selection
/// where the artist still exists.
pub(crate) fn refresh_artists(app: &mut App) -> Result<()> {
    let artists = app.library.artists().context("Failed to fetch artists")?;

    app.browser
        .artists
        .update(artists.into_iter().map(SelectionEntry::from).collect(), true);
    if app.browser.artists.selected_id().is_none() {
        app.browser.artists.select_first();
    }

    Ok(())
}

fn describe_track(library: &dyn Library, track_id: TrackId) -> LibraryResult<String> {
    let album_id = library.track_album_id(track_id)?;
    let artist_id = library.album_artist_id(album_id)?;
    let artist = display_artist_name(&library.artist_name(artist_id)?);
    let title = library.track_name(track_id)?;

    Ok(format!("{artist} - {title}"))
}
