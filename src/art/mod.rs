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

//! Album artwork for the terminal.
//!
//! Terminals cannot show cover images reliably, so artwork is a small tile of
//! block glyphs coloured from a fixed palette. Tiles are built once per album
//! and size, then served from a cache.

use std::collections::HashMap;

use ratatui::{
    style::{Color, Style},
    text::{Line, Text},
};

use crate::providers::ArtCache;

/// Artwork width, in cells, used by list rows.
pub(crate) const ART_SIZE_MEDIUM: u16 = 4;

/// Tile height in rows, matching the two-line queue rows.
const ART_ROWS: usize = 2;

const ART_GLYPH: char = '\u{2588}';

const PALETTE: [Color; 8] = [
    Color::Rgb(231, 111, 81),
    Color::Rgb(244, 162, 97),
    Color::Rgb(233, 196, 106),
    Color::Rgb(42, 157, 143),
    Color::Rgb(38, 70, 83),
    Color::Rgb(179, 157, 219),
    Color::Rgb(129, 178, 154),
    Color::Rgb(224, 122, 95),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Artwork {
    pub(crate) width: u16,
    pub(crate) colour: Color,
}

impl Artwork {
    pub(crate) fn to_text(&self) -> Text<'static> {
        let tile: String = std::iter::repeat_n(ART_GLYPH, usize::from(self.width)).collect();
        let style = Style::default().fg(self.colour);
        Text::from(
            (0..ART_ROWS)
                .map(|_| Line::styled(tile.clone(), style))
                .collect::<Vec<_>>(),
        )
    }
}

/// Caching artwork provider keyed by album and size.
#[derive(Default)]
pub(crate) struct AlbumArt {
    cache: HashMap<(i32, u16), Artwork>,
}

impl AlbumArt {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Drops every cached tile, used after the library has been rescanned.
    pub(crate) fn clear(&mut self) {
        self.cache.clear();
    }

    fn render(album_id: i32, size: u16) -> Artwork {
        let index = album_id.unsigned_abs() as usize % PALETTE.len();
        Artwork {
            width: size,
            colour: PALETTE[index],
        }
    }
}

impl ArtCache for AlbumArt {
    fn art(&mut self, album_id: i32, size: u16) -> Artwork {
        self.cache
            .entry((album_id, size))
            .or_insert_with(|| {
                tracing::trace!(album_id, size, "rendering album art");
                Self::render(album_id, size)
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_art_is_cached_per_album_and_size() {
        let mut art = AlbumArt::new();

        let first = art.art(3, ART_SIZE_MEDIUM);
        let second = art.art(3, ART_SIZE_MEDIUM);
        assert_eq!(first, second);
        assert_eq!(art.cache.len(), 1);

        let small = art.art(3, 2);
        assert_eq!(small.width, 2);
        assert_eq!(small.colour, first.colour);
        assert_eq!(art.cache.len(), 2);
    }

    #[test]
    fn test_clear_empties_cache() {
        let mut art = AlbumArt::new();
        art.art(1, ART_SIZE_MEDIUM);
        art.clear();
        assert!(art.cache.is_empty());
    }

    #[test]
    fn test_tile_matches_row_height_and_width() {
        let artwork = AlbumArt::render(5, ART_SIZE_MEDIUM);
        let text = artwork.to_text();
        assert_eq!(text.lines.len(), ART_ROWS);
        assert_eq!(text.width(), usize::from(ART_SIZE_MEDIUM));
    }
}
