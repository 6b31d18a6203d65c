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

/// Leading articles that the library stores at the end of artist names so
/// that artists sort by their significant word.
const ARTICLES: [&str; 3] = ["The", "A", "An"];

/// Converts a sortable artist name into its display form.
///
/// Artist names such as `"Beatles, The"` are stored with the article moved to
/// the end; this restores the natural order. Names without a trailing article
/// are returned unchanged.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(display_artist_name("Beatles, The"), "The Beatles");
/// assert_eq!(display_artist_name("Portishead"), "Portishead");
/// ```
pub(crate) fn display_artist_name(name: &str) -> String {
    if let Some((base, article)) = name.rsplit_once(", ") {
        if let Some(article) = ARTICLES
            .iter()
            .find(|candidate| candidate.eq_ignore_ascii_case(article.trim()))
        {
            return format!("{} {}", article, base.trim());
        }
    }

    name.to_string()
}

/// Converts an artist name into its sortable form, the inverse of
/// [`display_artist_name`]: `"The Beatles"` becomes `"Beatles, The"`.
pub(crate) fn sortable_artist_name(name: &str) -> String {
    match name.split_once(' ') {
        Some((article, rest))
            if !rest.trim().is_empty()
                && ARTICLES.iter().any(|candidate| candidate.eq_ignore_ascii_case(article)) =>
        {
            format!("{}, {}", rest.trim(), article)
        }
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_article_is_moved_to_front() {
        assert_eq!(display_artist_name("Beatles, The"), "The Beatles");
        assert_eq!(display_artist_name("Perfect Circle, a"), "A Perfect Circle");
    }

    #[test]
    fn test_plain_names_are_unchanged() {
        assert_eq!(display_artist_name("Portishead"), "Portishead");
        assert_eq!(display_artist_name("Crosby, Stills & Nash"), "Crosby, Stills & Nash");
        assert_eq!(display_artist_name(""), "");
    }

    #[test]
    fn test_leading_article_is_moved_for_sorting() {
        assert_eq!(sortable_artist_name("The Beatles"), "Beatles, The");
        assert_eq!(sortable_artist_name("A Perfect Circle"), "Perfect Circle, A");
        assert_eq!(sortable_artist_name("An Pierlé"), "Pierlé, An");
        assert_eq!(sortable_artist_name("Theatre of Tragedy"), "Theatre of Tragedy");
        assert_eq!(sortable_artist_name("A-ha"), "A-ha");
        assert_eq!(sortable_artist_name("Portishead"), "Portishead");
    }

    #[test]
    fn test_sortable_names_display_as_scanned() {
        for name in ["The Beatles", "A Perfect Circle", "An Pierlé", "Portishead"] {
            assert_eq!(display_artist_name(&sortable_artist_name(name)), name);
        }
    }
}
