//! Shareable playlist URL parsing.

use url::Url;

use crate::error::{Result, SpotifyError};

/// Extract a playlist identifier from a shareable URL or bare id.
///
/// URLs are searched for a `playlist` path segment (the id is the segment
/// that follows), falling back to an `si` query parameter. Inputs that do not
/// parse as a URL are accepted as bare alphanumeric identifiers.
pub fn parse_playlist_ref(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SpotifyError::InvalidPlaylistRef(
            "empty playlist reference".to_string(),
        ));
    }

    if let Ok(url) = Url::parse(trimmed) {
        if let Some(mut segments) = url.path_segments() {
            while let Some(segment) = segments.next() {
                if segment == "playlist" {
                    if let Some(id) = segments.next().filter(|id| !id.is_empty()) {
                        return Ok(id.to_string());
                    }
                }
            }
        }

        if let Some((_, id)) = url
            .query_pairs()
            .find(|(key, value)| key.as_ref() == "si" && !value.is_empty())
        {
            return Ok(id.into_owned());
        }

        return Err(SpotifyError::InvalidPlaylistRef(format!(
            "no playlist path segment or si parameter in '{trimmed}'"
        )));
    }

    // Not a URL: accept a bare playlist id.
    if trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Ok(trimmed.to_string());
    }

    Err(SpotifyError::InvalidPlaylistRef(format!(
        "'{trimmed}' is neither a playlist URL nor a playlist id"
    )))
}
