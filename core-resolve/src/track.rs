use serde::{Deserialize, Serialize};
use std::fmt;

/// One track from the source playlist.
///
/// Identity for matching purposes is the (title, artist, album) triple, not
/// any database key. Created once from the source reader's output and never
/// mutated; `album` may be empty when the source does not carry one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub album: String,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
        }
    }

    /// Whether the track carries album metadata.
    pub fn has_album(&self) -> bool {
        !self.album.is_empty()
    }

    /// Primary search term: title, artist, and album joined with spaces.
    ///
    /// The album is skipped when empty, in which case this equals
    /// [`fallback_term`](Self::fallback_term).
    pub fn search_term(&self) -> String {
        if self.has_album() {
            format!("{} {} {}", self.title, self.artist, self.album)
        } else {
            self.fallback_term()
        }
    }

    /// Looser search term without the album.
    ///
    /// Album metadata is the most likely source of mismatch between catalogs,
    /// so the second search attempt drops it.
    pub fn fallback_term(&self) -> String {
        format!("{} {}", self.title, self.artist)
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.title, self.artist)
    }
}

/// Destination catalog song identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SongId(String);

impl SongId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of resolving one track against the destination catalog.
///
/// Exactly one outcome exists per input track by the time a batch completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// The destination catalog matched; carries the destination song id.
    Found(SongId),
    /// No match after the full fallback sequence, or the attempt degraded.
    NotFound,
}

impl ResolutionOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, ResolutionOutcome::Found(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_term_with_album() {
        let track = Track::new("Song A", "Artist X", "Album 1");
        assert_eq!(track.search_term(), "Song A Artist X Album 1");
        assert_eq!(track.fallback_term(), "Song A Artist X");
        assert!(track.has_album());
    }

    #[test]
    fn test_search_term_without_album() {
        let track = Track::new("Song B", "Artist Y", "");
        assert_eq!(track.search_term(), "Song B Artist Y");
        assert_eq!(track.fallback_term(), "Song B Artist Y");
        assert!(!track.has_album());
    }

    #[test]
    fn test_display() {
        let track = Track::new("Song A", "Artist X", "Album 1");
        assert_eq!(track.to_string(), "Song A by Artist X");
    }

    #[test]
    fn test_song_id() {
        let id = SongId::new("123456");
        assert_eq!(id.as_str(), "123456");
        assert_eq!(id.to_string(), "123456");
    }

    #[test]
    fn test_outcome_is_found() {
        assert!(ResolutionOutcome::Found(SongId::new("1")).is_found());
        assert!(!ResolutionOutcome::NotFound.is_found());
    }
}
