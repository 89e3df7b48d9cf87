//! Wire types for the source API.

use serde::Deserialize;

/// Token endpoint response for the client-credentials grant.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Playlist metadata (only the display name is requested).
#[derive(Debug, Deserialize)]
pub struct PlaylistMeta {
    pub name: String,
}

/// One page of playlist tracks.
#[derive(Debug, Deserialize)]
pub struct TracksPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    /// URL of the next page; `None` on the last page.
    pub next: Option<String>,
}

/// One playlist entry.
///
/// The track object is `None` for entries the source can no longer resolve
/// (removed or region-locked tracks); such entries are skipped.
#[derive(Debug, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<TrackObject>,
}

#[derive(Debug, Deserialize)]
pub struct TrackObject {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
    pub album: Option<AlbumObject>,
}

#[derive(Debug, Deserialize)]
pub struct ArtistObject {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AlbumObject {
    #[serde(default)]
    pub name: String,
}
