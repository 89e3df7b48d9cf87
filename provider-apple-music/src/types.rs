//! Wire types for the destination API.

use serde::{Deserialize, Serialize};

// --- Catalog search ---

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: SearchResults,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResults {
    pub songs: Option<SongList>,
}

#[derive(Debug, Deserialize)]
pub struct SongList {
    #[serde(default)]
    pub data: Vec<SongResource>,
}

#[derive(Debug, Deserialize)]
pub struct SongResource {
    pub id: String,
}

// --- Library playlist creation ---

#[derive(Debug, Serialize)]
pub struct CreatePlaylistRequest {
    pub attributes: PlaylistAttributes,
    pub relationships: PlaylistRelationships,
}

#[derive(Debug, Serialize)]
pub struct PlaylistAttributes {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct PlaylistRelationships {
    pub tracks: TrackRefList,
}

#[derive(Debug, Serialize)]
pub struct TrackRefList {
    pub data: Vec<TrackRef>,
}

#[derive(Debug, Serialize)]
pub struct TrackRef {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistResponse {
    #[serde(default)]
    pub data: Vec<LibraryPlaylistResource>,
}

#[derive(Debug, Deserialize)]
pub struct LibraryPlaylistResource {
    pub id: String,
    pub attributes: Option<LibraryPlaylistAttributes>,
}

#[derive(Debug, Deserialize)]
pub struct LibraryPlaylistAttributes {
    pub name: String,
}

/// Destination playlist record returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPlaylist {
    pub id: String,
    pub name: String,
}
