//! # Source Catalog Reader
//!
//! Reads the ordered track list of a source playlist:
//! parses a shareable playlist URL into an identifier, obtains an app-level
//! access token via the client-credentials grant, and pages through the
//! playlist's tracks until the API reports no further page.
//!
//! All failures here are fatal: without the source list there is nothing to
//! migrate.

pub mod auth;
pub mod connector;
pub mod error;
pub mod playlist_url;
pub mod types;

pub use auth::{request_access_token, SourceAccessToken};
pub use connector::{SourcePlaylist, SpotifyClient};
pub use error::{Result, SpotifyError};
pub use playlist_url::parse_playlist_ref;
